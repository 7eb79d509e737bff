//! Settings file management

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ConsoleError;
use crate::filesys::file::File;
use crate::logs::LogLevel;

/// Settings file looked up in the working directory when no path is given
pub const DEFAULT_SETTINGS_FILE: &str = "autodeploy.json";

/// Console settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Emit diagnostics as JSON
    #[serde(default)]
    pub log_json: bool,

    /// Write diagnostics to stdout instead of the log file
    #[serde(default)]
    pub log_stdout: bool,

    /// Directory of the diagnostics log file
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Print the greeting lines when the session starts
    #[serde(default = "default_true")]
    pub greeting: bool,

    /// Local HTTP server configuration
    #[serde(default)]
    pub server: ServerSettings,
}

fn default_true() -> bool {
    true
}

fn default_log_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_json: false,
            log_stdout: false,
            log_dir: default_log_dir(),
            greeting: true,
            server: ServerSettings::default(),
        }
    }
}

/// Local HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Serve the session over HTTP
    #[serde(default)]
    pub enabled: bool,

    /// Host to bind to
    #[serde(default = "default_server_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_server_port")]
    pub port: u16,
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

/// Load settings.
///
/// An explicit path must exist. Without one, `autodeploy.json` in the working
/// directory is used when present and defaults otherwise.
pub async fn load_settings(path: Option<&str>) -> Result<Settings, ConsoleError> {
    let file = match path {
        Some(path) => {
            let file = File::new(path);
            if !file.exists().await {
                return Err(ConsoleError::ConfigError(format!(
                    "settings file not found: {}",
                    path
                )));
            }
            file
        }
        None => {
            let file = File::new(DEFAULT_SETTINGS_FILE);
            if !file.exists().await {
                debug!("No settings file, using defaults");
                return Ok(Settings::default());
            }
            file
        }
    };

    debug!("Reading settings from {}", file.path().display());
    file.read_json::<Settings>().await
}
