//! AutoDeploy Agent - Entry Point
//!
//! Plays a scripted deployment console in the terminal, optionally serving the
//! same session over a local HTTP API.

use std::collections::HashMap;
use std::env;

use autodeploy::app::options::AppOptions;
use autodeploy::app::run::run;
use autodeploy::logs::{init_logging, LogLevel, LogOptions};
use autodeploy::storage::settings::load_settings;
use autodeploy::utils::version_info;

use tokio::io::BufReader;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut cli_args: HashMap<String, String> = HashMap::new();

    for arg in args.iter().skip(1) {
        if let Some((key, value)) = arg.split_once('=') {
            // Handle --key=value format
            let clean_key = key.trim_start_matches('-');
            cli_args.insert(clean_key.to_string(), value.to_string());
        } else if arg.starts_with("--") {
            // Handle standalone flags like --version
            let clean_key = arg.trim_start_matches('-');
            cli_args.insert(clean_key.to_string(), "true".to_string());
        }
    }

    // Print version and exit
    let version = version_info();
    if cli_args.contains_key("version") {
        match serde_json::to_string_pretty(&version) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to serialize version info: {e}"),
        }
        return;
    }

    // Retrieve the settings file
    let mut settings = match load_settings(cli_args.get("config").map(String::as_str)).await {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Unable to read settings file: {e}");
            return;
        }
    };

    // Command line overrides
    if let Some(level) = cli_args.get("log-level") {
        match level.parse::<LogLevel>() {
            Ok(level) => settings.log_level = level,
            Err(e) => {
                eprintln!("{e}");
                return;
            }
        }
    }
    if cli_args.contains_key("serve") {
        settings.server.enabled = true;
    }
    if cli_args.contains_key("no-greeting") {
        settings.greeting = false;
    }

    // Initialize logging
    let log_options = LogOptions {
        log_level: settings.log_level.clone(),
        stdout: settings.log_stdout,
        log_dir: settings.log_dir.clone(),
        json_format: settings.log_json,
    };
    let log_guard = match init_logging(log_options) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            None
        }
    };

    // Run the console
    let options = AppOptions::from_settings(version.version, &settings);
    info!("Running AutoDeploy console with options: {:?}", options);

    let reader = BufReader::new(tokio::io::stdin());
    let writer = tokio::io::stdout();
    let code = match run(options, reader, writer, await_shutdown_signal()).await {
        Ok(()) => 0,
        Err(e) => {
            error!("Console exited with error: {e}");
            eprintln!("Console exited with error: {e}");
            1
        }
    };

    // A pending stdin read would otherwise keep the runtime alive
    drop(log_guard);
    std::process::exit(code);
}

async fn await_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let (mut sigterm, mut sigint) = match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(sigterm), Ok(sigint)) => (sigterm, sigint),
            _ => {
                error!("Failed to install signal handlers, falling back to Ctrl+C");
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };

        tokio::select! {
            _ = sigterm.recv() => {
                info!("SIGTERM received, shutting down...");
            }
            _ = sigint.recv() => {
                info!("SIGINT received, shutting down...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl+C received, shutting down...");
        }
    }
}
