//! Static console panels
//!
//! Everything here is fixed content rendered around the live log. None of it
//! reflects real infrastructure.

use serde::{Deserialize, Serialize};

pub const PRODUCT_NAME: &str = "AutoDeploy";
pub const PRODUCT_SUFFIX: &str = "Agent";
pub const SYSTEM_STATUS: &str = "System Online";
pub const PREVIEW_PLACEHOLDER: &str = "Preview will appear here after successful deployment.";
pub const INPUT_PLACEHOLDER: &str =
    "Describe your deployment (e.g., 'Deploy a Next.js blog with dark mode')...";

/// Which tab of the output area is shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Terminal,
    Preview,
}

impl View {
    /// Tab caption
    pub fn title(&self) -> &'static str {
        match self {
            View::Terminal => "Console Output",
            View::Preview => "Live Preview",
        }
    }
}

/// One row of the environment panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentItem {
    pub label: &'static str,
    pub value: &'static str,
}

pub const ENVIRONMENT: [EnvironmentItem; 4] = [
    EnvironmentItem { label: "Branch", value: "main" },
    EnvironmentItem { label: "Region", value: "us-east-1" },
    EnvironmentItem { label: "Framework", value: "Vite + React" },
    EnvironmentItem { label: "Build Engine", value: "Turbo" },
];

/// An entry of the active deployments panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveDeployment {
    pub name: &'static str,
    pub age: &'static str,
    pub healthy: bool,
}

pub const ACTIVE_DEPLOYMENTS: [ActiveDeployment; 1] = [ActiveDeployment {
    name: "production-v2.4.0",
    age: "2m ago",
    healthy: true,
}];
