//! HTTP request handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::deploy::runner::{RejectReason, Submission};
use crate::models::log_entry::LogEntry;
use crate::models::panels::View;
use crate::server::state::ServerState;
use crate::utils::version_info;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Health check handler
pub async fn health_handler() -> impl IntoResponse {
    let version = version_info();
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "autodeploy-agent".to_string(),
        version: version.version,
    })
}

/// Version response
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub git_hash: String,
    pub build_time: String,
}

/// Version handler
pub async fn version_handler() -> impl IntoResponse {
    let version = version_info();
    Json(VersionResponse {
        version: version.version,
        git_hash: version.git_hash,
        build_time: version.build_time,
    })
}

/// Full console snapshot
pub async fn console_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    Json(state.session.snapshot())
}

/// Logs response
#[derive(Debug, Serialize)]
pub struct LogsResponse {
    pub entries: Vec<LogEntry>,
    pub total: usize,
}

/// Logs handler
pub async fn logs_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let entries = state.session.entries();
    let total = entries.len();
    Json(LogsResponse { entries, total })
}

/// Submit request
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub command: String,
}

/// Submit response
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RejectReason>,
}

/// Submit handler. Rejections are reported to the caller only; the log is
/// left untouched.
pub async fn submit_handler(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<SubmitRequest>,
) -> impl IntoResponse {
    let (status, body) = match state.session.submit(&request.command) {
        Submission::Accepted => (
            StatusCode::ACCEPTED,
            SubmitResponse {
                accepted: true,
                reason: None,
            },
        ),
        Submission::Rejected(reason) => (
            StatusCode::OK,
            SubmitResponse {
                accepted: false,
                reason: Some(reason),
            },
        ),
    };
    (status, Json(body))
}

/// View request and response
#[derive(Debug, Serialize, Deserialize)]
pub struct ViewBody {
    pub view: View,
}

/// Switch the active tab
pub async fn view_handler(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<ViewBody>,
) -> impl IntoResponse {
    state.session.select_view(request.view);
    Json(ViewBody {
        view: state.session.active_view(),
    })
}
