//! Console session tests

use autodeploy::app::state::{ConsoleSession, SessionOptions};
use autodeploy::deploy::runner::{RejectReason, Submission};
use autodeploy::deploy::script::DEPLOY_SCRIPT;
use autodeploy::models::log_entry::Severity;
use autodeploy::models::panels::View;

fn quiet_session() -> ConsoleSession {
    ConsoleSession::start(SessionOptions {
        greeting: false,
        ..Default::default()
    })
}

#[test]
fn test_greeting_lines() {
    let session = ConsoleSession::start(SessionOptions {
        version: "1.0.0".to_string(),
        greeting: true,
    });

    let entries = session.entries();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].message, "AutoDeploy Agent v1.0.0 initialized.");
    assert_eq!(entries[0].severity, Severity::Success);
    assert_eq!(entries[1].message, "Connected to Google GenAI Service.");
    assert_eq!(entries[1].severity, Severity::Info);
    assert_eq!(entries[2].message, "Waiting for user instructions...");
    assert_eq!(entries[2].severity, Severity::Warning);
}

#[test]
fn test_greeting_can_be_disabled() {
    assert!(quiet_session().entries().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_accepted_submit_clears_input() {
    let session = quiet_session();
    session.set_input("deploy my app");

    assert_eq!(session.submit_input(), Submission::Accepted);
    assert_eq!(session.input(), "");
    assert!(session.is_running());

    session.runner().wait_until_idle().await;
    assert_eq!(session.entries().len(), 1 + DEPLOY_SCRIPT.len());
    assert!(!session.is_running());
}

#[tokio::test(start_paused = true)]
async fn test_rejected_submit_keeps_input() {
    let session = quiet_session();
    session.submit("first");
    assert_eq!(session.input(), "");

    session.set_input("draft");
    assert_eq!(
        session.submit("second"),
        Submission::Rejected(RejectReason::AlreadyRunning)
    );
    assert_eq!(session.input(), "draft");
    assert_eq!(session.snapshot().input, "draft");

    session.set_input("   ");
    assert_eq!(
        session.submit_input(),
        Submission::Rejected(RejectReason::EmptyCommand)
    );
    assert_eq!(session.input(), "   ");

    session.dispose();
    session.runner().wait_until_idle().await;
    session.set_input("kept");
    assert_eq!(
        session.submit("third"),
        Submission::Rejected(RejectReason::Disposed)
    );
    assert_eq!(session.input(), "kept");
}

#[tokio::test(start_paused = true)]
async fn test_snapshot_reflects_state() {
    let session = quiet_session();
    session.select_view(View::Preview);
    session.submit("deploy");

    let snapshot = session.snapshot();
    assert_eq!(snapshot.title, "AutoDeployAgent");
    assert_eq!(snapshot.status, "System Online");
    assert_eq!(snapshot.active_view, View::Preview);
    assert!(snapshot.is_running);
    assert_eq!(snapshot.environment.len(), 4);
    assert_eq!(snapshot.active_deployments[0].name, "production-v2.4.0");
    assert_eq!(snapshot.entries[0].message, "> deploy");

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["active_view"], "preview");
    assert_eq!(json["entries"][0]["type"], "info");
}

#[tokio::test(start_paused = true)]
async fn test_preview_does_not_change_log() {
    let session = quiet_session();
    session.select_view(View::Preview);
    session.submit("deploy");
    session.runner().wait_until_idle().await;

    session.select_view(View::Terminal);
    assert_eq!(session.active_view(), View::Terminal);
    assert_eq!(session.entries().len(), 1 + DEPLOY_SCRIPT.len());
}

#[tokio::test(start_paused = true)]
async fn test_dispose_cancels_run() {
    let session = quiet_session();
    session.submit("deploy");
    session.dispose();
    session.runner().wait_until_idle().await;

    tokio::time::sleep(std::time::Duration::from_secs(10)).await;
    assert_eq!(session.entries().len(), 1);
    assert_eq!(
        session.submit("again"),
        Submission::Rejected(RejectReason::Disposed)
    );
}
