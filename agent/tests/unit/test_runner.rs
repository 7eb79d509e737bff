//! Timeline runner tests
//!
//! Time is paused, so the script plays instantly while keeping its offsets.

use std::time::Duration;

use autodeploy::deploy::fsm::RunnerState;
use autodeploy::deploy::runner::{RejectReason, Submission, TimelineRunner};
use autodeploy::deploy::script::DEPLOY_SCRIPT;
use autodeploy::models::log_entry::Severity;
use autodeploy::store::log_store::LogStore;
use crate::is_clock_string;

fn runner() -> (LogStore, TimelineRunner) {
    let store = LogStore::new();
    let runner = TimelineRunner::new(store.clone());
    (store, runner)
}

#[tokio::test(start_paused = true)]
async fn test_submit_plays_full_script() {
    let (store, runner) = runner();
    assert_eq!(runner.state(), RunnerState::Idle);

    assert_eq!(runner.submit("deploy my app"), Submission::Accepted);
    assert!(runner.is_running());

    runner.wait_until_idle().await;

    let entries = store.read_all();
    assert_eq!(entries.len(), 1 + DEPLOY_SCRIPT.len());
    assert_eq!(entries[0].message, "> deploy my app");
    assert_eq!(entries[0].severity, Severity::Info);

    for (entry, step) in entries[1..].iter().zip(DEPLOY_SCRIPT.iter()) {
        assert_eq!(entry.message, step.message);
        assert_eq!(entry.severity, step.severity);
    }

    let last = entries.last().unwrap();
    assert_eq!(
        last.message,
        "Deployment successful! Available at https://autodeploy-agent.vercel.app"
    );
    assert_eq!(last.severity, Severity::Success);
    assert!(entries.iter().all(|e| is_clock_string(&e.timestamp)));
    assert!(!runner.is_running());
    assert_eq!(runner.runs_completed(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_empty_and_whitespace_commands_are_ignored() {
    let (store, runner) = runner();

    for command in ["", "   ", "\t\n"] {
        assert_eq!(
            runner.submit(command),
            Submission::Rejected(RejectReason::EmptyCommand)
        );
    }

    assert!(store.is_empty());
    assert_eq!(runner.state(), RunnerState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_submit_while_running_is_rejected() {
    let (store, runner) = runner();
    runner.submit("first");

    tokio::time::sleep(Duration::from_millis(1000)).await;
    let before = store.len();

    assert_eq!(
        runner.submit("second"),
        Submission::Rejected(RejectReason::AlreadyRunning)
    );
    assert_eq!(store.len(), before);

    runner.wait_until_idle().await;
    let entries = store.read_all();
    assert_eq!(entries.len(), 1 + DEPLOY_SCRIPT.len());
    assert!(entries.iter().all(|e| e.message != "> second"));
}

#[tokio::test(start_paused = true)]
async fn test_steps_fire_at_their_offsets() {
    let (store, runner) = runner();
    runner.submit("deploy");
    assert_eq!(store.len(), 1);

    tokio::time::sleep(Duration::from_millis(799)).await;
    assert_eq!(store.len(), 1);

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(store.len(), 2);

    // 1500ms offset for the second step
    tokio::time::sleep(Duration::from_millis(698)).await;
    assert_eq!(store.len(), 2);
    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(store.len(), 3);

    // Last step at 5500ms
    tokio::time::sleep(Duration::from_millis(3998)).await;
    assert!(runner.is_running());
    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(store.len(), 1 + DEPLOY_SCRIPT.len());
    assert!(!runner.is_running());
}

#[tokio::test(start_paused = true)]
async fn test_runner_is_reusable_after_completion() {
    let (store, runner) = runner();

    runner.submit("one");
    runner.wait_until_idle().await;
    assert_eq!(runner.submit("two"), Submission::Accepted);
    runner.wait_until_idle().await;

    let entries = store.read_all();
    assert_eq!(entries.len(), 2 * (1 + DEPLOY_SCRIPT.len()));
    assert_eq!(entries[1 + DEPLOY_SCRIPT.len()].message, "> two");
    assert_eq!(runner.runs_completed(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_echo_keeps_command_as_typed() {
    let (store, runner) = runner();
    runner.submit("  deploy a blog ");

    assert_eq!(store.read_all()[0].message, ">   deploy a blog ");
}

#[tokio::test(start_paused = true)]
async fn test_dispose_stops_playback() {
    let (store, runner) = runner();
    runner.submit("deploy");

    tokio::time::sleep(Duration::from_millis(1600)).await;
    assert_eq!(store.len(), 3);

    runner.dispose();
    runner.wait_until_idle().await;
    tokio::time::sleep(Duration::from_secs(10)).await;

    assert_eq!(store.len(), 3);
    assert_eq!(runner.runs_completed(), 0);
    assert!(runner.is_disposed());
    assert_eq!(
        runner.submit("again"),
        Submission::Rejected(RejectReason::Disposed)
    );
}

#[tokio::test(start_paused = true)]
async fn test_state_transitions_are_observable() {
    let (_store, runner) = runner();
    let mut rx = runner.subscribe();

    runner.submit("deploy");
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().state(), RunnerState::Running);

    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().state(), RunnerState::Idle);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_echo_is_visible_when_running_is_observed() {
    let (store, runner) = runner();
    let mut rx = runner.subscribe();

    let observer = {
        let store = store.clone();
        tokio::spawn(async move {
            let _ = rx.wait_for(|fsm| fsm.state() == RunnerState::Running).await;
            store.read_all()
        })
    };

    // Let the observer park on the channel first
    tokio::task::yield_now().await;
    assert_eq!(runner.submit("deploy"), Submission::Accepted);

    let seen = observer.await.unwrap();
    assert_eq!(seen[0].message, "> deploy");
    runner.dispose();
}
