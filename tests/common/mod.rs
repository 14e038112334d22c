//! Common test utilities for integration tests
//!
//! Shared fixtures for building issue JSON, notifier configuration and
//! mock-server backed routers.

#![allow(dead_code)]

use std::sync::Arc;

use issue_notifier::cli::build_router;
use issue_notifier::domain::models::{ActionInputs, NotifierConfig, RepoRef};
use issue_notifier::EventRouter;
use serde_json::{json, Value};

pub const OWNER: &str = "octo";
pub const REPO: &str = "widgets";

/// Path of the issue list endpoint for the test repository.
pub fn issues_path() -> String {
    format!("/repos/{OWNER}/{REPO}/issues")
}

/// Path of a single issue for the test repository.
pub fn issue_path(number: u64) -> String {
    format!("{}/{number}", issues_path())
}

/// Minimal GitHub issue JSON with the given counters and labels.
pub fn issue_json(number: u64, title: &str, reactions: u64, comments: u64, labels: &[&str]) -> Value {
    json!({
        "number": number,
        "title": title,
        "state": "open",
        "html_url": format!("https://github.com/{OWNER}/{REPO}/issues/{number}"),
        "created_at": "2024-01-01T00:00:00Z",
        "user": { "login": "octocat" },
        "labels": labels.iter().map(|name| json!({ "name": name })).collect::<Vec<_>>(),
        "reactions": { "total_count": reactions },
        "comments": comments,
    })
}

/// Inputs with both toggles on and both webhooks pointing at `webhook_base`.
pub fn inputs_with_webhooks(webhook_base: &str) -> ActionInputs {
    ActionInputs {
        slack_webhook_url: Some(format!("{webhook_base}/slack")),
        discord_webhook_url: Some(format!("{webhook_base}/discord")),
        notify_on_create: Some("true".to_string()),
        notify_on_threshold: Some("true".to_string()),
        ..Default::default()
    }
}

/// Router wired to a mock GitHub API and the given inputs.
pub fn router_for(github_url: &str, inputs: &ActionInputs) -> EventRouter {
    let config = Arc::new(NotifierConfig::from_inputs(inputs));
    build_router(
        config,
        RepoRef::new(OWNER, REPO),
        github_url,
        Some("test-token".to_string()),
    )
    .expect("Failed to build router")
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
