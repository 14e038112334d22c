//! Command-line entry point wiring.
//!
//! Loads configuration and the event payload, builds the GitHub client and
//! webhook channels, and runs the event router once.

pub mod types;

pub use types::Cli;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::adapters::github::GitHubClient;
use crate::adapters::http_client;
use crate::adapters::webhooks::channels_from_config;
use crate::domain::models::{EventDescriptor, EventPayload, NotifierConfig, RepoRef};
use crate::infrastructure::config::ConfigLoader;
use crate::services::{EventRouter, MessageFormatter, NotificationDispatcher};

/// Read the webhook payload for `event_name`.
///
/// Without a payload file the event carries no action and no issue, which
/// is what scheduled runs look like.
pub async fn load_event(event_name: &str, event_path: Option<&Path>) -> Result<EventDescriptor> {
    let payload = match event_path {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read event payload {}", path.display()))?;
            serde_json::from_str::<EventPayload>(&raw)
                .with_context(|| format!("Failed to parse event payload {}", path.display()))?
        }
        None => EventPayload::default(),
    };
    Ok(EventDescriptor::new(event_name, payload))
}

/// Wire the GitHub client, webhook channels and formatter into a router.
pub fn build_router(
    config: Arc<NotifierConfig>,
    repo: RepoRef,
    api_url: &str,
    token: Option<String>,
) -> Result<EventRouter> {
    let http = http_client().context("Failed to build HTTP client")?;
    let github = Arc::new(GitHubClient::new(http.clone(), token).with_base_url(api_url));

    let channels = channels_from_config(&config, &http);
    let formatter = MessageFormatter::new(config.templates.clone(), repo.clone());
    let notifier = Arc::new(NotificationDispatcher::new(formatter, channels));

    Ok(EventRouter::new(
        config,
        repo,
        github.clone(),
        github,
        notifier,
    ))
}

/// Run once for the event described by `cli`. Returns the number of
/// issues notified.
pub async fn execute(cli: &Cli) -> Result<usize> {
    let config = Arc::new(ConfigLoader::load(cli.inputs_file.as_deref())?);
    let repo = ConfigLoader::parse_repository(&cli.repository, cli.server_url.as_deref())?;
    let event = load_event(&cli.event_name, cli.event_path.as_deref()).await?;

    let router = build_router(config, repo, &cli.api_url, cli.token.clone())?;
    let notified = router.run(&event).await?;

    info!(notified, "Run complete");
    Ok(notified)
}

/// Report a fatal failure to the log and to the runner.
pub fn handle_error(err: &anyhow::Error) {
    let message = format!("{err:#}");
    error!(error = %message, "Action failed");
    println!("::error::{}", escape_workflow_data(&format!("Action failed: {message}")));
}

/// Escape text for a `::error::` workflow command.
fn escape_workflow_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn test_escape_workflow_data() {
        assert_eq!(
            escape_workflow_data("100% broken\r\nsecond line"),
            "100%25 broken%0D%0Asecond line"
        );
    }

    #[tokio::test]
    async fn test_load_event_from_payload_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{ "action": "opened", "issue": {{ "number": 12, "title": "Crash on start" }}, "sender": {{ "login": "octocat" }} }}"#
        )
        .unwrap();

        let event = load_event("issues", Some(file.path())).await.unwrap();
        assert_eq!(event.event_name, "issues");
        assert_eq!(event.action(), "opened");
        assert_eq!(event.payload.issue.unwrap().number, 12);
    }

    #[tokio::test]
    async fn test_load_event_without_payload() {
        let event = load_event("schedule", None).await.unwrap();
        assert!(event.payload.issue.is_none());
        assert_eq!(event.action(), "");
    }

    #[tokio::test]
    async fn test_load_event_rejects_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not json").unwrap();
        assert!(load_event("issues", Some(file.path())).await.is_err());
    }

    #[test]
    fn test_runner_debug_raises_log_level() {
        let cli = Cli::try_parse_from([
            "issue-notifier",
            "--event-name",
            "issues",
            "--repository",
            "test/repo",
            "--runner-debug",
            "1",
        ])
        .unwrap();
        assert_eq!(cli.log_config().level, "debug");
    }
}
