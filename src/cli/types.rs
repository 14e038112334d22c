//! CLI type definitions
//!
//! Every run-context argument falls back to the environment variable the
//! GitHub Actions runner sets, so the binary runs with no flags inside a
//! workflow.

use std::path::PathBuf;

use clap::Parser;

use crate::adapters::github::DEFAULT_API_URL;
use crate::infrastructure::logging::{LogConfig, LogFormat};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "issue-notifier")]
#[command(about = "Notify Slack and Discord about new or popular repository issues", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Name of the triggering event (issues, issue_comment, schedule, ...)
    #[arg(long, env = "GITHUB_EVENT_NAME")]
    pub event_name: String,

    /// Path to the JSON webhook payload of the triggering event
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,

    /// Repository in owner/repo form
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: String,

    /// Token for the GitHub API
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub REST API root
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// GitHub web host used for repository links
    #[arg(long, env = "GITHUB_SERVER_URL")]
    pub server_url: Option<String>,

    /// YAML file with action inputs; INPUT_* variables take precedence
    #[arg(long)]
    pub inputs_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Also write JSON logs into this directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Set to 1 by the runner when step debug logging is enabled
    #[arg(long, env = "RUNNER_DEBUG", hide = true)]
    pub runner_debug: Option<String>,
}

impl Cli {
    /// Logging settings, raised to debug when the runner asks for it.
    pub fn log_config(&self) -> LogConfig {
        let level = if self.runner_debug.as_deref() == Some("1") {
            "debug".to_string()
        } else {
            self.log_level.clone()
        };
        LogConfig {
            level,
            format: self.log_format,
            log_dir: self.log_dir.clone(),
        }
    }
}
