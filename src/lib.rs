//! Issue Notifier
//!
//! Posts to Slack and Discord when a repository issue is opened or starts
//! collecting reactions and comments.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): issue/event/config models and port traits
//! - **Service Layer** (`services`): decision engine, formatter, dispatcher, event router
//! - **Adapters** (`adapters`): GitHub REST client, Slack and Discord webhooks
//! - **Infrastructure Layer** (`infrastructure`): configuration loading and logging
//! - **CLI Layer** (`cli`): command-line wiring
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use issue_notifier::cli::{build_router, load_event};
//! use issue_notifier::infrastructure::config::ConfigLoader;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Arc::new(ConfigLoader::load(None)?);
//!     let repo = ConfigLoader::parse_repository("octocat/hello-world", None)?;
//!     let router = build_router(config, repo, "https://api.github.com", None)?;
//!     router.run(&load_event("schedule", None).await?).await?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    EventDescriptor, EventPayload, Issue, NotificationReason, NotifierConfig, RepoRef,
};
pub use domain::ports::{DeliveryReport, IssueFetcher, IssueLister, Notifier, NotifyChannel};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{EventRouter, MessageFormatter, NotificationDispatcher};
