//! Domain models

pub mod config;
pub mod event;
pub mod issue;
pub mod repository;

pub use config::{
    ActionInputs, BatchConfig, FilterConfig, IssueState, NotifierConfig, TemplateConfig,
    ThresholdConfig,
};
pub use event::{EventDescriptor, EventKind, EventPayload, NotificationReason};
pub use issue::{Issue, IssueLabel, IssueUser, PullRequestRef, ReactionSummary};
pub use repository::RepoRef;
