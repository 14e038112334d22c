//! Incoming event descriptors and notification reasons.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::issue::Issue;

/// The event that triggered a run: its name plus the webhook payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventDescriptor {
    /// `GITHUB_EVENT_NAME`, e.g. `issues`.
    pub event_name: String,
    /// Parsed webhook payload.
    pub payload: EventPayload,
}

/// The subset of a GitHub webhook payload the router inspects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPayload {
    /// Activity type, e.g. `opened`, `edited`, `created`.
    #[serde(default)]
    pub action: Option<String>,
    /// Embedded issue snapshot (absent for scheduled runs).
    #[serde(default)]
    pub issue: Option<Issue>,
}

impl EventDescriptor {
    /// Create a descriptor from an event name and its payload.
    pub fn new(event_name: impl Into<String>, payload: EventPayload) -> Self {
        Self {
            event_name: event_name.into(),
            payload,
        }
    }

    /// Classify the event name.
    pub fn kind(&self) -> EventKind {
        EventKind::from_name(&self.event_name)
    }

    /// Payload action, empty when absent.
    pub fn action(&self) -> &str {
        self.payload.action.as_deref().unwrap_or_default()
    }
}

/// Event kinds the router distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// `issues`
    Issues,
    /// `issue_comment`
    IssueComment,
    /// `schedule`
    Schedule,
    /// Any other event name
    Other(String),
}

impl EventKind {
    /// Map a GitHub event name to its kind.
    pub fn from_name(name: &str) -> Self {
        match name {
            "issues" => Self::Issues,
            "issue_comment" => Self::IssueComment,
            "schedule" => Self::Schedule,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Why a notification is being sent. Selects the message prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationReason {
    /// A new issue was opened.
    Created,
    /// Reactions or comments reached a threshold.
    ThresholdReached,
}

impl NotificationReason {
    /// Wire name, e.g. `threshold_reached`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::ThresholdReached => "threshold_reached",
        }
    }
}

impl fmt::Display for NotificationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
