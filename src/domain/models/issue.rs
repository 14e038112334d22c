//! Issue snapshot as delivered by the GitHub REST API and webhook payloads.
//!
//! Issues and pull requests share the same shape. Pull requests carry a
//! non-null `pull_request` object; plain issues omit it or send `null`.

use serde::{Deserialize, Serialize};

/// Login rendered for issues whose author account no longer exists.
const GHOST_LOGIN: &str = "ghost";

/// A read-only issue (or pull request) record.
///
/// Event payloads embed a snapshot that may be stale; the router re-fetches
/// a fresh copy whenever reaction or comment counts matter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Sequential number within the repository (e.g., 42 → "#42").
    pub number: u64,
    /// Issue title.
    #[serde(default)]
    pub title: String,
    /// Author account, `null` for deleted users.
    #[serde(default)]
    pub user: Option<IssueUser>,
    /// URL to view the issue in the GitHub UI.
    #[serde(default)]
    pub html_url: String,
    /// Raw ISO 8601 creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Labels applied to the issue.
    #[serde(default)]
    pub labels: Vec<IssueLabel>,
    /// Reaction rollup; absent in some payloads.
    #[serde(default)]
    pub reactions: Option<ReactionSummary>,
    /// Number of comments.
    #[serde(default)]
    pub comments: Option<u64>,
    /// Present when this item is actually a pull request.
    #[serde(default)]
    pub pull_request: Option<PullRequestRef>,
    /// Current state: "open" or "closed".
    #[serde(default)]
    pub state: Option<String>,
}

/// The author of an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueUser {
    /// Account login.
    pub login: String,
}

/// A label applied to an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueLabel {
    /// The label name (e.g., "bug", "acknowledged").
    pub name: String,
}

/// Reaction rollup attached to issues.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionSummary {
    /// Sum over all reaction kinds.
    #[serde(default)]
    pub total_count: u64,
}

/// Marker object present on pull requests.
///
/// Only its presence matters; the fields are kept for logging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRef {
    /// API URL of the pull request.
    #[serde(default)]
    pub url: Option<String>,
    /// Web URL of the pull request.
    #[serde(default)]
    pub html_url: Option<String>,
}

impl Issue {
    /// Total reactions, 0 when the payload carries no reaction data.
    pub fn reaction_count(&self) -> u64 {
        self.reactions.as_ref().map_or(0, |r| r.total_count)
    }

    /// Comment count, 0 when missing.
    pub fn comment_count(&self) -> u64 {
        self.comments.unwrap_or(0)
    }

    /// Whether this item is a pull request.
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    /// Author login, `ghost` for deleted accounts.
    pub fn author(&self) -> &str {
        self.user.as_ref().map_or(GHOST_LOGIN, |u| u.login.as_str())
    }

    /// Names of the applied labels.
    pub fn label_names(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|l| l.name.as_str())
    }

    /// Whether a label with exactly this name is applied.
    pub fn has_label(&self, name: &str) -> bool {
        self.label_names().any(|l| l == name)
    }
}
