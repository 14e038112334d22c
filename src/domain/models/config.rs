//! Notifier configuration.
//!
//! Raw inputs arrive as named strings ([`ActionInputs`]) and are converted
//! exactly once into an immutable [`NotifierConfig`]. Missing or malformed
//! values fall back to documented defaults and never produce an error.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

const DEFAULT_REACTION_THRESHOLD: u64 = 5;
const DEFAULT_COMMENT_THRESHOLD: u64 = 3;
const DEFAULT_MAX_ISSUES_TO_CHECK: usize = 100;

/// Template used when `message_template` is empty.
pub const DEFAULT_MESSAGE_TEMPLATE: &str = "*{title}*\n{url}\nOpened by {author} {created_ago} · {reactions} reactions · {comments} comments";
/// Prefix for [`NotificationReason::Created`](super::NotificationReason::Created) when none is configured.
pub const DEFAULT_NEW_ISSUE_PREFIX: &str = ":new: New issue in {repo_link}";
/// Prefix for [`NotificationReason::ThresholdReached`](super::NotificationReason::ThresholdReached) when none is configured.
pub const DEFAULT_THRESHOLD_PREFIX: &str = ":fire: Issue gaining traction in {repo_link}";

/// Named string inputs, exactly as the host environment provides them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ActionInputs {
    /// Slack incoming-webhook URL.
    #[serde(default, deserialize_with = "scalar_string")]
    pub slack_webhook_url: Option<String>,
    /// Discord webhook URL.
    #[serde(default, deserialize_with = "scalar_string")]
    pub discord_webhook_url: Option<String>,
    /// Comma-separated title keywords.
    #[serde(default, deserialize_with = "scalar_string")]
    pub title_keywords: Option<String>,
    /// Comma-separated labels, one of which must be present.
    #[serde(default, deserialize_with = "scalar_string")]
    pub required_labels: Option<String>,
    /// Comma-separated labels that veto a notification.
    #[serde(default, deserialize_with = "scalar_string")]
    pub excluded_labels: Option<String>,
    /// `true` to skip pull requests.
    #[serde(default, deserialize_with = "scalar_string")]
    pub issues_only: Option<String>,
    /// Minimum reactions.
    #[serde(default, deserialize_with = "scalar_string")]
    pub reaction_threshold: Option<String>,
    /// Minimum comments.
    #[serde(default, deserialize_with = "scalar_string")]
    pub comment_threshold: Option<String>,
    /// Message body template.
    #[serde(default, deserialize_with = "scalar_string")]
    pub message_template: Option<String>,
    /// Prefix template for new issues.
    #[serde(default, deserialize_with = "scalar_string")]
    pub new_issue_prefix: Option<String>,
    /// Prefix template for threshold notifications.
    #[serde(default, deserialize_with = "scalar_string")]
    pub threshold_prefix: Option<String>,
    /// `true` to notify when issues are opened.
    #[serde(default, deserialize_with = "scalar_string")]
    pub notify_on_create: Option<String>,
    /// `true` to notify when thresholds are reached.
    #[serde(default, deserialize_with = "scalar_string")]
    pub notify_on_threshold: Option<String>,
    /// `true` to sweep issues on every event.
    #[serde(default, deserialize_with = "scalar_string")]
    pub check_all_open_issues: Option<String>,
    /// Sweep cap.
    #[serde(default, deserialize_with = "scalar_string")]
    pub max_issues_to_check: Option<String>,
    /// `open`, `closed` or `all`.
    #[serde(default, deserialize_with = "scalar_string")]
    pub issue_state: Option<String>,
}

/// Any scalar an input source may produce.
///
/// YAML inputs files carry typed values (`5` is a number, `true` a
/// boolean); inputs are strings regardless.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    UInt(u64),
    Int(i64),
    Float(f64),
    Str(String),
}

fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|s| match s {
        Scalar::Bool(b) => b.to_string(),
        Scalar::UInt(n) => n.to_string(),
        Scalar::Int(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Str(s) => s,
    }))
}

/// Issue state filter for the batch sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    /// Open issues only.
    #[default]
    Open,
    /// Closed issues only.
    Closed,
    /// Both.
    All,
}

impl IssueState {
    /// Value used by the GitHub API.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }

    /// Parse case-insensitively; `None` for anything else.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            "all" => Some(Self::All),
            _ => None,
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Title and label filters. Empty lists mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Title must contain one of these (case-insensitive).
    pub title_keywords: Vec<String>,
    /// Issue must carry one of these.
    pub required_labels: Vec<String>,
    /// Issue must carry none of these.
    pub excluded_labels: Vec<String>,
    /// Reject pull requests.
    pub issues_only: bool,
}

/// Minimum counts, either of which qualifies an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdConfig {
    /// Minimum total reactions.
    pub reactions: u64,
    /// Minimum comment count.
    pub comments: u64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            reactions: DEFAULT_REACTION_THRESHOLD,
            comments: DEFAULT_COMMENT_THRESHOLD,
        }
    }
}

/// Message and prefix templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateConfig {
    /// Body template.
    pub message: String,
    /// Prefix for newly opened issues.
    pub new_issue_prefix: String,
    /// Prefix for issues that reached a threshold.
    pub threshold_prefix: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            message: DEFAULT_MESSAGE_TEMPLATE.to_string(),
            new_issue_prefix: DEFAULT_NEW_ISSUE_PREFIX.to_string(),
            threshold_prefix: DEFAULT_THRESHOLD_PREFIX.to_string(),
        }
    }
}

/// Batch sweep settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    /// Sweep on any non-issue event, not only on `schedule`.
    pub check_all_open_issues: bool,
    /// Upper bound on issues examined per sweep.
    pub max_issues_to_check: usize,
    /// State filter for the issue list.
    pub issue_state: IssueState,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            check_all_open_issues: false,
            max_issues_to_check: DEFAULT_MAX_ISSUES_TO_CHECK,
            issue_state: IssueState::Open,
        }
    }
}

/// Immutable configuration for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotifierConfig {
    /// Slack endpoint, when enabled.
    pub slack_webhook_url: Option<String>,
    /// Discord endpoint, when enabled.
    pub discord_webhook_url: Option<String>,
    /// Type, keyword and label filters.
    pub filters: FilterConfig,
    /// Popularity thresholds.
    pub thresholds: ThresholdConfig,
    /// Message and prefix templates.
    pub templates: TemplateConfig,
    /// Notify when an issue is opened.
    pub notify_on_create: bool,
    /// Notify when reactions or comments reach a threshold.
    pub notify_on_threshold: bool,
    /// Batch sweep settings.
    pub batch: BatchConfig,
}

impl NotifierConfig {
    /// Resolve raw inputs into a typed configuration, applying defaults.
    pub fn from_inputs(inputs: &ActionInputs) -> Self {
        let issue_state = match non_empty(inputs.issue_state.as_deref()) {
            None => IssueState::Open,
            Some(raw) => IssueState::parse(raw).unwrap_or_else(|| {
                tracing::warn!(issue_state = raw, "Unknown issue_state, using 'open'");
                IssueState::Open
            }),
        };

        Self {
            slack_webhook_url: non_empty(inputs.slack_webhook_url.as_deref()).map(str::to_string),
            discord_webhook_url: non_empty(inputs.discord_webhook_url.as_deref())
                .map(str::to_string),
            filters: FilterConfig {
                title_keywords: split_list(inputs.title_keywords.as_deref()),
                required_labels: split_list(inputs.required_labels.as_deref()),
                excluded_labels: split_list(inputs.excluded_labels.as_deref()),
                issues_only: parse_flag(inputs.issues_only.as_deref()),
            },
            thresholds: ThresholdConfig {
                reactions: parse_leading_int(inputs.reaction_threshold.as_deref())
                    .unwrap_or(DEFAULT_REACTION_THRESHOLD),
                comments: parse_leading_int(inputs.comment_threshold.as_deref())
                    .unwrap_or(DEFAULT_COMMENT_THRESHOLD),
            },
            templates: TemplateConfig {
                message: inputs
                    .message_template
                    .clone()
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_MESSAGE_TEMPLATE.to_string()),
                new_issue_prefix: inputs
                    .new_issue_prefix
                    .clone()
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_NEW_ISSUE_PREFIX.to_string()),
                threshold_prefix: inputs
                    .threshold_prefix
                    .clone()
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_THRESHOLD_PREFIX.to_string()),
            },
            notify_on_create: parse_flag(inputs.notify_on_create.as_deref()),
            notify_on_threshold: parse_flag(inputs.notify_on_threshold.as_deref()),
            batch: BatchConfig {
                check_all_open_issues: parse_flag(inputs.check_all_open_issues.as_deref()),
                max_issues_to_check: parse_leading_int(inputs.max_issues_to_check.as_deref())
                    .and_then(|n| usize::try_from(n).ok())
                    .unwrap_or(DEFAULT_MAX_ISSUES_TO_CHECK),
                issue_state,
            },
        }
    }
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Comma-split, trim, drop empties.
fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Only the literal `true` enables a toggle.
fn parse_flag(raw: Option<&str>) -> bool {
    raw.is_some_and(|v| v.trim() == "true")
}

/// Integer from the leading ASCII digits (`"7 issues"` → 7), `None` when
/// there are none.
fn parse_leading_int(raw: Option<&str>) -> Option<u64> {
    let digits: String = raw?
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
