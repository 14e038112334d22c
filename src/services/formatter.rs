//! Message formatter.
//!
//! Renders the configured template for an issue and prepends the
//! reason-specific prefix. Substitution is a single pass over the template:
//! text inserted for one token is never scanned for further tokens, so an
//! issue titled `"{url}"` renders literally.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::{Captures, Regex};
use tracing::warn;

use crate::domain::models::{Issue, NotificationReason, RepoRef, TemplateConfig};

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z_]+)\}").expect("token pattern is valid"));

/// Time elapsed since an issue was created, floored per unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IssueAge {
    /// Whole minutes.
    pub minutes: i64,
    /// Whole hours.
    pub hours: i64,
    /// Whole days.
    pub days: i64,
}

impl IssueAge {
    /// Age of an issue created at `created_at` (RFC 3339) as seen at `now`.
    ///
    /// Missing or unparseable timestamps and creation times in the future
    /// yield a zero age.
    pub fn between(created_at: Option<&str>, now: DateTime<Utc>) -> Self {
        let Some(raw) = created_at else {
            return Self::default();
        };
        let created = match DateTime::parse_from_rfc3339(raw) {
            Ok(dt) => dt.with_timezone(&Utc),
            Err(e) => {
                warn!(created_at = raw, error = %e, "Unparseable created_at timestamp");
                return Self::default();
            }
        };

        let elapsed = (now - created).max(chrono::Duration::zero());
        Self {
            minutes: elapsed.num_minutes(),
            hours: elapsed.num_hours(),
            days: elapsed.num_days(),
        }
    }

    /// Largest whole unit, e.g. `"3 hours ago"`, or `"just now"`.
    pub fn phrase(&self) -> String {
        if self.days > 0 {
            ago(self.days, "day")
        } else if self.hours > 0 {
            ago(self.hours, "hour")
        } else if self.minutes > 0 {
            ago(self.minutes, "minute")
        } else {
            "just now".to_string()
        }
    }
}

fn ago(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

/// Replace every known `{token}` in `template`; unknown tokens stay as-is.
fn substitute(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    TOKEN_PATTERN
        .replace_all(template, |caps: &Captures| {
            lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Builds notification text for one repository.
#[derive(Debug, Clone)]
pub struct MessageFormatter {
    templates: TemplateConfig,
    repo: RepoRef,
}

impl MessageFormatter {
    /// Create a formatter for `repo`.
    pub fn new(templates: TemplateConfig, repo: RepoRef) -> Self {
        Self { templates, repo }
    }

    fn repo_token(&self, token: &str) -> Option<String> {
        match token {
            "repo" => Some(self.repo.full_name()),
            "repo_name" => Some(self.repo.name.clone()),
            "repo_url" => Some(self.repo.url()),
            "repo_link" => Some(self.repo.markdown_link()),
            _ => None,
        }
    }

    /// The message template rendered for `issue`, without any prefix.
    pub fn render_body(&self, issue: &Issue, now: DateTime<Utc>) -> String {
        let age = IssueAge::between(issue.created_at.as_deref(), now);

        substitute(&self.templates.message, |token| match token {
            "title" => Some(issue.title.clone()),
            "url" => Some(issue.html_url.clone()),
            "author" => Some(issue.author().to_string()),
            "reactions" => Some(issue.reaction_count().to_string()),
            "comments" => Some(issue.comment_count().to_string()),
            "created_minutes_ago" => Some(age.minutes.to_string()),
            "created_hours_ago" => Some(age.hours.to_string()),
            "created_days_ago" => Some(age.days.to_string()),
            "created_at" => Some(issue.created_at.clone().unwrap_or_default()),
            "created_ago" => Some(age.phrase()),
            other => self.repo_token(other),
        })
    }

    /// The prefix for `reason`, with repository tokens substituted.
    pub fn render_prefix(&self, reason: NotificationReason) -> String {
        let template = match reason {
            NotificationReason::Created => &self.templates.new_issue_prefix,
            NotificationReason::ThresholdReached => &self.templates.threshold_prefix,
        };
        substitute(template, |token| self.repo_token(token))
    }

    /// Full message: prefix, blank line, body.
    pub fn format(&self, issue: &Issue, reason: NotificationReason, now: DateTime<Utc>) -> String {
        format!(
            "{}\n\n{}",
            self.render_prefix(reason),
            self.render_body(issue, now)
        )
    }
}
