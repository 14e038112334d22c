//! Credential redaction for log output.

use regex::Regex;
use std::fmt;

/// Redacts credentials from text before it is logged.
///
/// Webhook URLs carry their secret in the path, and `reqwest` errors echo
/// the request URL, so delivery errors go through here.
#[derive(Clone)]
pub struct SecretScrubber {
    slack_webhook_pattern: Regex,
    discord_webhook_pattern: Regex,
    github_token_pattern: Regex,
    bearer_pattern: Regex,
}

impl SecretScrubber {
    /// Compile the redaction patterns.
    pub fn new() -> Self {
        Self {
            slack_webhook_pattern: Regex::new(r"(hooks\.slack\.com/services/)[A-Za-z0-9/_\-]+")
                .expect("slack pattern is valid"),
            discord_webhook_pattern: Regex::new(
                r"(discord(?:app)?\.com/api/webhooks/)[A-Za-z0-9/_\-]+",
            )
            .expect("discord pattern is valid"),
            github_token_pattern: Regex::new(
                r"\b(?:gh[pousr]_[A-Za-z0-9]{20,}|github_pat_[A-Za-z0-9_]{20,})",
            )
            .expect("token pattern is valid"),
            bearer_pattern: Regex::new(r"Bearer\s+[A-Za-z0-9\-_\.]+")
                .expect("bearer pattern is valid"),
        }
    }

    /// Scrub a message of sensitive data
    pub fn scrub_message(&self, message: &str) -> String {
        let scrubbed = self
            .slack_webhook_pattern
            .replace_all(message, "${1}[REDACTED]");
        let scrubbed = self
            .discord_webhook_pattern
            .replace_all(&scrubbed, "${1}[REDACTED]");
        let scrubbed = self
            .github_token_pattern
            .replace_all(&scrubbed, "[TOKEN_REDACTED]");
        self.bearer_pattern
            .replace_all(&scrubbed, "Bearer [TOKEN_REDACTED]")
            .into_owned()
    }
}

impl Default for SecretScrubber {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}
