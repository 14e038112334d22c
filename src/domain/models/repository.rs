//! Owning repository of the issues being watched.

use std::fmt;
use std::str::FromStr;

/// Default web host used to build repository links.
pub const DEFAULT_SERVER_URL: &str = "https://github.com";

/// Identifies the repository an event belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// Owning user or organization.
    pub owner: String,
    /// Repository name.
    pub name: String,
    /// Web host, `https://github.com` unless running against GitHub Enterprise.
    pub server_url: String,
}

impl RepoRef {
    /// Repository on `github.com`.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            server_url: DEFAULT_SERVER_URL.to_string(),
        }
    }

    /// Use a different web host (trailing slashes are dropped).
    #[must_use]
    pub fn with_server_url(mut self, server_url: &str) -> Self {
        self.server_url = server_url.trim_end_matches('/').to_string();
        self
    }

    /// `owner/name`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Web URL of the repository.
    pub fn url(&self) -> String {
        format!("{}/{}", self.server_url, self.full_name())
    }

    /// Markdown link `[owner/name](url)`.
    pub fn markdown_link(&self) -> String {
        format!("[{}]({})", self.full_name(), self.url())
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoRef {
    type Err = String;

    /// Parse the `owner/name` form used by `GITHUB_REPOSITORY`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self::new(owner, name))
            }
            _ => Err(format!("expected 'owner/repo', got '{s}'")),
        }
    }
}
