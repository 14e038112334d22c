//! Adapters for external systems.
//!
//! - `github`: issue tracker access over the GitHub REST API
//! - `webhooks`: Slack and Discord incoming-webhook channels

pub mod github;
pub mod webhooks;

/// `User-Agent` sent with every outbound request.
pub const USER_AGENT: &str = concat!("issue-notifier/", env!("CARGO_PKG_VERSION"));

/// Build the shared HTTP client.
pub fn http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().user_agent(USER_AGENT).build()
}
