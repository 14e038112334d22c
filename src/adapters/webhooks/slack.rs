//! Slack incoming-webhook channel.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::domain::errors::ChannelError;
use crate::domain::ports::NotifyChannel;

use super::post_json;

/// Slack webhook payload.
#[derive(Debug, Serialize)]
struct SlackPayload<'a> {
    text: &'a str,
    unfurl_links: bool,
}

/// Posts messages to a Slack incoming webhook.
pub struct SlackChannel {
    webhook_url: String,
    client: Client,
}

impl SlackChannel {
    /// Create a Slack channel with a specific webhook URL.
    pub fn new(webhook_url: String) -> Self {
        Self::with_client(webhook_url, Client::new())
    }

    /// Create a channel sharing an existing HTTP client.
    pub fn with_client(webhook_url: String, client: Client) -> Self {
        Self {
            webhook_url,
            client,
        }
    }

    fn payload(message: &str) -> SlackPayload<'_> {
        SlackPayload {
            text: message,
            unfurl_links: false,
        }
    }
}

#[async_trait]
impl NotifyChannel for SlackChannel {
    fn name(&self) -> &'static str {
        "slack"
    }

    async fn send(&self, message: &str) -> Result<(), ChannelError> {
        if self.webhook_url.is_empty() {
            return Err(ChannelError::NotConfigured("slack".to_string()));
        }
        post_json(&self.client, &self.webhook_url, &Self::payload(message)).await
    }
}
