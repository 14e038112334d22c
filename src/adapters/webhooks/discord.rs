//! Discord webhook channel.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::domain::errors::ChannelError;
use crate::domain::ports::NotifyChannel;

use super::post_json;

#[derive(Debug, Serialize)]
struct DiscordPayload<'a> {
    content: &'a str,
}

/// Posts messages to a Discord webhook.
pub struct DiscordChannel {
    webhook_url: String,
    client: Client,
}

impl DiscordChannel {
    /// Create a Discord channel with a specific webhook URL.
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
}

#[async_trait]
impl NotifyChannel for DiscordChannel {
    fn name(&self) -> &'static str {
        "discord"
    }

    async fn send(&self, message: &str) -> Result<(), ChannelError> {
        if self.webhook_url.is_empty() {
            return Err(ChannelError::NotConfigured("discord".to_string()));
        }
        let payload = DiscordPayload { content: message };
        post_json(&self.client, &self.webhook_url, &payload).await
    }
}
