//! Incoming-webhook notification channels.

pub mod discord;
pub mod slack;

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Serialize;

use crate::domain::errors::ChannelError;
use crate::domain::models::NotifierConfig;
use crate::domain::ports::NotifyChannel;

pub use discord::DiscordChannel;
pub use slack::SlackChannel;

/// Build a channel for each configured webhook URL, Slack first.
pub fn channels_from_config(config: &NotifierConfig, client: &Client) -> Vec<Arc<dyn NotifyChannel>> {
    let mut channels: Vec<Arc<dyn NotifyChannel>> = Vec::new();

    if let Some(url) = &config.slack_webhook_url {
        channels.push(Arc::new(SlackChannel::with_client(url.clone(), client.clone())));
    }
    if let Some(url) = &config.discord_webhook_url {
        channels.push(Arc::new(DiscordChannel::with_client(url.clone(), client.clone())));
    }

    channels
}

/// POST `body` as JSON; any non-2xx answer is an error.
async fn post_json<T: Serialize + ?Sized>(
    client: &Client,
    url: &str,
    body: &T,
) -> Result<(), ChannelError> {
    let resp = client
        .post(url)
        .header(CONTENT_TYPE, "application/json")
        .json(body)
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ChannelError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(())
}
