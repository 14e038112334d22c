//! Notification dispatcher.
//!
//! Formats a message once and posts it to every configured channel in
//! order. A failing channel is logged and skipped; it never stops delivery
//! to the remaining channels and never surfaces as an error.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{error, info, warn};

use crate::domain::models::{Issue, NotificationReason};
use crate::domain::ports::{DeliveryReport, Notifier, NotifyChannel};
use crate::infrastructure::logging::SecretScrubber;

use super::formatter::MessageFormatter;

/// [`Notifier`] backed by a list of webhook channels.
pub struct NotificationDispatcher {
    formatter: MessageFormatter,
    channels: Vec<Arc<dyn NotifyChannel>>,
    scrubber: SecretScrubber,
}

impl NotificationDispatcher {
    /// Create a dispatcher over `channels`, delivered in list order.
    pub fn new(formatter: MessageFormatter, channels: Vec<Arc<dyn NotifyChannel>>) -> Self {
        if channels.is_empty() {
            warn!("No notification channels configured");
        } else {
            info!(
                channel_count = channels.len(),
                channels = ?channels.iter().map(|c| c.name()).collect::<Vec<_>>(),
                "Notification channels initialized"
            );
        }
        Self {
            formatter,
            channels,
            scrubber: SecretScrubber::new(),
        }
    }

    /// Number of configured channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Post `message` to each channel sequentially.
    pub async fn deliver(&self, message: &str) -> DeliveryReport {
        let mut report = DeliveryReport::default();

        for channel in &self.channels {
            match channel.send(message).await {
                Ok(()) => {
                    info!(channel = channel.name(), "Notification sent successfully");
                    report.delivered += 1;
                }
                Err(e) => {
                    error!(
                        channel = channel.name(),
                        error = %self.scrubber.scrub_message(&e.to_string()),
                        "Failed to send notification"
                    );
                    report.failed += 1;
                }
            }
        }

        report
    }
}

#[async_trait]
impl Notifier for NotificationDispatcher {
    async fn send_notification(&self, issue: &Issue, reason: NotificationReason) -> DeliveryReport {
        let message = self.formatter.format(issue, reason, Utc::now());

        info!(
            issue = issue.number,
            reason = %reason,
            "Sending notification"
        );

        self.deliver(&message).await
    }
}
