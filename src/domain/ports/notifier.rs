//! Notification ports.

use async_trait::async_trait;

use crate::domain::errors::ChannelError;
use crate::domain::models::{Issue, NotificationReason};

/// Outcome of delivering one notification to every configured endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Endpoints that accepted the message.
    pub delivered: usize,
    /// Endpoints that failed.
    pub failed: usize,
}

impl DeliveryReport {
    /// Endpoints tried.
    pub const fn attempted(&self) -> usize {
        self.delivered + self.failed
    }
}

/// Formats and delivers a notification about an issue.
///
/// Implementations never fail: per-endpoint errors are logged and counted.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Format and deliver a notification about `issue`.
    async fn send_notification(&self, issue: &Issue, reason: NotificationReason)
        -> DeliveryReport;
}

/// A single webhook endpoint (Slack, Discord, ...).
#[async_trait]
pub trait NotifyChannel: Send + Sync {
    /// Get the name of this channel.
    fn name(&self) -> &'static str;

    /// Post an already formatted message.
    async fn send(&self, message: &str) -> Result<(), ChannelError>;
}
