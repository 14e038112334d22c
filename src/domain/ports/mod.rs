//! Port trait definitions (Hexagonal Architecture)
//!
//! - IssueFetcher / IssueLister: read access to the issue tracker
//! - Notifier: formats and delivers a notification for one issue
//! - NotifyChannel: a single webhook endpoint
//!
//! The event router receives these as explicit `Arc<dyn _>` dependencies.

pub mod issue_tracker;
pub mod notifier;

pub use issue_tracker::{IssueFetcher, IssueLister, ListIssuesQuery};
pub use notifier::{DeliveryReport, Notifier, NotifyChannel};
