//! Service layer
//!
//! - `decision`: filter and threshold predicates
//! - `formatter`: message templating
//! - `dispatcher`: delivery to webhook channels
//! - `event_router`: per-event state machine composing the above

pub mod decision;
pub mod dispatcher;
pub mod event_router;
pub mod formatter;

pub use decision::{should_notify_for_issue, should_notify_for_thresholds};
pub use dispatcher::NotificationDispatcher;
pub use event_router::EventRouter;
pub use formatter::{IssueAge, MessageFormatter};
