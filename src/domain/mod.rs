//! Domain layer for the issue notifier
//!
//! Models, errors and the port traits the services depend on.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{ChannelError, DomainError, DomainResult};
