//! Infrastructure layer module
//!
//! - Configuration loading (figment)
//! - Logging (tracing-subscriber, tracing-appender)

pub mod config;
pub mod logging;
