//! Configuration management infrastructure
//!
//! Layered input loading using figment:
//! - Optional YAML inputs file
//! - `INPUT_*` environment variables (GitHub Actions convention)
//! - Conversion into the immutable [`NotifierConfig`](crate::domain::models::NotifierConfig)

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};
