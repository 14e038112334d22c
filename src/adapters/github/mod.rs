//! GitHub Issues adapter.
//!
//! Implements the issue tracker ports against the GitHub REST API v3.

pub mod client;

pub use client::{GitHubClient, DEFAULT_API_URL};
