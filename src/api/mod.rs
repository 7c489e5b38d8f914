//! Discord API module.
//!
//! This module provides:
//! - HTTP client for the Discord REST API and content hosts
//! - Request headers and authentication
//! - API response types

pub mod auth;
pub mod client;
pub mod types;

pub use client::{ApiTransport, DiscordApi};
pub use types::*;
