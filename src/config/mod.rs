//! Configuration module for the emote-downloader.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Resolving the account token
//! - Configuration validation

pub mod loader;
pub mod token;
pub mod validation;

pub use loader::{AccountConfig, Config, DownloadConfig, EndpointsConfig};
pub use token::resolve_token;
pub use validation::{parse_guild_id, validate_config, validate_token};
