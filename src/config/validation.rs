//! Configuration validation logic.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::config::loader::Config;
use crate::error::{Error, Result};

/// Upper bound on concurrent download workers.
pub const MAX_WORKERS: usize = 64;

/// Minimum plausible length of a Discord token.
const MIN_TOKEN_LENGTH: usize = 20;

static GUILD_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,20}$").expect("guild id pattern compiles"));

/// Validate everything except the token, which may still be prompted for.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_workers(config.download.workers)?;
    validate_timeouts(
        config.download.connect_timeout_secs,
        config.download.read_timeout_secs,
    )?;

    let endpoints = &config.endpoints;
    validate_base_url("endpoints.api_base", &endpoints.api_base)?;
    validate_base_url("endpoints.sticker_api_base", &endpoints.sticker_api_base)?;
    validate_base_url("endpoints.cdn_base", &endpoints.cdn_base)?;
    validate_base_url("endpoints.media_base", &endpoints.media_base)?;
    validate_base_url("endpoints.app_base", &endpoints.app_base)?;

    if config.account.user_agent.trim().is_empty() {
        return Err(Error::MissingConfig("account.user_agent".to_string()));
    }

    Ok(())
}

/// Validate the worker pool size.
pub fn validate_workers(workers: usize) -> Result<()> {
    if workers == 0 || workers > MAX_WORKERS {
        return Err(Error::ConfigValidation {
            field: "download.workers".to_string(),
            message: format!("Must be between 1 and {} (got {})", MAX_WORKERS, workers),
        });
    }
    Ok(())
}

fn validate_timeouts(connect: u64, read: u64) -> Result<()> {
    for (field, value) in [
        ("download.connect_timeout_secs", connect),
        ("download.read_timeout_secs", read),
    ] {
        if value == 0 {
            return Err(Error::ConfigValidation {
                field: field.to_string(),
                message: "Timeout must be at least one second".to_string(),
            });
        }
    }
    Ok(())
}

/// Validate a configured base URL.
pub fn validate_base_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).map_err(|e| Error::ConfigValidation {
        field: field.to_string(),
        message: format!("'{}' is not a valid URL: {}", value, e),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: format!("Unsupported scheme '{}'", url.scheme()),
        });
    }

    Ok(())
}

/// Validate the authorization token.
pub fn validate_token(token: &str) -> Result<()> {
    let token = token.trim();
    if token.is_empty() {
        return Err(Error::MissingConfig("token".to_string()));
    }

    if token.len() < MIN_TOKEN_LENGTH {
        return Err(Error::ConfigValidation {
            field: "token".to_string(),
            message: format!(
                "Token must be at least {} characters (got {})",
                MIN_TOKEN_LENGTH,
                token.len()
            ),
        });
    }

    if token.chars().any(char::is_whitespace) {
        return Err(Error::ConfigValidation {
            field: "token".to_string(),
            message: "Token must not contain whitespace".to_string(),
        });
    }

    let lower = token.to_lowercase();
    if lower.contains("replaceme") || lower.contains("your_token") {
        return Err(Error::ConfigValidation {
            field: "token".to_string(),
            message: "Token appears to be a placeholder. Please provide your actual Discord token."
                .to_string(),
        });
    }

    Ok(())
}

/// Normalize and validate a user-supplied guild id.
pub fn parse_guild_id(input: &str) -> Result<String> {
    let input = input.trim();
    if GUILD_ID_PATTERN.is_match(input) {
        return Ok(input.to_string());
    }

    Err(Error::ConfigValidation {
        field: "guild_id".to_string(),
        message: format!("Invalid guild ID: '{}'. Must be a numeric snowflake.", input),
    })
}
