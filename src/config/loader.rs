//! Configuration structures and loading logic.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub account: AccountConfig,

    #[serde(default)]
    pub download: DownloadConfig,

    #[serde(default)]
    pub endpoints: EndpointsConfig,
}

/// Account credentials configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Discord user token. Prompted for when absent everywhere else.
    #[serde(default)]
    pub token: Option<String>,

    /// User agent of the desktop client the requests imitate.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Download pipeline options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Directory emoji images are written to.
    #[serde(default = "default_emotes_directory")]
    pub emotes_directory: PathBuf,

    /// Directory stickers are written to.
    #[serde(default = "default_stickers_directory")]
    pub stickers_directory: PathBuf,

    /// Number of concurrent download workers.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Pause after each guild's metadata listing, in milliseconds.
    #[serde(default = "default_guild_delay")]
    pub guild_delay_ms: u64,

    /// Extra attempts for transient asset fetch failures.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,

    /// Replace files that already exist instead of skipping them.
    #[serde(default = "default_true")]
    pub overwrite_existing: bool,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            emotes_directory: default_emotes_directory(),
            stickers_directory: default_stickers_directory(),
            workers: default_workers(),
            guild_delay_ms: default_guild_delay(),
            max_retries: default_max_retries(),
            connect_timeout_secs: default_connect_timeout(),
            read_timeout_secs: default_read_timeout(),
            overwrite_existing: true,
        }
    }
}

impl DownloadConfig {
    pub fn guild_delay(&self) -> Duration {
        Duration::from_millis(self.guild_delay_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

/// Base URLs of the hosts the downloader talks to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    /// REST API used for guild and emoji listings.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// REST API version serving sticker listings.
    #[serde(default = "default_sticker_api_base")]
    pub sticker_api_base: String,

    /// CDN serving emoji images.
    #[serde(default = "default_cdn_base")]
    pub cdn_base: String,

    /// Media proxy serving PNG, APNG and GIF stickers.
    #[serde(default = "default_media_base")]
    pub media_base: String,

    /// Application host serving LOTTIE sticker JSON.
    #[serde(default = "default_app_base")]
    pub app_base: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            sticker_api_base: default_sticker_api_base(),
            cdn_base: default_cdn_base(),
            media_base: default_media_base(),
            app_base: default_app_base(),
        }
    }
}

impl EndpointsConfig {
    /// Point every host at one base URL. Used against local mock servers.
    pub fn single_host(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Self {
            api_base: format!("{}/api/v8", base),
            sticker_api_base: format!("{}/api/v9", base),
            cdn_base: base.clone(),
            media_base: base.clone(),
            app_base: base,
        }
    }
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) discord/1.0.9173 Chrome/128.0.6613.186 Electron/32.2.2 Safari/537.36".to_string()
}

fn default_emotes_directory() -> PathBuf {
    PathBuf::from("./emotes")
}

fn default_stickers_directory() -> PathBuf {
    PathBuf::from("./stickers")
}

fn default_workers() -> usize {
    16
}

fn default_guild_delay() -> u64 {
    1000
}

fn default_max_retries() -> u32 {
    2
}

fn default_connect_timeout() -> u64 {
    9
}

fn default_read_timeout() -> u64 {
    17
}

fn default_true() -> bool {
    true
}

fn default_api_base() -> String {
    "https://discordapp.com/api/v8".to_string()
}

fn default_sticker_api_base() -> String {
    "https://discord.com/api/v9".to_string()
}

fn default_cdn_base() -> String {
    "https://cdn.discordapp.com".to_string()
}

fn default_media_base() -> String {
    "https://media.discordapp.net".to_string()
}

fn default_app_base() -> String {
    "https://discord.com".to_string()
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            token: None,
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}
