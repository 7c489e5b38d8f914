//! Output directory management.

use std::path::{Path, PathBuf};

use crate::config::DownloadConfig;
use crate::error::Result;
use crate::media::AssetKind;

/// Output directories, one per asset kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDirs {
    pub emotes: PathBuf,
    pub stickers: PathBuf,
}

impl OutputDirs {
    pub fn new(emotes: impl Into<PathBuf>, stickers: impl Into<PathBuf>) -> Self {
        Self {
            emotes: emotes.into(),
            stickers: stickers.into(),
        }
    }

    /// Directory an asset of `kind` is written to.
    pub fn for_kind(&self, kind: AssetKind) -> &Path {
        match kind {
            AssetKind::Emoji => &self.emotes,
            AssetKind::Sticker => &self.stickers,
        }
    }
}

impl From<&DownloadConfig> for OutputDirs {
    fn from(config: &DownloadConfig) -> Self {
        Self::new(
            config.emotes_directory.clone(),
            config.stickers_directory.clone(),
        )
    }
}

/// Ensure a directory exists, creating it if necessary.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path).await?;
    Ok(())
}
