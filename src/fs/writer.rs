//! Persisting fetched asset bytes.

use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::fs::naming::asset_filename;
use crate::fs::paths::ensure_dir;

/// Final path of an asset inside `directory`.
pub fn target_path(directory: &Path, name: &str, id: &str, extension: &str) -> PathBuf {
    directory.join(asset_filename(name, id, extension))
}

/// Write `bytes` to `directory/{name}_{id}.{extension}` (sanitized).
///
/// The directory is created if missing and an existing file is replaced.
/// Bytes land in a hidden `.part` sibling first and are renamed into place,
/// so a crash never leaves a truncated asset under its final name.
pub async fn save_asset(
    directory: &Path,
    name: &str,
    id: &str,
    extension: &str,
    bytes: &[u8],
) -> Result<PathBuf> {
    ensure_dir(directory).await?;

    let filename = asset_filename(name, id, extension);
    let output_path = directory.join(&filename);
    let partial_path = directory.join(format!(".{}.part", filename));

    let mut file = File::create(&partial_path).await?;
    if let Err(e) = write_all(&mut file, bytes).await {
        drop(file);
        let _ = tokio::fs::remove_file(&partial_path).await;
        return Err(e);
    }
    drop(file);

    if let Err(e) = tokio::fs::rename(&partial_path, &output_path).await {
        let _ = tokio::fs::remove_file(&partial_path).await;
        return Err(e.into());
    }

    Ok(output_path)
}

async fn write_all(file: &mut File, bytes: &[u8]) -> Result<()> {
    file.write_all(bytes).await?;
    file.flush().await?;
    Ok(())
}
