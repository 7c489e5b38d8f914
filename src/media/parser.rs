//! Validation of raw API records into work items.

use crate::api::types::{RawEmoji, RawSticker};
use crate::error::{Error, Result};
use crate::media::item::{EmojiMetadata, StickerFormat, StickerMetadata, WorkItem};

/// Validate a guild's emoji listing.
///
/// A record without a usable id or name rejects the whole listing.
pub fn parse_emojis(guild_id: &str, raw: Vec<RawEmoji>) -> Result<Vec<WorkItem>> {
    raw.into_iter()
        .enumerate()
        .map(|(index, emoji)| {
            let id = required(guild_id, "emoji", index, "id", emoji.id)?;
            let name = required(guild_id, "emoji", index, "name", emoji.name)?;
            Ok(WorkItem::Emoji(EmojiMetadata {
                id,
                name,
                animated: emoji.animated.unwrap_or(false),
            }))
        })
        .collect()
}

/// Validate a guild's sticker listing.
pub fn parse_stickers(guild_id: &str, raw: Vec<RawSticker>) -> Result<Vec<WorkItem>> {
    raw.into_iter()
        .enumerate()
        .map(|(index, sticker)| {
            let id = required(guild_id, "sticker", index, "id", sticker.id)?;
            let name = required(guild_id, "sticker", index, "name", sticker.name)?;
            let format = sticker
                .format_type
                .map(StickerFormat::from)
                .unwrap_or(StickerFormat::Png);
            Ok(WorkItem::Sticker(StickerMetadata { id, name, format }))
        })
        .collect()
}

fn required(
    guild_id: &str,
    kind: &str,
    index: usize,
    field: &str,
    value: Option<String>,
) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::Metadata {
            guild_id: guild_id.to_string(),
            message: format!("{} #{} is missing '{}'", kind, index, field),
        }),
    }
}
