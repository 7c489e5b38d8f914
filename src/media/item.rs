//! Downloadable asset representation.

use std::fmt;

/// Kind of asset owned by a guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Emoji,
    Sticker,
}

impl AssetKind {
    /// Label used in logs and statistics.
    pub fn label(&self) -> &'static str {
        match self {
            AssetKind::Emoji => "emoji",
            AssetKind::Sticker => "sticker",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sticker encoding as reported by the `format_type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StickerFormat {
    Png,
    Apng,
    Lottie,
    Gif,
    Unknown(i64),
}

impl StickerFormat {
    /// Extension used in the content request URL.
    pub fn request_extension(&self) -> &'static str {
        match self {
            StickerFormat::Png | StickerFormat::Apng => "png",
            StickerFormat::Lottie => "json",
            StickerFormat::Gif => "gif",
            StickerFormat::Unknown(_) => "png",
        }
    }

    /// Extension of the file written to disk.
    ///
    /// Animated PNGs are served from the `.png` URL but kept as `.apng`.
    pub fn saved_extension(&self) -> &'static str {
        match self {
            StickerFormat::Apng => "apng",
            other => other.request_extension(),
        }
    }
}

impl From<i64> for StickerFormat {
    fn from(value: i64) -> Self {
        match value {
            1 => StickerFormat::Png,
            2 => StickerFormat::Apng,
            3 => StickerFormat::Lottie,
            4 => StickerFormat::Gif,
            n => StickerFormat::Unknown(n),
        }
    }
}

/// Validated custom emoji record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiMetadata {
    pub id: String,
    pub name: String,
    pub animated: bool,
}

impl EmojiMetadata {
    /// Extension for both the CDN request and the saved file.
    pub fn extension(&self) -> &'static str {
        if self.animated {
            "gif"
        } else {
            "png"
        }
    }
}

/// Validated sticker record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StickerMetadata {
    pub id: String,
    pub name: String,
    pub format: StickerFormat,
}

/// One queued unit of download work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkItem {
    Emoji(EmojiMetadata),
    Sticker(StickerMetadata),
}

impl WorkItem {
    pub fn kind(&self) -> AssetKind {
        match self {
            WorkItem::Emoji(_) => AssetKind::Emoji,
            WorkItem::Sticker(_) => AssetKind::Sticker,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            WorkItem::Emoji(e) => &e.id,
            WorkItem::Sticker(s) => &s.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            WorkItem::Emoji(e) => &e.name,
            WorkItem::Sticker(s) => &s.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sticker_extension_mapping() {
        let cases = [
            (1, "png", "png"),
            (2, "png", "apng"),
            (3, "json", "json"),
            (4, "gif", "gif"),
            (0, "png", "png"),
            (99, "png", "png"),
        ];
        for (format_type, requested, saved) in cases {
            let format = StickerFormat::from(format_type);
            assert_eq!(format.request_extension(), requested, "format {}", format_type);
            assert_eq!(format.saved_extension(), saved, "format {}", format_type);
        }
    }

    #[test]
    fn test_emoji_extension() {
        let mut emoji = EmojiMetadata {
            id: "9".into(),
            name: "Pepe".into(),
            animated: false,
        };
        assert_eq!(emoji.extension(), "png");
        emoji.animated = true;
        assert_eq!(emoji.extension(), "gif");
    }

    #[test]
    fn test_work_item_accessors() {
        let item = WorkItem::Sticker(StickerMetadata {
            id: "5".into(),
            name: "Wave!".into(),
            format: StickerFormat::Apng,
        });
        assert_eq!(item.kind(), AssetKind::Sticker);
        assert_eq!(item.id(), "5");
        assert_eq!(item.name(), "Wave!");
        assert_eq!(item.kind().to_string(), "sticker");
    }
}
