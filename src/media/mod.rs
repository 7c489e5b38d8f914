//! Media module for asset representation and parsing.

pub mod item;
pub mod parser;

pub use item::{AssetKind, EmojiMetadata, StickerFormat, StickerMetadata, WorkItem};
pub use parser::{parse_emojis, parse_stickers};
