//! API response type definitions.
//!
//! These mirror the wire format loosely; every field the pipeline depends on
//! is optional here and checked in [`crate::media::parser`].

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Guild entry from `/users/@me/guilds`.
#[derive(Debug, Clone, Deserialize)]
pub struct Guild {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Guild {
    /// Guild reference for a user-supplied id.
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    /// Name for log lines, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// Emoji entry from `/guilds/{id}/emojis`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEmoji {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub animated: Option<bool>,
}

/// Sticker entry from `/guilds/{id}/stickers`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSticker {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub format_type: Option<i64>,
}

/// Ids are snowflakes; the API sends strings but numbers are accepted too.
fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) if n.is_u64() => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "expected a string or integer id, got {}",
            other
        ))),
    }
}

fn deserialize_optional_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) if n.is_u64() => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string or integer id, got {}",
            other
        ))),
    }
}
