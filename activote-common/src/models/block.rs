use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::lenient;

/// Block timestamps arrive as epoch milliseconds (integer or fractional) or
/// as a date string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockTimestamp {
    Millis(i64),
    FractionalMillis(f64),
    Text(String),
}

/// A ledger entry as returned by `GET /blockchain`.
///
/// Records are opaque: the client displays them as given and never recomputes
/// a hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(deserialize_with = "lenient::id")]
    pub id: u64,
    pub hash: String,
    #[serde(default)]
    pub previous_hash: String,
    #[serde(default)]
    pub timestamp: Option<BlockTimestamp>,
    /// Payload as sent: a string, a number or a JSON object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Value>,
}

impl Block {
    /// True when this block names `parent` as its predecessor.
    /// String comparison only.
    pub fn links_to(&self, parent: &Block) -> bool {
        !self.previous_hash.is_empty() && self.previous_hash == parent.hash
    }

    /// Shortened hash for compact rendering: first 8 and last 4 characters.
    pub fn short_hash(&self) -> String {
        abbreviate(&self.hash)
    }
}

/// Text form of an opaque block field: strings verbatim, scalars as written,
/// arrays and objects as pretty-printed JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(_) | Value::Object(_) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        other => other.to_string(),
    }
}

pub fn abbreviate(hash: &str) -> String {
    let chars: Vec<char> = hash.chars().collect();
    if chars.len() <= 14 {
        return hash.to_string();
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
