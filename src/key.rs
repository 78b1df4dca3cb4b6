// Key derivation for string items
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GroupError;

/// Property of a string used as its grouping key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyKind {
    /// Number of characters
    #[default]
    Length,
    /// UTF-8 byte length
    Bytes,
    /// First character, lowercased
    Initial,
    /// Last character, lowercased
    Final,
    /// Number of ASCII vowels
    Vowels,
}

impl KeyKind {
    pub const ALL: [KeyKind; 5] = [
        KeyKind::Length,
        KeyKind::Bytes,
        KeyKind::Initial,
        KeyKind::Final,
        KeyKind::Vowels,
    ];

    pub fn name(&self) -> &str {
        match self {
            KeyKind::Length => "length",
            KeyKind::Bytes => "bytes",
            KeyKind::Initial => "initial",
            KeyKind::Final => "final",
            KeyKind::Vowels => "vowels",
        }
    }

    pub fn description(&self) -> &str {
        match self {
            KeyKind::Length => "number of characters",
            KeyKind::Bytes => "UTF-8 byte length",
            KeyKind::Initial => "first character, lowercased",
            KeyKind::Final => "last character, lowercased",
            KeyKind::Vowels => "number of vowels (a, e, i, o, u)",
        }
    }

    pub fn derive(&self, item: &str) -> KeyValue {
        match self {
            KeyKind::Length => KeyValue::Number(item.chars().count()),
            KeyKind::Bytes => KeyValue::Number(item.len()),
            KeyKind::Initial => KeyValue::Text(lowercase_char(item.chars().next())),
            KeyKind::Final => KeyValue::Text(lowercase_char(item.chars().next_back())),
            KeyKind::Vowels => KeyValue::Number(
                item.chars()
                    .filter(|c| matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'))
                    .count(),
            ),
        }
    }
}

fn lowercase_char(c: Option<char>) -> String {
    c.map(|c| c.to_lowercase().collect()).unwrap_or_default()
}

impl FromStr for KeyKind {
    type Err = GroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "len" | "length" => Ok(KeyKind::Length),
            "bytes" | "byte-len" => Ok(KeyKind::Bytes),
            "initial" | "first" => Ok(KeyKind::Initial),
            "final" | "last" => Ok(KeyKind::Final),
            "vowels" => Ok(KeyKind::Vowels),
            _ => Err(GroupError::UnknownKey(s.to_string())),
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A derived key. Numbers sort before text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum KeyValue {
    Number(usize),
    Text(String),
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyValue::Number(n) => write!(f, "{}", n),
            KeyValue::Text(s) => f.write_str(s),
        }
    }
}
