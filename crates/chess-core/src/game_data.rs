use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One played game as exported by the archive API.
///
/// Only `moves` is consumed by the decoder. Fields we don't model are kept in
/// `extra` so stored games round-trip unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub moves: String, // space-separated SAN tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GameRecord {
    pub fn new(id: &str, moves: &str) -> Self {
        Self {
            id: id.to_string(),
            moves: moves.to_string(),
            ..Default::default()
        }
    }

    /// Move tokens in chronological order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.moves.split_whitespace()
    }

    pub fn has_moves(&self) -> bool {
        self.tokens().next().is_some()
    }
}
