use serde::{Deserialize, Serialize};

use crate::notation::Piece;

/// One decoded half-move, ready for a tabular sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub white: bool,
    pub piece: Piece,
    pub file: u8, // 0 = a
    pub rank: u8, // 0 = 1
    pub captured: bool,
    pub check: bool,
    pub mate: bool,
}

impl MoveRecord {
    pub fn position(&self) -> (u8, u8) {
        (self.file, self.rank)
    }
}
