//! Suffix/prefix heuristics for abbreviated algebraic move tokens.
//!
//! Nothing here tracks board state. A token is classified purely by its
//! text, the moving piece comes from its first character and the destination
//! square is cut out of the tail by a small ordered rule table.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DecodeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Piece {
    #[serde(rename = "P")]
    Pawn,
    #[serde(rename = "N")]
    Knight,
    #[serde(rename = "B")]
    Bishop,
    #[serde(rename = "R")]
    Rook,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
}

impl Piece {
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    /// Piece for a SAN piece letter. `P` is accepted so that filters can name pawns.
    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'P' => Some(Piece::Pawn),
            'N' => Some(Piece::Knight),
            'B' => Some(Piece::Bishop),
            'R' => Some(Piece::Rook),
            'Q' => Some(Piece::Queen),
            'K' => Some(Piece::King),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Piece::Pawn => 'P',
            Piece::Knight => 'N',
            Piece::Bishop => 'B',
            Piece::Rook => 'R',
            Piece::Queen => 'Q',
            Piece::King => 'K',
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

/// Attributes read off a single token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenFlags {
    pub check: bool,
    pub mate: bool,
    pub captured: bool,
    /// Queen promotion only (`=Q`).
    pub promoted: bool,
    /// Any promotion marker, including under-promotion.
    pub promotion: Option<Piece>,
    pub queenside_castle: bool,
    pub kingside_castle: bool,
}

impl TokenFlags {
    pub fn castle(&self) -> Option<CastleSide> {
        if self.queenside_castle {
            Some(CastleSide::Queenside)
        } else if self.kingside_castle {
            Some(CastleSide::Kingside)
        } else {
            None
        }
    }
}

pub fn classify(token: &str) -> TokenFlags {
    // "O-O-O" contains "O-O", so queenside must be decided first.
    let queenside_castle = token.contains("O-O-O");
    let kingside_castle = !queenside_castle && token.contains("O-O");

    TokenFlags {
        check: token.ends_with('+'),
        mate: token.ends_with('#'),
        captured: token.contains('x'),
        promoted: token.contains("=Q"),
        promotion: promotion_piece(token),
        queenside_castle,
        kingside_castle,
    }
}

fn promotion_piece(token: &str) -> Option<Piece> {
    let (_, after) = token.split_once('=')?;
    match after.chars().next()? {
        c @ ('Q' | 'R' | 'B' | 'N') => Piece::from_letter(c),
        _ => None,
    }
}

pub fn move_to_piece(token: &str) -> Piece {
    match token.chars().next() {
        Some(c @ ('Q' | 'K' | 'B' | 'N' | 'R')) => Piece::from_letter(c).unwrap_or(Piece::Pawn),
        _ => Piece::Pawn,
    }
}

struct TrimRule {
    promotion: bool,
    suffix: bool,
    /// Characters dropped from the end before taking the square.
    skip: usize,
}

// Most specific first.
const TRIM_RULES: [TrimRule; 4] = [
    TrimRule { promotion: true, suffix: true, skip: 3 },   // e8=Q#
    TrimRule { promotion: true, suffix: false, skip: 2 },  // e8=Q
    TrimRule { promotion: false, suffix: true, skip: 1 },  // Qh5+
    TrimRule { promotion: false, suffix: false, skip: 0 }, // Nf3
];

/// Two-character destination text of a non-castle token.
///
/// Leading disambiguation (`Nbd2`, `Rdxd5`) needs no handling since the
/// square is always cut from the tail.
pub fn destination<'a>(token: &'a str, flags: &TokenFlags) -> Result<&'a str, DecodeError> {
    let promotion = flags.promoted || flags.promotion.is_some();
    let suffix = flags.check || flags.mate;

    let skip = TRIM_RULES
        .iter()
        .find(|r| (!r.promotion || promotion) && (!r.suffix || suffix))
        .map(|r| r.skip)
        .unwrap_or(0);

    let end = token.len().checked_sub(skip);
    let start = end.and_then(|e| e.checked_sub(2));
    match (start, end) {
        (Some(s), Some(e)) => token.get(s..e).ok_or_else(|| malformed(token)),
        _ => Err(malformed(token)),
    }
}

fn malformed(text: &str) -> DecodeError {
    DecodeError::MalformedSquare {
        square: text.to_string(),
    }
}

/// `"a1"` -> `(0, 0)`, `"h8"` -> `(7, 7)`.
pub fn square_to_coord(square: &str) -> Result<(u8, u8), DecodeError> {
    match square.as_bytes() {
        [f @ b'a'..=b'h', r @ b'1'..=b'8'] => Ok((f - b'a', r - b'1')),
        _ => Err(malformed(square)),
    }
}

pub fn decode_position(token: &str, flags: &TokenFlags) -> Result<(u8, u8), DecodeError> {
    square_to_coord(destination(token, flags)?)
}
