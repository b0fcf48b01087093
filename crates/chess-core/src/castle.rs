//! Castling destinations are fixed by side and direction, so castle tokens
//! never go through the position decoder.

use crate::notation::{CastleSide, Piece};
use crate::record::MoveRecord;

/// King and rook records for a castle, in that order.
pub fn expand_castle(white: bool, side: CastleSide) -> [MoveRecord; 2] {
    let rank = if white { 0 } else { 7 };
    let (king_file, rook_file) = match side {
        CastleSide::Kingside => (6, 5),
        CastleSide::Queenside => (2, 3),
    };

    let base = MoveRecord {
        white,
        piece: Piece::King,
        file: king_file,
        rank,
        captured: false,
        check: false,
        mate: false,
    };

    [
        base,
        MoveRecord {
            piece: Piece::Rook,
            file: rook_file,
            ..base
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_kingside() {
        let [king, rook] = expand_castle(true, CastleSide::Kingside);
        assert_eq!((king.piece, king.position()), (Piece::King, (6, 0)));
        assert_eq!((rook.piece, rook.position()), (Piece::Rook, (5, 0)));
        for r in [king, rook] {
            assert!(r.white);
            assert!(!r.captured && !r.check && !r.mate);
        }
    }

    #[test]
    fn test_black_queenside() {
        let [king, rook] = expand_castle(false, CastleSide::Queenside);
        assert_eq!((king.piece, king.position()), (Piece::King, (2, 7)));
        assert_eq!((rook.piece, rook.position()), (Piece::Rook, (3, 7)));
        assert!(!king.white && !rook.white);
    }
}
