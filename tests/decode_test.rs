/// End-to-end checks of the move decoder over whole games.
///
/// Covers side-to-move parity, castle expansion, flag propagation and the
/// record count rule: one record per move, two per castle.

mod common;

use chess_core::notation::{classify, move_to_piece};
use chess_core::{decode_games, decode_moves, Piece};
use common::{game, CASTLES_AND_PROMOTION, SCHOLARS_MATE};

#[test]
fn test_scholars_mate_records() {
    let records = decode_moves(SCHOLARS_MATE).unwrap();
    assert_eq!(records.len(), 7);

    let squares: Vec<(u8, u8)> = records.iter().map(|r| r.position()).collect();
    assert_eq!(
        squares,
        vec![(4, 3), (4, 4), (7, 4), (2, 5), (2, 3), (5, 5), (5, 6)]
    );

    let pieces: Vec<Piece> = records.iter().map(|r| r.piece).collect();
    assert_eq!(
        pieces,
        vec![
            Piece::Pawn,
            Piece::Pawn,
            Piece::Queen,
            Piece::Knight,
            Piece::Bishop,
            Piece::Knight,
            Piece::Queen
        ]
    );

    let mate = records[6];
    assert!(mate.white && mate.captured && mate.mate && !mate.check);
}

#[test]
fn test_castles_and_promotion() {
    let records = decode_moves(CASTLES_AND_PROMOTION).unwrap();
    // 11 tokens, two of them castles
    assert_eq!(records.len(), 13);

    // White O-O at index 6
    assert_eq!((records[6].piece, records[6].position()), (Piece::King, (6, 0)));
    assert_eq!((records[7].piece, records[7].position()), (Piece::Rook, (5, 0)));
    assert!(records[6].white && records[7].white);

    // Black O-O-O at index 9
    assert_eq!((records[10].piece, records[10].position()), (Piece::King, (2, 7)));
    assert_eq!((records[11].piece, records[11].position()), (Piece::Rook, (3, 7)));
    assert!(!records[10].white && !records[11].white);

    // Promotion at index 10 is white again
    let promo = records[12];
    assert!(promo.white && promo.check);
    assert_eq!((promo.piece, promo.position()), (Piece::Pawn, (0, 7)));
}

#[test]
fn test_castle_records_never_carry_flags() {
    let records = decode_moves("O-O+ O-O-O#").unwrap();
    assert_eq!(records.len(), 4);
    for r in &records {
        assert!(!r.captured && !r.check && !r.mate);
    }
}

#[test]
fn test_record_count_rule_over_games() {
    let games = vec![
        game("a", SCHOLARS_MATE),
        game("b", ""),
        game("c", CASTLES_AND_PROMOTION),
        game("d", "d4 d5 c4 dxc4 e3 b5 a4 c6 axb5 cxb5 Qf3"),
    ];

    let expected: usize = games
        .iter()
        .flat_map(|g| g.tokens())
        .map(|t| if classify(t).castle().is_some() { 2 } else { 1 })
        .sum();

    let report = decode_games(&games);
    assert!(report.failures.is_empty());
    assert_eq!(report.games_empty, 1);
    assert_eq!(report.records.len(), expected);
}

#[test]
fn test_parity_restarts_each_game() {
    // Both games start with white even though the first has an odd length.
    let games = vec![game("a", "e4 e5 Nf3"), game("b", "d4")];
    let report = decode_games(&games);
    assert_eq!(report.records.len(), 4);
    assert!(report.records[3].white);
}

#[test]
fn test_piece_resolver_examples() {
    assert_eq!(move_to_piece("Nf3"), Piece::Knight);
    assert_eq!(move_to_piece("e4"), Piece::Pawn);
    assert_eq!(move_to_piece("Nxe5"), Piece::Knight);
}

#[test]
fn test_malformed_game_is_reported_not_fatal() {
    let games = vec![
        game("ok", "e4 e5"),
        game("broken", "e4 e5 Nf3 0-0"),
        game("ok2", "c4"),
    ];
    let report = decode_games(&games);

    assert_eq!(report.records.len(), 3);
    assert_eq!(report.failures.len(), 1);

    let failure = &report.failures[0];
    assert_eq!(failure.game_id, "broken");
    assert_eq!(failure.error.token(), Some(("0-0", 3)));
}
