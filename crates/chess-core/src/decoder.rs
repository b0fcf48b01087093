//! Turns move strings into [`MoveRecord`]s, one game at a time.
//!
//! Side to move is the token index parity (even = white). A castle consumes
//! one index but produces two records.

use crate::castle::expand_castle;
use crate::error::DecodeError;
use crate::game_data::GameRecord;
use crate::notation::{classify, decode_position, move_to_piece};
use crate::record::MoveRecord;

/// A game that could not be decoded. Its records are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct GameFailure {
    pub game_id: String,
    pub game_index: usize,
    pub error: DecodeError,
}

/// Everything produced by one pass over a collection of games.
#[derive(Debug, Clone, Default)]
pub struct DecodeReport {
    pub records: Vec<MoveRecord>,
    pub failures: Vec<GameFailure>,
    pub games_seen: usize,
    pub games_empty: usize,
}

impl DecodeReport {
    pub fn games_decoded(&self) -> usize {
        self.games_seen - self.games_empty - self.failures.len()
    }
}

/// Decode an ordered token list from a single game.
pub fn decode_tokens<'a, I>(tokens: I) -> Result<Vec<MoveRecord>, DecodeError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut records = Vec::new();

    for (j, token) in tokens.into_iter().enumerate() {
        let white = j % 2 == 0;
        let flags = classify(token);

        if let Some(side) = flags.castle() {
            records.extend(expand_castle(white, side));
            continue;
        }

        let (file, rank) = decode_position(token, &flags).map_err(|e| e.at_token(token, j))?;

        records.push(MoveRecord {
            white,
            piece: move_to_piece(token),
            file,
            rank,
            captured: flags.captured,
            check: flags.check,
            mate: flags.mate,
        });
    }

    Ok(records)
}

/// Decode a whitespace-separated move string. Empty input yields no records.
pub fn decode_moves(moves: &str) -> Result<Vec<MoveRecord>, DecodeError> {
    decode_tokens(moves.split_whitespace())
}

/// Decode every game in order, isolating failures per game.
pub fn decode_games<'a, I>(games: I) -> DecodeReport
where
    I: IntoIterator<Item = &'a GameRecord>,
{
    let mut report = DecodeReport::default();

    for (i, game) in games.into_iter().enumerate() {
        report.games_seen += 1;

        if !game.has_moves() {
            report.games_empty += 1;
            continue;
        }

        match decode_tokens(game.tokens()) {
            Ok(records) => report.records.extend(records),
            Err(error) => {
                if let Some((token, index)) = error.token() {
                    tracing::warn!(
                        game_id = %game.id,
                        game_index = i,
                        token,
                        index,
                        "Skipping game with undecodable move"
                    );
                }
                report.failures.push(GameFailure {
                    game_id: game.id.clone(),
                    game_index: i,
                    error,
                });
            }
        }
    }

    report
}
