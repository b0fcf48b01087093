//! Move-notation decoding for heat-map analysis.
//!
//! Takes finished games as plain SAN move strings and reconstructs the
//! destination square and attributes of every half-move, without replaying
//! the game on a board.

pub mod castle;
pub mod decoder;
pub mod error;
pub mod game_data;
pub mod heatmap;
pub mod notation;
pub mod record;

pub use decoder::{decode_games, decode_moves, decode_tokens, DecodeReport, GameFailure};
pub use error::DecodeError;
pub use game_data::GameRecord;
pub use heatmap::{Heatmap, HeatmapFilter};
pub use notation::{CastleSide, Piece, TokenFlags};
pub use record::MoveRecord;
