use chess_core::GameRecord;
use harvester::store::Store;
use std::time::{SystemTime, UNIX_EPOCH};

/// Generate a unique suffix based on timestamp to avoid collisions.
pub fn unique_suffix() -> String {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}", ts % 1_000_000_000)
}

/// A fresh store under the system temp dir.
pub fn temp_store(tag: &str) -> Store {
    let dir = std::env::temp_dir().join(format!("heatmap-{tag}-{}", unique_suffix()));
    Store::open(dir).expect("failed to create temp store")
}

/// Scholar's mate, white wins in 7 plies.
pub const SCHOLARS_MATE: &str = "e4 e5 Qh5 Nc6 Bc4 Nf6 Qxf7#";

/// Both sides castle, plus a promotion with check.
pub const CASTLES_AND_PROMOTION: &str = "e4 e5 Nf3 Nc6 Bc4 Bc5 O-O Nf6 d3 O-O-O a8=Q+";

pub fn game(id: &str, moves: &str) -> GameRecord {
    GameRecord::new(id, moves)
}
