//! Harvest stages: leaders -> games -> clean -> process -> heatmap.
//!
//! Every stage reads its input from the [`Store`] and writes its output back,
//! so any stage can be rerun on its own.

use std::time::Duration;

use chess_core::{decode_games, DecodeReport, Heatmap, HeatmapFilter};
use tracing::{info, warn};

use crate::error::HarvestError;
use crate::retry::{with_retry, RetryPolicy};
use crate::source::{GameSource, TimeWindow};
use crate::store::{dedupe_games, Store};

pub const DEFAULT_PERF: &str = "classical";
pub const DEFAULT_LEADERS: usize = 200;
pub const DEFAULT_GAMES_PER_PLAYER: usize = 10_000;

#[derive(Clone, Debug)]
pub struct FetchOptions {
    pub window: TimeWindow,
    pub max_games: usize,
    pub retry: RetryPolicy,
    pub player_delay: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            window: TimeWindow::default(),
            max_games: DEFAULT_GAMES_PER_PLAYER,
            retry: RetryPolicy::default(),
            player_delay: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FetchSummary {
    pub players_ok: usize,
    pub players_failed: Vec<String>,
    pub games: usize,
}

pub async fn fetch_leaders<S: GameSource>(
    source: &S,
    store: &Store,
    perf: &str,
    count: usize,
    retry: &RetryPolicy,
) -> Result<Vec<String>, HarvestError> {
    let leaders = with_retry(retry, "leaderboard", move || source.leaderboard(perf, count)).await?;
    store.save_leaders(&leaders)?;
    info!(perf, players = leaders.len(), "Stored leaderboard");
    Ok(leaders)
}

/// Export games for every stored leader. A player that keeps failing is
/// skipped; the run continues with the next one.
pub async fn fetch_player_games<S: GameSource>(
    source: &S,
    store: &Store,
    options: &FetchOptions,
) -> Result<FetchSummary, HarvestError> {
    let usernames = store.load_leaders()?;
    store.reset_games()?;

    let mut summary = FetchSummary::default();
    let total = usernames.len();

    for (i, username) in usernames.iter().enumerate() {
        if i > 0 && !options.player_delay.is_zero() {
            tokio::time::sleep(options.player_delay).await;
        }

        let result = with_retry(&options.retry, username, move || {
            source.export_games(username, &options.window, options.max_games)
        })
        .await;

        match result {
            Ok(games) => {
                store.append_games(&games)?;
                summary.players_ok += 1;
                summary.games += games.len();
                info!(player = %username, n = i + 1, total, games = games.len(), "Fetched games");
            }
            Err(e) => {
                warn!(player = %username, error = %e, "Skipping player");
                summary.players_failed.push(username.clone());
            }
        }
    }

    info!(
        ok = summary.players_ok,
        failed = summary.players_failed.len(),
        games = summary.games,
        "Game export finished"
    );
    Ok(summary)
}

/// Drop duplicate games (the same game shows up under both players).
pub fn clean_games(store: &Store) -> Result<usize, HarvestError> {
    let raw = store.load_games()?;
    let before = raw.len();
    let clean = dedupe_games(raw);
    store.save_clean_games(&clean)?;

    info!(before, after = clean.len(), "Removed duplicate games");
    Ok(clean.len())
}

pub fn process_games(store: &Store) -> Result<DecodeReport, HarvestError> {
    let games = store.load_clean_games()?;
    let report = decode_games(&games);
    store.save_plays(&report.records)?;

    info!(
        games = report.games_seen,
        decoded = report.games_decoded(),
        empty = report.games_empty,
        failed = report.failures.len(),
        plays = report.records.len(),
        "Decoded moves"
    );
    Ok(report)
}

pub fn build_heatmap(store: &Store, filter: &HeatmapFilter) -> Result<Heatmap, HarvestError> {
    let plays = store.load_plays()?;
    Ok(Heatmap::from_records(&plays, filter))
}
