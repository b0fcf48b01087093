//! The seam between the pipeline and whatever serves game archives.

use std::future::Future;

use chess_core::GameRecord;
use chrono::{DateTime, TimeZone, Utc};

use crate::error::HarvestError;

/// The leaderboard endpoint never returns more than this many players.
pub const MAX_LEADERBOARD: usize = 200;

/// Inclusive range of game start times to export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeWindow {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl TimeWindow {
    pub fn since_millis(&self) -> i64 {
        self.since.timestamp_millis()
    }

    pub fn until_millis(&self) -> i64 {
        self.until.timestamp_millis()
    }
}

impl Default for TimeWindow {
    /// Wide enough to cover every game on record.
    fn default() -> Self {
        Self {
            since: Utc.with_ymd_and_hms(1900, 12, 8, 0, 0, 0).unwrap(),
            until: Utc.with_ymd_and_hms(2050, 12, 9, 0, 0, 0).unwrap(),
        }
    }
}

/// A game-archive service keyed by player and time window.
pub trait GameSource {
    /// Usernames of the top `count` players for a rating category, best first.
    fn leaderboard(
        &self,
        perf: &str,
        count: usize,
    ) -> impl Future<Output = Result<Vec<String>, HarvestError>> + Send;

    /// Up to `max` games played by `username` inside `window`.
    fn export_games(
        &self,
        username: &str,
        window: &TimeWindow,
        max: usize,
    ) -> impl Future<Output = Result<Vec<GameRecord>, HarvestError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window_in_millis() {
        let window = TimeWindow::default();
        assert!(window.since_millis() < 0);
        assert_eq!(window.until_millis(), 2_554_156_800_000);
    }
}
