use chess_core::GameRecord;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;

use crate::config::HarvestConfig;
use crate::error::HarvestError;
use crate::source::{GameSource, TimeWindow, MAX_LEADERBOARD};

pub struct LichessClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Leaderboard {
    users: Vec<LeaderboardUser>,
}

#[derive(Debug, Deserialize)]
struct LeaderboardUser {
    username: String,
}

impl LichessClient {
    pub fn new(config: &HarvestConfig) -> Result<Self, HarvestError> {
        let client = Client::builder()
            .user_agent("move-heatmap-harvester/0.1")
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            token: config.api_token.clone(),
        })
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let req = self.client.get(format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }
}

impl GameSource for LichessClient {
    async fn leaderboard(&self, perf: &str, count: usize) -> Result<Vec<String>, HarvestError> {
        let count = count.clamp(1, MAX_LEADERBOARD);

        let resp = self
            .get(&format!("/api/player/top/{count}/{perf}"))
            .header("Accept", "application/vnd.lichess.v3+json")
            .send()
            .await?;

        check_status(resp.status(), perf)?;

        let board: Leaderboard = resp.json().await?;
        Ok(board.users.into_iter().map(|u| u.username).collect())
    }

    async fn export_games(
        &self,
        username: &str,
        window: &TimeWindow,
        max: usize,
    ) -> Result<Vec<GameRecord>, HarvestError> {
        let params = [
            ("since", window.since_millis().to_string()),
            ("until", window.until_millis().to_string()),
            ("max", max.to_string()),
            ("moves", "true".to_string()),
            ("pgnInJson", "false".to_string()),
        ];

        let resp = self
            .get(&format!("/api/games/user/{username}"))
            .query(&params)
            .header("Accept", "application/x-ndjson")
            .send()
            .await?;

        check_status(resp.status(), username)?;

        let text = resp.text().await?;
        Ok(parse_ndjson_games(&text))
    }
}

fn check_status(status: StatusCode, subject: &str) -> Result<(), HarvestError> {
    if status == StatusCode::NOT_FOUND {
        return Err(HarvestError::UserNotFound(subject.to_string()));
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(HarvestError::RateLimited);
    }
    if !status.is_success() {
        return Err(HarvestError::Status(status.as_u16()));
    }
    Ok(())
}

/// One game per line; unparseable lines are logged and dropped.
pub fn parse_ndjson_games(text: &str) -> Vec<GameRecord> {
    let mut results = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<GameRecord>(line) {
            Ok(game) => results.push(game),
            Err(e) => {
                tracing::warn!("Failed to parse Lichess game JSON: {e}");
            }
        }
    }

    results
}
