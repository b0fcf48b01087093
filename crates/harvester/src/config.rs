//! Harvester configuration from environment variables

use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use tracing::info;

use crate::error::HarvestError;
use crate::retry::RetryPolicy;

pub const DEFAULT_BASE_URL: &str = "https://lichess.org";

#[derive(Clone, Debug)]
pub struct HarvestConfig {
    /// Directory holding leaders, games and plays files
    pub data_dir: PathBuf,

    /// Lichess API root, overridable for local mocks
    pub base_url: String,

    /// Personal API token; anonymous access when absent
    pub api_token: Option<String>,

    pub http_timeout: Duration,

    /// Retry policy for each remote call
    pub retry: RetryPolicy,

    /// Pause between consecutive players
    pub player_delay: Duration,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: None,
            http_timeout: Duration::from_secs(120),
            retry: RetryPolicy::default(),
            player_delay: Duration::from_millis(1000),
        }
    }
}

impl HarvestConfig {
    pub fn from_env() -> Result<Self, HarvestError> {
        let defaults = Self::default();

        let data_dir = env::var("HARVEST_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let base_url = env::var("LICHESS_BASE_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);

        let retry = RetryPolicy {
            max_attempts: parse_var("FETCH_MAX_ATTEMPTS")?.unwrap_or(defaults.retry.max_attempts),
            base_delay: parse_var("FETCH_BASE_DELAY_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.retry.base_delay),
            max_delay: parse_var("FETCH_MAX_DELAY_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.retry.max_delay),
        };
        if retry.max_attempts == 0 {
            return Err(HarvestError::Config(
                "FETCH_MAX_ATTEMPTS must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            data_dir,
            base_url,
            api_token: load_token()?,
            http_timeout: parse_var("HTTP_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.http_timeout),
            retry,
            player_delay: parse_var("PLAYER_DELAY_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.player_delay),
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>, HarvestError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| HarvestError::Config(format!("{name} has invalid value {raw:?}"))),
        Err(_) => Ok(None),
    }
}

/// `LICHESS_TOKEN` wins over the token file. A missing default file is fine.
fn load_token() -> Result<Option<String>, HarvestError> {
    if let Ok(token) = env::var("LICHESS_TOKEN") {
        return Ok(Some(token.trim().to_string()).filter(|t| !t.is_empty()));
    }

    let (path, explicit) = match env::var("LICHESS_TOKEN_FILE") {
        Ok(p) => (PathBuf::from(p), true),
        Err(_) => (PathBuf::from("lichess.token"), false),
    };

    match fs::read_to_string(&path) {
        Ok(contents) => {
            info!(path = %path.display(), "Loaded Lichess token from file");
            Ok(Some(contents.trim().to_string()).filter(|t| !t.is_empty()))
        }
        Err(e) if explicit => Err(HarvestError::io(path, e)),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = HarvestConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.base_url, "https://lichess.org");
        assert_eq!(config.http_timeout, Duration::from_secs(120));
        assert_eq!(config.retry.max_attempts, 5);
        assert!(config.api_token.is_none());
    }
}
