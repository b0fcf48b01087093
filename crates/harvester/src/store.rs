//! On-disk layout of a harvest run.
//!
//! Games and plays are newline-delimited JSON so that files can be appended
//! one player at a time and loaded by any tabular tool.

use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chess_core::{GameRecord, MoveRecord};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::HarvestError;

pub const LEADERS_FILE: &str = "leaders.json";
pub const GAMES_FILE: &str = "games.ndjson";
pub const CLEAN_GAMES_FILE: &str = "games-clean.ndjson";
pub const PLAYS_FILE: &str = "plays.ndjson";

#[derive(Clone, Debug)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, HarvestError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| HarvestError::io(&root, e))?;
        Ok(Self { root })
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn save_leaders(&self, usernames: &[String]) -> Result<(), HarvestError> {
        let path = self.path(LEADERS_FILE);
        let file = File::create(&path).map_err(|e| HarvestError::io(&path, e))?;
        serde_json::to_writer_pretty(BufWriter::new(file), usernames)?;
        Ok(())
    }

    pub fn load_leaders(&self) -> Result<Vec<String>, HarvestError> {
        let path = self.path(LEADERS_FILE);
        let file = File::open(&path).map_err(|e| HarvestError::io(&path, e))?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Truncate the raw games file before a fresh fetch run.
    pub fn reset_games(&self) -> Result<(), HarvestError> {
        let path = self.path(GAMES_FILE);
        File::create(&path).map_err(|e| HarvestError::io(&path, e))?;
        Ok(())
    }

    pub fn append_games(&self, games: &[GameRecord]) -> Result<(), HarvestError> {
        append_lines(&self.path(GAMES_FILE), games)
    }

    pub fn load_games(&self) -> Result<Vec<GameRecord>, HarvestError> {
        read_lines(&self.path(GAMES_FILE))
    }

    pub fn save_clean_games(&self, games: &[GameRecord]) -> Result<(), HarvestError> {
        write_lines(&self.path(CLEAN_GAMES_FILE), games)
    }

    pub fn load_clean_games(&self) -> Result<Vec<GameRecord>, HarvestError> {
        read_lines(&self.path(CLEAN_GAMES_FILE))
    }

    pub fn save_plays(&self, plays: &[MoveRecord]) -> Result<(), HarvestError> {
        write_lines(&self.path(PLAYS_FILE), plays)
    }

    pub fn load_plays(&self) -> Result<Vec<MoveRecord>, HarvestError> {
        read_lines(&self.path(PLAYS_FILE))
    }
}

/// Keep the first game seen for each id, in order. Games without an id are
/// never considered duplicates.
pub fn dedupe_games(games: Vec<GameRecord>) -> Vec<GameRecord> {
    let mut seen = HashSet::new();
    games
        .into_iter()
        .filter(|g| g.id.is_empty() || seen.insert(g.id.clone()))
        .collect()
}

fn write_rows<T: Serialize>(file: File, path: &Path, rows: &[T]) -> Result<(), HarvestError> {
    let mut out = BufWriter::new(file);
    for row in rows {
        serde_json::to_writer(&mut out, row)?;
        out.write_all(b"\n").map_err(|e| HarvestError::io(path, e))?;
    }
    out.flush().map_err(|e| HarvestError::io(path, e))
}

fn write_lines<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), HarvestError> {
    let file = File::create(path).map_err(|e| HarvestError::io(path, e))?;
    write_rows(file, path, rows)
}

fn append_lines<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), HarvestError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| HarvestError::io(path, e))?;
    write_rows(file, path, rows)
}

fn read_lines<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, HarvestError> {
    let file = File::open(path).map_err(|e| HarvestError::io(path, e))?;
    let mut rows = Vec::new();

    for (i, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| HarvestError::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let row = serde_json::from_str(&line).map_err(|source| HarvestError::StoreLine {
            path: path.to_path_buf(),
            line: i + 1,
            source,
        })?;
        rows.push(row);
    }

    Ok(rows)
}
