/// Score-history persistence.
///
/// A capped, descending-sorted list of past session results, stored as a
/// JSON array of `{ "score": .., "date": "YYYY-MM-DD HH:MM:SS" }` objects.
/// Storage failures never reach the player: a missing or unreadable file is
/// an empty history, and a failed write is silently skipped.

use std::fs;
use std::path::PathBuf;

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Default store location, relative to the process working directory.
pub const HISTORY_FILE: &str = "score_history.json";

/// Entries kept after every insertion.
pub const MAX_ENTRIES: usize = 10;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u32,
    pub date: String,
}

#[derive(Debug)]
pub struct ScoreHistory {
    path: PathBuf,
    entries: Vec<ScoreEntry>,
}

impl ScoreHistory {
    /// Read the store from `path`.  Any read or parse failure yields an
    /// empty history — a corrupt or absent file means "no games yet".
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self { path, entries }
    }

    /// Record a finished session: append a timestamped entry, re-sort
    /// descending by score (stable, so equal scores keep insertion order),
    /// cap at `MAX_ENTRIES` and persist best-effort.
    pub fn add(&mut self, score: u32) {
        self.entries.push(ScoreEntry {
            score,
            date: Local::now().format(DATE_FORMAT).to_string(),
        });
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_ENTRIES);
        self.save();
    }

    /// Best recorded score, or 0 with no history.
    pub fn high_score(&self) -> u32 {
        self.entries.first().map(|e| e.score).unwrap_or(0)
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    fn save(&self) {
        if let Ok(json) = serde_json::to_string_pretty(&self.entries) {
            let _ = fs::write(&self.path, json);
        }
    }
}
