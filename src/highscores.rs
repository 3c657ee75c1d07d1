//! High score leaderboard
//!
//! Persisted to a JSON file, tracks the top 10 finished episodes across
//! both games. Kept sorted descending by score and truncated after every
//! insertion.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Difficulty;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Episode length in milliseconds
    pub elapsed_ms: u64,
    pub difficulty: Difficulty,
    /// Milliseconds since the epoch, supplied by the caller
    pub timestamp_ms: u64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Default on-disk file name
    pub const FILE_NAME: &'static str = "highscores.json";

    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a finished episode (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn add_score(
        &mut self,
        score: u64,
        elapsed_ms: u64,
        difficulty: Difficulty,
        timestamp_ms: u64,
    ) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            elapsed_ms,
            difficulty,
            timestamp_ms,
        };

        // Insertion point keeps the list sorted descending by score
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load the leaderboard, falling back to empty on any failure
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<HighScores>(&json) {
                Ok(scores) => {
                    log::info!("Loaded {} high scores", scores.entries.len());
                    scores
                }
                Err(e) => {
                    log::warn!("Ignoring corrupt high score file {}: {}", path.display(), e);
                    Self::new()
                }
            },
            Err(_) => {
                log::info!("No high scores at {}, starting fresh", path.display());
                Self::new()
            }
        }
    }

    /// Best-effort save; failures are logged, never propagated
    pub fn save(&self, path: &Path) {
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to serialize high scores: {}", e);
                return;
            }
        };
        match fs::write(path, json) {
            Ok(()) => log::info!("High scores saved ({} entries)", self.entries.len()),
            Err(e) => log::warn!("Failed to save high scores to {}: {}", path.display(), e),
        }
    }
}

/// Format an episode length as mm:ss
pub fn format_time(elapsed_ms: u64) -> String {
    let seconds = elapsed_ms / 1000;
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
