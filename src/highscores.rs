//! High score leaderboard system
//!
//! Persisted as JSON next to the settings file, tracks the top 10 runs.
//! Runs rank by stars collected, then by seconds survived.

use std::cmp::Ordering;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence::{self, StorageError};
use crate::sim::RunSummary;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Longest pilot name accepted
pub const MAX_NAME_LEN: usize = 24;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Pilot name as typed on the game-over screen
    pub name: String,
    /// Seconds survived
    pub time: u32,
    /// Stars collected
    pub stars: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: u64,
}

/// Descending by stars, then by time. `Less` means the first run ranks higher.
fn rank_order(stars_a: u32, time_a: u32, stars_b: u32, time_b: u32) -> Ordering {
    stars_b.cmp(&stars_a).then(time_b.cmp(&time_a))
}

/// Strictly better than `entry`; equal runs keep first-come order
fn ranks_above(summary: &RunSummary, entry: &HighScoreEntry) -> bool {
    rank_order(summary.score, summary.elapsed_time, entry.stars, entry.time) == Ordering::Less
}

/// Why a submission was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// No name entered
    EmptyName,
    /// Did not make the top 10
    NotRanked,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a run qualifies for the leaderboard
    pub fn qualifies(&self, summary: &RunSummary) -> bool {
        self.potential_rank(summary).is_some()
    }

    /// Get the rank a run would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, summary: &RunSummary) -> Option<usize> {
        if summary.elapsed_time == 0 && summary.score == 0 {
            return None;
        }
        let pos = self
            .entries
            .iter()
            .position(|e| ranks_above(summary, e))
            .unwrap_or(self.entries.len());
        let rank = pos + 1;
        (rank <= MAX_HIGH_SCORES).then_some(rank)
    }

    /// Submit a finished run under `name`.
    /// Returns the rank achieved (1-indexed).
    pub fn submit(
        &mut self,
        name: &str,
        summary: &RunSummary,
        timestamp: u64,
    ) -> Result<usize, Rejection> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Rejection::EmptyName);
        }
        let rank = self.potential_rank(summary).ok_or(Rejection::NotRanked)?;

        let entry = HighScoreEntry {
            name: name.chars().take(MAX_NAME_LEN).collect(),
            time: summary.elapsed_time,
            stars: summary.score,
            timestamp,
        };
        self.entries.insert(rank - 1, entry);

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        log::info!(
            "Leaderboard: {} placed #{} ({} stars, {}s)",
            name,
            rank,
            summary.score,
            summary.elapsed_time
        );
        Ok(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top entry (if any)
    pub fn top(&self) -> Option<&HighScoreEntry> {
        self.entries.first()
    }

    /// Load the leaderboard, starting fresh if the file is missing or unreadable
    pub fn load(path: &Path) -> Self {
        match persistence::load_json::<HighScores>(path) {
            Ok(mut scores) => {
                scores.entries.sort_by(|a, b| rank_order(a.stars, a.time, b.stars, b.time));
                scores.entries.truncate(MAX_HIGH_SCORES);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(e) if e.is_not_found() => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Ignoring unreadable high scores: {e}");
                Self::new()
            }
        }
    }

    /// Save the leaderboard
    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        persistence::save_json(path, self)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

/// Format a run duration as `m:ss`
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
