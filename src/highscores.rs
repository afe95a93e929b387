//! High score leaderboard
//!
//! Kept inside the player profile, tracks the top 10 sessions.

use serde::{Deserialize, Serialize};

use crate::sim::SessionSummary;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    /// Difficulty level reached
    pub level: u32,
    /// Seconds survived
    pub duration_secs: f32,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a finished session. Returns the rank achieved, if any.
    pub fn add(&mut self, summary: &SessionSummary) -> Option<usize> {
        let score = summary.final_score;
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            level: summary.level,
            duration_secs: summary.duration_secs,
        };

        // Ties keep the older entry ahead
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
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(score: u32) -> SessionSummary {
        SessionSummary {
            final_score: score,
            collected_currency: 0,
            level: score / 5 + 1,
            duration_secs: score as f32 * 2.0,
        }
    }

    #[test]
    fn test_zero_never_qualifies() {
        let mut hs = HighScores::default();
        assert_eq!(hs.add(&session(0)), None);
        assert!(hs.entries.is_empty());
    }

    #[test]
    fn test_sorted_descending_with_ranks() {
        let mut hs = HighScores::default();
        assert_eq!(hs.add(&session(10)), Some(1));
        assert_eq!(hs.add(&session(30)), Some(1));
        assert_eq!(hs.add(&session(20)), Some(2));
        let scores: Vec<u32> = hs.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![30, 20, 10]);
        assert_eq!(hs.entries[0].level, 7);
    }

    #[test]
    fn test_full_board_drops_lowest() {
        let mut hs = HighScores::default();
        for score in 1..=MAX_HIGH_SCORES as u32 {
            hs.add(&session(score));
        }
        assert!(!hs.qualifies(1));
        assert_eq!(hs.add(&session(1)), None);
        assert_eq!(hs.add(&session(100)), Some(1));
        assert_eq!(hs.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(hs.entries.last().map(|e| e.score), Some(2));
    }

    #[test]
    fn test_tie_ranks_after_existing() {
        let mut hs = HighScores::default();
        hs.add(&session(8));
        assert_eq!(hs.add(&session(8)), Some(2));
    }
}
