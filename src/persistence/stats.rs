//! Lifetime statistics

use serde::{Deserialize, Serialize};

use crate::sim::SessionSummary;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub high_score: u32,
    pub total_games: u32,
    pub total_deaths: u32,
    /// Whole seconds
    pub total_time_played: u64,
}

impl Stats {
    /// Fold in a finished session; returns true on a new high score
    pub fn apply(&mut self, summary: &SessionSummary) -> bool {
        self.total_games += 1;
        self.total_deaths += 1;
        self.total_time_played += summary.duration_secs.max(0.0) as u64;

        if summary.final_score > self.high_score {
            self.high_score = summary.final_score;
            true
        } else {
            false
        }
    }
}
