//! Save/load of everything that outlives a session
//!
//! Features:
//! - Lifetime statistics (high score, games played, time played)
//! - Currency wallet fed by each session's collected currency
//! - Top-10 leaderboard
//! - Atomic JSON file writes (tmp → rename)
//! - Missing or corrupt files fall back to a fresh profile

pub mod profile;
pub mod stats;

pub use profile::{Profile, ProfileStore};
pub use stats::Stats;

use crate::sim::SessionSummary;

/// Receiver of end-of-session tallies, called once per completed session.
///
/// Errors are logged by the caller and never reach the simulation.
pub trait SessionRecorder {
    fn record(&mut self, summary: &SessionSummary) -> anyhow::Result<()>;
}

/// Keeps summaries in memory
impl SessionRecorder for Vec<SessionSummary> {
    fn record(&mut self, summary: &SessionSummary) -> anyhow::Result<()> {
        self.push(*summary);
        Ok(())
    }
}
