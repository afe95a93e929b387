//! Player profile and its JSON file store

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::SessionRecorder;
use super::stats::Stats;
use crate::highscores::HighScores;
use crate::sim::SessionSummary;

/// Everything persisted between sessions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub stats: Stats,
    /// Spendable currency
    pub coins: u64,
    pub high_scores: HighScores,
}

impl Profile {
    /// Fold in a finished session; returns true on a new high score
    pub fn apply(&mut self, summary: &SessionSummary) -> bool {
        self.coins += u64::from(summary.collected_currency);
        if let Some(rank) = self.high_scores.add(summary) {
            log::info!("Leaderboard rank #{rank} with {}", summary.final_score);
        }
        self.stats.apply(summary)
    }
}

/// File-backed profile. Writes go through a temp file and a rename so a
/// crash mid-save leaves the previous profile intact.
pub struct ProfileStore {
    path: PathBuf,
    profile: Profile,
}

impl ProfileStore {
    /// Default file name inside a profile directory
    pub const FILE_NAME: &'static str = "profile.json";

    /// Open (or start) the profile at `path`; unreadable files yield a fresh profile
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let profile = if path.exists() {
            match Self::read(&path) {
                Ok(profile) => {
                    log::info!("Loaded profile from {}", path.display());
                    profile
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable profile: {e:#}");
                    Profile::default()
                }
            }
        } else {
            log::info!("No profile at {}, starting fresh", path.display());
            Profile::default()
        };
        Self { path, profile }
    }

    fn read(path: &Path) -> anyhow::Result<Profile> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Write the profile to disk
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.profile)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}

impl SessionRecorder for ProfileStore {
    fn record(&mut self, summary: &SessionSummary) -> anyhow::Result<()> {
        if self.profile.apply(summary) {
            log::info!("New high score: {}", summary.final_score);
        }
        self.save()?;
        log::info!(
            "Profile saved: games={}, best={}, coins={}",
            self.profile.stats.total_games,
            self.profile.stats.high_score,
            self.profile.coins
        );
        Ok(())
    }
}
