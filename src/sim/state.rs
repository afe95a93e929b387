//! Game state and core simulation types
//!
//! Phases, input commands, notifications and the end-of-session record.

use serde::{Deserialize, Serialize};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, no session running
    #[default]
    Menu,
    /// Active session (including the idle wait before the first impulse)
    Playing,
    /// Session frozen; only resume or quit are accepted
    Paused,
    /// Avatar died; waiting for restart or return to menu
    GameOver,
}

/// Semantic input commands, already mapped from raw input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Flap upward (also starts the scrolling on the first one)
    Impulse,
    /// Begin a session from the menu
    Start,
    Pause,
    Resume,
    /// Start a fresh session from the game-over screen
    Restart,
    ReturnToMenu,
    /// Abandon the current session, or exit from the menu
    Quit,
}

/// Fire-and-forget notification tags emitted by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameEvent {
    Impulse,
    Score,
    Death,
    LevelUp,
}

/// Final tallies of a completed session, handed to persistence exactly once
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionSummary {
    pub final_score: u32,
    pub collected_currency: u32,
    /// Difficulty level reached
    pub level: u32,
    /// Simulated seconds spent playing (paused time excluded)
    pub duration_secs: f32,
}

/// Outcome of a single `Session::step`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SessionEvent {
    /// Nothing changed phase this frame
    #[default]
    Continue,
    Started,
    Paused,
    Resumed,
    /// The avatar died; tallies were handed to the recorder
    GameOver(SessionSummary),
    ReturnedToMenu,
    /// Quit requested from the menu; the host should shut down
    Exit,
}

impl SessionEvent {
    /// Summary carried by a game-over event
    pub fn summary(&self) -> Option<&SessionSummary> {
        match self {
            SessionEvent::GameOver(summary) => Some(summary),
            _ => None,
        }
    }
}
