//! Flappy Barbie - A side-scrolling reflex game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (avatar physics, obstacles, scoring, game state)
//! - `session`: Per-frame driver and game-state machine
//! - `tuning`: Data-driven game balance
//! - `audio`: Fire-and-forget notification sink
//! - `persistence`: Lifetime stats and currency, saved between sessions
//! - `highscores`: Top-10 leaderboard

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod session;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use session::Session;
pub use tuning::Tuning;

/// Game configuration constants (defaults for `Tuning`)
pub mod consts {
    /// Frame timestep used by the headless runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 1920.0;
    pub const PLAYFIELD_HEIGHT: f32 = 1080.0;
    /// Ground strip at the bottom; the avatar dies on touching it
    pub const GROUND_HEIGHT: f32 = 150.0;

    /// Avatar defaults
    pub const AVATAR_X: f32 = 100.0;
    pub const AVATAR_START_Y: f32 = 540.0;
    pub const AVATAR_SIZE: f32 = 100.0;
    pub const GRAVITY: f32 = 1800.0;
    /// Upward (negative) velocity set by an impulse
    pub const IMPULSE_VELOCITY: f32 = -650.0;
    pub const MAX_FALL_SPEED: f32 = 1200.0;
    /// Rotation clamps in degrees (nose down / nose up)
    pub const MIN_ROTATION: f32 = -90.0;
    pub const MAX_ROTATION: f32 = 25.0;

    /// Obstacle defaults
    pub const OBSTACLE_SPEED: f32 = 350.0;
    pub const OBSTACLE_GAP: f32 = 400.0;
    pub const OBSTACLE_SPACING: f32 = 700.0;
    pub const OBSTACLE_WIDTH: f32 = 180.0;
    /// Gap centres spawn at least this far from the top and the ground
    pub const GAP_MARGIN: f32 = 150.0;

    /// Difficulty progression
    pub const POINTS_PER_LEVEL: u32 = 5;
    pub const SPEED_PER_LEVEL: f32 = 15.0;
    pub const GAP_PER_LEVEL: f32 = 10.0;
    pub const SPEED_CEILING: f32 = 650.0;
    pub const GAP_FLOOR: f32 = 120.0;

    /// Pickup defaults
    pub const COLLECT_RADIUS: f32 = 80.0;
    /// Pickups this far past the left edge are dropped
    pub const PICKUP_CLEANUP_MARGIN: f32 = 100.0;
    pub const PICKUP_SPAWN_CHANCE: f64 = 0.3;
    pub const CURRENCY_PER_POINT: u32 = 1;
}

/// Clamp to a range, mapping NaN to the lower bound
#[inline]
pub fn clamp_finite(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}
