//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or storage dependencies

pub mod avatar;
pub mod collectible;
pub mod difficulty;
pub mod geometry;
pub mod obstacle;
pub mod state;

pub use avatar::Avatar;
pub use collectible::{CollectibleField, Pickup};
pub use difficulty::DifficultyController;
pub use geometry::Rect;
pub use obstacle::{FieldReport, Obstacle, ObstacleField};
pub use state::{Command, GameEvent, GamePhase, SessionEvent, SessionSummary};
