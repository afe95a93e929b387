//! Data-driven game balance
//!
//! Every constant the simulation reads lives here. Partial JSON documents are
//! accepted; missing fields fall back to the defaults in `consts`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Playfield geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldTuning {
    pub width: f32,
    pub height: f32,
    pub ground_height: f32,
}

impl Default for PlayfieldTuning {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
            ground_height: GROUND_HEIGHT,
        }
    }
}

impl PlayfieldTuning {
    /// Y coordinate of the ground line (bottom of the playable area)
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.height - self.ground_height
    }
}

/// Avatar physics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarTuning {
    pub x: f32,
    pub start_y: f32,
    pub size: f32,
    pub gravity: f32,
    pub impulse_velocity: f32,
    pub max_fall_speed: f32,
    pub min_rotation: f32,
    pub max_rotation: f32,
}

impl Default for AvatarTuning {
    fn default() -> Self {
        Self {
            x: AVATAR_X,
            start_y: AVATAR_START_Y,
            size: AVATAR_SIZE,
            gravity: GRAVITY,
            impulse_velocity: IMPULSE_VELOCITY,
            max_fall_speed: MAX_FALL_SPEED,
            min_rotation: MIN_ROTATION,
            max_rotation: MAX_ROTATION,
        }
    }
}

/// Obstacle base values (level 1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleTuning {
    pub speed: f32,
    pub gap: f32,
    pub spacing: f32,
    pub width: f32,
    pub gap_margin: f32,
}

impl Default for ObstacleTuning {
    fn default() -> Self {
        Self {
            speed: OBSTACLE_SPEED,
            gap: OBSTACLE_GAP,
            spacing: OBSTACLE_SPACING,
            width: OBSTACLE_WIDTH,
            gap_margin: GAP_MARGIN,
        }
    }
}

/// Score-driven difficulty steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTuning {
    pub points_per_level: u32,
    pub speed_per_level: f32,
    pub gap_per_level: f32,
    pub speed_ceiling: f32,
    pub gap_floor: f32,
}

impl Default for DifficultyTuning {
    fn default() -> Self {
        Self {
            points_per_level: POINTS_PER_LEVEL,
            speed_per_level: SPEED_PER_LEVEL,
            gap_per_level: GAP_PER_LEVEL,
            speed_ceiling: SPEED_CEILING,
            gap_floor: GAP_FLOOR,
        }
    }
}

/// Collectible pickups and currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupTuning {
    pub collect_radius: f32,
    pub cleanup_margin: f32,
    pub spawn_chance: f64,
    pub currency_per_point: u32,
}

impl Default for PickupTuning {
    fn default() -> Self {
        Self {
            collect_radius: COLLECT_RADIUS,
            cleanup_margin: PICKUP_CLEANUP_MARGIN,
            spawn_chance: PICKUP_SPAWN_CHANCE,
            currency_per_point: CURRENCY_PER_POINT,
        }
    }
}

/// Complete balance table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub playfield: PlayfieldTuning,
    pub avatar: AvatarTuning,
    pub obstacles: ObstacleTuning,
    pub difficulty: DifficultyTuning,
    pub pickups: PickupTuning,
}

/// Replace non-positive or non-finite values with the fallback
fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON balance document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load tuning from a file, falling back to defaults when missing or malformed
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning.sanitized()
                }
                Err(e) => {
                    log::warn!("Malformed tuning {}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read tuning {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Clamp values so the simulation can never divide by zero or draw from an empty range
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        let pf = &mut self.playfield;
        pf.width = positive_or(pf.width, defaults.playfield.width);
        pf.height = positive_or(pf.height, defaults.playfield.height);
        if !pf.ground_height.is_finite() || pf.ground_height < 0.0 || pf.ground_height >= pf.height {
            pf.ground_height = 0.0;
        }

        let av = &mut self.avatar;
        av.size = positive_or(av.size, defaults.avatar.size);
        av.max_fall_speed = positive_or(av.max_fall_speed, defaults.avatar.max_fall_speed);
        if !av.gravity.is_finite() {
            av.gravity = defaults.avatar.gravity;
        }
        if !av.impulse_velocity.is_finite() {
            av.impulse_velocity = defaults.avatar.impulse_velocity;
        }
        if av.min_rotation > av.max_rotation {
            std::mem::swap(&mut av.min_rotation, &mut av.max_rotation);
        }

        let ob = &mut self.obstacles;
        ob.speed = positive_or(ob.speed, defaults.obstacles.speed);
        ob.gap = positive_or(ob.gap, defaults.obstacles.gap);
        ob.spacing = positive_or(ob.spacing, defaults.obstacles.spacing);
        ob.width = positive_or(ob.width, defaults.obstacles.width);
        let half_field = self.playfield.ground_y() / 2.0;
        if !ob.gap_margin.is_finite() || ob.gap_margin < 0.0 || ob.gap_margin > half_field {
            log::warn!("Gap margin {} leaves no spawn range; using {}", ob.gap_margin, half_field);
            ob.gap_margin = half_field;
        }

        let df = &mut self.difficulty;
        if df.points_per_level == 0 {
            df.points_per_level = defaults.difficulty.points_per_level;
        }
        df.speed_per_level = df.speed_per_level.max(0.0);
        df.gap_per_level = df.gap_per_level.max(0.0);
        if df.speed_ceiling.is_nan() || df.speed_ceiling < ob.speed {
            log::warn!("Speed ceiling {} below base speed {}", df.speed_ceiling, ob.speed);
            df.speed_ceiling = ob.speed;
        }
        if df.gap_floor.is_nan() || df.gap_floor <= 0.0 {
            df.gap_floor = defaults.difficulty.gap_floor.min(ob.gap);
        } else if df.gap_floor > ob.gap {
            df.gap_floor = ob.gap;
        }

        let pk = &mut self.pickups;
        pk.collect_radius = pk.collect_radius.max(0.0);
        pk.cleanup_margin = pk.cleanup_margin.max(0.0);
        pk.spawn_chance = if pk.spawn_chance.is_finite() {
            pk.spawn_chance.clamp(0.0, 1.0)
        } else {
            0.0
        };

        self
    }
}
