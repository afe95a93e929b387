//! The player-controlled avatar
//!
//! Vertical-only integrator: x is fixed, gravity pulls y down, impulses
//! overwrite the vertical velocity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::state::GameEvent;
use crate::clamp_finite;
use crate::tuning::{AvatarTuning, PlayfieldTuning};

/// The falling avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    pub pos: Vec2,
    pub vel_y: f32,
    /// Degrees, positive is nose up
    pub rotation: f32,
    pub alive: bool,
    pub bounds: Rect,
    params: AvatarTuning,
    ground_y: f32,
}

impl Avatar {
    pub fn new(params: &AvatarTuning, playfield: &PlayfieldTuning) -> Self {
        let pos = Vec2::new(params.x, params.start_y);
        Self {
            pos,
            vel_y: 0.0,
            rotation: 0.0,
            alive: true,
            bounds: Rect::from_center(pos, Vec2::splat(params.size)),
            params: params.clone(),
            ground_y: playfield.ground_y(),
        }
    }

    /// Flap: set the upward velocity. Returns false (and does nothing) when dead.
    pub fn impulse(&mut self, events: &mut Vec<GameEvent>) -> bool {
        if !self.alive {
            return false;
        }
        self.vel_y = self.params.impulse_velocity;
        events.push(GameEvent::Impulse);
        true
    }

    /// Integrate one frame of gravity
    pub fn update(&mut self, dt: f32) {
        if !self.alive {
            return;
        }
        let dt = dt.max(0.0);

        self.vel_y += self.params.gravity * dt;
        if self.vel_y > self.params.max_fall_speed {
            self.vel_y = self.params.max_fall_speed;
        }
        self.pos.y += self.vel_y * dt;

        // Ground kills, ceiling only stops
        if self.pos.y > self.ground_y {
            self.pos.y = self.ground_y;
            self.alive = false;
        }
        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.vel_y = 0.0;
        }

        self.rotation = clamp_finite(
            -self.vel_y / 10.0,
            self.params.min_rotation,
            self.params.max_rotation,
        );
        self.bounds = Rect::from_center(self.pos, Vec2::splat(self.params.size));
    }

    /// Return to the spawn point, alive and at rest
    pub fn reset(&mut self) {
        self.pos = Vec2::new(self.params.x, self.params.start_y);
        self.vel_y = 0.0;
        self.rotation = 0.0;
        self.alive = true;
        self.bounds = Rect::from_center(self.pos, Vec2::splat(self.params.size));
    }
}
