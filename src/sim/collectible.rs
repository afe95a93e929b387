//! Collectible pickups
//!
//! Pickups are placed by the session (see `Session::step`), scroll with the
//! obstacles and are collected by proximity to the avatar's centre.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::GameEvent;
use crate::tuning::PickupTuning;

/// A single pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub pos: Vec2,
    pub collected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectibleField {
    pub pickups: Vec<Pickup>,
    pub collected_count: u32,
    collect_radius: f32,
    cleanup_margin: f32,
}

impl CollectibleField {
    pub fn new(params: &PickupTuning) -> Self {
        Self {
            pickups: Vec::new(),
            collected_count: 0,
            collect_radius: params.collect_radius,
            cleanup_margin: params.cleanup_margin,
        }
    }

    pub fn spawn(&mut self, pos: Vec2) {
        self.pickups.push(Pickup {
            pos,
            collected: false,
        });
    }

    /// Scroll, collect near the avatar and drop pickups that left the playfield.
    /// Returns the number collected this frame.
    pub fn update(
        &mut self,
        dt: f32,
        scroll_speed: f32,
        avatar_pos: Vec2,
        events: &mut Vec<GameEvent>,
    ) -> u32 {
        let mut collected = 0;
        for pickup in &mut self.pickups {
            pickup.pos.x -= scroll_speed * dt;
            if !pickup.collected && pickup.pos.distance(avatar_pos) < self.collect_radius {
                pickup.collected = true;
                collected += 1;
                events.push(GameEvent::Score);
            }
        }
        self.collected_count += collected;

        let min_x = -self.cleanup_margin;
        self.pickups.retain(|p| !p.collected && p.pos.x >= min_x);
        collected
    }

    pub fn reset(&mut self) {
        self.pickups.clear();
        self.collected_count = 0;
    }
}
