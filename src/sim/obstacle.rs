//! Gapped obstacles and the field that spawns, scrolls, scores and retires them

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::difficulty::DifficultyController;
use super::geometry::Rect;
use super::state::GameEvent;
use crate::tuning::Tuning;

/// A top/bottom barrier pair with a passable gap between them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub gap_center: f32,
    pub gap_height: f32,
    /// Solid slab above the gap
    pub top: Rect,
    /// Solid slab below the gap
    pub bottom: Rect,
    /// Set once the trailing edge has gone past the avatar
    pub passed: bool,
}

impl Obstacle {
    /// Build an obstacle; each slab extends `extent` away from the gap
    pub fn new(x: f32, width: f32, gap_center: f32, gap_height: f32, extent: f32) -> Self {
        let half_gap = gap_height * 0.5;
        let gap_top = gap_center - half_gap;
        let gap_bottom = gap_center + half_gap;
        Self {
            x,
            width,
            gap_center,
            gap_height,
            top: Rect::new(Vec2::new(x, gap_top - extent), Vec2::new(x + width, gap_top)),
            bottom: Rect::new(
                Vec2::new(x, gap_bottom),
                Vec2::new(x + width, gap_bottom + extent),
            ),
            passed: false,
        }
    }

    /// Scroll left by `speed * dt`
    pub fn update(&mut self, dt: f32, speed: f32) {
        self.x -= speed * dt;
        self.top.set_left(self.x);
        self.bottom.set_left(self.x);
    }

    /// Right edge of the obstacle
    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.x + self.width
    }

    /// Fully past the left edge of the playfield
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.trailing_edge() < 0.0
    }

    pub fn collides_with(&self, bounds: &Rect) -> bool {
        bounds.intersects(&self.top) || bounds.intersects(&self.bottom)
    }
}

/// What happened in the obstacle field during one update
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FieldReport {
    /// Points scored this frame
    pub scored: u32,
    /// Gap centre of an obstacle spawned this frame
    pub spawned: Option<Vec2>,
    pub level_up: bool,
    /// The avatar hit an obstacle this frame
    pub collided: bool,
}

/// Ordered set of live obstacles (spawn order = left-to-right order)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleField {
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    /// Seconds since the last spawn
    pub spawn_timer: f32,
    pub difficulty: DifficultyController,
    spawn_x: f32,
    width: f32,
    gap_min: f32,
    gap_max: f32,
    extent: f32,
    #[serde(skip, default = "default_rng")]
    rng: Pcg32,
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

impl ObstacleField {
    pub fn new(tuning: &Tuning, seed: u64) -> Self {
        let ground = tuning.playfield.ground_y();
        let margin = tuning.obstacles.gap_margin;
        Self {
            obstacles: Vec::new(),
            score: 0,
            spawn_timer: 0.0,
            difficulty: DifficultyController::new(&tuning.obstacles, &tuning.difficulty),
            spawn_x: tuning.playfield.width,
            width: tuning.obstacles.width,
            gap_min: margin,
            gap_max: (ground - margin).max(margin),
            extent: tuning.playfield.height,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Current difficulty level
    #[inline]
    pub fn level(&self) -> u32 {
        self.difficulty.level
    }

    /// Current scroll speed (pixels/s)
    #[inline]
    pub fn speed(&self) -> f32 {
        self.difficulty.speed
    }

    /// Current gap height for new spawns
    #[inline]
    pub fn gap(&self) -> f32 {
        self.difficulty.gap
    }

    /// Spawn an obstacle at the right edge with the given gap centre
    pub fn spawn_at(&mut self, gap_center: f32) -> &Obstacle {
        let gap_center = gap_center.clamp(self.gap_min, self.gap_max);
        let obstacle = Obstacle::new(
            self.spawn_x,
            self.width,
            gap_center,
            self.difficulty.gap,
            self.extent,
        );
        self.obstacles.push(obstacle);
        &self.obstacles[self.obstacles.len() - 1]
    }

    /// Advance one frame against the avatar
    pub fn update(&mut self, dt: f32, avatar: &mut Avatar, events: &mut Vec<GameEvent>) -> FieldReport {
        let mut report = FieldReport::default();

        // Escalate first so a fresh threshold shapes this frame's spawn
        if self.difficulty.evaluate(self.score) {
            report.level_up = true;
            events.push(GameEvent::LevelUp);
        }

        // Timer resets to zero rather than carrying the overshoot
        self.spawn_timer += dt;
        if self.spawn_timer >= self.difficulty.spawn_interval {
            self.spawn_timer = 0.0;
            let gap_center = self.rng.random_range(self.gap_min..=self.gap_max);
            let spawned = self.spawn_at(gap_center);
            report.spawned = Some(Vec2::new(
                spawned.x + spawned.width * 0.5,
                spawned.gap_center,
            ));
        }

        // Scoring and collision observe the same post-translation positions
        let speed = self.difficulty.speed;
        for obstacle in &mut self.obstacles {
            obstacle.update(dt, speed);

            if !obstacle.passed && obstacle.trailing_edge() < avatar.pos.x {
                obstacle.passed = true;
                self.score += 1;
                report.scored += 1;
                events.push(GameEvent::Score);
            }

            if avatar.alive && obstacle.collides_with(&avatar.bounds) {
                avatar.alive = false;
                report.collided = true;
            }
        }
        self.obstacles.retain(|o| !o.is_offscreen());

        if self.difficulty.evaluate(self.score) {
            report.level_up = true;
            events.push(GameEvent::LevelUp);
        }

        report
    }

    /// Clear obstacles and score, back to level 1. The RNG stream continues.
    pub fn reset(&mut self) {
        self.obstacles.clear();
        self.score = 0;
        self.spawn_timer = 0.0;
        self.difficulty.reset();
    }
}
