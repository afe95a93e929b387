//! Score-driven difficulty progression
//!
//! Level is `score / points_per_level + 1`. Each level adds a fixed amount of
//! obstacle speed and removes a fixed amount of gap, clamped to a ceiling and
//! a floor respectively.

use serde::{Deserialize, Serialize};

use crate::tuning::{DifficultyTuning, ObstacleTuning};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyController {
    pub level: u32,
    pub speed: f32,
    pub gap: f32,
    /// Seconds between obstacle spawns at the current speed
    pub spawn_interval: f32,
    base: ObstacleTuning,
    steps: DifficultyTuning,
}

impl DifficultyController {
    pub fn new(base: &ObstacleTuning, steps: &DifficultyTuning) -> Self {
        let mut controller = Self {
            level: 1,
            speed: 0.0,
            gap: 0.0,
            spawn_interval: 0.0,
            base: base.clone(),
            steps: steps.clone(),
        };
        controller.reset();
        controller
    }

    /// Level implied by a score
    pub fn level_for_score(&self, score: u32) -> u32 {
        score / self.steps.points_per_level.max(1) + 1
    }

    /// Obstacle speed at a level
    pub fn speed_for_level(&self, level: u32) -> f32 {
        let steps = level.saturating_sub(1) as f32;
        (self.base.speed + steps * self.steps.speed_per_level).min(self.steps.speed_ceiling)
    }

    /// Gap height at a level
    pub fn gap_for_level(&self, level: u32) -> f32 {
        let steps = level.saturating_sub(1) as f32;
        (self.base.gap - steps * self.steps.gap_per_level).max(self.steps.gap_floor)
    }

    /// Re-evaluate against the score; returns true when the level went up.
    ///
    /// Speed, gap and spawn interval change together with the level and only
    /// on an upward transition.
    pub fn evaluate(&mut self, score: u32) -> bool {
        let new_level = self.level_for_score(score);
        if new_level <= self.level {
            return false;
        }
        self.apply_level(new_level);
        log::info!(
            "Level {}: speed={}, gap={}",
            self.level,
            self.speed,
            self.gap
        );
        true
    }

    /// Back to level 1
    pub fn reset(&mut self) {
        self.apply_level(1);
    }

    fn apply_level(&mut self, level: u32) {
        self.level = level;
        self.speed = self.speed_for_level(level);
        self.gap = self.gap_for_level(level);
        self.spawn_interval = self.base.spacing / self.speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn controller() -> DifficultyController {
        let tuning = Tuning::default();
        DifficultyController::new(&tuning.obstacles, &tuning.difficulty)
    }

    #[test]
    fn test_starts_at_base_values() {
        let c = controller();
        assert_eq!(c.level, 1);
        assert_eq!(c.speed, OBSTACLE_SPEED);
        assert_eq!(c.gap, OBSTACLE_GAP);
        assert_eq!(c.spawn_interval, OBSTACLE_SPACING / OBSTACLE_SPEED);
    }

    #[test]
    fn test_level_tracks_score() {
        let mut c = controller();
        for score in 0..=50 {
            c.evaluate(score);
            assert_eq!(c.level, score / 5 + 1);
        }
    }

    #[test]
    fn test_level_up_fires_once_per_level() {
        let mut c = controller();
        assert!(!c.evaluate(4));
        assert!(c.evaluate(5));
        assert!(!c.evaluate(5));
        assert!(!c.evaluate(6));
        assert_eq!(c.level, 2);
        assert_eq!(c.speed, OBSTACLE_SPEED + SPEED_PER_LEVEL);
        assert_eq!(c.gap, OBSTACLE_GAP - GAP_PER_LEVEL);
        assert_eq!(c.spawn_interval, OBSTACLE_SPACING / c.speed);
    }

    #[test]
    fn test_lower_score_never_lowers_level() {
        let mut c = controller();
        c.evaluate(12);
        assert!(!c.evaluate(0));
        assert_eq!(c.level, 3);
    }

    #[test]
    fn test_clamps_at_level_100() {
        let c = controller();
        assert_eq!(c.speed_for_level(100), SPEED_CEILING);
        assert_eq!(c.gap_for_level(100), GAP_FLOOR);
    }

    #[test]
    fn test_reset_returns_to_level_one() {
        let mut c = controller();
        c.evaluate(40);
        c.reset();
        assert_eq!(c.level, 1);
        assert_eq!(c.speed, OBSTACLE_SPEED);
        assert_eq!(c.gap, OBSTACLE_GAP);
    }

    proptest! {
        #[test]
        fn prop_speed_and_gap_monotone(level in 1u32..500) {
            let c = controller();
            prop_assert!(c.speed_for_level(level + 1) >= c.speed_for_level(level));
            prop_assert!(c.gap_for_level(level + 1) <= c.gap_for_level(level));
            prop_assert!(c.speed_for_level(level) <= SPEED_CEILING);
            prop_assert!(c.gap_for_level(level) >= GAP_FLOOR);
        }
    }
}
