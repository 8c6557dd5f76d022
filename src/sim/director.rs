//! Score and enemy spawning
//!
//! Score is the best altitude reached (height grows as y shrinks) plus kill
//! bonuses. Every `enemy_score_step` points another enemy appears above the
//! player.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, Player};
use crate::settings::Settings;

/// Altitude for a world y. Truncates toward zero; below the origin counts as 0.
pub fn altitude(y: f32) -> u64 {
    let height = (-y).trunc();
    if height > 0.0 { height as u64 } else { 0 }
}

/// Raise the score to the current altitude if that's higher
pub fn update_score(player: &mut Player) {
    player.score = player.score.max(altitude(player.body.pos.y));
}

/// Next score at which an enemy spawns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnDirector {
    pub threshold: u64,
    step: u64,
}

impl SpawnDirector {
    pub fn new(settings: &Settings) -> Self {
        Self {
            threshold: settings.enemy_score_step,
            step: settings.enemy_score_step.max(1),
        }
    }

    /// Number of thresholds `score` has crossed; advances past all of them
    pub fn due_spawns(&mut self, score: u64) -> u32 {
        let mut count = 0;
        while score >= self.threshold {
            self.threshold += self.step;
            count += 1;
        }
        count
    }
}

/// A new enemy somewhere above the player, drifting left or right
pub fn spawn_enemy<R: Rng + ?Sized>(rng: &mut R, player_y: f32, settings: &Settings) -> Enemy {
    let x = rng.random_range(0..=settings.enemy_max_x()) as f32;
    let above = rng.random_range(settings.enemy_spawn_min_above..=settings.enemy_spawn_max_above);
    let vel_x = if rng.random_bool(0.5) {
        settings.enemy_speed
    } else {
        -settings.enemy_speed
    };
    Enemy::new(Vec2::new(x, player_y - above as f32), vel_x, settings)
}
