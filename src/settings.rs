//! Gameplay configuration
//!
//! Built once at startup and handed to the simulation by reference. Values
//! can be overridden from a JSON file; any field left out keeps its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Immutable gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,
    pub ticks_per_second: u32,

    // === Physics ===
    /// Added to the player's vertical velocity every tick
    pub gravity: f32,
    /// Vertical velocity applied on landing (negative = upward)
    pub jump_speed: f32,
    /// Horizontal velocity while a direction key is held
    pub move_speed: f32,
    /// Horizontal slowdown per tick
    pub friction: f32,
    pub landing_slack: f32,

    // === Entity sizes ===
    pub player_width: f32,
    pub player_height: f32,
    pub platform_width: f32,
    pub platform_height: f32,
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub bullet_size: f32,

    // === Generation ===
    pub platform_gap_min: u32,
    pub platform_gap_max: u32,
    pub initial_platforms: u32,
    pub initial_platform_spacing: f32,
    pub first_platform_offset: f32,
    pub player_start_offset: f32,
    pub moving_platform_speed: f32,

    // === Enemies ===
    pub enemy_speed: f32,
    /// Score distance between enemy spawns (also the first threshold)
    pub enemy_score_step: u64,
    pub enemy_spawn_min_above: u32,
    pub enemy_spawn_max_above: u32,
    pub kill_bonus: u64,

    // === Bullets ===
    pub bullet_speed: f32,
    pub shoot_cooldown_ticks: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            ticks_per_second: TICKS_PER_SECOND,

            gravity: GRAVITY,
            jump_speed: JUMP_SPEED,
            move_speed: MOVE_SPEED,
            friction: FRICTION,
            landing_slack: LANDING_SLACK,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            platform_width: PLATFORM_WIDTH,
            platform_height: PLATFORM_HEIGHT,
            enemy_width: ENEMY_WIDTH,
            enemy_height: ENEMY_HEIGHT,
            bullet_size: BULLET_SIZE,

            platform_gap_min: PLATFORM_GAP_MIN,
            platform_gap_max: PLATFORM_GAP_MAX,
            initial_platforms: INITIAL_PLATFORMS,
            initial_platform_spacing: INITIAL_PLATFORM_SPACING,
            first_platform_offset: FIRST_PLATFORM_OFFSET,
            player_start_offset: PLAYER_START_OFFSET,
            moving_platform_speed: MOVING_PLATFORM_SPEED,

            enemy_speed: ENEMY_SPEED,
            enemy_score_step: ENEMY_SCORE_STEP,
            enemy_spawn_min_above: ENEMY_SPAWN_MIN_ABOVE,
            enemy_spawn_max_above: ENEMY_SPAWN_MAX_ABOVE,
            kill_bonus: KILL_BONUS,

            bullet_speed: BULLET_SPEED,
            shoot_cooldown_ticks: SHOOT_COOLDOWN_TICKS,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load settings from a JSON file, or defaults if it can't be used
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Can't read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) if settings.is_playable() => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Ok(_) => {
                log::warn!("Settings in {} are not playable, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Ranges used by the generator must be non-empty and entities must fit on screen
    pub fn is_playable(&self) -> bool {
        self.screen_width > self.platform_width
            && self.screen_width > self.enemy_width
            && self.screen_height > 0.0
            && self.ticks_per_second > 0
            && self.platform_gap_min <= self.platform_gap_max
            && self.platform_gap_min > 0
            && self.enemy_spawn_min_above <= self.enemy_spawn_max_above
            && self.enemy_score_step > 0
            && self.jump_speed < 0.0
            && self.friction >= 0.0
    }

    /// Duration of one simulation tick
    pub fn tick_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs(1) / self.ticks_per_second.max(1)
    }

    /// Highest x at which a platform still fits on screen
    pub fn platform_max_x(&self) -> u32 {
        (self.screen_width - self.platform_width).max(0.0) as u32
    }

    /// Highest x at which an enemy still fits on screen
    pub fn enemy_max_x(&self) -> u32 {
        (self.screen_width - self.enemy_width).max(0.0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let settings = Settings::default();
        assert_eq!(settings.jump_speed, -15.0);
        assert_eq!(settings.enemy_score_step, 2000);
        assert_eq!(settings.kill_bonus, 100);
        assert_eq!(settings.platform_max_x(), 700);
        assert!(settings.is_playable());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "gravity": 0.25, "player_width": 40 }"#).unwrap();
        assert_eq!(settings.gravity, 0.25);
        assert_eq!(settings.player_width, 40.0);
        assert_eq!(settings.player_height, PLAYER_HEIGHT);
        assert_eq!(settings.screen_width, SCREEN_WIDTH);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("sky_hop_settings_missing_file.json");
        let _ = std::fs::remove_file(&path);
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_load_unplayable_file_uses_defaults() {
        let path = std::env::temp_dir().join(format!(
            "sky_hop_settings_unplayable_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "platform_gap_min": 200, "platform_gap_max": 100 }"#).unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_tick_duration() {
        let settings = Settings::default();
        assert_eq!(settings.tick_duration().as_micros(), 16_666);
    }
}
