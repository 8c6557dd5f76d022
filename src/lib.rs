//! Sky Hop - An endless vertical jumper
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, generation, collisions, session state)
//! - `renderer`: Terminal rendering on a half-block pixel canvas
//! - `platform`: Terminal input, frame pacing and runtime environment
//! - `persistence`: Key/value storage backends
//! - `settings`: Immutable gameplay configuration

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use highscores::HighScore;
pub use settings::Settings;

/// Default game configuration constants
///
/// These seed [`Settings::default`]; the simulation itself only reads the
/// values through a `&Settings`.
pub mod consts {
    /// Logical screen dimensions (world units)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Fixed simulation rate
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Per-tick physics (world units per tick)
    pub const GRAVITY: f32 = 0.5;
    pub const JUMP_SPEED: f32 = -15.0;
    pub const MOVE_SPEED: f32 = 5.0;
    pub const FRICTION: f32 = 0.5;

    /// Entity sizes
    pub const PLAYER_WIDTH: f32 = 80.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLATFORM_WIDTH: f32 = 100.0;
    pub const PLATFORM_HEIGHT: f32 = 20.0;
    pub const ENEMY_WIDTH: f32 = 50.0;
    pub const ENEMY_HEIGHT: f32 = 50.0;
    pub const BULLET_SIZE: f32 = 8.0;

    /// Extra tolerance below a platform's bottom edge that still counts as a landing
    pub const LANDING_SLACK: f32 = 10.0;

    /// Platform generation
    pub const PLATFORM_GAP_MIN: u32 = 50;
    pub const PLATFORM_GAP_MAX: u32 = 150;
    pub const INITIAL_PLATFORMS: u32 = 10;
    pub const INITIAL_PLATFORM_SPACING: f32 = 100.0;
    /// Distance of the first platform above the bottom of the screen
    pub const FIRST_PLATFORM_OFFSET: f32 = 120.0;
    pub const MOVING_PLATFORM_SPEED: f32 = 2.0;

    /// Player spawns this far above the bottom of the screen
    pub const PLAYER_START_OFFSET: f32 = 200.0;

    /// Enemies
    pub const ENEMY_SPEED: f32 = 2.0;
    pub const ENEMY_SCORE_STEP: u64 = 2000;
    pub const ENEMY_SPAWN_MIN_ABOVE: u32 = 100;
    pub const ENEMY_SPAWN_MAX_ABOVE: u32 = 300;
    pub const KILL_BONUS: u64 = 100;

    /// Bullets
    pub const BULLET_SPEED: f32 = 10.0;
    pub const SHOOT_COOLDOWN_TICKS: u32 = 30;
}
