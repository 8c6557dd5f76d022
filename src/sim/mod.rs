//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Configuration passed in by reference
//! - No rendering or platform dependencies

pub mod body;
pub mod camera;
pub mod collision;
pub mod director;
pub mod generator;
pub mod state;
pub mod tick;

pub use body::{Aabb, KinematicBody};
pub use camera::Camera;
pub use collision::{player_hits_enemy, resolve_bullet_hits, resolve_landing};
pub use director::{SpawnDirector, altitude};
pub use state::{
    Bullet, DeathCause, Enemy, GameEvent, GamePhase, GameState, Platform, PlatformKind, Player,
};
pub use tick::{Command, TickInput, apply_command, tick};
