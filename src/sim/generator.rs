//! Procedural platform column
//!
//! Platforms are kept ordered bottom to top, so the last one is always the
//! highest. New platforms are stacked above it until the column reaches past
//! the top of the next screen; anything that falls a screen below the player
//! is dropped.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, Platform, PlatformKind};
use crate::settings::Settings;

/// Initial climbable column: one centred platform, the rest stacked above it
pub fn seed_platforms<R: Rng + ?Sized>(rng: &mut R, settings: &Settings) -> Vec<Platform> {
    let base_y = settings.screen_height - settings.first_platform_offset;
    let mut platforms = Vec::with_capacity(settings.initial_platforms as usize);
    if settings.initial_platforms == 0 {
        return platforms;
    }

    let centre_x =
        (settings.screen_width / 2.0).floor() - (settings.platform_width / 2.0).floor();
    platforms.push(Platform::new(
        Vec2::new(centre_x, base_y),
        PlatformKind::random(rng),
        settings,
    ));

    for i in 1..settings.initial_platforms {
        let x = rng.random_range(0..=settings.platform_max_x()) as f32;
        let y = base_y - i as f32 * settings.initial_platform_spacing;
        platforms.push(Platform::new(
            Vec2::new(x, y),
            PlatformKind::random(rng),
            settings,
        ));
    }

    platforms
}

/// Smallest (highest on screen) platform y
pub fn topmost_y(platforms: &[Platform]) -> Option<f32> {
    platforms.iter().map(|p| p.pos.y).reduce(f32::min)
}

/// Stack platforms until the highest sits strictly above `player_y - screen_height`.
/// Returns how many were added.
pub fn generate_platforms<R: Rng + ?Sized>(
    platforms: &mut Vec<Platform>,
    player_y: f32,
    rng: &mut R,
    settings: &Settings,
) -> usize {
    let ceiling = player_y - settings.screen_height;
    let mut last_y = platforms.last().map_or(player_y, |p| p.pos.y);
    let mut added = 0;

    while last_y >= ceiling {
        let x = rng.random_range(0..=settings.platform_max_x()) as f32;
        let gap = rng.random_range(settings.platform_gap_min..=settings.platform_gap_max);
        last_y -= gap as f32;
        platforms.push(Platform::new(
            Vec2::new(x, last_y),
            PlatformKind::random(rng),
            settings,
        ));
        added += 1;
    }

    added
}

/// Keep platforms still above the trailing edge `player_y + screen_height`
pub fn prune_platforms(platforms: Vec<Platform>, player_y: f32, screen_height: f32) -> Vec<Platform> {
    let cutoff = player_y + screen_height;
    platforms.into_iter().filter(|p| p.pos.y < cutoff).collect()
}

/// Keep enemies that are alive and above the trailing edge
pub fn prune_enemies(enemies: Vec<Enemy>, player_y: f32, screen_height: f32) -> Vec<Enemy> {
    let cutoff = player_y + screen_height;
    enemies
        .into_iter()
        .filter(|e| e.alive && e.body.pos.y < cutoff)
        .collect()
}
