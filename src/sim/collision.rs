//! Collision detection and response
//!
//! Three checks, all axis-aligned:
//! - player landing on platforms (one-way, from above, while falling)
//! - bullets against enemies
//! - player against enemies (lethal)

use super::body::Aabb;
use super::state::{Bullet, Enemy, Platform, Player};
use crate::settings::Settings;

/// Player's feet are inside the landing band of `platform` and they overlap horizontally
fn in_landing_band(player: &Aabb, platform: &Aabb, slack: f32) -> bool {
    let feet = player.bottom();
    feet >= platform.top() && feet <= platform.bottom() + slack && player.overlaps_x(platform)
}

/// Bounce the player off any platform they're falling onto.
///
/// Platform kind is ignored. Every matching platform applies the same
/// impulse, so the last match in iteration order is the one reported.
pub fn resolve_landing(
    player: &mut Player,
    platforms: &[Platform],
    settings: &Settings,
) -> Option<usize> {
    if player.body.vel.y <= 0.0 {
        return None;
    }

    let player_box = player.body.aabb();
    let mut landed_on = None;
    for (idx, platform) in platforms.iter().enumerate() {
        if in_landing_band(&player_box, &platform.aabb(), settings.landing_slack) {
            player.body.vel.y = settings.jump_speed;
            player.jumping = true;
            landed_on = Some(idx);
        }
    }
    landed_on
}

/// Resolve bullet hits. Each bullet takes out at most one enemy.
/// Returns the number of enemies killed.
pub fn resolve_bullet_hits(bullets: &mut [Bullet], enemies: &mut [Enemy]) -> u32 {
    let mut kills = 0;
    for bullet in bullets.iter_mut() {
        for enemy in enemies.iter_mut() {
            if bullet.active && enemy.alive && bullet.body.aabb().overlaps(&enemy.body.aabb()) {
                bullet.active = false;
                enemy.alive = false;
                kills += 1;
                break;
            }
        }
    }
    kills
}

/// True if the player touches any live enemy
pub fn player_hits_enemy(player: &Player, enemies: &[Enemy]) -> bool {
    let player_box = player.body.aabb();
    enemies
        .iter()
        .any(|e| e.alive && player_box.overlaps(&e.body.aabb()))
}
