//! Fixed timestep simulation tick and session transitions
//!
//! Per tick: input → player/bullet/platform/enemy motion → camera → platform
//! generation and pruning → fall check → score and spawns → hit checks.

use super::collision::{player_hits_enemy, resolve_bullet_hits, resolve_landing};
use super::director::{spawn_enemy, update_score};
use super::generator::{generate_platforms, prune_enemies, prune_platforms};
use super::state::{DeathCause, GameEvent, GamePhase, GameState};
use crate::settings::Settings;

/// Held controls for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub shoot: bool,
}

/// Discrete session commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a run from the menu
    Start,
    /// Play again from the game-over screen
    Restart,
    /// Back to the menu from the game-over screen
    Menu,
    /// Escape or window close, valid anywhere
    Quit,
}

/// Apply a session command. Returns true if it changed the phase.
///
/// Commands that don't apply to the current phase are ignored.
pub fn apply_command(state: &mut GameState, command: Command, settings: &Settings) -> bool {
    let next = match (state.phase, command) {
        (GamePhase::Terminated, _) => return false,
        (_, Command::Quit) => GamePhase::Terminated,
        (GamePhase::Menu, Command::Start) | (GamePhase::GameOver, Command::Restart) => {
            state.reset(settings);
            state.events.push(GameEvent::SessionStarted);
            log::info!("Run started (seed {})", state.seed);
            GamePhase::Playing
        }
        (GamePhase::GameOver, Command::Menu) => GamePhase::Menu,
        _ => return false,
    };

    log::debug!("Phase {:?} -> {:?}", state.phase, next);
    state.phase = next;
    true
}

/// End the run and record the score. Only the first call per run counts.
fn end_run(state: &mut GameState, cause: DeathCause) {
    if state.phase != GamePhase::Playing {
        return;
    }

    let score = state.player.score;
    state.phase = GamePhase::GameOver;
    state.new_high_score = state.high_score.update(score);
    state.events.push(GameEvent::GameOver {
        cause,
        score,
        new_high_score: state.new_high_score,
    });
    log::info!(
        "Game over ({:?}) after {} ticks: score {}, best {}",
        cause,
        state.time_ticks,
        score,
        state.high_score.best()
    );
}

/// Advance the session by one fixed tick. Does nothing outside `Playing`.
pub fn tick(state: &mut GameState, input: &TickInput, settings: &Settings) {
    state.events.clear();
    if state.phase != GamePhase::Playing {
        return;
    }
    state.time_ticks += 1;

    // Held keys set velocity outright every tick; right wins if both are down
    if input.left {
        state.player.body.vel.x = -settings.move_speed;
    }
    if input.right {
        state.player.body.vel.x = settings.move_speed;
    }
    if input.shoot && state.player.shoot(settings) {
        state.events.push(GameEvent::Shot);
    }

    // Motion
    state.player.integrate(settings);
    if let Some(platform) = resolve_landing(&mut state.player, &state.platforms, settings) {
        state.events.push(GameEvent::Landed { platform });
    }
    state.player.body.wrap_horizontal(settings.screen_width);
    state.player.update_bullets(settings.screen_width);

    for platform in &mut state.platforms {
        platform.update(settings.screen_width);
    }
    for enemy in &mut state.enemies {
        enemy.update(settings.screen_width);
    }

    // View and level
    let player_y = state.player.body.pos.y;
    state.camera.follow(player_y, settings.screen_height);

    generate_platforms(&mut state.platforms, player_y, &mut state.rng, settings);
    let platforms = std::mem::take(&mut state.platforms);
    state.platforms = prune_platforms(platforms, player_y, settings.screen_height);
    let enemies = std::mem::take(&mut state.enemies);
    state.enemies = prune_enemies(enemies, player_y, settings.screen_height);

    if state
        .camera
        .lost_sight_of(player_y, settings.screen_height)
    {
        end_run(state, DeathCause::Fell);
        return;
    }

    // Score and spawns
    update_score(&mut state.player);
    for _ in 0..state.director.due_spawns(state.player.score) {
        let enemy = spawn_enemy(&mut state.rng, player_y, settings);
        log::debug!(
            "Enemy spawned at ({:.0}, {:.0})",
            enemy.body.pos.x,
            enemy.body.pos.y
        );
        state.enemies.push(enemy);
        state.events.push(GameEvent::EnemySpawned);
    }

    // Hits
    let kills = resolve_bullet_hits(&mut state.player.bullets, &mut state.enemies);
    if kills > 0 {
        state.player.score += u64::from(kills) * settings.kill_bonus;
        for _ in 0..kills {
            state.events.push(GameEvent::EnemyKilled);
        }
        log::debug!("{} enemies shot, score {}", kills, state.player.score);
    }

    if player_hits_enemy(&state.player, &state.enemies) {
        end_run(state, DeathCause::Caught);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HighScore;
    use crate::persistence::MemoryStorage;
    use crate::sim::state::{Enemy, Platform, PlatformKind};
    use glam::Vec2;

    fn playing_state(seed: u64) -> (Settings, GameState, MemoryStorage) {
        let settings = Settings::default();
        let storage = MemoryStorage::new();
        let mut state = GameState::new(&settings, seed, HighScore::load(Box::new(storage.clone())));
        assert!(apply_command(&mut state, Command::Start, &settings));
        (settings, state, storage)
    }

    #[test]
    fn test_menu_to_playing() {
        let settings = Settings::default();
        let mut state = GameState::new(&settings, 1, HighScore::load(Box::new(MemoryStorage::new())));
        assert_eq!(state.phase, GamePhase::Menu);

        // Ticks in the menu do nothing
        let before = state.player.body.pos;
        tick(&mut state, &TickInput::default(), &settings);
        assert_eq!(state.player.body.pos, before);
        assert_eq!(state.time_ticks, 0);

        // Restart/menu don't apply in the menu
        assert!(!apply_command(&mut state, Command::Restart, &settings));
        assert!(!apply_command(&mut state, Command::Menu, &settings));
        assert_eq!(state.phase, GamePhase::Menu);

        assert!(apply_command(&mut state, Command::Start, &settings));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.events, vec![GameEvent::SessionStarted]);
    }

    #[test]
    fn test_playing_ignores_session_commands() {
        let (settings, mut state, _) = playing_state(2);
        assert!(!apply_command(&mut state, Command::Start, &settings));
        assert!(!apply_command(&mut state, Command::Restart, &settings));
        assert!(!apply_command(&mut state, Command::Menu, &settings));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_quit_from_any_phase() {
        let (settings, mut state, _) = playing_state(3);
        assert!(apply_command(&mut state, Command::Quit, &settings));
        assert_eq!(state.phase, GamePhase::Terminated);
        assert!(!apply_command(&mut state, Command::Start, &settings));
        assert_eq!(state.phase, GamePhase::Terminated);

        let mut menu = GameState::new(&settings, 3, HighScore::load(Box::new(MemoryStorage::new())));
        assert!(apply_command(&mut menu, Command::Quit, &settings));
        assert_eq!(menu.phase, GamePhase::Terminated);
    }

    #[test]
    fn test_first_ticks_fall_under_gravity() {
        let (settings, mut state, _) = playing_state(4);
        tick(&mut state, &TickInput::default(), &settings);
        assert_eq!(state.player.body.vel.y, 0.5);
        assert_eq!(state.player.body.pos.y, 400.5);
        assert_eq!(state.time_ticks, 1);
        assert_eq!(state.player.score, 0);
    }

    #[test]
    fn test_held_keys_set_velocity() {
        let (settings, mut state, _) = playing_state(5);
        let start_x = state.player.body.pos.x;
        let input = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut state, &input, &settings);
        assert_eq!(state.player.body.pos.x, start_x - 5.0);
        assert_eq!(state.player.body.vel.x, -4.5);
        assert!(!state.player.facing_right);

        let both = TickInput {
            left: true,
            right: true,
            shoot: false,
        };
        tick(&mut state, &both, &settings);
        assert_eq!(state.player.body.pos.x, start_x);
        assert!(state.player.facing_right);
    }

    #[test]
    fn test_wrap_lands_on_far_edge_same_tick() {
        let (settings, mut state, _) = playing_state(6);
        state.player.body.pos.x = 4.0;
        let input = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut state, &input, &settings);
        assert_eq!(state.player.body.pos.x, settings.screen_width);
    }

    #[test]
    fn test_landing_in_tick() {
        let (settings, mut state, _) = playing_state(7);
        state.platforms = vec![Platform::new(
            Vec2::new(350.0, 470.0),
            PlatformKind::Disappearing,
            &settings,
        )];
        state.player.body.pos.y = 410.0;
        state.player.body.vel.y = 4.0;

        tick(&mut state, &TickInput::default(), &settings);
        assert_eq!(state.player.body.vel.y, settings.jump_speed);
        assert!(state.player.jumping);
        assert!(state.events.contains(&GameEvent::Landed { platform: 0 }));
        // Disappearing platforms don't go anywhere
        assert!(state.platforms[0].visible);
    }

    #[test]
    fn test_shooting_in_tick() {
        let (settings, mut state, _) = playing_state(8);
        let shoot = TickInput {
            shoot: true,
            ..Default::default()
        };
        tick(&mut state, &shoot, &settings);
        assert_eq!(state.player.bullets.len(), 1);
        assert!(state.events.contains(&GameEvent::Shot));
        assert_eq!(state.player.shoot_cooldown, 29);

        tick(&mut state, &shoot, &settings);
        assert_eq!(state.player.bullets.len(), 1);
    }

    #[test]
    fn test_score_jump_spawns_two_enemies() {
        let (settings, mut state, _) = playing_state(9);
        state.player.score = 1900;
        state.player.body.pos.y = -4500.0;
        state.player.body.vel.y = -15.0;
        state.camera.y = -4800.0;

        tick(&mut state, &TickInput::default(), &settings);
        assert!(state.player.score >= 4500);
        assert_eq!(state.enemies.len(), 2);
        assert_eq!(state.director.threshold, 6000);
        assert_eq!(
            state
                .events
                .iter()
                .filter(|e| **e == GameEvent::EnemySpawned)
                .count(),
            2
        );
    }

    #[test]
    fn test_kill_awards_bonus() {
        let (settings, mut state, _) = playing_state(10);
        state.player.body.pos = Vec2::new(100.0, 400.0);
        let target = Enemy::new(Vec2::new(300.0, 420.0), 0.0, &settings);
        state.enemies.push(target);
        state.player.shoot(&settings);

        let mut killed = false;
        for _ in 0..20 {
            tick(&mut state, &TickInput::default(), &settings);
            if state.events.contains(&GameEvent::EnemyKilled) {
                killed = true;
                break;
            }
        }
        assert!(killed);
        assert_eq!(state.player.score, 100);
        assert!(!state.player.bullets[0].active);

        // Spent bullet and dead enemy are gone on the next tick
        tick(&mut state, &TickInput::default(), &settings);
        assert!(state.player.bullets.is_empty());
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.score, 100);
    }

    #[test]
    fn test_enemy_contact_ends_run_and_saves() {
        let (settings, mut state, storage) = playing_state(11);
        state.player.score = 750;
        let pos = state.player.body.pos + Vec2::new(10.0, 10.0);
        state.enemies.push(Enemy::new(pos, 0.0, &settings));

        tick(&mut state, &TickInput::default(), &settings);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.new_high_score);
        assert_eq!(state.best_score(), 750);
        assert_eq!(storage.contents().as_deref(), Some("{\"high_score\":750}"));
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::GameOver {
                cause: DeathCause::Caught,
                score: 750,
                new_high_score: true
            }
        )));

        // Frozen after game over
        let frozen = state.player.body.pos;
        tick(&mut state, &TickInput::default(), &settings);
        assert_eq!(state.player.body.pos, frozen);
    }

    #[test]
    fn test_game_over_restart_and_menu() {
        let (settings, mut state, _) = playing_state(12);
        state.platforms.clear();
        state.player.body.pos.y = 650.0;
        tick(&mut state, &TickInput::default(), &settings);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(!state.new_high_score);

        assert!(apply_command(&mut state, Command::Restart, &settings));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.body.pos, GameState::player_start(&settings));
        assert_eq!(state.camera.y, 0.0);
        assert_eq!(state.director.threshold, settings.enemy_score_step);
        assert_eq!(state.platforms.len(), settings.initial_platforms as usize);

        state.player.body.pos.y = 650.0;
        state.platforms.clear();
        tick(&mut state, &TickInput::default(), &settings);
        assert!(apply_command(&mut state, Command::Menu, &settings));
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_fall_records_score_to_file() {
        use crate::persistence::FileStorage;

        let path = std::env::temp_dir().join(format!(
            "sky_hop_session_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "{\"high_score\": 40}").unwrap();

        let settings = Settings::default();
        let scores = HighScore::load(Box::new(FileStorage::new(&path)));
        let mut state = GameState::new(&settings, 5, scores);
        assert_eq!(state.best_score(), 40);
        apply_command(&mut state, Command::Start, &settings);

        // Below the first platform band, nothing to catch the fall
        state.player.body.pos.y = 500.0;
        state.player.score = 90;
        let mut ticks = 0;
        while state.phase == GamePhase::Playing && ticks < 200 {
            tick(&mut state, &TickInput::default(), &settings);
            ticks += 1;
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.player.body.pos.y > state.camera.y + settings.screen_height);
        assert!(state.new_high_score);

        let reloaded = HighScore::load(Box::new(FileStorage::new(&path)));
        assert_eq!(reloaded.best(), 90);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let (settings, mut state1, _) = playing_state(99999);
        let (_, mut state2, _) = playing_state(99999);

        let inputs = [
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                shoot: true,
                ..Default::default()
            },
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..100 {
            for input in &inputs {
                tick(&mut state1, input, &settings);
                tick(&mut state2, input, &settings);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.platforms, state2.platforms);
        assert_eq!(state1.enemies, state2.enemies);
        assert_eq!(state1.phase, state2.phase);
    }
}
