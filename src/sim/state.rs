//! Game state and core simulation types
//!
//! Everything a session owns lives here: the player (and their bullets), the
//! platform column, enemies, camera, spawn threshold and the seeded RNG.

use glam::Vec2;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::body::{Aabb, KinematicBody, at_horizontal_bound};
use super::camera::Camera;
use super::director::SpawnDirector;
use super::generator;
use crate::highscores::HighScore;
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Main menu, nothing simulates
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart or menu
    GameOver,
    /// Player asked to quit
    Terminated,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    /// Dropped a full screen below the camera
    Fell,
    /// Touched a live enemy
    Caught,
}

/// Things that happened during the last tick or command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    SessionStarted,
    /// Player bounced off the platform at this index
    Landed { platform: usize },
    Shot,
    EnemySpawned,
    EnemyKilled,
    GameOver {
        cause: DeathCause,
        score: u64,
        new_high_score: bool,
    },
}

/// Platform variants. Only colour and movement differ; all of them land the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlatformKind {
    #[default]
    Normal,
    Disappearing,
    Moving,
}

impl PlatformKind {
    pub const ALL: [PlatformKind; 3] = [
        PlatformKind::Normal,
        PlatformKind::Disappearing,
        PlatformKind::Moving,
    ];

    /// Uniform pick among all variants
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        *Self::ALL.choose(rng).unwrap_or(&PlatformKind::Normal)
    }
}

/// A platform the player can bounce on
#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    pub pos: Vec2,
    pub size: Vec2,
    kind: PlatformKind,
    pub visible: bool,
    /// +1 moving right, -1 moving left (moving platforms only)
    pub move_direction: f32,
    pub move_speed: f32,
}

impl Platform {
    pub fn new(pos: Vec2, kind: PlatformKind, settings: &Settings) -> Self {
        Self {
            pos,
            size: Vec2::new(settings.platform_width, settings.platform_height),
            kind,
            visible: true,
            move_direction: 1.0,
            move_speed: settings.moving_platform_speed,
        }
    }

    pub fn kind(&self) -> PlatformKind {
        self.kind
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Slide moving platforms, reversing at the screen edges
    pub fn update(&mut self, screen_width: f32) {
        if self.kind == PlatformKind::Moving {
            self.pos.x += self.move_speed * self.move_direction;
            if at_horizontal_bound(self.pos.x, self.size.x, screen_width) {
                self.move_direction = -self.move_direction;
            }
        }
    }
}

/// A player projectile. Flies horizontally until it leaves the screen or hits.
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub body: KinematicBody,
    pub active: bool,
}

impl Bullet {
    pub fn new(pos: Vec2, direction: f32, settings: &Settings) -> Self {
        let size = Vec2::splat(settings.bullet_size);
        Self {
            body: KinematicBody::new(pos, size)
                .with_velocity(Vec2::new(settings.bullet_speed * direction, 0.0)),
            active: true,
        }
    }

    pub fn update(&mut self, screen_width: f32) {
        if !self.active {
            return;
        }
        self.body.integrate();
        if self.body.pos.x < 0.0 || self.body.pos.x > screen_width {
            self.active = false;
        }
    }
}

/// A wandering enemy. One touch ends the run.
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub body: KinematicBody,
    pub alive: bool,
}

impl Enemy {
    pub fn new(pos: Vec2, vel_x: f32, settings: &Settings) -> Self {
        let size = Vec2::new(settings.enemy_width, settings.enemy_height);
        Self {
            body: KinematicBody::new(pos, size).with_velocity(Vec2::new(vel_x, 0.0)),
            alive: true,
        }
    }

    pub fn update(&mut self, screen_width: f32) {
        if !self.alive {
            return;
        }
        self.body.integrate();
        self.body.bounce_horizontal(screen_width);
    }

    pub fn facing_right(&self) -> bool {
        self.body.vel.x >= 0.0
    }
}

/// The player character
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub body: KinematicBody,
    /// Best altitude reached plus kill bonuses
    pub score: u64,
    pub jumping: bool,
    pub facing_right: bool,
    /// Ticks until the next shot is allowed (0 = ready)
    pub shoot_cooldown: u32,
    /// Live bullets, oldest first
    pub bullets: Vec<Bullet>,
}

impl Player {
    pub fn new(pos: Vec2, settings: &Settings) -> Self {
        Self {
            body: KinematicBody::new(
                pos,
                Vec2::new(settings.player_width, settings.player_height),
            ),
            score: 0,
            jumping: false,
            facing_right: true,
            shoot_cooldown: 0,
            bullets: Vec::new(),
        }
    }

    /// Fire from the leading edge if the cooldown has expired
    pub fn shoot(&mut self, settings: &Settings) -> bool {
        if self.shoot_cooldown != 0 {
            return false;
        }

        let direction = if self.facing_right { 1.0 } else { -1.0 };
        let x = if self.facing_right {
            self.body.pos.x + self.body.size.x
        } else {
            self.body.pos.x
        };
        let y = self.body.pos.y + (self.body.size.y / 2.0).floor();

        self.bullets
            .push(Bullet::new(Vec2::new(x, y), direction, settings));
        self.shoot_cooldown = settings.shoot_cooldown_ticks;
        true
    }

    /// Move bullets, drop the dead ones and tick the cooldown
    pub fn update_bullets(&mut self, screen_width: f32) {
        let mut survivors = Vec::with_capacity(self.bullets.len());
        for mut bullet in self.bullets.drain(..) {
            bullet.update(screen_width);
            if bullet.active {
                survivors.push(bullet);
            }
        }
        self.bullets = survivors;

        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
    }

    /// Gravity, facing, integration and friction. Landing and wrap happen after.
    pub fn integrate(&mut self, settings: &Settings) {
        self.body.apply_gravity(settings.gravity);

        if self.body.vel.x > 0.0 {
            self.facing_right = true;
        } else if self.body.vel.x < 0.0 {
            self.facing_right = false;
        }

        self.body.integrate();
        self.body.apply_friction(settings.friction);
    }
}

/// Complete session state
#[derive(Debug)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub player: Player,
    /// Platforms, bottom to top
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub camera: Camera,
    pub director: SpawnDirector,
    pub high_score: HighScore,
    /// Set when the last run beat the stored best
    pub new_high_score: bool,
    /// Ticks simulated in the current run
    pub time_ticks: u64,
    /// Events from the most recent tick or command
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session sitting in the main menu
    pub fn new(settings: &Settings, seed: u64, high_score: HighScore) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let platforms = generator::seed_platforms(&mut rng, settings);

        Self {
            seed,
            rng,
            phase: GamePhase::Menu,
            player: Player::new(Self::player_start(settings), settings),
            platforms,
            enemies: Vec::new(),
            camera: Camera::default(),
            director: SpawnDirector::new(settings),
            high_score,
            new_high_score: false,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Where the player appears at the start of a run
    pub fn player_start(settings: &Settings) -> Vec2 {
        Vec2::new(
            (settings.screen_width / 2.0).floor() - (settings.player_width / 2.0).floor(),
            settings.screen_height - settings.player_start_offset,
        )
    }

    /// Throw away the current run and lay out a fresh one
    pub fn reset(&mut self, settings: &Settings) {
        self.player = Player::new(Self::player_start(settings), settings);
        self.platforms = generator::seed_platforms(&mut self.rng, settings);
        self.enemies.clear();
        self.camera = Camera::default();
        self.director = SpawnDirector::new(settings);
        self.new_high_score = false;
        self.time_ticks = 0;
        self.events.clear();
    }

    /// Topmost platform y (smallest), if any platform exists
    pub fn topmost_platform_y(&self) -> Option<f32> {
        generator::topmost_y(&self.platforms)
    }

    pub fn best_score(&self) -> u64 {
        self.high_score.best()
    }
}
