//! Platform abstraction layer
//!
//! Handles the terminal side of things:
//! - Runtime environment (file paths, seed)
//! - Input events → held controls and session commands
//! - Frame pacing

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::{Command, GamePhase, TickInput};
use crate::ui::{MenuAction, MenuInput};

// Runtime constants (not gameplay tuning).

pub const DEFAULT_HIGH_SCORE_FILE: &str = "high_score.json";

/// A key counts as held if it was pressed or repeated within this many ticks.
/// Covers terminals that never report key releases: OS key repeat fires well
/// inside this window while a key is down.
pub const HOLD_WINDOW_TICKS: u64 = 8;

/// Where things live and how the RNG is seeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub settings_path: Option<PathBuf>,
    pub high_score_path: PathBuf,
    pub seed: u64,
}

impl RuntimeConfig {
    /// Read `SKYHOP_SETTINGS`, `SKYHOP_HIGH_SCORE_FILE` and `SKYHOP_SEED`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let settings_path = lookup("SKYHOP_SETTINGS")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let high_score_path = lookup("SKYHOP_HIGH_SCORE_FILE")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HIGH_SCORE_FILE));
        let seed = lookup("SKYHOP_SEED")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or_else(clock_seed);

        Self {
            settings_path,
            high_score_path,
            seed,
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// What a key press means in the current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Command(Command),
    Menu(MenuInput),
}

/// Map a key press to a discrete action. Held movement keys go through
/// [`KeyTracker`] instead.
pub fn key_action(key: &KeyEvent, phase: GamePhase) -> Option<KeyAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
    if key.code == KeyCode::Esc || ctrl_c {
        return Some(KeyAction::Command(Command::Quit));
    }

    match phase {
        GamePhase::Menu => match key.code {
            KeyCode::Up | KeyCode::Char('w') => Some(KeyAction::Menu(MenuInput::Up)),
            KeyCode::Down => Some(KeyAction::Menu(MenuInput::Down)),
            KeyCode::Char('s') => Some(KeyAction::Menu(MenuInput::Choose(MenuAction::Start))),
            KeyCode::Enter | KeyCode::Char(' ') => Some(KeyAction::Menu(MenuInput::Confirm)),
            KeyCode::Char('q') => Some(KeyAction::Menu(MenuInput::Choose(MenuAction::Quit))),
            _ => None,
        },
        GamePhase::GameOver => match key.code {
            KeyCode::Char(' ') => Some(KeyAction::Command(Command::Restart)),
            KeyCode::Char('m') | KeyCode::Char('M') => Some(KeyAction::Command(Command::Menu)),
            _ => None,
        },
        GamePhase::Playing | GamePhase::Terminated => None,
    }
}

/// Tracks which keys are currently held, tick by tick
#[derive(Debug, Default)]
pub struct KeyTracker {
    last_seen: HashMap<KeyCode, u64>,
    tick: u64,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key event (press/repeat refresh, release forgets)
    pub fn record(&mut self, key: &KeyEvent) {
        let code = normalize(key.code);
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.last_seen.insert(code, self.tick);
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&code);
            }
        }
    }

    fn is_held(&self, code: KeyCode) -> bool {
        self.last_seen
            .get(&code)
            .map(|&last| self.tick.saturating_sub(last) <= HOLD_WINDOW_TICKS)
            .unwrap_or(false)
    }

    /// Controls held right now
    pub fn input(&self) -> TickInput {
        TickInput {
            left: self.is_held(KeyCode::Left) || self.is_held(KeyCode::Char('a')),
            right: self.is_held(KeyCode::Right) || self.is_held(KeyCode::Char('d')),
            shoot: self.is_held(KeyCode::Char(' ')),
        }
    }

    /// Advance one tick and forget keys that went quiet
    pub fn advance(&mut self) {
        self.tick += 1;
        let tick = self.tick;
        self.last_seen
            .retain(|_, last| tick.saturating_sub(*last) <= HOLD_WINDOW_TICKS);
    }

    pub fn clear(&mut self) {
        self.last_seen.clear();
    }
}

fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Fixed-rate pacing for the main loop
#[derive(Debug)]
pub struct FrameClock {
    period: Duration,
    frame_start: Instant,
}

impl FrameClock {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            frame_start: Instant::now(),
        }
    }

    /// Sleep off whatever is left of the current frame, then start the next
    pub fn wait(&mut self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.period {
            std::thread::sleep(self.period - elapsed);
        }
        self.frame_start = Instant::now();
    }

    /// Time left in the current frame
    pub fn remaining(&self) -> Duration {
        self.period.saturating_sub(self.frame_start.elapsed())
    }
}
