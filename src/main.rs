//! Sky Hop entry point
//!
//! Sets up the terminal, loads settings and the high score, then runs the
//! fixed-rate loop: poll input → apply commands → tick → draw.

use std::io::{self, BufWriter, Write, stdout};
use std::time::Duration;

use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, Event, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal,
};

use sky_hop::persistence::FileStorage;
use sky_hop::platform::{FrameClock, KeyAction, KeyTracker, RuntimeConfig, key_action};
use sky_hop::renderer::Renderer;
use sky_hop::sim::{Command, GamePhase, GameState, apply_command, tick};
use sky_hop::ui::{Menu, MenuAction};
use sky_hop::{HighScore, Settings};

fn main() -> io::Result<()> {
    // stdout belongs to the game screen, logs go to stderr
    env_logger::init();
    log::info!("Sky Hop starting...");

    let config = RuntimeConfig::from_env();
    let settings = match &config.settings_path {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    let high_score = HighScore::load(Box::new(FileStorage::new(&config.high_score_path)));
    log::info!(
        "Seed {}, best score {} ({})",
        config.seed,
        high_score.best(),
        config.high_score_path.display()
    );
    let mut state = GameState::new(&settings, config.seed, high_score);

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Key release events where the terminal supports them; the hold window covers the rest
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let result = run(&mut out, &mut state, &settings);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    log::info!("Sky Hop exiting, best score {}", state.best_score());
    result
}

fn run<W: Write>(out: &mut W, state: &mut GameState, settings: &Settings) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut renderer = Renderer::new(cols, rows);
    let mut menu = Menu::new();
    let mut keys = KeyTracker::new();
    let mut clock = FrameClock::new(settings.tick_duration());

    while state.phase != GamePhase::Terminated {
        // Drain input without overrunning the frame
        while event::poll(clock.remaining().max(Duration::from_millis(1)))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Release {
                        log::trace!("Key {:?}", key.code);
                    }
                    keys.record(&key);
                    match key_action(&key, state.phase) {
                        Some(KeyAction::Command(command)) => {
                            if apply_command(state, command, settings) {
                                // Space both restarts and shoots; don't fire on the first tick
                                keys.clear();
                            }
                        }
                        Some(KeyAction::Menu(input)) => {
                            let command = match menu.handle(input) {
                                Some(MenuAction::Start) => Some(Command::Start),
                                Some(MenuAction::Quit) => Some(Command::Quit),
                                None => None,
                            };
                            if let Some(command) = command {
                                if apply_command(state, command, settings) {
                                    keys.clear();
                                }
                            }
                        }
                        None => {}
                    }
                }
                Event::Resize(cols, rows) => renderer.resize(cols, rows),
                _ => {}
            }
            if state.phase == GamePhase::Terminated || clock.remaining().is_zero() {
                break;
            }
        }
        if state.phase == GamePhase::Terminated {
            break;
        }

        tick(state, &keys.input(), settings);
        for event in &state.events {
            log::debug!("{:?}", event);
        }
        keys.advance();

        renderer.draw(state, &menu, settings);
        renderer.present(out)?;
        clock.wait();
    }

    Ok(())
}
