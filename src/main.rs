mod display;

use std::env;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use log::{error, info, LevelFilter};
use rand::thread_rng;

use invaders::compute::{init_state, invaders_ready, player_fire, player_ready, render, tick};
use invaders::config::{GameConfig, DEFAULT_CONFIG_FILE};
use invaders::constants::{PLAYER_NATURAL_HEIGHT, PLAYER_NATURAL_WIDTH};
use invaders::entities::GameEvent;
use invaders::error::GameResult;
use invaders::input::{Command, InputAdapter};

use display::{Hud, TerminalSurface};

const LOG_FILE: &str = "invaders.log";

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Play one session. Returns `true` → quit program, `false` → start over.
///
/// The simulation stops ticking once the game halts, but the loop keeps
/// drawing the frozen field and the result until the player quits or
/// restarts.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    input: &mut InputAdapter,
    config: &GameConfig,
) -> GameResult<bool> {
    let mut rng = thread_rng();
    let frame_len = Duration::from_millis(config.tick_ms);

    let mut state = init_state(config.clone(), &mut rng);
    // Sprites are built in, so both are measured before the first tick.
    state = player_ready(&state, PLAYER_NATURAL_WIDTH, PLAYER_NATURAL_HEIGHT);
    state = invaders_ready(&state);

    let (cols, rows) = terminal::size()?;
    let mut surface = TerminalSurface::new(cols, rows, config.field_width, config.field_height);
    // Frames restart at zero; keys held into the last session must not linger.
    input.reset();
    let mut hud = Hud::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(key) => match input.handle(&key, frame) {
                    Some(Command::Quit) => return Ok(true),
                    Some(Command::Restart) if state.status.is_over() => return Ok(false),
                    Some(Command::Fire) => state = player_fire(&state),
                    _ => {}
                },
                Event::Resize(cols, rows) => surface.resize(cols, rows),
                _ => {}
            }
        }

        state = tick(&state, input.intents(frame), &mut rng);

        for event in &state.events {
            match event {
                GameEvent::ScoreChanged(score) => hud.show_score(*score),
                GameEvent::Finished(status) => {
                    if let Some(text) = status.result_text() {
                        hud.show_result(text);
                    }
                }
                GameEvent::WaveSpawned { .. } => {}
            }
        }

        render(&state, &mut surface);
        surface.present(out, &hud)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_len {
            thread::sleep(frame_len - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn config_path() -> PathBuf {
    env::var("INVADERS_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE))
}

fn main() -> GameResult<()> {
    let level = if env::var_os("INVADERS_DEBUG").is_some() {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    simple_logging::log_to_file(LOG_FILE, level)?;

    let config = GameConfig::load_or_default(&config_path());

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    info!("Terminal ready (keyboard enhancement: {})", keyboard_enhanced);

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(e) => {
                error!("Failed to read terminal event: {}", e);
                break;
            }
        }
    });

    let mut input = InputAdapter::new(keyboard_enhanced);
    let result = run(&mut out, &rx, &mut input, &config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        error!("{}", e);
    }
    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    input: &mut InputAdapter,
    config: &GameConfig,
) -> GameResult<()> {
    loop {
        let quit = game_loop(out, rx, input, config)?;
        if quit {
            info!("Quit requested");
            break;
        }
        info!("Starting a new session");
    }
    Ok(())
}
