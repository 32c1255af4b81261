use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use invaders::input::{Command, InputAdapter, Intents, FIRE_REARM_WINDOW, HOLD_WINDOW};

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
}

fn repeat(code: KeyCode) -> KeyEvent {
    KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Repeat)
}

fn release(code: KeyCode) -> KeyEvent {
    KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
}

/// Adapter for a terminal that only ever sends `Press`.
fn classic() -> InputAdapter {
    InputAdapter::new(false)
}

/// Adapter for a keyboard-enhancement terminal.
fn enhanced() -> InputAdapter {
    InputAdapter::new(true)
}

const SPACE: KeyCode = KeyCode::Char(' ');

// ── Fire ──────────────────────────────────────────────────────────────────────

#[test]
fn space_press_fires_once_while_held() {
    let mut input = classic();
    assert_eq!(input.handle(&press(SPACE), 10), Some(Command::Fire));
    // Classic terminals report auto-repeat as more presses.
    assert_eq!(input.handle(&press(SPACE), 12), None);
    assert_eq!(input.handle(&press(SPACE), 14), None);
}

#[test]
fn classic_hold_with_slow_first_repeat_fires_once() {
    // OS repeat delay of 30 frames (500 ms), then a repeat every 2 frames.
    let mut input = classic();
    let mut fires = 0;
    if input.handle(&press(SPACE), 1) == Some(Command::Fire) {
        fires += 1;
    }
    for frame in (31..60).step_by(2) {
        if input.handle(&press(SPACE), frame) == Some(Command::Fire) {
            fires += 1;
        }
    }
    assert_eq!(fires, 1);
}

#[test]
fn classic_fires_again_after_rearm_window() {
    let mut input = classic();
    input.handle(&press(SPACE), 10);
    assert_eq!(input.handle(&press(SPACE), 10 + FIRE_REARM_WINDOW), None);
    let later = 10 + 2 * FIRE_REARM_WINDOW + 1;
    assert_eq!(input.handle(&press(SPACE), later), Some(Command::Fire));
}

#[test]
fn space_fires_again_after_release() {
    let mut input = classic();
    input.handle(&press(SPACE), 10);
    input.handle(&release(SPACE), 11);
    assert_eq!(input.handle(&press(SPACE), 12), Some(Command::Fire));
}

#[test]
fn enhanced_needs_release_to_fire_again() {
    let mut input = enhanced();
    assert_eq!(input.handle(&press(SPACE), 1), Some(Command::Fire));
    input.handle(&repeat(SPACE), 31);
    // No amount of silence re-arms fire while space is down.
    assert_eq!(input.handle(&press(SPACE), 500), None);
    input.handle(&release(SPACE), 501);
    assert_eq!(input.handle(&press(SPACE), 502), Some(Command::Fire));
}

#[test]
fn repeat_events_never_fire() {
    let mut input = enhanced();
    assert_eq!(input.handle(&repeat(SPACE), 5), None);
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[test]
fn arrow_and_letter_keys_set_intents() {
    let mut input = classic();
    input.handle(&press(KeyCode::Left), 1);
    assert_eq!(input.intents(1), Intents { left: true, right: false });

    let mut input = classic();
    input.handle(&press(KeyCode::Char('d')), 1);
    assert_eq!(input.intents(1), Intents { left: false, right: true });

    let mut input = classic();
    input.handle(&press(KeyCode::Char('A')), 1);
    input.handle(&press(KeyCode::Right), 1);
    assert_eq!(input.intents(1), Intents { left: true, right: true });
}

#[test]
fn held_key_expires_without_repeats() {
    let mut input = classic();
    input.handle(&press(KeyCode::Right), 20);
    assert!(input.intents(20 + HOLD_WINDOW).right);
    assert!(!input.intents(20 + HOLD_WINDOW + 1).right);
}

#[test]
fn repeat_keeps_key_held() {
    let mut input = enhanced();
    input.handle(&press(KeyCode::Left), 0);
    input.handle(&repeat(KeyCode::Left), HOLD_WINDOW);
    assert!(input.intents(2 * HOLD_WINDOW).left);
}

#[test]
fn release_clears_intent() {
    let mut input = enhanced();
    input.handle(&press(KeyCode::Char('a')), 3);
    input.handle(&release(KeyCode::Char('a')), 4);
    assert_eq!(input.intents(4), Intents::default());
}

#[test]
fn reset_for_new_session_forgets_keys_and_rearms_fire() {
    let mut input = enhanced();
    input.handle(&press(KeyCode::Left), 300);
    input.handle(&press(SPACE), 300);
    input.reset();
    // The next session counts frames from zero again.
    assert_eq!(input.intents(1), Intents::default());
    assert_eq!(input.handle(&press(SPACE), 1), Some(Command::Fire));
}

// ── Session commands ─────────────────────────────────────────────────────────

#[test]
fn quit_keys() {
    let mut input = classic();
    assert_eq!(input.handle(&press(KeyCode::Char('q')), 0), Some(Command::Quit));
    assert_eq!(input.handle(&press(KeyCode::Esc), 0), Some(Command::Quit));
    let ctrl_c = KeyEvent::new_with_kind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press);
    assert_eq!(input.handle(&ctrl_c, 0), Some(Command::Quit));
    assert_eq!(input.handle(&press(KeyCode::Char('c')), 0), None);
}

#[test]
fn restart_key() {
    let mut input = classic();
    assert_eq!(input.handle(&press(KeyCode::Char('r')), 0), Some(Command::Restart));
    assert_eq!(input.handle(&release(KeyCode::Char('r')), 1), None);
}
