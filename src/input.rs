/// Keyboard → intent translation.
///
/// Input model: instead of acting on each key event individually, the adapter
/// keeps a `key_frame` map recording the frame of the last press/repeat event
/// for every key. A key is "held" while that frame is within `HOLD_WINDOW`,
/// or until a release event removes it.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`). Keys expire after `HOLD_WINDOW` frames of silence.
///
/// Fire has its own re-arm rule: a release on the first class, and
/// `FIRE_REARM_WINDOW` frames of silence on the second.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// At 60 ticks/s, 8 frames ≈ 133 ms, shorter than any OS repeat interval.
pub const HOLD_WINDOW: u64 = 8;

/// Silence on space needed before fire re-arms on a classic terminal. Longer
/// than the usual OS delay before the first auto-repeat (250-500 ms).
pub const FIRE_REARM_WINDOW: u64 = 40;

/// Held-key state the simulation reads every tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intents {
    pub left: bool,
    pub right: bool,
}

/// One-shot actions produced by a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Fire,
    Quit,
    Restart,
}

#[derive(Debug, Default)]
pub struct InputAdapter {
    key_frame: HashMap<KeyCode, u64>,
    /// The terminal reports key releases.
    release_events: bool,
    /// Frame space was last pressed or repeated; `None` once fire is re-armed.
    fire_seen: Option<u64>,
}

impl InputAdapter {
    pub fn new(release_events: bool) -> Self {
        InputAdapter {
            release_events,
            ..InputAdapter::default()
        }
    }

    /// With release events only a release re-arms fire; otherwise a gap of
    /// `FIRE_REARM_WINDOW` frames without press or repeat does.
    fn fire_armed(&self, frame: u64) -> bool {
        match self.fire_seen {
            None => true,
            Some(_) if self.release_events => false,
            Some(last) => frame.saturating_sub(last) > FIRE_REARM_WINDOW,
        }
    }

    fn is_held(&self, key: &KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    /// Record a key event. Fire is edge-triggered: a press only fires when
    /// fire is armed, so auto-repeat during one hold never fires twice.
    pub fn handle(&mut self, event: &KeyEvent, frame: u64) -> Option<Command> {
        match event.kind {
            KeyEventKind::Press => {
                self.key_frame.insert(event.code, frame);
                match event.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
                    KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                        Some(Command::Quit)
                    }
                    KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
                    KeyCode::Char(' ') => {
                        let armed = self.fire_armed(frame);
                        self.fire_seen = Some(frame);
                        armed.then_some(Command::Fire)
                    }
                    _ => None,
                }
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(event.code, frame);
                if event.code == KeyCode::Char(' ') {
                    self.fire_seen = Some(frame);
                }
                None
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&event.code);
                if event.code == KeyCode::Char(' ') {
                    self.fire_seen = None;
                }
                None
            }
        }
    }

    pub fn intents(&self, frame: u64) -> Intents {
        let any = |keys: &[KeyCode]| keys.iter().any(|k| self.is_held(k, frame));
        Intents {
            left: any(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
            right: any(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
        }
    }

    /// Forget every held key, e.g. when a new session restarts the frame count.
    pub fn reset(&mut self) {
        self.key_frame.clear();
        self.fire_seen = None;
    }
}
