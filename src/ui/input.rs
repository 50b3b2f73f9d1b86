/// Keyboard input tracker.
///
/// Only the "pressed this tick" edge matters: key repeats and releases are
/// not presses. Presses are kept in arrival order so the mapper can take
/// the earliest one.
///
/// Anything typed while a reveal or cue was running is thrown away with
/// `discard_pending()` before the next poll.

use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub struct InputState {
    /// Keys pressed during the most recent `drain_events()`, in order.
    presses: Vec<KeyCode>,

    /// Raw key events collected during drain, for Ctrl+C detection.
    raw_events: Vec<KeyEvent>,
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            presses: Vec::with_capacity(8),
            raw_events: Vec::with_capacity(8),
        }
    }

    /// Drain all pending terminal events. Call once per tick.
    pub fn drain_events(&mut self) {
        self.presses.clear();
        self.raw_events.clear();

        while poll(Duration::ZERO).unwrap_or(false) {
            if let Ok(Event::Key(key)) = event::read() {
                self.record(key);
            }
        }
    }

    /// Drop everything queued so far without recording it.
    pub fn discard_pending(&mut self) {
        self.presses.clear();
        self.raw_events.clear();
        while poll(Duration::ZERO).unwrap_or(false) {
            let _ = event::read();
        }
    }

    fn record(&mut self, key: KeyEvent) {
        self.raw_events.push(key);
        if key.kind == KeyEventKind::Press {
            self.presses.push(key.code);
        }
    }

    pub fn presses(&self) -> &[KeyCode] {
        &self.presses
    }

    pub fn ctrl_c_pressed(&self) -> bool {
        self.raw_events.iter().any(|k| {
            k.modifiers.contains(KeyModifiers::CONTROL)
                && (k.code == KeyCode::Char('c') || k.code == KeyCode::Char('C'))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent { code, modifiers, kind, state: KeyEventState::NONE }
    }

    #[test]
    fn only_press_edges_count() {
        let mut kb = InputState::new();
        kb.record(key(KeyCode::Char('1'), KeyEventKind::Press, KeyModifiers::NONE));
        kb.record(key(KeyCode::Char('1'), KeyEventKind::Repeat, KeyModifiers::NONE));
        kb.record(key(KeyCode::Char('1'), KeyEventKind::Release, KeyModifiers::NONE));
        kb.record(key(KeyCode::Char('2'), KeyEventKind::Press, KeyModifiers::NONE));
        assert_eq!(kb.presses(), &[KeyCode::Char('1'), KeyCode::Char('2')]);
        assert!(!kb.ctrl_c_pressed());
    }

    #[test]
    fn ctrl_c_is_detected() {
        let mut kb = InputState::new();
        kb.record(key(KeyCode::Char('c'), KeyEventKind::Press, KeyModifiers::CONTROL));
        assert!(kb.ctrl_c_pressed());
    }
}
