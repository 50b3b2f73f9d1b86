/// Input mapper: edge-triggered presses → engine signals.
///
/// Four bindings map to choices 1–4, one more maps to exit. Anything else
/// is ignored. When several presses land in one tick, the earliest mapped
/// press wins; there is no chording.

use crossterm::event::KeyCode;

use crate::config::BindingConfig;
use crate::ui::gamepad::GamepadState;
use crate::ui::input::InputState;

/// Button shown next to each choice, in choice order.
pub const CHOICE_BUTTONS: [&str; 4] = ["A", "B", "X", "Y"];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Signal {
    /// 1-based choice index.
    Choice(u8),
    Exit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyMap {
    choices: [Vec<KeyCode>; 4],
    exit: Vec<KeyCode>,
}

impl KeyMap {
    pub fn from_config(cfg: &BindingConfig) -> Self {
        fn parse_list(names: &[String]) -> Vec<KeyCode> {
            names.iter().filter_map(|s| parse_key(s)).collect()
        }
        KeyMap {
            choices: [
                parse_list(&cfg.choices[0]),
                parse_list(&cfg.choices[1]),
                parse_list(&cfg.choices[2]),
                parse_list(&cfg.choices[3]),
            ],
            exit: parse_list(&cfg.exit),
        }
    }

    pub fn map(&self, code: KeyCode) -> Option<Signal> {
        let code = normalize(code);
        if self.exit.contains(&code) {
            return Some(Signal::Exit);
        }
        self.choices
            .iter()
            .position(|keys| keys.contains(&code))
            .map(|i| Signal::Choice(i as u8 + 1))
    }
}

/// Parse a key name from config: a single character, or one of
/// `Esc`, `Enter`, `Space`, `Tab`, `Backspace`, `F1`..`F12`.
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(normalize(KeyCode::Char(c)));
    }
    let upper = name.to_uppercase();
    match upper.as_str() {
        "ESC" | "ESCAPE" => Some(KeyCode::Esc),
        "ENTER" | "RETURN" => Some(KeyCode::Enter),
        "SPACE" => Some(KeyCode::Char(' ')),
        "TAB" => Some(KeyCode::Tab),
        "BACKSPACE" => Some(KeyCode::Backspace),
        _ => upper
            .strip_prefix('F')
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=12).contains(n))
            .map(KeyCode::F),
    }
}

/// Letters match regardless of shift state.
pub fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Resolve this tick's presses into at most one signal.
/// Ctrl+C always exits; the keyboard is consulted before the gamepad.
pub fn resolve(kb: &InputState, gp: &GamepadState, keys: &KeyMap) -> Option<Signal> {
    if kb.ctrl_c_pressed() {
        return Some(Signal::Exit);
    }
    kb.presses()
        .iter()
        .find_map(|&code| keys.map(code))
        .or_else(|| gp.signal())
}
