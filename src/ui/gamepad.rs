/// Gamepad input tracker using gilrs.
///
/// Button mapping comes from the `[gamepad]` table of config.toml.
/// Default mapping:
///   A / B / X / Y   →  Choices 1–4
///   Start           →  Exit
///
/// Like the keyboard, only fresh presses count.

#[cfg(feature = "gamepad")]
use gilrs::{Button, EventType, Gilrs};

use crate::config::BindingConfig;
use crate::ui::mapper::Signal;

/// Logical button identifiers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Btn {
    A,       // South
    B,       // East
    X,       // West
    Y,       // North
    L1,
    R1,
    Start,
    Select,
}

impl Btn {
    pub fn from_name(s: &str) -> Option<Btn> {
        match s.to_uppercase().as_str() {
            "A" | "SOUTH" => Some(Btn::A),
            "B" | "EAST" => Some(Btn::B),
            "X" | "WEST" => Some(Btn::X),
            "Y" | "NORTH" => Some(Btn::Y),
            "L1" | "LB" | "LEFTTRIGGER" => Some(Btn::L1),
            "R1" | "RB" | "RIGHTTRIGGER" => Some(Btn::R1),
            "START" => Some(Btn::Start),
            "SELECT" | "BACK" => Some(Btn::Select),
            _ => None,
        }
    }

    #[cfg(feature = "gamepad")]
    fn from_gilrs(btn: Button) -> Option<Btn> {
        match btn {
            Button::South => Some(Btn::A),
            Button::East => Some(Btn::B),
            Button::West => Some(Btn::X),
            Button::North => Some(Btn::Y),
            Button::LeftTrigger => Some(Btn::L1),
            Button::RightTrigger => Some(Btn::R1),
            Button::Start => Some(Btn::Start),
            Button::Select => Some(Btn::Select),
            _ => None,
        }
    }
}

/// Action-to-button mapping (loaded from config).
#[derive(Clone, Debug, PartialEq, Eq)]
struct ActionMap {
    choices: [Vec<Btn>; 4],
    exit: Vec<Btn>,
}

impl ActionMap {
    fn from_config(cfg: &BindingConfig) -> Self {
        fn parse_list(names: &[String]) -> Vec<Btn> {
            names.iter().filter_map(|s| Btn::from_name(s)).collect()
        }
        ActionMap {
            choices: [
                parse_list(&cfg.choices[0]),
                parse_list(&cfg.choices[1]),
                parse_list(&cfg.choices[2]),
                parse_list(&cfg.choices[3]),
            ],
            exit: parse_list(&cfg.exit),
        }
    }

    fn map(&self, btn: Btn) -> Option<Signal> {
        if self.exit.contains(&btn) {
            return Some(Signal::Exit);
        }
        self.choices
            .iter()
            .position(|b| b.contains(&btn))
            .map(|i| Signal::Choice(i as u8 + 1))
    }
}

pub struct GamepadState {
    #[cfg(feature = "gamepad")]
    gilrs: Option<Gilrs>,

    /// Buttons pressed during the most recent `update()`, in order.
    presses: Vec<Btn>,

    action_map: ActionMap,

    pub connected: bool,
}

impl GamepadState {
    pub fn new() -> Self {
        #[cfg(feature = "gamepad")]
        let (gilrs_opt, connected) = match Gilrs::new() {
            Ok(g) => {
                let has_pad = g.gamepads().next().is_some();
                (Some(g), has_pad)
            }
            Err(e) => {
                tracing::debug!(error = %e, "gamepad support unavailable");
                (None, false)
            }
        };
        #[cfg(not(feature = "gamepad"))]
        let connected = false;

        GamepadState {
            #[cfg(feature = "gamepad")]
            gilrs: gilrs_opt,
            presses: Vec::with_capacity(4),
            action_map: ActionMap::from_config(&BindingConfig::default_gamepad()),
            connected,
        }
    }

    /// Load button mapping from config. Empty lists keep the default.
    pub fn load_button_config(&mut self, cfg: &BindingConfig) {
        let loaded = ActionMap::from_config(cfg);
        let map = &mut self.action_map;
        for (slot, buttons) in map.choices.iter_mut().zip(loaded.choices) {
            if !buttons.is_empty() {
                *slot = buttons;
            }
        }
        if !loaded.exit.is_empty() {
            map.exit = loaded.exit;
        }
    }

    pub fn update(&mut self) {
        self.presses.clear();

        #[cfg(feature = "gamepad")]
        self.poll_gilrs(true);
    }

    /// Drop queued gamepad events without recording them.
    pub fn discard_pending(&mut self) {
        self.presses.clear();

        #[cfg(feature = "gamepad")]
        self.poll_gilrs(false);
    }

    #[cfg(feature = "gamepad")]
    fn poll_gilrs(&mut self, record: bool) {
        let gilrs = match &mut self.gilrs {
            Some(g) => g,
            None => return,
        };

        let events: Vec<_> = std::iter::from_fn(|| gilrs.next_event()).collect();

        for event in events {
            match event.event {
                EventType::ButtonPressed(btn, _) => {
                    self.connected = true;
                    if let (true, Some(b)) = (record, Btn::from_gilrs(btn)) {
                        self.presses.push(b);
                    }
                }
                EventType::Connected => {
                    self.connected = true;
                }
                EventType::Disconnected => {
                    self.connected = false;
                }
                _ => {}
            }
        }
    }

    /// First mapped press of this tick, if any.
    pub fn signal(&self) -> Option<Signal> {
        self.presses.iter().find_map(|&b| self.action_map.map(b))
    }
}
