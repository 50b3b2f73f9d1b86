/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to defaults if the file is missing or incomplete. Problems
/// are collected as warnings so they can be logged once logging is up.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub timing: TimingConfig,
    pub audio: AudioConfig,
    pub keys: BindingConfig,
    pub gamepad: BindingConfig,
    pub log: LogConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimingConfig {
    pub tick_rate: Duration,
    pub reveal_char: Duration,
    pub dramatic_char: Duration,
    pub dramatic_hold: Duration,
    pub feedback_pause: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AudioConfig {
    pub enabled: bool,
    pub sample_rate: u32,
    pub volume: f32,
}

/// Names of the inputs bound to each choice and to exit.
/// Keyboard names for `[keys]`, gamepad button names for `[gamepad]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BindingConfig {
    pub choices: [Vec<String>; 4],
    pub exit: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    /// Empty disables logging.
    pub file: String,
    pub filter: String,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    timing: TomlTiming,
    #[serde(default)]
    audio: TomlAudio,
    #[serde(default)]
    keys: Option<TomlBindings>,
    #[serde(default)]
    gamepad: Option<TomlBindings>,
    #[serde(default)]
    log: TomlLog,
}

#[derive(Deserialize, Debug)]
struct TomlTiming {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
    #[serde(default = "default_reveal_char")]
    reveal_char_ms: u64,
    #[serde(default = "default_dramatic_char")]
    dramatic_char_ms: u64,
    #[serde(default = "default_dramatic_hold")]
    dramatic_hold_ms: u64,
    #[serde(default = "default_feedback_pause")]
    feedback_pause_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlAudio {
    #[serde(default = "default_true")]
    enabled: bool,
    #[serde(default = "default_sample_rate")]
    sample_rate: u32,
    #[serde(default = "default_volume")]
    volume: f32,
}

/// Missing lists are `None` and fall back to the defaults of whichever
/// device the table belongs to.
#[derive(Deserialize, Debug, Default)]
struct TomlBindings {
    choice_1: Option<Vec<String>>,
    choice_2: Option<Vec<String>>,
    choice_3: Option<Vec<String>>,
    choice_4: Option<Vec<String>>,
    exit: Option<Vec<String>>,
}

#[derive(Deserialize, Debug)]
struct TomlLog {
    #[serde(default)]
    file: String,
    #[serde(default = "default_filter")]
    filter: String,
}

// ── Defaults ──

fn default_tick_rate() -> u64 { 16 }          // ~60 Hz refresh
fn default_reveal_char() -> u64 { 30 }
fn default_dramatic_char() -> u64 { 45 }
fn default_dramatic_hold() -> u64 { 1000 }
fn default_feedback_pause() -> u64 { 1200 }
fn default_true() -> bool { true }
fn default_sample_rate() -> u32 { crate::audio::tone::SAMPLE_RATE }
fn default_volume() -> f32 { 0.3 }
fn default_filter() -> String { "info".into() }

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl BindingConfig {
    pub fn default_keys() -> Self {
        BindingConfig {
            choices: [names(&["1", "a"]), names(&["2", "b"]), names(&["3", "x"]), names(&["4", "y"])],
            exit: names(&["Esc", "q"]),
        }
    }

    pub fn default_gamepad() -> Self {
        BindingConfig {
            choices: [names(&["A"]), names(&["B"]), names(&["X"]), names(&["Y"])],
            exit: names(&["Start"]),
        }
    }

    fn merged(toml: Option<TomlBindings>, defaults: BindingConfig) -> Self {
        let Some(t) = toml else { return defaults };
        let [d1, d2, d3, d4] = defaults.choices;
        BindingConfig {
            choices: [
                t.choice_1.unwrap_or(d1),
                t.choice_2.unwrap_or(d2),
                t.choice_3.unwrap_or(d3),
                t.choice_4.unwrap_or(d4),
            ],
            exit: t.exit.unwrap_or(defaults.exit),
        }
    }
}

impl Default for TomlTiming {
    fn default() -> Self {
        TomlTiming {
            tick_rate_ms: default_tick_rate(),
            reveal_char_ms: default_reveal_char(),
            dramatic_char_ms: default_dramatic_char(),
            dramatic_hold_ms: default_dramatic_hold(),
            feedback_pause_ms: default_feedback_pause(),
        }
    }
}

impl Default for TomlAudio {
    fn default() -> Self {
        TomlAudio {
            enabled: true,
            sample_rate: default_sample_rate(),
            volume: default_volume(),
        }
    }
}

impl Default for TomlLog {
    fn default() -> Self {
        TomlLog {
            file: String::new(),
            filter: default_filter(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::from_toml(TomlConfig::default())
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Returns the config plus any warnings raised while reading it.
    pub fn load() -> (Self, Vec<String>) {
        let mut warnings = Vec::new();
        let toml_cfg = load_toml(&candidate_dirs(), &mut warnings);
        (GameConfig::from_toml(toml_cfg), warnings)
    }

    #[cfg(test)]
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<TomlConfig>(text).map(GameConfig::from_toml)
    }

    fn from_toml(t: TomlConfig) -> Self {
        let ms = Duration::from_millis;
        GameConfig {
            timing: TimingConfig {
                tick_rate: ms(t.timing.tick_rate_ms.max(1)),
                reveal_char: ms(t.timing.reveal_char_ms),
                dramatic_char: ms(t.timing.dramatic_char_ms),
                dramatic_hold: ms(t.timing.dramatic_hold_ms),
                feedback_pause: ms(t.timing.feedback_pause_ms),
            },
            audio: AudioConfig {
                enabled: t.audio.enabled,
                sample_rate: if t.audio.sample_rate == 0 {
                    default_sample_rate()
                } else {
                    t.audio.sample_rate
                },
                volume: t.audio.volume.clamp(0.0, 1.0),
            },
            keys: BindingConfig::merged(t.keys, BindingConfig::default_keys()),
            gamepad: BindingConfig::merged(t.gamepad, BindingConfig::default_gamepad()),
            log: LogConfig {
                file: t.log.file,
                filter: t.log.filter,
            },
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf], warnings: &mut Vec<String>) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        warnings.push(format!("{}: parse error, using defaults: {e}", path.display()));
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    warnings.push(format!("could not read {}: {e}", path.display()));
                }
            }
        }
    }
    TomlConfig::default()
}
