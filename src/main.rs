/// Entry point and tick loop.

mod audio;
mod config;
mod domain;
mod session;
mod sim;
mod timing;
mod ui;

#[cfg(test)]
mod testing;

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use audio::cue::CueSequencer;
use audio::output::AudioOutput;
use config::{GameConfig, LogConfig};
use domain::cue::CuePlayer;
use domain::error::EngineError;
use domain::flags::StoryFlag;
use domain::scene::SceneStore;
use domain::transition::TransitionTable;
use session::Session;
use timing::{Pacer, SleepPacer};
use ui::gamepad::GamepadState;
use ui::input::InputState;
use ui::mapper::{self, KeyMap, Signal};
use ui::renderer::Presenter;
use ui::surface::TermSurface;
use ui::terminal::Terminal;

fn main() {
    let (config, warnings) = GameConfig::load();

    if init_logging(&config.log) {
        for w in &warnings {
            warn!("{w}");
        }
    } else {
        for w in &warnings {
            eprintln!("Warning: {w}");
        }
    }

    let store = SceneStore::new();
    let table = TransitionTable::story();
    if let Err(e) = table.validate(&store) {
        eprintln!("Story table is broken: {e}");
        return;
    }

    let (mut terminal, mut primary, mut secondary) = match Terminal::init() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Terminal init failed: {e}");
            return;
        }
    };

    let output: Box<dyn AudioOutput> = if config.audio.enabled {
        audio::output::open_default()
    } else {
        Box::new(audio::output::SilentOutput)
    };
    let cues = CueSequencer::new(output, SleepPacer, &config.audio);
    let presenter = Presenter::new(SleepPacer, config.timing);
    let mut session = Session::new(&store, &table, cues, presenter);

    info!("session started");
    let result = game_loop(&mut session, &mut primary, &mut secondary, &config);

    if let Err(e) = terminal.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        tracing::error!(error = %e, "session ended with an error");
        eprintln!("Game error: {e}");
    }

    let flags = session.state().flags;
    info!(milestones = flags.count(), "session over");

    println!();
    println!("Thanks for playing Monolith.");
    println!("Milestones reached: {}/{}", flags.count(), StoryFlag::ALL.len());
}

/// Log to the configured file. The terminal belongs to the surfaces, so
/// with no file configured nothing is logged.
fn init_logging(cfg: &LogConfig) -> bool {
    if cfg.file.is_empty() {
        return false;
    }
    let file = match OpenOptions::new().create(true).append(true).open(&cfg.file) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: could not open log file {}: {e}", cfg.file);
            return false;
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    true
}

fn game_loop<C: CuePlayer, P: Pacer>(
    session: &mut Session<'_, C, P>,
    primary: &mut TermSurface,
    secondary: &mut TermSurface,
    config: &GameConfig,
) -> Result<(), EngineError> {
    let keys = KeyMap::from_config(&config.keys);
    let mut kb = InputState::new();
    let mut gp = GamepadState::new();
    gp.load_button_config(&config.gamepad);
    if gp.connected {
        info!("gamepad connected");
    }

    session.open(primary, secondary)?;
    kb.discard_pending();
    gp.discard_pending();

    loop {
        kb.drain_events();
        gp.update();

        match mapper::resolve(&kb, &gp, &keys) {
            Some(Signal::Exit) => break,
            Some(Signal::Choice(choice)) => {
                session.choose(choice, primary, secondary)?;
                // Presses made during the reveal or cue are dropped.
                kb.discard_pending();
                gp.discard_pending();
            }
            None => {}
        }

        std::thread::sleep(config.timing.tick_rate);
    }

    Ok(())
}
