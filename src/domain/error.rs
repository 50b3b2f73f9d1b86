/// Engine error taxonomy.
///
/// `OutOfRange`, `UnmappedChoice` and the table-validation variants are
/// programmer errors: a well-formed story table never produces them at
/// runtime. Audio variants are recoverable (the cue is skipped). Surface
/// failures end the session, since the surfaces are the only output.

use thiserror::Error;

use crate::domain::scene::SceneId;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("scene id {0} is out of range")]
    OutOfRange(usize),

    #[error("no transition for scene {scene}, choice {choice}")]
    UnmappedChoice { scene: SceneId, choice: u8 },

    #[error("duplicate transition for scene {scene}, choice {choice}")]
    DuplicateTransition { scene: SceneId, choice: u8 },

    #[error("scene {0} cannot be reached from the opening scene")]
    UnreachableScene(SceneId),

    #[error("terminal scene {scene} has a transition to scene {to}")]
    TerminalEscape { scene: SceneId, to: SceneId },

    #[error("could not allocate {samples} samples for tone")]
    AudioAllocationFailure { samples: usize },

    #[error("audio output failed: {0}")]
    AudioOutput(String),

    #[error("surface write failed: {0}")]
    SurfaceWriteFailure(#[from] std::io::Error),
}
