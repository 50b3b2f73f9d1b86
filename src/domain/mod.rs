pub mod cue;
pub mod error;
pub mod flags;
pub mod scene;
pub mod transition;
