pub mod cue;
pub mod output;
pub mod tone;
