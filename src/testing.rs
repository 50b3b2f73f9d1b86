/// Test doubles shared by the unit tests.

use std::time::Duration;

use crate::audio::output::{AudioOutput, Playback};
use crate::domain::cue::{CueId, CuePlayer};
use crate::domain::error::EngineError;
use crate::timing::Pacer;
use crate::ui::surface::{Style, Surface};

#[derive(Debug, Default)]
pub struct RecordingCues {
    pub played: Vec<CueId>,
}

impl CuePlayer for RecordingCues {
    fn play_cue(&mut self, cue: CueId) {
        self.played.push(cue);
    }
}

/// Records every requested wait instead of sleeping.
#[derive(Debug, Default)]
pub struct RecordingPacer {
    pub waits: Vec<Duration>,
}

impl RecordingPacer {
    pub fn total(&self) -> Duration {
        self.waits.iter().sum()
    }
}

impl Pacer for RecordingPacer {
    fn pause(&mut self, duration: Duration) {
        self.waits.push(duration);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Finish,
    Queue,
    Fail,
}

#[derive(Debug)]
pub struct RecordingOutput {
    mode: OutputMode,
    pub buffers: Vec<Vec<i16>>,
    pub attempts: usize,
}

impl RecordingOutput {
    fn with_mode(mode: OutputMode) -> Self {
        RecordingOutput { mode, buffers: Vec::new(), attempts: 0 }
    }

    /// Behaves like a blocking device.
    pub fn finishing() -> Self {
        Self::with_mode(OutputMode::Finish)
    }

    /// Behaves like a fire-and-forget device.
    pub fn queuing() -> Self {
        Self::with_mode(OutputMode::Queue)
    }

    /// Rejects every buffer.
    pub fn failing() -> Self {
        Self::with_mode(OutputMode::Fail)
    }
}

impl AudioOutput for RecordingOutput {
    fn submit(&mut self, pcm: Vec<i16>, _sample_rate: u32) -> Result<Playback, EngineError> {
        self.attempts += 1;
        match self.mode {
            OutputMode::Finish => {
                self.buffers.push(pcm);
                Ok(Playback::Finished)
            }
            OutputMode::Queue => {
                self.buffers.push(pcm);
                Ok(Playback::Queued)
            }
            OutputMode::Fail => Err(EngineError::AudioOutput("device unplugged".into())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOp {
    Clear,
    Write(String, Style),
    Flush,
}

/// In-memory surface that keeps an op log.
#[derive(Debug)]
pub struct MemorySurface {
    pub ops: Vec<SurfaceOp>,
    width: usize,
    fail_writes: bool,
}

impl MemorySurface {
    pub fn new(width: usize) -> Self {
        MemorySurface { ops: Vec::new(), width, fail_writes: false }
    }

    pub fn broken() -> Self {
        MemorySurface { fail_writes: true, ..Self::new(40) }
    }

    /// Everything written since the last clear.
    pub fn text(&self) -> String {
        let start = self.ops.iter().rposition(|op| *op == SurfaceOp::Clear).map_or(0, |i| i + 1);
        self.ops[start..]
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Write(s, _) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn styles_of(&self, needle: &str) -> Vec<Style> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Write(s, style) if s.contains(needle) => Some(*style),
                _ => None,
            })
            .collect()
    }
}

impl Surface for MemorySurface {
    fn clear(&mut self) -> Result<(), EngineError> {
        self.ops.push(SurfaceOp::Clear);
        Ok(())
    }

    fn write(&mut self, text: &str, style: Style) -> Result<(), EngineError> {
        if self.fail_writes {
            return Err(EngineError::SurfaceWriteFailure(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "surface gone",
            )));
        }
        self.ops.push(SurfaceOp::Write(text.to_string(), style));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), EngineError> {
        self.ops.push(SurfaceOp::Flush);
        Ok(())
    }

    fn width(&self) -> usize {
        self.width
    }
}
