/// Cue sequencer: turns a `CueId` into timed tone steps.
///
/// Each cue is a short list of (frequency, duration) steps separated by a
/// fixed, cue-specific silence. A step that cannot be synthesized or
/// played ends the cue early; the story carries on without it.

use std::time::Duration;

use tracing::{debug, warn};

use crate::audio::output::{AudioOutput, Playback};
use crate::audio::tone::synthesize;
use crate::config::AudioConfig;
use crate::domain::cue::{CueId, CuePlayer};
use crate::domain::error::EngineError;
use crate::timing::Pacer;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub freq_hz: f32,
    pub duration_ms: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct CuePattern {
    pub steps: &'static [Step],
    pub gap_ms: u32,
}

impl CuePattern {
    /// Wall time of the whole cue, gaps included.
    #[cfg(test)]
    pub fn total_ms(&self) -> u32 {
        let tones: u32 = self.steps.iter().map(|s| s.duration_ms).sum();
        let gaps = self.gap_ms * self.steps.len().saturating_sub(1) as u32;
        tones + gaps
    }
}

const fn step(freq_hz: f32, duration_ms: u32) -> Step {
    Step { freq_hz, duration_ms }
}

// E5 → C5 → A4: falling, awed.
static DISCOVERY: CuePattern = CuePattern {
    steps: &[step(659.25, 220), step(523.25, 220), step(440.0, 420)],
    gap_ms: 80,
};

// C5 → G5: a bright upward hop.
static TOOL_ACQUIRED: CuePattern = CuePattern {
    steps: &[step(523.25, 140), step(783.99, 260)],
    gap_ms: 50,
};

// Tritone and minor second clashes.
static CONFLICT: CuePattern = CuePattern {
    steps: &[step(220.0, 180), step(311.13, 180), step(233.08, 320)],
    gap_ms: 60,
};

// C4 → G4 → C5, then a long held C6.
static TRANSFORMATION: CuePattern = CuePattern {
    steps: &[step(261.63, 200), step(392.0, 200), step(523.25, 200), step(1046.5, 900)],
    gap_ms: 100,
};

// Three level A5 pulses resolving down to D5.
static AI_DIALOGUE: CuePattern = CuePattern {
    steps: &[step(880.0, 110), step(880.0, 110), step(880.0, 110), step(587.33, 400)],
    gap_ms: 70,
};

pub fn pattern(cue: CueId) -> &'static CuePattern {
    match cue {
        CueId::Discovery => &DISCOVERY,
        CueId::ToolAcquired => &TOOL_ACQUIRED,
        CueId::Conflict => &CONFLICT,
        CueId::Transformation => &TRANSFORMATION,
        CueId::AiDialogue => &AI_DIALOGUE,
    }
}

pub struct CueSequencer<O: AudioOutput, P: Pacer> {
    output: O,
    pacer: P,
    sample_rate: u32,
    volume: f32,
    enabled: bool,
}

impl<O: AudioOutput, P: Pacer> CueSequencer<O, P> {
    pub fn new(output: O, pacer: P, config: &AudioConfig) -> Self {
        CueSequencer {
            output,
            pacer,
            sample_rate: config.sample_rate,
            volume: config.volume,
            enabled: config.enabled,
        }
    }

    fn try_play(&mut self, pattern: &CuePattern) -> Result<(), EngineError> {
        for (i, s) in pattern.steps.iter().enumerate() {
            if i > 0 {
                self.pacer.pause(Duration::from_millis(pattern.gap_ms as u64));
            }
            let pcm = synthesize(s.freq_hz, s.duration_ms, self.sample_rate, self.volume)?;
            match self.output.submit(pcm, self.sample_rate)? {
                Playback::Finished => {}
                Playback::Queued => self.pacer.pause(Duration::from_millis(s.duration_ms as u64)),
            }
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn parts(&self) -> (&O, &P) {
        (&self.output, &self.pacer)
    }
}

impl<O: AudioOutput, P: Pacer> CuePlayer for CueSequencer<O, P> {
    fn play_cue(&mut self, cue: CueId) {
        if !self.enabled {
            return;
        }
        debug!(?cue, "playing cue");
        if let Err(e) = self.try_play(pattern(cue)) {
            warn!(?cue, error = %e, "cue skipped");
        }
    }
}
