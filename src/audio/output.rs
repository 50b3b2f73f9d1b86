/// Audio output: where synthesized PCM goes.
///
/// With the "sound" feature, `RodioOutput` plays each buffer on a fresh
/// rodio `Sink` and blocks until it has drained. Without it (or when no
/// device opens) `SilentOutput` accepts the buffer and reports it as queued,
/// so the sequencer still waits out the step duration.

use crate::domain::error::EngineError;

/// How a submitted buffer was handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Playback {
    /// The output blocked until playback finished.
    Finished,
    /// The output returned immediately; the caller paces the duration.
    Queued,
}

pub trait AudioOutput {
    /// Take ownership of a mono 16-bit buffer and play it once.
    fn submit(&mut self, pcm: Vec<i16>, sample_rate: u32) -> Result<Playback, EngineError>;
}

impl<O: AudioOutput + ?Sized> AudioOutput for Box<O> {
    fn submit(&mut self, pcm: Vec<i16>, sample_rate: u32) -> Result<Playback, EngineError> {
        (**self).submit(pcm, sample_rate)
    }
}

#[derive(Debug, Default)]
pub struct SilentOutput;

impl AudioOutput for SilentOutput {
    fn submit(&mut self, _pcm: Vec<i16>, _sample_rate: u32) -> Result<Playback, EngineError> {
        Ok(Playback::Queued)
    }
}

#[cfg(feature = "sound")]
mod inner {
    use rodio::buffer::SamplesBuffer;
    use rodio::{OutputStream, OutputStreamHandle, Sink};

    use super::{AudioOutput, Playback};
    use crate::domain::error::EngineError;

    pub struct RodioOutput {
        _stream: OutputStream,
        handle: OutputStreamHandle,
    }

    impl RodioOutput {
        /// Open the default device. `None` if there is no usable device.
        pub fn open() -> Option<Self> {
            let (stream, handle) = OutputStream::try_default().ok()?;
            Some(RodioOutput { _stream: stream, handle })
        }
    }

    impl AudioOutput for RodioOutput {
        fn submit(&mut self, pcm: Vec<i16>, sample_rate: u32) -> Result<Playback, EngineError> {
            let sink = Sink::try_new(&self.handle)
                .map_err(|e| EngineError::AudioOutput(e.to_string()))?;
            sink.append(SamplesBuffer::new(1, sample_rate, pcm));
            sink.sleep_until_end();
            Ok(Playback::Finished)
        }
    }
}

#[cfg(feature = "sound")]
pub use inner::RodioOutput;

/// Best available output: the audio device if it opens, silence otherwise.
pub fn open_default() -> Box<dyn AudioOutput> {
    #[cfg(feature = "sound")]
    {
        if let Some(out) = RodioOutput::open() {
            return Box::new(out);
        }
        tracing::warn!("no audio device available; cues will be silent");
    }
    Box::new(SilentOutput)
}
