/// Tone synthesizer: one sine oscillator, one fixed amplitude.
///
/// Produces mono 16-bit PCM. The buffer is reserved fallibly so an
/// allocation failure surfaces as `AudioAllocationFailure` instead of
/// aborting the process.

use crate::domain::error::EngineError;

pub const SAMPLE_RATE: u32 = 32_768;

/// Samples faded in and out at each end to avoid clicks between steps.
const EDGE_RAMP: usize = 64;

pub fn sample_count(duration_ms: u32, sample_rate: u32) -> usize {
    (sample_rate as u64 * duration_ms as u64 / 1000) as usize
}

pub fn synthesize(
    freq_hz: f32,
    duration_ms: u32,
    sample_rate: u32,
    volume: f32,
) -> Result<Vec<i16>, EngineError> {
    let samples = sample_count(duration_ms, sample_rate);
    let mut pcm: Vec<i16> = Vec::new();
    pcm.try_reserve_exact(samples)
        .map_err(|_| EngineError::AudioAllocationFailure { samples })?;

    let peak = volume.clamp(0.0, 1.0) as f64 * i16::MAX as f64;
    let phase_step = std::f64::consts::TAU * freq_hz as f64 / sample_rate.max(1) as f64;
    let ramp = EDGE_RAMP.min(samples / 2);

    let mut phase = 0.0_f64;
    for i in 0..samples {
        let edge = i.min(samples - 1 - i);
        let env = if edge < ramp { edge as f64 / ramp as f64 } else { 1.0 };
        pcm.push((phase.sin() * peak * env) as i16);
        phase = (phase + phase_step) % std::f64::consts::TAU;
    }

    Ok(pcm)
}
