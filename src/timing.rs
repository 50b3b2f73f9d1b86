/// Pacing abstraction for every timed wait in the engine.
///
/// The reveal effect and cue playback never sleep directly; they ask a
/// `Pacer`. The terminal build sleeps the thread, tests record the waits.

use std::time::Duration;

pub trait Pacer {
    fn pause(&mut self, duration: Duration);
}

/// Blocks the current thread for the requested duration.
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepPacer;

impl Pacer for SleepPacer {
    fn pause(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

impl<P: Pacer + ?Sized> Pacer for &mut P {
    fn pause(&mut self, duration: Duration) {
        (**self).pause(duration);
    }
}
