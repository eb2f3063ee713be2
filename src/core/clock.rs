use super::constants::MAX_FRAME_DELTA_SEC;
use instant::Instant;

/// Monotonic frame clock producing per-frame deltas in seconds.
///
/// The first tick has no previous sample and yields `0.0`. Later ticks yield
/// the time since the previous tick, clamped to `MAX_FRAME_DELTA_SEC` so a
/// backgrounded tab does not produce one huge animation step on return.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, now: Instant) -> f32 {
        let delta = match self.last {
            Some(last) if now > last => now.duration_since(last).as_secs_f32(),
            _ => 0.0,
        };
        self.last = Some(now);
        delta.clamp(0.0, MAX_FRAME_DELTA_SEC)
    }
}
