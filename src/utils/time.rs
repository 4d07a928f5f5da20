use std::time::{Duration, Instant};

/// Frame clock read by every per-frame update.
///
/// Either driven by the wall clock ([`FrameClock::tick`]) or stepped with a
/// fixed timestep ([`FrameClock::advance`]) for deterministic simulation.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start_time: Instant,
    last_update: Instant,
    /// Time since last frame
    pub delta: Duration,
    /// Total elapsed time since creation
    pub elapsed: Duration,
    /// Total number of frames
    pub frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Creates a new clock starting from now.
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_update: now,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Advances by the real time passed since the previous tick.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.delta = now - self.last_update;
        self.elapsed = now - self.start_time;
        self.last_update = now;
        self.frame_count += 1;
    }

    /// Advances by a fixed step, independent of the wall clock.
    ///
    /// Negative steps count as zero. A step no `Duration` can hold (infinite
    /// or overflowing) is logged and also counts as zero.
    pub fn advance(&mut self, dt: f32) {
        self.delta = Duration::try_from_secs_f32(dt.max(0.0)).unwrap_or_else(|_| {
            log::warn!("Frame step {dt} s is out of range; treated as zero");
            Duration::ZERO
        });
        self.elapsed = self.elapsed.saturating_add(self.delta);
        self.frame_count += 1;
    }

    #[must_use]
    pub fn dt_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_steps_accumulate() {
        let mut clock = FrameClock::new();
        clock.advance(0.25);
        clock.advance(0.5);
        assert_eq!(clock.frame_count, 2);
        assert!((clock.dt_seconds() - 0.5).abs() < 1e-6);
        assert!((clock.elapsed_seconds() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn unrepresentable_steps_count_as_zero() {
        let mut clock = FrameClock::new();
        clock.advance(0.5);
        for dt in [f32::INFINITY, f32::NAN, f32::MAX, -1.0] {
            clock.advance(dt);
            assert_eq!(clock.dt_seconds(), 0.0, "dt {dt}");
        }
        assert!((clock.elapsed_seconds() - 0.5).abs() < 1e-6);
        assert_eq!(clock.frame_count, 5);
    }
}
