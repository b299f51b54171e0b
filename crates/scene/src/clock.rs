use std::time::Instant;

/// Timing of a single frame, in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTime {
    /// Time since the clock started.
    pub elapsed: f32,
    /// Time since the previous tick.
    pub delta: f32,
}

/// Monotonic frame clock. There is no fixed timestep: every tick reports the
/// measured wall-clock delta, so simulation speed follows the frame rate.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            last: 0.0,
        }
    }

    pub fn tick(&mut self) -> FrameTime {
        let now = self.start.elapsed().as_secs_f32();
        self.tick_at(now)
    }

    /// Advance to an explicit elapsed time. Going backwards yields a zero delta.
    pub fn tick_at(&mut self, elapsed: f32) -> FrameTime {
        let delta = (elapsed - self.last).max(0.0);
        self.last = self.last.max(elapsed);
        FrameTime {
            elapsed: self.last,
            delta,
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_ticks_report_deltas() {
        let mut clock = FrameClock::new();
        let t = clock.tick_at(0.5);
        assert_eq!(t.elapsed, 0.5);
        assert_eq!(t.delta, 0.5);
        let t = clock.tick_at(0.75);
        assert_eq!(t.delta, 0.25);
        assert_eq!(clock.elapsed(), 0.75);
    }

    #[test]
    fn delta_is_never_negative() {
        let mut clock = FrameClock::new();
        clock.tick_at(2.0);
        let t = clock.tick_at(1.0);
        assert_eq!(t.delta, 0.0);
        assert_eq!(t.elapsed, 2.0);
    }

    #[test]
    fn wall_clock_is_monotonic() {
        let mut clock = FrameClock::new();
        let a = clock.tick();
        let b = clock.tick();
        assert!(b.elapsed >= a.elapsed);
        assert!(b.delta >= 0.0);
    }
}
