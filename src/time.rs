//! Fixed-step clock for timeline playback.
//!
//! `draw_web()` fires at the browser's frame rate with a variable delta.
//! `FrameClock` turns frame timestamps into whole playback steps, so the
//! timeline advances at the same speed on every display.

/// Longest frame gap counted, so a backgrounded tab does not jump ahead.
const MAX_FRAME_MS: f64 = 500.0;

pub struct FrameClock {
    ms_per_step: f64,
    /// Milliseconds not yet consumed as steps.
    accumulator: f64,
    pub total_steps: u64,
    last_timestamp: Option<f64>,
}

impl FrameClock {
    pub fn new(steps_per_sec: u32) -> Self {
        Self {
            ms_per_step: 1000.0 / steps_per_sec.max(1) as f64,
            accumulator: 0.0,
            total_steps: 0,
            last_timestamp: None,
        }
    }

    /// Feed the current timestamp in ms and get the number of steps due.
    /// The first call only records the timestamp.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_FRAME_MS),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let steps = (self.accumulator / self.ms_per_step) as u32;
        self.accumulator -= steps as f64 * self.ms_per_step;
        self.total_steps += steps as u64;
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_returns_zero_steps() {
        let mut clock = FrameClock::new(30);
        assert_eq!(clock.update(1234.0), 0);
    }

    #[test]
    fn steps_accumulate_with_remainder() {
        let mut clock = FrameClock::new(10);
        clock.update(0.0);
        assert_eq!(clock.update(150.0), 1);
        assert_eq!(clock.update(200.0), 1);
        assert_eq!(clock.total_steps, 2);
    }

    #[test]
    fn large_gap_is_clamped() {
        let mut clock = FrameClock::new(10);
        clock.update(0.0);
        assert_eq!(clock.update(10_000.0), 5);
    }

    #[test]
    fn backwards_timestamp_counts_as_zero() {
        let mut clock = FrameClock::new(10);
        clock.update(500.0);
        assert_eq!(clock.update(100.0), 0);
    }

    #[test]
    fn steady_60fps_at_30_steps() {
        let mut clock = FrameClock::new(30);
        clock.update(0.0);
        let total: u32 = (1..=60).map(|i| clock.update(i as f64 * 16.667)).sum();
        assert!((29..=31).contains(&total), "expected ~30 steps, got {total}");
    }
}
