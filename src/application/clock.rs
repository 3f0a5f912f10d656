/// TickClock turns variable frame times into a fixed simulation rate.
/// At most one tick is released per frame, so slow frames never trigger a
/// burst of catch-up steps.
#[derive(Clone, Debug)]
pub struct TickClock {
    steps_per_second: f32,
    accumulator: f32,
}

impl TickClock {
    pub const MIN_RATE: f32 = 1.0;
    pub const MAX_RATE: f32 = 60.0;

    pub fn new(steps_per_second: f32) -> Self {
        Self {
            steps_per_second: steps_per_second.clamp(Self::MIN_RATE, Self::MAX_RATE),
            accumulator: 0.0,
        }
    }

    pub const fn steps_per_second(&self) -> f32 {
        self.steps_per_second
    }

    /// Seconds between ticks
    pub fn interval(&self) -> f32 {
        1.0 / self.steps_per_second
    }

    /// Add elapsed frame time; returns whether a tick is due
    pub fn advance(&mut self, delta_time: f32) -> bool {
        self.accumulator += delta_time.max(0.0);
        let interval = self.interval();
        if self.accumulator < interval {
            return false;
        }
        self.accumulator -= interval;
        if self.accumulator >= interval {
            self.accumulator = 0.0;
        }
        true
    }

    /// Change the rate, returning the clamped value
    pub fn adjust(&mut self, delta: f32) -> f32 {
        self.steps_per_second =
            (self.steps_per_second + delta).clamp(Self::MIN_RATE, Self::MAX_RATE);
        self.steps_per_second
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(10.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_at_fixed_rate() {
        let mut clock = TickClock::new(10.0);
        assert!(!clock.advance(0.04));
        assert!(!clock.advance(0.04));
        assert!(clock.advance(0.04));
        assert!(!clock.advance(0.04));
    }

    #[test]
    fn test_long_frame_releases_one_tick() {
        let mut clock = TickClock::new(10.0);
        assert!(clock.advance(1.0));
        assert!(!clock.advance(0.0));
    }

    #[test]
    fn test_rate_is_clamped() {
        let mut clock = TickClock::new(500.0);
        assert_eq!(clock.steps_per_second(), TickClock::MAX_RATE);
        assert_eq!(clock.adjust(-100.0), TickClock::MIN_RATE);
        assert_eq!(clock.adjust(4.0), 5.0);
    }
}
