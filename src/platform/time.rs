//! Headless time source
//!
//! The browser drives the spawn trigger with `setInterval`. Native runs and
//! tests have no event loop, so they feed elapsed wall-clock time into an
//! [`IntervalTimer`] instead.

/// Maximum firings reported by a single `advance` (prevents spiral of death)
pub const MAX_CATCH_UP: u32 = 8;

/// Fixed-interval timer driven by elapsed milliseconds
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    interval_ms: f64,
    accumulator: f64,
}

impl IntervalTimer {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms: interval_ms.max(f64::EPSILON),
            accumulator: 0.0,
        }
    }

    /// Add elapsed time; returns how many times the interval elapsed
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        self.accumulator += dt_ms.max(0.0);

        let mut fired = 0;
        while self.accumulator >= self.interval_ms && fired < MAX_CATCH_UP {
            self.accumulator -= self.interval_ms;
            fired += 1;
        }
        if fired == MAX_CATCH_UP {
            // Drop whatever is left rather than bursting on the next call
            self.accumulator = self.accumulator.min(self.interval_ms);
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_per_interval() {
        let mut timer = IntervalTimer::new(100.0);
        assert_eq!(timer.advance(60.0), 0);
        assert_eq!(timer.advance(60.0), 1);
        assert_eq!(timer.advance(60.0), 0);
        assert_eq!(timer.advance(80.0), 1);
    }

    #[test]
    fn test_catch_up_is_capped() {
        let mut timer = IntervalTimer::new(10.0);
        assert_eq!(timer.advance(10_000.0), MAX_CATCH_UP);
        assert!(timer.advance(0.0) <= 1);
    }

    #[test]
    fn test_negative_elapsed_is_ignored() {
        let mut timer = IntervalTimer::new(100.0);
        assert_eq!(timer.advance(-500.0), 0);
        assert_eq!(timer.advance(100.0), 1);
    }
}
