/// Fixed-timestep accumulator fed with `requestAnimationFrame` timestamps.
///
/// Game logic (input, countdown, particles) runs in whole `step_ms` steps no
/// matter how often the browser paints.
#[derive(Debug, Clone)]
pub struct FrameClock {
    step_ms: f64,
    last_ms: Option<f64>,
    accumulator_ms: f64,
}

/// Backlog beyond this many steps is dropped (e.g. after a background tab
/// wakes up).
pub const MAX_CATCH_UP_STEPS: u32 = 5;

impl FrameClock {
    pub fn new(step_ms: f64) -> Self {
        Self { step_ms, last_ms: None, accumulator_ms: 0.0 }
    }

    pub fn step_ms(&self) -> f64 {
        self.step_ms
    }

    /// Number of fixed steps to run for the frame stamped `now_ms`. The first
    /// call only primes the clock.
    pub fn steps(&mut self, now_ms: f64) -> u32 {
        let Some(last) = self.last_ms.replace(now_ms) else {
            return 0;
        };
        let elapsed = now_ms - last;
        if !(elapsed.is_finite() && elapsed > 0.0) {
            return 0;
        }
        self.accumulator_ms += elapsed;
        let mut steps = 0;
        while self.accumulator_ms >= self.step_ms {
            self.accumulator_ms -= self.step_ms;
            steps += 1;
            if steps == MAX_CATCH_UP_STEPS {
                self.accumulator_ms = self.accumulator_ms.min(self.step_ms);
                break;
            }
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_only_primes() {
        let mut clock = FrameClock::new(10.0);
        assert_eq!(clock.steps(1_000.0), 0);
        assert_eq!(clock.steps(1_010.0), 1);
    }

    #[test]
    fn remainder_carries_over() {
        let mut clock = FrameClock::new(10.0);
        clock.steps(0.0);
        assert_eq!(clock.steps(15.0), 1);
        assert_eq!(clock.steps(20.0), 1);
        assert_eq!(clock.steps(29.0), 0);
        assert_eq!(clock.steps(30.0), 1);
    }

    #[test]
    fn long_stall_is_capped() {
        let mut clock = FrameClock::new(10.0);
        clock.steps(0.0);
        assert_eq!(clock.steps(10_000.0), MAX_CATCH_UP_STEPS);
        // Backlog was dropped: at most one step of carry remains.
        assert!(clock.steps(10_000.0) == 0);
        assert!(clock.steps(10_010.0) <= 2);
    }

    #[test]
    fn time_going_backwards_yields_nothing() {
        let mut clock = FrameClock::new(10.0);
        clock.steps(100.0);
        assert_eq!(clock.steps(50.0), 0);
        assert_eq!(clock.steps(60.0), 1);
    }
}
