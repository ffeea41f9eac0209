//! Fixed-step tick scheduling for drivers.

use std::time::Duration;

/// Converts elapsed wall time into a whole number of fixed-size ticks.
///
/// The driver owns the clock and calls [`World::tick`](crate::World::tick)
/// once per step reported by [`advance`](FixedStep::advance). Leftover time
/// carries into the next call. When the driver falls far behind, at most
/// `max_steps` are reported and the backlog is dropped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedStep {
    dt: f64,
    accumulator: f64,
    max_steps: u32,
}

impl FixedStep {
    /// Default cap on steps per [`advance`](Self::advance) call.
    pub const DEFAULT_MAX_STEPS: u32 = 8;

    /// A clock ticking `tick_rate_hz` times per second.
    ///
    /// Returns `None` unless the rate is finite and positive.
    pub fn new(tick_rate_hz: f64) -> Option<Self> {
        let dt = 1.0 / tick_rate_hz;
        if tick_rate_hz > 0.0 && dt.is_finite() {
            Some(Self {
                dt,
                accumulator: 0.0,
                max_steps: Self::DEFAULT_MAX_STEPS,
            })
        } else {
            None
        }
    }

    /// Cap the steps reported per call.
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Seconds per tick.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Time carried over to the next call, in seconds.
    pub fn pending(&self) -> f64 {
        self.accumulator
    }

    /// Add `elapsed` and return how many ticks are due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed.as_secs_f64();
        let mut steps = 0;
        while self.accumulator >= self.dt && steps < self.max_steps {
            self.accumulator -= self.dt;
            steps += 1;
        }
        if steps == self.max_steps && self.accumulator >= self.dt {
            self.accumulator %= self.dt;
        }
        steps
    }
}
