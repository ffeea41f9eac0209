//! A random walker.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::any::Any;
use vivarium_engine::{Action, Agent, AgentError, ThinkContext};

/// Turn rates a walker picks from, in degrees per second.
const TURN_RATES: [f64; 3] = [-180.0, 0.0, 180.0];

/// Every `interval` seconds, picks a new turn rate uniformly from
/// left, straight and right.
///
/// Pair it with a [`Bouncer`](vivarium_engine::Bouncer) body so it stays
/// inside the world. Seeded, so two walkers with the same seed wander
/// identically.
#[derive(Clone, Debug)]
pub struct RandomWalker {
    rng: ChaCha8Rng,
    interval: f64,
    elapsed: f64,
}

impl RandomWalker {
    /// A walker that re-decides every 0.2 s.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            interval: 0.2,
            elapsed: 0.0,
        }
    }

    /// Change the decision interval.
    pub fn with_interval(mut self, seconds: f64) -> Self {
        self.interval = seconds;
        self
    }

    /// Seconds between decisions.
    pub fn interval(&self) -> f64 {
        self.interval
    }
}

impl Agent for RandomWalker {
    fn think(&mut self, ctx: &ThinkContext<'_>) -> Result<Vec<Action>, AgentError> {
        self.elapsed += ctx.dt;
        if self.elapsed < self.interval {
            return Ok(Vec::new());
        }
        self.elapsed = 0.0;
        let rate = TURN_RATES[self.rng.random_range(0..TURN_RATES.len())];
        Ok(vec![Action::SetAngularVelocity(rate)])
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
