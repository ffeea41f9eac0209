//! Thirty random walkers in a closed box.
//!
//! Each walker re-decides its turn rate five times a second. Walkers are
//! seeded individually, so the run is reproducible.
//!
//! Run with:
//!   cargo run --example random_walk

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use vivarium_agents::RandomWalker;
use vivarium_core::Point2;
use vivarium_engine::{AgentBuilder, Body, Bouncer, FixedStep, Topology, World, WorldConfig};

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 600.0;
const WALKERS: u64 = 30;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = WorldConfig {
        topology: Topology::Continuous {
            width: WIDTH,
            height: HEIGHT,
        },
        tick_rate_hz: 30.0,
        ..WorldConfig::default()
    };
    // One report per simulated second, so allow a whole second of ticks
    // per advance.
    let mut clock = FixedStep::new(config.tick_rate_hz)
        .ok_or("bad tick rate")?
        .with_max_steps(30);
    let mut world = World::new(config)?;

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut bodies = Vec::new();
    for seed in 0..WALKERS {
        let body = Body::new(
            rng.random_range(10.0..WIDTH - 10.0),
            rng.random_range(10.0..HEIGHT - 10.0),
        )
        .with_heading(rng.random_range(0.0..360.0))
        .with_speed(rng.random_range(50.0..200.0));
        let id = world.add_agent(AgentBuilder::new(RandomWalker::new(seed)).body(Bouncer::new(body)))?;
        bodies.push(world.agent_body(id).ok_or("walker has no body")?);
    }
    let start: Vec<Point2> = bodies
        .iter()
        .filter_map(|b| world.body(*b).map(Body::position))
        .collect();

    for second in 1..=10 {
        for _ in 0..clock.advance(Duration::from_secs(1)) {
            world.tick(clock.dt())?;
        }
        let mean_drift = bodies
            .iter()
            .zip(&start)
            .filter_map(|(b, s)| world.body(*b).map(|body| body.position().distance(s)))
            .sum::<f64>()
            / WALKERS as f64;
        println!(
            "  t={second:>2}s tick {:>3}: mean distance from start {mean_drift:.1}",
            world.current_tick().0
        );
    }
    Ok(())
}
