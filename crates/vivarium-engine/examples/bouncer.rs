//! Bouncing balls in a closed box.
//!
//! Demonstrates:
//!   1. Building a continuous world from a `WorldConfig`
//!   2. Adding plain objects with no agent behind them
//!   3. Driving ticks from wall time with `FixedStep`
//!   4. Collecting draw calls through a `Renderer`
//!
//! Run with:
//!   cargo run --example bouncer

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use vivarium_core::ObjectId;
use vivarium_engine::{
    Body, Bouncer, FixedStep, RenderOptions, Renderer, Shape, Topology, World, WorldConfig,
};

// ─── Parameters ─────────────────────────────────────────────────

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 600.0;
const BALLS: usize = 12;
const FRAME: Duration = Duration::from_millis(33);
const SECONDS: u32 = 10;

// ─── Renderer: bounding box of everything drawn ─────────────────

#[derive(Default)]
struct Extent {
    drawn: usize,
    min: (f64, f64),
    max: (f64, f64),
}

impl Renderer for Extent {
    fn draw_object(&mut self, _id: ObjectId, body: &Body, _shapes: &[Shape]) {
        let (x, y) = (body.x(), body.y());
        if self.drawn == 0 {
            self.min = (x, y);
            self.max = (x, y);
        }
        self.min = (self.min.0.min(x), self.min.1.min(y));
        self.max = (self.max.0.max(x), self.max.1.max(y));
        self.drawn += 1;
    }
}

// ─── Main ───────────────────────────────────────────────────────

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // 1. A closed 800x600 box.
    let config = WorldConfig {
        topology: Topology::Continuous {
            width: WIDTH,
            height: HEIGHT,
        },
        ..WorldConfig::default()
    };
    let mut clock = FixedStep::new(config.tick_rate_hz).ok_or("bad tick rate")?;
    let mut world = World::new(config)?;

    // 2. Balls with random position, heading and speed.
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    for _ in 0..BALLS {
        let body = Body::new(
            rng.random_range(10.0..WIDTH - 10.0),
            rng.random_range(10.0..HEIGHT - 10.0),
        )
        .with_heading(rng.random_range(0.0..360.0))
        .with_speed(rng.random_range(50.0..200.0));
        world.add_object(Bouncer::new(body))?;
    }
    println!("{} balls in a {WIDTH}x{HEIGHT} box", world.object_count());

    // 3. Simulated frames at ~30 fps.
    let frames_per_second = 1000 / FRAME.as_millis() as u32;
    for frame in 1..=SECONDS * frames_per_second {
        for _ in 0..clock.advance(FRAME) {
            world.tick(clock.dt())?;
        }
        if frame % frames_per_second == 0 {
            // 4. Every second, check nothing escaped.
            let mut extent = Extent::default();
            world.render(&mut extent, RenderOptions::default());
            println!(
                "  tick {:>4}: {} drawn, x in [{:.1}, {:.1}], y in [{:.1}, {:.1}]",
                world.current_tick().0,
                extent.drawn,
                extent.min.0,
                extent.max.0,
                extent.min.1,
                extent.max.1,
            );
        }
    }
    Ok(())
}
