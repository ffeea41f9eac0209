//! Braitenberg vehicles among lights.
//!
//! Demonstrates:
//!   1. Loading a `WorldConfig` from TOML, with an influence field
//!   2. Placing lights into the field
//!   3. Vehicles whose two light sensors drive their wheels
//!   4. Reading the field back through `World::render`
//!
//! The wiring is picked on the command line: `2a` (fear), `2b`
//! (aggression), `3a` (love) or `3b` (explorer). Default: `2b`.
//!
//! Run with:
//!   cargo run --example braitenberg -- 3a

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;
use vivarium_agents::{place_light, Vehicle, Wiring};
use vivarium_core::ObjectId;
use vivarium_engine::{Body, RenderOptions, Renderer, Shape, World, WorldConfig};

const CONFIG: &str = r#"
tick_rate_hz = 50.0

[topology]
kind = "continuous"
width = 500.0
height = 500.0

[influence]
sector = 5.0
"#;

const LIGHTS: usize = 5;
const VEHICLES: usize = 5;

// ─── Renderer: coarse ASCII light map ───────────────────────────

/// Keeps the brightest sector in each block of `block x block` sectors.
struct LightMap {
    block: usize,
    cells: Vec<Vec<f64>>,
}

impl LightMap {
    fn new(sectors: usize, block: usize) -> Self {
        let n = sectors.div_ceil(block);
        Self {
            block,
            cells: vec![vec![0.0; n]; n],
        }
    }

    fn print(&self) {
        const RAMP: &[u8] = b" .:-=+*#%@";
        for row in self.cells.iter().rev() {
            let line: String = row
                .iter()
                .map(|v| RAMP[((v * (RAMP.len() - 1) as f64).round() as usize).min(RAMP.len() - 1)] as char)
                .collect();
            println!("  |{line}|");
        }
    }
}

impl Renderer for LightMap {
    fn draw_object(&mut self, _id: ObjectId, _body: &Body, _shapes: &[Shape]) {}

    fn draw_field_cell(&mut self, col: usize, row: usize, _size: f64, intensity: f64) {
        let cell = &mut self.cells[row / self.block][col / self.block];
        *cell = cell.max(intensity);
    }
}

fn wiring_from_args() -> Result<Wiring, String> {
    match std::env::args().nth(1).as_deref() {
        None | Some("2b") => Ok(Wiring::Aggression),
        Some("2a") => Ok(Wiring::Fear),
        Some("3a") => Ok(Wiring::Love),
        Some("3b") => Ok(Wiring::Explorer),
        Some(other) => Err(format!("unknown vehicle `{other}`, expected 2a, 2b, 3a or 3b")),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let wiring = wiring_from_args()?;

    // 1. World with a 100x100-sector light field.
    let config = WorldConfig::from_toml_str(CONFIG)?;
    let dt = config.dt();
    let mut world = World::new(config)?;

    // 2. Lights away from the walls.
    let mut rng = ChaCha8Rng::seed_from_u64(2014);
    for _ in 0..LIGHTS {
        place_light(
            &mut world,
            rng.random_range(50.0..450.0),
            rng.random_range(50.0..450.0),
            100.0,
        )?;
    }

    // 3. Vehicles at random headings.
    let mut vehicles = Vec::new();
    for _ in 0..VEHICLES {
        let builder = Vehicle::builder(
            wiring,
            rng.random_range(100.0..400.0),
            rng.random_range(100.0..400.0),
            rng.random_range(0.0..360.0),
        );
        vehicles.push(world.add_agent(builder)?);
    }
    println!("{VEHICLES} vehicles ({wiring:?}) and {LIGHTS} lights\n");

    for second in 1..=5 {
        for _ in 0..50 {
            world.tick(dt)?;
        }
        println!("t={second}s");
        for id in &vehicles {
            let (Some(body), Some(percepts)) = (
                world.agent_body(*id).and_then(|b| world.body(b)),
                world.percepts(*id),
            ) else {
                continue;
            };
            println!(
                "  vehicle {id}: at ({:>5.1}, {:>5.1}) speed {:>5.1} light L={:.3} R={:.3}",
                body.x(),
                body.y(),
                body.speed(),
                percepts.scalar("left").unwrap_or(0.0),
                percepts.scalar("right").unwrap_or(0.0),
            );
        }
    }

    // 4. The light field, one character per 5x5 sectors.
    let sectors = world.field().map_or(0, |f| f.cols());
    let mut map = LightMap::new(sectors, 5);
    world.render(
        &mut map,
        RenderOptions {
            show_field: true,
            show_graph: false,
        },
    );
    println!("\nlight field:");
    map.print();
    Ok(())
}
