//! A* navigation on a grid with walls and rough ground.
//!
//! Demonstrates:
//!   1. A grid world with a navigation layer
//!   2. Walls and terrain classified into the occupancy grid
//!   3. A wanderer that plans with A* and steps one cell at a time
//!   4. Rebuilding the graph when the world changes
//!
//! Run with:
//!   cargo run --example path_finding

use tracing_subscriber::EnvFilter;
use vivarium_agents::{terrain_classifier, Terrain, Wall, Wanderer};
use vivarium_core::AgentId;
use vivarium_engine::{
    AgentBuilder, Body, Color, NavigationConfig, Prop, Shape, Topology, World, WorldConfig,
};
use vivarium_space::{EdgeBehavior, Neighbourhood};

const SIZE: u32 = 20;
const CELL: f64 = 20.0;

fn print_grid(world: &World, wanderer: AgentId) {
    let me = world.agent_body(wanderer).and_then(|b| world.cell_of(b));
    for y in (0..SIZE as i32).rev() {
        let row: String = (0..SIZE as i32)
            .map(|x| {
                if me == Some((x, y)) {
                    '@'
                } else if world.has_object_at::<Wall>(x, y) {
                    '#'
                } else if world.has_object_at::<Terrain>(x, y) {
                    '~'
                } else {
                    '.'
                }
            })
            .collect();
        println!("  {row}");
    }
}

fn walk(world: &mut World, id: AgentId, dt: f64) -> Result<u32, Box<dyn std::error::Error>> {
    let mut ticks = 0;
    loop {
        world.tick(dt)?;
        ticks += 1;
        let idle = world.agent::<Wanderer>(id).is_none_or(Wanderer::is_idle);
        if idle || ticks > 10_000 {
            return Ok(ticks);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // 1. 20x20 grid, 8-connected navigation.
    let config = WorldConfig {
        topology: Topology::Grid {
            cols: SIZE,
            rows: SIZE,
            cell_size: CELL,
            edge: EdgeBehavior::Clamp,
        },
        navigation: Some(NavigationConfig {
            neighbourhood: Neighbourhood::Moore,
            max_expansions: Some(400),
        }),
        ..WorldConfig::default()
    };
    let dt = config.dt();
    let mut world = World::new(config)?;
    world.set_cell_classifier(terrain_classifier())?;

    // 2. A wall with a gap, and a band of hills in front of the gap.
    for y in 0..SIZE - 3 {
        world.add_object(Wall::new(10.0, f64::from(y), CELL))?;
    }
    for y in 12..SIZE {
        world.add_object(Terrain::new(5.0, f64::from(y), 0.3, CELL))?;
    }

    // 3. The wanderer, sent to the far corner.
    let marker = Shape::circle(CELL / 4.0).with_color(Color::RED);
    let id = world.add_agent(
        AgentBuilder::new(Wanderer::new().with_step_interval(0.1))
            .body(Prop::new(Body::new(0.0, 0.0)).with_shape(marker)),
    )?;
    if let Some(w) = world.agent_mut::<Wanderer>(id) {
        w.set_target(19, 0);
    }
    let ticks = walk(&mut world, id, dt)?;
    println!("reached the corner after {ticks} ticks:");
    print_grid(&world, id);

    // 4. Close the gap and try to go back. The target is now unreachable.
    for y in SIZE - 3..SIZE {
        world.add_object(Wall::new(10.0, f64::from(y), CELL))?;
    }
    if let Some(w) = world.agent_mut::<Wanderer>(id) {
        w.set_target(0, 0);
    }
    walk(&mut world, id, dt)?;
    println!("\nwith the gap closed the wanderer stays put:");
    print_grid(&world, id);
    if let Some(nav) = world.navigation_graph() {
        println!("\nnavigation graph: {} nodes, {} edges", nav.len(), nav.edge_count());
    }
    Ok(())
}
