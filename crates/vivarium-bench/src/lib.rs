//! Benchmark profiles for Vivarium.
//!
//! Deterministic inputs shared by the benches:
//!
//! - [`maze_grid`]: a square occupancy grid with scattered walls and rough
//!   ground, start and goal corners kept free
//! - [`light_field`]: an influence field with randomly placed lights
//! - [`vehicle_world`]: a continuous world of Braitenberg vehicles and lights
//! - [`wanderer_world`]: a grid world of walls and A* wanderers

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use vivarium_agents::{place_light, terrain_classifier, LightSource, Vehicle, Wall, Wanderer, Wiring};
use vivarium_core::AgentId;
use vivarium_engine::{
    AgentBuilder, Body, InfluenceConfig, NavigationConfig, Prop, Topology, World, WorldConfig,
};
use vivarium_influence::InfluenceField;
use vivarium_space::{CellState, EdgeBehavior, Neighbourhood, OccupancyGrid};

/// A `size x size` grid: about 20% walls, 10% ground of cost 3, with
/// `(0, 0)` and `(size - 1, size - 1)` free.
pub fn maze_grid(size: u32, seed: u64) -> OccupancyGrid {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut grid = OccupancyGrid::new(size, size).expect("non-empty grid");
    let last = size as i32 - 1;
    for y in 0..size as i32 {
        for x in 0..size as i32 {
            if (x, y) == (0, 0) || (x, y) == (last, last) {
                continue;
            }
            let state = match rng.random_range(0..10) {
                0 | 1 => CellState::Wall,
                2 => CellState::Weighted(3.0),
                _ => CellState::Free,
            };
            grid.set(x, y, state).expect("in-bounds cell");
        }
    }
    grid
}

/// A `size x size` field with `sources` lights of radius `size / 10`.
pub fn light_field(size: f64, sector: f64, sources: usize, seed: u64) -> InfluenceField {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut field = InfluenceField::new(size, size, sector, 1.0).expect("valid field");
    for _ in 0..sources {
        let lamp = LightSource::new(
            rng.random_range(0.0..size),
            rng.random_range(0.0..size),
            size / 10.0,
        );
        field.add_source(lamp.source()).expect("source inside field");
    }
    field
}

/// A 500 x 500 world with `vehicles` 2b vehicles and `lights` lights,
/// field sectors of 5.
pub fn vehicle_world(vehicles: usize, lights: usize, seed: u64) -> World {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut world = World::new(WorldConfig {
        topology: Topology::Continuous {
            width: 500.0,
            height: 500.0,
        },
        influence: Some(InfluenceConfig {
            sector: 5.0,
            ..InfluenceConfig::default()
        }),
        ..WorldConfig::default()
    })
    .expect("valid config");
    for _ in 0..lights {
        place_light(
            &mut world,
            rng.random_range(50.0..450.0),
            rng.random_range(50.0..450.0),
            100.0,
        )
        .expect("light inside world");
    }
    for _ in 0..vehicles {
        world
            .add_agent(Vehicle::builder(
                Wiring::Aggression,
                rng.random_range(100.0..400.0),
                rng.random_range(100.0..400.0),
                rng.random_range(0.0..360.0),
            ))
            .expect("vehicle added");
    }
    world
}

/// A `size x size` grid world walled like [`maze_grid`], with `wanderers`
/// agents starting in free cells and heading for random free targets.
pub fn wanderer_world(size: u32, wanderers: usize, seed: u64) -> (World, Vec<AgentId>) {
    let maze = maze_grid(size, seed);
    let mut world = World::new(WorldConfig {
        topology: Topology::Grid {
            cols: size,
            rows: size,
            cell_size: 10.0,
            edge: EdgeBehavior::Clamp,
        },
        navigation: Some(NavigationConfig {
            neighbourhood: Neighbourhood::Moore,
            max_expansions: None,
        }),
        ..WorldConfig::default()
    })
    .expect("valid config");
    world
        .set_cell_classifier(terrain_classifier())
        .expect("navigation configured");
    let mut free = Vec::new();
    for ((x, y), state) in maze.iter() {
        if state.is_wall() {
            world
                .add_object(Wall::new(f64::from(x), f64::from(y), 10.0))
                .expect("wall added");
        } else {
            free.push((x, y));
        }
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed ^ 0x5eed);
    let mut ids = Vec::with_capacity(wanderers);
    for _ in 0..wanderers {
        let (sx, sy) = free[rng.random_range(0..free.len())];
        let (tx, ty) = free[rng.random_range(0..free.len())];
        let id = world
            .add_agent(
                AgentBuilder::new(Wanderer::new().with_step_interval(0.0))
                    .body(Prop::new(Body::new(f64::from(sx), f64::from(sy)))),
            )
            .expect("wanderer added");
        if let Some(w) = world.agent_mut::<Wanderer>(id) {
            w.set_target(tx, ty);
        }
        ids.push(id);
    }
    (world, ids)
}
