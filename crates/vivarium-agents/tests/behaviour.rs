//! Reference agents driven through a real world.

use vivarium_agents::{place_light, terrain_classifier, Terrain, Vehicle, Wall, Wanderer, Wiring};
use vivarium_core::AgentId;
use vivarium_engine::{
    AgentBuilder, Body, InfluenceConfig, NavigationConfig, Prop, World, WorldConfig,
};
use vivarium_space::EdgeBehavior;
use vivarium_test_utils::{continuous_config, grid_config};

fn maze(cols: u32, rows: u32) -> World {
    let mut world = World::new(WorldConfig {
        navigation: Some(NavigationConfig::default()),
        ..grid_config(cols, rows, EdgeBehavior::Clamp)
    })
    .unwrap();
    world.set_cell_classifier(terrain_classifier()).unwrap();
    world
}

fn add_wanderer(world: &mut World, x: f64, y: f64, target: (i32, i32)) -> AgentId {
    let id = world
        .add_agent(AgentBuilder::new(Wanderer::new()).body(Prop::new(Body::new(x, y))))
        .unwrap();
    world
        .agent_mut::<Wanderer>(id)
        .unwrap()
        .set_target(target.0, target.1);
    id
}

fn walk(world: &mut World, id: AgentId) -> Vec<(i32, i32)> {
    let body = world.agent_body(id).unwrap();
    let mut visited = Vec::new();
    for _ in 0..100 {
        world.tick(0.2).unwrap();
        let cell = world.cell_of(body).unwrap();
        if visited.last() != Some(&cell) {
            visited.push(cell);
        }
        if world.agent::<Wanderer>(id).unwrap().is_idle() {
            break;
        }
    }
    visited
}

#[test]
fn wanderer_walks_around_a_wall() {
    let mut world = maze(5, 5);
    for y in 0..4 {
        world.add_object(Wall::new(2.0, f64::from(y), 20.0)).unwrap();
    }
    let id = add_wanderer(&mut world, 0.0, 0.0, (4, 0));
    let visited = walk(&mut world, id);

    assert_eq!(visited.first(), Some(&(0, 0)));
    assert_eq!(visited.last(), Some(&(4, 0)));
    assert!(visited.iter().all(|&(x, y)| x != 2 || y == 4));
    // Down four, across four, up four.
    assert_eq!(visited.len(), 13);
}

#[test]
fn wanderer_detours_around_rough_ground() {
    let mut world = maze(3, 3);
    world.add_object(Terrain::new(1.0, 1.0, 1.0, 20.0)).unwrap();
    let id = add_wanderer(&mut world, 0.0, 1.0, (2, 1));
    world.tick(0.2).unwrap();
    assert_eq!(world.agent::<Wanderer>(id).unwrap().remaining(), 4);

    let visited = walk(&mut world, id);
    assert!(!visited.contains(&(1, 1)));
    assert_eq!(visited.last(), Some(&(2, 1)));
}

#[test]
fn unreachable_target_leaves_wanderer_idle() {
    let mut world = maze(3, 3);
    for (x, y) in [(1, 0), (1, 1), (1, 2)] {
        world.add_object(Wall::new(x as f64, y as f64, 20.0)).unwrap();
    }
    let id = add_wanderer(&mut world, 0.0, 0.0, (2, 2));
    world.tick(0.2).unwrap();
    let wanderer = world.agent::<Wanderer>(id).unwrap();
    assert!(wanderer.is_idle());
    let body = world.agent_body(id).unwrap();
    assert_eq!(world.cell_of(body), Some((0, 0)));
}

#[test]
fn wall_or_off_grid_target_leaves_wanderer_idle() {
    let mut world = maze(4, 1);
    world.add_object(Wall::new(3.0, 0.0, 20.0)).unwrap();
    let id = add_wanderer(&mut world, 0.0, 0.0, (3, 0));
    world.tick(0.2).unwrap();
    assert!(world.agent::<Wanderer>(id).unwrap().is_idle());

    world.agent_mut::<Wanderer>(id).unwrap().set_target(9, 0);
    world.tick(0.2).unwrap();
    assert!(world.agent::<Wanderer>(id).unwrap().is_idle());
    let body = world.agent_body(id).unwrap();
    assert_eq!(world.cell_of(body), Some((0, 0)));
}

fn lit_world() -> World {
    World::new(WorldConfig {
        influence: Some(InfluenceConfig {
            sector: 5.0,
            ..InfluenceConfig::default()
        }),
        ..continuous_config(500.0, 500.0)
    })
    .unwrap()
}

/// Turn rate after one tick for a vehicle at (230, 200) facing +y with a
/// light ahead and to its right.
fn first_turn(wiring: Wiring) -> f64 {
    let mut world = lit_world();
    place_light(&mut world, 250.0, 300.0, 100.0).unwrap();
    let id = world
        .add_agent(Vehicle::builder(wiring, 230.0, 200.0, 90.0))
        .unwrap();
    world.tick(0.01).unwrap();
    let percepts = world.percepts(id).unwrap();
    assert!(percepts.scalar("right").unwrap() > percepts.scalar("left").unwrap());
    world.body(world.agent_body(id).unwrap()).unwrap().angular_velocity()
}

#[test]
fn crossed_excitation_steers_towards_light() {
    assert!(first_turn(Wiring::Aggression) < 0.0);
    assert!(first_turn(Wiring::Love) < 0.0);
}

#[test]
fn uncrossed_excitation_steers_away() {
    assert!(first_turn(Wiring::Fear) > 0.0);
    assert!(first_turn(Wiring::Explorer) > 0.0);
}

#[test]
fn vehicle_without_a_field_sees_darkness() {
    let mut world = World::new(continuous_config(100.0, 100.0)).unwrap();
    let id = world
        .add_agent(Vehicle::builder(Wiring::Love, 50.0, 50.0, 0.0))
        .unwrap();
    world.tick(0.1).unwrap();
    let body = world.body(world.agent_body(id).unwrap()).unwrap();
    assert_eq!(body.speed(), 100.0);
    assert_eq!(body.angular_velocity(), 0.0);
}
