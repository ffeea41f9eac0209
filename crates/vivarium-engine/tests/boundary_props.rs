//! Property tests: whatever the motion, bodies end every tick inside the
//! world with a normalized heading.

use proptest::prelude::*;
use vivarium_engine::{Body, Prop, World};
use vivarium_space::EdgeBehavior;
use vivarium_test_utils::{continuous_config, grid_config};

fn arb_body() -> impl Strategy<Value = Body> {
    (
        -50.0f64..150.0,
        -50.0f64..150.0,
        -720.0f64..720.0,
        0.0f64..500.0,
        -360.0f64..360.0,
    )
        .prop_map(|(x, y, heading, speed, turn)| {
            let mut b = Body::new(x, y).with_heading(heading).with_speed(speed);
            b.set_angular_velocity(turn);
            b
        })
}

proptest! {
    #[test]
    fn continuous_world_keeps_bodies_inside(
        bodies in proptest::collection::vec(arb_body(), 1..8),
        dt in 0.0f64..1.0,
    ) {
        let mut world = World::new(continuous_config(100.0, 80.0)).unwrap();
        for b in bodies {
            world.add_object(Prop::new(b)).unwrap();
        }
        for _ in 0..3 {
            world.tick(dt).unwrap();
            for (_, o) in world.objects() {
                let b = o.body();
                prop_assert!((0.0..=100.0).contains(&b.x()));
                prop_assert!((0.0..=80.0).contains(&b.y()));
                prop_assert!((0.0..360.0).contains(&b.heading()));
            }
        }
    }

    #[test]
    fn toroidal_grid_wraps_into_cells(
        bodies in proptest::collection::vec(arb_body(), 1..8),
        dt in 0.0f64..1.0,
    ) {
        let mut world = World::new(grid_config(10, 6, EdgeBehavior::Wrap)).unwrap();
        let mut ids = Vec::new();
        for b in bodies {
            ids.push(world.add_object(Prop::new(b)).unwrap());
        }
        world.tick(dt).unwrap();
        for id in ids {
            let b = world.body(id).unwrap();
            prop_assert!((0.0..10.0).contains(&b.x()), "x = {}", b.x());
            prop_assert!((0.0..6.0).contains(&b.y()), "y = {}", b.y());
            let (cx, cy) = world.cell_of(id).unwrap();
            prop_assert_eq!(world.cell_contents(cx, cy).contains(&id), true);
        }
    }
}
