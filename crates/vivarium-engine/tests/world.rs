//! End-to-end behaviour of the world tick loop.

use vivarium_core::{AgentId, ObjectId};
use vivarium_engine::{
    Action, AgentBuilder, Body, Bouncer, InfluenceConfig, NavigationConfig, Percept, Perception,
    Prop, RenderOptions, SimObject, TickError, Topology, World, WorldConfig, WorldError,
};
use vivarium_influence::CircularSource;
use vivarium_space::{CellState, EdgeBehavior, Neighbourhood};
use vivarium_test_utils::fixtures::{
    DrawCall, Event, EventLog, FieldProbe, ProbePerception, RecordingRenderer, ScriptedAgent,
};
use vivarium_test_utils::{continuous_config, grid_config};

// ── Boundaries ──────────────────────────────────────────────────────

#[test]
fn closed_world_clamps_after_integration() {
    let mut world = World::new(continuous_config(100.0, 100.0)).unwrap();
    let id = world.add_object(Prop::new(Body::new(50.0, 50.0))).unwrap();
    world.object_mut(id).unwrap().body_mut().move_to(105.0, 50.0);
    world.tick(0.1).unwrap();
    assert_eq!(world.body(id).unwrap().x(), 100.0);
}

#[test]
fn toroidal_grid_wraps_modulo_width() {
    let mut world = World::new(grid_config(10, 10, EdgeBehavior::Wrap)).unwrap();
    let id = world.add_object(Prop::new(Body::new(2.0, 3.0))).unwrap();
    world.object_mut(id).unwrap().body_mut().move_to(15.0, 3.0);
    let summary = world.tick(0.1).unwrap();
    assert_eq!(world.body(id).unwrap().x(), 5.0);
    assert_eq!(world.cell_of(id), Some((5, 3)));
    assert_eq!(summary.relocated, 1);
    assert!(world.is_empty(2, 3));
    assert_eq!(world.cell_contents(5, 3), &[id]);
}

#[test]
fn add_object_enforces_boundary_and_rejects_nan() {
    let mut world = World::new(grid_config(4, 4, EdgeBehavior::Clamp)).unwrap();
    let id = world.add_object(Prop::new(Body::new(9.0, -2.0))).unwrap();
    assert_eq!(world.cell_of(id), Some((3, 0)));
    assert!(matches!(
        world.add_object(Prop::new(Body::new(f64::NAN, 0.0))),
        Err(WorldError::InvalidPosition { .. })
    ));
    assert_eq!(world.object_count(), 1);
}

#[test]
fn bouncer_stays_inside_and_turns_back() {
    let mut world = World::new(continuous_config(10.0, 10.0)).unwrap();
    let id = world
        .add_object(Bouncer::new(Body::new(9.5, 5.0).with_speed(1.0)))
        .unwrap();
    world.tick(1.0).unwrap();
    let body = world.body(id).unwrap();
    assert_eq!(body.x(), 10.0);
    assert_eq!(body.heading(), 180.0);
}

// ── Ordering ────────────────────────────────────────────────────────

#[test]
fn perceptions_refresh_before_each_decision() {
    let log = EventLog::new();
    let mut world = World::new(WorldConfig::default()).unwrap();
    world
        .add_agent(
            AgentBuilder::new(ScriptedAgent::new("a", log.clone()))
                .perception(ProbePerception::new("probe", log.clone())),
        )
        .unwrap();
    world.tick(0.1).unwrap();
    world.tick(0.1).unwrap();

    let events = log.events();
    assert_eq!(events.len(), 4);
    for (tick, pair) in events.chunks(2).enumerate() {
        let expected = (tick + 1) as f64;
        assert_eq!(
            pair[0],
            Event::Perceive {
                channel: "probe".into(),
                reading: expected,
            }
        );
        match &pair[1] {
            Event::Think { agent, percepts } => {
                assert_eq!(agent, "a");
                assert_eq!(percepts.scalar("probe"), Some(expected));
            }
            other => panic!("expected a decision, got {other:?}"),
        }
    }
}

/// Counts agents and reads another agent's position.
#[derive(Debug)]
struct Census {
    peer: AgentId,
}

impl Perception for Census {
    fn name(&self) -> &str {
        "census"
    }

    fn perceive(&self, _body: Option<&Body>, world: &World) -> Percept {
        let peer_seen = world
            .agent_body(self.peer)
            .and_then(|b| world.body(b))
            .is_some_and(|b| b.x() == 7.0);
        if peer_seen {
            Percept::Count(world.agent_count())
        } else {
            Percept::Count(0)
        }
    }
}

#[test]
fn perceptions_see_every_agent_during_a_tick() {
    let log = EventLog::new();
    let mut world = World::new(WorldConfig::default()).unwrap();
    let peer = world
        .add_agent(
            AgentBuilder::new(ScriptedAgent::new("peer", log.clone()))
                .body(Prop::new(Body::new(7.0, 1.0))),
        )
        .unwrap();
    let watcher = world
        .add_agent(
            AgentBuilder::new(ScriptedAgent::new("watcher", log.clone()))
                .perception(Census { peer }),
        )
        .unwrap();
    world.tick(0.1).unwrap();

    assert_eq!(world.percepts(watcher).unwrap().count("census"), Some(2));
    assert!(world.agent::<ScriptedAgent>(peer).is_some());
}

#[test]
fn agents_run_in_registration_order() {
    let log = EventLog::new();
    let mut world = World::new(WorldConfig::default()).unwrap();
    for label in ["first", "second", "third"] {
        world
            .add_agent(AgentBuilder::new(ScriptedAgent::new(label, log.clone())))
            .unwrap();
    }
    world.tick(0.1).unwrap();
    let order: Vec<String> = log
        .events()
        .into_iter()
        .filter_map(|e| match e {
            Event::Think { agent, .. } => Some(agent),
            _ => None,
        })
        .collect();
    assert_eq!(order, vec!["first", "second", "third"]);
}

#[test]
fn paused_world_does_nothing() {
    let log = EventLog::new();
    let mut world = World::new(WorldConfig {
        start_paused: true,
        ..WorldConfig::default()
    })
    .unwrap();
    let agent = world
        .add_agent(
            AgentBuilder::new(ScriptedAgent::new("a", log.clone()))
                .body(Prop::new(Body::new(10.0, 10.0).with_speed(5.0))),
        )
        .unwrap();
    let summary = world.tick(1.0).unwrap();
    assert!(summary.paused);
    assert!(log.events().is_empty());
    let body = world.agent_body(agent).unwrap();
    assert_eq!(world.body(body).unwrap().x(), 10.0);

    assert!(!world.toggle_pause());
    let summary = world.tick(1.0).unwrap();
    assert!(!summary.paused);
    assert_eq!(world.body(body).unwrap().x(), 15.0);
    assert_eq!(world.current_tick().0, 1);
}

// ── Actions ─────────────────────────────────────────────────────────

#[test]
fn body_actions_apply_before_integration() {
    let log = EventLog::new();
    let mut world = World::new(continuous_config(500.0, 500.0)).unwrap();
    let agent = world
        .add_agent(
            AgentBuilder::new(ScriptedAgent::new("a", log).then(vec![
                Action::SetHeading(370.0),
                Action::SetSpeed(10.0),
                Action::MoveTo { x: 100.0, y: 100.0 },
            ]))
            .body(Prop::new(Body::default())),
        )
        .unwrap();
    let summary = world.tick(1.0).unwrap();
    assert_eq!(summary.actions, 3);
    let body = world.body(world.agent_body(agent).unwrap()).unwrap();
    assert_eq!(body.heading(), 10.0);
    let expected_x = 100.0 + 10.0 * 10f64.to_radians().cos();
    assert!((body.x() - expected_x).abs() < 1e-9);
}

#[test]
fn body_action_without_body_aborts_tick() {
    let log = EventLog::new();
    let mut world = World::new(WorldConfig::default()).unwrap();
    let agent = world
        .add_agent(AgentBuilder::new(
            ScriptedAgent::new("a", log).then(vec![Action::Rotate(10.0)]),
        ))
        .unwrap();
    assert_eq!(
        world.tick(0.1),
        Err(TickError::Action {
            agent,
            source: WorldError::NoBody(agent),
        })
    );
    assert_eq!(world.agent_count(), 1);
}

#[test]
fn moves_to_non_finite_positions_are_rejected() {
    let log = EventLog::new();
    let mut world = World::new(grid_config(4, 4, EdgeBehavior::Clamp)).unwrap();
    let agent = world
        .add_agent(
            AgentBuilder::new(ScriptedAgent::new("a", log).then(vec![Action::MoveTo {
                x: f64::NAN,
                y: 1.0,
            }]))
            .body(Prop::new(Body::new(2.0, 2.0))),
        )
        .unwrap();
    assert!(matches!(
        world.tick(0.1),
        Err(TickError::Action {
            source: WorldError::InvalidPosition { .. },
            ..
        })
    ));
    let body = world.agent_body(agent).unwrap();
    assert_eq!(world.body(body).unwrap().x(), 2.0);
    assert_eq!(world.cell_of(body), Some((2, 2)));
}

#[test]
fn translating_to_infinity_is_rejected() {
    let log = EventLog::new();
    let mut world = World::new(continuous_config(100.0, 100.0)).unwrap();
    world
        .add_agent(
            AgentBuilder::new(ScriptedAgent::new("a", log).then(vec![Action::Translate {
                dx: f64::INFINITY,
                dy: 0.0,
            }]))
            .body(Prop::new(Body::new(2.0, 2.0))),
        )
        .unwrap();
    assert!(matches!(
        world.tick(0.1),
        Err(TickError::Action {
            source: WorldError::InvalidPosition { .. },
            ..
        })
    ));
}

#[test]
fn spawn_and_despawn() {
    let log = EventLog::new();
    let mut world = World::new(WorldConfig::default()).unwrap();
    let rock = world.add_object(Prop::new(Body::new(1.0, 1.0))).unwrap();
    world
        .add_agent(AgentBuilder::new(ScriptedAgent::new("a", log).then(vec![
            Action::Spawn(Box::new(Prop::new(Body::new(2.0, 2.0)))),
            Action::Despawn(rock),
        ])))
        .unwrap();
    world.tick(0.1).unwrap();
    assert!(world.object(rock).is_none());
    assert_eq!(world.object_count(), 1);
}

#[test]
fn despawning_a_body_retires_its_agent() {
    let log = EventLog::new();
    let mut world = World::new(WorldConfig::default()).unwrap();
    let body = world.add_object(Prop::new(Body::new(5.0, 5.0))).unwrap();
    // Registered first so it runs before its prey.
    world
        .add_agent(AgentBuilder::new(
            ScriptedAgent::new("hunter", log.clone()).then(vec![Action::Despawn(body)]),
        ))
        .unwrap();
    let prey = world
        .add_agent(AgentBuilder::new(ScriptedAgent::new("prey", log.clone())).existing_body(body))
        .unwrap();
    world.tick(0.1).unwrap();

    assert_eq!(world.agent_count(), 1);
    assert!(world.agent::<ScriptedAgent>(prey).is_none());
    let thinkers = log
        .events()
        .into_iter()
        .filter(|e| matches!(e, Event::Think { .. }))
        .count();
    assert_eq!(thinkers, 1);
}

#[test]
fn removing_a_body_outside_a_tick_removes_its_agent() {
    let mut world = World::new(WorldConfig::default()).unwrap();
    let agent = world
        .add_agent(
            AgentBuilder::new(ScriptedAgent::new("a", EventLog::new()))
                .body(Prop::new(Body::new(5.0, 5.0))),
        )
        .unwrap();
    let body = world.agent_body(agent).unwrap();
    world.remove_object(body).unwrap();
    assert_eq!(world.agent_count(), 0);
    world.tick(0.1).unwrap();
}

// ── Failures ────────────────────────────────────────────────────────

#[test]
fn agent_fault_halts_tick_but_keeps_agents() {
    let log = EventLog::new();
    let mut world = World::new(WorldConfig::default()).unwrap();
    let bad = world
        .add_agent(AgentBuilder::new(
            ScriptedAgent::new("bad", log.clone()).failing_on(1),
        ))
        .unwrap();
    world
        .add_agent(AgentBuilder::new(ScriptedAgent::new("later", log.clone())))
        .unwrap();
    let err = world.tick(0.1).unwrap_err();
    assert!(matches!(err, TickError::Agent { agent, .. } if agent == bad));
    assert_eq!(world.agent_count(), 2);
    assert_eq!(world.current_tick().0, 0);
    assert_eq!(log.events().len(), 1);

    // The next tick proceeds normally.
    world.tick(0.1).unwrap();
    assert_eq!(world.agent::<ScriptedAgent>(bad).unwrap().calls(), 2);
}

#[test]
fn agent_registration_errors() {
    let log = EventLog::new();
    let mut world = World::new(WorldConfig::default()).unwrap();
    assert_eq!(
        world.add_agent(
            AgentBuilder::new(ScriptedAgent::new("a", log.clone())).existing_body(ObjectId(42))
        ),
        Err(WorldError::UnknownObject(ObjectId(42)))
    );
    let body = world.add_object(Prop::new(Body::default())).unwrap();
    let owner = world
        .add_agent(AgentBuilder::new(ScriptedAgent::new("a", log.clone())).existing_body(body))
        .unwrap();
    assert_eq!(
        world.add_agent(AgentBuilder::new(ScriptedAgent::new("b", log)).existing_body(body)),
        Err(WorldError::BodyAlreadyOwned {
            object: body,
            owner,
        })
    );
    assert!(world.remove_agent(owner).is_ok());
    assert!(matches!(
        world.remove_agent(AgentId(99)),
        Err(WorldError::UnknownAgent(_))
    ));
    assert!(world.object(body).is_some());
}

// ── Grid queries ────────────────────────────────────────────────────

#[test]
fn grid_queries() {
    let mut world = World::new(WorldConfig {
        topology: Topology::Grid {
            cols: 5,
            rows: 5,
            cell_size: 20.0,
            edge: EdgeBehavior::Clamp,
        },
        ..WorldConfig::default()
    })
    .unwrap();
    let centre = world.add_object(Prop::new(Body::new(2.0, 2.0))).unwrap();
    let corner = world.add_object(Bouncer::new(Body::new(1.0, 1.0))).unwrap();
    world.add_object(Prop::new(Body::new(4.0, 4.0))).unwrap();

    assert!(!world.is_empty(2, 2));
    assert!(world.is_empty(0, 0));
    assert_eq!(world.neighbours(2, 2), vec![corner]);
    assert!(world.has_object_at::<Bouncer>(1, 1));
    assert!(!world.has_object_at::<Prop>(1, 1));
    assert!(world.has_object_at::<Prop>(4, 4));
    assert_eq!(world.cell_at(45.0, 59.0), Some((2, 2)));
    assert_eq!(world.cell_contents(2, 2), &[centre]);
}

// ── Influence ───────────────────────────────────────────────────────

#[test]
fn perceptions_see_field_recomputed_this_tick() {
    let log = EventLog::new();
    let mut world = World::new(WorldConfig {
        topology: Topology::Continuous {
            width: 100.0,
            height: 100.0,
        },
        influence: Some(InfluenceConfig {
            sector: 10.0,
            ..InfluenceConfig::default()
        }),
        ..WorldConfig::default()
    })
    .unwrap();
    let agent = world
        .add_agent(
            AgentBuilder::new(ScriptedAgent::new("a", log.clone()))
                .body(Prop::new(Body::new(55.0, 55.0)))
                .perception(FieldProbe {
                    name: "light".into(),
                }),
        )
        .unwrap();
    world
        .add_influence(CircularSource::linear(55.0, 55.0, 0.8, 0.01).with_decay(0.4))
        .unwrap();
    assert_eq!(world.sample_field(55.0, 55.0), 0.0);

    let summary = world.tick(0.5).unwrap();
    assert!(summary.field_recomputed);
    let seen = world.percepts(agent).unwrap().scalar("light").unwrap();
    assert!((seen - 0.6).abs() < 1e-9);

    assert!(matches!(
        world.add_influence(CircularSource::linear(150.0, 5.0, 1.0, 0.1)),
        Err(WorldError::Influence(_))
    ));
}

#[test]
fn influence_without_field_is_rejected() {
    let mut world = World::new(WorldConfig::default()).unwrap();
    assert_eq!(
        world.add_influence(CircularSource::linear(1.0, 1.0, 1.0, 0.1)),
        Err(WorldError::NoField)
    );
    assert_eq!(world.sample_field(1.0, 1.0), 0.0);
}

// ── Navigation ──────────────────────────────────────────────────────

#[derive(Debug)]
struct Wall(Body);

impl SimObject for Wall {
    fn body(&self) -> &Body {
        &self.0
    }
    fn body_mut(&mut self) -> &mut Body {
        &mut self.0
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

fn nav_world() -> World {
    let mut world = World::new(WorldConfig {
        navigation: Some(NavigationConfig {
            neighbourhood: Neighbourhood::Moore,
            max_expansions: None,
        }),
        ..grid_config(3, 3, EdgeBehavior::Clamp)
    })
    .unwrap();
    world
        .set_cell_classifier(Box::new(|o: &dyn SimObject| {
            o.is::<Wall>().then_some(CellState::Wall)
        }))
        .unwrap();
    world
}

#[test]
fn navigation_routes_around_walls() {
    let mut world = nav_world();
    world.add_object(Wall(Body::new(1.0, 0.0))).unwrap();
    assert!(world.refresh_navigation().unwrap());
    assert!(!world.refresh_navigation().unwrap());
    assert!(!world.is_walkable(1, 0));

    let path = world.find_path((0, 0), (2, 0)).unwrap().unwrap();
    assert_eq!(path.len(), 2);
    assert!((path.cost - 2.0 * std::f64::consts::SQRT_2).abs() < 1e-9);
}

#[test]
fn moving_a_wall_rebuilds_the_graph() {
    let mut world = nav_world();
    let wall = world.add_object(Wall(Body::new(1.0, 0.0))).unwrap();
    world.tick(0.1).unwrap();
    assert!(!world.is_walkable(1, 0));

    world.object_mut(wall).unwrap().body_mut().move_to(1.0, 1.0);
    let summary = world.tick(0.1).unwrap();
    assert!(!summary.navigation_rebuilt);
    let summary = world.tick(0.1).unwrap();
    assert!(summary.navigation_rebuilt);
    assert!(world.is_walkable(1, 0));
    assert!(!world.is_walkable(1, 1));
}

#[test]
fn navigation_errors() {
    let world = World::new(WorldConfig::default()).unwrap();
    assert_eq!(
        world.find_path((0, 0), (1, 1)),
        Err(WorldError::NavigationUnavailable)
    );
    let mut world = nav_world();
    world.refresh_navigation().unwrap();
    assert_eq!(
        world.find_path((0, 0), (7, 1)),
        Err(WorldError::CellOutOfBounds { x: 7, y: 1 })
    );
}

// ── Rendering ───────────────────────────────────────────────────────

#[test]
fn render_emits_layers_then_objects() {
    let mut world = World::new(WorldConfig {
        influence: Some(InfluenceConfig {
            sector: 1.0,
            ..InfluenceConfig::default()
        }),
        navigation: Some(NavigationConfig::default()),
        topology: Topology::Grid {
            cols: 2,
            rows: 1,
            cell_size: 10.0,
            edge: EdgeBehavior::Clamp,
        },
        ..WorldConfig::default()
    })
    .unwrap();
    let id = world.add_object(Prop::new(Body::new(1.0, 0.0))).unwrap();
    world.refresh_navigation().unwrap();

    let mut r = RecordingRenderer::new();
    world.render(&mut r, RenderOptions::default());
    assert_eq!(r.calls.len(), 1);
    assert!(matches!(
        r.calls[0],
        DrawCall::Object { id: drawn, at, .. } if drawn == id && at.x == 15.0 && at.y == 5.0
    ));

    let mut r = RecordingRenderer::new();
    world.render(
        &mut r,
        RenderOptions {
            show_field: true,
            show_graph: true,
        },
    );
    let fields = r
        .calls
        .iter()
        .filter(|c| matches!(c, DrawCall::FieldCell { size, .. } if *size == 10.0))
        .count();
    let edges = r
        .calls
        .iter()
        .filter(|c| matches!(c, DrawCall::GraphEdge { .. }))
        .count();
    assert_eq!(fields, 2);
    assert_eq!(edges, 2);
    assert_eq!(r.objects().count(), 1);
    assert!(matches!(r.calls.last(), Some(DrawCall::Object { .. })));
}
