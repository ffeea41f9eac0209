//! Vivarium: a small 2D agent-simulation toolkit.
//!
//! This is the facade crate that re-exports the public API of every
//! Vivarium sub-crate. Depending on `vivarium` alone is enough for most
//! simulations.
//!
//! # Quick start
//!
//! ```rust
//! use vivarium::prelude::*;
//!
//! // A 5x5 grid world with a navigation layer.
//! let config = WorldConfig {
//!     topology: Topology::Grid { cols: 5, rows: 5, cell_size: 20.0, edge: EdgeBehavior::Clamp },
//!     navigation: Some(NavigationConfig::default()),
//!     ..WorldConfig::default()
//! };
//! let mut world = World::new(config).unwrap();
//! world.set_cell_classifier(vivarium::agents::terrain_classifier()).unwrap();
//! for y in 0..4 {
//!     world.add_object(vivarium::agents::Wall::new(2.0, y as f64, 20.0)).unwrap();
//! }
//!
//! let me = world
//!     .add_agent(AgentBuilder::new(Wanderer::new()).body(Prop::new(Body::new(0.0, 0.0))))
//!     .unwrap();
//! world.agent_mut::<Wanderer>(me).unwrap().set_target(4, 0);
//! world.tick(0.2).unwrap();
//!
//! // Planned around the wall: down, across the gap and back up.
//! assert_eq!(world.agent::<Wanderer>(me).unwrap().remaining(), 12);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `vivarium-core` | IDs and 2D geometry |
//! | [`space`] | `vivarium-space` | Occupancy grids, graphs, graph builder |
//! | [`path`] | `vivarium-path` | A* search and heuristics |
//! | [`influence`] | `vivarium-influence` | Influence sources and the sectored field |
//! | [`engine`] | `vivarium-engine` | World, objects, agents, tick loop |
//! | [`agents`] | `vivarium-agents` | Reference objects and agents |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// IDs and geometry (`vivarium-core`).
pub use vivarium_core as types;

/// Occupancy grids and weighted graphs (`vivarium-space`).
///
/// [`space::GraphBuilder`] turns an [`space::OccupancyGrid`] into a
/// [`space::Graph`].
pub use vivarium_space as space;

/// A* pathfinding (`vivarium-path`).
pub use vivarium_path as path;

/// Influence fields (`vivarium-influence`).
///
/// [`influence::InfluenceField`] sums [`influence::Influence`] sources into
/// a cached grid of sectors.
pub use vivarium_influence as influence;

/// The world and its tick loop (`vivarium-engine`).
pub use vivarium_engine as engine;

/// Walls, terrain, lights, vehicles, walkers and wanderers
/// (`vivarium-agents`).
pub use vivarium_agents as agents;

/// Common imports for typical Vivarium usage.
///
/// ```rust
/// use vivarium::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use vivarium_core::{AgentId, NodeId, ObjectId, Point2, SourceId, TickId};

    // Space
    pub use vivarium_space::{CellState, EdgeBehavior, Graph, GraphBuilder, Neighbourhood, OccupancyGrid};

    // Pathfinding
    pub use vivarium_path::{find_path, AStar, EuclideanHeuristic, Heuristic, Path};

    // Influence
    pub use vivarium_influence::{CircularSource, DiffuseFalloff, Influence, InfluenceField, LinearFalloff};

    // Engine
    pub use vivarium_engine::{
        Action, Agent, AgentBuilder, AgentError, Body, FixedStep, NavigationConfig, InfluenceConfig,
        Percept, Perception, Prop, RenderOptions, Renderer, SimObject, ThinkContext, TickError,
        Topology, World, WorldConfig, WorldError,
    };

    // Reference agents
    pub use vivarium_agents::{LightSensor, RandomWalker, Vehicle, Wanderer, Wiring};
}
