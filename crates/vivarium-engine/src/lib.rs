//! World model and tick loop for Vivarium simulations.
//!
//! A [`World`] owns objects ([`SimObject`]) and agents ([`Agent`]). Each
//! call to [`World::tick`] steps the optional influence field, refreshes
//! each agent's [`Perception`]s, lets it decide on [`Action`]s, integrates
//! motion and enforces the world boundary.
//!
//! The world never owns a clock: the driver calls `tick` at whatever rate
//! it likes, typically through a [`FixedStep`]. Drawing goes through a
//! [`Renderer`] supplied by the caller.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod agent;
pub mod body;
pub mod clock;
pub mod config;
pub mod error;
pub mod grid_index;
pub mod navigation;
pub mod object;
pub mod perception;
pub mod render;
pub mod shape;
pub mod topology;
pub mod world;

pub use agent::{Action, Agent, AgentBuilder, ThinkContext};
pub use body::Body;
pub use clock::FixedStep;
pub use config::{InfluenceConfig, NavigationConfig, WorldConfig};
pub use error::{AgentError, ConfigError, TickError, WorldError};
pub use grid_index::GridIndex;
pub use navigation::{CellClassifier, Navigation};
pub use object::{Bouncer, Bounds, Prop, SimObject};
pub use perception::{Percept, Perception, Percepts};
pub use render::{RenderOptions, Renderer};
pub use shape::{Color, Shape};
pub use topology::Topology;
pub use world::{TickSummary, World};
