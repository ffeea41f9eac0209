//! Reference objects and agents for Vivarium simulations.
//!
//! These are the building blocks the demos are made of:
//!
//! - [`Wall`] and [`Terrain`]: static objects that block or weight grid
//!   cells, read by [`classify`] when the navigation graph is rebuilt.
//! - [`LightSource`] and [`LightSensor`]: a light placed into the
//!   influence field and a body-mounted sensor that samples it.
//! - [`Vehicle`]: Braitenberg vehicles 2a, 2b, 3a and 3b.
//! - [`RandomWalker`]: turns at random every fifth of a second.
//! - [`Wanderer`]: follows an A* route one cell at a time.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod light;
pub mod terrain;
pub mod vehicle;
pub mod walker;
pub mod wanderer;

pub use light::{place_light, LightSensor, LightSource};
pub use terrain::{classify, terrain_classifier, Terrain, Wall};
pub use vehicle::{Vehicle, VehicleBody, Wiring};
pub use walker::RandomWalker;
pub use wanderer::Wanderer;
