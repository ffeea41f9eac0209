//! Spatial structures for Vivarium simulations.
//!
//! An [`OccupancyGrid`] tags every cell as free, wall, or weighted; a
//! [`GraphBuilder`] turns it into a [`Graph`] of weighted adjacency lists
//! that the pathfinder searches through the [`WeightedGraph`] trait.
//!
//! # Neighbourhoods
//!
//! - [`Neighbourhood::VonNeumann`]: 4-connected (N/S/E/W)
//! - [`Neighbourhood::Moore`]: 8-connected (cardinal + diagonal)
//!
//! Node ids are row-major cell indices, `id = y * width + x`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod edge;
pub mod error;
pub mod graph;
pub mod grid;
pub mod neighbourhood;

pub use builder::GraphBuilder;
pub use edge::EdgeBehavior;
pub use error::SpaceError;
pub use graph::{Edge, Graph, WeightedGraph};
pub use grid::{CellState, OccupancyGrid};
pub use neighbourhood::Neighbourhood;
