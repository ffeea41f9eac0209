//! A* pathfinding for Vivarium simulations.
//!
//! [`AStar`] runs a best-first search over any [`WeightedGraph`], guided by
//! a [`Heuristic`]. The result distinguishes three outcomes:
//!
//! - `Ok(Some(path))`: the cheapest route, excluding the start node
//! - `Ok(None)`: the destination is unreachable
//! - `Err(PathError)`: a lookup failure or an exhausted expansion budget
//!
//! [`WeightedGraph`]: vivarium_space::WeightedGraph

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod astar;
pub mod error;
pub mod heuristic;

pub use astar::{find_path, AStar, Path};
pub use error::{NodeRole, PathError};
pub use heuristic::{EuclideanHeuristic, Heuristic, ZeroHeuristic};
