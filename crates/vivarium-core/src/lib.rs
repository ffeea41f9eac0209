//! Core types for the Vivarium agent-simulation toolkit.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the identifiers and the small amount of 2D geometry shared by the
//! grid, pathfinding, influence and engine crates.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod geom;
pub mod id;

pub use geom::{normalize_degrees, Point2, DEG2RAD, RAD2DEG};
pub use id::{AgentId, NodeId, ObjectId, SourceId, TickId};
