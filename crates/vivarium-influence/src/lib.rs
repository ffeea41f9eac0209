//! Influence fields for Vivarium simulations.
//!
//! An [`InfluenceField`] caches one scalar per square sector over a
//! rectangular area. Point sources implementing [`Influence`] contribute
//! additively; the cache is rebuilt by [`InfluenceField::recompute`] and
//! read by [`InfluenceField::sample`].
//!
//! Mutations mark the field dirty. Under [`RecomputePolicy::Deferred`] the
//! owner decides when to recompute (typically once per tick through
//! [`InfluenceField::refresh`]); under [`RecomputePolicy::Eager`] every
//! mutation recomputes immediately.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod falloff;
pub mod field;
pub mod source;

pub use error::InfluenceError;
pub use falloff::{DiffuseFalloff, Falloff, LinearFalloff};
pub use field::{InfluenceField, RecomputePolicy};
pub use source::{CircularSource, Influence};
