//! Error types for worlds, agents and ticks.

use vivarium_core::{AgentId, ObjectId};
use vivarium_influence::InfluenceError;
use vivarium_path::PathError;
use vivarium_space::SpaceError;

/// Rejected world mutations and failed world queries.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum WorldError {
    /// No object with this id.
    #[error("no object with id {0}")]
    UnknownObject(ObjectId),
    /// No agent with this id.
    #[error("no agent with id {0}")]
    UnknownAgent(AgentId),
    /// The object is already the body of another agent.
    #[error("object {object} is already the body of agent {owner}")]
    BodyAlreadyOwned {
        /// The contested object.
        object: ObjectId,
        /// The agent that owns it.
        owner: AgentId,
    },
    /// A body action was issued by an agent without a body.
    #[error("agent {0} has no body")]
    NoBody(AgentId),
    /// An object was placed at a non-finite position.
    #[error("position ({x}, {y}) is not finite")]
    InvalidPosition {
        /// Rejected x.
        x: f64,
        /// Rejected y.
        y: f64,
    },
    /// The world was built without a navigation layer.
    #[error("navigation is not configured for this world")]
    NavigationUnavailable,
    /// The world was built without an influence field.
    #[error("influence field is not configured for this world")]
    NoField,
    /// A cell coordinate lies outside the grid.
    #[error("cell ({x}, {y}) is outside the grid")]
    CellOutOfBounds {
        /// Column.
        x: i32,
        /// Row.
        y: i32,
    },
    /// Occupancy grid failure.
    #[error(transparent)]
    Space(#[from] SpaceError),
    /// Pathfinding failure.
    #[error(transparent)]
    Path(#[from] PathError),
    /// Influence field failure.
    #[error(transparent)]
    Influence(#[from] InfluenceError),
}

/// A fault raised from an agent's decision step.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum AgentError {
    /// A named percept the agent relies on was not produced.
    #[error("missing percept `{0}`")]
    MissingPercept(String),
    /// A world query made while deciding failed.
    #[error(transparent)]
    World(#[from] WorldError),
    /// Any other agent-specific failure.
    #[error("{0}")]
    Fault(String),
}

impl AgentError {
    /// An agent-specific failure with a message.
    pub fn fault(message: impl Into<String>) -> Self {
        Self::Fault(message.into())
    }
}

impl From<PathError> for AgentError {
    fn from(e: PathError) -> Self {
        Self::World(WorldError::Path(e))
    }
}

/// An aborted tick.
///
/// The world stays consistent (no agent is lost) but the remainder of the
/// tick, including motion integration, does not run.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TickError {
    /// The agent's decision step failed.
    #[error("agent {agent} failed to decide: {source}")]
    Agent {
        /// The failing agent.
        agent: AgentId,
        /// What went wrong.
        source: AgentError,
    },
    /// Applying one of the agent's actions failed.
    #[error("action from agent {agent} was rejected: {source}")]
    Action {
        /// The acting agent.
        agent: AgentId,
        /// What went wrong.
        source: WorldError,
    },
    /// The navigation layer could not be rebuilt.
    #[error("navigation rebuild failed: {0}")]
    Navigation(#[source] WorldError),
}

/// Configuration validation and parsing failures.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A continuous extent or cell size is not finite and positive.
    #[error("{name} must be finite and positive, got {value}")]
    InvalidDimension {
        /// Which setting.
        name: &'static str,
        /// The invalid value.
        value: f64,
    },
    /// A grid has zero columns or rows.
    #[error("grid must have at least one column and one row, got {cols}x{rows}")]
    EmptyGrid {
        /// Columns.
        cols: u32,
        /// Rows.
        rows: u32,
    },
    /// `tick_rate_hz` is NaN, infinite, zero or negative.
    #[error("tick_rate_hz must be finite and positive, got {value}")]
    InvalidTickRate {
        /// The invalid value.
        value: f64,
    },
    /// Navigation needs a grid topology.
    #[error("navigation requires a grid topology")]
    NavigationNeedsGrid,
    /// The grid layer could not be built.
    #[error(transparent)]
    Space(#[from] SpaceError),
    /// The influence field could not be built.
    #[error(transparent)]
    Influence(#[from] InfluenceError),
    /// The TOML text could not be parsed.
    #[error("invalid world config: {reason}")]
    Parse {
        /// Parser message.
        reason: String,
    },
}
