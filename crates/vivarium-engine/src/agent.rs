//! Decision-making agents and the actions they issue.

use crate::body::Body;
use crate::error::AgentError;
use crate::object::SimObject;
use crate::perception::{Perception, Percepts};
use crate::world::World;
use std::any::Any;
use std::fmt;
use vivarium_core::{AgentId, ObjectId};

/// An effect requested by an agent's decision step.
///
/// Body actions apply to the acting agent's own body and fail if it has
/// none. Actions are applied in order, immediately after the agent that
/// issued them has decided.
#[derive(Debug)]
pub enum Action {
    /// Set the body's speed.
    SetSpeed(f64),
    /// Set the body's turn rate in degrees per second.
    SetAngularVelocity(f64),
    /// Drive the body as a differential vehicle; see
    /// [`Body::set_wheel_speeds`].
    SetWheels {
        /// Left throttle.
        left: f64,
        /// Right throttle.
        right: f64,
        /// Axle length.
        axle: f64,
        /// Speed at full throttle.
        max: f64,
    },
    /// Set the body's heading in degrees.
    SetHeading(f64),
    /// Turn the body by degrees.
    Rotate(f64),
    /// Teleport the body.
    MoveTo {
        /// Target x.
        x: f64,
        /// Target y.
        y: f64,
    },
    /// Shift the body.
    Translate {
        /// Shift in x.
        dx: f64,
        /// Shift in y.
        dy: f64,
    },
    /// Add a new object to the world.
    Spawn(Box<dyn SimObject>),
    /// Remove an object from the world. Removing an agent's body retires
    /// that agent.
    Despawn(ObjectId),
}

/// What an agent sees when it decides.
#[derive(Clone, Copy)]
pub struct ThinkContext<'w> {
    /// The deciding agent.
    pub agent: AgentId,
    /// Seconds elapsed this tick.
    pub dt: f64,
    /// Readings refreshed this tick, before this call.
    pub percepts: &'w Percepts,
    /// The agent's body object, if any.
    pub body_id: Option<ObjectId>,
    /// Read-only world access.
    pub world: &'w World,
}

impl<'w> ThinkContext<'w> {
    /// The agent's body state, if it has a body.
    pub fn body(&self) -> Option<&'w Body> {
        self.body_id.and_then(|id| self.world.body(id))
    }

    /// The named scalar reading, or [`AgentError::MissingPercept`].
    pub fn scalar(&self, name: &str) -> Result<f64, AgentError> {
        self.percepts
            .scalar(name)
            .ok_or_else(|| AgentError::MissingPercept(name.to_string()))
    }
}

/// Decision logic run once per tick.
pub trait Agent: Any + fmt::Debug {
    /// Decide on zero or more actions. Errors abort the tick.
    fn think(&mut self, ctx: &ThinkContext<'_>) -> Result<Vec<Action>, AgentError>;

    /// Upcast for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<'a> dyn Agent + 'a {
    /// The agent as a `T`, if it is one.
    pub fn downcast_ref<T: Agent>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// The agent as a mutable `T`, if it is one.
    pub fn downcast_mut<T: Agent>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

#[derive(Debug)]
pub(crate) enum BodySpec {
    None,
    New(Box<dyn SimObject>),
    Existing(ObjectId),
}

/// Everything needed to register an agent with
/// [`World::add_agent`](crate::World::add_agent).
///
/// # Examples
///
/// ```
/// use vivarium_engine::{Action, Agent, AgentBuilder, AgentError, Body, Prop, ThinkContext};
/// use vivarium_engine::{World, WorldConfig};
/// use std::any::Any;
///
/// #[derive(Debug)]
/// struct Spinner;
///
/// impl Agent for Spinner {
///     fn think(&mut self, _ctx: &ThinkContext<'_>) -> Result<Vec<Action>, AgentError> {
///         Ok(vec![Action::Rotate(90.0)])
///     }
///     fn as_any(&self) -> &dyn Any { self }
///     fn as_any_mut(&mut self) -> &mut dyn Any { self }
/// }
///
/// let mut world = World::new(WorldConfig::default()).unwrap();
/// let id = world
///     .add_agent(AgentBuilder::new(Spinner).body(Prop::new(Body::new(10.0, 10.0))))
///     .unwrap();
/// world.tick(0.1).unwrap();
/// let body = world.agent_body(id).and_then(|b| world.body(b)).unwrap();
/// assert_eq!(body.heading(), 90.0);
/// ```
#[derive(Debug)]
pub struct AgentBuilder {
    pub(crate) agent: Box<dyn Agent>,
    pub(crate) body: BodySpec,
    pub(crate) perceptions: Vec<Box<dyn Perception>>,
}

impl AgentBuilder {
    /// Start registering `agent`, initially without a body.
    pub fn new(agent: impl Agent) -> Self {
        Self {
            agent: Box::new(agent),
            body: BodySpec::None,
            perceptions: Vec::new(),
        }
    }

    /// Give the agent a new body object, added to the world with it.
    pub fn body(mut self, body: impl SimObject) -> Self {
        self.body = BodySpec::New(Box::new(body));
        self
    }

    /// Use an object already in the world as the body.
    pub fn existing_body(mut self, id: ObjectId) -> Self {
        self.body = BodySpec::Existing(id);
        self
    }

    /// Add a perception channel. A later channel with the same name
    /// overwrites the earlier reading each tick.
    pub fn perception(mut self, perception: impl Perception + 'static) -> Self {
        self.perceptions.push(Box::new(perception));
        self
    }
}
