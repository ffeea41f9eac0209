//! Recording fixtures for world and agent tests.
//!
//! All fixtures share an [`EventLog`] so a test can assert the exact
//! interleaving of perception, decision and drawing calls.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use vivarium_core::{ObjectId, Point2};
use vivarium_engine::{
    Action, Agent, AgentError, Body, Percept, Perception, Percepts, Renderer, Shape, ThinkContext,
    World,
};

/// One observed call.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A probe perception was read.
    Perceive { channel: String, reading: f64 },
    /// A scripted agent decided, seeing these readings.
    Think { agent: String, percepts: Percepts },
}

/// Shared, ordered record of fixture calls.
#[derive(Clone, Debug, Default)]
pub struct EventLog(Rc<RefCell<Vec<Event>>>);

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    /// Copy of everything recorded so far.
    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// A perception whose reading increments by one every time it is read.
///
/// The reading therefore equals the number of refreshes, which lets tests
/// check that each decision saw a fresh value.
#[derive(Debug)]
pub struct ProbePerception {
    name: String,
    reads: Cell<u32>,
    log: EventLog,
}

impl ProbePerception {
    pub fn new(name: impl Into<String>, log: EventLog) -> Self {
        Self {
            name: name.into(),
            reads: Cell::new(0),
            log,
        }
    }
}

impl Perception for ProbePerception {
    fn name(&self) -> &str {
        &self.name
    }

    fn perceive(&self, _body: Option<&Body>, _world: &World) -> Percept {
        let n = self.reads.get() + 1;
        self.reads.set(n);
        self.log.push(Event::Perceive {
            channel: self.name.clone(),
            reading: f64::from(n),
        });
        Percept::Scalar(f64::from(n))
    }
}

/// Reads the influence field at the body position.
#[derive(Debug)]
pub struct FieldProbe {
    pub name: String,
}

impl Perception for FieldProbe {
    fn name(&self) -> &str {
        &self.name
    }

    fn perceive(&self, body: Option<&Body>, world: &World) -> Percept {
        let value = body.map_or(0.0, |b| world.sample_field(b.x(), b.y()));
        Percept::Scalar(value)
    }
}

/// An agent that logs every decision and replays a queue of action
/// batches, one batch per tick. Once the queue runs dry it does nothing.
#[derive(Debug)]
pub struct ScriptedAgent {
    label: String,
    script: VecDeque<Vec<Action>>,
    log: EventLog,
    fail_on: Option<u32>,
    calls: u32,
}

impl ScriptedAgent {
    pub fn new(label: impl Into<String>, log: EventLog) -> Self {
        Self {
            label: label.into(),
            script: VecDeque::new(),
            log,
            fail_on: None,
            calls: 0,
        }
    }

    /// Queue one tick's worth of actions.
    pub fn then(mut self, actions: Vec<Action>) -> Self {
        self.script.push_back(actions);
        self
    }

    /// Fail on the `n`th decision (1-based).
    pub fn failing_on(mut self, n: u32) -> Self {
        self.fail_on = Some(n);
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls
    }
}

impl Agent for ScriptedAgent {
    fn think(&mut self, ctx: &ThinkContext<'_>) -> Result<Vec<Action>, AgentError> {
        self.calls += 1;
        self.log.push(Event::Think {
            agent: self.label.clone(),
            percepts: ctx.percepts.clone(),
        });
        if self.fail_on == Some(self.calls) {
            return Err(AgentError::fault(format!("{} gave up", self.label)));
        }
        Ok(self.script.pop_front().unwrap_or_default())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Object {
        id: ObjectId,
        at: Point2,
        heading: f64,
        shapes: usize,
    },
    FieldCell {
        col: usize,
        row: usize,
        size: f64,
        intensity: f64,
    },
    GraphEdge {
        from: Point2,
        to: Point2,
    },
}

/// A renderer that records calls instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<DrawCall>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn objects(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Object { .. }))
    }
}

impl Renderer for RecordingRenderer {
    fn draw_object(&mut self, id: ObjectId, body: &Body, shapes: &[Shape]) {
        self.calls.push(DrawCall::Object {
            id,
            at: body.position(),
            heading: body.heading(),
            shapes: shapes.len(),
        });
    }

    fn draw_field_cell(&mut self, col: usize, row: usize, size: f64, intensity: f64) {
        self.calls.push(DrawCall::FieldCell {
            col,
            row,
            size,
            intensity,
        });
    }

    fn draw_graph_edge(&mut self, from: Point2, to: Point2) {
        self.calls.push(DrawCall::GraphEdge { from, to });
    }
}
