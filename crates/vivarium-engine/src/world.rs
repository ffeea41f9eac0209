//! The world: objects, agents, optional layers and the tick loop.

use crate::agent::{Action, Agent, AgentBuilder, BodySpec, ThinkContext};
use crate::body::Body;
use crate::config::WorldConfig;
use crate::error::{ConfigError, TickError, WorldError};
use crate::grid_index::GridIndex;
use crate::navigation::{CellClassifier, Navigation};
use crate::object::{Bounds, SimObject};
use crate::perception::{Percept, Perception, Percepts};
use crate::render::{RenderOptions, Renderer};
use crate::topology::Topology;
use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::{debug, trace, warn};
use vivarium_core::{AgentId, ObjectId, Point2, SourceId, TickId};
use vivarium_influence::{Influence, InfluenceField};
use vivarium_path::{AStar, EuclideanHeuristic, Path};
use vivarium_space::{Graph, OccupancyGrid, WeightedGraph};

// ── TickSummary ────────────────────────────────────────────────────

/// What one call to [`World::tick`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Tick counter after the call.
    pub tick: TickId,
    /// Whether the world was paused (nothing changed).
    pub paused: bool,
    /// Agents that decided.
    pub agents: usize,
    /// Actions applied.
    pub actions: usize,
    /// Whether the influence field was recomputed.
    pub field_recomputed: bool,
    /// Whether the navigation graph was rebuilt.
    pub navigation_rebuilt: bool,
    /// Objects whose grid cell changed.
    pub relocated: usize,
}

// ── AgentSlot ──────────────────────────────────────────────────────

/// `agent` is only `None` while that agent is deciding.
#[derive(Debug)]
struct AgentSlot {
    agent: Option<Box<dyn Agent>>,
    body: Option<ObjectId>,
    perceptions: Vec<Box<dyn Perception>>,
    percepts: Percepts,
}

impl AgentSlot {
    fn readings(&self, world: &World) -> Vec<(String, Percept)> {
        let body = self.body.and_then(|id| world.body(id));
        self.perceptions
            .iter()
            .map(|p| (p.name().to_string(), p.perceive(body, world)))
            .collect()
    }
}

// ── World ──────────────────────────────────────────────────────────

/// Owns every simulated object and agent and advances them in ticks.
///
/// Each unpaused [`tick`](World::tick) runs, in order:
///
/// 1. influence decay, then a field recompute if it became dirty;
/// 2. a navigation rebuild if objects changed cell since the last one;
/// 3. for each agent in registration order: refresh perceptions, decide,
///    apply the returned actions;
/// 4. motion integration of every object, then boundary enforcement;
/// 5. grid re-indexing of objects whose cell changed.
#[derive(Debug)]
pub struct World {
    topology: Topology,
    objects: IndexMap<ObjectId, Box<dyn SimObject>>,
    agents: IndexMap<AgentId, AgentSlot>,
    owners: HashMap<ObjectId, AgentId>,
    next_object: u32,
    next_agent: u32,
    field: Option<InfluenceField>,
    grid: Option<GridIndex>,
    navigation: Option<Navigation>,
    paused: bool,
    tick: TickId,
}

impl World {
    /// Build an empty world from a validated configuration.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let topology = config.topology;
        let field = match config.influence {
            Some(inf) => {
                let (w, h) = topology.extent();
                Some(InfluenceField::new(w, h, inf.sector, inf.maximum)?.with_policy(inf.policy))
            }
            None => None,
        };
        let grid = topology
            .grid_size()
            .map(|(cols, rows)| GridIndex::new(cols, rows));
        let navigation = match (config.navigation, topology.grid_size()) {
            (Some(nav), Some((cols, rows))) => Some(Navigation::new(
                cols,
                rows,
                nav.neighbourhood,
                nav.max_expansions,
            )?),
            _ => None,
        };
        debug!(?topology, field = field.is_some(), navigation = navigation.is_some(), "world created");
        Ok(Self {
            topology,
            objects: IndexMap::new(),
            agents: IndexMap::new(),
            owners: HashMap::new(),
            next_object: 0,
            next_agent: 0,
            field,
            grid,
            navigation,
            paused: config.start_paused,
            tick: TickId::default(),
        })
    }

    // ── State ──────────────────────────────────────────────────────

    /// World shape and boundary policy.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Valid position range.
    pub fn bounds(&self) -> Bounds {
        self.topology.bounds()
    }

    /// Ticks completed so far.
    pub fn current_tick(&self) -> TickId {
        self.tick
    }

    /// Whether ticks are currently no-ops.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause or resume.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Flip the paused state and return the new one.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    // ── Objects ────────────────────────────────────────────────────

    /// Add an object. It is brought inside the world boundary and, in a
    /// grid world, indexed into its cell.
    ///
    /// # Errors
    ///
    /// [`WorldError::InvalidPosition`] if the position is not finite.
    pub fn add_object(&mut self, object: impl SimObject) -> Result<ObjectId, WorldError> {
        self.add_boxed_object(Box::new(object))
    }

    /// Add an already boxed object. See [`add_object`](Self::add_object).
    pub fn add_boxed_object(&mut self, mut object: Box<dyn SimObject>) -> Result<ObjectId, WorldError> {
        let (x, y) = (object.body().x(), object.body().y());
        if !(x.is_finite() && y.is_finite()) {
            warn!(x, y, "rejected object with non-finite position");
            return Err(WorldError::InvalidPosition { x, y });
        }
        self.topology.enforce(object.body_mut());
        let id = ObjectId(self.next_object);
        self.next_object += 1;
        self.index_object(id, object.body());
        self.objects.insert(id, object);
        if let Some(nav) = &mut self.navigation {
            nav.invalidate();
        }
        trace!(%id, "object added");
        Ok(id)
    }

    fn index_object(&mut self, id: ObjectId, body: &Body) -> bool {
        let cell = self.topology.cell_of(body.x(), body.y());
        match (&mut self.grid, cell) {
            (Some(grid), Some((cx, cy))) => grid.place(id, cx, cy),
            _ => false,
        }
    }

    /// Remove an object. If it is an agent's body, the agent is removed
    /// too.
    pub fn remove_object(&mut self, id: ObjectId) -> Result<Box<dyn SimObject>, WorldError> {
        let object = self
            .objects
            .shift_remove(&id)
            .ok_or(WorldError::UnknownObject(id))?;
        if let Some(grid) = &mut self.grid {
            grid.remove(id);
        }
        if let Some(nav) = &mut self.navigation {
            nav.invalidate();
        }
        if let Some(owner) = self.owners.remove(&id) {
            debug!(%id, agent = %owner, "body removed, retiring agent");
            self.agents.shift_remove(&owner);
        }
        Ok(object)
    }

    /// The object with this id.
    pub fn object(&self, id: ObjectId) -> Option<&dyn SimObject> {
        self.objects.get(&id).map(|o| o.as_ref())
    }

    /// Mutable access to an object.
    ///
    /// Position changes made here are re-indexed at the end of the next
    /// tick.
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut (dyn SimObject + 'static)> {
        self.objects.get_mut(&id).map(|o| o.as_mut())
    }

    /// Kinematic state of an object.
    pub fn body(&self, id: ObjectId) -> Option<&Body> {
        self.objects.get(&id).map(|o| o.body())
    }

    /// Objects in insertion order.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &dyn SimObject)> + '_ {
        self.objects.iter().map(|(id, o)| (*id, o.as_ref()))
    }

    /// Number of objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// First object whose hit test accepts `(x, y)`.
    pub fn object_at(&self, x: f64, y: f64) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, o)| o.hit_test(x, y))
            .map(|(id, _)| *id)
    }

    // ── Agents ─────────────────────────────────────────────────────

    /// Register an agent, adding its body object if it brings one.
    ///
    /// # Errors
    ///
    /// [`WorldError::UnknownObject`] if an existing body id is not in the
    /// world, [`WorldError::BodyAlreadyOwned`] if another agent already
    /// uses it, or any error from [`add_object`](Self::add_object).
    pub fn add_agent(&mut self, builder: AgentBuilder) -> Result<AgentId, WorldError> {
        let AgentBuilder {
            agent,
            body,
            perceptions,
        } = builder;
        let body = match body {
            BodySpec::None => None,
            BodySpec::Existing(id) => {
                if !self.objects.contains_key(&id) {
                    warn!(%id, "rejected agent with unknown body");
                    return Err(WorldError::UnknownObject(id));
                }
                if let Some(owner) = self.owners.get(&id) {
                    warn!(%id, %owner, "rejected agent with owned body");
                    return Err(WorldError::BodyAlreadyOwned {
                        object: id,
                        owner: *owner,
                    });
                }
                Some(id)
            }
            BodySpec::New(object) => Some(self.add_boxed_object(object)?),
        };
        let id = AgentId(self.next_agent);
        self.next_agent += 1;
        if let Some(b) = body {
            self.owners.insert(b, id);
        }
        self.agents.insert(
            id,
            AgentSlot {
                agent: Some(agent),
                body,
                perceptions,
                percepts: Percepts::new(),
            },
        );
        debug!(%id, body = ?body, "agent added");
        Ok(id)
    }

    /// Unregister an agent. Its body stays in the world.
    pub fn remove_agent(&mut self, id: AgentId) -> Result<Box<dyn Agent>, WorldError> {
        let slot = self
            .agents
            .shift_remove(&id)
            .ok_or(WorldError::UnknownAgent(id))?;
        if let Some(b) = slot.body {
            self.owners.remove(&b);
        }
        slot.agent.ok_or(WorldError::UnknownAgent(id))
    }

    /// Agent ids in registration order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agents.keys().copied()
    }

    /// Number of agents.
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// The agent as a `T`.
    ///
    /// `None` for the agent currently deciding.
    pub fn agent<T: Agent>(&self, id: AgentId) -> Option<&T> {
        self.agents
            .get(&id)
            .and_then(|s| s.agent.as_deref())
            .and_then(|a| a.downcast_ref::<T>())
    }

    /// The agent as a mutable `T`.
    pub fn agent_mut<T: Agent>(&mut self, id: AgentId) -> Option<&mut T> {
        self.agents
            .get_mut(&id)
            .and_then(|s| s.agent.as_deref_mut())
            .and_then(|a| a.downcast_mut::<T>())
    }

    /// The agent's body object.
    pub fn agent_body(&self, id: AgentId) -> Option<ObjectId> {
        self.agents.get(&id).and_then(|s| s.body)
    }

    /// The agent's readings from its latest tick.
    pub fn percepts(&self, id: AgentId) -> Option<&Percepts> {
        self.agents.get(&id).map(|s| &s.percepts)
    }

    // ── Influence ──────────────────────────────────────────────────

    /// The influence field, if configured.
    pub fn field(&self) -> Option<&InfluenceField> {
        self.field.as_ref()
    }

    /// Mutable influence field, if configured.
    pub fn field_mut(&mut self) -> Option<&mut InfluenceField> {
        self.field.as_mut()
    }

    /// Place an influence source.
    pub fn add_influence(&mut self, source: impl Influence + 'static) -> Result<SourceId, WorldError> {
        let field = self.field.as_mut().ok_or(WorldError::NoField)?;
        Ok(field.add_source(source)?)
    }

    /// Field value at `(x, y)`; zero without a field.
    pub fn sample_field(&self, x: f64, y: f64) -> f64 {
        self.field.as_ref().map_or(0.0, |f| f.sample(x, y))
    }

    // ── Grid queries ───────────────────────────────────────────────

    /// Objects in cell `(x, y)`. Empty in a continuous world.
    pub fn cell_contents(&self, x: i32, y: i32) -> &[ObjectId] {
        self.grid.as_ref().map_or(&[], |g| g.contents(x, y))
    }

    /// Whether cell `(x, y)` holds no objects.
    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        self.cell_contents(x, y).is_empty()
    }

    /// Objects in the eight cells around `(x, y)`.
    pub fn neighbours(&self, x: i32, y: i32) -> Vec<ObjectId> {
        self.grid
            .as_ref()
            .map_or_else(Vec::new, |g| g.neighbours(x, y))
    }

    /// The cell under a display-space point, in a grid world.
    pub fn cell_at(&self, px: f64, py: f64) -> Option<(i32, i32)> {
        self.topology.cell_at(px, py)
    }

    /// The cell an object is indexed in.
    pub fn cell_of(&self, id: ObjectId) -> Option<(i32, i32)> {
        self.grid.as_ref().and_then(|g| g.cell_of(id))
    }

    /// Whether cell `(x, y)` holds an object of type `T`.
    pub fn has_object_at<T: SimObject>(&self, x: i32, y: i32) -> bool {
        self.cell_contents(x, y)
            .iter()
            .filter_map(|id| self.object(*id))
            .any(|o| o.is::<T>())
    }

    // ── Navigation ─────────────────────────────────────────────────

    /// Install the function that decides how objects block or weight
    /// their cells.
    pub fn set_cell_classifier(&mut self, classifier: CellClassifier) -> Result<(), WorldError> {
        let nav = self
            .navigation
            .as_mut()
            .ok_or(WorldError::NavigationUnavailable)?;
        nav.set_classifier(classifier);
        Ok(())
    }

    /// Rebuild the navigation layer if it is stale. Returns whether it
    /// was rebuilt.
    pub fn refresh_navigation(&mut self) -> Result<bool, WorldError> {
        let Some(nav) = &mut self.navigation else {
            return Ok(false);
        };
        if !nav.is_stale() {
            return Ok(false);
        }
        let grid = &self.grid;
        let located = self.objects.iter().filter_map(|(id, o)| {
            grid.as_ref()
                .and_then(|g| g.cell_of(*id))
                .map(|cell| (o.as_ref(), cell))
        });
        nav.rebuild(located)?;
        Ok(true)
    }

    /// The navigation grid as of the last rebuild.
    pub fn navigation_grid(&self) -> Option<&OccupancyGrid> {
        self.navigation.as_ref().map(Navigation::grid)
    }

    /// The navigation graph as of the last rebuild.
    pub fn navigation_graph(&self) -> Option<&Graph> {
        self.navigation.as_ref().map(Navigation::graph)
    }

    /// Cheapest route between two cells on the navigation graph.
    ///
    /// Uses the straight-line heuristic and the configured expansion cap.
    /// `Ok(None)` means unreachable.
    pub fn find_path(&self, from: (i32, i32), to: (i32, i32)) -> Result<Option<Path>, WorldError> {
        let nav = self
            .navigation
            .as_ref()
            .ok_or(WorldError::NavigationUnavailable)?;
        let grid = nav.grid();
        let source = grid.node_id(from.0, from.1).ok_or(WorldError::CellOutOfBounds {
            x: from.0,
            y: from.1,
        })?;
        let dest = grid
            .node_id(to.0, to.1)
            .ok_or(WorldError::CellOutOfBounds { x: to.0, y: to.1 })?;
        let heuristic = EuclideanHeuristic::new(grid, dest)?;
        let mut search = AStar::new(nav.graph());
        if let Some(limit) = nav.max_expansions() {
            search = search.with_max_expansions(limit);
        }
        Ok(search.find_path(source, dest, &heuristic)?)
    }

    // ── Tick ───────────────────────────────────────────────────────

    /// Advance the simulation by `dt` seconds.
    ///
    /// A paused world is left untouched. If an agent fails, the tick stops
    /// there: agents already processed keep their effects, later agents
    /// do not run and no motion is integrated.
    pub fn tick(&mut self, dt: f64) -> Result<TickSummary, TickError> {
        if self.paused {
            trace!(tick = %self.tick, "paused");
            return Ok(TickSummary {
                tick: self.tick,
                paused: true,
                ..TickSummary::default()
            });
        }
        let mut summary = TickSummary::default();

        // 1. Influence decay and recompute.
        if let Some(field) = &mut self.field {
            let changed = field.advance(dt);
            summary.field_recomputed = field.refresh() || changed;
        }

        // 2. Navigation.
        summary.navigation_rebuilt = self.refresh_navigation().map_err(TickError::Navigation)?;

        // 3. Agents.
        self.run_agents(dt, &mut summary)?;

        // 4. Integration and boundaries.
        let topology = self.topology;
        let bounds = topology.bounds();
        for object in self.objects.values_mut() {
            object.update(dt, bounds);
            topology.enforce(object.body_mut());
        }

        // 5. Grid membership.
        if let Some(grid) = &mut self.grid {
            for (id, object) in &self.objects {
                let body = object.body();
                if let Some((cx, cy)) = topology.cell_of(body.x(), body.y()) {
                    if grid.place(*id, cx, cy) {
                        summary.relocated += 1;
                    }
                }
            }
        }
        if summary.relocated > 0 {
            if let Some(nav) = &mut self.navigation {
                nav.invalidate();
            }
        }

        self.tick = TickId(self.tick.0 + 1);
        summary.tick = self.tick;
        trace!(
            tick = %self.tick,
            agents = summary.agents,
            actions = summary.actions,
            relocated = summary.relocated,
            "tick complete"
        );
        Ok(summary)
    }

    fn run_agents(&mut self, dt: f64, summary: &mut TickSummary) -> Result<(), TickError> {
        let order: Vec<AgentId> = self.agents.keys().copied().collect();
        for id in order {
            // Retired by an earlier agent's despawn this tick.
            let Some(slot) = self.agents.get(&id) else {
                continue;
            };
            let readings = slot.readings(self);
            let Some(slot) = self.agents.get_mut(&id) else {
                continue;
            };
            for (name, value) in readings {
                slot.percepts.insert(name, value);
            }
            let body = slot.body;
            let Some(mut agent) = slot.agent.take() else {
                continue;
            };
            let decided = match self.agents.get(&id) {
                Some(slot) => agent.think(&ThinkContext {
                    agent: id,
                    dt,
                    percepts: &slot.percepts,
                    body_id: body,
                    world: self,
                }),
                None => Ok(Vec::new()),
            };
            if let Some(slot) = self.agents.get_mut(&id) {
                slot.agent = Some(agent);
            }
            let actions = decided.map_err(|source| TickError::Agent { agent: id, source })?;
            summary.agents += 1;
            for action in actions {
                self.apply(id, body, action)
                    .map_err(|source| TickError::Action { agent: id, source })?;
                summary.actions += 1;
            }
        }
        Ok(())
    }

    fn acting_body(&mut self, agent: AgentId, body: Option<ObjectId>) -> Result<&mut Body, WorldError> {
        let id = body.ok_or(WorldError::NoBody(agent))?;
        self.objects
            .get_mut(&id)
            .map(|o| o.body_mut())
            .ok_or(WorldError::UnknownObject(id))
    }

    fn apply(&mut self, agent: AgentId, body: Option<ObjectId>, action: Action) -> Result<(), WorldError> {
        match action {
            Action::SetSpeed(v) => self.acting_body(agent, body)?.set_speed(v),
            Action::SetAngularVelocity(w) => self.acting_body(agent, body)?.set_angular_velocity(w),
            Action::SetWheels {
                left,
                right,
                axle,
                max,
            } => self
                .acting_body(agent, body)?
                .set_wheel_speeds(left, right, axle, max),
            Action::SetHeading(h) => self.acting_body(agent, body)?.set_heading(h),
            Action::Rotate(d) => self.acting_body(agent, body)?.rotate(d),
            Action::MoveTo { x, y } => {
                let b = self.acting_body(agent, body)?;
                finite_position(x, y)?;
                b.move_to(x, y);
            }
            Action::Translate { dx, dy } => {
                let b = self.acting_body(agent, body)?;
                finite_position(b.x() + dx, b.y() + dy)?;
                b.translate(dx, dy);
            }
            Action::Spawn(object) => {
                self.add_boxed_object(object)?;
            }
            Action::Despawn(id) => {
                self.remove_object(id)?;
            }
        }
        Ok(())
    }

    // ── Rendering ──────────────────────────────────────────────────

    /// Emit one frame of draw calls.
    ///
    /// Field sectors come first, then graph edges, then objects in
    /// insertion order. Grid-world positions are converted to display
    /// units at cell centres.
    pub fn render(&self, renderer: &mut dyn Renderer, options: RenderOptions) {
        let scale = self.topology.display_scale();
        let grid_world = self.topology.is_grid();
        if options.show_field {
            if let Some(field) = &self.field {
                for row in 0..field.rows() {
                    for col in 0..field.cols() {
                        let v = field.normalized(col, row).unwrap_or(0.0);
                        renderer.draw_field_cell(col, row, field.sector() * scale, v);
                    }
                }
            }
        }
        if options.show_graph {
            if let Some(nav) = &self.navigation {
                let grid = nav.grid();
                for (node, edges) in nav.graph().iter() {
                    let Some(a) = grid.cell_center(node) else {
                        continue;
                    };
                    for edge in edges {
                        if let Some(b) = grid.cell_center(edge.to) {
                            renderer.draw_graph_edge(
                                Point2::new(a.x * scale, a.y * scale),
                                Point2::new(b.x * scale, b.y * scale),
                            );
                        }
                    }
                }
            }
        }
        for (id, object) in &self.objects {
            let body = object.body();
            if grid_world {
                let mut shown = *body;
                shown.move_to((body.x() + 0.5) * scale, (body.y() + 0.5) * scale);
                renderer.draw_object(*id, &shown, object.shapes());
            } else {
                renderer.draw_object(*id, body, object.shapes());
            }
        }
    }

    /// Whether the navigation graph contains the node for cell `(x, y)`.
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.navigation.as_ref().is_some_and(|nav| {
            nav.grid()
                .node_id(x, y)
                .is_some_and(|n| nav.graph().contains(n))
        })
    }
}

fn finite_position(x: f64, y: f64) -> Result<(), WorldError> {
    if x.is_finite() && y.is_finite() {
        Ok(())
    } else {
        warn!(x, y, "rejected move to non-finite position");
        Err(WorldError::InvalidPosition { x, y })
    }
}
