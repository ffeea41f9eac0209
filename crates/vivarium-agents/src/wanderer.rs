//! An agent that walks A* routes across the navigation grid.

use std::any::Any;
use std::collections::VecDeque;
use tracing::debug;
use vivarium_core::NodeId;
use vivarium_engine::{Action, Agent, AgentError, ThinkContext, WorldError};

/// Walks to a target cell one step every `step_interval` seconds.
///
/// Setting a target discards any route in progress. The route is planned
/// on the next decision, using the world's navigation graph as it stands
/// then; it is not replanned if the world changes along the way.
#[derive(Clone, Debug)]
pub struct Wanderer {
    target: Option<(i32, i32)>,
    route: Option<VecDeque<NodeId>>,
    step_interval: f64,
    elapsed: f64,
}

impl Default for Wanderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Wanderer {
    /// An idle wanderer stepping every 0.2 s.
    pub fn new() -> Self {
        Self {
            target: None,
            route: None,
            step_interval: 0.2,
            elapsed: 0.0,
        }
    }

    /// Change the step interval.
    pub fn with_step_interval(mut self, seconds: f64) -> Self {
        self.step_interval = seconds;
        self
    }

    /// Head for cell `(x, y)`.
    pub fn set_target(&mut self, x: i32, y: i32) {
        self.target = Some((x, y));
        self.route = None;
    }

    /// Target not yet planned for.
    pub fn target(&self) -> Option<(i32, i32)> {
        self.target
    }

    /// Steps left on the current route.
    pub fn remaining(&self) -> usize {
        self.route.as_ref().map_or(0, VecDeque::len)
    }

    /// Whether the wanderer has nothing to do.
    pub fn is_idle(&self) -> bool {
        self.target.is_none() && self.route.is_none()
    }

    fn plan(&mut self, ctx: &ThinkContext<'_>, target: (i32, i32)) -> Result<(), AgentError> {
        let body = ctx.body().ok_or(WorldError::NoBody(ctx.agent))?;
        let from = ctx
            .world
            .topology()
            .cell_of(body.x(), body.y())
            .ok_or(WorldError::NavigationUnavailable)?;
        let walkable = |(x, y): (i32, i32)| ctx.world.is_walkable(x, y);
        if !(walkable(from) && walkable(target)) {
            debug!(agent = %ctx.agent, ?from, ?target, "endpoint blocked, staying idle");
            return Ok(());
        }
        match ctx.world.find_path(from, target)? {
            Some(path) => {
                debug!(agent = %ctx.agent, ?from, ?target, steps = path.len(), cost = path.cost, "route planned");
                self.route = Some(path.nodes.into());
                self.elapsed = 0.0;
            }
            None => debug!(agent = %ctx.agent, ?from, ?target, "target unreachable"),
        }
        Ok(())
    }
}

impl Agent for Wanderer {
    fn think(&mut self, ctx: &ThinkContext<'_>) -> Result<Vec<Action>, AgentError> {
        let Some(route) = &mut self.route else {
            if let Some(target) = self.target.take() {
                self.plan(ctx, target)?;
            }
            return Ok(Vec::new());
        };
        if route.is_empty() {
            self.route = None;
            return Ok(Vec::new());
        }
        self.elapsed += ctx.dt;
        if self.elapsed < self.step_interval {
            return Ok(Vec::new());
        }
        self.elapsed = 0.0;
        let Some(node) = route.pop_front() else {
            return Ok(Vec::new());
        };
        let (x, y) = ctx
            .world
            .navigation_grid()
            .and_then(|g| g.location(node))
            .ok_or(WorldError::NavigationUnavailable)?;
        Ok(vec![Action::MoveTo {
            x: f64::from(x),
            y: f64::from(y),
        }])
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_target_discards_route() {
        let mut w = Wanderer::new();
        assert!(w.is_idle());
        w.route = Some(VecDeque::from([NodeId(1), NodeId(2)]));
        assert_eq!(w.remaining(), 2);
        w.set_target(3, 4);
        assert_eq!(w.remaining(), 0);
        assert_eq!(w.target(), Some((3, 4)));
        assert!(!w.is_idle());
    }
}
