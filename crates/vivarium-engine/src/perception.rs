//! Named sensory channels.

use crate::body::Body;
use crate::world::World;
use indexmap::IndexMap;
use std::fmt;

/// One sensed value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Percept {
    /// A continuous reading, e.g. light intensity.
    Scalar(f64),
    /// A number of things, e.g. neighbours in range.
    Count(usize),
    /// A yes/no reading.
    Flag(bool),
}

impl Percept {
    /// The reading as a scalar. Counts convert; flags read as 0 or 1.
    pub fn as_scalar(self) -> f64 {
        match self {
            Percept::Scalar(v) => v,
            Percept::Count(n) => n as f64,
            Percept::Flag(b) => f64::from(u8::from(b)),
        }
    }

    /// The reading as a count, if it is one.
    pub fn as_count(self) -> Option<usize> {
        match self {
            Percept::Count(n) => Some(n),
            _ => None,
        }
    }

    /// The reading as a flag, if it is one.
    pub fn as_flag(self) -> Option<bool> {
        match self {
            Percept::Flag(b) => Some(b),
            _ => None,
        }
    }
}

/// The latest reading of every channel of one agent, keyed by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Percepts {
    values: IndexMap<String, Percept>,
}

impl Percepts {
    /// No readings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a reading, replacing the previous one.
    pub fn insert(&mut self, name: impl Into<String>, value: Percept) {
        self.values.insert(name.into(), value);
    }

    /// The reading for `name`.
    pub fn get(&self, name: &str) -> Option<Percept> {
        self.values.get(name).copied()
    }

    /// The reading for `name` as a scalar.
    pub fn scalar(&self, name: &str) -> Option<f64> {
        self.get(name).map(Percept::as_scalar)
    }

    /// The reading for `name` as a count.
    pub fn count(&self, name: &str) -> Option<usize> {
        self.get(name).and_then(Percept::as_count)
    }

    /// The reading for `name` as a flag.
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Percept::as_flag)
    }

    /// Readings in channel registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Percept)> + '_ {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of channels.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no channels.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A sensory channel evaluated once per tick before its agent decides.
///
/// `body` is the agent's body, if it has one. The world is read-only
/// during perception.
pub trait Perception: fmt::Debug {
    /// Channel name; unique per agent.
    fn name(&self) -> &str;

    /// Take a reading.
    fn perceive(&self, body: Option<&Body>, world: &World) -> Percept;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percept_conversions() {
        assert_eq!(Percept::Scalar(0.5).as_scalar(), 0.5);
        assert_eq!(Percept::Count(3).as_scalar(), 3.0);
        assert_eq!(Percept::Flag(true).as_scalar(), 1.0);
        assert_eq!(Percept::Count(3).as_count(), Some(3));
        assert_eq!(Percept::Scalar(1.0).as_count(), None);
        assert_eq!(Percept::Flag(false).as_flag(), Some(false));
    }

    #[test]
    fn percepts_replace_by_name() {
        let mut p = Percepts::new();
        p.insert("left", Percept::Scalar(0.1));
        p.insert("right", Percept::Scalar(0.2));
        p.insert("left", Percept::Scalar(0.3));
        assert_eq!(p.len(), 2);
        assert_eq!(p.scalar("left"), Some(0.3));
        assert_eq!(p.flag("left"), None);
        assert_eq!(p.get("missing"), None);
        let names: Vec<_> = p.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["left", "right"]);
    }
}
