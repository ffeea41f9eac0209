//! World configuration and validation.
//!
//! [`WorldConfig`] is the input to [`World::new`](crate::World::new).
//! [`validate()`](WorldConfig::validate) checks structural invariants;
//! [`from_toml_str`](WorldConfig::from_toml_str) parses and validates a
//! TOML document.

use crate::error::ConfigError;
use crate::topology::Topology;
use serde::{Deserialize, Serialize};
use vivarium_influence::{InfluenceField, RecomputePolicy};
use vivarium_space::Neighbourhood;

// ── InfluenceConfig ────────────────────────────────────────────────

/// Influence field layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InfluenceConfig {
    /// Sector edge length in position units.
    pub sector: f64,
    /// Cap on summed cell values. Default: 1.0.
    #[serde(default = "default_maximum")]
    pub maximum: f64,
    /// When the field is recomputed. Default: deferred (once per tick).
    #[serde(default)]
    pub policy: RecomputePolicy,
}

fn default_maximum() -> f64 {
    1.0
}

impl Default for InfluenceConfig {
    fn default() -> Self {
        Self {
            sector: 10.0,
            maximum: default_maximum(),
            policy: RecomputePolicy::Deferred,
        }
    }
}

// ── NavigationConfig ───────────────────────────────────────────────

/// Navigation graph layer. Grid worlds only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Neighbour pattern for graph edges. Default: von Neumann.
    #[serde(default)]
    pub neighbourhood: Neighbourhood,
    /// Cap on nodes closed per path query. Default: unbounded.
    #[serde(default)]
    pub max_expansions: Option<usize>,
}

// ── WorldConfig ────────────────────────────────────────────────────

/// Complete configuration for constructing a [`World`](crate::World).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// World shape and boundary policy.
    pub topology: Topology,
    /// Optional influence field.
    pub influence: Option<InfluenceConfig>,
    /// Optional navigation layer.
    pub navigation: Option<NavigationConfig>,
    /// Rate the driving clock should tick at. Default: 60.
    pub tick_rate_hz: f64,
    /// Whether the world starts paused.
    pub start_paused: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            topology: Topology::default(),
            influence: None,
            navigation: None,
            tick_rate_hz: 60.0,
            start_paused: false,
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDimension { name, value })
    }
}

impl WorldConfig {
    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Topology extents.
        match self.topology {
            Topology::Continuous { width, height } => {
                positive("width", width)?;
                positive("height", height)?;
            }
            Topology::Grid {
                cols,
                rows,
                cell_size,
                ..
            } => {
                if cols == 0 || rows == 0 {
                    return Err(ConfigError::EmptyGrid { cols, rows });
                }
                positive("cell_size", cell_size)?;
            }
        }
        // 2. Influence layer.
        if let Some(inf) = &self.influence {
            positive("sector", inf.sector)?;
            positive("maximum", inf.maximum)?;
            let (width, height) = self.topology.extent();
            InfluenceField::sector_counts(width, height, inf.sector)?;
        }
        // 3. Navigation needs cells.
        if self.navigation.is_some() && !self.topology.is_grid() {
            return Err(ConfigError::NavigationNeedsGrid);
        }
        // 4. tick_rate_hz, and its reciprocal, must be finite and positive.
        let hz = self.tick_rate_hz;
        if !hz.is_finite() || hz <= 0.0 || !(1.0 / hz).is_finite() {
            return Err(ConfigError::InvalidTickRate { value: hz });
        }
        Ok(())
    }

    /// Parse a TOML document and validate it. Missing keys take defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = toml::from_str(text).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Seconds per tick implied by `tick_rate_hz`.
    pub fn dt(&self) -> f64 {
        1.0 / self.tick_rate_hz
    }
}
