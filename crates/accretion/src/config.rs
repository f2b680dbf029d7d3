//! Simulation constants and run parameters
//!
//! [`SimulationConfig`] holds the physical constants shared by every component
//! of one engine instance. It is immutable once the engine is built, so several
//! engines with different constants can coexist.
//!
//! [`RunConfig`] holds the per-run parameters: how many steps, how many
//! initial bodies, and how often to keep a snapshot.
//!
//! # TOML format
//!
//! Every field is optional and falls back to the default:
//!
//! ```toml
//! gravitational_constant = 6.672e-11
//! time_step_seconds = 432000.0
//! max_distance_of_impact = 1.2589254117941661e11
//! total_mass = 3.979e30
//! box_size = [1.2619146889603885e13, 1.2619146889603885e13, 3.1622776601683794e12]
//! min_distance = 1.0
//! removal_distance_fraction = 0.9
//! merge_order = "closest_first"
//! seed = 7
//! ```

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::collisions::MergeOrder;
use crate::error::{Result, SimulationError};

/// Gravitational constant in N·m²·kg⁻²
pub const GRAVITATIONAL_CONSTANT: f64 = 6.672e-11;

/// Five days in seconds
pub const DEFAULT_TIME_STEP_SECONDS: f64 = 5.0 * 24.0 * 60.0 * 60.0;

/// Twice the mass of the solar system in kg
///
/// Much of the initial mass drifts off, and the box starts at twice the
/// diameter of the solar system.
pub const DEFAULT_TOTAL_MASS: f64 = 2.0 * 1.9895e30;

/// Physical constants for one engine instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Gravitational constant (N·m²·kg⁻²)
    pub gravitational_constant: f64,
    /// Fixed integration step (s)
    pub time_step_seconds: f64,
    /// Pairs at or within this separation merge (m)
    pub max_distance_of_impact: f64,
    /// Mass shared among the initial bodies (kg)
    pub total_mass: f64,
    /// Extent of the initial box along x, y, z (m)
    pub box_size: [f64; 3],
    /// Bound on each initial velocity component (m/s)
    pub max_initial_abs_velocity: f64,
    /// Tangential speed given to a body at the box diagonal distance (m/s)
    pub max_rotate_velocity: f64,
    /// Separations below this are clamped in the force kernel (m)
    pub min_distance: f64,
    /// Bodies further than this fraction of the box diagonal from the center
    /// are removed after each step. `None` disables removal.
    pub removal_distance_fraction: Option<f64>,
    /// Order in which detected collisions are merged
    pub merge_order: MergeOrder,
    /// Seed for the initial environment
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        // 10^12.8 m is roughly the diameter of Pluto's orbit
        let width = 2.0 * 10f64.powf(12.8);
        Self {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            time_step_seconds: DEFAULT_TIME_STEP_SECONDS,
            max_distance_of_impact: 10f64.powf(11.1),
            total_mass: DEFAULT_TOTAL_MASS,
            box_size: [width, width, 10f64.powf(12.5)],
            max_initial_abs_velocity: 10f64.powf(3.35),
            max_rotate_velocity: 10f64.powf(4.0),
            min_distance: 1.0,
            removal_distance_fraction: None,
            merge_order: MergeOrder::PairIndex,
            seed: 42,
        }
    }
}

impl SimulationConfig {
    /// Parse a config from TOML and validate it
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject constants that would make the run meaningless
    pub fn validate(&self) -> Result<()> {
        positive("gravitational_constant", self.gravitational_constant)?;
        positive("time_step_seconds", self.time_step_seconds)?;
        positive("max_distance_of_impact", self.max_distance_of_impact)?;
        positive("total_mass", self.total_mass)?;
        positive("min_distance", self.min_distance)?;

        for (axis, extent) in ["box_size.x", "box_size.y", "box_size.z"]
            .into_iter()
            .zip(self.box_size)
        {
            positive(axis, extent)?;
        }

        if !(self.max_initial_abs_velocity.is_finite() && self.max_initial_abs_velocity >= 0.0) {
            return Err(invalid(
                "max_initial_abs_velocity",
                self.max_initial_abs_velocity,
            ));
        }
        if !(self.max_rotate_velocity.is_finite() && self.max_rotate_velocity >= 0.0) {
            return Err(invalid("max_rotate_velocity", self.max_rotate_velocity));
        }
        if let Some(fraction) = self.removal_distance_fraction {
            positive("removal_distance_fraction", fraction)?;
        }

        Ok(())
    }

    /// Center of the initial box
    pub fn center(&self) -> Point3<f64> {
        Point3::new(
            self.box_size[0] / 2.0,
            self.box_size[1] / 2.0,
            self.box_size[2] / 2.0,
        )
    }

    /// Length of the box diagonal (m)
    pub fn box_diagonal(&self) -> f64 {
        Vector3::from(self.box_size).magnitude()
    }

    /// Distance from the center beyond which bodies are removed, if enabled
    pub fn removal_distance(&self) -> Option<f64> {
        self.removal_distance_fraction
            .map(|fraction| fraction * self.box_diagonal())
    }
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value))
    }
}

fn invalid(field: &'static str, value: f64) -> SimulationError {
    SimulationError::InvalidConfig {
        field,
        reason: format!("expected a positive finite value, got {value}"),
    }
}

/// Parameters for a single run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of periods, including the initial one (step 0)
    pub total_steps: usize,
    /// Bodies generated in the initial environment
    pub initial_body_count: usize,
    /// Keep a snapshot every this many steps
    pub sample_interval: usize,
    /// Frame interval for the renderer (ms); never read by the engine
    #[serde(default)]
    pub animation_interval_ms: Option<u64>,
    /// Label for rendered output; never read by the engine
    #[serde(default)]
    pub label: Option<String>,
}

impl RunConfig {
    pub fn new(total_steps: usize, initial_body_count: usize, sample_interval: usize) -> Self {
        Self {
            total_steps,
            initial_body_count,
            sample_interval,
            animation_interval_ms: None,
            label: None,
        }
    }

    /// Attach renderer-only settings
    pub fn with_animation(mut self, interval_ms: u64, label: impl Into<String>) -> Self {
        self.animation_interval_ms = Some(interval_ms);
        self.label = Some(label.into());
        self
    }

    /// Check every field, including the initial body count
    pub fn validate(&self) -> Result<()> {
        at_least_one("initial_body_count", self.initial_body_count)?;
        self.validate_stepping()
    }

    /// Check only the fields a run over an existing state reads
    pub fn validate_stepping(&self) -> Result<()> {
        at_least_one("total_steps", self.total_steps)?;
        at_least_one("sample_interval", self.sample_interval)
    }

    /// Whether step `step` is kept in the snapshot series
    pub fn is_sample_step(&self, step: usize) -> bool {
        step % self.sample_interval == 0
    }
}

fn at_least_one(field: &'static str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(SimulationError::InvalidRunConfig {
            field,
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(())
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new(10_000, 500, 10)
    }
}
