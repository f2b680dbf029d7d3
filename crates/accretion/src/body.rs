use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

/// Opaque handle for a body
///
/// Ids are allocated by [`crate::state::SystemState`] and never reused, so no
/// two live bodies share one. Merge ancestry lives in
/// [`crate::provenance::ProvenanceLog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point mass
///
/// Mass is private so the `mass > 0` invariant and the derived time-step
/// factor cannot drift apart. Only position and velocity change during a step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Body {
    pub id: BodyId,
    mass: f64,                  // kg
    mass_time_step_factor: f64, // s/kg
    pub position: Point3<f64>,  // m
    pub velocity: Vector3<f64>, // m/s
}

impl Body {
    /// Creates a body, rejecting masses that are not strictly positive
    ///
    /// `time_step_seconds` fixes the derived `time_step / mass` factor the
    /// integrator uses to turn a force into a velocity change.
    ///
    /// # Examples
    ///
    /// ```
    /// use accretion::body::{Body, BodyId};
    /// use nalgebra::{Point3, Vector3};
    ///
    /// let body = Body::new(BodyId(0), 2.0, Point3::origin(), Vector3::zeros(), 10.0).unwrap();
    /// assert_eq!(body.mass_time_step_factor(), 5.0);
    ///
    /// assert!(Body::new(BodyId(1), 0.0, Point3::origin(), Vector3::zeros(), 10.0).is_err());
    /// ```
    pub fn new(
        id: BodyId,
        mass: f64,
        position: Point3<f64>,
        velocity: Vector3<f64>,
        time_step_seconds: f64,
    ) -> Result<Self> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SimulationError::InvalidMass(mass));
        }
        Ok(Self::with_valid_mass(
            id,
            mass,
            position,
            velocity,
            time_step_seconds,
        ))
    }

    /// Constructor for masses already known to be positive (sums of valid masses)
    pub(crate) fn with_valid_mass(
        id: BodyId,
        mass: f64,
        position: Point3<f64>,
        velocity: Vector3<f64>,
        time_step_seconds: f64,
    ) -> Self {
        debug_assert!(mass > 0.0);
        Body {
            id,
            mass,
            mass_time_step_factor: time_step_seconds / mass,
            position,
            velocity,
        }
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// `time_step / mass`, fixed at construction
    pub fn mass_time_step_factor(&self) -> f64 {
        self.mass_time_step_factor
    }

    pub fn momentum(&self) -> Vector3<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (self.position - other.position).magnitude()
    }

    /// Distance from an arbitrary point, typically the box center
    pub fn distance_from(&self, point: &Point3<f64>) -> f64 {
        (self.position - point).magnitude()
    }
}
