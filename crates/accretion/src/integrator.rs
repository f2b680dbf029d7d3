//! Time integration for the accretion engine
//!
//! The integrator turns a net force into a velocity change and then moves the
//! body with its new velocity. All forces for a step are computed from one
//! frozen listing before any body is touched.

use nalgebra::Vector3;

use crate::body::Body;
use crate::config::SimulationConfig;
use crate::forces::{ForceModel, freeze_field};

/// A fixed-step time integrator
pub trait Integrator: Send + Sync {
    /// Advance one body by one step given its net force (N)
    fn advance(&self, body: &mut Body, force: &Vector3<f64>);

    /// Advance every body by one step
    ///
    /// Forces are evaluated against the listing frozen before the first body
    /// moves.
    fn step(&self, bodies: &mut [Body], force: &dyn ForceModel) {
        let field = freeze_field(bodies);
        let forces = force.forces(&field);

        bodies
            .iter_mut()
            .zip(forces.iter())
            .for_each(|(body, f)| self.advance(body, f));
    }
}

/// Semi-implicit (symplectic) Euler, 1st order
///
/// 1. Kick: v' = v + (F / m) * dt
/// 2. Drift: x' = x + v' * dt
///
/// The drift uses the updated velocity, unlike explicit Euler.
///
/// # Examples
///
/// ```
/// use accretion::body::{Body, BodyId};
/// use accretion::integrator::{Integrator, SymplecticEuler};
/// use nalgebra::{Point3, Vector3};
///
/// let integrator = SymplecticEuler::new(2.0);
/// let mut body = Body::new(BodyId(0), 4.0, Point3::origin(), Vector3::zeros(), 2.0).unwrap();
///
/// integrator.advance(&mut body, &Vector3::new(8.0, 0.0, 0.0));
///
/// // v' = 0 + (8 / 4) * 2 = 4, x' = 0 + 4 * 2 = 8
/// assert_eq!(body.velocity.x, 4.0);
/// assert_eq!(body.position.x, 8.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SymplecticEuler {
    /// Fixed step (s)
    pub time_step_seconds: f64,
}

impl SymplecticEuler {
    pub fn new(time_step_seconds: f64) -> Self {
        Self { time_step_seconds }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.time_step_seconds)
    }
}

impl Integrator for SymplecticEuler {
    fn advance(&self, body: &mut Body, force: &Vector3<f64>) {
        // dt / m is precomputed on the body
        body.velocity += force * body.mass_time_step_factor();
        body.position += body.velocity * self.time_step_seconds;
    }
}
