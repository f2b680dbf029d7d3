//! Force models for the accretion engine
//!
//! Forces are computed from a frozen listing of every body taken before any
//! body moves, so the result never depends on the order bodies are visited.

use nalgebra::{Point3, Vector3};

use crate::body::{Body, BodyId};

pub mod gravity;


pub use gravity::DirectGravity;

/// One entry of the frozen listing: `(id, mass, x, y, z)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldPoint {
    pub id: BodyId,
    pub mass: f64,
    pub position: Point3<f64>,
}

impl From<&Body> for FieldPoint {
    fn from(body: &Body) -> Self {
        Self {
            id: body.id,
            mass: body.mass(),
            position: body.position,
        }
    }
}

/// Take the frozen listing of a generation
pub fn freeze_field(bodies: &[Body]) -> Vec<FieldPoint> {
    bodies.iter().map(FieldPoint::from).collect()
}

/// A source of force on bodies
///
/// Implementations return a force (N), not an acceleration. Dividing by mass is
/// the integrator's job.
///
/// # Examples
///
/// ```
/// use accretion::forces::{DirectGravity, FieldPoint, ForceModel};
/// use accretion::body::BodyId;
/// use nalgebra::Point3;
///
/// let field = [
///     FieldPoint { id: BodyId(0), mass: 1.0, position: Point3::new(0.0, 0.0, 0.0) },
///     FieldPoint { id: BodyId(1), mass: 1.0, position: Point3::new(1.0, 0.0, 0.0) },
/// ];
///
/// let gravity = DirectGravity::new(1.0, 1e-9);
/// let force = gravity.force_on(&field[0], &field);
/// assert!(force.x > 0.0);
/// ```
pub trait ForceModel: Send + Sync {
    /// Net force on `target` from every other entry of `field`
    ///
    /// `field` may contain `target` itself; entries sharing its id are skipped.
    fn force_on(&self, target: &FieldPoint, field: &[FieldPoint]) -> Vector3<f64>;

    /// Potential energy of the whole field (J)
    ///
    /// Default implementation returns 0.0.
    fn potential_energy(&self, _field: &[FieldPoint]) -> f64 {
        0.0
    }

    /// Net force on every entry of `field`, in listing order
    fn forces(&self, field: &[FieldPoint]) -> Vec<Vector3<f64>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            field
                .par_iter()
                .map(|target| self.force_on(target, field))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            field
                .iter()
                .map(|target| self.force_on(target, field))
                .collect()
        }
    }
}
