//! Direct N-body gravity (O(N²) implementation)

use nalgebra::Vector3;
use tracing::trace;

use crate::config::SimulationConfig;
use crate::forces::{FieldPoint, ForceModel};

/// Direct O(N²) Newtonian gravity
///
/// Sums `G * m_target * m_other / r²` along the unit displacement toward every
/// other body. Separations below `min_distance` are clamped to it, and a pair
/// at exactly the same position contributes nothing because its direction is
/// undefined.
///
/// # Examples
///
/// ```
/// use accretion::forces::{DirectGravity, FieldPoint, ForceModel};
/// use accretion::body::BodyId;
/// use nalgebra::Point3;
///
/// let gravity = DirectGravity::new(2.0, 1e-6);
/// let a = FieldPoint { id: BodyId(0), mass: 3.0, position: Point3::new(0.0, 0.0, 0.0) };
/// let b = FieldPoint { id: BodyId(1), mass: 4.0, position: Point3::new(0.0, 2.0, 0.0) };
///
/// // F = 2 * 3 * 4 / 2² = 6, pointing from a toward b
/// let force = gravity.force_on(&a, &[a, b]);
/// assert!((force.y - 6.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DirectGravity {
    /// Gravitational constant (N·m²·kg⁻²)
    pub gravitational_constant: f64,
    /// Minimum separation used in the inverse square (m)
    pub min_distance: f64,
}

impl DirectGravity {
    pub fn new(gravitational_constant: f64, min_distance: f64) -> Self {
        Self {
            gravitational_constant,
            min_distance,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.gravitational_constant, config.min_distance)
    }

    /// Force on `target` due to `other` alone
    pub fn pair_force(&self, target: &FieldPoint, other: &FieldPoint) -> Vector3<f64> {
        let displacement = other.position - target.position;
        let distance = displacement.magnitude();

        if distance == 0.0 {
            trace!(a = %target.id, b = %other.id, "coincident bodies, pair skipped");
            return Vector3::zeros();
        }

        let clamped = if distance < self.min_distance {
            trace!(a = %target.id, b = %other.id, distance, "separation clamped");
            self.min_distance
        } else {
            distance
        };

        let magnitude =
            self.gravitational_constant * (target.mass * other.mass) / (clamped * clamped);
        displacement * (magnitude / distance)
    }
}

impl Default for DirectGravity {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

impl ForceModel for DirectGravity {
    fn force_on(&self, target: &FieldPoint, field: &[FieldPoint]) -> Vector3<f64> {
        field
            .iter()
            .filter(|other| other.id != target.id)
            .map(|other| self.pair_force(target, other))
            .fold(Vector3::zeros(), |acc, f| acc + f)
    }

    fn potential_energy(&self, field: &[FieldPoint]) -> f64 {
        // Each pair counted once
        field
            .iter()
            .enumerate()
            .flat_map(|(i, a)| {
                field[i + 1..].iter().map(move |b| {
                    let r = (a.position - b.position).magnitude().max(self.min_distance);
                    -self.gravitational_constant * a.mass * b.mass / r
                })
            })
            .sum()
    }
}
