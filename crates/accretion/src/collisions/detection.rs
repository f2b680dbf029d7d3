//! Collision and ejection detection
//!
//! Detection reads one frozen generation of bodies and reports index pairs into
//! it. Events are only meaningful for the slice they were detected on.

use nalgebra::Point3;

use crate::body::{Body, BodyId};

/// A detected collision between two bodies of one generation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    /// Index of the first body, always lower than `index_b`
    pub index_a: usize,
    /// Index of the second body
    pub index_b: usize,
    pub body_a: BodyId,
    pub body_b: BodyId,
    /// Separation at detection time (m)
    pub separation: f64,
}

impl CollisionEvent {
    /// Pair key used for deterministic ordering
    pub fn pair(&self) -> (usize, usize) {
        (self.index_a, self.index_b)
    }
}

/// Whether a pair at `separation` merges under an impact distance of `threshold`
///
/// The boundary is inclusive: a pair exactly at the threshold merges.
pub fn within_impact(separation: f64, threshold: f64) -> bool {
    separation <= threshold
}

/// Collision detector trait
pub trait CollisionDetector: Send + Sync {
    /// Detect every colliding pair in `bodies`
    ///
    /// Returned events are in ascending `(index_a, index_b)` order.
    fn detect(&self, bodies: &[Body], impact_distance: f64) -> Vec<CollisionEvent>;
}

/// Direct O(N²) collision detector
///
/// Checks every unordered pair once. Pairs sharing an id are never reported.
///
/// # Examples
///
/// ```
/// use accretion::body::{Body, BodyId};
/// use accretion::collisions::{CollisionDetector, DirectDetector};
/// use nalgebra::{Point3, Vector3};
///
/// let bodies = vec![
///     Body::new(BodyId(0), 1.0, Point3::new(0.0, 0.0, 0.0), Vector3::zeros(), 1.0).unwrap(),
///     Body::new(BodyId(1), 1.0, Point3::new(0.5, 0.0, 0.0), Vector3::zeros(), 1.0).unwrap(),
///     Body::new(BodyId(2), 1.0, Point3::new(9.0, 0.0, 0.0), Vector3::zeros(), 1.0).unwrap(),
/// ];
///
/// let events = DirectDetector.detect(&bodies, 1.0);
/// assert_eq!(events.len(), 1);
/// assert_eq!(events[0].pair(), (0, 1));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectDetector;

impl CollisionDetector for DirectDetector {
    fn detect(&self, bodies: &[Body], impact_distance: f64) -> Vec<CollisionEvent> {
        let n = bodies.len();

        (0..n)
            .flat_map(|i| {
                ((i + 1)..n).filter_map(move |j| {
                    let (a, b) = (&bodies[i], &bodies[j]);
                    if a.id == b.id {
                        return None;
                    }
                    let separation = a.distance_to(b);
                    within_impact(separation, impact_distance).then_some(CollisionEvent {
                        index_a: i,
                        index_b: j,
                        body_a: a.id,
                        body_b: b.id,
                        separation,
                    })
                })
            })
            .collect()
    }
}

/// Bodies further than `removal_distance` from `center`
///
/// # Examples
///
/// ```
/// use accretion::body::{Body, BodyId};
/// use accretion::collisions::detect_ejections;
/// use nalgebra::{Point3, Vector3};
///
/// let bodies = vec![
///     Body::new(BodyId(0), 1.0, Point3::new(1.0, 0.0, 0.0), Vector3::zeros(), 1.0).unwrap(),
///     Body::new(BodyId(1), 1.0, Point3::new(50.0, 0.0, 0.0), Vector3::zeros(), 1.0).unwrap(),
/// ];
///
/// let ejected = detect_ejections(&bodies, &Point3::origin(), 10.0);
/// assert_eq!(ejected, vec![BodyId(1)]);
/// ```
pub fn detect_ejections(bodies: &[Body], center: &Point3<f64>, removal_distance: f64) -> Vec<BodyId> {
    bodies
        .iter()
        .filter(|b| b.distance_from(center) > removal_distance)
        .map(|b| b.id)
        .collect()
}
