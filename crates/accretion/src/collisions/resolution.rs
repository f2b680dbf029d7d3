//! Collision resolution through perfectly inelastic mergers
//!
//! When two bodies collide they become one body that conserves:
//! - Total mass: m = m_a + m_b
//! - Total momentum: velocity is the mass-weighted mean
//! - Center of mass: position is the mass-weighted mean

use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::body::{Body, BodyId};
use crate::collisions::{CollisionDetector, CollisionEvent, DirectDetector};
use crate::config::SimulationConfig;
use crate::provenance::MergeRecord;
use crate::state::SystemState;

/// Order in which detected collisions are merged
///
/// Either way a body merges at most once per pass; later events touching a
/// consumed body are skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeOrder {
    /// Ascending `(index_a, index_b)`
    #[default]
    PairIndex,
    /// Smallest separation first, ties by pair index
    ClosestFirst,
}

impl MergeOrder {
    pub fn sort(&self, events: &mut [CollisionEvent]) {
        match self {
            MergeOrder::PairIndex => events.sort_by_key(|e| e.pair()),
            MergeOrder::ClosestFirst => events.sort_by(|a, b| {
                a.separation
                    .total_cmp(&b.separation)
                    .then_with(|| a.pair().cmp(&b.pair()))
            }),
        }
    }
}

/// Merge two bodies, conserving mass and momentum
///
/// `a` is the first parent in the merged body's label.
///
/// # Examples
///
/// ```
/// use accretion::body::{Body, BodyId};
/// use accretion::collisions::merge_bodies;
/// use nalgebra::{Point3, Vector3};
///
/// let a = Body::new(BodyId(0), 1.0, Point3::new(0.0, 0.0, 0.0), Vector3::new(4.0, 0.0, 0.0), 1.0).unwrap();
/// let b = Body::new(BodyId(1), 3.0, Point3::new(1.0, 0.0, 0.0), Vector3::zeros(), 1.0).unwrap();
///
/// let merged = merge_bodies(&a, &b, BodyId(2), 1.0);
///
/// assert_eq!(merged.mass(), 4.0);
/// assert!((merged.position.x - 0.75).abs() < 1e-12);
/// assert!((merged.velocity.x - 1.0).abs() < 1e-12);
/// ```
pub fn merge_bodies(a: &Body, b: &Body, new_id: BodyId, time_step_seconds: f64) -> Body {
    let total_mass = a.mass() + b.mass();
    let (a_share, b_share) = (a.mass() / total_mass, b.mass() / total_mass);

    let position = Point3::from(a.position.coords * a_share + b.position.coords * b_share);
    let velocity = a.velocity * a_share + b.velocity * b_share;

    Body::with_valid_mass(new_id, total_mass, position, velocity, time_step_seconds)
}

/// One merge performed by [`resolve_collisions`]
#[derive(Debug, Clone, Copy)]
pub struct Merger {
    pub merged: Body,
    pub parents: (BodyId, BodyId),
}

/// Next generation produced by [`resolve_collisions`]
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub bodies: Vec<Body>,
    pub mergers: Vec<Merger>,
}

/// Merge colliding pairs of `generation` and return the next generation
///
/// Events are indices into `generation`. They are processed in `order`, and a
/// body consumed by one merge is excluded from the rest of the pass.
/// Untouched bodies keep their relative order; each merged body takes the
/// slot of its lower-index parent. `allocate` supplies ids for merged bodies.
pub fn resolve_collisions(
    generation: Vec<Body>,
    mut events: Vec<CollisionEvent>,
    order: MergeOrder,
    time_step_seconds: f64,
    mut allocate: impl FnMut() -> BodyId,
) -> Resolution {
    if events.is_empty() {
        return Resolution {
            bodies: generation,
            mergers: Vec::new(),
        };
    }

    order.sort(&mut events);

    let n = generation.len();
    let mut consumed = vec![false; n];
    let mut replacements: Vec<Option<Body>> = vec![None; n];
    let mut mergers = Vec::new();

    for event in events {
        let (lo, hi) = if event.index_a < event.index_b {
            (event.index_a, event.index_b)
        } else {
            (event.index_b, event.index_a)
        };
        if lo == hi || hi >= n || consumed[lo] || consumed[hi] {
            continue;
        }

        let (a, b) = (&generation[lo], &generation[hi]);
        let merged = merge_bodies(a, b, allocate(), time_step_seconds);
        trace!(
            a = %a.id,
            b = %b.id,
            merged = %merged.id,
            separation = event.separation,
            "bodies merged"
        );

        consumed[lo] = true;
        consumed[hi] = true;
        replacements[lo] = Some(merged);
        mergers.push(Merger {
            merged,
            parents: (a.id, b.id),
        });
    }

    let bodies = generation
        .into_iter()
        .zip(consumed)
        .zip(replacements)
        .filter_map(|((body, consumed), replacement)| match replacement {
            Some(merged) => Some(merged),
            None if !consumed => Some(body),
            None => None,
        })
        .collect();

    Resolution { bodies, mergers }
}

/// Detects and merges collisions on a [`SystemState`]
pub struct CollisionResolver {
    detector: Box<dyn CollisionDetector>,
    /// Pairs at or within this separation merge (m)
    pub impact_distance: f64,
    pub order: MergeOrder,
}

impl CollisionResolver {
    pub fn new(impact_distance: f64, order: MergeOrder) -> Self {
        Self::with_detector(DirectDetector, impact_distance, order)
    }

    pub fn with_detector<D: CollisionDetector + 'static>(
        detector: D,
        impact_distance: f64,
        order: MergeOrder,
    ) -> Self {
        Self {
            detector: Box::new(detector),
            impact_distance,
            order,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.max_distance_of_impact, config.merge_order)
    }
    /// Replace the live generation with its post-collision successor
    ///
    /// Detection runs on the frozen post-integration generation before any
    /// merge is applied. Merges are logged in the state's provenance under the
    /// current step. Returns the merge records in the order they were applied.
    pub fn resolve(&self, state: &mut SystemState) -> Vec<MergeRecord> {
        let generation = std::mem::take(&mut state.bodies);
        let events = self.detector.detect(&generation, self.impact_distance);
        let time_step = state.time_step_seconds();

        let resolution = resolve_collisions(generation, events, self.order, time_step, || {
            state.allocate_id()
        });

        state.bodies = resolution.bodies;
        resolution
            .mergers
            .iter()
            .map(|m| state.record_merge(m.merged.id, m.parents))
            .collect()
    }
}

impl std::fmt::Debug for CollisionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollisionResolver")
            .field("impact_distance", &self.impact_distance)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

/// Remove bodies that have left the simulation region
///
/// Returns how many bodies were removed.
pub fn remove_ejections(state: &mut SystemState, ids: &[BodyId]) -> usize {
    ids.iter()
        .filter_map(|&id| state.remove_body(id))
        .count()
}
