//! Sampled copies of the body population
//!
//! Snapshots own their bodies. Later steps never alias a stored snapshot, so
//! a renderer can hold the series while the engine keeps going.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::body::Body;

/// Bodies alive after collision resolution at `step`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub step: usize,
    pub bodies: Vec<Body>,
}

impl Snapshot {
    pub fn new(step: usize, bodies: &[Body]) -> Self {
        Self {
            step,
            bodies: bodies.to_vec(),
        }
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass()).sum()
    }
}

/// Snapshots keyed by step index, iterated in ascending step order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SnapshotSeries {
    frames: BTreeMap<usize, Vec<Body>>,
}

impl SnapshotSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a copy of `bodies` under `step`, replacing any earlier copy
    pub fn record(&mut self, step: usize, bodies: &[Body]) {
        self.frames.insert(step, bodies.to_vec());
    }

    pub fn insert(&mut self, snapshot: Snapshot) {
        self.frames.insert(snapshot.step, snapshot.bodies);
    }

    pub fn get(&self, step: usize) -> Option<&[Body]> {
        self.frames.get(&step).map(Vec::as_slice)
    }

    /// Recorded step indices in ascending order
    pub fn steps(&self) -> Vec<usize> {
        self.frames.keys().copied().collect()
    }

    /// Most recent snapshot, if any
    pub fn last(&self) -> Option<(usize, &[Body])> {
        self.frames
            .iter()
            .next_back()
            .map(|(&step, bodies)| (step, bodies.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &[Body])> {
        self.frames
            .iter()
            .map(|(&step, bodies)| (step, bodies.as_slice()))
    }
}

impl IntoIterator for SnapshotSeries {
    type Item = Snapshot;
    type IntoIter = std::iter::Map<
        std::collections::btree_map::IntoIter<usize, Vec<Body>>,
        fn((usize, Vec<Body>)) -> Snapshot,
    >;

    fn into_iter(self) -> Self::IntoIter {
        let to_snapshot: fn((usize, Vec<Body>)) -> Snapshot =
            |(step, bodies)| Snapshot { step, bodies };
        self.frames.into_iter().map(to_snapshot)
    }
}
