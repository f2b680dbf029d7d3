//! Merge ancestry for body ids
//!
//! Merged bodies get a fresh integer id instead of a concatenated string. The
//! log keeps enough to rebuild the concatenated label (`"3+7+12"`) and the set
//! of initial bodies any live body was assembled from.

use std::collections::HashMap;

use crate::body::BodyId;

/// One merge: `child` was built from `parents.0` and `parents.1` at `step`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRecord {
    pub child: BodyId,
    pub parents: (BodyId, BodyId),
    pub step: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ProvenanceLog {
    records: HashMap<BodyId, MergeRecord>,
}

impl ProvenanceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, child: BodyId, parents: (BodyId, BodyId), step: usize) {
        self.records.insert(
            child,
            MergeRecord {
                child,
                parents,
                step,
            },
        );
    }

    /// Merge record for `id`, or `None` for an initial body
    pub fn get(&self, id: BodyId) -> Option<&MergeRecord> {
        self.records.get(&id)
    }

    /// Number of merges recorded
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Concatenated label with parent order preserved
    ///
    /// # Examples
    ///
    /// ```
    /// use accretion::body::BodyId;
    /// use accretion::provenance::ProvenanceLog;
    ///
    /// let mut log = ProvenanceLog::new();
    /// log.record(BodyId(10), (BodyId(3), BodyId(7)), 1);
    /// log.record(BodyId(11), (BodyId(10), BodyId(12)), 4);
    ///
    /// assert_eq!(log.label(BodyId(11)), "3+7+12");
    /// assert_eq!(log.label(BodyId(5)), "5");
    /// ```
    pub fn label(&self, id: BodyId) -> String {
        self.leaves(id)
            .iter()
            .map(|leaf| leaf.to_string())
            .collect::<Vec<_>>()
            .join("+")
    }

    /// Initial bodies that `id` was assembled from, sorted by id
    pub fn ancestors(&self, id: BodyId) -> Vec<BodyId> {
        let mut leaves = self.leaves(id);
        leaves.sort_unstable();
        leaves
    }

    /// Leaves in label order, walked iteratively so long merge chains
    /// cannot overflow the stack
    fn leaves(&self, id: BodyId) -> Vec<BodyId> {
        let mut leaves = Vec::new();
        let mut pending = vec![id];

        while let Some(current) = pending.pop() {
            match self.records.get(&current) {
                Some(record) => {
                    // Second parent pushed first so the first parent is visited first
                    pending.push(record.parents.1);
                    pending.push(record.parents.0);
                }
                None => leaves.push(current),
            }
        }

        leaves
    }
}
