//! Collision detection and resolution
//!
//! Detection finds every pair within the impact distance on the
//! post-integration generation; resolution merges them into the next
//! generation, each body at most once per step.

pub mod detection;
pub mod resolution;

#[cfg(test)]
mod detection_test;

pub use detection::{
    CollisionDetector, CollisionEvent, DirectDetector, detect_ejections, within_impact,
};
pub use resolution::{
    CollisionResolver, MergeOrder, Merger, Resolution, merge_bodies, remove_ejections,
    resolve_collisions,
};
