//! Gravitational aggregation of point masses.
//!
//! Bodies attract each other under direct-sum Newtonian gravity, advance with
//! a fixed-step symplectic Euler integrator, and merge inelastically when
//! they come within the impact distance.

pub mod body;
pub mod collisions;
pub mod config;
pub mod display;
pub mod engine;
pub mod environment;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod provenance;
pub mod snapshot;
pub mod state;

#[cfg(test)]
mod engine_test;
#[cfg(test)]
mod state_test;

// Re-export core types
pub use body::{Body, BodyId};
pub use config::{RunConfig, SimulationConfig};
pub use error::{Result, SimulationError};
pub use provenance::{MergeRecord, ProvenanceLog};
pub use snapshot::{Snapshot, SnapshotSeries};
pub use state::SystemState;

// Re-export engine
pub use engine::{RunPhase, SimulationEngine, SimulationRun, StepReport};

// Re-export physics components
pub use collisions::{CollisionDetector, CollisionResolver, DirectDetector, MergeOrder};
pub use forces::{DirectGravity, ForceModel};
pub use integrator::{Integrator, SymplecticEuler};
