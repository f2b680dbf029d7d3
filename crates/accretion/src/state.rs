use nalgebra::{Point3, Vector3};

use crate::body::{Body, BodyId};
use crate::error::Result;
use crate::provenance::{MergeRecord, ProvenanceLog};

/// Live state of an accretion run between steps
///
/// The engine is the only writer. Force and collision passes borrow or take
/// the body list and hand back a new one.
#[derive(Debug, Clone)]
pub struct SystemState {
    /// Index of the current period; 0 is the initial environment
    pub step: usize,
    /// Live bodies, in a stable order
    pub bodies: Vec<Body>,
    time_step_seconds: f64,
    /// Next available body ID
    next_id: u32,
    provenance: ProvenanceLog,
}

impl SystemState {
    /// Creates an empty system stepping `time_step_seconds` per period
    ///
    /// # Examples
    ///
    /// ```
    /// use accretion::state::SystemState;
    ///
    /// let system = SystemState::new(432_000.0);
    ///
    /// assert_eq!(system.body_count(), 0);
    /// assert_eq!(system.step, 0);
    /// ```
    pub fn new(time_step_seconds: f64) -> Self {
        Self {
            step: 0,
            bodies: Vec::new(),
            time_step_seconds,
            next_id: 0,
            provenance: ProvenanceLog::new(),
        }
    }

    /// Adds a new body and returns its ID
    ///
    /// # Arguments
    ///
    /// * `mass` - Body mass in kg, must be positive
    /// * `position` - Position in m
    /// * `velocity` - Velocity in m/s
    ///
    /// # Examples
    ///
    /// ```
    /// use accretion::state::SystemState;
    /// use nalgebra::{Point3, Vector3};
    ///
    /// let mut system = SystemState::new(1.0);
    /// let id = system.add_body(5.0e24, Point3::new(1.0e11, 0.0, 0.0), Vector3::zeros()).unwrap();
    ///
    /// assert_eq!(system.body_count(), 1);
    /// assert!(system.get_body(id).is_some());
    /// assert!(system.add_body(-1.0, Point3::origin(), Vector3::zeros()).is_err());
    /// ```
    pub fn add_body(
        &mut self,
        mass: f64,
        position: Point3<f64>,
        velocity: Vector3<f64>,
    ) -> Result<BodyId> {
        let id = BodyId(self.next_id);
        let body = Body::new(id, mass, position, velocity, self.time_step_seconds)?;
        self.next_id += 1;
        self.bodies.push(body);
        Ok(id)
    }

    /// Reserve a fresh id; ids are never handed out twice
    pub fn allocate_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Log a merge under the current step
    pub fn record_merge(&mut self, child: BodyId, parents: (BodyId, BodyId)) -> MergeRecord {
        self.provenance.record(child, parents, self.step);
        MergeRecord {
            child,
            parents,
            step: self.step,
        }
    }

    pub fn provenance(&self) -> &ProvenanceLog {
        &self.provenance
    }

    /// Concatenated ancestry label of `id`, e.g. `"3+7"`
    pub fn label(&self, id: BodyId) -> String {
        self.provenance.label(id)
    }

    /// Removes a body from the system
    ///
    /// Returns the removed Body if found, None otherwise
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        self.bodies
            .iter()
            .position(|b| b.id == id)
            .map(|idx| self.bodies.remove(idx))
    }

    pub fn get_body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn time_step_seconds(&self) -> f64 {
        self.time_step_seconds
    }

    /// Simulated time since the initial environment (s)
    pub fn elapsed_seconds(&self) -> f64 {
        self.step as f64 * self.time_step_seconds
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Total mass of all live bodies (kg)
    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass()).sum()
    }

    /// Total momentum of all live bodies
    ///
    /// Gravity between bodies and merges both conserve this, so drift
    /// measures numerical error.
    pub fn total_momentum(&self) -> Vector3<f64> {
        self.bodies
            .iter()
            .map(|b| b.momentum())
            .fold(Vector3::zeros(), |acc, p| acc + p)
    }

    /// Mass-weighted mean position, `None` when the system is empty
    pub fn center_of_mass(&self) -> Option<Point3<f64>> {
        let total = self.total_mass();
        if total <= 0.0 {
            return None;
        }
        let weighted = self
            .bodies
            .iter()
            .map(|b| b.position.coords * b.mass())
            .fold(Vector3::zeros(), |acc, p| acc + p);
        Some(Point3::from(weighted / total))
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(|b| b.kinetic_energy()).sum()
    }
}
