//! Simulation driver
//!
//! Each step runs the same pipeline:
//! 1. Freeze the field listing and compute every net force
//! 2. Kick and drift every body
//! 3. Merge colliding pairs of the post-integration generation
//! 4. Remove bodies beyond the removal distance, if enabled
//!
//! A run records the initial generation, then keeps a copy of the
//! post-collision generation at every sampled step.

use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use tracing::{debug, info};

use crate::collisions::{CollisionResolver, detect_ejections, remove_ejections};
use crate::config::{RunConfig, SimulationConfig};
use crate::environment::generate_initial_environment;
use crate::error::Result;
use crate::forces::DirectGravity;
use crate::integrator::{Integrator, SymplecticEuler};
use crate::provenance::MergeRecord;
use crate::snapshot::SnapshotSeries;
use crate::state::SystemState;

/// What happened during one step
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// Period index the step produced
    pub step: usize,
    /// Merges applied, in order
    pub merges: Vec<MergeRecord>,
    /// Bodies removed for leaving the simulation region
    pub ejected: usize,
    /// Bodies alive after the step
    pub live_bodies: usize,
}

/// Phase of a [`SimulationRun`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Initial generation not yet recorded
    Init,
    /// Periods `1..total_steps` in progress
    Stepping,
    /// All periods done; the series is complete
    Done,
}

/// Gravity, integration and collision resolution bound to one config
///
/// Engines share nothing, so several with different constants can run side by
/// side.
///
/// # Examples
///
/// ```
/// use accretion::config::{RunConfig, SimulationConfig};
/// use accretion::engine::SimulationEngine;
///
/// let engine = SimulationEngine::new(SimulationConfig::default()).unwrap();
/// let series = engine.run(&RunConfig::new(21, 30, 10)).unwrap();
///
/// assert_eq!(series.steps(), vec![0, 10, 20]);
/// ```
#[derive(Debug)]
pub struct SimulationEngine {
    config: SimulationConfig,
    gravity: DirectGravity,
    integrator: SymplecticEuler,
    resolver: CollisionResolver,
}

impl SimulationEngine {
    /// Build an engine, rejecting an invalid config
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            gravity: DirectGravity::from_config(&config),
            integrator: SymplecticEuler::from_config(&config),
            resolver: CollisionResolver::from_config(&config),
            config,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Randomized initial environment seeded from the config
    pub fn initial_state(&self, body_count: usize) -> Result<SystemState> {
        let mut rng = ChaChaRng::seed_from_u64(self.config.seed);
        generate_initial_environment(&self.config, body_count, &mut rng)
    }

    /// Advance `state` by one period
    ///
    /// An empty state is valid; the step still advances the period index.
    pub fn step(&self, state: &mut SystemState) -> StepReport {
        let had_bodies = !state.is_empty();
        state.step += 1;

        // 1-2. Forces read the frozen listing; kick and drift
        self.integrator.step(&mut state.bodies, &self.gravity);

        // 3. Collisions
        let merges = self.resolver.resolve(state);

        // 4. Ejection
        let ejected = match self.config.removal_distance() {
            Some(distance) => {
                let ids = detect_ejections(&state.bodies, &self.config.center(), distance);
                remove_ejections(state, &ids)
            }
            None => 0,
        };

        if had_bodies && state.is_empty() {
            info!(step = state.step, "population exhausted");
        }

        StepReport {
            step: state.step,
            merges,
            ejected,
            live_bodies: state.body_count(),
        }
    }

    /// Generate the initial environment and run it to completion
    pub fn run(&self, run: &RunConfig) -> Result<SnapshotSeries> {
        Ok(self.start(run)?.finish())
    }

    /// Run an existing state to completion
    ///
    /// The state's own step counter keys the snapshots.
    pub fn run_from(&self, state: SystemState, run: &RunConfig) -> Result<SnapshotSeries> {
        Ok(self.start_from(state, run)?.finish())
    }

    /// Generate the initial environment and return a run in [`RunPhase::Init`]
    pub fn start(&self, run: &RunConfig) -> Result<SimulationRun<'_>> {
        run.validate()?;
        let state = self.initial_state(run.initial_body_count)?;
        self.start_from(state, run)
    }

    /// Wrap an existing state in a run in [`RunPhase::Init`]
    ///
    /// `run.initial_body_count` is not read; the state supplies the bodies.
    pub fn start_from(&self, state: SystemState, run: &RunConfig) -> Result<SimulationRun<'_>> {
        run.validate_stepping()?;
        Ok(SimulationRun {
            engine: self,
            first_step: state.step,
            run: run.clone(),
            state,
            series: SnapshotSeries::new(),
            phase: RunPhase::Init,
        })
    }
}

/// A run in progress: `Init → Stepping → Done`
///
/// Steps happen only through [`SimulationRun::advance`] or
/// [`SimulationRun::finish`].
#[derive(Debug)]
pub struct SimulationRun<'a> {
    engine: &'a SimulationEngine,
    run: RunConfig,
    first_step: usize,
    state: SystemState,
    series: SnapshotSeries,
    phase: RunPhase,
}

impl SimulationRun<'_> {
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn state(&self) -> &SystemState {
        &self.state
    }

    /// Snapshots recorded so far
    pub fn series(&self) -> &SnapshotSeries {
        &self.series
    }

    /// Last period index this run will produce
    fn last_step(&self) -> usize {
        self.first_step + self.run.total_steps - 1
    }

    /// Perform the next step and return its report
    ///
    /// The first call records the initial generation before stepping. Returns
    /// `None` once the run is done.
    pub fn advance(&mut self) -> Option<StepReport> {
        if self.phase == RunPhase::Init {
            info!(
                bodies = self.state.body_count(),
                total_steps = self.run.total_steps,
                sample_interval = self.run.sample_interval,
                "run started"
            );
            self.series.record(self.state.step, &self.state.bodies);
            self.phase = RunPhase::Stepping;
        }

        if self.phase == RunPhase::Done || self.state.step >= self.last_step() {
            self.complete();
            return None;
        }

        let report = self.engine.step(&mut self.state);

        if self.run.is_sample_step(report.step - self.first_step) {
            self.series.record(report.step, &self.state.bodies);
            debug!(
                step = report.step,
                live = report.live_bodies,
                merges = report.merges.len(),
                ejected = report.ejected,
                "sampled step"
            );
        }

        if self.state.step >= self.last_step() {
            self.complete();
        }

        Some(report)
    }

    /// Run the remaining steps and return every recorded snapshot
    pub fn finish(mut self) -> SnapshotSeries {
        while self.advance().is_some() {}
        self.series
    }

    fn complete(&mut self) {
        if self.phase == RunPhase::Done {
            return;
        }
        self.phase = RunPhase::Done;
        info!(
            step = self.state.step,
            bodies = self.state.body_count(),
            total_mass = self.state.total_mass(),
            snapshots = self.series.len(),
            "run finished"
        );
    }
}
