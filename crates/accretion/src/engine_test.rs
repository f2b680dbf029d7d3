use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};

use crate::config::{RunConfig, SimulationConfig};
use crate::engine::{RunPhase, SimulationEngine};
use crate::error::SimulationError;
use crate::state::SystemState;

/// Meter-scale config where gravity barely moves anything in one step
fn lab_config() -> SimulationConfig {
    SimulationConfig {
        time_step_seconds: 1.0,
        max_distance_of_impact: 2.0,
        box_size: [10.0, 10.0, 10.0],
        ..SimulationConfig::default()
    }
}

fn lab_engine() -> SimulationEngine {
    SimulationEngine::new(lab_config()).unwrap()
}

#[test]
fn test_new_rejects_invalid_config() {
    let config = SimulationConfig {
        time_step_seconds: 0.0,
        ..SimulationConfig::default()
    };

    assert!(matches!(
        SimulationEngine::new(config),
        Err(SimulationError::InvalidConfig { .. })
    ));
}

#[test]
fn test_step_empty_state() {
    let engine = lab_engine();
    let mut state = SystemState::new(1.0);

    let report = engine.step(&mut state);

    assert_eq!(report.step, 1);
    assert!(report.merges.is_empty());
    assert_eq!(report.ejected, 0);
    assert_eq!(report.live_bodies, 0);
    assert_eq!(state.step, 1);
}

#[test]
fn test_single_body_drifts_by_velocity() {
    let engine = lab_engine();
    let mut state = SystemState::new(1.0);
    let start = Point3::new(1.0, 2.0, 3.0);
    let velocity = Vector3::new(0.5, -0.25, 2.0);
    let id = state.add_body(7.0, start, velocity).unwrap();

    for step in 1..=3 {
        engine.step(&mut state);
        let body = state.get_body(id).unwrap();
        assert_eq!(body.velocity, velocity);
        assert_relative_eq!(body.position, start + velocity * step as f64);
    }
}

#[test]
fn test_step_merges_close_pair() {
    let engine = lab_engine();
    let mut state = SystemState::new(1.0);
    let a = state.add_body(1.0, Point3::new(0.0, 0.0, 0.0), Vector3::zeros()).unwrap();
    let b = state.add_body(3.0, Point3::new(1.0, 0.0, 0.0), Vector3::zeros()).unwrap();

    let report = engine.step(&mut state);

    assert_eq!(report.live_bodies, 1);
    assert_eq!(report.merges.len(), 1);
    assert_eq!(report.merges[0].parents, (a, b));
    assert_eq!(report.merges[0].step, 1);

    let merged = state.bodies[0];
    assert_eq!(merged.mass(), 4.0);
    assert_relative_eq!(merged.position.x, 0.75, epsilon = 1e-6);
    assert_eq!(state.label(merged.id), "0+1");
}

#[test]
fn test_step_ejects_distant_bodies() {
    let config = SimulationConfig {
        removal_distance_fraction: Some(0.5),
        ..lab_config()
    };
    let engine = SimulationEngine::new(config).unwrap();
    let mut state = SystemState::new(1.0);
    let inside = state.add_body(1.0, Point3::new(5.0, 5.0, 5.0), Vector3::zeros()).unwrap();
    state.add_body(1.0, Point3::new(100.0, 0.0, 0.0), Vector3::zeros()).unwrap();

    let report = engine.step(&mut state);

    assert_eq!(report.ejected, 1);
    assert_eq!(report.live_bodies, 1);
    assert!(state.get_body(inside).is_some());
}

#[test]
fn test_no_ejection_by_default() {
    let engine = lab_engine();
    let mut state = SystemState::new(1.0);
    state.add_body(1.0, Point3::new(1.0e9, 0.0, 0.0), Vector3::zeros()).unwrap();

    let report = engine.step(&mut state);

    assert_eq!(report.ejected, 0);
    assert_eq!(state.body_count(), 1);
}

#[test]
fn test_initial_state_uses_config_seed() {
    let engine = SimulationEngine::new(SimulationConfig::default()).unwrap();

    let a = engine.initial_state(25).unwrap();
    let b = engine.initial_state(25).unwrap();

    assert_eq!(a.bodies, b.bodies);
    assert_eq!(a.time_step_seconds(), engine.config().time_step_seconds);
}

#[test]
fn test_run_rejects_invalid_run_config() {
    let engine = lab_engine();

    let result = engine.run(&RunConfig::new(10, 5, 0));

    assert!(matches!(
        result,
        Err(SimulationError::InvalidRunConfig {
            field: "sample_interval",
            ..
        })
    ));
}

#[test]
fn test_single_step_run_records_only_initial() {
    let engine = SimulationEngine::new(SimulationConfig::default()).unwrap();

    let series = engine.run(&RunConfig::new(1, 10, 1)).unwrap();

    assert_eq!(series.steps(), vec![0]);
    assert_eq!(series.get(0).map(|b| b.len()), Some(10));
}

#[test]
fn test_run_phases() {
    let engine = SimulationEngine::new(SimulationConfig::default()).unwrap();
    let mut run = engine.start(&RunConfig::new(3, 5, 1)).unwrap();

    assert_eq!(run.phase(), RunPhase::Init);
    assert!(run.series().is_empty());

    let first = run.advance().unwrap();
    assert_eq!(first.step, 1);
    assert_eq!(run.phase(), RunPhase::Stepping);
    assert_eq!(run.series().steps(), vec![0, 1]);

    let second = run.advance().unwrap();
    assert_eq!(second.step, 2);
    assert_eq!(run.phase(), RunPhase::Done);

    assert!(run.advance().is_none());
    assert_eq!(run.state().step, 2);
    assert_eq!(run.finish().steps(), vec![0, 1, 2]);
}

#[test]
fn test_single_step_run_goes_straight_to_done() {
    let engine = SimulationEngine::new(SimulationConfig::default()).unwrap();
    let mut run = engine.start(&RunConfig::new(1, 5, 1)).unwrap();

    assert!(run.advance().is_none());
    assert_eq!(run.phase(), RunPhase::Done);
    assert_eq!(run.series().steps(), vec![0]);
}

#[test]
fn test_run_from_keys_snapshots_by_state_step() {
    let engine = lab_engine();
    let mut state = SystemState::new(1.0);
    state.add_body(1.0, Point3::origin(), Vector3::new(1.0, 0.0, 0.0)).unwrap();
    state.step = 100;

    let series = engine.run_from(state, &RunConfig::new(5, 1, 2)).unwrap();

    assert_eq!(series.steps(), vec![100, 102, 104]);
}

#[test]
fn test_run_continues_after_population_merges_away() {
    let engine = lab_engine();
    let mut state = SystemState::new(1.0);
    state.add_body(1.0, Point3::new(0.0, 0.0, 0.0), Vector3::zeros()).unwrap();
    state.add_body(3.0, Point3::new(1.0, 0.0, 0.0), Vector3::zeros()).unwrap();

    let series = engine.run_from(state, &RunConfig::new(4, 2, 1)).unwrap();

    assert_eq!(series.steps(), vec![0, 1, 2, 3]);
    assert_eq!(series.get(0).map(|b| b.len()), Some(2));
    for step in 1..4 {
        let bodies = series.get(step).unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0].mass(), 4.0);
    }
}

#[test]
fn test_run_from_ignores_initial_body_count() {
    let engine = lab_engine();
    let mut state = SystemState::new(1.0);
    state.add_body(1.0, Point3::origin(), Vector3::zeros()).unwrap();

    let series = engine.run_from(state, &RunConfig::new(3, 0, 1)).unwrap();

    assert_eq!(series.steps(), vec![0, 1, 2]);
}

#[test]
fn test_start_from_still_rejects_zero_steps_or_interval() {
    let engine = lab_engine();

    for run in [RunConfig::new(0, 0, 1), RunConfig::new(3, 0, 0)] {
        let result = engine.start_from(SystemState::new(1.0), &run);
        assert!(matches!(result, Err(SimulationError::InvalidRunConfig { .. })));
    }
}
