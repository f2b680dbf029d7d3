use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};

use crate::body::BodyId;
use crate::state::SystemState;

#[test]
fn test_new_system() {
    let system = SystemState::new(10.0);

    assert_eq!(system.step, 0);
    assert_eq!(system.time_step_seconds(), 10.0);
    assert_eq!(system.body_count(), 0);
    assert!(system.is_empty());
    assert!(system.provenance().is_empty());
}

#[test]
fn test_add_body() {
    let mut system = SystemState::new(10.0);

    let id1 = system
        .add_body(1.0, Point3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 6.28, 0.0))
        .unwrap();
    let id2 = system
        .add_body(2.0, Point3::new(2.0, 0.0, 0.0), Vector3::new(0.0, 4.44, 0.0))
        .unwrap();

    assert_eq!(system.body_count(), 2);
    assert_eq!(id1, BodyId(0));
    assert_eq!(id2, BodyId(1));
    assert_relative_eq!(system.get_body(id2).unwrap().mass_time_step_factor(), 5.0);
}

#[test]
fn test_add_invalid_body_does_not_consume_id() {
    let mut system = SystemState::new(10.0);

    assert!(system.add_body(0.0, Point3::origin(), Vector3::zeros()).is_err());
    let id = system.add_body(1.0, Point3::origin(), Vector3::zeros()).unwrap();

    assert_eq!(id, BodyId(0));
    assert_eq!(system.body_count(), 1);
}

#[test]
fn test_allocated_ids_are_never_reused() {
    let mut system = SystemState::new(1.0);
    let first = system.add_body(1.0, Point3::origin(), Vector3::zeros()).unwrap();

    let merged = system.allocate_id();
    system.remove_body(first);
    let next = system.add_body(1.0, Point3::origin(), Vector3::zeros()).unwrap();

    assert_eq!(merged, BodyId(1));
    assert_eq!(next, BodyId(2));
}

#[test]
fn test_remove_body() {
    let mut system = SystemState::new(1.0);

    let id = system.add_body(1.0, Point3::new(1.0, 0.0, 0.0), Vector3::zeros()).unwrap();
    assert_eq!(system.body_count(), 1);

    let removed = system.remove_body(id);
    assert!(removed.is_some());
    assert_eq!(removed.unwrap().id, id);
    assert_eq!(system.body_count(), 0);
}

#[test]
fn test_remove_nonexistent_body() {
    let mut system = SystemState::new(1.0);

    assert!(system.remove_body(BodyId(999)).is_none());
}

#[test]
fn test_remove_keeps_order() {
    let mut system = SystemState::new(1.0);
    let ids: Vec<_> = (0..4)
        .map(|i| {
            system
                .add_body(1.0, Point3::new(i as f64, 0.0, 0.0), Vector3::zeros())
                .unwrap()
        })
        .collect();

    system.remove_body(ids[1]);

    let remaining: Vec<_> = system.bodies.iter().map(|b| b.id).collect();
    assert_eq!(remaining, vec![ids[0], ids[2], ids[3]]);
}

#[test]
fn test_record_merge_uses_current_step() {
    let mut system = SystemState::new(1.0);
    let a = system.add_body(1.0, Point3::origin(), Vector3::zeros()).unwrap();
    let b = system.add_body(1.0, Point3::origin(), Vector3::zeros()).unwrap();
    system.step = 12;

    let child = system.allocate_id();
    let record = system.record_merge(child, (a, b));

    assert_eq!(record.step, 12);
    assert_eq!(system.provenance().get(child), Some(&record));
    assert_eq!(system.label(child), "0+1");
}

#[test]
fn test_elapsed_seconds() {
    let mut system = SystemState::new(432_000.0);
    system.step = 3;

    assert_eq!(system.elapsed_seconds(), 1_296_000.0);
}

#[test]
fn test_conserved_quantities() {
    let mut system = SystemState::new(1.0);
    system
        .add_body(1.0, Point3::new(0.0, 0.0, 0.0), Vector3::new(2.0, 0.0, 0.0))
        .unwrap();
    system
        .add_body(3.0, Point3::new(4.0, 0.0, 0.0), Vector3::new(0.0, -1.0, 0.0))
        .unwrap();

    assert_eq!(system.total_mass(), 4.0);
    assert_relative_eq!(system.total_momentum(), Vector3::new(2.0, -3.0, 0.0));
    assert_relative_eq!(system.center_of_mass().unwrap(), Point3::new(3.0, 0.0, 0.0));
    // 0.5 * 1 * 4 + 0.5 * 3 * 1
    assert_relative_eq!(system.kinetic_energy(), 3.5);
}

#[test]
fn test_empty_system_diagnostics() {
    let system = SystemState::new(1.0);

    assert_eq!(system.total_mass(), 0.0);
    assert_eq!(system.total_momentum(), Vector3::zeros());
    assert!(system.center_of_mass().is_none());
    assert_eq!(system.kinetic_energy(), 0.0);
}
