use nalgebra::{Point3, Vector3};

use crate::body::{Body, BodyId};
use crate::collisions::detection::*;

fn body_at(id: u32, x: f64) -> Body {
    Body::new(BodyId(id), 1.0, Point3::new(x, 0.0, 0.0), Vector3::zeros(), 1.0).unwrap()
}

#[test]
fn test_no_collisions_when_far_apart() {
    let bodies = vec![body_at(0, 0.0), body_at(1, 10.0), body_at(2, 20.0)];

    let events = DirectDetector.detect(&bodies, 2.0);

    assert!(events.is_empty());
}

#[test]
fn test_detects_close_pair() {
    let bodies = vec![body_at(0, 0.0), body_at(1, 10.0), body_at(2, 11.0)];

    let events = DirectDetector.detect(&bodies, 2.0);

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].pair(), (1, 2));
    assert_eq!(events[0].body_a, BodyId(1));
    assert_eq!(events[0].body_b, BodyId(2));
    assert_eq!(events[0].separation, 1.0);
}

#[test]
fn test_threshold_is_inclusive() {
    let at_threshold = vec![body_at(0, 0.0), body_at(1, 2.0)];
    assert_eq!(DirectDetector.detect(&at_threshold, 2.0).len(), 1);

    let just_inside = vec![body_at(0, 0.0), body_at(1, 2.0 - 1e-9)];
    assert_eq!(DirectDetector.detect(&just_inside, 2.0).len(), 1);

    let just_outside = vec![body_at(0, 0.0), body_at(1, 2.0 + 1e-9)];
    assert!(DirectDetector.detect(&just_outside, 2.0).is_empty());
}

#[test]
fn test_within_impact_boundary() {
    assert!(within_impact(1.0, 1.0));
    assert!(within_impact(0.0, 1.0));
    assert!(!within_impact(1.0 + f64::EPSILON, 1.0));
}

#[test]
fn test_every_pair_reported_once_in_ascending_order() {
    let bodies = vec![body_at(0, 0.0), body_at(1, 0.5), body_at(2, 1.0)];

    let events = DirectDetector.detect(&bodies, 5.0);
    let pairs: Vec<_> = events.iter().map(|e| e.pair()).collect();

    assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
}

#[test]
fn test_duplicate_ids_are_never_paired() {
    let bodies = vec![body_at(7, 0.0), body_at(7, 0.1)];

    assert!(DirectDetector.detect(&bodies, 5.0).is_empty());
}

#[test]
fn test_empty_and_single_body() {
    assert!(DirectDetector.detect(&[], 1.0).is_empty());
    assert!(DirectDetector.detect(&[body_at(0, 0.0)], 1.0).is_empty());
}

#[test]
fn test_detect_ejections_uses_distance_from_center() {
    let center = Point3::new(100.0, 0.0, 0.0);
    let bodies = vec![body_at(0, 100.0), body_at(1, 0.0), body_at(2, 149.0), body_at(3, 151.0)];

    let ejected = detect_ejections(&bodies, &center, 50.0);

    assert_eq!(ejected, vec![BodyId(1), BodyId(3)]);
}
