//! Randomized initial environment
//!
//! Bodies start in a box described by [`SimulationConfig::box_size`]:
//! - Mass uniform within ±75% of the average share of `total_mass`
//! - Position Gaussian per axis, centered in the box with σ = extent / 4
//! - Velocity uniform per component within `±max_initial_abs_velocity`
//! - A tangential kick in the x-y plane that grows with distance from the
//!   box center, so the cloud starts out as a rotating disk

use std::f64::consts::{FRAC_PI_2, PI};

use nalgebra::{Point3, Vector3};
use rand::Rng;
use rand_chacha::ChaChaRng;
use tracing::debug;

use crate::config::SimulationConfig;
use crate::error::{Result, SimulationError};
use crate::state::SystemState;

/// Lower bound of the average mass share a body can receive
const MIN_MASS_FACTOR: f64 = 0.25;
/// Upper bound of the average mass share a body can receive
const MAX_MASS_FACTOR: f64 = 1.75;
/// Spread of initial positions as a fraction of the box extent
const POSITION_SPREAD: f64 = 0.25;
/// Range of the random damping applied to each rotation component
const ROTATION_JITTER: (f64, f64) = (0.6, 1.0);

/// Sample from a Gaussian (normal) distribution using Box-Muller transform
///
/// # Arguments
/// * `rng` - Random number generator
/// * `mean` - Mean of the distribution
/// * `std_dev` - Standard deviation
///
/// # Returns
/// A sample from the normal distribution N(mean, std_dev²)
pub fn sample_gaussian(rng: &mut ChaChaRng, mean: f64, std_dev: f64) -> f64 {
    // 1 - u keeps the log argument in (0, 1]
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
    mean + std_dev * z
}

/// Sample uniformly from `[low, high)`
///
/// Unlike `random_range`, a degenerate range returns `low` instead of panicking.
pub fn sample_uniform(rng: &mut ChaChaRng, low: f64, high: f64) -> f64 {
    let u: f64 = rng.random();
    low + (high - low) * u
}

/// Tangential velocity added to a body at `position`
///
/// The kick points 90° clockwise from the body's x-y bearing relative to
/// `center`, scaled by the body's 3-D distance from the center over the box
/// diagonal. A body at the center gets no kick.
pub fn rotation_kick(
    rng: &mut ChaChaRng,
    config: &SimulationConfig,
    position: &Point3<f64>,
) -> Vector3<f64> {
    let center = config.center();
    let bearing = (position.y - center.y).atan2(position.x - center.x);
    let heading = bearing - FRAC_PI_2;

    let distance_weight = (position - center).magnitude() / config.box_diagonal();
    let speed = config.max_rotate_velocity * distance_weight;

    let (low, high) = ROTATION_JITTER;
    Vector3::new(
        heading.cos() * speed * sample_uniform(rng, low, high),
        heading.sin() * speed * sample_uniform(rng, low, high),
        0.0,
    )
}

/// Generate `body_count` bodies into a fresh [`SystemState`]
///
/// Bodies get ids `0..body_count`. The same seed and config always produce the
/// same environment.
///
/// # Examples
///
/// ```
/// use accretion::config::SimulationConfig;
/// use accretion::environment::generate_initial_environment;
/// use rand::SeedableRng;
/// use rand_chacha::ChaChaRng;
///
/// let config = SimulationConfig::default();
/// let mut rng = ChaChaRng::seed_from_u64(config.seed);
///
/// let system = generate_initial_environment(&config, 50, &mut rng).unwrap();
///
/// assert_eq!(system.body_count(), 50);
/// assert!((system.total_mass() / config.total_mass - 1.0).abs() < 0.5);
/// ```
pub fn generate_initial_environment(
    config: &SimulationConfig,
    body_count: usize,
    rng: &mut ChaChaRng,
) -> Result<SystemState> {
    if body_count == 0 {
        return Err(SimulationError::InvalidRunConfig {
            field: "initial_body_count",
            reason: "must be at least 1".to_string(),
        });
    }

    let average_mass = config.total_mass / body_count as f64;
    let [width, depth, height] = config.box_size;
    let max_velocity = config.max_initial_abs_velocity;

    let mut system = SystemState::new(config.time_step_seconds);
    for _ in 0..body_count {
        let mass = sample_uniform(
            rng,
            average_mass * MIN_MASS_FACTOR,
            average_mass * MAX_MASS_FACTOR,
        );
        let position = Point3::new(
            sample_gaussian(rng, width / 2.0, width * POSITION_SPREAD),
            sample_gaussian(rng, depth / 2.0, depth * POSITION_SPREAD),
            sample_gaussian(rng, height / 2.0, height * POSITION_SPREAD),
        );
        let velocity = Vector3::new(
            sample_uniform(rng, -max_velocity, max_velocity),
            sample_uniform(rng, -max_velocity, max_velocity),
            sample_uniform(rng, -max_velocity, max_velocity),
        );
        let kick = rotation_kick(rng, config, &position);

        system.add_body(mass, position, velocity + kick)?;
    }

    debug!(
        bodies = body_count,
        total_mass = system.total_mass(),
        "initial environment generated"
    );

    Ok(system)
}
