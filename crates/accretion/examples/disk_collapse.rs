//! Rotating disk collapse example
//!
//! Generates a randomized rotating cloud and lets it aggregate, printing
//! conservation diagnostics and the largest bodies at the end.
//!
//! Run with: RUST_LOG=accretion=debug cargo run --package accretion --example disk_collapse

use accretion::display::body_marker;
use accretion::forces::{DirectGravity, ForceModel, freeze_field};
use accretion::{RunConfig, SimulationConfig, SimulationEngine};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("accretion=info")),
        )
        .init();

    println!("Accretion: Rotating Disk Collapse\n");
    println!("{}", "=".repeat(60));

    let config = SimulationConfig {
        removal_distance_fraction: Some(0.9),
        ..SimulationConfig::default()
    };
    let run = RunConfig::new(2_000, 200, 100).with_animation(30, "disk");
    let engine = SimulationEngine::new(config.clone())?;
    let gravity = DirectGravity::from_config(&config);

    println!("Parameters:");
    println!("  Bodies: {}", run.initial_body_count);
    println!(
        "  Steps: {} ({:.1} years)",
        run.total_steps,
        run.total_steps as f64 * config.time_step_seconds / 3.156e7
    );
    println!("  Impact distance: {:.3e} m", config.max_distance_of_impact);
    println!("  Seed: {}", config.seed);

    let mut sim = engine.start(&run)?;
    let initial_mass = sim.state().total_mass();
    let initial_momentum = sim.state().total_momentum();
    let initial_pe = gravity.potential_energy(&freeze_field(&sim.state().bodies));

    println!("\nInitial state:");
    println!("  Total mass: {:.4e} kg", initial_mass);
    println!("  Kinetic energy: {:.4e} J", sim.state().kinetic_energy());
    println!("  Potential energy: {:.4e} J", initial_pe);

    println!("\nStepping...");
    let mut total_merges = 0;
    let mut total_ejected = 0;
    while let Some(report) = sim.advance() {
        total_merges += report.merges.len();
        total_ejected += report.ejected;

        if run.is_sample_step(report.step) {
            println!(
                "Step {:>5}: {:>4} bodies, {:>4} merges, {:>4} ejected",
                report.step, report.live_bodies, total_merges, total_ejected
            );
        }
    }

    let state = sim.state();
    let final_mass = state.total_mass();
    let momentum_drift = (state.total_momentum() - initial_momentum).magnitude();
    let mut largest = state.bodies.clone();
    largest.sort_by(|a, b| b.mass().total_cmp(&a.mass()));

    println!("\n{}", "=".repeat(60));
    println!("Final diagnostics:");
    println!("  Live bodies: {}", state.body_count());
    println!("  Merges: {}", total_merges);
    println!("  Ejected: {}", total_ejected);
    println!(
        "  Mass retained: {:.4e} kg ({:.2}%)",
        final_mass,
        final_mass / initial_mass * 100.0
    );
    if total_ejected == 0 {
        println!("  Momentum drift: {:.2e} kg·m/s", momentum_drift);
    }
    if let Some(center) = state.center_of_mass() {
        println!(
            "  Center of mass: ({:.3e}, {:.3e}, {:.3e}) m",
            center.x, center.y, center.z
        );
    }

    println!("\nLargest bodies:");
    for body in largest.iter().take(5) {
        let (size, color) = body_marker(body);
        let parts = state.provenance().ancestors(body.id).len();
        println!(
            "  #{:<6} {:.4e} kg from {:>3} initial bodies (marker {:.1}, color {:.2})",
            body.id.0,
            body.mass(),
            parts,
            size,
            color
        );
    }

    let series = sim.finish();
    println!(
        "\nRecorded {} snapshots for \"{}\"",
        series.len(),
        run.label.as_deref().unwrap_or("run")
    );

    Ok(())
}
