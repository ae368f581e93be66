use ndarray as nd;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use quant2d::{
    classical::{
        Field,
        Particle,
        Potential,
        RkfOptions,
        Term,
        Trajectory,
        rkf45_trajectory,
    },
    output::write_json,
};

// side length of the box
const L: f64 = 100.0;
const T_MAX: f64 = 10.0;
// potential map resolution
const MAP_DX: f64 = 1.0;

#[derive(Serialize)]
struct Run {
    label: &'static str,
    v: nd::Array2<f64>,
    trajectory: Trajectory,
    kinetic: nd::Array1<f64>,
    potential: nd::Array1<f64>,
    total: nd::Array1<f64>,
}

// sample the potential over the box, centered on the origin
fn potential_map(field: &Potential) -> nd::Array2<f64> {
    let nx = (L / MAP_DX) as usize;
    nd::Array2::from_shape_fn((nx, nx), |(i, j)| {
        let x = i as f64 * MAP_DX - L / 2.0;
        let y = j as f64 * MAP_DX - L / 2.0;
        field.value(x, y)
    })
}

fn run(label: &'static str, particle: &Particle, pot: &Potential, q0: [f64; 4])
    -> anyhow::Result<Run>
{
    let trajectory = rkf45_trajectory(
        particle, pot, q0, T_MAX, L / 2.0, &RkfOptions::default())?;
    let kinetic = trajectory.kinetic_energy(particle);
    let potential = trajectory.potential_energy(pot);
    let total = &kinetic + &potential;
    let drift = total.iter()
        .map(|ek| (ek - total[0]).abs())
        .fold(0.0, f64::max);
    println!(
        "{label}: {} points, t = {:.6}, max energy drift = {:.3e}",
        trajectory.len(),
        trajectory.t[trajectory.len() - 1],
        drift,
    );
    Ok(Run { label, v: potential_map(pot), trajectory, kinetic, potential, total })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let particle = Particle::new(1.0)?;
    let mut pot = Potential::new();

    pot.add(Term::Oscillator { k: 1.0 });
    let osc = run("oscillator", &particle, &pot, [25.0, 0.0, 0.0, 0.0])?;

    pot.clear();
    pot.add(Term::Linear { fx: 1.0, fy: 0.0 });
    let lin = run("linear", &particle, &pot, [0.0, 0.0, 0.0, 0.0])?;

    write_json("output/particle.json", &[osc, lin])?;
    Ok(())
}
