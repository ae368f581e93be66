use ndarray as nd;
use num_complex::Complex64 as C64;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use quant2d::{
    output::write_json,
    params::Params,
    states::Oscillator,
    timedep::{ Evolver, Frames },
    utils::{ moments, wf_renormalize },
};

const N: usize = 100;
const DX: f64 = 0.05;
const DT: f64 = 0.01;
const NSTEPS: usize = 400;
const FRAME_EVERY: usize = 5;
const TRAP_FREQ: f64 = 2.0;
const SHIFT: (f64, f64) = (-0.5, 0.0);
const MOMENTUM: (f64, f64) = (0.0, 1.0);

#[derive(Serialize)]
struct Output {
    x: nd::Array1<f64>,
    v: nd::Array2<f64>,
    dt: f64,
    mean_x: nd::Array1<f64>,
    mean_y: nd::Array1<f64>,
    frames: Frames,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let params = Params::new(N, DX, DT)?;
    let osc = Oscillator::centered(&params, TRAP_FREQ);
    let evolver = Evolver::new(params, osc.potential());

    let mut q: nd::Array2<C64> = params.sample(osc.coherent(
        osc.x0 + SHIFT.0, osc.y0 + SHIFT.1, MOMENTUM.0, MOMENTUM.1));
    wf_renormalize(&mut q, params.dx());

    let frames = evolver.evolve_frames(&mut q, NSTEPS, FRAME_EVERY)?;
    let (mean_x, mean_y): (Vec<f64>, Vec<f64>)
        = frames.densities.outer_iter()
        .map(|p| moments(&p, &params).mean)
        .unzip();
    println!(
        "norm: {:.12} -> {:.12}",
        frames.norms[0],
        frames.norms[NSTEPS],
    );

    let out = Output {
        x: params.coords(),
        v: evolver.potential().clone(),
        dt: params.dt(),
        mean_x: mean_x.into(),
        mean_y: mean_y.into(),
        frames,
    };
    write_json("output/cn_coherent.json", &out)?;
    Ok(())
}
