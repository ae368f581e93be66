use ndarray as nd;
use num_complex::Complex64 as C64;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use quant2d::{
    output::write_json,
    params::Params,
    states::Oscillator,
    timedep::Evolver,
    utils::{ density_norm, prob_density, wf_renormalize },
};

const N: usize = 100;
const DX: f64 = 0.05;
const DT: f64 = 0.01;
const NSTEPS: usize = 100;
const TRAP_FREQ: f64 = 1.0;

#[derive(Serialize)]
struct Output {
    x: nd::Array1<f64>,
    v: nd::Array2<f64>,
    dt: f64,
    p_init: nd::Array2<f64>,
    p_final: nd::Array2<f64>,
    norms: nd::Array1<f64>,
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

    let mut q: nd::Array2<C64> = params.sample(osc.eigenstate(0, 0));
    wf_renormalize(&mut q, params.dx());
    let p_init = prob_density(&q);
    println!("initial norm: {:.12}", density_norm(&p_init, params.dx()));

    let norms = evolver.evolve(&mut q, NSTEPS)?;
    norms.iter().enumerate().skip(1)
        .for_each(|(k, nk)| {
            println!("{:.12} {:.4}", nk, k as f64 * params.dt());
        });
    let p_final = prob_density(&q);
    println!("final norm:   {:.12}", density_norm(&p_final, params.dx()));

    let out = Output {
        x: params.coords(),
        v: evolver.potential().clone(),
        dt: params.dt(),
        p_init,
        p_final,
        norms,
    };
    write_json("output/cn_qho.json", &out)?;
    Ok(())
}
