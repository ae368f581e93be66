use approx::{ assert_abs_diff_eq, assert_relative_eq };
use ndarray as nd;
use num_complex::Complex64 as C64;
use quant2d::{
    params::Params,
    states::{ Oscillator, gaussian_packet },
    timedep::Evolver,
    utils::{ density_norm, moments, prob_density, wf_norm, wf_renormalize },
};

fn ground_state(params: &Params, osc: &Oscillator) -> nd::Array2<C64> {
    let mut q = params.sample(osc.eigenstate(0, 0));
    wf_renormalize(&mut q, params.dx());
    q
}

#[test]
fn harmonic_trap_scenario() {
    let params = Params::new(100, 0.05, 0.01).unwrap();
    let osc = Oscillator::centered(&params, 1.0);
    let evolver = Evolver::new(params, osc.potential());
    let mut q = ground_state(&params, &osc);
    let norms = evolver.evolve(&mut q, 100).unwrap();
    assert_eq!(norms.len(), 101);
    assert_relative_eq!(norms[0], 1.0, max_relative = 1e-2);
    assert_relative_eq!(norms[100], 1.0, max_relative = 1e-2);
    norms.iter()
        .for_each(|nk| assert_abs_diff_eq!(*nk, norms[0], epsilon = 1e-10));
    assert_abs_diff_eq!(
        density_norm(&prob_density(&q), params.dx()), norms[100], epsilon = 1e-12);
}

#[test]
fn norm_is_conserved_off_center() {
    let params = Params::new(80, 0.05, 0.02).unwrap();
    let osc = Oscillator::centered(&params, 3.0);
    let evolver = Evolver::new(params, osc.potential());
    let mut q = params.sample(osc.coherent(1.5, 2.2, 2.0, -1.0));
    wf_renormalize(&mut q, params.dx());
    let norms = evolver.evolve(&mut q, 200).unwrap();
    norms.iter()
        .for_each(|nk| assert_relative_eq!(*nk, 1.0, max_relative = 1e-2));
}

#[test]
fn ground_state_is_stationary() {
    // walls far enough out that the trap ground state barely feels them
    let params = Params::new(160, 0.05, 0.01).unwrap();
    let osc = Oscillator::centered(&params, 1.0);
    let evolver = Evolver::new(params, osc.potential());
    let mut q = ground_state(&params, &osc);
    let p_init = prob_density(&q);
    evolver.evolve(&mut q, 20).unwrap();
    let p_final = prob_density(&q);
    let peak = p_init.iter().copied().fold(0.0, f64::max);
    p_init.iter().zip(&p_final)
        .for_each(|(pi, pf)| assert_abs_diff_eq!(*pi, *pf, epsilon = 0.02 * peak));
    let m_init = moments(&p_init, &params);
    let m_final = moments(&p_final, &params);
    assert_abs_diff_eq!(m_final.mean.0, m_init.mean.0, epsilon = 1e-3);
    assert_abs_diff_eq!(m_final.mean.1, m_init.mean.1, epsilon = 1e-3);
    assert_relative_eq!(m_final.width.0, m_init.width.0, max_relative = 1e-2);
}

#[test]
fn ground_state_is_stationary_with_scaled_hbar() {
    // ω = ħ keeps the trap length at 1 so the walls stay four lengths away
    let params = Params::new(160, 0.05, 0.01).unwrap().with_hbar(2.0).unwrap();
    let osc = Oscillator::centered(&params, 2.0);
    assert_relative_eq!(osc.length(), 1.0);
    let evolver = Evolver::new(params, osc.potential());
    let mut q = ground_state(&params, &osc);
    let p_init = prob_density(&q);
    let norms = evolver.evolve(&mut q, 50).unwrap();
    norms.iter()
        .for_each(|nk| assert_relative_eq!(*nk, 1.0, max_relative = 1e-10));
    let p_final = prob_density(&q);
    let peak = p_init.iter().copied().fold(0.0, f64::max);
    let drift = p_init.iter().zip(&p_final)
        .map(|(pi, pf)| (pi - pf).abs())
        .fold(0.0, f64::max);
    assert!(drift < 0.02 * peak, "density drifted by {:e} of peak", drift / peak);
    let m = moments(&p_final, &params);
    assert_relative_eq!(m.width.0, osc.length() / 2.0_f64.sqrt(), max_relative = 1e-2);
    assert_relative_eq!(m.width.1, osc.length() / 2.0_f64.sqrt(), max_relative = 1e-2);
}

#[test]
fn free_packet_spreads_in_place() {
    let params = Params::new(100, 0.05, 0.01).unwrap();
    let evolver = Evolver::new(params, |_, _| 0.0);
    // exactly centered between the walls
    let c = params.coord(params.n() - 1) / 2.0;
    let sigma0: f64 = 0.25;
    let mut q = params.sample(gaussian_packet(c, c, sigma0, 0.0, 0.0));
    wf_renormalize(&mut q, params.dx());
    let frames = evolver.evolve_frames(&mut q, 30, 5).unwrap();
    let widths: Vec<(f64, f64)>
        = frames.densities.outer_iter()
        .map(|p| {
            let m = moments(&p, &params);
            assert_abs_diff_eq!(m.mean.0, c, epsilon = 1e-6);
            assert_abs_diff_eq!(m.mean.1, c, epsilon = 1e-6);
            m.width
        })
        .collect();
    widths.iter().zip(widths.iter().skip(1))
        .for_each(|(w0, w1)| assert!(w1.0 > w0.0 && w1.1 > w0.1));

    // σ(t) = σ₀ √(1 + (ħ t / 2 m σ₀²)²)
    let t = 30.0 * params.dt();
    let sigma = sigma0 * (1.0 + (t / (2.0 * sigma0.powi(2))).powi(2)).sqrt();
    let (wx, wy) = widths[widths.len() - 1];
    assert_relative_eq!(wx, sigma, max_relative = 2e-2);
    assert_relative_eq!(wy, sigma, max_relative = 2e-2);
}

#[test]
fn edges_stay_finite() {
    let params = Params::new(60, 0.05, 0.05).unwrap();
    let evolver = Evolver::new(params, |x, _| 20.0 * x);
    // packet aimed straight at the x = 0 wall
    let c = params.center();
    let mut q = params.sample(gaussian_packet(0.6, c, 0.2, -15.0, 0.0));
    wf_renormalize(&mut q, params.dx());
    evolver.evolve(&mut q, 50).unwrap();
    assert!(q.iter().all(|qk| qk.re.is_finite() && qk.im.is_finite()));
    let n = params.n();
    for k in 0..n {
        for qk in [q[[0, k]], q[[n - 1, k]], q[[k, 0]], q[[k, n - 1]]] {
            assert!(qk.norm().is_finite());
        }
    }
    assert_relative_eq!(wf_norm(&q, params.dx()), 1.0, max_relative = 1e-2);
}
