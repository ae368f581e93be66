//! Analytic initial states and potentials for use with
//! [`Evolver`][crate::timedep::Evolver].
//!
//! All states are returned as closures over position, normalized in the
//! continuum; wavefunctions sampled on a finite lattice should be renormalized
//! with [`wf_renormalize`][crate::utils::wf_renormalize] before evolution.

use std::f64::consts::PI;
use num_complex::Complex64 as C64;
use crate::params::Params;

/// Evaluate the (physicists') Hermite polynomial *H*<sub>*n*</sub>(*z*).
pub fn hermite(n: u32, z: f64) -> f64 {
    match n {
        0 => 1.0,
        1 => 2.0 * z,
        _ => {
            let mut h = (1.0, 2.0 * z);
            for k in 1..n {
                h = (h.1, 2.0 * z * h.1 - 2.0 * f64::from(k) * h.0);
            }
            h.1
        },
    }
}

fn factorial(n: u32) -> f64 { (1..=n).map(f64::from).product() }

/// An isotropic two-dimensional harmonic trap.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Oscillator {
    /// Particle mass.
    pub mass: f64,
    /// Angular trap frequency.
    pub omega: f64,
    /// ħ.
    pub hbar: f64,
    /// Trap center, *x*-coordinate.
    pub x0: f64,
    /// Trap center, *y*-coordinate.
    pub y0: f64,
}

impl Oscillator {
    /// Create a trap centered on the lattice described by `params`, using its
    /// mass and ħ.
    pub fn centered(params: &Params, omega: f64) -> Self {
        Self {
            mass: params.mass(),
            omega,
            hbar: params.hbar(),
            x0: params.center(),
            y0: params.center(),
        }
    }

    /// Spring constant *m ω*².
    pub fn spring_constant(&self) -> f64 { self.mass * self.omega.powi(2) }

    /// Length scale √(ħ / *m ω*) of the ground state.
    pub fn length(&self) -> f64 { (self.hbar / self.mass / self.omega).sqrt() }

    /// Energy of the eigenstate with quantum numbers `(a, b)`.
    pub fn energy(&self, a: u32, b: u32) -> f64 {
        self.hbar * self.omega * (f64::from(a) + f64::from(b) + 1.0)
    }

    /// Return the trap potential as a function of position.
    pub fn potential(&self) -> impl Fn(f64, f64) -> f64 + Copy {
        let k = self.spring_constant();
        let Self { x0, y0, .. } = *self;
        move |x, y| 0.5 * k * ((x - x0).powi(2) + (y - y0).powi(2))
    }

    /// Return the energy eigenstate with `a` quanta along *x* and `b` along
    /// *y* as a function of position.
    pub fn eigenstate(&self, a: u32, b: u32) -> impl Fn(f64, f64) -> C64 + Copy {
        let l = self.length();
        let c = (PI * l.powi(2)).recip().sqrt()
            / (2.0_f64.powi((a + b) as i32) * factorial(a) * factorial(b)).sqrt();
        let Self { x0, y0, .. } = *self;
        move |x, y| {
            let zx = (x - x0) / l;
            let zy = (y - y0) / l;
            C64::from(
                c * (-0.5 * (zx.powi(2) + zy.powi(2))).exp()
                    * hermite(a, zx) * hermite(b, zy)
            )
        }
    }

    /// Return the trap ground state displaced to `(xc, yc)` and boosted to
    /// mean momentum `(px, py)` as a function of position.
    ///
    /// Evolved in the trap, this state oscillates about the trap center
    /// without changing shape.
    pub fn coherent(&self, xc: f64, yc: f64, px: f64, py: f64)
        -> impl Fn(f64, f64) -> C64 + Copy
    {
        let l = self.length();
        let c = (PI * l.powi(2)).recip().sqrt();
        let hbar = self.hbar;
        move |x, y| {
            let dx = x - xc;
            let dy = y - yc;
            C64::from_polar(
                c * (-0.5 * (dx.powi(2) + dy.powi(2)) / l.powi(2)).exp(),
                (px * dx + py * dy) / hbar,
            )
        }
    }
}

/// Return a normalized Gaussian wave packet centered on `(x0, y0)` with
/// probability-density width `sigma` along each axis and wavevector
/// `(kx, ky)`.
pub fn gaussian_packet(x0: f64, y0: f64, sigma: f64, kx: f64, ky: f64)
    -> impl Fn(f64, f64) -> C64 + Copy
{
    let c = (2.0 * PI * sigma.powi(2)).recip().sqrt();
    move |x, y| {
        let dx = x - x0;
        let dy = y - y0;
        C64::from_polar(
            c * (-(dx.powi(2) + dy.powi(2)) / (4.0 * sigma.powi(2))).exp(),
            kx * dx + ky * dy,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use crate::utils::{ moments, prob_density, wf_dot, wf_norm };

    #[test]
    fn hermite_values() {
        for z in [-1.5, -0.3, 0.0, 0.7, 2.0_f64] {
            assert_abs_diff_eq!(hermite(0, z), 1.0);
            assert_abs_diff_eq!(hermite(1, z), 2.0 * z);
            assert_abs_diff_eq!(hermite(2, z), 4.0 * z * z - 2.0, epsilon = 1e-12);
            assert_abs_diff_eq!(
                hermite(3, z), 8.0 * z.powi(3) - 12.0 * z, epsilon = 1e-12);
            assert_abs_diff_eq!(
                hermite(4, z),
                16.0 * z.powi(4) - 48.0 * z * z + 12.0,
                epsilon = 1e-10,
            );
        }
    }

    #[test]
    fn eigenstates_are_orthonormal() {
        let params = Params::new(120, 0.1, 0.01).unwrap();
        let osc = Oscillator::centered(&params, 1.0);
        let q00 = params.sample(osc.eigenstate(0, 0));
        let q10 = params.sample(osc.eigenstate(1, 0));
        let q21 = params.sample(osc.eigenstate(2, 1));
        let dx = params.dx();
        assert_abs_diff_eq!(wf_norm(&q00, dx), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(wf_norm(&q10, dx), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(wf_norm(&q21, dx), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(wf_dot(&q00, &q10, dx).norm(), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(wf_dot(&q10, &q21, dx).norm(), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(osc.energy(2, 1), 4.0);
    }

    #[test]
    fn packet_shapes() {
        let params = Params::new(100, 0.1, 0.01).unwrap();
        let q = params.sample(gaussian_packet(4.5, 5.0, 0.5, 2.0, -1.0));
        let m = moments(&prob_density(&q), &params);
        assert_abs_diff_eq!(wf_norm(&q, params.dx()), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(m.mean.0, 4.5, epsilon = 1e-6);
        assert_abs_diff_eq!(m.mean.1, 5.0, epsilon = 1e-6);
        assert_abs_diff_eq!(m.width.0, 0.5, epsilon = 1e-6);

        let osc = Oscillator::centered(&params, 2.0);
        let q = params.sample(osc.coherent(3.0, 5.0, 1.0, 0.0));
        let m = moments(&prob_density(&q), &params);
        assert_abs_diff_eq!(wf_norm(&q, params.dx()), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(m.mean.0, 3.0, epsilon = 1e-6);
        // ground-state density width is l / √2
        assert_abs_diff_eq!(m.width.1, osc.length() / 2.0_f64.sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn trap_potential() {
        let params = Params::new(100, 0.05, 0.01).unwrap();
        let osc = Oscillator::centered(&params, 1.0);
        let v = osc.potential();
        assert_abs_diff_eq!(v(2.5, 2.5), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v(3.5, 2.5), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(v(1.5, 3.5), 1.0, epsilon = 1e-12);
    }
}
