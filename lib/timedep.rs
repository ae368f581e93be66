//! Provides an alternating-direction implicit (ADI) Crank-Nicolson solver for
//! the 2+1-dimensional (time-dependent) Schrödinger equation (TDSE) in a
//! time-independent, conservative potential.
//!
//! Each time step is split into two implicit half-steps, one per spatial axis.
//! In each half-step, every grid line along the active axis is updated
//! independently by solving a tridiagonal system
//! ```text
//! A ψ' = B ψ
//!
//! A = (1 + 2r + i θ) I{0} - r (I{-1} + I{+1})
//! B = (1 - 2r - i θ) I{0} + r (I{-1} + I{+1})
//!
//! r = i ħ dt / (4 m dx²)
//! θ = dt V / (4 ħ)
//! ```
//! where *θ* varies along the line with the potential. Points just outside the
//! grid are held at zero. See [`docs`][crate::docs#time-dependence] for
//! details.
//!
//! In all 2D arrays, the first (or zero-th) axis indexes *x* and the second
//! indexes *y*.

use std::fmt;
use ndarray as nd;
use num_complex::Complex64 as C64;
use serde::Serialize;
use tracing::{ debug, info };
use crate::{
    Arr2,
    error::{ TError, TridiagError },
    params::Params,
    tridiag::{ self, Tridiagonal },
    utils::{ density_norm, prob_density, wf_norm },
};

pub type TResult<T> = Result<T, TError>;

/// Direction of a single implicit half-step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SweepAxis {
    /// Lines run along *x* (first array index) at fixed *y*.
    X,
    /// Lines run along *y* (second array index) at fixed *x*.
    Y,
}

impl SweepAxis {
    // the array axis held fixed while lines along `self` are solved
    fn fixed(self) -> nd::Axis {
        match self {
            Self::X => nd::Axis(1),
            Self::Y => nd::Axis(0),
        }
    }
}

impl fmt::Display for SweepAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
        }
    }
}

/// Probability densities and norms recorded over the course of
/// [`Evolver::evolve_frames`].
#[derive(Clone, Debug, Serialize)]
pub struct Frames {
    /// Norm after every step, starting with the initial state.
    pub norms: nd::Array1<f64>,
    /// Step index of each recorded frame.
    pub steps: nd::Array1<usize>,
    /// Recorded probability densities; the first axis indexes frames.
    pub densities: nd::Array3<f64>,
}

/// Evolves wavefunctions on a fixed lattice in a fixed potential.
///
/// The potential is sampled once on construction and the constant parts of the
/// half-step operators are built once, so that a single `Evolver` can be used
/// to evolve any number of states.
///
/// ```
/// use num_complex::Complex64 as C64;
/// use quant2d::{ params::Params, timedep::Evolver, utils };
///
/// let params = Params::new(32, 0.1, 0.005).unwrap();
/// let c = params.center();
/// let evolver = Evolver::new(params, |x, y| 0.5 * ((x - c).powi(2) + (y - c).powi(2)));
/// let mut psi = params.sample(|x, y| {
///     C64::from((-((x - c).powi(2) + (y - c).powi(2)) / 0.5).exp())
/// });
/// utils::wf_renormalize(&mut psi, params.dx());
/// let norms = evolver.evolve(&mut psi, 10).unwrap();
/// assert_eq!(norms.len(), 11);
/// assert!((norms[10] - 1.0).abs() < 1e-9);
/// ```
#[derive(Clone, Debug)]
pub struct Evolver {
    params: Params,
    V: nd::Array2<f64>,
    // off-diagonals -r, diagonal 1 + 2r
    implicit: Tridiagonal<C64>,
    // off-diagonals +r, diagonal 1 - 2r
    explicit: Tridiagonal<C64>,
}

impl Evolver {
    /// Create a new evolver for a potential given as a function of position.
    pub fn new<F>(params: Params, potential: F) -> Self
    where F: FnMut(f64, f64) -> f64
    {
        let V = params.sample(potential);
        Self::build(params, V)
    }

    /// Create a new evolver for a potential already sampled on the lattice.
    pub fn from_sampled<S>(params: Params, V: &Arr2<S>) -> TResult<Self>
    where S: nd::Data<Elem = f64>
    {
        TError::check_shape(V, params.n())?;
        Ok(Self::build(params, V.to_owned()))
    }

    fn build(params: Params, V: nd::Array2<f64>) -> Self {
        let n = params.n();
        let r = params.r();
        let implicit = Tridiagonal::from_constant(n, -r, 1.0 + 2.0 * r, -r);
        let explicit = Tridiagonal::from_constant(n, r, 1.0 - 2.0 * r, r);
        Self { params, V, implicit, explicit }
    }

    /// Return the parameters used by this evolver.
    pub fn params(&self) -> &Params { &self.params }

    /// Return the potential sampled on the lattice.
    pub fn potential(&self) -> &nd::Array2<f64> { &self.V }

    // update a single line in place; `V` is the potential along the same line
    fn solve_line<S>(&self, mut q: nd::ArrayViewMut1<'_, C64>, V: &nd::ArrayBase<S, nd::Ix1>)
        -> Result<(), TridiagError>
    where S: nd::Data<Elem = f64>
    {
        let f = self.params.potential_factor();
        let itheta: nd::Array1<C64> = V.mapv(|Vk| C64::i() * f * Vk);
        let a_diag = &self.implicit.diag() + &itheta;
        let b_diag = &self.explicit.diag() - &itheta;
        let rhs = tridiag::apply(
            &self.explicit.sub(), &b_diag, &self.explicit.sup(), &q)?;
        let q_new = tridiag::solve(
            &self.implicit.sub(), &a_diag, &self.implicit.sup(), &rhs)?;
        q.assign(&q_new);
        Ok(())
    }

    fn sweep_unchecked<S>(&self, q: &mut Arr2<S>, axis: SweepAxis) -> TResult<()>
    where S: nd::DataMut<Elem = C64>
    {
        let fixed = axis.fixed();
        q.axis_iter_mut(fixed).zip(self.V.axis_iter(fixed)).enumerate()
            .try_for_each(|(line, (ql, Vl))| {
                self.solve_line(ql, &Vl)
                    .map_err(|source| TError::Sweep { axis, line, source })
            })
    }

    fn step_unchecked<S>(&self, q: &mut Arr2<S>) -> TResult<()>
    where S: nd::DataMut<Elem = C64>
    {
        self.sweep_unchecked(q, SweepAxis::X)?;
        self.sweep_unchecked(q, SweepAxis::Y)
    }

    /// Perform the implicit half-step update for a single grid line in place.
    ///
    /// For [`SweepAxis::X`], `line` is the (fixed) *y* index and the line is
    /// `q[.., line]`; for [`SweepAxis::Y`], `line` is the (fixed) *x* index and
    /// the line is `q[line, ..]`.
    pub fn sweep_line<S>(&self, q: &mut Arr2<S>, axis: SweepAxis, line: usize)
        -> TResult<()>
    where S: nd::DataMut<Elem = C64>
    {
        let n = self.params.n();
        TError::check_shape(q, n)?;
        (line < n).then_some(()).ok_or(TError::BadLine(line, n))?;
        let fixed = axis.fixed();
        self.solve_line(q.index_axis_mut(fixed, line), &self.V.index_axis(fixed, line))
            .map_err(|source| TError::Sweep { axis, line, source })
    }

    /// Perform the implicit half-step update for every line along one axis in
    /// place.
    pub fn sweep<S>(&self, q: &mut Arr2<S>, axis: SweepAxis) -> TResult<()>
    where S: nd::DataMut<Elem = C64>
    {
        TError::check_shape(q, self.params.n())?;
        self.sweep_unchecked(q, axis)
    }

    /// Advance a wavefunction by a single time step in place.
    ///
    /// The *x* sweep is performed first, and the *y* sweep then acts on its
    /// output.
    pub fn step<S>(&self, q: &mut Arr2<S>) -> TResult<()>
    where S: nd::DataMut<Elem = C64>
    {
        TError::check_shape(q, self.params.n())?;
        self.step_unchecked(q)
    }

    /// Advance a wavefunction by `nsteps` time steps in place, returning the
    /// norm of the state before the first step and after every step.
    pub fn evolve<S>(&self, q: &mut Arr2<S>, nsteps: usize)
        -> TResult<nd::Array1<f64>>
    where S: nd::DataMut<Elem = C64>
    {
        TError::check_shape(q, self.params.n())?;
        let dx = self.params.dx();
        let mut norms: nd::Array1<f64> = nd::Array1::zeros(nsteps + 1);
        norms[0] = wf_norm(q, dx);
        info!(nsteps, norm = norms[0], "begin evolution");
        for (k, normk) in norms.iter_mut().enumerate().skip(1) {
            self.step_unchecked(q)?;
            *normk = density_norm(&prob_density(q), dx);
            debug!(step = k, norm = *normk);
        }
        info!(norm = norms[nsteps], "end evolution");
        Ok(norms)
    }

    /// Like [`Self::evolve`], but additionally record the probability density
    /// of the initial state and after every `every`-th step.
    pub fn evolve_frames<S>(&self, q: &mut Arr2<S>, nsteps: usize, every: usize)
        -> TResult<Frames>
    where S: nd::DataMut<Elem = C64>
    {
        TError::check_shape(q, self.params.n())?;
        if every == 0 { return Err(TError::BadFrameInterval); }
        let n = self.params.n();
        let dx = self.params.dx();
        let nframes = nsteps / every + 1;
        let mut norms: nd::Array1<f64> = nd::Array1::zeros(nsteps + 1);
        let steps: nd::Array1<usize> = (0..nframes).map(|k| k * every).collect();
        let mut densities: nd::Array3<f64> = nd::Array3::zeros((nframes, n, n));
        let p0 = prob_density(q);
        norms[0] = density_norm(&p0, dx);
        densities.index_axis_mut(nd::Axis(0), 0).assign(&p0);
        info!(nsteps, every, norm = norms[0], "begin evolution");
        for k in 1..=nsteps {
            self.step_unchecked(q)?;
            let pk = prob_density(q);
            norms[k] = density_norm(&pk, dx);
            debug!(step = k, norm = norms[k]);
            if k % every == 0 {
                densities.index_axis_mut(nd::Axis(0), k / every).assign(&pk);
            }
        }
        info!(norm = norms[nsteps], "end evolution");
        Ok(Frames { norms, steps, densities })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn test_params() -> Params { Params::new(24, 0.1, 0.01).unwrap() }

    fn bumpy(x: f64, y: f64) -> f64 { 3.0 * (2.0 * x).sin() * (1.5 * y).cos() + x }

    fn test_state(params: &Params) -> nd::Array2<C64> {
        let c = params.center();
        let mut q = params.sample(|x, y| {
            let rr = (x - c + 0.2).powi(2) + (y - c).powi(2);
            C64::from_polar((-rr / 0.3).exp(), 3.0 * x - y)
        });
        crate::utils::wf_renormalize(&mut q, params.dx());
        q
    }

    // dense implicit and explicit matrices for one line, built from scratch
    fn dense_ops(params: &Params, V: &[f64]) -> (nd::Array2<C64>, nd::Array2<C64>) {
        let n = V.len();
        let r = params.r();
        let f = params.potential_factor();
        let mut A: nd::Array2<C64> = nd::Array2::zeros((n, n));
        let mut B: nd::Array2<C64> = nd::Array2::zeros((n, n));
        for i in 0..n {
            A[[i, i]] = 1.0 + 2.0 * r + C64::i() * f * V[i];
            B[[i, i]] = 1.0 - 2.0 * r - C64::i() * f * V[i];
            if i + 1 < n {
                A[[i, i + 1]] = -r;
                A[[i + 1, i]] = -r;
                B[[i, i + 1]] = r;
                B[[i + 1, i]] = r;
            }
        }
        (A, B)
    }

    #[test]
    fn line_update_solves_crank_nicolson_system() {
        let params = test_params();
        let evolver = Evolver::new(params, bumpy);
        let q0 = test_state(&params);
        for (axis, line) in [(SweepAxis::X, 7), (SweepAxis::Y, 13)] {
            let mut q = q0.clone();
            evolver.sweep_line(&mut q, axis, line).unwrap();
            let (old, new, V): (nd::Array1<C64>, nd::Array1<C64>, Vec<f64>)
                = match axis {
                    SweepAxis::X => (
                        q0.column(line).to_owned(),
                        q.column(line).to_owned(),
                        (0..params.n())
                            .map(|i| bumpy(params.coord(i), params.coord(line)))
                            .collect(),
                    ),
                    SweepAxis::Y => (
                        q0.row(line).to_owned(),
                        q.row(line).to_owned(),
                        (0..params.n())
                            .map(|j| bumpy(params.coord(line), params.coord(j)))
                            .collect(),
                    ),
                };
            let (A, B) = dense_ops(&params, &V);
            let lhs = A.dot(&new);
            let rhs = B.dot(&old);
            for (l, r) in lhs.iter().zip(&rhs) {
                assert_abs_diff_eq!(l.re, r.re, epsilon = 1e-12);
                assert_abs_diff_eq!(l.im, r.im, epsilon = 1e-12);
            }
            // every other line is untouched
            let fixed = axis.fixed();
            for k in (0..params.n()).filter(|k| *k != line) {
                assert_eq!(q.index_axis(fixed, k), q0.index_axis(fixed, k));
            }
        }
    }

    #[test]
    fn step_is_x_then_y() {
        let params = test_params();
        let evolver = Evolver::new(params, bumpy);
        let mut q_step = test_state(&params);
        let mut q_sweep = q_step.clone();
        evolver.step(&mut q_step).unwrap();
        evolver.sweep(&mut q_sweep, SweepAxis::X).unwrap();
        evolver.sweep(&mut q_sweep, SweepAxis::Y).unwrap();
        assert_eq!(q_step, q_sweep);

        let mut q_rev = test_state(&params);
        evolver.sweep(&mut q_rev, SweepAxis::Y).unwrap();
        evolver.sweep(&mut q_rev, SweepAxis::X).unwrap();
        assert_ne!(q_step, q_rev);
    }

    #[test]
    fn steps_are_unitary() {
        let params = test_params();
        let evolver = Evolver::new(params, bumpy);
        let mut q = test_state(&params);
        let norms = evolver.evolve(&mut q, 25).unwrap();
        assert_eq!(norms.len(), 26);
        norms.iter().for_each(|nk| assert_abs_diff_eq!(*nk, 1.0, epsilon = 1e-10));
    }

    #[test]
    fn sampled_potential_matches_function() {
        let params = test_params();
        let V = params.sample(bumpy);
        let from_fn = Evolver::new(params, bumpy);
        let from_arr = Evolver::from_sampled(params, &V).unwrap();
        let mut q1 = test_state(&params);
        let mut q2 = q1.clone();
        from_fn.step(&mut q1).unwrap();
        from_arr.step(&mut q2).unwrap();
        assert_eq!(q1, q2);

        let bad: nd::Array2<f64> = nd::Array2::zeros((3, 4));
        assert!(matches!(
            Evolver::from_sampled(params, &bad),
            Err(TError::GridShape((3, 4), 24)),
        ));
    }

    #[test]
    fn frames_are_recorded() {
        let params = test_params();
        let evolver = Evolver::new(params, bumpy);
        let mut q = test_state(&params);
        let frames = evolver.evolve_frames(&mut q, 10, 3).unwrap();
        assert_eq!(frames.norms.len(), 11);
        assert_eq!(frames.steps, nd::array![0_usize, 3, 6, 9]);
        assert_eq!(frames.densities.dim(), (4, 24, 24));
        let p_init = prob_density(&test_state(&params));
        assert_eq!(frames.densities.index_axis(nd::Axis(0), 0), p_init);
        assert!(matches!(
            evolver.evolve_frames(&mut q, 10, 0),
            Err(TError::BadFrameInterval),
        ));
    }

    #[test]
    fn bad_inputs_are_reported() {
        let params = test_params();
        let evolver = Evolver::new(params, bumpy);
        let mut q: nd::Array2<C64> = nd::Array2::zeros((24, 23));
        assert!(matches!(evolver.step(&mut q), Err(TError::GridShape((24, 23), 24))));
        let mut q = test_state(&params);
        assert!(matches!(
            evolver.sweep_line(&mut q, SweepAxis::Y, 24),
            Err(TError::BadLine(24, 24)),
        ));
    }

    #[test]
    fn non_finite_potential_is_located() {
        let params = test_params();
        let x_bad = params.coord(5);
        let y_bad = params.coord(11);
        let evolver = Evolver::new(params, |x, y| {
            if x == x_bad && y == y_bad { f64::NAN } else { 0.0 }
        });
        let mut q = test_state(&params);
        match evolver.step(&mut q) {
            Err(TError::Sweep {
                axis: SweepAxis::X,
                line: 11,
                source: TridiagError::SingularPivot { row: 5, .. },
            }) => { },
            other => panic!("unexpected result {:?}", other),
        }
    }
}
