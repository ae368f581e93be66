//! Provides functions to compute trajectories of a classical point particle
//! moving in a conservative, two-dimensional potential.
//!
//! The state of the particle is a phase-space point `[x, y, vx, vy]`, evolved
//! according to
//! ```text
//! d/dt [x, y, vx, vy] = [vx, vy, -∂V/∂x / m, -∂V/∂y / m]
//! ```
//! Integration stops early if the particle leaves the square box
//! `|x|, |y| < bound`.
//!
//! ```
//! use quant2d::classical::{ Particle, Potential, RkfOptions, Term, rkf45_trajectory };
//!
//! let particle = Particle::new(1.0).unwrap();
//! let pot = Potential::new().with(Term::Oscillator { k: 1.0 });
//! let traj = rkf45_trajectory(
//!     &particle, &pot, [25.0, 0.0, 0.0, 0.0], 10.0, 50.0, &RkfOptions::default(),
//! ).unwrap();
//! let e = traj.total_energy(&particle, &pot);
//! assert!(e.iter().all(|ek| (ek - 625.0).abs() < 1e-2));
//! ```

use ndarray as nd;
use serde::Serialize;
use tracing::{ debug, trace, warn };
use crate::{
    error::{ CError, ParamError },
    DEF_EPSILON,
    DEF_MAXITERS,
};

pub type CResult<T> = Result<T, CError>;

/// A phase-space point `[x, y, vx, vy]`.
pub type Phase = [f64; 4];

/// A scalar potential with known gradient.
pub trait Field {
    /// Value of the potential at `(x, y)`.
    fn value(&self, x: f64, y: f64) -> f64;

    /// Gradient `(∂V/∂x, ∂V/∂y)` of the potential at `(x, y)`.
    fn gradient(&self, x: f64, y: f64) -> (f64, f64);
}

/// A single term in a [`Potential`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Term {
    /// Uniform force field, `V = fx x + fy y`.
    Linear { fx: f64, fy: f64 },
    /// Isotropic oscillator centered on the origin, `V = k (x² + y²)`.
    Oscillator { k: f64 },
}

impl Field for Term {
    fn value(&self, x: f64, y: f64) -> f64 {
        match *self {
            Self::Linear { fx, fy } => fx * x + fy * y,
            Self::Oscillator { k } => k * (x.powi(2) + y.powi(2)),
        }
    }

    fn gradient(&self, x: f64, y: f64) -> (f64, f64) {
        match *self {
            Self::Linear { fx, fy } => (fx, fy),
            Self::Oscillator { k } => (2.0 * k * x, 2.0 * k * y),
        }
    }
}

/// A potential formed as the sum of any number of [`Term`]s.
///
/// The empty potential is identically zero.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Potential {
    terms: Vec<Term>,
}

impl Potential {
    /// Create a new, empty potential.
    pub fn new() -> Self { Self::default() }

    /// Add a term in place.
    pub fn add(&mut self, term: Term) -> &mut Self {
        self.terms.push(term);
        self
    }

    /// Add a term, returning `self`.
    pub fn with(mut self, term: Term) -> Self {
        self.terms.push(term);
        self
    }

    /// Remove all terms.
    pub fn clear(&mut self) { self.terms.clear(); }

    /// Return the current terms.
    pub fn terms(&self) -> &[Term] { &self.terms }
}

impl FromIterator<Term> for Potential {
    fn from_iter<I>(iter: I) -> Self
    where I: IntoIterator<Item = Term>
    {
        Self { terms: iter.into_iter().collect() }
    }
}

impl Field for Potential {
    fn value(&self, x: f64, y: f64) -> f64 {
        self.terms.iter().map(|term| term.value(x, y)).sum()
    }

    fn gradient(&self, x: f64, y: f64) -> (f64, f64) {
        self.terms.iter()
            .map(|term| term.gradient(x, y))
            .fold((0.0, 0.0), |acc, g| (acc.0 + g.0, acc.1 + g.1))
    }
}

/// A classical point particle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    mass: f64,
}

impl Particle {
    /// Create a new particle.
    pub fn new(mass: f64) -> Result<Self, ParamError> {
        ParamError::check_mass(mass)?;
        Ok(Self { mass })
    }

    /// Particle mass.
    pub fn mass(&self) -> f64 { self.mass }

    /// Time derivative of the phase-space point `q`.
    pub fn rhs<F>(&self, field: &F, q: &Phase) -> Phase
    where F: Field + ?Sized
    {
        let (gx, gy) = field.gradient(q[0], q[1]);
        [q[2], q[3], -gx / self.mass, -gy / self.mass]
    }

    /// Kinetic energy at the phase-space point `q`.
    pub fn kinetic_energy(&self, q: &Phase) -> f64 {
        0.5 * self.mass * (q[2].powi(2) + q[3].powi(2))
    }
}

// compute `q + h * Σ c_k k_k` succinctly
fn combine(q: &Phase, h: f64, terms: &[(f64, &Phase)]) -> Phase {
    let mut out = *q;
    for (c, k) in terms {
        out.iter_mut().zip(k.iter())
            .for_each(|(o, kk)| { *o += h * c * kk; });
    }
    out
}

fn is_finite(q: &Phase) -> bool { q.iter().all(|qk| qk.is_finite()) }

fn outside(q: &Phase, bound: f64) -> bool {
    q[0].abs() >= bound || q[1].abs() >= bound
}

/// Take a single fourth-order Runge-Kutta step of size `dt`.
pub fn rk4_step<F>(particle: &Particle, field: &F, q: &Phase, dt: f64) -> Phase
where F: Field + ?Sized
{
    let k1 = particle.rhs(field, q);
    let k2 = particle.rhs(field, &combine(q, dt / 2.0, &[(1.0, &k1)]));
    let k3 = particle.rhs(field, &combine(q, dt / 2.0, &[(1.0, &k2)]));
    let k4 = particle.rhs(field, &combine(q, dt, &[(1.0, &k3)]));
    combine(q, dt / 6.0, &[(1.0, &k1), (2.0, &k2), (2.0, &k3), (1.0, &k4)])
}

/// A time series of phase-space points.
#[derive(Clone, Debug, Serialize)]
pub struct Trajectory {
    /// Time coordinates.
    pub t: nd::Array1<f64>,
    /// Phase-space points `[x, y, vx, vy]`; the first axis indexes time.
    pub q: nd::Array2<f64>,
}

impl Trajectory {
    fn from_vecs(t: Vec<f64>, q: Vec<Phase>) -> Self {
        let q = nd::Array2::from_shape_fn((q.len(), 4), |(k, c)| q[k][c]);
        Self { t: nd::Array1::from_vec(t), q }
    }

    /// Number of recorded points.
    pub fn len(&self) -> usize { self.t.len() }

    /// Return `true` if no points are recorded.
    pub fn is_empty(&self) -> bool { self.t.is_empty() }

    /// Sizes of the steps taken between recorded points.
    pub fn steps(&self) -> nd::Array1<f64> {
        self.t.iter().zip(self.t.iter().skip(1))
            .map(|(tk, tkp1)| tkp1 - tk)
            .collect()
    }

    /// Kinetic energy at each recorded point.
    pub fn kinetic_energy(&self, particle: &Particle) -> nd::Array1<f64> {
        self.q.outer_iter()
            .map(|qk| 0.5 * particle.mass() * (qk[2].powi(2) + qk[3].powi(2)))
            .collect()
    }

    /// Potential energy at each recorded point.
    pub fn potential_energy<F>(&self, field: &F) -> nd::Array1<f64>
    where F: Field + ?Sized
    {
        self.q.outer_iter()
            .map(|qk| field.value(qk[0], qk[1]))
            .collect()
    }

    /// Total mechanical energy at each recorded point.
    pub fn total_energy<F>(&self, particle: &Particle, field: &F)
        -> nd::Array1<f64>
    where F: Field + ?Sized
    {
        self.kinetic_energy(particle) + self.potential_energy(field)
    }
}

/// Perform fixed-step fourth-order Runge-Kutta integration from `q0` until
/// `t_max`, or until the particle leaves the box `|x|, |y| < bound`.
///
/// The first point outside the box is not recorded.
pub fn rk4_trajectory<F>(
    particle: &Particle,
    field: &F,
    q0: Phase,
    dt: f64,
    t_max: f64,
    bound: f64,
) -> CResult<Trajectory>
where F: Field + ?Sized
{
    ParamError::check_timestep(dt)?;
    ParamError::check_duration(t_max)?;
    ParamError::check_bound(bound)?;

    let nt = (t_max / dt).round() as usize;
    let mut t: Vec<f64> = Vec::with_capacity(nt + 1);
    let mut q: Vec<Phase> = Vec::with_capacity(nt + 1);
    t.push(0.0);
    q.push(q0);
    let mut q_temp: Phase = q0;
    for k in 1..=nt {
        q_temp = rk4_step(particle, field, &q_temp, dt);
        let tk = k as f64 * dt;
        if !is_finite(&q_temp) { return Err(CError::NonFinite(tk)); }
        if outside(&q_temp, bound) {
            debug!(t = tk, "particle left the bounding box");
            break;
        }
        t.push(tk);
        q.push(q_temp);
    }
    Ok(Trajectory::from_vecs(t, q))
}

/// Options for [`rkf45_step`] and [`rkf45_trajectory`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RkfOptions {
    /// Allowed local truncation error per unit step size.
    pub epsilon: f64,
    /// Largest allowed step size.
    pub h_max: f64,
    /// Largest number of trial steps per accepted step.
    pub maxiters: usize,
}

impl Default for RkfOptions {
    fn default() -> Self {
        Self { epsilon: DEF_EPSILON, h_max: 0.05, maxiters: DEF_MAXITERS }
    }
}

impl RkfOptions {
    fn check(&self) -> Result<(), ParamError> {
        ParamError::check_epsilon(self.epsilon)?;
        ParamError::check_timestep(self.h_max)?;
        ParamError::check_maxiters(self.maxiters)?;
        Ok(())
    }
}

// single Runge-Kutta-Fehlberg trial step; returns the fifth-order estimate and
// the difference from the embedded fourth-order one
fn rkf45_trial<F>(particle: &Particle, field: &F, q: &Phase, h: f64)
    -> (Phase, Phase)
where F: Field + ?Sized
{
    let k0 = particle.rhs(field, q);
    let k1 = particle.rhs(field, &combine(q, h, &[(0.25, &k0)]));
    let k2 = particle.rhs(field, &combine(
        q, h, &[(3.0 / 32.0, &k0), (9.0 / 32.0, &k1)]));
    let k3 = particle.rhs(field, &combine(
        q, h,
        &[
            (1932.0 / 2197.0, &k0),
            (-7200.0 / 2197.0, &k1),
            (7296.0 / 2197.0, &k2),
        ],
    ));
    let k4 = particle.rhs(field, &combine(
        q, h,
        &[
            (439.0 / 216.0, &k0),
            (-8.0, &k1),
            (3680.0 / 513.0, &k2),
            (-845.0 / 4104.0, &k3),
        ],
    ));
    let k5 = particle.rhs(field, &combine(
        q, h,
        &[
            (-8.0 / 27.0, &k0),
            (2.0, &k1),
            (-3544.0 / 2565.0, &k2),
            (1859.0 / 4104.0, &k3),
            (-11.0 / 40.0, &k4),
        ],
    ));
    let next = combine(
        q, h,
        &[
            (16.0 / 135.0, &k0),
            (6656.0 / 12825.0, &k2),
            (28561.0 / 56430.0, &k3),
            (-9.0 / 50.0, &k4),
            (2.0 / 55.0, &k5),
        ],
    );
    let delta = combine(
        &[0.0; 4], h,
        &[
            (1.0 / 360.0, &k0),
            (-128.0 / 4275.0, &k2),
            (-2197.0 / 75240.0, &k3),
            (1.0 / 50.0, &k4),
            (2.0 / 55.0, &k5),
        ],
    );
    (next, delta)
}

/// Take a single Runge-Kutta-Fehlberg 4(5) step at time `t`, starting with a
/// trial step size `h` and shrinking it until the local error bound is met.
///
/// Returns the new phase-space point, the step size actually taken, and the
/// proposed size of the following step (never larger than `opts.h_max`).
pub fn rkf45_step<F>(
    particle: &Particle,
    field: &F,
    t: f64,
    q: &Phase,
    h: f64,
    opts: &RkfOptions,
) -> CResult<(Phase, f64, f64)>
where F: Field + ?Sized
{
    // safety number
    const SAFE: f64 = 0.9;

    opts.check()?;
    ParamError::check_timestep(h)?;
    let mut h = h.min(opts.h_max);
    let mut h_new: f64;
    let mut err: f64;
    for _ in 0..opts.maxiters {
        let (next, delta) = rkf45_trial(particle, field, q, h);
        err = delta.iter().map(|dk| dk * dk).sum::<f64>().sqrt();
        h_new = SAFE * h * (h * opts.epsilon / err).powf(0.25);
        if h_new.is_nan() {
            warn!(t, h, "rkf45 error estimate is not a number; falling back to h_max");
            h_new = opts.h_max;
        }
        h_new = h_new.min(opts.h_max);
        if h_new <= 0.0 { break; }
        if h_new >= h {
            if !is_finite(&next) { return Err(CError::NonFinite(t + h)); }
            return Ok((next, h, h_new));
        }
        h = h_new;
    }
    Err(CError::StepSize(t))
}

/// Perform Runge-Kutta-Fehlberg 4(5) integration with adaptive step size from
/// `q0` until `t_max`, or until the particle leaves the box
/// `|x|, |y| < bound`.
///
/// If the particle stays in the box, `t_max` is guaranteed to be the last
/// element of the returned time-coordinate array.
pub fn rkf45_trajectory<F>(
    particle: &Particle,
    field: &F,
    q0: Phase,
    t_max: f64,
    bound: f64,
    opts: &RkfOptions,
) -> CResult<Trajectory>
where F: Field + ?Sized
{
    opts.check()?;
    ParamError::check_duration(t_max)?;
    ParamError::check_bound(bound)?;

    let mut t: Vec<f64> = vec![0.0];
    let mut q: Vec<Phase> = vec![q0];
    let mut t_temp: f64 = 0.0;
    let mut q_temp: Phase = q0;
    let mut h: f64 = opts.h_max;
    let mut remaining: f64;
    let mut clipped: bool;
    while t_temp < t_max {
        remaining = t_max - t_temp;
        clipped = h >= remaining;
        let h_try = if clipped { remaining } else { h };
        let (q_next, h_used, h_next)
            = rkf45_step(particle, field, t_temp, &q_temp, h_try, opts)?;
        if outside(&q_next, bound) {
            debug!(t = t_temp + h_used, "particle left the bounding box");
            break;
        }
        t_temp = if clipped && h_used == h_try { t_max } else { t_temp + h_used };
        q_temp = q_next;
        h = h_next;
        trace!(t = t_temp, h = h_used);
        t.push(t_temp);
        q.push(q_temp);
    }
    Ok(Trajectory::from_vecs(t, q))
}
