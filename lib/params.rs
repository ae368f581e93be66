//! Numerical and physical parameters shared by a single simulation.
//!
//! The wavefunction is sampled on a uniform `n`×`n` lattice with spacing `dx`,
//! with the origin at grid index `(0, 0)`, so that array element `[i, j]`
//! corresponds to the point `(x[i], y[j]) = (i dx, j dx)`.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::error::ParamError;

pub type PResult<T> = Result<T, ParamError>;

/// Grid geometry, time step, and physical constants for a single evolution.
///
/// Values can only be constructed through [`Params::new`] and the `with_*`
/// methods, which validate everything they are given.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Params {
    n: usize,
    dx: f64,
    dt: f64,
    mass: f64,
    hbar: f64,
}

impl Params {
    /// Create a new set of parameters for an `n`×`n` grid of spacing `dx`
    /// evolved in steps of `dt`, with unit mass and ħ.
    pub fn new(n: usize, dx: f64, dt: f64) -> PResult<Self> {
        ParamError::check_size(n)?;
        ParamError::check_spacing(dx)?;
        ParamError::check_timestep(dt)?;
        Ok(Self { n, dx, dt, mass: 1.0, hbar: 1.0 })
    }

    /// Set the particle mass.
    pub fn with_mass(mut self, mass: f64) -> PResult<Self> {
        ParamError::check_mass(mass)?;
        self.mass = mass;
        Ok(self)
    }

    /// Set the value of ħ.
    pub fn with_hbar(mut self, hbar: f64) -> PResult<Self> {
        ParamError::check_hbar(hbar)?;
        self.hbar = hbar;
        Ok(self)
    }

    /// Number of grid points per side.
    pub fn n(&self) -> usize { self.n }

    /// Grid spacing.
    pub fn dx(&self) -> f64 { self.dx }

    /// Time step.
    pub fn dt(&self) -> f64 { self.dt }

    /// Particle mass.
    pub fn mass(&self) -> f64 { self.mass }

    /// ħ.
    pub fn hbar(&self) -> f64 { self.hbar }

    /// The complex, diffusion-like coefficient `r = i ħ dt / (4 m dx²)`
    /// coupling neighboring grid points in each half-step.
    pub fn r(&self) -> C64 {
        C64::i() * self.hbar * self.dt / (4.0 * self.mass * self.dx.powi(2))
    }

    /// Factor `dt / (4 ħ)` multiplying the potential on the diagonal of the
    /// implicit and explicit half-step operators.
    pub fn potential_factor(&self) -> f64 { self.dt / (4.0 * self.hbar) }

    /// Coordinate of the `k`-th grid point along either axis.
    pub fn coord(&self, k: usize) -> f64 { k as f64 * self.dx }

    /// All grid coordinates along either axis.
    pub fn coords(&self) -> nd::Array1<f64> {
        (0..self.n).map(|k| self.coord(k)).collect()
    }

    /// Side length of the sampled region, `n dx`.
    pub fn extent(&self) -> f64 { self.n as f64 * self.dx }

    /// Center of the sampled region along either axis, `n dx / 2`.
    pub fn center(&self) -> f64 { self.extent() / 2.0 }

    /// Evaluate a function of position at every grid point.
    ///
    /// ```
    /// use quant2d::params::Params;
    ///
    /// let params = Params::new(4, 0.5, 0.01).unwrap();
    /// let v = params.sample(|x, y| x + 10.0 * y);
    /// assert_eq!(v[[2, 1]], 1.0 + 5.0);
    /// ```
    pub fn sample<F, A>(&self, mut f: F) -> nd::Array2<A>
    where F: FnMut(f64, f64) -> A
    {
        nd::Array2::from_shape_fn(
            (self.n, self.n),
            |(i, j)| f(self.coord(i), self.coord(j)),
        )
    }
}
