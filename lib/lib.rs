#![allow(dead_code, non_snake_case)]

//! Provides functions and higher-level constructs for the numerical solution of
//! the two-dimensional, time-dependent Schrödinger equation via an
//! alternating-direction implicit Crank-Nicolson scheme, along with a small
//! classical-mechanics integrator for point particles moving in the plane.
//!
//! Provides implementations for the following numerical routines:
//! - Linear algebra:
//!     - Tridiagonal (Thomas) solver with pivot checking
//! - Time-dependent:
//!     - Alternating-direction implicit (ADI) Crank-Nicolson[^1]
//! - Classical:
//!     - Fourth-order Runge-Kutta
//!     - Runge-Kutta-Fehlberg 4(5) with adaptive stepsize
//!
//! See [`docs`] for theoretical background.
//!
//! [^1]: W. H. Press et al., *Numerical Recipes: The Art of Scientific
//! Computing*, 3rd ed., §20.2 and §20.3.3.

pub mod error;
pub mod params;
pub mod tridiag;
pub mod timedep;
pub mod states;
pub mod classical;
pub mod utils;
pub mod output;

pub mod docs;

pub(crate) const DEF_EPSILON: f64 = 1e-6;
pub(crate) const DEF_MAXITERS: usize = 1000;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
pub type Arr2<S> = ndarray::ArrayBase<S, ndarray::Ix2>;
