//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use thiserror::Error;
use crate::timedep::SweepAxis;

/// Returned when an operation requiring equal-length arrays encounters arrays
/// with unequal length.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        let na = a.len();
        let nb = b.len();
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }
}

/// Returned when constructing [`Params`][crate::params::Params] or
/// [`RkfOptions`][crate::classical::RkfOptions] with unphysical or unusable
/// values.
#[derive(Debug, Error)]
pub enum ParamError {
    /// Returned when a grid has fewer than three points per side.
    #[error("grids must have at least 3 points per side; got {0}")]
    BadSize(usize),

    /// Returned when a non-positive or non-finite grid spacing is encountered.
    #[error("grid spacing must be positive and finite; got {0}")]
    BadSpacing(f64),

    /// Returned when a non-positive or non-finite time step is encountered.
    #[error("time step must be positive and finite; got {0}")]
    BadTimestep(f64),

    /// Returned when a non-positive or non-finite mass is encountered.
    #[error("mass must be positive and finite; got {0}")]
    BadMass(f64),

    /// Returned when a non-positive or non-finite value of ħ is encountered.
    #[error("hbar must be positive and finite; got {0}")]
    BadHbar(f64),

    /// Returned when a non-positive or non-finite integration time is
    /// encountered.
    #[error("integration time must be positive and finite; got {0}")]
    BadDuration(f64),

    /// Returned when a non-positive bounding box half-width is encountered.
    #[error("bounding box half-width must be positive; got {0}")]
    BadBound(f64),

    /// Returned when a non-positive `epsilon` value is encountered.
    #[error("epsilon values must be greater than 0; got {0}")]
    BadEpsilon(f64),

    /// Returned when a non-positive `maxiters` value is encountered.
    #[error("maxiters must be greater than 0; got {0}")]
    BadMaxiters(usize),
}

fn positive(x: f64) -> bool { x.is_finite() && x > 0.0 }

impl ParamError {
    pub(crate) fn check_size(n: usize) -> Result<(), Self> {
        (n >= 3).then_some(()).ok_or(Self::BadSize(n))
    }

    pub(crate) fn check_spacing(dx: f64) -> Result<(), Self> {
        positive(dx).then_some(()).ok_or(Self::BadSpacing(dx))
    }

    pub(crate) fn check_timestep(dt: f64) -> Result<(), Self> {
        positive(dt).then_some(()).ok_or(Self::BadTimestep(dt))
    }

    pub(crate) fn check_mass(mass: f64) -> Result<(), Self> {
        positive(mass).then_some(()).ok_or(Self::BadMass(mass))
    }

    pub(crate) fn check_hbar(hbar: f64) -> Result<(), Self> {
        positive(hbar).then_some(()).ok_or(Self::BadHbar(hbar))
    }

    pub(crate) fn check_duration(t: f64) -> Result<(), Self> {
        positive(t).then_some(()).ok_or(Self::BadDuration(t))
    }

    pub(crate) fn check_bound(bound: f64) -> Result<(), Self> {
        (bound > 0.0).then_some(()).ok_or(Self::BadBound(bound))
    }

    pub(crate) fn check_epsilon(epsilon: f64) -> Result<(), Self> {
        positive(epsilon).then_some(()).ok_or(Self::BadEpsilon(epsilon))
    }

    pub(crate) fn check_maxiters(maxiters: usize) -> Result<(), Self> {
        (maxiters != 0).then_some(()).ok_or(Self::BadMaxiters(maxiters))
    }
}

/// Returned from functions in [`tridiag`][crate::tridiag].
#[derive(Debug, Error)]
pub enum TridiagError {
    /// Returned when a band entry lying outside the matrix is non-zero, i.e.
    /// the first element of the sub-diagonal or the last element of the
    /// super-diagonal.
    #[error("{band}[{index}] lies outside the matrix and must be zero")]
    Wraparound { band: &'static str, index: usize },

    /// Returned when forward elimination encounters a pivot that is zero (to
    /// machine precision) or non-finite.
    #[error("singular pivot encountered at row {row}: |pivot| = {pivot:e}")]
    SingularPivot { row: usize, pivot: f64 },

    /// Returned when back-substitution produces a non-finite value.
    #[error("non-finite solution value at row {0}")]
    NonFinite(usize),

    /// [`LengthError`]
    #[error("band length error: {0}")]
    Length(#[from] LengthError),
}

/// Returned from time-dependent wavefunction solver functions.
#[derive(Debug, Error)]
pub enum TError {
    /// Returned when a wavefunction grid does not have the shape set by the
    /// evolver's parameters.
    #[error("expected a {1}x{1} grid; got {0:?}")]
    GridShape((usize, usize), usize),

    /// Returned when a line index exceeds the number of lines in a grid.
    #[error("line index {0} out of range for a grid with {1} lines")]
    BadLine(usize, usize),

    /// Returned when `evolve_frames` is asked to keep every zero-th frame.
    #[error("frame interval must be greater than 0")]
    BadFrameInterval,

    /// Returned when a single line solve fails during a sweep.
    #[error("sweep along {axis} failed on line {line}: {source}")]
    Sweep {
        axis: SweepAxis,
        line: usize,
        #[source]
        source: TridiagError,
    },

    /// [`ParamError`]
    #[error("parameter error: {0}")]
    Param(#[from] ParamError),
}

impl TError {
    pub(crate) fn check_shape<S, A>(q: &nd::ArrayBase<S, nd::Ix2>, n: usize)
        -> Result<(), Self>
    where S: nd::Data<Elem = A>
    {
        let sh = q.dim();
        (sh == (n, n)).then_some(()).ok_or(Self::GridShape(sh, n))
    }
}

/// Returned from classical trajectory integrators.
#[derive(Debug, Error)]
pub enum CError {
    /// Returned when the adaptive step-size search fails to satisfy the error
    /// bound within the allowed number of trials.
    #[error("rkf45 error bound could not be satisfied at t = {0}")]
    StepSize(f64),

    /// Returned when the integrated state becomes non-finite.
    #[error("non-finite phase-space point at t = {0}")]
    NonFinite(f64),

    /// [`ParamError`]
    #[error("parameter error: {0}")]
    Param(#[from] ParamError),
}

/// Returned when writing computed data to disk.
#[derive(Debug, Error)]
pub enum OutputError {
    /// [`std::io::Error`]
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// [`serde_json::Error`]
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
