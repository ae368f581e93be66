//! Direct solution of tridiagonal linear systems via the Thomas algorithm.
//!
//! A tridiagonal matrix of size *N* is represented by three bands of length
//! *N*, following the usual convention
//! ```text
//! a[i] x[i - 1] + b[i] x[i] + c[i] x[i + 1] = d[i]
//! ```
//! so that `a[0]` and `c[N - 1]` fall outside the matrix. Both are required to
//! be zero; no wrap-around (periodic) coupling is supported.
//!
//! No pivoting is performed, so the solver is only stable for matrices that are
//! (close to) diagonally dominant. Rather than silently propagating `NaN`s, a
//! pivot that vanishes to machine precision is reported as
//! [`TridiagError::SingularPivot`].
//!
//! ```
//! use ndarray as nd;
//! use quant2d::tridiag;
//!
//! let a = nd::array![0.0, -1.0, -1.0];
//! let b = nd::array![4.0, 4.0, 4.0];
//! let c = nd::array![-1.0, -1.0, 0.0];
//! let d = nd::array![3.0, 2.0, 3.0];
//! let x: nd::Array1<f64> = tridiag::solve(&a, &b, &c, &d).unwrap();
//! assert!(x.iter().all(|xk| (xk - 1.0).abs() < 1e-12));
//! ```

use ndarray as nd;
use num_complex::ComplexFloat;
use num_traits::{ Float, ToPrimitive };
use crate::{
    Arr1,
    error::{ LengthError, TridiagError },
};

pub type TriResult<T> = Result<T, TridiagError>;

// check band lengths and the out-of-matrix entries
fn check_bands<S, T, U, A>(a: &Arr1<S>, b: &Arr1<T>, c: &Arr1<U>)
    -> TriResult<()>
where
    S: nd::Data<Elem = A>,
    T: nd::Data<Elem = A>,
    U: nd::Data<Elem = A>,
    A: ComplexFloat,
{
    LengthError::check(a, b)?;
    LengthError::check(b, c)?;
    let n = b.len();
    if n == 0 { return Ok(()); }
    if !a[0].is_zero() {
        return Err(TridiagError::Wraparound { band: "a", index: 0 });
    }
    if !c[n - 1].is_zero() {
        return Err(TridiagError::Wraparound { band: "c", index: n - 1 });
    }
    Ok(())
}

// a pivot is accepted only if it is finite and survives cancellation between
// the terms it was formed from
fn check_pivot<A>(row: usize, pivot: A, scale: A::Real) -> TriResult<()>
where A: ComplexFloat
{
    let mag = pivot.abs();
    if pivot.is_finite() && mag > scale * <A::Real as Float>::epsilon() {
        Ok(())
    } else {
        let pivot = mag.to_f64().unwrap_or(f64::NAN);
        Err(TridiagError::SingularPivot { row, pivot })
    }
}

/// Solve the tridiagonal system with sub-diagonal `a`, diagonal `b`,
/// super-diagonal `c`, and right-hand side `d`.
///
/// Works for real and complex element types alike. The solution is computed in
/// *O*(*N*) time by forward elimination followed by back-substitution.
pub fn solve<S, T, U, V, A>(a: &Arr1<S>, b: &Arr1<T>, c: &Arr1<U>, d: &Arr1<V>)
    -> TriResult<nd::Array1<A>>
where
    S: nd::Data<Elem = A>,
    T: nd::Data<Elem = A>,
    U: nd::Data<Elem = A>,
    V: nd::Data<Elem = A>,
    A: ComplexFloat,
{
    check_bands(a, b, c)?;
    LengthError::check(b, d)?;
    let n = b.len();
    if n == 0 { return Ok(nd::Array1::zeros(0)); }

    let mut cp: nd::Array1<A> = nd::Array1::zeros(n);
    let mut dp: nd::Array1<A> = nd::Array1::zeros(n);
    check_pivot(0, b[0], b[0].abs())?;
    cp[0] = c[0] / b[0];
    dp[0] = d[0] / b[0];
    let mut acp: A;
    let mut m: A;
    for i in 1..n {
        acp = a[i] * cp[i - 1];
        m = b[i] - acp;
        check_pivot(i, m, b[i].abs() + acp.abs())?;
        cp[i] = c[i] / m;
        dp[i] = (d[i] - a[i] * dp[i - 1]) / m;
    }

    // back-substitute over dp in place
    let mut x = dp;
    for i in (0..n - 1).rev() {
        x[i] = x[i] - cp[i] * x[i + 1];
    }
    match x.iter().position(|xk| !xk.is_finite()) {
        Some(k) => Err(TridiagError::NonFinite(k)),
        None => Ok(x),
    }
}

/// Compute the product of the tridiagonal matrix with bands `a`, `b`, `c` and
/// the vector `x` in *O*(*N*) time.
pub fn apply<S, T, U, V, A>(a: &Arr1<S>, b: &Arr1<T>, c: &Arr1<U>, x: &Arr1<V>)
    -> TriResult<nd::Array1<A>>
where
    S: nd::Data<Elem = A>,
    T: nd::Data<Elem = A>,
    U: nd::Data<Elem = A>,
    V: nd::Data<Elem = A>,
    A: ComplexFloat,
{
    check_bands(a, b, c)?;
    LengthError::check(b, x)?;
    let n = b.len();
    let y: nd::Array1<A>
        = (0..n).map(|i| {
            let mut yi = b[i] * x[i];
            if i > 0 { yi = yi + a[i] * x[i - 1]; }
            if i + 1 < n { yi = yi + c[i] * x[i + 1]; }
            yi
        })
        .collect();
    Ok(y)
}

/// A tridiagonal matrix stored as its three bands.
///
/// The out-of-matrix entries of the off-diagonal bands are always zero.
#[derive(Clone, Debug, PartialEq)]
pub struct Tridiagonal<A> {
    sub: nd::Array1<A>,
    diag: nd::Array1<A>,
    sup: nd::Array1<A>,
}

impl<A> Tridiagonal<A>
where A: ComplexFloat
{
    /// Create a new matrix from its sub-diagonal, diagonal, and super-diagonal.
    pub fn new(sub: nd::Array1<A>, diag: nd::Array1<A>, sup: nd::Array1<A>)
        -> TriResult<Self>
    {
        check_bands(&sub, &diag, &sup)?;
        Ok(Self { sub, diag, sup })
    }

    /// Create a new `n`×`n` matrix with constant bands.
    pub fn from_constant(n: usize, sub: A, diag: A, sup: A) -> Self {
        let mut sub = nd::Array1::from_elem(n, sub);
        let mut sup = nd::Array1::from_elem(n, sup);
        if n > 0 {
            sub[0] = A::zero();
            sup[n - 1] = A::zero();
        }
        Self { sub, diag: nd::Array1::from_elem(n, diag), sup }
    }

    /// Size of the matrix.
    pub fn len(&self) -> usize { self.diag.len() }

    /// Return `true` if the matrix has no elements.
    pub fn is_empty(&self) -> bool { self.diag.is_empty() }

    /// View the sub-diagonal band.
    pub fn sub(&self) -> nd::ArrayView1<'_, A> { self.sub.view() }

    /// View the diagonal band.
    pub fn diag(&self) -> nd::ArrayView1<'_, A> { self.diag.view() }

    /// View the super-diagonal band.
    pub fn sup(&self) -> nd::ArrayView1<'_, A> { self.sup.view() }

    /// Mutably view the diagonal band.
    pub fn diag_mut(&mut self) -> nd::ArrayViewMut1<'_, A> { self.diag.view_mut() }

    /// Compute the matrix-vector product `M x`.
    pub fn apply<S>(&self, x: &Arr1<S>) -> TriResult<nd::Array1<A>>
    where S: nd::Data<Elem = A>
    {
        apply(&self.sub, &self.diag, &self.sup, x)
    }

    /// Solve `M x = d` for `x`.
    pub fn solve<S>(&self, d: &Arr1<S>) -> TriResult<nd::Array1<A>>
    where S: nd::Data<Elem = A>
    {
        solve(&self.sub, &self.diag, &self.sup, d)
    }

    /// Expand into a dense matrix.
    pub fn to_dense(&self) -> nd::Array2<A> {
        let n = self.len();
        let mut M: nd::Array2<A> = nd::Array2::zeros((n, n));
        M.diag_mut().assign(&self.diag);
        if n > 1 {
            M.slice_mut(nd::s![1..n, 0..n - 1]).diag_mut()
                .assign(&self.sub.slice(nd::s![1..n]));
            M.slice_mut(nd::s![0..n - 1, 1..n]).diag_mut()
                .assign(&self.sup.slice(nd::s![0..n - 1]));
        }
        M
    }
}
