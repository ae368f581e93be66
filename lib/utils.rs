//! Miscellaneous tools for working with wavefunctions sampled on a square
//! lattice.
//!
//! Integrals over the lattice are taken as plain Riemann sums, `Σ f dx²`.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{ Arr2, params::Params };

/// Compute the probability density `|ψ|²` at each grid point.
pub fn prob_density<S>(q: &Arr2<S>) -> nd::Array2<f64>
where S: nd::Data<Elem = C64>
{
    q.mapv(|qk| qk.norm_sqr())
}

/// Integrate a probability density over the lattice.
pub fn density_norm<S>(p: &Arr2<S>, dx: f64) -> f64
where S: nd::Data<Elem = f64>
{
    p.sum() * dx.powi(2)
}

/// Calculate the norm (total probability) of a wavefunction.
pub fn wf_norm<S>(q: &Arr2<S>, dx: f64) -> f64
where S: nd::Data<Elem = C64>
{
    q.iter().map(|qk| qk.norm_sqr()).sum::<f64>() * dx.powi(2)
}

/// Calculate the inner product `⟨q|p⟩` of two wavefunctions.
///
/// *Panics if the arrays have different shapes*.
pub fn wf_dot<S, T>(q: &Arr2<S>, p: &Arr2<T>, dx: f64) -> C64
where
    S: nd::Data<Elem = C64>,
    T: nd::Data<Elem = C64>,
{
    nd::Zip::from(q).and(p)
        .fold(C64::from(0.0), |acc, qk, pk| acc + qk.conj() * pk)
        * dx.powi(2)
}

/// Renormalize a wavefunction in place.
///
/// A wavefunction with zero norm is left unchanged.
pub fn wf_renormalize<S>(q: &mut Arr2<S>, dx: f64)
where S: nd::DataMut<Elem = C64>
{
    let norm = wf_norm(q, dx).sqrt();
    if norm == 0.0 { return; }
    q.map_inplace(|qk| { *qk /= norm; });
}

/// Return a normalized copy of a wavefunction.
///
/// A wavefunction with zero norm is copied unchanged.
pub fn wf_normalized<S>(q: &Arr2<S>, dx: f64) -> nd::Array2<C64>
where S: nd::Data<Elem = C64>
{
    let norm = wf_norm(q, dx).sqrt();
    if norm == 0.0 { return q.to_owned(); }
    q.mapv(|qk| qk / norm)
}

/// First and second moments of a probability density on the lattice.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Moments {
    /// Mean position `(⟨x⟩, ⟨y⟩)`.
    pub mean: (f64, f64),
    /// Standard deviations `(σx, σy)`.
    pub width: (f64, f64),
}

/// Compute the mean position and widths of a probability density sampled on
/// the lattice described by `params`.
///
/// The density does not need to be normalized, but must have a non-zero total;
/// all moments are `NaN` otherwise.
pub fn moments<S>(p: &Arr2<S>, params: &Params) -> Moments
where S: nd::Data<Elem = f64>
{
    let mut tot = 0.0;
    let (mut mx, mut my) = (0.0, 0.0);
    let (mut mxx, mut myy) = (0.0, 0.0);
    p.indexed_iter()
        .for_each(|((i, j), &pij)| {
            let x = params.coord(i);
            let y = params.coord(j);
            tot += pij;
            mx += x * pij;
            my += y * pij;
            mxx += x * x * pij;
            myy += y * y * pij;
        });
    if tot == 0.0 {
        return Moments { mean: (f64::NAN, f64::NAN), width: (f64::NAN, f64::NAN) };
    }
    let (mx, my) = (mx / tot, my / tot);
    let sx = (mxx / tot - mx * mx).max(0.0).sqrt();
    let sy = (myy / tot - my * my).max(0.0).sqrt();
    Moments { mean: (mx, my), width: (sx, sy) }
}
