//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Units and lattice](#units-and-lattice)
//! - [Time dependence](#time-dependence)
//! - [Tridiagonal systems](#tridiagonal-systems)
//! - [Classical trajectories](#classical-trajectories)
//!
//! # Background
//! The time-dependent Schrödinger equation (TDSE) for a particle of mass *m*
//! moving in the plane under a static potential *V*(*x*, *y*) reads
//! ```text
//!   ∂ψ       ħ²   ∂²    ∂²
//! iħ -- = - --- (--- + ---) ψ + V(x, y) ψ ≡ H ψ
//!   ∂t      2 m  ∂x²   ∂y²
//! ```
//! Its formal solution over a time step *dt* is *ψ*(*t* + *dt*) =
//! exp(-*i* *H* *dt* / *ħ*) *ψ*(*t*). The exact propagator is unitary, so the
//! total probability ∫ |*ψ*|² *dx* *dy* is constant in time. Any useful
//! discrete scheme should preserve this to machine precision rather than only
//! to within its truncation error, since otherwise slow leaks or gains in
//! probability accumulate without bound over long runs.
//!
//! # Units and lattice
//! No unit conversion is performed: *m*, *ħ*, *dx*, and *dt* are taken as given
//! (with *m* = *ħ* = 1 by default) and must only be mutually consistent.
//!
//! Wavefunctions are sampled on a square *N*×*N* lattice,
//! ```text
//! x[i] = i δx, i ∊ {0, ..., N - 1}
//! y[j] = j δx, j ∊ {0, ..., N - 1}
//! ψ[i, j] = ψ(x[i], y[j])
//! ```
//! so that the first array index runs along *x* and the second along *y*. The
//! wavefunction is implicitly held at zero just outside the lattice
//! (homogeneous Dirichlet boundaries), i.e. the system is a hard-walled box of
//! side *N* *δx*. All integrals are Riemann sums, ∫ *f* ≈ Σ *f*\[*i*, *j*\]
//! *δx*².
//!
//! # Time dependence
//! The Crank-Nicolson scheme approximates the propagator by its Cayley form,
//! ```text
//!              1 - i H dt / 2ħ
//! ψ(t + dt) = ----------------- ψ(t)
//!              1 + i H dt / 2ħ
//! ```
//! which is second-order accurate in *dt* and, for Hermitian *H*, exactly
//! unitary. Directly inverting the left-hand operator on a 2D lattice requires
//! the solution of a banded *N*²×*N*² system. Instead, the alternating-direction
//! implicit (ADI) method[^1] splits *H* = *H*<sub>*x*</sub> +
//! *H*<sub>*y*</sub>, with each term taking the kinetic energy along one axis
//! and half of the potential, and performs the update as two successive
//! half-updates:
//! ```text
//! (1 + i H_x dt / 2ħ) ψ*       = (1 - i H_x dt / 2ħ) ψ(t)
//! (1 + i H_y dt / 2ħ) ψ(t + dt) = (1 - i H_y dt / 2ħ) ψ*
//! ```
//! Each half-update is a set of *N* independent tridiagonal systems, one per
//! lattice line. Discretizing ∂²/∂*x*² with the three-point stencil and writing
//! ```text
//!     i ħ dt                dt V[i, j]
//! r = -------- ,   θ[i, j] = ----------
//!     4 m δx²                   4 ħ
//! ```
//! the system for the line at fixed *j* (the *x*-sweep) is
//! ```text
//! -r ψ*[i - 1] + (1 + 2r + iθ[i, j]) ψ*[i] - r ψ*[i + 1]
//!     = r ψ[i - 1] + (1 - 2r - iθ[i, j]) ψ[i] + r ψ[i + 1]
//! ```
//! with the out-of-lattice neighbors dropped. The *y*-sweep is identical with
//! the roles of *i* and *j* exchanged, and a full time step is an *x*-sweep
//! followed by a *y*-sweep.
//!
//! For each line, the left-hand matrix is *A* = 1 + *i* *K* and the right-hand
//! matrix is *B* = 1 - *i* *K* for the same real, symmetric *K*. Hence
//! *A*⁻¹*B* is unitary and each sweep conserves the norm of every line
//! individually; the total probability drifts only by floating-point round-off.
//! Since *A* has a non-vanishing imaginary diagonal and 1 on its real diagonal,
//! it is strictly diagonally dominant for any *dt* and *V*, and the tridiagonal
//! elimination below is stable without pivoting.
//!
//! Note that the potential enters only through *θ*. It is sampled once on the
//! lattice and reused for every step.
//!
//! # Tridiagonal systems
//! A tridiagonal system *A* *x* = *d* with sub-diagonal *a*, diagonal *b*, and
//! super-diagonal *c* (with *a*\[0\] = *c*\[*N* - 1\] = 0) is solved in
//! *O*(*N*) by the Thomas algorithm: forward elimination
//! ```text
//! c'[0] = c[0] / b[0]
//! d'[0] = d[0] / b[0]
//! m[i]  = b[i] - a[i] c'[i - 1]
//! c'[i] = c[i] / m[i]
//! d'[i] = (d[i] - a[i] d'[i - 1]) / m[i]
//! ```
//! followed by back substitution
//! ```text
//! x[N - 1] = d'[N - 1]
//! x[i]     = d'[i] - c'[i] x[i + 1]
//! ```
//! The algorithm breaks down only when a pivot *m*\[*i*\] vanishes, which is
//! reported as an error rather than silently producing infinities.
//!
//! # Classical trajectories
//! For comparison with the quantum dynamics, [`classical`][crate::classical]
//! integrates Newton's equations for a point particle,
//! ```text
//! d  [x ]   [      v_x       ]
//! -- [y ] = [      v_y       ]
//! dt [vx]   [ -(∂V/∂x) / m   ]
//!    [vy]   [ -(∂V/∂y) / m   ]
//! ```
//! with either the classic fourth-order Runge-Kutta scheme at fixed step size,
//! or the Runge-Kutta-Fehlberg 4(5) scheme[^2]. The latter computes fourth- and
//! fifth-order estimates of each step from the same six stages, and uses their
//! difference *δ* to choose the step size,
//! ```text
//! h_new = S h (h ε / ‖δ‖)^(1/4)
//! ```
//! for safety factor *S* = 0.9 and error bound *ε* per unit step. A trial
//! step is accepted only if *h*<sub>new</sub> ≥ *h*; otherwise it is retried
//! with *h* → *h*<sub>new</sub>.
//!
//! [^1]: W. H. Press et al., *Numerical Recipes: The Art of Scientific
//! Computing*, 3rd ed., §20.3.3.
//!
//! [^2]: E. Fehlberg, "Low-order classical Runge-Kutta formulas with stepsize
//! control and their application to some heat transfer problems." NASA
//! Technical Report R-315 (1969).
