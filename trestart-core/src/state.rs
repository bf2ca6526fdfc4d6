//! The mutable state threaded through the restart subsystem.
//!
//! All bases and projected objects named in the data model are owned by
//! the outer iteration for the lifetime of the solve and borrowed mutably
//! by [`crate::restart::restart`] for the duration of one call.

use ndarray::{Array1, Array2};

use crate::solveh::UduFactorized;
use crate::types::*;

/// Convergence status of a single Ritz pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Unconverged,
    Converged,
    Locked,
}

/// The full mutable state of one eigensolver instance, per §3/§6.
pub struct EigenState<A: Scalar> {
    /// Current orthonormal basis, `n_local x basisSize` (at most `max_basis_size` wide).
    pub v: Array2<A>,
    /// `W = A V`, column-parallel to `v`.
    pub w: Array2<A>,
    /// Projected matrix `H = V^H A V`.
    pub h: Array2<A>,

    /// Thin QR factors of `(A - tau B) V`; present only for refined/harmonic.
    pub q: Option<Array2<A>>,
    pub r: Option<Array2<A>>,
    /// `QV = Q^H V`; present only for harmonic projection.
    pub qv: Option<Array2<A>>,

    /// Left singular vectors of `R` (refined) or eigenvectors of `QV` relative
    /// to `R` (harmonic).
    pub h_u: Array2<A>,
    /// Coefficient eigenvectors of `H` (or of `QV` relative to `R`).
    pub h_vecs: Array2<A>,
    /// Ritz values.
    pub h_vals: Array1<A::Real>,
    /// Singular values of `R`.
    pub h_svals: Array1<A::Real>,

    /// Coefficient vectors retained from the previous outer iteration.
    pub previous_h_vecs: Array2<A>,
    pub num_prev_retained: usize,

    /// Ritz values from the previous iteration, permuted in step with
    /// `restartPerm`/`hVecsPerm` for shift-sensitive targets.
    pub prev_ritz_vals: Array1<A::Real>,

    /// Locked (hard-locking) or all converged-so-far (soft-locking) eigenvectors.
    pub evecs: Array2<A>,
    pub evals: Array1<A::Real>,
    pub res_norms: Array1<A::Real>,
    /// User-visible ordering of `evecs`, when tracked.
    pub evecs_perm: Option<Vec<usize>>,

    /// `K^{-1} evecs`, maintained only when a skew preconditioner is active.
    pub evecs_hat: Option<Array2<A>>,
    /// `evecs^H evecs_hat` and its Bunch-Kaufman (UDU) factorisation.
    pub m: Option<Array2<A>>,
    pub udu: Option<UduFactorized<A>>,

    /// Convergence status per basis column.
    pub flags: Vec<Flag>,
    /// Indices of the Ritz pairs currently forming the correction block.
    pub iev: Vec<usize>,
    /// Residual norms matching `iev`.
    pub block_norms: Vec<A::Real>,

    pub num_converged: usize,
    pub num_locked: usize,
    pub num_converged_stored: usize,
    pub num_guesses: usize,
    pub num_arbitrary_vecs: usize,
    pub target_shift_index: usize,

    /// The shift `(Q, R)` was last rebuilt against; `None` before the first
    /// refined/harmonic restart. Drives the from-scratch rebuild of §4.4.2
    /// step 2 when `config.target_shift(numConverged)` has moved on.
    pub prev_target_shift: Option<A::Real>,
}

impl<A: Scalar + Lapack> EigenState<A> {
    /// Current basis width.
    pub fn basis_size(&self) -> usize {
        self.v.ncols()
    }
}
