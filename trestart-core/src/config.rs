//! Immutable restart configuration and the small enums that steer it.
//!
//! Replaces the original's single global `primme_params` object threaded
//! through every call: configuration is passed by shared reference, while
//! [`RestartStats`] accumulates mutable bookkeeping separately.

use num_traits::Zero;

use crate::types::*;

/// Which part of the spectrum is being targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Smallest,
    Largest,
    /// Eigenvalues closest to a shift, in either direction.
    ClosestTo,
    /// Eigenvalues greater than (or less than, depending on sign convention)
    /// a shift.
    ClosestGreater,
    /// Interior eigenvalues extracted with harmonic Ritz values.
    InteriorHarmonic,
}

impl Target {
    /// Whether this target tracks a moving shift, and therefore requires
    /// `prevRitzVals`/`hVecsPerm` bookkeeping and Q/R rebuilds on shift change.
    pub fn is_shift_sensitive(&self) -> bool {
        !matches!(self, Target::Smallest | Target::Largest)
    }
}

/// Extraction method used to turn the projected eigenproblem into Ritz pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Standard Rayleigh-Ritz: eigenpairs of `H = V^H A V`.
    RayleighRitz,
    /// Refined extraction: right singular vectors of `R` from the QR of
    /// `(A - tau B) V`.
    Refined,
    /// Harmonic extraction: eigenvectors of `QV` relative to `R`, for
    /// interior targets. Internally composes with [`Projection::Refined`]'s
    /// restart routine (see `restart::projection::qr_harmonic`).
    Harmonic,
}

/// How the restart size is chosen once the basis must be compressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartScheme {
    /// Always restart down to `minRestartSize` (clamped to `basisSize`).
    Fixed,
    /// Dynamic thick restart: gap-ratio heuristic of §4.6.
    Dtr,
}

/// Soft- vs hard-locking discipline for converged Ritz pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locking {
    /// Converged pairs remain in `V`; only their flags change.
    Soft,
    /// Converged pairs are copied out to a separate locked-evec store and
    /// removed from `V`.
    Hard,
}

/// Immutable restart configuration, analogous to the relevant fields of
/// the original's `primme_params`, minus anything owned by the outer driver.
#[derive(Debug, Clone)]
pub struct RestartConfig<A: Scalar> {
    /// Global problem dimension `n`.
    pub n: usize,
    /// Number of orthogonality constraints supplied by the caller.
    pub num_ortho_const: usize,
    /// Maximum basis width before a restart is forced.
    pub max_basis_size: usize,
    /// Lower bound used by the fixed restart scheme (and as `lMin` for DTR).
    pub min_restart_size: usize,
    /// Maximum block size (`ievSize` upper bound).
    pub max_block_size: usize,
    /// Number of eigenpairs requested.
    pub num_evals: usize,
    pub target: Target,
    pub projection: Projection,
    pub scheme: RestartScheme,
    pub locking: Locking,
    /// Machine epsilon for the scalar type in use.
    pub mach_eps: A::Real,
    /// Shift list indexed by `targetShiftIndex`; only meaningful for
    /// shift-sensitive targets.
    pub target_shifts: Vec<A::Real>,
    /// Whether a skew preconditioner (and hence `evecsHat`/`M`/UDU) is active.
    pub skew_preconditioning: bool,
}

impl<A: Scalar> RestartConfig<A> {
    /// The active target shift, per §4.4.2 step 2:
    /// `targetShifts[min(numTargetShifts - 1, numConverged)]`.
    pub fn target_shift(&self, num_converged: usize) -> A::Real {
        let idx = num_converged.min(self.target_shifts.len().saturating_sub(1));
        self.target_shifts
            .get(idx)
            .copied()
            .unwrap_or_else(A::Real::zero)
    }
}

/// Mutable bookkeeping accumulated across restarts, kept separate from the
/// immutable [`RestartConfig`] (§9 "Global mutable parameters" redesign).
#[derive(Debug, Clone, Default)]
pub struct RestartStats {
    /// Number of times `restart()` has been called.
    pub num_restarts: usize,
    /// Number of those calls that were no-ops (basis already small enough).
    pub num_idempotent: usize,
    /// Number of times the DTR selector was invoked.
    pub num_dtr_calls: usize,
    /// Number of times the target shift changed, forcing a from-scratch
    /// Q/R rebuild.
    pub num_shift_changes: usize,
    /// Number of UDU (Bunch-Kaufman) refactorisations performed.
    pub num_udu_refactorizations: usize,
}
