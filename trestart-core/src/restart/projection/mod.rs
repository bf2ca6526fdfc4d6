//! Projection restart (§4.4): rebuilds the projected objects (`H`, and for
//! refined/harmonic extraction `Q`/`R`/`QV`) to match the compressed basis
//! `V <- V*hVecs` produced by the locking restart (§4.2/§4.3).
//!
//! Dispatches on [`Projection`] to [`rr::restart_rr`] for Rayleigh-Ritz or
//! [`qr::restart_qr`] for refined/harmonic, then refreshes the skew
//! projector (§4.4 "Post-projection") if one is active.

mod qr;
mod rr;

use ndarray::{Array2, ArrayView2};

use crate::config::{Projection, RestartConfig, RestartStats};
use crate::error::RestartError;
use crate::generate::conjugate;
use crate::operator::Preconditioner;
use crate::restart::skew_projector;
use crate::restart::LockingOutcome;
use crate::state::EigenState;
use crate::types::*;
use crate::workspace::Workspace;

pub(crate) use qr::restart_qr;
pub(crate) use rr::restart_rr;

/// `vecs^H * h * vecs`, written into a freshly allocated buffer rather than
/// aliasing `h` (§9 "In-place matrix layout": the original's
/// `compute_submatrix` reads and writes the same slice; this crate always
/// produces a non-aliasing output instead).
pub(crate) fn compute_submatrix<A: Scalar + Lapack>(
    vecs: ArrayView2<A>,
    h: ArrayView2<A>,
) -> Array2<A> {
    let vecs_h: Array2<A> = conjugate(&vecs);
    vecs_h.dot(&h).dot(&vecs)
}

/// `q^H * v`, the non-square analogue of [`compute_submatrix`] used to
/// (re)build `QV = Q^H V`.
pub(crate) fn compute_rect<A: Scalar + Lapack>(q: ArrayView2<A>, v: ArrayView2<A>) -> Array2<A> {
    let q_h: Array2<A> = conjugate(&q);
    q_h.dot(&v)
}

/// Entry point called once per `restart()` after the locking restart has
/// produced `outcome` (§4.1 step "then invoke §4.4").
pub fn restart_projection<A: Scalar + Lapack, P: Preconditioner<Elem = A>>(
    state: &mut EigenState<A>,
    config: &RestartConfig<A>,
    stats: &mut RestartStats,
    outcome: &LockingOutcome,
    preconditioner: &P,
    ws: &mut Workspace<A>,
) -> Result<(), RestartError> {
    match config.projection {
        Projection::RayleighRitz => rr::restart_rr(state, outcome)?,
        Projection::Refined => qr::restart_qr(state, config, stats, outcome, false)?,
        Projection::Harmonic => qr::restart_qr(state, config, stats, outcome, true)?,
    }

    if config.skew_preconditioning {
        skew_projector::maintain_after_projection(state, config, stats, preconditioner, ws)?;
    }

    Ok(())
}
