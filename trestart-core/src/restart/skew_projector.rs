//! Skew-projector maintenance (§4.2 step 13, §4.4 "Post-projection").
//!
//! Jacobi-Davidson preconditioning projects the correction equation away
//! from the converged-so-far eigenvectors using `evecsHat = K^{-1} evecs`
//! and the Gram matrix `M = evecs^H evecsHat`, factorised once per
//! maintenance call via Bunch-Kaufman so later correction-equation solves
//! only need a triangular-style `M`-solve (`UduFactorized::solve`).

use ndarray::{s, Array1, Array2};
use num_traits::Zero;

use crate::config::{RestartConfig, RestartStats};
use crate::error::RestartError;
use crate::generate::conjugate;
use crate::operator::Preconditioner;
use crate::solveh::FactorizeH;
use crate::state::EigenState;
use crate::types::*;
use crate::workspace::Workspace;
use crate::UPLO;

/// §4.2 step 13: grow `evecs`/`evals`/`resNorms` with any Ritz pairs that
/// crossed into "converged-so-far" during this restart but have not yet
/// been copied out. Soft-locking never removes these columns from `V`, so
/// by the time this runs (after `V <- V*hVecs`) the leading
/// `numConverged` columns of the rotated `V` are exactly the
/// converged-so-far Ritz vectors in canonical order; `numConvergedStored`
/// tracks how many of them are already reflected in `evecs`.
pub fn pack_converged<A: Scalar + Lapack>(
    state: &mut EigenState<A>,
    restart_perm: &[usize],
) -> Result<(), RestartError> {
    // `restartPerm` only describes how the pre-rotation basis was
    // reshuffled; by the point this is called `V`/`hVals` already reflect
    // that reshuffle, so the permutation itself isn't needed here.
    let _ = restart_perm;

    let newly_stored = state.num_converged.saturating_sub(state.num_converged_stored);
    if newly_stored == 0 {
        return Ok(());
    }

    let n_local = state.v.nrows();
    let base = state.evecs.ncols();

    let mut new_evecs = Array2::<A>::zeros((n_local, base + newly_stored));
    new_evecs.slice_mut(s![.., ..base]).assign(&state.evecs);

    let mut new_evals = Vec::with_capacity(state.evals.len() + newly_stored);
    new_evals.extend(state.evals.iter().copied());
    let mut new_res_norms = Vec::with_capacity(state.res_norms.len() + newly_stored);
    new_res_norms.extend(state.res_norms.iter().copied());

    for (k, j) in (state.num_converged_stored..state.num_converged).enumerate() {
        new_evecs.column_mut(base + k).assign(&state.v.column(j));
        new_evals.push(state.h_vals[j]);
        new_res_norms.push(state.res_norms.get(j).copied().unwrap_or_else(A::Real::zero));
    }

    state.evecs = new_evecs;
    state.evals = Array1::from(new_evals);
    state.res_norms = Array1::from(new_res_norms);
    state.num_converged_stored = state.num_converged;

    Ok(())
}

/// §4.4 "Post-projection": extend `evecsHat` over any `evecs` columns the
/// preconditioner hasn't seen yet, then rebuild `M = evecs^H evecsHat` and
/// its Bunch-Kaufman factorisation.
pub fn maintain_after_projection<A: Scalar + Lapack, P: Preconditioner<Elem = A>>(
    state: &mut EigenState<A>,
    _config: &RestartConfig<A>,
    stats: &mut RestartStats,
    preconditioner: &P,
    _ws: &mut Workspace<A>,
) -> Result<(), RestartError> {
    let need = state.evecs.ncols();
    if need == 0 {
        state.m = None;
        state.udu = None;
        return Ok(());
    }

    let have = state.evecs_hat.as_ref().map(|e| e.ncols()).unwrap_or(0);
    if need > have {
        let mut block = state.evecs.slice(s![.., have..need]).to_owned();
        preconditioner.apply_mut(&mut block);

        let n_local = state.evecs.nrows();
        let mut new_hat = Array2::<A>::zeros((n_local, need));
        if let Some(old) = state.evecs_hat.as_ref() {
            new_hat.slice_mut(s![.., ..have]).assign(old);
        }
        new_hat.slice_mut(s![.., have..need]).assign(&block);
        state.evecs_hat = Some(new_hat);
    }

    let evecs_h: Array2<A> = conjugate(&state.evecs);
    let hat = state.evecs_hat.as_ref().ok_or(RestartError::RestartH)?;
    let m = evecs_h.dot(hat);

    state.udu = Some(m.factorizeh(UPLO::Lower).map_err(|_| RestartError::UduDecompose)?);
    state.m = Some(m);
    stats.num_udu_refactorizations += 1;

    Ok(())
}
