//! Soft-locking restart (§4.2): converged Ritz vectors remain in `V`; only
//! their flags and a reshuffling permutation change.

use log::trace;
use num_traits::Float;

use super::LockingOutcome;
use crate::config::RestartConfig;
use crate::error::RestartError;
use crate::perm::{build_h_vecs_perm, permute_columns, permute_values};
use crate::restart::coeff_reortho::orthonormalize_inserted_block;
use crate::state::{EigenState, Flag};
use crate::types::*;
use crate::workspace::Workspace;

/// Reshuffle the basis into `[non-candidates | previous-retained | candidates]`
/// without removing any converged pair from `V`, per the 13 numbered steps
/// of §4.2.
pub fn soft_locking_restart<A: Scalar + Lapack>(
    state: &mut EigenState<A>,
    config: &RestartConfig<A>,
    restart_size: &mut usize,
    _ws: &mut Workspace<A>,
) -> Result<LockingOutcome, RestartError> {
    let basis_size = state.basis_size();

    // 1. Re-examine previously CONVERGED indices for drift. A drifted
    // index is re-targeted by flipping it back to UNCONVERGED -- but only
    // if some other Ritz pair in the basis is already UNCONVERGED and can
    // absorb the correction work; otherwise the whole basis claims
    // convergence while disagreeing with the recorded eigenvalues, which
    // is the "pseudolocking inconsistency" this audit is meant to catch
    // (SPEC_FULL §4.7/§7(c)).
    if basis_size + config.num_ortho_const < config.n {
        let has_retarget_candidate = (0..basis_size).any(|i| state.flags[i] == Flag::Unconverged);
        for i in 0..config.num_evals.min(basis_size) {
            if state.flags[i] != Flag::Unconverged
                && (state.h_vals[i] - state.evals[i]).abs() > state.res_norms[i]
            {
                if !has_retarget_candidate {
                    return Err(RestartError::PseudoLockInconsistency);
                }
                state.flags[i] = Flag::Unconverged;
            }
        }
    }

    // 2-3. Fix numPrevRetained and grow restartSize by it.
    state.num_prev_retained =
        config.max_basis_size.min(*restart_size + state.num_prev_retained) - *restart_size;
    *restart_size += state.num_prev_retained;

    // 4-5. Block size and candidate count for this pass.
    let iev_size = config
        .max_block_size
        .min(config.num_evals.saturating_sub(state.num_converged) + 1)
        .min(config.max_basis_size - *restart_size);
    let num_candidates_from_arbitrary = (0..state.num_arbitrary_vecs.min(*restart_size))
        .filter(|&i| state.flags[i] == Flag::Unconverged)
        .count();
    let num_candidates = iev_size.max(num_candidates_from_arbitrary);

    let index_of_previous_vecs = *restart_size - num_candidates - state.num_prev_retained;
    let left = *restart_size - num_candidates;

    // 6. Build restartPerm.
    let mut restart_perm = vec![0usize; basis_size];
    let (mut j, mut k) = (0usize, 0usize);
    for i in 0..basis_size {
        if j < num_candidates && state.flags[i] == Flag::Unconverged {
            restart_perm[left + j] = i;
            j += 1;
        } else if k < left {
            restart_perm[k] = i;
            k += 1;
        } else {
            restart_perm[num_candidates + k] = i;
            k += 1;
        }
    }

    // 7. Recount numConverged.
    state.num_converged = (0..basis_size)
        .filter(|&i| state.flags[i] != Flag::Unconverged && i < config.num_evals)
        .count();

    // 8. Permute hVals and hVecs by restartPerm.
    permute_values(&mut state.h_vals.view_mut(), &restart_perm);
    permute_columns(&mut state.h_vecs.view_mut(), &restart_perm);

    // 9. Copy previousHVecs into hVecs[:, prev-range).
    if state.num_prev_retained > 0 {
        let prev = state
            .previous_h_vecs
            .slice(ndarray::s![.., ..state.num_prev_retained])
            .to_owned();
        state
            .h_vecs
            .slice_mut(ndarray::s![
                ..,
                index_of_previous_vecs..(index_of_previous_vecs + state.num_prev_retained)
            ])
            .assign(&prev);

        // 10. Orthonormalise the inserted block against the kept columns.
        orthonormalize_inserted_block(
            state,
            config,
            index_of_previous_vecs,
            state.num_prev_retained,
            *restart_size,
        )?;
    }

    // 11. V <- V*hVecs, W <- W*hVecs over the leading restartSize columns.
    let hvecs_leading = state.h_vecs.slice(ndarray::s![.., ..*restart_size]).to_owned();
    let new_v = state.v.dot(&hvecs_leading);
    let new_w = state.w.dot(&hvecs_leading);
    state.v = new_v;
    state.w = new_w;

    // 12. hVecsPerm as inverse of restartPerm, shifted for arbitrary vectors.
    let mut num_prev_retained = state.num_prev_retained;
    let h_vecs_perm = build_h_vecs_perm(
        &restart_perm,
        index_of_previous_vecs,
        left,
        *restart_size,
        &mut num_prev_retained,
        state.num_arbitrary_vecs,
    );
    state.num_prev_retained = num_prev_retained;

    // Candidates shouldn't have changed position; record iev for the
    // consistency check before clearing the block (resolved Open Question).
    let iev: Vec<usize> = (0..iev_size).map(|i| restart_perm[left + i]).collect();
    let mut j = 0usize;
    for (i, &flag) in state.flags.iter().enumerate().take(basis_size) {
        if j >= iev_size {
            break;
        }
        if flag == Flag::Unconverged {
            debug_assert_eq!(iev[j], i, "candidate vector changed position during restart");
            j += 1;
        }
    }

    // Resolved Open Question (§9): the block is explicitly empty after a
    // soft-locking restart; the outer loop reseeds iev/blockNorms.
    state.iev.clear();
    state.block_norms.clear();

    // 13. Skew-preconditioning packing.
    if config.skew_preconditioning {
        super::skew_projector::pack_converged(state, &restart_perm)?;
    }

    trace!(
        "soft_locking_restart: restartSize={restart_size} indexOfPreviousVecs={index_of_previous_vecs} left={left}"
    );

    Ok(LockingOutcome {
        restart_size: *restart_size,
        index_of_previous_vecs,
        left,
        num_prev_retained: state.num_prev_retained,
        restart_perm,
        h_vecs_perm,
    })
}
