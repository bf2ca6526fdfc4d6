//! Rayleigh-Ritz projection restart (§4.4.1).
//!
//! `V <- V*hVecs` makes `H` diagonal in the Ritz coordinates except for one
//! small block where a previous-iteration coefficient block was inserted;
//! this rebuilds `H` in that block-diagonal form and re-diagonalises the
//! one non-trivial block.

use ndarray::{s, Array1, Array2};
use num_traits::Zero;

use super::compute_submatrix;
use crate::eigh::Eigh;
use crate::error::RestartError;
use crate::restart::LockingOutcome;
use crate::state::EigenState;
use crate::types::*;
use crate::UPLO;

pub(crate) fn restart_rr<A: Scalar + Lapack>(
    state: &mut EigenState<A>,
    outcome: &LockingOutcome,
) -> Result<(), RestartError> {
    let restart_size = outcome.restart_size;
    let index_of_previous_vecs = outcome.index_of_previous_vecs;
    let num_prev_retained = outcome.num_prev_retained;
    let prev_end = index_of_previous_vecs + num_prev_retained;

    // `outcome.h_vecs_perm` is the inverse of `restartPerm` over the full
    // pre-restart basis width (needed as-is by the coordinator to permute
    // `prevRitzVals`, §4.1); to use it here, where `hVals`/`hVecs` have
    // already been compacted down to `restartSize` columns, it must first
    // be composed with `restartPerm` so the result is a permutation of
    // `[0, restartSize)` rather than of the original (wider) basis -- a
    // raw `h_vecs_perm[i]` lookup can otherwise point past `restartSize`
    // whenever converged and unconverged columns are interleaved.
    let h_vecs_perm: Vec<usize> = (0..restart_size)
        .map(|i| outcome.h_vecs_perm[outcome.restart_perm[i]])
        .collect();

    // Build the new H block-diagonal in the pre-hVecsPerm Ritz ordering:
    // diagonal = hVals everywhere except the inserted previous-coefficient
    // block, which gets (previousHVecs)^H H_old (previousHVecs).
    let mut new_h = Array2::<A>::zeros((restart_size, restart_size));
    for j in (0..index_of_previous_vecs).chain(prev_end..restart_size) {
        new_h[(j, j)] = A::from_real(state.h_vals[j]);
    }
    if num_prev_retained > 0 {
        let prev_vecs = state
            .h_vecs
            .slice(s![.., index_of_previous_vecs..prev_end])
            .to_owned();
        let submatrix = compute_submatrix(prev_vecs.view(), state.h.view());
        new_h
            .slice_mut(s![
                index_of_previous_vecs..prev_end,
                index_of_previous_vecs..prev_end
            ])
            .assign(&submatrix);
    }

    // hVecs <- identity permuted by hVecsPerm; hVals <- hVals permuted by
    // hVecsPerm (§4.4.1).
    let mut new_h_vecs = Array2::<A>::zeros((restart_size, restart_size));
    let mut new_h_vals = Array1::<A::Real>::from_elem(restart_size, A::Real::zero());
    for i in 0..restart_size {
        let src = h_vecs_perm[i];
        new_h_vecs[(src, i)] = A::one();
        new_h_vals[i] = state.h_vals[src];
    }

    // orderedIndexOfPreviousVecs: where indexOfPreviousVecs landed under
    // hVecsPerm.
    let ordered_index_of_previous_vecs = h_vecs_perm
        .iter()
        .position(|&p| p == index_of_previous_vecs)
        .unwrap_or(index_of_previous_vecs);

    if num_prev_retained > 0 {
        let block = ordered_index_of_previous_vecs..(ordered_index_of_previous_vecs + num_prev_retained);
        let submatrix = new_h
            .slice(s![
                index_of_previous_vecs..prev_end,
                index_of_previous_vecs..prev_end
            ])
            .to_owned();
        let (sub_vals, sub_vecs) = submatrix
            .eigh(UPLO::Lower)
            .map_err(|_| RestartError::RestartH)?;
        new_h_vals.slice_mut(s![block.clone()]).assign(&sub_vals);
        new_h_vecs
            .slice_mut(s![index_of_previous_vecs..prev_end, block])
            .assign(&sub_vecs);
    }

    state.h = new_h;
    state.h_vecs = new_h_vecs;
    state.h_vals = new_h_vals;

    Ok(())
}
