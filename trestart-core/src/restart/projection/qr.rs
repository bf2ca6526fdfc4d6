//! Refined and harmonic QR projection restart (§4.4.2).
//!
//! `restart_qr(..., harmonic)` is the single function backing both
//! `Projection::Refined` and `Projection::Harmonic`: the original's
//! `primme_proj_harmonic` case falls through into `primme_proj_refined`
//! without a `break`, so harmonic extraction runs its own preamble/epilogue
//! around the exact steps refined extraction uses (§9 "Open questions").
//! Here that relationship is function composition rather than a shared
//! `match` arm with a missing `break`.

use ndarray::{s, Array1, Array2};
use num_traits::{Float, NumCast, Zero};

use super::{compute_rect, compute_submatrix};
use crate::config::{RestartConfig, RestartStats};
use crate::eigh::Eigh;
use crate::error::RestartError;
use crate::generate::conjugate;
use crate::qr::QRInto;
use crate::restart::LockingOutcome;
use crate::state::EigenState;
use crate::svd::SVDInto;
use crate::triangular::{IntoTriangular, SolveTriangular};
use crate::types::*;
use crate::{Diag, UPLO};

pub(crate) fn restart_qr<A: Scalar + Lapack>(
    state: &mut EigenState<A>,
    config: &RestartConfig<A>,
    stats: &mut RestartStats,
    outcome: &LockingOutcome,
    harmonic: bool,
) -> Result<(), RestartError> {
    let restart_size = outcome.restart_size;

    // Harmonic's preamble (§4.4.2): the whole restart is treated as
    // "previous vectors" -- this only affects the *reduced-problem* steps
    // below (4-9), not H's rebuild in step 1, which always uses the real
    // `indexOfPreviousVecs`/`numPrevRetained` produced by the locking
    // restart.
    let (index_of_previous_vecs, num_prev_retained) = if harmonic {
        (0, restart_size)
    } else {
        (outcome.index_of_previous_vecs, outcome.num_prev_retained)
    };
    let prev_end = index_of_previous_vecs + num_prev_retained;

    // `outcome.h_vecs_perm` is the inverse of `restartPerm` over the full
    // pre-restart basis width (needed as-is by the coordinator to permute
    // `prevRitzVals`, §4.1); composed with `restartPerm` here it becomes a
    // permutation of `[0, restartSize)` safe to index the already-compacted
    // `hVals`/`hVecs`/`hU`/`hSVals` arrays with (see `rr.rs` for the same
    // composition and why a raw lookup can otherwise point past
    // `restartSize`).
    let h_vecs_perm: Vec<usize> = (0..restart_size)
        .map(|i| outcome.h_vecs_perm[outcome.restart_perm[i]])
        .collect();

    // 1. H <- hVecs^H H_old hVecs, into a fresh buffer.
    let h_vecs_leading = state.h_vecs.slice(s![.., ..restart_size]).to_owned();
    state.h = compute_submatrix(h_vecs_leading.view(), state.h.view());

    // Apply restartPerm to the refined/harmonic-only arrays the locking
    // restart left untouched (it only permutes `hVals`/`hVecs`).
    permute_refined_state(state, &outcome.restart_perm, restart_size);

    let tau = config.target_shift(state.num_converged);
    let tau_changed = state.prev_target_shift != Some(tau);

    if tau_changed {
        // 2. Target shift moved: rebuild (Q, R, QV) from scratch.
        stats.num_shift_changes += 1;
        rebuild_qr_from_scratch(state, restart_size, tau, harmonic)?;
        state.prev_target_shift = Some(tau);
        solve_reduced(state, 0, restart_size, harmonic)?;
        apply_h_vecs_perm(state, &h_vecs_perm, restart_size);
        return Ok(());
    }

    // 3. Otherwise, QV <- QV * hVecs (incremental update).
    if harmonic {
        if let Some(qv) = state.qv.as_ref() {
            let qv_leading = qv.slice(s![.., ..restart_size]).to_owned();
            state.qv = Some(qv_leading.dot(&h_vecs_leading));
        }
    }

    // 4. Columns [0, indexOfPreviousVecs) were already right singular
    // vectors of the old R: R becomes diagonal there (hU was already
    // permuted identically by `permute_refined_state`).
    if let Some(r) = state.r.as_mut() {
        for j in 0..index_of_previous_vecs {
            for i in 0..restart_size {
                r[(i, j)] = if i == j {
                    A::from_real(state.h_svals[j])
                } else {
                    A::zero()
                };
            }
        }
    }

    // 5. Columns [indexOfPreviousVecs, prevEnd): R * hVecs[:, prev-range]
    // re-factored via a fresh QR, assembled into hU/R.
    if num_prev_retained > 0 {
        if let Some(r_old) = state.r.clone() {
            let prev_cols = h_vecs_leading.slice(s![.., index_of_previous_vecs..prev_end]);
            let block = r_old.slice(s![..restart_size, ..restart_size]).dot(&prev_cols);
            let (block_q, block_r) = block.qr_into().map_err(RestartError::Linalg)?;

            state
                .h_u
                .slice_mut(s![.., index_of_previous_vecs..prev_end])
                .assign(&block_q);

            if let Some(r_mut) = state.r.as_mut() {
                let block_r = block_r.into_triangular(UPLO::Upper);
                r_mut
                    .slice_mut(s![index_of_previous_vecs..prev_end, index_of_previous_vecs..prev_end])
                    .assign(&block_r.slice(s![..num_prev_retained, ..]));
                for i in 0..restart_size {
                    if i < index_of_previous_vecs || i >= prev_end {
                        r_mut
                            .slice_mut(s![i, index_of_previous_vecs..prev_end])
                            .fill(A::zero());
                    }
                }
            }
        }
    }

    // 6. Q <- Q * hU over the leading restartSize columns.
    if let Some(q) = state.q.as_ref() {
        let q_leading = q.slice(s![.., ..restart_size]).to_owned();
        let h_u_leading = state.h_u.slice(s![.., ..restart_size]).to_owned();
        state.q = Some(q_leading.dot(&h_u_leading));
    }

    // 7. Harmonic: QV <- hU^H QV.
    if harmonic {
        if let Some(qv) = state.qv.as_ref() {
            let qv_leading = qv.slice(s![.., ..restart_size]).to_owned();
            let h_u_leading = state.h_u.slice(s![.., ..restart_size]).to_owned();
            state.qv = Some(compute_rect(h_u_leading.view(), qv_leading.view()));
        }
    }

    // 8-9. Reset to identity on the leading block, solve the reduced
    // problem restricted to the prev range, apply hVecsPerm.
    solve_reduced(state, index_of_previous_vecs, prev_end, harmonic)?;
    apply_h_vecs_perm(state, &h_vecs_perm, restart_size);

    Ok(())
}

/// Apply `restartPerm` to the refined/harmonic-only arrays the locking
/// restart left untouched (`hSVals`, `hU`'s columns).
fn permute_refined_state<A: Scalar + Lapack>(
    state: &mut EigenState<A>,
    restart_perm: &[usize],
    restart_size: usize,
) {
    if state.h_svals.len() >= restart_size {
        let old_svals: Vec<A::Real> = state.h_svals.iter().copied().collect();
        for i in 0..restart_size {
            state.h_svals[i] = old_svals[restart_perm[i]];
        }
    }
    if state.h_u.ncols() >= restart_size {
        let old_h_u = state.h_u.clone();
        for i in 0..restart_size {
            state.h_u.column_mut(i).assign(&old_h_u.column(restart_perm[i]));
        }
    }
}

/// Apply `hVecsPerm` (full columns) to `hVals`, `hSVals`, `hVecs` and `hU`.
fn apply_h_vecs_perm<A: Scalar + Lapack>(
    state: &mut EigenState<A>,
    h_vecs_perm: &[usize],
    restart_size: usize,
) {
    let old_vals: Vec<A::Real> = state.h_vals.iter().take(restart_size).copied().collect();
    let old_vecs = state.h_vecs.slice(s![.., ..restart_size]).to_owned();
    let old_u = state.h_u.slice(s![.., ..restart_size]).to_owned();
    let old_s: Vec<A::Real> = if state.h_svals.len() >= restart_size {
        state.h_svals.iter().take(restart_size).copied().collect()
    } else {
        Vec::new()
    };
    for i in 0..restart_size {
        let src = h_vecs_perm[i];
        state.h_vals[i] = old_vals[src];
        state.h_vecs.column_mut(i).assign(&old_vecs.column(src));
        state.h_u.column_mut(i).assign(&old_u.column(src));
        if !old_s.is_empty() {
            state.h_svals[i] = old_s[src];
        }
    }
}

/// Steps 8 (and, via `rebuild_qr_from_scratch`'s caller, step 2): reset
/// `hVecs`/`hU` to the identity on `[0, restart_size)` and solve the
/// reduced problem for `(hU, hVecs, hVals, hSVals)` restricted to
/// `[block_start, block_end)`.
fn solve_reduced<A: Scalar + Lapack>(
    state: &mut EigenState<A>,
    block_start: usize,
    block_end: usize,
    harmonic: bool,
) -> Result<(), RestartError> {
    let restart_size = state.h.nrows();

    let mut new_h_vecs = Array2::<A>::eye(restart_size);
    let mut new_h_u = Array2::<A>::eye(restart_size);
    let mut new_h_vals = state.h_vals.slice(s![..restart_size]).to_owned();
    let mut new_h_svals = if state.h_svals.len() >= restart_size {
        state.h_svals.slice(s![..restart_size]).to_owned()
    } else {
        Array1::from_elem(restart_size, A::Real::zero())
    };

    let block_width = block_end - block_start;
    if block_width > 0 {
        let r = state
            .r
            .as_ref()
            .ok_or(RestartError::RestartH)?
            .slice(s![block_start..block_end, block_start..block_end])
            .to_owned();

        if harmonic {
            let qv = state
                .qv
                .as_ref()
                .ok_or(RestartError::RestartH)?
                .slice(s![block_start..block_end, block_start..block_end])
                .to_owned();
            // Eigenvectors of QV relative to R: solve R x = QV (triangular
            // solve), symmetrise, and diagonalise the small dense result --
            // the "eigenvectors of QV relative to R" of the glossary. The
            // resulting eigenvalue theta is the reciprocal Ritz shift;
            // hVals gets tau's un-shifted Ritz value back via its
            // reciprocal (the harmonic Ritz value closest to tau).
            let reduced = r
                .solve_triangular(UPLO::Upper, Diag::NonUnit, &qv)
                .map_err(|_| RestartError::RestartH)?;
            let reduced_h: Array2<A> = conjugate(&reduced);
            let half: A::Real = NumCast::from(0.5).unwrap();
            let symmetrised = (&reduced + &reduced_h).mapv(|x| x * A::from_real(half));
            let (vals, vecs) = symmetrised
                .eigh(UPLO::Lower)
                .map_err(|_| RestartError::RestartH)?;
            new_h_vecs
                .slice_mut(s![block_start..block_end, block_start..block_end])
                .assign(&vecs);
            new_h_u
                .slice_mut(s![block_start..block_end, block_start..block_end])
                .assign(&vecs);
            for (j, &theta) in vals.iter().enumerate() {
                new_h_vals[block_start + j] = if theta.abs() > A::Real::epsilon() {
                    theta.recip()
                } else {
                    theta
                };
                new_h_svals[block_start + j] = theta;
            }
        } else {
            let (u, s, vt) = r.svd_into(true, true).map_err(|_| RestartError::RestartH)?;
            let u = u.ok_or(RestartError::RestartH)?;
            let vt = vt.ok_or(RestartError::RestartH)?;
            let v: Array2<A> = conjugate(&vt);
            new_h_u
                .slice_mut(s![block_start..block_end, block_start..block_end])
                .assign(&u);
            new_h_vecs
                .slice_mut(s![block_start..block_end, block_start..block_end])
                .assign(&v);
            new_h_svals.slice_mut(s![block_start..block_end]).assign(&s);

            // Ritz values of the refined vectors: the Rayleigh quotient of
            // each refined vector against the (already-rebuilt) H block.
            let h_block = compute_submatrix(
                v.view(),
                state.h.slice(s![block_start..block_end, block_start..block_end]),
            );
            for j in 0..block_width {
                new_h_vals[block_start + j] = h_block[(j, j)].re();
            }
        }
    }

    state.h_vecs = new_h_vecs;
    state.h_u = new_h_u;
    state.h_vals = new_h_vals;
    state.h_svals = new_h_svals;

    Ok(())
}

/// §4.4.2 step 2: the target shift moved, so `(Q, R)` (and, for harmonic,
/// `QV`) are recomputed from scratch instead of incrementally updated.
fn rebuild_qr_from_scratch<A: Scalar + Lapack>(
    state: &mut EigenState<A>,
    restart_size: usize,
    tau: A::Real,
    harmonic: bool,
) -> Result<(), RestartError> {
    let v = state.v.slice(s![.., ..restart_size]).to_owned();
    let tau = A::from_real(tau);

    // `shifted <- W - tau*V`, column by column (keeps the element type
    // bound to plain `Scalar` instead of requiring `ScalarOperand`).
    let mut shifted = state.w.slice(s![.., ..restart_size]).to_owned();
    for j in 0..restart_size {
        for i in 0..shifted.nrows() {
            shifted[(i, j)] = shifted[(i, j)] - tau * v[(i, j)];
        }
    }

    let (q, r) = shifted.qr_into().map_err(RestartError::Linalg)?;
    if harmonic {
        state.qv = Some(compute_rect(q.view(), v.view()));
    }
    state.q = Some(q);
    state.r = Some(r.into_triangular(UPLO::Upper));
    Ok(())
}
