//! Dynamic thick-restart selector (§4.6): gap-ratio heuristic choosing how
//! many low- and high-end Ritz pairs to retain.

use log::trace;
use num_traits::{Float, NumCast, Zero};

use super::reset_flags;
use crate::config::{Locking, RestartConfig};
use crate::state::{EigenState, Flag};
use crate::types::*;

/// Choose `restartSize` by maximising
/// `f(l, r) = (basisSize - l - r) * sqrt((nu - hVals[l+1]) / (hVals[l+1] - hVals[basisSize-1-r]))`
/// over `lMin <= l < basisSize - numFree`, `0 <= r < basisSize - l - numFree`,
/// subject to `(basisSize - l - r) % maxBlockSize == 0`. Reorders `hVecs`,
/// `hVals` and `flags` so the chosen vectors are contiguous, then returns
/// the new restart size.
pub fn dtr_restart_size<A: Scalar + Lapack>(
    state: &mut EigenState<A>,
    config: &RestartConfig<A>,
    num_free: usize,
) -> usize {
    let basis_size = state.basis_size();
    let max_index = basis_size - 1;
    let nu = state.h_vals[state.iev[0]];

    let l_min = match config.locking {
        Locking::Hard => {
            let mut l_min = 0usize;
            for l in 0..basis_size {
                if state.flags[l] != Flag::Unconverged && state.num_locked + l < config.num_evals {
                    l_min = l;
                }
            }
            l_min.max(basis_size.min(config.min_restart_size))
        }
        Locking::Soft => basis_size.min(config.min_restart_size),
    };

    let mut l_opt = l_min;
    let mut r_opt = 0usize;
    let mut opt_val = A::Real::zero();

    if basis_size > num_free {
        for l in l_min..(basis_size - num_free) {
            for r in 0..(basis_size - l - num_free) {
                if (basis_size - l - r) % config.max_block_size != 0 {
                    continue;
                }
                let denom = state.h_vals[l + 1] - state.h_vals[max_index - r];
                if denom <= A::Real::zero() {
                    continue;
                }
                let num = nu - state.h_vals[l + 1];
                if num < A::Real::zero() {
                    continue;
                }
                let new_val: A::Real = NumCast::from(basis_size - l - r).unwrap();
                let new_val = new_val * (num / denom).sqrt();
                if new_val > opt_val {
                    opt_val = new_val;
                    l_opt = l;
                    r_opt = r;
                }
            }
        }
    }

    let restart_size = l_opt + r_opt;

    // Swap the rOpt top-of-spectrum Ritz pairs so they sit contiguously
    // with the left-retained block, at positions [lOpt, lOpt + rOpt).
    let tail_start = basis_size - r_opt;
    if r_opt > 0 {
        let tail_vecs = state.h_vecs.slice(ndarray::s![.., tail_start..basis_size]).to_owned();
        let tail_vals: Vec<A::Real> = state.h_vals.iter().skip(tail_start).copied().collect();
        let tail_flags: Vec<Flag> = state.flags[tail_start..basis_size].to_vec();

        let middle_vecs = state.h_vecs.slice(ndarray::s![.., l_opt..tail_start]).to_owned();
        let middle_vals: Vec<A::Real> = state.h_vals.iter().skip(l_opt).take(tail_start - l_opt).copied().collect();

        state
            .h_vecs
            .slice_mut(ndarray::s![.., l_opt..(l_opt + r_opt)])
            .assign(&tail_vecs);
        state
            .h_vecs
            .slice_mut(ndarray::s![.., (l_opt + r_opt)..basis_size])
            .assign(&middle_vecs);

        for (i, v) in tail_vals.into_iter().enumerate() {
            state.h_vals[l_opt + i] = v;
        }
        for (i, v) in middle_vals.into_iter().enumerate() {
            state.h_vals[l_opt + r_opt + i] = v;
        }
        for (i, f) in tail_flags.into_iter().enumerate() {
            state.flags[l_opt + i] = f;
        }
    }

    trace!("dtr: basisSize={basis_size} lOpt={l_opt} rOpt={r_opt} restartSize={restart_size}");

    reset_flags(&mut state.flags, 0, restart_size.saturating_sub(1));
    restart_size
}
