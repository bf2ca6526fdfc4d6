//! The restart subsystem: entry point and dispatch (§4.1), plus the
//! dynamic thick-restart selector (§4.6) and flag reset helper.

mod dtr;
mod hard_locking;
mod soft_locking;

pub mod coeff_reortho;
pub mod projection;
pub mod skew_projector;

pub use dtr::dtr_restart_size;
pub use hard_locking::hard_locking_restart;
pub use soft_locking::soft_locking_restart;

use log::{debug, trace};

use crate::config::{Locking, RestartConfig, RestartScheme, RestartStats};
use crate::error::RestartError;
use crate::operator::Preconditioner;
use crate::state::{EigenState, Flag};
use crate::types::*;
use crate::workspace::Workspace;

/// The result of the basis-reshaping phase (§4.2/§4.3): everything the
/// projection-restart phase (§4.4) needs to rebuild `H`/`Q`/`R`/`QV`.
pub struct LockingOutcome {
    pub restart_size: usize,
    pub index_of_previous_vecs: usize,
    pub left: usize,
    pub num_prev_retained: usize,
    pub restart_perm: Vec<usize>,
    pub h_vecs_perm: Vec<usize>,
}

/// Entry point of the restart subsystem: `restart(state, config, stats, preconditioner, ws)`.
///
/// Dispatches to soft- or hard-locking restart (§4.2/§4.3), then to
/// projection restart (§4.4), per the coordinator's algorithm (§4.1). The
/// `preconditioner` is only ever invoked when `config.skew_preconditioning`
/// is set; callers with no preconditioner can pass
/// [`crate::operator::IdentityPreconditioner`]. Returns the new basis width
/// on success.
pub fn restart<A: Scalar + Lapack, P: Preconditioner<Elem = A>>(
    state: &mut EigenState<A>,
    config: &RestartConfig<A>,
    stats: &mut RestartStats,
    preconditioner: &P,
    ws: &mut Workspace<A>,
) -> Result<usize, RestartError> {
    stats.num_restarts += 1;
    let basis_size = state.basis_size();

    // Special case (§4.1): the remaining subspace is exhausted.
    if basis_size + state.num_locked + config.num_ortho_const >= config.n {
        trace!("restart: subspace exhausted, flagging all unconverged as converged");
        for i in 0..basis_size.min(config.num_evals) {
            if state.flags[i] == Flag::Unconverged {
                state.flags[i] = Flag::Converged;
            }
        }
        state.num_prev_retained = 0;
        return Ok(basis_size);
    }

    // Size selection.
    let mut restart_size = if basis_size <= config.max_basis_size - config.max_block_size {
        stats.num_idempotent += 1;
        trace!("restart: basis small enough, no-op restart at size {basis_size}");
        basis_size
    } else {
        match config.scheme {
            RestartScheme::Dtr => {
                stats.num_dtr_calls += 1;
                let num_free = state.num_prev_retained + config.max_block_size.max(3);
                dtr_restart_size(state, config, num_free)
            }
            RestartScheme::Fixed => basis_size.min(config.min_restart_size),
        }
    };
    debug!("restart: selected restartSize = {restart_size}");

    if restart_size == basis_size {
        // Idempotence law (§8): leave everything untouched.
        return Ok(restart_size);
    }

    let outcome = match config.locking {
        Locking::Soft => soft_locking_restart(state, config, &mut restart_size, ws)?,
        Locking::Hard => hard_locking_restart(state, config, &mut restart_size, ws)?,
    };

    if config.target.is_shift_sensitive() {
        let composed = crate::perm::compose(&outcome.h_vecs_perm, &outcome.restart_perm);
        state.prev_ritz_vals = crate::perm::permuted_values(&state.prev_ritz_vals, &composed);
    }

    projection::restart_projection(state, config, stats, &outcome, preconditioner, ws)?;

    Ok(outcome.restart_size)
}

/// Mark `flags[first..=last]` as `Unconverged` (`reset_flags_dprimme`).
pub(crate) fn reset_flags(flags: &mut [Flag], first: usize, last: usize) {
    for flag in flags.iter_mut().take((last + 1).min(flags.len())).skip(first) {
        *flag = Flag::Unconverged;
    }
}
