//! Two-phase workspace sizing and a typed, borrowed workspace.
//!
//! The original threads two untyped slabs through every restart routine and
//! sizes them via a "null-pointer query" convention (call the routine with
//! `V == NULL` and it returns the words it would have needed). That
//! convention is replaced here with a pure [`size_requirements`] function and
//! a [`Workspace`] that borrows caller-owned buffers for the duration of one
//! `restart()` call; the behavioural contract (maximum over sub-phases) is
//! unchanged.

use crate::config::RestartConfig;
use crate::types::*;

/// Real- and integer-word counts a restart call may need, taken as the
/// maximum over every sub-phase it might exercise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkspaceSize {
    pub real_words: usize,
    pub int_words: usize,
}

impl WorkspaceSize {
    fn max(self, other: Self) -> Self {
        WorkspaceSize {
            real_words: self.real_words.max(other.real_words),
            int_words: self.int_words.max(other.int_words),
        }
    }
}

/// Compute the maximum workspace a restart call needs for the given
/// configuration and basis width, without touching any data.
///
/// Mirrors the sizing branches of `restart_soft_locking_dprimme`,
/// `restart_locking_dprimme`, `restart_qr` and `ortho_coefficient_vectors`
/// in the original, collapsed into one pure function.
pub fn size_requirements<A: Scalar>(config: &RestartConfig<A>, basis_size: usize) -> WorkspaceSize {
    let n = config.max_basis_size.max(basis_size);

    // restartPerm + hVecsPerm, one entry per basis column.
    let perm = WorkspaceSize {
        real_words: 0,
        int_words: 2 * n,
    };

    // Scratch large enough to hold a full basisSize x basisSize dense
    // matrix (used by compute_submatrix's non-aliasing output buffer,
    // Gram-matrix reorthonormalisation, and the QR-of-the-previous-block
    // step of §4.4.2).
    let dense_scratch = WorkspaceSize {
        real_words: n * n,
        int_words: 0,
    };

    // M/UDU packing workspace: two (numOrthoConst + numConverged)^2 blocks.
    let skew = if config.skew_preconditioning {
        let m = config.num_ortho_const + config.num_evals;
        WorkspaceSize {
            real_words: 2 * m * m,
            int_words: m,
        }
    } else {
        WorkspaceSize::default()
    };

    perm.max(dense_scratch).max(skew)
}

/// A typed workspace borrowing externally-owned buffers for one `restart()`
/// call. Replaces raw slabs carved up by pointer arithmetic.
pub struct Workspace<'a, A: Scalar> {
    real: &'a mut [A],
    int: &'a mut [i32],
}

impl<'a, A: Scalar> Workspace<'a, A> {
    /// Borrow `real`/`int` buffers already sized to satisfy
    /// [`size_requirements`] for the call about to be made.
    pub fn new(real: &'a mut [A], int: &'a mut [i32]) -> Self {
        Workspace { real, int }
    }

    /// Carve off the leading `restartPerm`/`hVecsPerm` integer arrays, one
    /// per basis column, returning the remaining integer tail.
    pub fn take_perms(&mut self, basis_size: usize) -> (&mut [i32], &mut [i32]) {
        let (restart_perm, rest) = self.int.split_at_mut(basis_size);
        let (h_vecs_perm, _tail) = rest.split_at_mut(basis_size);
        (restart_perm, h_vecs_perm)
    }

    /// Dense real scratch of at least `len` elements.
    pub fn real_scratch(&mut self, len: usize) -> &mut [A] {
        assert!(
            self.real.len() >= len,
            "workspace too small: have {} real words, need {}",
            self.real.len(),
            len
        );
        &mut self.real[..len]
    }
}
