//! Coefficient-vector reorthonormaliser (§4.5).
//!
//! After the previous iteration's retained coefficient vectors are copied
//! into `hVecs[:, indexOfPreviousVecs..)` (§4.2 step 9) they are no longer
//! guaranteed orthonormal against the columns already occupying the rest of
//! `hVecs` (a permuted identity at that point). This reorthonormalises the
//! inserted block in place, column by column, against everything that
//! precedes it: classical Gram-Schmidt with one reorthogonalization pass,
//! redrawing a random coefficient vector on linear dependence rather than
//! giving up (mirrors `ortho_coefficient_vectors`'s retry loop).

use log::warn;
use num_traits::{Float, NumCast, One, Zero};
use rand::thread_rng;

use crate::config::RestartConfig;
use crate::error::RestartError;
use crate::generate::random_using;
use crate::state::EigenState;
use crate::types::*;

const MAX_REDRAWS: usize = 3;

/// Orthonormalise `hVecs[:, start..start+count)` against `hVecs[:, 0..start)`
/// and against itself (earlier columns of the block), in coefficient space
/// (dimension `hVecs.nrows()`, the pre-restart basis width).
pub fn orthonormalize_inserted_block<A: Scalar + Lapack>(
    state: &mut EigenState<A>,
    config: &RestartConfig<A>,
    start: usize,
    count: usize,
    new_basis_size: usize,
) -> Result<(), RestartError> {
    if count == 0 {
        return Ok(());
    }

    let dim = state.h_vecs.nrows();
    let tol: A::Real =
        config.mach_eps * NumCast::from(new_basis_size.max(1)).unwrap();
    let mut rng = thread_rng();

    for col in start..(start + count) {
        let mut v = state.h_vecs.column(col).to_owned();
        let mut redraws = 0usize;

        loop {
            // Classical Gram-Schmidt, twice, against every column that
            // precedes this one in the final layout.
            for _pass in 0..2 {
                for j in (0..start).chain(start..col) {
                    let q = state.h_vecs.column(j);
                    let c: A = q
                        .iter()
                        .zip(v.iter())
                        .map(|(&qi, &vi)| qi.conj() * vi)
                        .fold(A::zero(), |acc, x| acc + x);
                    for i in 0..dim {
                        v[i] = v[i] - c * q[i];
                    }
                }
            }

            let norm_sq = v
                .iter()
                .map(|x| x.abs().powi(2))
                .fold(A::Real::zero(), |acc, x| acc + x);
            let norm = norm_sq.sqrt();

            if norm > tol || redraws >= MAX_REDRAWS {
                if norm <= tol {
                    warn!(
                        "coeff_reortho: column {col} still linearly dependent after {redraws} redraws, normalising anyway"
                    );
                }
                let scale = A::from_real(if norm > A::Real::zero() {
                    norm.recip()
                } else {
                    A::Real::one()
                });
                for x in v.iter_mut() {
                    *x = *x * scale;
                }
                break;
            }

            // Linearly dependent: redraw and retry rather than leave a
            // near-zero column in the coefficient basis.
            v = random_using((dim,), &mut rng);
            redraws += 1;
        }

        state.h_vecs.column_mut(col).assign(&v);
    }

    Ok(())
}
