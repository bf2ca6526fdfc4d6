//! Permutation algebra: building, inverting and applying `restartPerm` and
//! `hVecsPerm`, the two permutations that reshape the basis during a
//! restart (§4.1-§4.4).

use ndarray::{Array1, ArrayViewMut1, ArrayViewMut2, Axis};

use crate::types::Scalar;

/// Invert a permutation: `inverse[perm[i]] = i`.
pub fn invert(perm: &[usize]) -> Vec<usize> {
    let mut inverse = vec![0usize; perm.len()];
    for (i, &p) in perm.iter().enumerate() {
        inverse[p] = i;
    }
    inverse
}

/// Permute the entries of a 1-D array in place: `out[i] = in[perm[i]]`.
///
/// Mirrors `permute_vecs_dprimme` applied to a vector (e.g. `hVals`,
/// `prevRitzVals`).
pub fn permute_values<T: Copy>(values: &mut ArrayViewMut1<T>, perm: &[usize]) {
    let orig: Vec<T> = values.iter().copied().collect();
    for (i, &p) in perm.iter().enumerate() {
        values[i] = orig[p];
    }
}

/// Permute the columns of a 2-D array in place: `out[:, i] = in[:, perm[i]]`.
///
/// Mirrors `permute_vecs_dprimme` applied to `hVecs`/`hU`.
pub fn permute_columns<A: Scalar>(matrix: &mut ArrayViewMut2<A>, perm: &[usize]) {
    let orig = matrix.to_owned();
    for (i, &p) in perm.iter().enumerate() {
        matrix.index_axis_mut(Axis(1), i).assign(&orig.index_axis(Axis(1), p));
    }
}

/// Apply a permutation `outer` composed with `inner`: first `inner`, then
/// `outer`, as used to rearrange `prevRitzVals` by `restartPerm` followed by
/// `hVecsPerm` (§4.1).
pub fn compose(outer: &[usize], inner: &[usize]) -> Vec<usize> {
    inner.iter().map(|&i| outer[i]).collect()
}

/// Build `hVecsPerm` as the inverse of `restartPerm`, then shift the columns
/// that fall inside the candidate region so any "arbitrary" vectors (the
/// first `num_arbitrary_vecs` columns before restart) sit just ahead of the
/// previous-retained block (§4.2 step 12).
pub fn build_h_vecs_perm(
    restart_perm: &[usize],
    index_of_previous_vecs: usize,
    left: usize,
    restart_size: usize,
    num_prev_retained: &mut usize,
    num_arbitrary_vecs: usize,
) -> Vec<usize> {
    let full_size = restart_perm.len();
    let mut h_vecs_perm: Vec<usize> = vec![0; full_size];
    for (i, &p) in restart_perm.iter().enumerate() {
        h_vecs_perm[p] = i;
    }

    // Count arbitrary vectors landing inside the candidate region
    // `[left, restart_size)` of the new (post-restartPerm) layout: position
    // `i` there holds an arbitrary vector iff its pre-restart source column
    // `restartPerm[i]` was one of the first `num_arbitrary_vecs` columns.
    // (Testing `restart_perm[h_vecs_perm[i]]` is a no-op, since `h_vecs_perm`
    // is exactly `restart_perm`'s inverse and that composition is the
    // identity for every `i`.)
    let mut j = 0usize;
    for &p in &restart_perm[left..restart_size] {
        if p < num_arbitrary_vecs {
            j += 1;
        }
    }

    for i in 0..full_size {
        if index_of_previous_vecs <= h_vecs_perm[i] && h_vecs_perm[i] < left + j {
            h_vecs_perm[i] = (h_vecs_perm[i] - index_of_previous_vecs + j)
                % (*num_prev_retained + j)
                + index_of_previous_vecs;
        }
    }

    *num_prev_retained += j;
    h_vecs_perm
}

/// Identity permutation of length `n`.
pub fn identity(n: usize) -> Vec<usize> {
    (0..n).collect()
}

/// Convenience: apply `permute_values`/`permute_columns` to an owned
/// `Array1`, returning a freshly permuted copy (used where the original
/// mutates through LAPACK-style scratch buffers that this crate replaces
/// with owned temporaries, per the §9 non-aliasing note).
pub fn permuted_values<T: Copy>(values: &Array1<T>, perm: &[usize]) -> Array1<T> {
    Array1::from_iter(perm.iter().map(|&p| values[p]))
}
