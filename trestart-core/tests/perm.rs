//! Permutation-algebra laws (§8 "Laws"): invertibility and composition.

use trestart_core::perm::{compose, identity, invert};

#[test]
fn invert_is_involution_on_identity() {
    let n = 7;
    let id = identity(n);
    assert_eq!(invert(&id), id);
}

#[test]
fn invert_round_trips_an_arbitrary_permutation() {
    let perm = vec![3, 0, 4, 1, 2];
    let inv = invert(&perm);
    // perm[inv[i]] == i for every i.
    for i in 0..perm.len() {
        assert_eq!(perm[inv[i]], i);
    }
    // And the other direction.
    for i in 0..perm.len() {
        assert_eq!(inv[perm[i]], i);
    }
}

/// `compose(outer, inner)[i] == outer[inner[i]]` for every `i` -- the
/// defining formula used by the restart coordinator to fold `restartPerm`
/// and `hVecsPerm` into one permutation of `prevRitzVals` (§4.1).
#[test]
fn compose_matches_pointwise_formula() {
    let outer = vec![1, 3, 0, 2];
    let inner = vec![2, 0, 3, 1];

    let composed = compose(&outer, &inner);
    for i in 0..inner.len() {
        assert_eq!(composed[i], outer[inner[i]]);
    }
}

/// `compose` with an identity second argument is the identity composition:
/// `compose(p, id) == p`.
#[test]
fn compose_with_identity_inner_is_identity() {
    let p = vec![2, 0, 3, 1];
    let id = identity(p.len());
    assert_eq!(compose(&p, &id), p);
}
