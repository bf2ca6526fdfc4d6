//! Assertions for array comparison in tests and invariant checks

use ndarray::*;

use super::norm::Norm;
use super::types::*;

/// Check two arrays are close in L1 norm of the difference, panics otherwise
pub fn close_l1<A, S1, S2, D>(test: &ArrayBase<S1, D>, truth: &ArrayBase<S2, D>, atol: A::Real)
where
    A: Scalar,
    S1: Data<Elem = A>,
    S2: Data<Elem = A>,
    D: Dimension,
{
    let dev = (test - truth).norm_l1();
    if dev > atol {
        panic!(
            "Too large deviation in L1 norm: {:?} > {:?}\ntest = \n{:?}\ntruth = \n{:?}",
            dev, atol, test, truth
        );
    }
}

/// Check two arrays are close in L2 norm of the difference, panics otherwise
pub fn close_l2<A, S1, S2, D>(test: &ArrayBase<S1, D>, truth: &ArrayBase<S2, D>, atol: A::Real)
where
    A: Scalar,
    S1: Data<Elem = A>,
    S2: Data<Elem = A>,
    D: Dimension,
{
    let dev = (test - truth).norm_l2();
    if dev > atol {
        panic!(
            "Too large deviation in L2 norm: {:?} > {:?}\ntest = \n{:?}\ntruth = \n{:?}",
            dev, atol, test, truth
        );
    }
}

/// Check two arrays are close in maximum norm of the difference, panics otherwise
pub fn close_max<A, S1, S2, D>(test: &ArrayBase<S1, D>, truth: &ArrayBase<S2, D>, atol: A::Real)
where
    A: Scalar,
    S1: Data<Elem = A>,
    S2: Data<Elem = A>,
    D: Dimension,
{
    let dev = (test - truth).norm_max();
    if dev > atol {
        panic!(
            "Too large deviation in max norm: {:?} > {:?}\ntest = \n{:?}\ntruth = \n{:?}",
            dev, atol, test, truth
        );
    }
}
