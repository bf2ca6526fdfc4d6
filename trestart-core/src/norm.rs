//! Vector and matrix norms

use ndarray::*;
use num_traits::Zero;

use super::types::*;

/// L1, L2, and max norms for vectors and matrices
pub trait Norm {
    type Output;

    /// Entry-wise L1 norm (sum of absolute values)
    fn norm_l1(&self) -> Self::Output;

    /// L2 norm: euclidean norm for vectors, Frobenius norm for matrices
    fn norm_l2(&self) -> Self::Output;

    /// Max norm: largest absolute entry
    fn norm_max(&self) -> Self::Output;

    /// Shorthand for [`Norm::norm_l2`]
    fn norm(&self) -> Self::Output
    where
        Self::Output: Sized,
    {
        self.norm_l2()
    }
}

impl<A, S, D> Norm for ArrayBase<S, D>
where
    A: Scalar,
    S: Data<Elem = A>,
    D: Dimension,
{
    type Output = A::Real;

    fn norm_l1(&self) -> Self::Output {
        self.iter().map(|x| x.abs()).sum()
    }

    fn norm_l2(&self) -> Self::Output {
        self.iter().map(|x| x.square()).sum::<Self::Output>().sqrt()
    }

    fn norm_max(&self) -> Self::Output {
        self.iter()
            .map(|x| x.abs())
            .fold(Zero::zero(), |a: Self::Output, b| if a > b { a } else { b })
    }
}
