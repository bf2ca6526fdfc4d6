//! Conjugate-linear inner product

use ndarray::*;

use super::types::*;

/// Inner product conjugate-linear in `self`, i.e. `<self, rhs> = sum(conj(self_i) * rhs_i)`
pub trait Inner {
    type Elem: Scalar;

    fn inner<S>(&self, rhs: &ArrayBase<S, Ix1>) -> Self::Elem
    where
        S: Data<Elem = Self::Elem>;
}

impl<A, S> Inner for ArrayBase<S, Ix1>
where
    A: Scalar,
    S: Data<Elem = A>,
{
    type Elem = A;

    fn inner<Sb>(&self, rhs: &ArrayBase<Sb, Ix1>) -> A
    where
        Sb: Data<Elem = A>,
    {
        self.iter()
            .zip(rhs.iter())
            .map(|(&a, &b)| a.conj() * b)
            .sum()
    }
}
