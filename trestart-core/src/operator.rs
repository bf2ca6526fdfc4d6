//! Abstract linear operators acting on a vector in place

use ndarray::*;

use super::types::*;

/// Modify a vector by the operator, `self`
pub trait LinearOperator {
    type Elem: Scalar;

    fn apply_mut<S>(&self, a: &mut ArrayBase<S, Ix1>)
    where
        S: DataMut<Elem = Self::Elem>;

    fn apply<S>(&self, mut a: ArrayBase<S, Ix1>) -> ArrayBase<S, Ix1>
    where
        S: DataMut<Elem = Self::Elem>,
    {
        self.apply_mut(&mut a);
        a
    }

    fn apply_view<'a, S>(&self, a: &'a mut ArrayBase<S, Ix1>) -> &'a mut ArrayBase<S, Ix1>
    where
        S: DataMut<Elem = Self::Elem>,
    {
        self.apply_mut(a);
        a
    }
}

impl<A, S> LinearOperator for ArrayBase<S, Ix2>
where
    A: Scalar + Lapack,
    S: Data<Elem = A>,
{
    type Elem = A;

    fn apply_mut<Sb>(&self, a: &mut ArrayBase<Sb, Ix1>)
    where
        Sb: DataMut<Elem = A>,
    {
        let result = self.dot(a);
        a.assign(&result);
    }
}

/// Approximate inverse of the operator, applied to a block of vectors at
/// once (`K^{-1} X`). The restart subsystem and outer driver only ever
/// call this through `&dyn`-free generics, so a no-preconditioning solve
/// is just [`IdentityPreconditioner`].
pub trait Preconditioner {
    type Elem: Scalar;

    fn apply_mut<S>(&self, a: &mut ArrayBase<S, Ix2>)
    where
        S: DataMut<Elem = Self::Elem>;
}

/// `K^{-1} = I`: the default when the caller supplies no preconditioner.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityPreconditioner<A>(std::marker::PhantomData<A>);

impl<A: Scalar> IdentityPreconditioner<A> {
    pub fn new() -> Self {
        IdentityPreconditioner(std::marker::PhantomData)
    }
}

impl<A: Scalar> Preconditioner for IdentityPreconditioner<A> {
    type Elem = A;

    fn apply_mut<S>(&self, _a: &mut ArrayBase<S, Ix2>)
    where
        S: DataMut<Elem = A>,
    {
    }
}

/// The cross-rank global sum a distributed outer driver would perform
/// after every local reduction-requiring step (§5). Defaults to a
/// single-process identity: the buffer already holds the global value.
pub trait Reduction {
    fn global_sum<A: Scalar, S>(&self, buf: &mut ArrayBase<S, Ix1>)
    where
        S: DataMut<Elem = A>;
}

/// Single-process `Reduction`: the local buffer is already global.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalReduction;

impl Reduction for LocalReduction {
    fn global_sum<A: Scalar, S>(&self, _buf: &mut ArrayBase<S, Ix1>)
    where
        S: DataMut<Elem = A>,
    {
    }
}
