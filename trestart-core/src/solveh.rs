//! Solve Hermitian (or real symmetric) indefinite linear systems
//!
//! Wraps the Bunch-Kaufman diagonal pivoting factorization `A = U D U^H`,
//! used by the restart subsystem to maintain the skew projector.

use ndarray::*;

use super::convert::*;
use super::error::*;
use super::layout::*;
use super::types::*;

pub use lax::{Pivot, UPLO};

/// Bunch-Kaufman factorization of a Hermitian indefinite matrix, in place
pub trait BKInplace {
    fn bk_inplace(&mut self, uplo: UPLO) -> Result<Pivot>;
}

impl<A, S> BKInplace for ArrayBase<S, Ix2>
where
    A: Scalar + Lapack,
    S: DataMut<Elem = A>,
{
    fn bk_inplace(&mut self, uplo: UPLO) -> Result<Pivot> {
        let l = self.square_layout()?;
        A::bk(l, uplo, self.as_allocated_mut()?)
    }
}

/// Bunch-Kaufman factorization, owning the input
pub trait FactorizeH {
    type Output;
    fn factorizeh(&self, uplo: UPLO) -> Result<Self::Output>;
}

/// Bunch-Kaufman factorization of `A`: `U`, `D` and permutation packed in LAPACK's
/// compact form, together with the `uplo` they were computed against.
pub struct UduFactorized<A> {
    pub factor: Array2<A>,
    pub ipiv: Pivot,
    pub uplo: UPLO,
}

impl<A, S> FactorizeH for ArrayBase<S, Ix2>
where
    A: Scalar + Lapack,
    S: Data<Elem = A>,
{
    type Output = UduFactorized<A>;

    fn factorizeh(&self, uplo: UPLO) -> Result<Self::Output> {
        let mut a = replicate(self);
        let ipiv = a.bk_inplace(uplo)?;
        Ok(UduFactorized {
            factor: a,
            ipiv,
            uplo,
        })
    }
}

impl<A: Scalar + Lapack> UduFactorized<A> {
    /// Solve `A x = b` reusing the cached factorization
    pub fn solve<S: DataMut<Elem = A>>(&self, b: &mut ArrayBase<S, Ix1>) -> Result<()> {
        let l = self.factor.square_layout()?;
        A::solveh(
            l,
            self.uplo,
            self.factor.as_allocated()?,
            &self.ipiv,
            b.as_slice_mut().ok_or(LinalgError::MemoryNotCont)?,
        )
    }

    /// Explicit inverse of `A`, consuming the factorization
    pub fn invh(mut self) -> Result<Array2<A>> {
        let l = self.factor.square_layout()?;
        A::invh(l, self.uplo, self.factor.as_allocated_mut()?, &self.ipiv)?;
        super::convert::triangular_fill_hermitian(&mut self.factor, self.uplo);
        Ok(self.factor)
    }
}
