//! Cholesky decomposition of Hermitian (or real symmetric) positive definite matrices
//!
//! [Wikipedia article on Cholesky decomposition](https://en.wikipedia.org/wiki/Cholesky_decomposition)

use ndarray::*;

use super::convert::*;
use super::error::*;
use super::layout::*;
use super::types::*;

pub use lax::UPLO;

/// Cholesky decomposition without copying the original array
pub trait CholeskyInplace {
    fn cholesky_inplace(&mut self, uplo: UPLO) -> Result<&mut Self>;
}

impl<A, S> CholeskyInplace for ArrayBase<S, Ix2>
where
    A: Scalar + Lapack,
    S: DataMut<Elem = A>,
{
    fn cholesky_inplace(&mut self, uplo: UPLO) -> Result<&mut Self> {
        let l = self.square_layout()?;
        A::cholesky(l, uplo, self.as_allocated_mut()?)?;
        Ok(self)
    }
}

/// Cholesky decomposition
pub trait Cholesky {
    type Output;
    fn cholesky(&self, uplo: UPLO) -> Result<Self::Output>;
}

impl<A, S> Cholesky for ArrayBase<S, Ix2>
where
    A: Scalar + Lapack,
    S: Data<Elem = A>,
{
    type Output = Array2<A>;

    fn cholesky(&self, uplo: UPLO) -> Result<Self::Output> {
        let mut a = replicate(self);
        a.cholesky_inplace(uplo)?;
        triangular_zero(&mut a, uplo);
        Ok(a)
    }
}

/// Cholesky decomposition, consuming the original array
pub trait CholeskyInto {
    fn cholesky_into(self, uplo: UPLO) -> Result<Self>
    where
        Self: Sized;
}

impl<A, S> CholeskyInto for ArrayBase<S, Ix2>
where
    A: Scalar + Lapack,
    S: DataMut<Elem = A>,
{
    fn cholesky_into(mut self, uplo: UPLO) -> Result<Self> {
        self.cholesky_inplace(uplo)?;
        triangular_zero(&mut self, uplo);
        Ok(self)
    }
}

/// Zero out the part of `a` not determined by `uplo` so that only the
/// triangular factor remains.
fn triangular_zero<A, S>(a: &mut ArrayBase<S, Ix2>, uplo: UPLO)
where
    A: Scalar,
    S: DataMut<Elem = A>,
{
    let n = a.nrows();
    match uplo {
        UPLO::Upper => {
            for i in 0..n {
                for j in 0..i {
                    a[(i, j)] = A::zero();
                }
            }
        }
        UPLO::Lower => {
            for i in 0..n {
                for j in (i + 1)..n {
                    a[(i, j)] = A::zero();
                }
            }
        }
    }
}

/// Solve a linear system `A x = b` given the Cholesky factorization of `A`
pub trait SolveCholesky<A> {
    fn solve_cholesky<S: DataMut<Elem = A>>(&self, b: &mut ArrayBase<S, Ix1>) -> Result<()>;
}

impl<A> SolveCholesky<A> for Array2<A>
where
    A: Scalar + Lapack,
{
    fn solve_cholesky<S: DataMut<Elem = A>>(&self, b: &mut ArrayBase<S, Ix1>) -> Result<()> {
        let l = self.square_layout()?;
        A::solve_cholesky(
            l,
            UPLO::Lower,
            self.as_allocated()?,
            b.as_slice_mut().ok_or(LinalgError::MemoryNotCont)?,
        )
    }
}

/// Inverse of a Hermitian positive definite matrix given its Cholesky factorization
pub trait InverseCholesky {
    type Output;
    fn inverse_cholesky(&self, uplo: UPLO) -> Result<Self::Output>;
}

impl<A, S> InverseCholesky for ArrayBase<S, Ix2>
where
    A: Scalar + Lapack,
    S: Data<Elem = A>,
{
    type Output = Array2<A>;

    fn inverse_cholesky(&self, uplo: UPLO) -> Result<Self::Output> {
        let mut a = replicate(self);
        let l = a.square_layout()?;
        A::inv_cholesky(l, uplo, a.as_allocated_mut()?)?;
        super::convert::triangular_fill_hermitian(&mut a, uplo);
        Ok(a)
    }
}
