//! Triangular matrices

use ndarray::*;

use super::convert::*;
use super::error::*;
use super::layout::*;
use super::types::*;

pub use lax::{Diag, UPLO};

/// Mask the irrelevant triangle of a matrix with zero, keeping only the
/// triangle determined by `uplo`
pub trait IntoTriangular {
    fn into_triangular(self, uplo: UPLO) -> Self;
}

impl<A, S> IntoTriangular for ArrayBase<S, Ix2>
where
    A: Scalar,
    S: DataMut<Elem = A>,
{
    fn into_triangular(mut self, uplo: UPLO) -> Self {
        let n = self.nrows();
        let m = self.ncols();
        match uplo {
            UPLO::Upper => {
                for i in 0..n {
                    for j in 0..m.min(i) {
                        self[(i, j)] = A::zero();
                    }
                }
            }
            UPLO::Lower => {
                for i in 0..n {
                    for j in (i + 1)..m {
                        self[(i, j)] = A::zero();
                    }
                }
            }
        }
        self
    }
}

/// Solve a triangular system `A x = b` for `x`, given only the `a` triangle
/// determined by `uplo`
pub trait SolveTriangular<Rhs> {
    type Output;
    fn solve_triangular(&self, uplo: UPLO, diag: Diag, b: &Rhs) -> Result<Self::Output>;
}

impl<A, Si, So> SolveTriangular<ArrayBase<Si, Ix2>> for ArrayBase<So, Ix2>
where
    A: Scalar + Lapack,
    Si: Data<Elem = A>,
    So: Data<Elem = A>,
{
    type Output = Array2<A>;

    fn solve_triangular(
        &self,
        uplo: UPLO,
        diag: Diag,
        b: &ArrayBase<Si, Ix2>,
    ) -> Result<Self::Output> {
        let mut b: Array2<A> = replicate(b);
        let al = self.square_layout()?;
        let bl = b.layout()?;
        A::solve_triangular(al, bl, uplo, diag, self.as_allocated()?, b.as_allocated_mut()?)?;
        Ok(b)
    }
}
