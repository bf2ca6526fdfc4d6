//! Define Errors

use ndarray::{Ixs, ShapeError};
use thiserror::Error;

pub type Result<T> = ::std::result::Result<T, LinalgError>;

/// Master Error type of this crate
#[derive(Debug, Error)]
pub enum LinalgError {
    /// Matrix is not square
    #[error("Not square: rows({}) != cols({})", rows, cols)]
    NotSquare { rows: i32, cols: i32 },

    #[error(
        "Invalid value for LAPACK subroutine {}-th argument",
        -return_code
    )]
    LapackInvalidValue { return_code: i32 },

    #[error(
        "Comutational failure in LAPACK subroutine: return_code = {}",
        return_code
    )]
    LapackComputationalFailure { return_code: i32 },

    /// Strides of the array is not supported
    #[error("invalid stride: s0={}, s1={}", s0, s1)]
    InvalidStride { s0: Ixs, s1: Ixs },

    /// Memory is not aligned continously
    #[error("Memroy is not continously")]
    MemoryNotCont,

    /// Obj cannot be made from a (rows, cols) matrix
    #[error("{} cannot be made from a ({}, {}) matrix", obj, rows, cols)]
    NotStandardShape {
        obj: &'static str,
        rows: i32,
        cols: i32,
    },

    /// Strides of the array is not supported
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Errors reported by the restart subsystem to the outer iteration.
///
/// Unlike [`LinalgError`], these are not dense-kernel failures but
/// numeric failures of the small projected subproblems solved during a
/// restart; the outer loop treats every variant as terminal.
#[derive(Debug, Error)]
pub enum RestartError {
    /// Eigendecomposition (or SVD) of an inserted projection submatrix failed.
    #[error("restart_H failed: projection subproblem did not converge")]
    RestartH,

    /// Symmetric-indefinite (Bunch-Kaufman) factorisation of the skew-projector
    /// Gram matrix `M` failed.
    #[error("UDU decomposition of the skew-projector Gram matrix failed")]
    UduDecompose,

    /// A flag claims CONVERGED but the accompanying eigenvalue has drifted
    /// beyond its residual norm and no unconverged Ritz pair remains to
    /// re-target.
    #[error("pseudo-locking inconsistency: flag/eval mismatch with no unconverged candidate")]
    PseudoLockInconsistency,

    /// A dense-kernel call (QR, Hermitian eigensolver, Bunch-Kaufman, ...)
    /// underlying the restart failed.
    #[error(transparent)]
    Linalg(#[from] LinalgError),
}
