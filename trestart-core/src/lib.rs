//! `trestart-core` implements the restart subsystem of an iterative
//! Davidson/Jacobi-Davidson eigensolver for large sparse Hermitian matrices:
//! given a basis that has grown past its allotted size, it compresses the
//! basis (and its projected operator, and any auxiliary skew-projector
//! state) down to a smaller one spanning the same Ritz pairs worth keeping,
//! without ever materialising the original matrix `A` -- only matrix-vector
//! products through [`operator::LinearOperator`] are required.
//!
//! Linear algebra methods
//! -----------------------
//! - Decomposition methods:
//!     - [QR decomposition](qr/index.html)
//!     - [Cholesky/LU decomposition](cholesky/index.html)
//!     - [Eigenvalue decomposition](eig/index.html)
//!     - [Eigenvalue decomposition for Hermite matrices](eigh/index.html)
//!     - [**S**ingular **V**alue **D**ecomposition](svd/index.html)
//! - Solution of linear systems:
//!    - [General matrices](solve/index.html)
//!    - [Triangular matrices](triangular/index.html)
//!    - [Hermitian/real symmetric matrices](solveh/index.html)
//!    - [Tridiagonal matrices](tridiagonal/index.html)
//! - [Inverse matrix computation](solve/trait.Inverse.html)
//!
//! Restart subsystem
//! -----------------------
//! - [`restart::restart`] is the entry point: given an [`state::EigenState`]
//!   and a [`config::RestartConfig`], it compresses the basis in place
//!   according to the configured [`config::Projection`] and
//!   [`config::RestartScheme`].
//! - [`driver::DavidsonSolver`] is a minimal outer driver exercising the
//!   restart subsystem end-to-end.
//! - [`svd_driver::truncated_svd`] reformulates a singular value problem as
//!   a Hermitian eigenproblem and drives it through the same machinery.
//!
//! Naming Convention
//! -----------------------
//! Each routine is usually exposed as a trait, implemented by the relevant types.
//!
//! For each routine there might be multiple "variants": different traits corresponding to the different ownership possibilities of the array you intend to work on.
//!
//! For example, if you are interested in the QR decomposition of a square matrix, you can use:
//! - [QRSquare](qr/trait.QRSquare.html), if you hold an immutable reference (i.e. `&self`) to the matrix you want to decompose;
//! - [QRSquareInplace](qr/trait.QRSquareInplace.html), if you hold a mutable reference (i.e. `&mut self`) to the matrix you want to decompose;
//! - [QRSquareInto](qr/trait.QRSquareInto.html), if you can pass the matrix you want to decompose by value (e.g. `self`).
//!
//! Depending on the algorithm, each variant might require more or less copy operations of the underlying data.
//!
//! Details are provided in the description of each routine.
//!
//!  Utilities
//!  -----------
//!  - [Assertions for array](index.html#macros)
//!  - [Random matrix generators](generate/index.html)
//!  - [Scalar trait](types/trait.Scalar.html)

#![allow(
    clippy::module_inception,
    clippy::many_single_char_names,
    clippy::type_complexity,
    clippy::ptr_arg
)]
#![deny(rustdoc::broken_intra_doc_links, rustdoc::private_intra_doc_links)]

#[macro_use]
extern crate ndarray;

pub mod assert;
pub mod cholesky;
pub mod config;
pub mod convert;
pub mod diagonal;
pub mod driver;
pub mod eig;
pub mod eigh;
pub mod error;
pub mod expm;
pub mod generate;
pub mod inner;
pub mod krylov;
pub mod layout;
pub mod least_squares;
pub mod lobpcg;
pub mod norm;
pub mod normest1;
pub mod operator;
pub mod opnorm;
pub mod perm;
pub mod qr;
pub mod restart;
pub mod solve;
pub mod solveh;
pub mod state;
pub mod svd;
pub mod svd_driver;
pub mod svddc;
pub mod trace;
pub mod triangular;
pub mod tridiagonal;
pub mod types;
pub mod workspace;

pub use crate::assert::*;
pub use crate::cholesky::*;
pub use crate::config::{Locking, Projection, RestartConfig, RestartScheme, RestartStats, Target};
pub use crate::convert::*;
pub use crate::diagonal::*;
pub use crate::driver::{DavidsonSolver, DriverError, EigenResult};
pub use crate::eig::*;
pub use crate::eigh::*;
pub use crate::generate::*;
pub use crate::inner::*;
pub use crate::layout::*;
pub use crate::least_squares::*;
pub use crate::lobpcg::{TruncatedEig, TruncatedOrder, TruncatedSvd};
pub use crate::norm::*;
pub use crate::operator::*;
pub use crate::opnorm::*;
pub use crate::qr::*;
pub use crate::restart::restart;
pub use crate::solve::*;
pub use crate::solveh::*;
pub use crate::state::{EigenState, Flag};
pub use crate::svd::*;
pub use crate::svd_driver::{truncated_svd, RectangularOperator, SingularTriplets, SvdError, SvdStage};
pub use crate::svddc::*;
pub use crate::trace::*;
pub use crate::triangular::*;
pub use crate::tridiagonal::*;
pub use crate::types::*;
pub use crate::workspace::{size_requirements, Workspace, WorkspaceSize};
// pub use crate::expm::*;
