//! Minimal outer Davidson driver exercising the restart subsystem
//! end-to-end (§6: "this crate provides a minimal, clearly-separated outer
//! driver and SVD wrapper so that the restart subsystem is exercisable and
//! testable end-to-end, but treats their internals as a thin shell around
//! the restart core").
//!
//! The expansion phase and the correction-equation solve are the outer
//! iteration's own business, not the restart subsystem's (§1 Non-goals);
//! this driver implements the simplest expansion available -- a
//! preconditioned residual (plain Davidson, not a full Jacobi-Davidson
//! correction-equation solve) -- so the loop is runnable standalone.

use log::{debug, trace};
use ndarray::{s, Array1, Array2};
use num_traits::{Float, NumCast, Zero};
use thiserror::Error;

use crate::config::RestartConfig;
use crate::eigh::Eigh;
use crate::error::RestartError;
use crate::operator::{LinearOperator, Preconditioner};
use crate::qr::QRInto;
use crate::state::{EigenState, Flag};
use crate::types::*;
use crate::workspace::{size_requirements, Workspace};

/// Converged eigenpairs returned by [`DavidsonSolver::solve`].
pub struct EigenResult<A: Scalar> {
    pub evals: Array1<A::Real>,
    pub evecs: Array2<A>,
    pub res_norms: Array1<A::Real>,
    pub num_outer_iterations: usize,
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("restart subsystem failed")]
    Restart(#[from] RestartError),
    #[error("davidson driver did not converge within {0} outer iterations")]
    NotConverged(usize),
}

/// Plain block-Davidson outer loop: Rayleigh-Ritz extraction, preconditioned-
/// residual expansion, and a call into [`crate::restart::restart`] whenever
/// the basis would outgrow `config.max_basis_size`.
pub struct DavidsonSolver<A: Scalar> {
    config: RestartConfig<A>,
    tol: A::Real,
    max_outer_iterations: usize,
}

impl<A: Scalar + Lapack> DavidsonSolver<A> {
    pub fn new(config: RestartConfig<A>, tol: A::Real, max_outer_iterations: usize) -> Self {
        DavidsonSolver {
            config,
            tol,
            max_outer_iterations,
        }
    }

    /// Solve for `config.num_evals` eigenpairs of the Hermitian operator
    /// `operator`, preconditioned by `preconditioner`, starting from the
    /// (already linearly independent) column space of `initial`.
    pub fn solve<Op, Pc>(
        &self,
        operator: &Op,
        preconditioner: &Pc,
        initial: Array2<A>,
    ) -> Result<EigenResult<A>, DriverError>
    where
        Op: LinearOperator<Elem = A>,
        Pc: Preconditioner<Elem = A>,
    {
        let (v, _r) = initial.qr_into().map_err(RestartError::Linalg)?;
        let basis_size = v.ncols();
        let w = apply_block(operator, &v);
        let h = {
            let vh = crate::generate::conjugate::<A, _, Array2<A>>(&v);
            vh.dot(&w)
        };

        let mut stats = crate::config::RestartStats::default();
        let mut state = EigenState {
            v,
            w,
            h,
            q: None,
            r: None,
            qv: None,
            h_u: Array2::eye(basis_size),
            h_vecs: Array2::eye(basis_size),
            h_vals: Array1::zeros(basis_size),
            h_svals: Array1::zeros(basis_size),
            previous_h_vecs: Array2::zeros((basis_size, 0)),
            num_prev_retained: 0,
            prev_ritz_vals: Array1::zeros(basis_size),
            evecs: Array2::zeros((self.config.n, 0)),
            evals: Array1::zeros(0),
            res_norms: Array1::zeros(0),
            evecs_perm: None,
            evecs_hat: None,
            m: None,
            udu: None,
            flags: vec![Flag::Unconverged; basis_size],
            iev: Vec::new(),
            block_norms: Vec::new(),
            num_converged: 0,
            num_locked: 0,
            num_converged_stored: 0,
            num_guesses: 0,
            num_arbitrary_vecs: 0,
            target_shift_index: 0,
            prev_target_shift: None,
        };

        let mut real_scratch = vec![A::zero(); size_requirements(&self.config, self.config.max_basis_size).real_words];
        let mut int_scratch = vec![0i32; size_requirements(&self.config, self.config.max_basis_size).int_words];

        for outer in 0..self.max_outer_iterations {
            let (h_vals, h_vecs) = state.h.eigh(crate::UPLO::Lower).map_err(RestartError::Linalg)?;
            state.h_vals = h_vals;
            state.h_vecs = h_vecs;

            let ritz_vecs = state.v.dot(&state.h_vecs);
            let ritz_w = state.w.dot(&state.h_vecs);

            let mut iev = Vec::new();
            let mut block_norms = Vec::new();
            for i in 0..state.basis_size() {
                let mut residual = ritz_w.column(i).to_owned();
                let shift = A::from_real(state.h_vals[i]);
                for (r, x) in residual.iter_mut().zip(ritz_vecs.column(i).iter()) {
                    *r = *r - shift * *x;
                }
                let norm = residual
                    .iter()
                    .map(|x| x.abs().powi(2))
                    .fold(A::Real::zero(), |acc, x| acc + x)
                    .sqrt();

                state.flags[i] = if norm < self.tol {
                    Flag::Converged
                } else {
                    Flag::Unconverged
                };

                if state.flags[i] == Flag::Unconverged && iev.len() < self.config.max_block_size {
                    iev.push(i);
                    block_norms.push(norm);
                }
            }
            state.iev = iev.clone();
            state.block_norms = block_norms;
            state.num_converged = state
                .flags
                .iter()
                .take(self.config.num_evals.min(state.basis_size()))
                .filter(|&&f| f != Flag::Unconverged)
                .count();

            debug!(
                "davidson outer iteration {outer}: numConverged={} basisSize={}",
                state.num_converged,
                state.basis_size()
            );

            if state.num_converged >= self.config.num_evals {
                let order: Vec<usize> = (0..self.config.num_evals).collect();
                let mut evals = Array1::zeros(order.len());
                let mut evecs = Array2::zeros((state.v.nrows(), order.len()));
                let mut res_norms = Array1::zeros(order.len());
                for (k, &i) in order.iter().enumerate() {
                    evals[k] = state.h_vals[i];
                    evecs.column_mut(k).assign(&ritz_vecs.column(i));
                    res_norms[k] = {
                        let mut residual = ritz_w.column(i).to_owned();
                        let shift = A::from_real(state.h_vals[i]);
                        for (r, x) in residual.iter_mut().zip(ritz_vecs.column(i).iter()) {
                            *r = *r - shift * *x;
                        }
                        residual
                            .iter()
                            .map(|x| x.abs().powi(2))
                            .fold(A::Real::zero(), |acc, x| acc + x)
                            .sqrt()
                    };
                }
                return Ok(EigenResult {
                    evals,
                    evecs,
                    res_norms,
                    num_outer_iterations: outer,
                });
            }

            // V <- V*hVecs, W <- W*hVecs so the basis is expressed in the
            // current Ritz coordinates before appending new directions.
            state.v = ritz_vecs;
            state.w = ritz_w;
            state.h = Array2::from_diag(&state.h_vals.mapv(A::from_real));

            // Expansion: preconditioned residual block for the current
            // candidates, orthonormalised against V.
            let mut block = Array2::<A>::zeros((state.v.nrows(), state.iev.len()));
            for (k, &i) in state.iev.clone().iter().enumerate() {
                let shift = A::from_real(state.h_vals[i]);
                let mut residual = state.w.column(i).to_owned();
                for (r, x) in residual.iter_mut().zip(state.v.column(i).iter()) {
                    *r = *r - shift * *x;
                }
                block.column_mut(k).assign(&residual);
            }
            preconditioner.apply_mut(&mut block);
            let added = orthonormalize_block(&state.v, &block, self.config.mach_eps);

            if !added.is_empty() {
                let new_width = state.basis_size() + added.ncols();
                let mut new_v = Array2::zeros((state.v.nrows(), new_width));
                new_v.slice_mut(s![.., ..state.basis_size()]).assign(&state.v);
                new_v.slice_mut(s![.., state.basis_size()..]).assign(&added);
                let new_w_block = apply_block(operator, &added);
                let mut new_w = Array2::zeros((state.w.nrows(), new_width));
                new_w.slice_mut(s![.., ..state.basis_size()]).assign(&state.w);
                new_w.slice_mut(s![.., state.basis_size()..]).assign(&new_w_block);

                let vh: Array2<A> = crate::generate::conjugate(&new_v);
                let new_h = vh.dot(&new_w);

                state.v = new_v;
                state.w = new_w;
                state.h = new_h;
                state.h_u = Array2::eye(new_width);
                state.h_vecs = Array2::eye(new_width);
                state.h_vals = Array1::zeros(new_width);
                state.h_svals = Array1::zeros(new_width);
                state.flags.resize(new_width, Flag::Unconverged);
            }

            if state.basis_size() > self.config.max_basis_size {
                let mut ws = Workspace::new(&mut real_scratch, &mut int_scratch);
                crate::restart::restart(&mut state, &self.config, &mut stats, preconditioner, &mut ws)?;
            }
        }

        Err(DriverError::NotConverged(self.max_outer_iterations))
    }
}

/// Apply `operator` to every column of `block`, returning a freshly
/// allocated result (`W = A V`, column by column).
fn apply_block<A: Scalar + Lapack, Op: LinearOperator<Elem = A>>(
    operator: &Op,
    block: &Array2<A>,
) -> Array2<A> {
    let mut out = block.clone();
    for mut col in out.columns_mut() {
        operator.apply_mut(&mut col);
    }
    out
}

/// Classical Gram-Schmidt (twice) of `block`'s columns against `basis`'s
/// columns and against each other, dropping columns that turn out
/// linearly dependent rather than redrawing (unlike
/// [`crate::restart::coeff_reortho`], a dependent expansion direction here
/// just means one fewer new direction, not a retry).
fn orthonormalize_block<A: Scalar + Lapack>(
    basis: &Array2<A>,
    block: &Array2<A>,
    mach_eps: A::Real,
) -> Array2<A> {
    let dim = basis.nrows();
    let tol: A::Real = mach_eps * NumCast::from(dim.max(1)).unwrap();
    let mut accepted: Vec<Array1<A>> = Vec::new();

    for col in block.columns() {
        let mut v = col.to_owned();
        for _pass in 0..2 {
            for q in basis.columns().into_iter().chain(accepted.iter().map(|a| a.view())) {
                let c: A = q
                    .iter()
                    .zip(v.iter())
                    .map(|(&qi, &vi)| qi.conj() * vi)
                    .fold(A::zero(), |acc, x| acc + x);
                for i in 0..dim {
                    v[i] = v[i] - c * q[i];
                }
            }
        }
        let norm = v
            .iter()
            .map(|x| x.abs().powi(2))
            .fold(A::Real::zero(), |acc, x| acc + x)
            .sqrt();
        if norm > tol {
            let scale = A::from_real(norm.recip());
            for x in v.iter_mut() {
                *x = *x * scale;
            }
            accepted.push(v);
        }
    }

    let mut out = Array2::zeros((dim, accepted.len()));
    for (k, v) in accepted.into_iter().enumerate() {
        out.column_mut(k).assign(&v);
    }
    out
}
