//! End-to-end `DavidsonSolver` scenarios (§8 "End-to-end scenarios" 1-2).

use ndarray::Array2;
use trestart_core::*;

/// Dense 1-D Laplacian (tridiagonal `2I - shift(1) - shift(-1)`), a standard
/// well-conditioned Hermitian test matrix.
fn laplacian(n: usize) -> Array2<f64> {
    let mut a = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        a[(i, i)] = 2.0;
        if i + 1 < n {
            a[(i, i + 1)] = -1.0;
            a[(i + 1, i)] = -1.0;
        }
    }
    a
}

/// Scenario 1: smallest eigenvalues of a 1-D Laplacian, Rayleigh-Ritz
/// extraction, no locking.
#[test]
fn smallest_eigenvalues_of_laplacian() {
    let n = 40;
    let num_evals = 4;
    let a = laplacian(n);

    let config = RestartConfig {
        n,
        num_ortho_const: 0,
        max_basis_size: 20,
        min_restart_size: 10,
        max_block_size: 2,
        num_evals,
        target: Target::Smallest,
        projection: Projection::RayleighRitz,
        scheme: RestartScheme::Fixed,
        locking: Locking::Soft,
        mach_eps: f64::EPSILON,
        target_shifts: vec![0.0],
        skew_preconditioning: false,
    };

    let solver = DavidsonSolver::new(config, 1e-7, 500);
    let initial: Array2<f64> = random((n, num_evals + 2));
    let result = solver
        .solve(&a, &IdentityPreconditioner::<f64>::new(), initial)
        .expect("davidson solve should converge on a well-conditioned Laplacian");

    // Reference: the k smallest eigenvalues of the 1-D Laplacian are
    // `2 - 2*cos(i*pi/(n+1))` for `i = 1..=k`.
    let mut expected: Vec<f64> = (1..=num_evals)
        .map(|i| 2.0 - 2.0 * ((i as f64) * std::f64::consts::PI / ((n + 1) as f64)).cos())
        .collect();
    expected.sort_by(|x, y| x.partial_cmp(y).unwrap());

    let mut got: Vec<f64> = result.evals.iter().copied().collect();
    got.sort_by(|x, y| x.partial_cmp(y).unwrap());

    for (g, e) in got.iter().zip(expected.iter()) {
        assert!((g - e).abs() < 1e-5, "eigenvalue mismatch: got {g}, expected {e}");
    }
    for &r in result.res_norms.iter() {
        assert!(r < 1e-5, "residual norm {r} too large");
    }
}

/// Scenario 2: same matrix with hard locking enabled -- locked eigenvectors
/// stay orthonormal and the solver still converges.
#[test]
fn hard_locking_keeps_locked_evecs_orthonormal() {
    let n = 36;
    let num_evals = 3;
    let a = laplacian(n);

    let config = RestartConfig {
        n,
        num_ortho_const: 0,
        max_basis_size: 18,
        min_restart_size: 8,
        max_block_size: 2,
        num_evals,
        target: Target::Smallest,
        projection: Projection::RayleighRitz,
        scheme: RestartScheme::Fixed,
        locking: Locking::Hard,
        mach_eps: f64::EPSILON,
        target_shifts: vec![0.0],
        skew_preconditioning: false,
    };

    let solver = DavidsonSolver::new(config, 1e-7, 500);
    let initial: Array2<f64> = random((n, num_evals + 2));
    let result = solver
        .solve(&a, &IdentityPreconditioner::<f64>::new(), initial)
        .expect("davidson solve with hard locking should converge");

    assert_eq!(result.evecs.ncols(), num_evals);

    let evh: Array2<f64> = generate::conjugate(&result.evecs);
    let gram = evh.dot(&result.evecs);
    let dev = (&gram - &Array2::eye(num_evals)).iter().map(|x| x * x).sum::<f64>().sqrt();
    assert!(dev < 1e-8, "converged eigenvectors not orthonormal: {dev}");
}
