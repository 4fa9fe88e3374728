//! Small dense linear algebra for the surrogate-model fit
//!
//! The systems solved here are tiny (one row/column per unique token of a
//! single short input), so a plain normal-equations assembly and Gaussian
//! elimination are sufficient.

use polarity_core::{Error, Result};

/// Fit a weighted ridge regression with intercept.
///
/// Returns `[intercept, coef_0, .., coef_{d-1}]`. The intercept is not
/// penalized. `lambda` must be positive, which keeps the normal-equations
/// matrix positive definite even for degenerate designs.
pub fn weighted_ridge_fit(
    x: &[Vec<f64>],
    y: &[f64],
    sample_weights: &[f64],
    lambda: f64,
) -> Result<Vec<f64>> {
    let n = x.len();
    if n == 0 || y.len() != n || sample_weights.len() != n {
        return Err(Error::internal("ridge fit called with mismatched inputs"));
    }
    let d = x[0].len();

    // Augmented design: column 0 is the intercept.
    let dim = d + 1;
    let mut a = vec![vec![0.0; dim]; dim];
    let mut b = vec![0.0; dim];

    for (row, (&target, &w)) in x.iter().zip(y.iter().zip(sample_weights)) {
        if row.len() != d {
            return Err(Error::internal("ridge fit called with ragged design"));
        }
        for i in 0..dim {
            let xi = if i == 0 { 1.0 } else { row[i - 1] };
            b[i] += w * xi * target;
            for j in i..dim {
                let xj = if j == 0 { 1.0 } else { row[j - 1] };
                a[i][j] += w * xi * xj;
            }
        }
    }

    // Mirror the upper triangle and apply the ridge penalty (skip intercept).
    for i in 0..dim {
        for j in 0..i {
            a[i][j] = a[j][i];
        }
        if i > 0 {
            a[i][i] += lambda;
        }
    }

    solve(a, b)
}

/// Solve `A x = b` by Gaussian elimination with partial pivoting.
pub fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>> {
    let n = b.len();

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&i, &j| {
                a[i][col]
                    .abs()
                    .partial_cmp(&a[j][col].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .ok_or_else(|| Error::internal("empty system"))?;

        if a[pivot_row][col].abs() < 1e-12 {
            return Err(Error::explanation("surrogate fit produced a singular system"));
        }

        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        for row in (col + 1)..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let mut acc = b[row];
        for k in (row + 1)..n {
            acc -= a[row][k] * x[k];
        }
        x[row] = acc / a[row][row];
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_identity() {
        let a = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let x = solve(a, vec![3.0, -2.0]).unwrap();
        assert!((x[0] - 3.0).abs() < 1e-9);
        assert!((x[1] + 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_solve_requires_pivoting() {
        // zero on the first diagonal entry
        let a = vec![vec![0.0, 1.0], vec![2.0, 0.0]];
        let x = solve(a, vec![5.0, 4.0]).unwrap();
        assert!((x[0] - 2.0).abs() < 1e-9);
        assert!((x[1] - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_solve_singular_system_errors() {
        let a = vec![vec![1.0, 1.0], vec![1.0, 1.0]];
        assert!(solve(a, vec![1.0, 2.0]).is_err());
    }

    #[test]
    fn test_ridge_recovers_a_linear_signal() {
        // y = 0.1 + 0.8 * x0, second feature is noise-free zero signal
        let x: Vec<Vec<f64>> = vec![
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 1.0],
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 1.0],
        ];
        let y: Vec<f64> = x.iter().map(|r| 0.1 + 0.8 * r[0]).collect();
        let w = vec![1.0; x.len()];

        let beta = weighted_ridge_fit(&x, &y, &w, 0.001).unwrap();
        assert!((beta[1] - 0.8).abs() < 0.01, "coef_0 = {}", beta[1]);
        assert!(beta[2].abs() < 0.01, "coef_1 = {}", beta[2]);
    }

    #[test]
    fn test_ridge_handles_constant_columns() {
        // a column that never varies would be singular without the penalty
        let x = vec![vec![1.0, 1.0], vec![0.0, 1.0], vec![1.0, 1.0]];
        let y = vec![1.0, 0.0, 1.0];
        let w = vec![1.0; 3];
        assert!(weighted_ridge_fit(&x, &y, &w, 1.0).is_ok());
    }
}
