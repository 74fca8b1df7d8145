//! Eigendecomposition of small dense symmetric matrices.
//!
//! Uses the cyclic Jacobi method: every sweep annihilates each off-diagonal
//! entry in turn with a plane rotation, and the accumulated rotations are the
//! eigenvectors. It is slow for large matrices but exact enough for the 2×2
//! and 11×11 covariance matrices this workspace decomposes, and it keeps
//! exact zeros exact (a rank-deficient 2×2 matrix with representable entries
//! yields a zero eigenvalue, not a rounding residue).

use crate::matrix::SymmetricMatrix;

const MAX_SWEEPS: usize = 64;

/// Eigenvalues and eigenvectors of a symmetric matrix.
///
/// Eigenvalues are sorted in descending order; `vectors[i]` is the unit
/// eigenvector belonging to `values[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetricEigen {
    pub values: Vec<f64>,
    pub vectors: Vec<Vec<f64>>,
}

impl SymmetricEigen {
    /// Decomposes a symmetric matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// use maturity_stats::{eigen::SymmetricEigen, matrix::SymmetricMatrix};
    ///
    /// let m = SymmetricMatrix::from_rows(&[[2.0, 1.0], [1.0, 2.0]]);
    /// let eigen = SymmetricEigen::decompose(&m);
    /// assert!((eigen.values[0] - 3.0).abs() < 1e-12);
    /// assert!((eigen.values[1] - 1.0).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn decompose(matrix: &SymmetricMatrix) -> Self {
        let n = matrix.dim();
        let mut a = matrix.clone();
        let mut v = SymmetricMatrix::identity(n);

        let scale = matrix.frobenius_norm();
        if scale > 0.0 && scale.is_finite() {
            for _ in 0..MAX_SWEEPS {
                if a.off_diagonal_norm() <= f64::EPSILON * scale {
                    break;
                }
                for p in 0..n {
                    for q in (p + 1)..n {
                        rotate(&mut a, &mut v, p, q);
                    }
                }
            }
        }

        let mut order = (0..n).collect::<Vec<_>>();
        order.sort_by(|&i, &j| a[(j, j)].total_cmp(&a[(i, i)]).then(i.cmp(&j)));

        let values = order.iter().map(|&i| a[(i, i)]).collect();
        let vectors = order
            .iter()
            .map(|&i| (0..n).map(|k| v[(k, i)]).collect())
            .collect();
        Self { values, vectors }
    }

    /// Numerical rank: the number of eigenvalues whose magnitude exceeds
    /// `max|λ| · n · ε`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn rank(&self) -> usize {
        let largest = self.values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        let tolerance = largest * self.values.len() as f64 * f64::EPSILON;
        self.values.iter().filter(|v| v.abs() > tolerance).count()
    }
}

/// Applies one Jacobi rotation that zeroes `a[(p, q)]`.
fn rotate(a: &mut SymmetricMatrix, v: &mut SymmetricMatrix, p: usize, q: usize) {
    let apq = a[(p, q)];
    if apq == 0.0 {
        return;
    }
    let app = a[(p, p)];
    let aqq = a[(q, q)];

    let theta = (aqq - app) / (2.0 * apq);
    let t = if theta == 0.0 {
        1.0
    } else {
        theta.signum() / (theta.abs() + theta.mul_add(theta, 1.0).sqrt())
    };
    let c = 1.0 / t.mul_add(t, 1.0).sqrt();
    let s = t * c;

    for k in 0..a.dim() {
        if k == p || k == q {
            continue;
        }
        let akp = a[(k, p)];
        let akq = a[(k, q)];
        a.set(k, p, c * akp - s * akq);
        a.set(k, q, s * akp + c * akq);
    }
    a[(p, p)] = app - t * apq;
    a[(q, q)] = aqq + t * apq;
    a.set(p, q, 0.0);

    for k in 0..v.dim() {
        let vkp = v[(k, p)];
        let vkq = v[(k, q)];
        v[(k, p)] = c * vkp - s * vkq;
        v[(k, q)] = s * vkp + c * vkq;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_eigenpair(m: &SymmetricMatrix, value: f64, vector: &[f64]) {
        for i in 0..m.dim() {
            let mv = (0..m.dim()).map(|j| m[(i, j)] * vector[j]).sum::<f64>();
            assert!(
                (mv - value * vector[i]).abs() < 1e-9,
                "row {i}: {mv} != {value} * {}",
                vector[i]
            );
        }
        let norm = vector.iter().map(|x| x * x).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_diagonal_matrix_sorted_descending() {
        let m = SymmetricMatrix::from_rows(&[[1.0, 0.0, 0.0], [0.0, 5.0, 0.0], [0.0, 0.0, 3.0]]);
        let eigen = SymmetricEigen::decompose(&m);
        assert_eq!(eigen.values, vec![5.0, 3.0, 1.0]);
        assert_eq!(eigen.vectors[0], vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_rank_deficient_2x2_has_exact_zero() {
        let m = SymmetricMatrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]]);
        let eigen = SymmetricEigen::decompose(&m);
        assert!((eigen.values[0] - 5.0).abs() < 1e-12);
        assert!(eigen.values[1].abs() < 1e-12);
        assert_eq!(eigen.rank(), 1);
    }

    #[test]
    fn test_zero_matrix() {
        let eigen = SymmetricEigen::decompose(&SymmetricMatrix::zeros(2));
        assert_eq!(eigen.values, vec![0.0, 0.0]);
        assert_eq!(eigen.rank(), 0);
    }

    #[test]
    fn test_dense_eigenpairs() {
        let m = SymmetricMatrix::from_rows(&[
            [4.0, 1.0, -2.0, 2.0],
            [1.0, 2.0, 0.0, 1.0],
            [-2.0, 0.0, 3.0, -2.0],
            [2.0, 1.0, -2.0, -1.0],
        ]);
        let eigen = SymmetricEigen::decompose(&m);
        assert!(eigen.values.is_sorted_by(|a, b| a >= b));
        assert!((eigen.values.iter().sum::<f64>() - m.trace()).abs() < 1e-9);
        for (value, vector) in eigen.values.iter().zip(&eigen.vectors) {
            assert_eigenpair(&m, *value, vector);
        }
        assert_eq!(eigen.rank(), 4);
    }
}
