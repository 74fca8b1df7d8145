//! Sample covariance of row-major observations.

use crate::matrix::SymmetricMatrix;

/// Per-column arithmetic means of row-major observations.
///
/// Returns `None` for an empty input.
///
/// # Panics
///
/// Panics if the rows have different lengths.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn column_means<R>(rows: &[R]) -> Option<Vec<f64>>
where
    R: AsRef<[f64]>,
{
    let dim = rows.first()?.as_ref().len();
    let mut means = vec![0.0; dim];
    for row in rows {
        let row = row.as_ref();
        assert_eq!(row.len(), dim, "all observations must have the same dimension");
        for (mean, value) in means.iter_mut().zip(row) {
            *mean += value;
        }
    }
    let n = rows.len() as f64;
    for mean in &mut means {
        *mean /= n;
    }
    Some(means)
}

/// Computes the unbiased sample covariance matrix (divided by `n - 1`).
///
/// Each element of `rows` is one observation; its entries are the variables.
///
/// # Returns
///
/// * `Some(matrix)` - if there are at least two observations
/// * `None` - otherwise, since the unbiased estimator is undefined
///
/// # Examples
///
/// ```
/// use maturity_stats::covariance::sample_covariance;
///
/// let cov = sample_covariance(&[[1.0, 2.0], [3.0, 6.0]]).unwrap();
/// assert_eq!(cov[(0, 0)], 2.0);
/// assert_eq!(cov[(0, 1)], 4.0);
/// assert_eq!(cov[(1, 1)], 8.0);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn sample_covariance<R>(rows: &[R]) -> Option<SymmetricMatrix>
where
    R: AsRef<[f64]>,
{
    if rows.len() < 2 {
        return None;
    }
    let means = column_means(rows)?;
    let dim = means.len();
    let mut cov = SymmetricMatrix::zeros(dim);
    for row in rows {
        let row = row.as_ref();
        for i in 0..dim {
            let di = row[i] - means[i];
            for j in i..dim {
                cov[(i, j)] += di * (row[j] - means[j]);
            }
        }
    }
    let denom = (rows.len() - 1) as f64;
    for i in 0..dim {
        for j in i..dim {
            let value = cov[(i, j)] / denom;
            cov.set(i, j, value);
        }
    }
    Some(cov)
}
