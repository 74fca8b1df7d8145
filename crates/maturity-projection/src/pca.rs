//! Principal component analysis via eigendecomposition of the sample
//! covariance matrix.

use maturity_stats::{covariance, eigen::SymmetricEigen};

/// A fitted linear projection onto the leading principal axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Pca {
    mean: Vec<f64>,
    components: Vec<Vec<f64>>,
    explained_variance: Vec<f64>,
    explained_variance_ratio: Vec<f64>,
}

impl Pca {
    /// Fits the first `n_components` principal axes of `rows`.
    ///
    /// Each component is a unit vector whose largest-magnitude entry is
    /// positive, so the output does not depend on the eigensolver's sign
    /// choice. The explained-variance ratio of a component is its eigenvalue
    /// divided by the sum of all eigenvalues (`0.0` when the data has no
    /// variance at all).
    ///
    /// # Returns
    ///
    /// * `Some(pca)` - if there are at least two observations
    /// * `None` - otherwise, since the sample covariance is undefined
    ///
    /// # Panics
    ///
    /// Panics if `n_components` exceeds the dimension of the rows.
    ///
    /// # Examples
    ///
    /// ```
    /// use maturity_projection::pca::Pca;
    ///
    /// let rows = [[1.0, 2.0], [2.0, 4.0], [3.0, 6.0]];
    /// let pca = Pca::fit(&rows, 1).unwrap();
    /// assert!((pca.explained_variance_ratio()[0] - 1.0).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn fit<R>(rows: &[R], n_components: usize) -> Option<Self>
    where
        R: AsRef<[f64]>,
    {
        let cov = covariance::sample_covariance(rows)?;
        let mean = covariance::column_means(rows)?;
        assert!(
            n_components <= cov.dim(),
            "cannot extract {n_components} components from {} features",
            cov.dim()
        );

        let eigen = SymmetricEigen::decompose(&cov);
        let total = eigen.values.iter().map(|v| v.max(0.0)).sum::<f64>();

        let components = eigen
            .vectors
            .iter()
            .take(n_components)
            .map(|v| fix_sign(v))
            .collect();
        let explained_variance = eigen
            .values
            .iter()
            .take(n_components)
            .map(|v| v.max(0.0))
            .collect::<Vec<_>>();
        let explained_variance_ratio = explained_variance
            .iter()
            .map(|v| if total > 0.0 { v / total } else { 0.0 })
            .collect();

        Some(Self {
            mean,
            components,
            explained_variance,
            explained_variance_ratio,
        })
    }

    /// Principal axes, leading first. Each has one entry per feature.
    #[must_use]
    pub fn components(&self) -> &[Vec<f64>] {
        &self.components
    }

    #[must_use]
    pub fn explained_variance(&self) -> &[f64] {
        &self.explained_variance
    }

    #[must_use]
    pub fn explained_variance_ratio(&self) -> &[f64] {
        &self.explained_variance_ratio
    }

    /// Coordinates of `row` along each principal axis.
    #[must_use]
    pub fn transform(&self, row: &[f64]) -> Vec<f64> {
        self.components
            .iter()
            .map(|axis| {
                axis.iter()
                    .zip(row.iter().zip(&self.mean))
                    .map(|(w, (x, m))| w * (x - m))
                    .sum()
            })
            .collect()
    }
}

fn fix_sign(vector: &[f64]) -> Vec<f64> {
    let pivot = vector
        .iter()
        .copied()
        .reduce(|acc, v| if v.abs() > acc.abs() { v } else { acc })
        .unwrap_or(0.0);
    if pivot < 0.0 {
        vector.iter().map(|v| -v).collect()
    } else {
        vector.to_vec()
    }
}
