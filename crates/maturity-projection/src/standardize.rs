//! Variance-stabilizing transform and feature standardization.

use maturity_stats::descriptive::DescriptiveStats;

/// `ln(1 + x)` applied to a non-negative count.
///
/// Negative inputs are clamped to zero first: every metric is a count or a
/// duration, and `ln(1 + x)` is undefined below `-1`.
#[must_use]
pub fn log1p_count(value: f64) -> f64 {
    value.max(0.0).ln_1p()
}

/// Per-feature centering and scaling learned from a dataset.
///
/// Uses the population standard deviation. A constant feature keeps scale
/// `1.0`, so it standardizes to all zeros instead of dividing by zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Standardizer {
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl Standardizer {
    /// Learns means and scales column by column.
    ///
    /// Returns `None` for an empty dataset.
    ///
    /// # Examples
    ///
    /// ```
    /// use maturity_projection::standardize::Standardizer;
    ///
    /// let rows = [[1.0, 5.0], [3.0, 5.0]];
    /// let standardizer = Standardizer::fit(&rows).unwrap();
    /// assert_eq!(standardizer.transform(&[1.0, 5.0]), vec![-1.0, 0.0]);
    /// assert_eq!(standardizer.transform(&[3.0, 5.0]), vec![1.0, 0.0]);
    /// ```
    #[must_use]
    pub fn fit<R>(rows: &[R]) -> Option<Self>
    where
        R: AsRef<[f64]>,
    {
        let dim = rows.first()?.as_ref().len();
        let (means, scales) = (0..dim)
            .map(|j| {
                let stats = DescriptiveStats::new(rows.iter().map(|row| row.as_ref()[j]))?;
                let scale = if stats.std_dev > 0.0 {
                    stats.std_dev
                } else {
                    1.0
                };
                Some((stats.mean, scale))
            })
            .collect::<Option<Vec<_>>>()?
            .into_iter()
            .unzip();
        Some(Self { means, scales })
    }

    #[must_use]
    pub fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.means.iter().zip(&self.scales))
            .map(|(value, (mean, scale))| (value - mean) / scale)
            .collect()
    }
}
