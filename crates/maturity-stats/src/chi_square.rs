//! Quantiles of the chi-square distribution.
//!
//! Only the two-degrees-of-freedom case is needed: it governs confidence
//! regions of bivariate normal data, and its CDF `1 - exp(-x / 2)` inverts in
//! closed form.

/// Quantile (inverse CDF) of the chi-square distribution with two degrees of
/// freedom.
///
/// Returns `NaN` for `p` outside `[0, 1]`.
///
/// # Examples
///
/// ```
/// use maturity_stats::chi_square::quantile_df2;
///
/// assert!((quantile_df2(0.95) - 5.991_464_547).abs() < 1e-8);
/// ```
#[must_use]
pub fn quantile_df2(p: f64) -> f64 {
    if !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    -2.0 * (-p).ln_1p()
}

/// Scale factor applied to the square roots of covariance eigenvalues to
/// obtain the semi-axes of a `confidence` bivariate normal region.
///
/// ```
/// use maturity_stats::chi_square::confidence_scale_2d;
///
/// assert!((confidence_scale_2d(0.95) - 2.4477).abs() < 1e-4);
/// ```
#[must_use]
pub fn confidence_scale_2d(confidence: f64) -> f64 {
    quantile_df2(confidence).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert_eq!(quantile_df2(0.0), 0.0);
        assert_eq!(quantile_df2(1.0), f64::INFINITY);
        assert!(quantile_df2(-0.1).is_nan());
        assert!(quantile_df2(1.1).is_nan());
    }

    #[test]
    fn test_median() {
        assert!((quantile_df2(0.5) - 2.0 * std::f64::consts::LN_2).abs() < 1e-12);
    }
}
