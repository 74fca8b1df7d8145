//! Confidence ellipses for two-dimensional point clouds.
//!
//! Under a bivariate-normal assumption, the `c`-confidence region of a point
//! cloud is an ellipse centered on the sample mean whose axes follow the
//! eigenvectors of the sample covariance matrix. Semi-axis `i` has length
//! `k · sqrt(λ_i)`, where `k² ` is the `c` quantile of the chi-square
//! distribution with two degrees of freedom.
//!
//! Fitting can fail for ordinary data (a class with two members, or whose
//! members are collinear), so [`fit_confidence_ellipse`] returns an
//! [`EllipseFit`] that carries the reason an ellipse is absent instead of an
//! error.

use maturity_stats::{chi_square, covariance, eigen::SymmetricEigen};
use serde::Serialize;

/// Fewest points for which a sample covariance exists.
pub const MIN_FIT_POINTS: usize = 2;

/// Parameters of the ellipse fitting policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EllipseConfig {
    /// Fewest points a class needs before an ellipse is fitted.
    ///
    /// Values below [`MIN_FIT_POINTS`] behave as [`MIN_FIT_POINTS`].
    pub min_points: usize,
    /// Semi-axis scale `k`, multiplied by `sqrt(λ)`.
    pub k: f64,
}

impl Default for EllipseConfig {
    /// 95% confidence region; classes with fewer than three points get no
    /// ellipse.
    fn default() -> Self {
        Self {
            min_points: 3,
            k: chi_square::confidence_scale_2d(0.95),
        }
    }
}

impl EllipseConfig {
    /// Config for a `confidence` region with the default point threshold.
    #[must_use]
    pub fn with_confidence(confidence: f64) -> Self {
        Self {
            k: chi_square::confidence_scale_2d(confidence),
            ..Self::default()
        }
    }
}

/// A fitted ellipse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceEllipse {
    pub center: [f64; 2],
    pub semi_major: f64,
    pub semi_minor: f64,
    /// Rotation of the major axis from the positive x axis, in radians.
    pub angle: f64,
}

impl ConfidenceEllipse {
    /// Full length of the major axis.
    #[must_use]
    pub fn width(&self) -> f64 {
        2.0 * self.semi_major
    }

    /// Full length of the minor axis.
    #[must_use]
    pub fn height(&self) -> f64 {
        2.0 * self.semi_minor
    }

    #[must_use]
    pub fn angle_degrees(&self) -> f64 {
        self.angle.to_degrees()
    }
}

/// Outcome of fitting an ellipse to one point cloud.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EllipseFit {
    Fitted(ConfidenceEllipse),
    /// The cloud has fewer points than the policy requires.
    TooFewPoints { count: usize, required: usize },
    /// The covariance matrix has a non-finite entry.
    NonFinite,
    /// The covariance matrix has rank below 2: all points are identical or
    /// collinear.
    Degenerate,
}

impl EllipseFit {
    #[must_use]
    pub fn ellipse(&self) -> Option<&ConfidenceEllipse> {
        match self {
            Self::Fitted(ellipse) => Some(ellipse),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_fitted(&self) -> bool {
        matches!(self, Self::Fitted(_))
    }
}

/// Fits a confidence ellipse to `points`.
///
/// # Examples
///
/// ```
/// use maturity_projection::ellipse::{EllipseConfig, EllipseFit, fit_confidence_ellipse};
///
/// let config = EllipseConfig::default();
///
/// let collinear = [[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]];
/// assert_eq!(fit_confidence_ellipse(&collinear, &config), EllipseFit::Degenerate);
///
/// let triangle = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
/// let fit = fit_confidence_ellipse(&triangle, &config);
/// let ellipse = fit.ellipse().unwrap();
/// assert!(ellipse.semi_major > 0.0 && ellipse.semi_minor > 0.0);
/// ```
#[must_use]
pub fn fit_confidence_ellipse(points: &[[f64; 2]], config: &EllipseConfig) -> EllipseFit {
    let required = config.min_points.max(MIN_FIT_POINTS);
    if points.len() < required {
        return EllipseFit::TooFewPoints {
            count: points.len(),
            required,
        };
    }
    let (Some(cov), Some(mean)) = (
        covariance::sample_covariance(points),
        covariance::column_means(points),
    ) else {
        return EllipseFit::TooFewPoints {
            count: points.len(),
            required,
        };
    };
    if !cov.is_finite() {
        return EllipseFit::NonFinite;
    }

    let eigen = SymmetricEigen::decompose(&cov);
    if eigen.rank() < 2 {
        return EllipseFit::Degenerate;
    }

    let major = &eigen.vectors[0];
    EllipseFit::Fitted(ConfidenceEllipse {
        center: [mean[0], mean[1]],
        semi_major: config.k * eigen.values[0].max(0.0).sqrt(),
        semi_minor: config.k * eigen.values[1].max(0.0).sqrt(),
        angle: major[1].atan2(major[0]),
    })
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;

    fn unit_config() -> EllipseConfig {
        EllipseConfig {
            min_points: 3,
            k: 1.0,
        }
    }

    #[test]
    fn test_default_scale() {
        assert!((EllipseConfig::default().k - 2.4477).abs() < 1e-4);
        assert_eq!(EllipseConfig::default().min_points, 3);
    }

    #[test]
    fn test_collinear_points_are_degenerate() {
        let points = [[0.0, 1.0], [1.0, 3.0], [2.0, 5.0]];
        assert_eq!(
            fit_confidence_ellipse(&points, &EllipseConfig::default()),
            EllipseFit::Degenerate
        );
    }

    #[test]
    fn test_identical_points_are_degenerate() {
        let points = [[4.0, 4.0]; 5];
        assert_eq!(
            fit_confidence_ellipse(&points, &EllipseConfig::default()),
            EllipseFit::Degenerate
        );
    }

    #[test]
    fn test_non_collinear_points_fit() {
        let points = [[0.0, 0.0], [3.0, 1.0], [1.0, 4.0]];
        let fit = fit_confidence_ellipse(&points, &EllipseConfig::default());
        let ellipse = fit.ellipse().unwrap();
        assert!(ellipse.semi_major.is_finite() && ellipse.semi_major > 0.0);
        assert!(ellipse.semi_minor.is_finite() && ellipse.semi_minor > 0.0);
        assert!(ellipse.semi_major >= ellipse.semi_minor);
        assert!((ellipse.center[0] - 4.0 / 3.0).abs() < 1e-12);
        assert!((ellipse.center[1] - 5.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_axis_aligned_cloud() {
        // Sample variances: x = 2/3, y = 8/3, no covariance.
        let points = [[1.0, 0.0], [-1.0, 0.0], [0.0, 2.0], [0.0, -2.0]];
        let fit = fit_confidence_ellipse(&points, &unit_config());
        let ellipse = fit.ellipse().unwrap();
        assert!((ellipse.semi_major - (8.0_f64 / 3.0).sqrt()).abs() < 1e-12);
        assert!((ellipse.semi_minor - (2.0_f64 / 3.0).sqrt()).abs() < 1e-12);
        assert!((ellipse.angle.abs() - FRAC_PI_2).abs() < 1e-12);
        assert!((ellipse.angle_degrees().abs() - 90.0).abs() < 1e-9);
        assert!((ellipse.width() - 2.0 * ellipse.semi_major).abs() < 1e-15);
        assert_eq!(ellipse.center, [0.0, 0.0]);
    }

    #[test]
    fn test_draw_threshold() {
        let points = [[0.0, 0.0], [1.0, 2.0]];
        assert_eq!(
            fit_confidence_ellipse(&points, &EllipseConfig::default()),
            EllipseFit::TooFewPoints {
                count: 2,
                required: 3
            }
        );
        // Two points always lie on a line, so the fit itself can only report
        // degeneracy.
        let config = EllipseConfig {
            min_points: 2,
            ..EllipseConfig::default()
        };
        assert_eq!(
            fit_confidence_ellipse(&points, &config),
            EllipseFit::Degenerate
        );
    }

    #[test]
    fn test_threshold_floor() {
        let config = EllipseConfig {
            min_points: 0,
            ..EllipseConfig::default()
        };
        assert_eq!(
            fit_confidence_ellipse(&[[1.0, 1.0]], &config),
            EllipseFit::TooFewPoints {
                count: 1,
                required: 2
            }
        );
    }

    #[test]
    fn test_non_finite_covariance() {
        let points = [[0.0, 0.0], [f64::INFINITY, 1.0], [1.0, 3.0]];
        assert_eq!(
            fit_confidence_ellipse(&points, &EllipseConfig::default()),
            EllipseFit::NonFinite
        );
    }
}
