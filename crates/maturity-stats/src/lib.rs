//! Numerical building blocks for the maturity analytics engine.
//!
//! This crate collects the small amount of numerical machinery the other
//! engine crates share:
//!
//! - **Descriptive statistics**: mean, median, population variance and standard deviation
//! - **Covariance**: sample covariance matrices of row-major observations
//! - **Symmetric eigendecomposition**: cyclic Jacobi rotations for small dense matrices
//! - **Chi-square quantiles**: closed-form quantiles for two degrees of freedom
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing a column of values
//! - [`covariance`]: Sample covariance of observations
//! - [`eigen`]: Eigenvalues and eigenvectors of symmetric matrices
//! - [`chi_square`]: Chi-square distribution quantiles used for confidence regions
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use maturity_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.variance, 2.0);
//! ```
//!
//! ## Decomposing a covariance matrix
//!
//! ```
//! use maturity_stats::{covariance::sample_covariance, eigen::SymmetricEigen};
//!
//! let points = [[0.0, 0.0], [2.0, 0.0], [0.0, 1.0], [2.0, 1.0]];
//! let cov = sample_covariance(&points).unwrap();
//! let eigen = SymmetricEigen::decompose(&cov);
//! assert!(eigen.values[0] >= eigen.values[1]);
//! ```

pub mod chi_square;
pub mod covariance;
pub mod descriptive;
pub mod eigen;
pub mod matrix;
