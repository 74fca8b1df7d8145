//! Two-dimensional projection of the metric space with per-class confidence
//! ellipses.
//!
//! # Pipeline
//!
//! 1. **Select** every record with a class label (source link and metric
//!    presence are not required here)
//! 2. **Fill** missing metrics with `0.0` on a private copy
//! 3. **Transform** each value with `ln(1 + x)` to compress heavy tails
//!    ([`standardize`])
//! 4. **Standardize** each feature to zero mean and unit variance
//! 5. **Project** onto the first two principal components ([`pca`])
//! 6. **Fit** a 95% confidence ellipse to each class's projected points
//!    ([`ellipse`])
//!
//! The result ([`projection::Projection`]) is plain data for an external
//! renderer; nothing here draws.
//!
//! # Example
//!
//! ```no_run
//! use maturity_projection::{
//!     ellipse::EllipseFit,
//!     projection::{ProjectionConfig, project},
//! };
//! use maturity_table::{columns::ColumnMapping, record::RawRow, table::Table};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let rows: Vec<RawRow> = vec![]; // Load from the record collaborator
//! let table = Table::normalize(&rows, &ColumnMapping::default());
//! let projection = project(&table, &ProjectionConfig::default())?;
//!
//! let [pc1, pc2] = projection.explained_variance_ratio;
//! println!("PC1 {:.1}% / PC2 {:.1}%", pc1 * 100.0, pc2 * 100.0);
//! for (class, fit) in projection.ellipses.iter() {
//!     match fit {
//!         EllipseFit::Fitted(ellipse) => println!("{class}: {ellipse:?}"),
//!         omitted => println!("{class}: no ellipse ({omitted:?})"),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod ellipse;
pub mod pca;
pub mod projection;
pub mod standardize;
