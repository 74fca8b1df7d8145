//! Maturity classification from repository-activity metrics.
//!
//! This crate trains a random forest that predicts a record's maturity class
//! from its 11 metrics and evaluates it on a held-out split.
//!
//! # How Evaluation Works
//!
//! 1. **Select** - Take the classifiable subset of the table (class label,
//!    source link, at least one metric)
//! 2. **Fill** - Copy the metrics into a dense feature matrix, missing values as `0.0`
//! 3. **Split** - Stratified 80/20 train/test split with a fixed seed ([`split`])
//! 4. **Fit** - Random forest with balanced class weights ([`forest`], [`tree`])
//! 5. **Report** - Confusion matrix and per-class precision/recall/F1 over the
//!    fixed class axis ([`report`]), plus mean-decrease-in-impurity feature
//!    importances
//!
//! Every step is deterministic for a given seed and input order.
//!
//! # Architecture
//!
//! ```text
//! Table (maturity-table)
//!     ↓ classifiable snapshot, zero-filled copy
//! Dataset
//!     ↓ stratified split
//! train rows ──→ RandomForest ──→ predictions on test rows
//!                     ↓                   ↓
//!          feature importances    ConfusionMatrix → ClassificationReport
//! ```
//!
//! # Example
//!
//! ```no_run
//! use maturity_classifier::evaluation::{EvaluatorConfig, evaluate};
//! use maturity_table::{columns::ColumnMapping, record::RawRow, table::Table};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let rows: Vec<RawRow> = vec![]; // Load from the record collaborator
//! let table = Table::normalize(&rows, &ColumnMapping::default());
//!
//! let evaluation = evaluate(&table, &EvaluatorConfig::default())?;
//! println!("{}", evaluation.confusion);
//! println!("{}", evaluation.report);
//! for importance in evaluation.importances.ranked() {
//!     println!("{}: {:.3}", importance.metric, importance.score);
//! }
//! # Ok(())
//! # }
//! ```

pub mod evaluation;
pub mod forest;
pub mod report;
pub mod split;
pub mod tree;
