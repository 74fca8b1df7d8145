//! Normalized in-memory table of catalogued tool records.
//!
//! This crate is the entry point of the analytics engine. It turns rows of
//! string cells (as fetched from a catalog and a code-hosting service) into a
//! typed [`Table`](table::Table), and derives the validity subsets every
//! downstream component works on.
//!
//! # Overview
//!
//! 1. **Column mapping** ([`columns::ColumnMapping`]): which raw columns hold the
//!    label, the id, the source link, and the 11 metrics
//! 2. **Record normalization** ([`record::ToolRecord::from_raw`]): label
//!    canonicalization and lenient numeric parsing (never fails)
//! 3. **Subset selection** ([`subset::Subset`]): lazily evaluated views such as
//!    "has a source link" or "classifiable"
//! 4. **Summary** ([`summary::TableSummary`]): row counts per subset and class
//!
//! # Example
//!
//! ```
//! use maturity_table::{
//!     columns::ColumnMapping, label::MaturityClass, record::RawRow, subset::Subset,
//!     table::Table,
//! };
//!
//! let mut row = RawRow::new();
//! row.insert("biotoolsID".into(), "samtools".into());
//! row.insert("maturity".into(), " Mature ".into());
//! row.insert("repo_url".into(), "https://github.com/samtools/samtools".into());
//! row.insert("repo.stargazers_count".into(), "1500".into());
//!
//! let table = Table::normalize(&[row], &ColumnMapping::default());
//! let classifiable = table.subset(Subset::Classifiable).snapshot();
//! assert_eq!(classifiable.len(), 1);
//! assert_eq!(classifiable[0].label.class(), Some(MaturityClass::Mature));
//! ```

pub mod columns;
pub mod label;
pub mod metric;
pub mod record;
pub mod subset;
pub mod summary;
pub mod table;
