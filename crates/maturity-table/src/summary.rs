//! Row counts per validity subset.

use serde::Serialize;

use crate::{
    label::{MaturityClass, PerClass},
    subset::Subset,
    table::Table,
};

/// Row counts of a table per validity subset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSummary {
    pub total: usize,
    pub with_source_link: usize,
    /// Rows with a source link and at least one metric.
    pub valid: usize,
    /// `valid / with_source_link`; absent when no row has a source link.
    pub valid_fraction: Option<f64>,
    pub labeled: usize,
    pub classifiable: usize,
    /// Class counts of the classifiable subset, in display order.
    pub classifiable_by_class: PerClass<usize>,
}

impl TableSummary {
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_table(table: &Table) -> Self {
        let with_source_link = table.subset(Subset::WithSourceLink).count();
        let valid = table.subset(Subset::Valid).count();
        let classifiable_by_class = PerClass::count(
            table
                .subset(Subset::Classifiable)
                .iter()
                .filter_map(|record| record.label.class()),
        );
        Self {
            total: table.len(),
            with_source_link,
            valid,
            valid_fraction: (with_source_link > 0)
                .then(|| valid as f64 / with_source_link as f64),
            labeled: table.subset(Subset::Labeled).count(),
            classifiable: classifiable_by_class.total(),
            classifiable_by_class,
        }
    }

    /// Count of `class` in the classifiable subset.
    #[must_use]
    pub fn classifiable_count(&self, class: MaturityClass) -> usize {
        self.classifiable_by_class[class]
    }
}
