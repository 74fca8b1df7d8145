//! Validity subsets of a [`Table`].
//!
//! A subset is a predicate; a [`SubsetView`] applies it lazily over the
//! table's records without copying them. Components that need a stable input
//! take a [`SubsetView::snapshot`], which borrows the table immutably for as
//! long as the snapshot lives.

use crate::{record::ToolRecord, table::Table};

/// Named record predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subset {
    /// Every record.
    All,
    /// Records whose link points at the recognized code-hosting service.
    WithSourceLink,
    /// Records with a source link and at least one metric value.
    Valid,
    /// Records with a canonical class label (link and metrics not required).
    Labeled,
    /// Records with a canonical class label, a source link, and at least one
    /// metric value.
    Classifiable,
}

impl Subset {
    #[must_use]
    pub fn contains(self, table: &Table, record: &ToolRecord) -> bool {
        match self {
            Self::All => true,
            Self::WithSourceLink => table.has_source_link(record),
            Self::Valid => table.has_source_link(record) && record.has_any_metric(),
            Self::Labeled => record.label.class().is_some(),
            Self::Classifiable => {
                Self::Labeled.contains(table, record) && Self::Valid.contains(table, record)
            }
        }
    }
}

/// Lazily filtered view over a table.
#[derive(Debug, Clone, Copy)]
pub struct SubsetView<'a> {
    table: &'a Table,
    subset: Subset,
}

impl<'a> SubsetView<'a> {
    pub(crate) fn new(table: &'a Table, subset: Subset) -> Self {
        Self { table, subset }
    }

    #[must_use]
    pub fn subset(&self) -> Subset {
        self.subset
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a ToolRecord> + use<'a> {
        let Self { table, subset } = *self;
        table
            .records()
            .iter()
            .filter(move |record| subset.contains(table, record))
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Materializes the view, preserving table order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<&'a ToolRecord> {
        self.iter().collect()
    }
}
