//! The normalized record table.

use serde::Serialize;

use crate::{
    columns::ColumnMapping,
    record::{RawRow, SourceLinkMatcher, ToolRecord},
    subset::{Subset, SubsetView},
};

/// Ordered collection of normalized records.
///
/// Insertion order is kept for display only; ids need not be unique. The
/// table is immutable once built: components read it through [`SubsetView`]s
/// and make their own copies of anything they need to modify.
#[derive(Debug, Clone, Serialize)]
pub struct Table {
    records: Vec<ToolRecord>,
    #[serde(skip)]
    source_link: SourceLinkMatcher,
}

impl Table {
    /// Normalizes raw rows into a table. Never fails.
    #[must_use]
    pub fn normalize<'a, I>(rows: I, columns: &ColumnMapping) -> Self
    where
        I: IntoIterator<Item = &'a RawRow>,
    {
        let records = rows
            .into_iter()
            .map(|row| ToolRecord::from_raw(row, columns))
            .collect::<Vec<_>>();
        tracing::debug!(rows = records.len(), "normalized raw rows");
        Self::from_records(records, SourceLinkMatcher::new(&columns.source_domain))
    }

    #[must_use]
    pub fn from_records(records: Vec<ToolRecord>, source_link: SourceLinkMatcher) -> Self {
        Self {
            records,
            source_link,
        }
    }

    #[must_use]
    pub fn records(&self) -> &[ToolRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn source_link(&self) -> &SourceLinkMatcher {
        &self.source_link
    }

    #[must_use]
    pub fn has_source_link(&self, record: &ToolRecord) -> bool {
        self.source_link.matches(record)
    }

    #[must_use]
    pub fn is_classifiable(&self, record: &ToolRecord) -> bool {
        Subset::Classifiable.contains(self, record)
    }

    #[must_use]
    pub fn subset(&self, subset: Subset) -> SubsetView<'_> {
        SubsetView::new(self, subset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::MaturityLabel;

    #[test]
    fn test_normalize_keeps_order_and_duplicates() {
        let rows = ["x", "x", "y"]
            .map(|id| RawRow::from([("biotoolsID".to_owned(), id.to_owned())]));
        let table = Table::normalize(&rows, &ColumnMapping::default());
        let ids = table.records().iter().map(|r| r.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["x", "x", "y"]);
    }

    #[test]
    fn test_labels_are_always_canonical() {
        let labels = ["Mature", "garbage", "", "legacy ", "EMERGING", "nan", "Legacy-ish"];
        let rows = labels.map(|l| RawRow::from([("maturity".to_owned(), l.to_owned())]));
        let table = Table::normalize(&rows, &ColumnMapping::default());
        for record in table.records() {
            assert!(matches!(
                record.label,
                MaturityLabel::Emerging
                    | MaturityLabel::Mature
                    | MaturityLabel::Legacy
                    | MaturityLabel::None
            ));
        }
        assert_eq!(table.subset(Subset::Labeled).count(), 3);
    }

    #[test]
    fn test_custom_source_domain() {
        let mut columns = ColumnMapping::default();
        columns.source_domain = "gitlab.com".to_owned();
        let rows = [RawRow::from([(
            "repo_url".to_owned(),
            "https://GitLab.com/group/project".to_owned(),
        )])];
        let table = Table::normalize(&rows, &columns);
        assert!(table.has_source_link(&table.records()[0]));
    }
}
