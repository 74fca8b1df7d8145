//! Tool records and their normalization from raw string rows.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    columns::ColumnMapping,
    label::MaturityLabel,
    metric::{Metric, MetricVector, parse_metric_cell},
};

/// Id given to records whose id cell is absent.
pub const UNKNOWN_ID: &str = "unknown";

/// One raw input row: column name to cell text.
///
/// A missing key and an empty string both mean "absent".
pub type RawRow = BTreeMap<String, String>;

/// A normalized record of one catalogued tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolRecord {
    pub id: String,
    /// Source repository link; empty when absent.
    pub repo_url: String,
    pub label: MaturityLabel,
    pub metrics: MetricVector,
}

impl ToolRecord {
    /// Normalizes a raw row. This never fails: every malformed cell degrades
    /// to its "absent" representation.
    ///
    /// # Examples
    ///
    /// ```
    /// use maturity_table::{
    ///     columns::ColumnMapping,
    ///     label::MaturityLabel,
    ///     metric::Metric,
    ///     record::{RawRow, ToolRecord},
    /// };
    ///
    /// let mut row = RawRow::new();
    /// row.insert("maturity".into(), "LEGACY".into());
    /// row.insert("num_commits".into(), "not a number".into());
    /// let record = ToolRecord::from_raw(&row, &ColumnMapping::default());
    /// assert_eq!(record.id, "unknown");
    /// assert_eq!(record.label, MaturityLabel::Legacy);
    /// assert_eq!(record.metrics.get(Metric::Commits), None);
    /// ```
    #[must_use]
    pub fn from_raw(row: &RawRow, columns: &ColumnMapping) -> Self {
        let cell = |column: &str| row.get(column).map_or("", String::as_str);

        let id = match cell(&columns.id) {
            "" => UNKNOWN_ID.to_owned(),
            id => id.to_owned(),
        };
        let label = MaturityLabel::canonicalize(cell(&columns.label));
        let mut metrics = MetricVector::default();
        for metric in Metric::ALL {
            metrics.set(metric, parse_metric_cell(cell(columns.metric_column(metric))));
        }

        Self {
            id,
            repo_url: cell(&columns.source_link).to_owned(),
            label,
            metrics,
        }
    }

    /// Returns `true` if at least one metric has a value.
    #[must_use]
    pub fn has_any_metric(&self) -> bool {
        self.metrics.has_any()
    }
}

/// Recognizes links to a code-hosting service by a domain substring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLinkMatcher {
    domain: String,
}

impl SourceLinkMatcher {
    #[must_use]
    pub fn new(domain: &str) -> Self {
        Self {
            domain: domain.to_lowercase(),
        }
    }

    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Case-insensitive substring match against the record's link.
    #[must_use]
    pub fn matches(&self, record: &ToolRecord) -> bool {
        !record.repo_url.is_empty() && record.repo_url.to_lowercase().contains(&self.domain)
    }
}

impl Default for SourceLinkMatcher {
    fn default() -> Self {
        Self::new(&ColumnMapping::default().source_domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, &str)]) -> RawRow {
        cells
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_empty_row_degrades_everywhere() {
        let record = ToolRecord::from_raw(&RawRow::new(), &ColumnMapping::default());
        assert_eq!(record.id, UNKNOWN_ID);
        assert_eq!(record.repo_url, "");
        assert_eq!(record.label, MaturityLabel::None);
        assert!(!record.has_any_metric());
    }

    #[test]
    fn test_id_is_kept_verbatim() {
        let record =
            ToolRecord::from_raw(&row(&[("biotoolsID", " NA ")]), &ColumnMapping::default());
        assert_eq!(record.id, " NA ");
    }

    #[test]
    fn test_metrics_parse_independently() {
        let record = ToolRecord::from_raw(
            &row(&[
                ("repo.stargazers_count", "10"),
                ("repo.forks_count", "abc"),
                ("avg_time_to_close_days", "2.25"),
            ]),
            &ColumnMapping::default(),
        );
        assert_eq!(record.metrics.get(Metric::Stars), Some(10.0));
        assert_eq!(record.metrics.get(Metric::Forks), None);
        assert_eq!(record.metrics.get(Metric::AvgDaysToClose), Some(2.25));
        assert!(record.has_any_metric());
    }

    #[test]
    fn test_source_link_matcher_is_case_insensitive() {
        let matcher = SourceLinkMatcher::new("GitHub.com");
        let mut record = ToolRecord::from_raw(&RawRow::new(), &ColumnMapping::default());
        assert!(!matcher.matches(&record));
        record.repo_url = "HTTPS://GITHUB.COM/owner/repo".to_owned();
        assert!(matcher.matches(&record));
        record.repo_url = "https://gitlab.com/owner/repo".to_owned();
        assert!(!matcher.matches(&record));
    }
}
