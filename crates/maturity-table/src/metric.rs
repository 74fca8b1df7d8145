//! The fixed set of repository-activity metrics.

use serde::{Deserialize, Serialize};

/// A repository-activity metric.
///
/// The declaration order is the feature order used by every model and report.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    #[display("stars")]
    Stars,
    #[display("watchers")]
    Watchers,
    #[display("subscribers")]
    Subscribers,
    #[display("forks")]
    Forks,
    #[display("open_issues")]
    OpenIssues,
    #[display("network_count")]
    NetworkCount,
    #[display("contributors")]
    Contributors,
    #[display("releases")]
    Releases,
    #[display("commits")]
    Commits,
    #[display("pull_requests")]
    PullRequests,
    #[display("avg_days_to_close")]
    AvgDaysToClose,
}

impl Metric {
    pub const COUNT: usize = 11;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Stars,
        Self::Watchers,
        Self::Subscribers,
        Self::Forks,
        Self::OpenIssues,
        Self::NetworkCount,
        Self::Contributors,
        Self::Releases,
        Self::Commits,
        Self::PullRequests,
        Self::AvgDaysToClose,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Parses a metric cell, degrading anything unusable to "no value".
///
/// Surrounding whitespace is ignored. Blank cells, unparseable text, and
/// non-finite numbers (`nan`, `inf`) all yield `None`.
#[must_use]
pub fn parse_metric_cell(cell: &str) -> Option<f64> {
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// The 11 metric values of a record; each one may independently be missing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MetricVector([Option<f64>; Metric::COUNT]);

impl MetricVector {
    #[must_use]
    pub const fn new(values: [Option<f64>; Metric::COUNT]) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.0[metric.index()]
    }

    pub fn set(&mut self, metric: Metric, value: Option<f64>) {
        self.0[metric.index()] = value;
    }

    /// Returns `true` if at least one metric has a value.
    #[must_use]
    pub fn has_any(&self) -> bool {
        self.0.iter().any(Option::is_some)
    }

    /// Returns a dense copy with missing values replaced by `fill`.
    ///
    /// The vector itself is left untouched; each consumer applies its own
    /// fill policy on its own copy.
    #[must_use]
    pub fn filled(&self, fill: f64) -> [f64; Metric::COUNT] {
        self.0.map(|value| value.unwrap_or(fill))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, Option<f64>)> + '_ {
        Metric::ALL.into_iter().zip(self.0.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_metric_cell() {
        assert_eq!(parse_metric_cell("42"), Some(42.0));
        assert_eq!(parse_metric_cell(" 3.5 "), Some(3.5));
        assert_eq!(parse_metric_cell("1e3"), Some(1000.0));
        assert_eq!(parse_metric_cell(""), None);
        assert_eq!(parse_metric_cell("n/a"), None);
        assert_eq!(parse_metric_cell("12 stars"), None);
        assert_eq!(parse_metric_cell("NaN"), None);
        assert_eq!(parse_metric_cell("inf"), None);
    }

    #[test]
    fn test_metric_order_matches_index() {
        for (i, metric) in Metric::ALL.into_iter().enumerate() {
            assert_eq!(metric.index(), i);
        }
        assert_eq!(Metric::AvgDaysToClose.to_string(), "avg_days_to_close");
    }

    #[test]
    fn test_filled_leaves_vector_untouched() {
        let mut metrics = MetricVector::default();
        assert!(!metrics.has_any());
        metrics.set(Metric::Forks, Some(7.0));
        assert!(metrics.has_any());

        let dense = metrics.filled(0.0);
        assert_eq!(dense[Metric::Forks.index()], 7.0);
        assert_eq!(dense[Metric::Stars.index()], 0.0);
        assert_eq!(metrics.get(Metric::Stars), None);
    }
}
