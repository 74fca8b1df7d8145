//! Raw column names for each field of a record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::metric::Metric;

/// Maps record fields to the column names of the raw input table.
///
/// Missing entries in a deserialized mapping fall back to the defaults, so a
/// configuration file only needs to list the columns it renames.
///
/// # Examples
///
/// ```
/// use maturity_table::{columns::ColumnMapping, metric::Metric};
///
/// let mapping: ColumnMapping = serde_json::from_str(r#"{ "label": "status" }"#).unwrap();
/// assert_eq!(mapping.label, "status");
/// assert_eq!(mapping.id, "biotoolsID");
/// assert_eq!(mapping.metric_column(Metric::Stars), "repo.stargazers_count");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub label: String,
    pub id: String,
    pub source_link: String,
    /// Substring (matched case-insensitively) identifying a recognized
    /// code-hosting link.
    pub source_domain: String,
    pub metrics: BTreeMap<Metric, String>,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            label: "maturity".to_owned(),
            id: "biotoolsID".to_owned(),
            source_link: "repo_url".to_owned(),
            source_domain: "github.com".to_owned(),
            metrics: Metric::ALL
                .into_iter()
                .map(|metric| (metric, default_metric_column(metric).to_owned()))
                .collect(),
        }
    }
}

impl ColumnMapping {
    /// Column holding `metric`, falling back to its default name.
    #[must_use]
    pub fn metric_column(&self, metric: Metric) -> &str {
        self.metrics
            .get(&metric)
            .map_or_else(|| default_metric_column(metric), String::as_str)
    }
}

const fn default_metric_column(metric: Metric) -> &'static str {
    match metric {
        Metric::Stars => "repo.stargazers_count",
        Metric::Watchers => "repo.watchers_count",
        Metric::Subscribers => "repo.subscribers_count",
        Metric::Forks => "repo.forks_count",
        Metric::OpenIssues => "repo.open_issues_count",
        Metric::NetworkCount => "repo.network_count",
        Metric::Contributors => "num_contributors",
        Metric::Releases => "num_releases",
        Metric::Commits => "num_commits",
        Metric::PullRequests => "num_pulls",
        Metric::AvgDaysToClose => "avg_time_to_close_days",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_metric_override() {
        let mapping: ColumnMapping =
            serde_json::from_str(r#"{ "metrics": { "stars": "stargazers" } }"#).unwrap();
        assert_eq!(mapping.metric_column(Metric::Stars), "stargazers");
        assert_eq!(mapping.metric_column(Metric::Commits), "num_commits");
        assert_eq!(mapping.source_domain, "github.com");
    }

    #[test]
    fn test_default_covers_every_metric() {
        let mapping = ColumnMapping::default();
        assert_eq!(mapping.metrics.len(), Metric::COUNT);
    }
}
