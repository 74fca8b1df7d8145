//! Projection of labeled records onto their first two principal components.

use maturity_table::{
    label::{MaturityClass, PerClass},
    metric::Metric,
    subset::Subset,
    table::Table,
};
use serde::Serialize;

use crate::{
    ellipse::{EllipseConfig, EllipseFit, fit_confidence_ellipse},
    pca::Pca,
    standardize::{Standardizer, log1p_count},
};

/// Value substituted for missing metrics before the log transform.
pub const MISSING_METRIC_FILL: f64 = 0.0;

/// Fewer than two labeled records: the sample covariance is undefined.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ProjectionError {
    #[display("cannot project {count} labeled record(s); at least 2 are required")]
    InsufficientRecords { count: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ProjectionConfig {
    pub ellipse: EllipseConfig,
}

/// A record's coordinates in the principal plane.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedRecord {
    pub id: String,
    pub class: MaturityClass,
    pub pc1: f64,
    pub pc2: f64,
}

/// Weight of one metric on each principal axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Loading {
    pub metric: Metric,
    pub pc1: f64,
    pub pc2: f64,
}

/// Result of [`project`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    /// One row per labeled record, in table order.
    pub points: Vec<ProjectedRecord>,
    /// Fraction of the total variance captured by PC1 and PC2.
    pub explained_variance_ratio: [f64; 2],
    /// One entry per metric, in field order.
    pub loadings: Vec<Loading>,
    pub ellipses: PerClass<EllipseFit>,
}

impl Projection {
    /// Projected coordinates of the members of `class`.
    pub fn class_points(&self, class: MaturityClass) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.points
            .iter()
            .filter(move |p| p.class == class)
            .map(|p| [p.pc1, p.pc2])
    }
}

/// Projects every labeled record of `table` onto the principal plane of the
/// log-transformed, standardized metrics and fits a confidence ellipse per
/// class.
///
/// Unlike the classifier, this uses all labeled records, including those
/// without a source link or any metric value. Missing metrics are filled with
/// [`MISSING_METRIC_FILL`] on a private copy.
pub fn project(table: &Table, config: &ProjectionConfig) -> Result<Projection, ProjectionError> {
    let records = table
        .subset(Subset::Labeled)
        .snapshot()
        .into_iter()
        .filter_map(|record| Some((record, record.label.class()?)))
        .collect::<Vec<_>>();
    tracing::info!(records = records.len(), "labeled subset");

    let features = records
        .iter()
        .map(|(record, _)| {
            record
                .metrics
                .filled(MISSING_METRIC_FILL)
                .map(log1p_count)
        })
        .collect::<Vec<_>>();

    let insufficient = || ProjectionError::InsufficientRecords {
        count: records.len(),
    };
    let standardizer = Standardizer::fit(&features).ok_or_else(insufficient)?;
    let standardized = features
        .iter()
        .map(|row| standardizer.transform(row))
        .collect::<Vec<_>>();
    let pca = Pca::fit(&standardized, 2).ok_or_else(insufficient)?;

    let ratio = pca.explained_variance_ratio();
    let explained_variance_ratio = [ratio[0], ratio[1]];
    tracing::debug!(
        pc1 = explained_variance_ratio[0],
        pc2 = explained_variance_ratio[1],
        "explained variance ratio"
    );

    let [axis1, axis2] = [&pca.components()[0], &pca.components()[1]];
    let loadings = Metric::ALL
        .iter()
        .map(|&metric| Loading {
            metric,
            pc1: axis1[metric.index()],
            pc2: axis2[metric.index()],
        })
        .collect();

    let points = records
        .iter()
        .zip(&standardized)
        .map(|((record, class), row)| {
            let coords = pca.transform(row);
            ProjectedRecord {
                id: record.id.clone(),
                class: *class,
                pc1: coords[0],
                pc2: coords[1],
            }
        })
        .collect::<Vec<_>>();

    let ellipses = PerClass::from_fn(|class| {
        let cloud = points
            .iter()
            .filter(|p| p.class == class)
            .map(|p| [p.pc1, p.pc2])
            .collect::<Vec<_>>();
        let fit = fit_confidence_ellipse(&cloud, &config.ellipse);
        if !fit.is_fitted() {
            tracing::warn!(%class, points = cloud.len(), ?fit, "no confidence ellipse");
        }
        fit
    });

    tracing::info!("projected labeled records onto two principal components");
    Ok(Projection {
        points,
        explained_variance_ratio,
        loadings,
        ellipses,
    })
}

#[cfg(test)]
mod tests {
    use maturity_table::{
        label::MaturityLabel,
        metric::MetricVector,
        record::{SourceLinkMatcher, ToolRecord},
    };

    use super::*;

    fn record(id: &str, label: MaturityLabel, url: &str, stars: Option<f64>) -> ToolRecord {
        let mut metrics = MetricVector::default();
        metrics.set(Metric::Stars, stars);
        metrics.set(Metric::Commits, stars.map(|s| s * 3.0 + 1.0));
        ToolRecord {
            id: id.to_owned(),
            repo_url: url.to_owned(),
            label,
            metrics,
        }
    }

    #[test]
    fn test_uses_labeled_records_without_source_link() {
        let table = Table::from_records(
            vec![
                record("a", MaturityLabel::Emerging, "https://github.com/a", Some(1.0)),
                record("b", MaturityLabel::Mature, "", Some(50.0)),
                record("c", MaturityLabel::Legacy, "https://gitlab.com/c", None),
                record("d", MaturityLabel::None, "https://github.com/d", Some(7.0)),
            ],
            SourceLinkMatcher::default(),
        );
        let projection = project(&table, &ProjectionConfig::default()).unwrap();
        let ids = projection
            .points
            .iter()
            .map(|p| p.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(projection.loadings.len(), Metric::COUNT);
        for (_, fit) in projection.ellipses.iter() {
            assert_eq!(
                *fit,
                EllipseFit::TooFewPoints {
                    count: 1,
                    required: 3
                }
            );
        }
    }

    #[test]
    fn test_too_few_records() {
        let table = Table::from_records(
            vec![record("a", MaturityLabel::Mature, "", Some(1.0))],
            SourceLinkMatcher::default(),
        );
        assert_eq!(
            project(&table, &ProjectionConfig::default()),
            Err(ProjectionError::InsufficientRecords { count: 1 })
        );
    }

    #[test]
    fn test_table_is_not_modified() {
        let table = Table::from_records(
            vec![
                record("a", MaturityLabel::Mature, "", None),
                record("b", MaturityLabel::Mature, "", Some(3.0)),
            ],
            SourceLinkMatcher::default(),
        );
        let before = table.records().to_vec();
        project(&table, &ProjectionConfig::default()).unwrap();
        assert_eq!(table.records(), before.as_slice());
        assert_eq!(table.records()[0].metrics.get(Metric::Stars), None);
    }
}
