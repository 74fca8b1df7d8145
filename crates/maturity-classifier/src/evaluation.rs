//! End-to-end classifier evaluation on a normalized table.

use std::fmt;

use maturity_table::{
    label::{MaturityClass, PerClass},
    metric::Metric,
    subset::Subset,
    table::Table,
};
use serde::{Serialize, ser::SerializeSeq};

use crate::{
    forest::{ForestConfig, RandomForest},
    report::{ClassificationReport, ConfusionMatrix},
    split::{SplitConfig, stratified_split},
    tree::Dataset,
};

/// Value substituted for missing metrics in the classifier's feature matrix.
pub const MISSING_METRIC_FILL: f64 = 0.0;

/// A maturity class has no classifiable records, so stratification is
/// undefined.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("no classifiable records labeled {label} (class counts: {counts})")]
pub struct InsufficientClassDataError {
    /// First empty class in display order.
    pub label: MaturityClass,
    pub counts: PerClass<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EvaluatorConfig {
    pub split: SplitConfig,
    pub forest: ForestConfig,
}

/// Ground truth and prediction of one held-out record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prediction {
    pub id: String,
    pub truth: MaturityClass,
    pub predicted: MaturityClass,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureImportance {
    pub metric: Metric,
    pub score: f64,
}

/// Importance score per metric; non-negative, summing to 1.
///
/// Serializes as a list ranked by descending score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureImportances([f64; Metric::COUNT]);

impl FeatureImportances {
    #[must_use]
    pub fn get(&self, metric: Metric) -> f64 {
        self.0[metric.index()]
    }

    /// Scores sorted descending; ties keep metric order.
    #[must_use]
    pub fn ranked(&self) -> Vec<FeatureImportance> {
        let mut ranked = Metric::ALL
            .into_iter()
            .map(|metric| FeatureImportance {
                metric,
                score: self.get(metric),
            })
            .collect::<Vec<_>>();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }
}

impl Serialize for FeatureImportances {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let ranked = self.ranked();
        let mut seq = serializer.serialize_seq(Some(ranked.len()))?;
        for importance in &ranked {
            seq.serialize_element(importance)?;
        }
        seq.end()
    }
}

impl fmt::Display for FeatureImportances {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for importance in self.ranked() {
            writeln!(
                f,
                "{:<20}{:>10.6}",
                importance.metric.to_string(),
                importance.score
            )?;
        }
        Ok(())
    }
}

/// Result of [`evaluate`].
#[derive(Debug, Clone, Serialize)]
pub struct ClassifierEvaluation {
    /// The fitted forest. Not serialized: models are not persisted.
    #[serde(skip)]
    pub model: RandomForest,
    /// Class sizes of the classifiable subset.
    pub class_counts: PerClass<usize>,
    /// Class weights derived from the training split.
    pub class_weights: PerClass<f64>,
    pub train_size: usize,
    pub test_size: usize,
    pub predictions: Vec<Prediction>,
    pub confusion: ConfusionMatrix,
    pub report: ClassificationReport,
    pub importances: FeatureImportances,
}

/// Trains and evaluates the maturity classifier on the classifiable subset
/// of `table`.
///
/// Missing metrics are filled with [`MISSING_METRIC_FILL`] on a private copy;
/// the table itself is not modified.
pub fn evaluate(
    table: &Table,
    config: &EvaluatorConfig,
) -> Result<ClassifierEvaluation, InsufficientClassDataError> {
    let records = table
        .subset(Subset::Classifiable)
        .snapshot()
        .into_iter()
        .filter_map(|record| Some((record, record.label.class()?)))
        .collect::<Vec<_>>();

    let class_counts = PerClass::count(records.iter().map(|(_, class)| *class));
    tracing::info!(records = records.len(), %class_counts, "classifiable subset");
    if let Some(label) = MaturityClass::ALL
        .into_iter()
        .find(|&class| class_counts[class] == 0)
    {
        return Err(InsufficientClassDataError {
            label,
            counts: class_counts,
        });
    }

    let features = records
        .iter()
        .map(|(record, _)| record.metrics.filled(MISSING_METRIC_FILL).to_vec())
        .collect::<Vec<_>>();
    let classes = records.iter().map(|(_, class)| *class).collect::<Vec<_>>();

    let split = stratified_split(&classes, &config.split);
    let train = Dataset::new(
        split.train.iter().map(|&i| features[i].clone()).collect(),
        split.train.iter().map(|&i| classes[i].ordinal()).collect(),
        MaturityClass::COUNT,
    );

    let model = RandomForest::fit(&train, &config.forest);
    tracing::info!(
        trees = model.n_trees(),
        train = split.train.len(),
        "trained random forest"
    );

    let predictions = split
        .test
        .iter()
        .map(|&i| {
            Prediction {
                id: records[i].0.id.clone(),
                truth: classes[i],
                predicted: predict_class(&model, &features[i]),
            }
        })
        .collect::<Vec<_>>();

    let test_counts = PerClass::count(predictions.iter().map(|p| p.truth));
    for (class, count) in test_counts.iter() {
        if *count == 0 {
            tracing::warn!(%class, "class absent from the test split; its scores are zero");
        }
    }

    let confusion = ConfusionMatrix::from_pairs(predictions.iter().map(|p| (p.truth, p.predicted)));
    let report = ClassificationReport::from_confusion(&confusion);
    let class_weights = PerClass::from_fn(|class| model.class_weights()[class.ordinal()]);

    let mut scores = [0.0; Metric::COUNT];
    for (score, value) in scores.iter_mut().zip(model.feature_importances()) {
        *score = value;
    }

    tracing::info!(accuracy = report.accuracy, "evaluated classifier on test split");
    Ok(ClassifierEvaluation {
        model,
        class_counts,
        class_weights,
        train_size: split.train.len(),
        test_size: split.test.len(),
        predictions,
        confusion,
        report,
        importances: FeatureImportances(scores),
    })
}

/// Predicts with a forest trained on [`MaturityClass::COUNT`] classes, so
/// every ordinal it returns names a class.
fn predict_class(model: &RandomForest, sample: &[f64]) -> MaturityClass {
    MaturityClass::ALL[model.predict(sample)]
}

#[cfg(test)]
mod tests {
    use maturity_table::{
        label::MaturityLabel,
        metric::MetricVector,
        record::{SourceLinkMatcher, ToolRecord},
    };

    use super::*;

    fn record(id: &str, label: MaturityLabel, stars: f64) -> ToolRecord {
        let mut metrics = MetricVector::default();
        metrics.set(Metric::Stars, Some(stars));
        ToolRecord {
            id: id.to_owned(),
            repo_url: format!("https://github.com/org/{id}"),
            label,
            metrics,
        }
    }

    #[test]
    fn test_missing_class_is_an_error() {
        let table = Table::from_records(
            vec![
                record("a", MaturityLabel::Mature, 1.0),
                record("b", MaturityLabel::Emerging, 2.0),
                record("c", MaturityLabel::Mature, 3.0),
            ],
            SourceLinkMatcher::default(),
        );
        let err = evaluate(&table, &EvaluatorConfig::default()).unwrap_err();
        assert_eq!(err.label, MaturityClass::Legacy);
        assert_eq!(err.counts.0, [1, 2, 0]);
        assert!(err.to_string().contains("Legacy"));
    }

    #[test]
    fn test_unlinked_records_do_not_count() {
        let mut legacy = record("l", MaturityLabel::Legacy, 5.0);
        legacy.repo_url = String::new();
        let table = Table::from_records(
            vec![
                record("a", MaturityLabel::Mature, 1.0),
                record("b", MaturityLabel::Emerging, 2.0),
                legacy,
            ],
            SourceLinkMatcher::default(),
        );
        let err = evaluate(&table, &EvaluatorConfig::default()).unwrap_err();
        assert_eq!(err.label, MaturityClass::Legacy);
    }

    #[test]
    fn test_predict_class_reaches_every_class() {
        let train = Dataset::new(
            vec![vec![1.0], vec![2.0], vec![11.0], vec![12.0], vec![21.0], vec![22.0]],
            vec![0, 0, 1, 1, 2, 2],
            MaturityClass::COUNT,
        );
        let config = ForestConfig {
            n_trees: 10,
            bootstrap: false,
            ..ForestConfig::default()
        };
        let model = RandomForest::fit(&train, &config);
        assert_eq!(predict_class(&model, &[1.5]), MaturityClass::Emerging);
        assert_eq!(predict_class(&model, &[11.5]), MaturityClass::Mature);
        assert_eq!(predict_class(&model, &[21.5]), MaturityClass::Legacy);
    }

    #[test]
    fn test_ranked_importances() {
        let mut scores = [0.0; Metric::COUNT];
        scores[Metric::Forks.index()] = 0.5;
        scores[Metric::Stars.index()] = 0.2;
        scores[Metric::Commits.index()] = 0.3;
        let importances = FeatureImportances(scores);
        let ranked = importances.ranked();
        assert_eq!(ranked[0].metric, Metric::Forks);
        assert_eq!(ranked[1].metric, Metric::Commits);
        assert_eq!(ranked[2].metric, Metric::Stars);
        assert_eq!(ranked[3].metric, Metric::Watchers);

        let json = serde_json::to_value(importances).unwrap();
        assert_eq!(json[0]["metric"], "forks");
        assert_eq!(json[0]["score"], 0.5);
    }
}
