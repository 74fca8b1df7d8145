//! Prediction-quality statistics over the fixed class axis.
//!
//! Both axes of every table here are always `[Emerging, Mature, Legacy]`,
//! whichever classes happen to occur in the held-out split. A class with no
//! test samples still appears, with zero counts and zero scores.

use std::fmt;

use maturity_table::label::{MaturityClass, PerClass};
use serde::Serialize;

/// 3×3 confusion matrix; rows are true classes, columns predicted classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    labels: [MaturityClass; MaturityClass::COUNT],
    counts: [[usize; MaturityClass::COUNT]; MaturityClass::COUNT],
}

impl ConfusionMatrix {
    /// Builds a matrix from `(truth, predicted)` pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use maturity_classifier::report::ConfusionMatrix;
    /// use maturity_table::label::MaturityClass::{Legacy, Mature};
    ///
    /// let cm = ConfusionMatrix::from_pairs([(Mature, Mature), (Mature, Legacy)]);
    /// assert_eq!(cm.get(Mature, Legacy), 1);
    /// assert_eq!(cm.row_total(Mature), 2);
    /// assert_eq!(cm.row_total(Legacy), 0);
    /// ```
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (MaturityClass, MaturityClass)>,
    {
        let mut counts = [[0; MaturityClass::COUNT]; MaturityClass::COUNT];
        for (truth, predicted) in pairs {
            counts[truth.ordinal()][predicted.ordinal()] += 1;
        }
        Self {
            labels: MaturityClass::ALL,
            counts,
        }
    }

    #[must_use]
    pub fn get(&self, truth: MaturityClass, predicted: MaturityClass) -> usize {
        self.counts[truth.ordinal()][predicted.ordinal()]
    }

    #[must_use]
    pub fn counts(&self) -> &[[usize; MaturityClass::COUNT]; MaturityClass::COUNT] {
        &self.counts
    }

    /// Number of samples whose true class is `truth`.
    #[must_use]
    pub fn row_total(&self, truth: MaturityClass) -> usize {
        self.counts[truth.ordinal()].iter().sum()
    }

    /// Number of samples predicted as `predicted`.
    #[must_use]
    pub fn column_total(&self, predicted: MaturityClass) -> usize {
        self.counts.iter().map(|row| row[predicted.ordinal()]).sum()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Number of correct predictions.
    #[must_use]
    pub fn correct(&self) -> usize {
        MaturityClass::ALL
            .iter()
            .map(|&class| self.get(class, class))
            .sum()
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<14}", "")?;
        for class in MaturityClass::ALL {
            write!(f, "{:>14}", format!("Pred {class}"))?;
        }
        writeln!(f)?;
        for truth in MaturityClass::ALL {
            write!(f, "{:<14}", format!("True {truth}"))?;
            for predicted in MaturityClass::ALL {
                write!(f, "{:>14}", self.get(truth, predicted))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Precision, recall and F1 of one class, with its test support.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-class metrics plus accuracy and averages.
///
/// Undefined ratios (`0 / 0`) are reported as `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    pub per_class: PerClass<ClassMetrics>,
    pub accuracy: f64,
    /// Unweighted mean over the three classes.
    pub macro_avg: ClassMetrics,
    /// Mean weighted by support.
    pub weighted_avg: ClassMetrics,
}

#[expect(clippy::cast_precision_loss)]
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    }
}

/// Weighted mean of each score; zero when the weights sum to zero.
fn average(
    per_class: &PerClass<ClassMetrics>,
    weights: [f64; MaturityClass::COUNT],
    support: usize,
) -> ClassMetrics {
    let weight_sum = weights.iter().sum::<f64>();
    let mean = |field: fn(&ClassMetrics) -> f64| {
        if weight_sum > 0.0 {
            per_class
                .0
                .iter()
                .zip(weights)
                .map(|(m, w)| w * field(m))
                .sum::<f64>()
                / weight_sum
        } else {
            0.0
        }
    };
    ClassMetrics {
        precision: mean(|m| m.precision),
        recall: mean(|m| m.recall),
        f1: mean(|m| m.f1),
        support,
    }
}

impl ClassificationReport {
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_confusion(confusion: &ConfusionMatrix) -> Self {
        let per_class = PerClass::from_fn(|class| {
            let tp = confusion.get(class, class);
            let precision = ratio(tp, confusion.column_total(class));
            let recall = ratio(tp, confusion.row_total(class));
            ClassMetrics {
                precision,
                recall,
                f1: f1(precision, recall),
                support: confusion.row_total(class),
            }
        });

        let total = confusion.total();
        let supports = per_class.0.map(|m| m.support as f64);
        Self {
            accuracy: ratio(confusion.correct(), total),
            macro_avg: average(&per_class, [1.0; MaturityClass::COUNT], total),
            weighted_avg: average(&per_class, supports, total),
            per_class,
        }
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<14}{:>10}{:>10}{:>10}{:>10}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        let line = |f: &mut fmt::Formatter<'_>, name: &str, m: &ClassMetrics| {
            writeln!(
                f,
                "{name:<14}{:>10.2}{:>10.2}{:>10.2}{:>10}",
                m.precision, m.recall, m.f1, m.support
            )
        };
        for (class, metrics) in self.per_class.iter() {
            line(f, &class.to_string(), metrics)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:<14}{:>10}{:>10}{:>10.2}{:>10}",
            "accuracy", "", "", self.accuracy, self.macro_avg.support
        )?;
        line(f, "macro avg", &self.macro_avg)?;
        line(f, "weighted avg", &self.weighted_avg)
    }
}
