//! Random forest of weighted decision trees.
//!
//! Each tree is grown on a bootstrap sample of the training rows with its own
//! seed drawn from the forest seed, so a forest is reproducible for a given
//! seed and input order. Class weighting multiplies every sample's bootstrap
//! multiplicity; with [`ClassWeighting::Balanced`] each class contributes the
//! same total weight to the split criterion regardless of its frequency.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::tree::{Dataset, DecisionTree, MaxFeatures, TreeConfig};

/// How samples are weighted by class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassWeighting {
    Uniform,
    /// `n_samples / (n_present_classes · n_class_samples)`.
    #[default]
    Balanced,
}

/// Forest hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForestConfig {
    pub n_trees: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub max_features: MaxFeatures,
    pub class_weighting: ClassWeighting,
    pub bootstrap: bool,
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 300,
            max_depth: None,
            min_samples_split: 2,
            max_features: MaxFeatures::Sqrt,
            class_weighting: ClassWeighting::Balanced,
            bootstrap: true,
            seed: 42,
        }
    }
}

impl ForestConfig {
    fn tree_config(&self) -> TreeConfig {
        TreeConfig {
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            max_features: self.max_features,
        }
    }
}

/// Per-class weights from class frequencies.
///
/// Classes without samples get weight `0.0`.
///
/// # Examples
///
/// ```
/// use maturity_classifier::forest::{ClassWeighting, class_weights};
///
/// let weights = class_weights(&[0, 0, 0, 1], 2, ClassWeighting::Balanced);
/// assert_eq!(weights, vec![4.0 / 6.0, 2.0]);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn class_weights(classes: &[usize], n_classes: usize, weighting: ClassWeighting) -> Vec<f64> {
    let mut counts = vec![0_usize; n_classes];
    for &class in classes {
        counts[class] += 1;
    }
    match weighting {
        ClassWeighting::Uniform => counts
            .iter()
            .map(|&count| if count > 0 { 1.0 } else { 0.0 })
            .collect(),
        ClassWeighting::Balanced => {
            let present = counts.iter().filter(|&&count| count > 0).count();
            let n_samples = classes.len() as f64;
            counts
                .iter()
                .map(|&count| {
                    if count > 0 {
                        n_samples / (present as f64 * count as f64)
                    } else {
                        0.0
                    }
                })
                .collect()
        }
    }
}

/// A fitted random forest.
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_features: usize,
    n_classes: usize,
    class_weights: Vec<f64>,
}

impl RandomForest {
    #[must_use]
    pub fn fit(data: &Dataset, config: &ForestConfig) -> Self {
        let class_weights = class_weights(data.classes(), data.n_classes(), config.class_weighting);
        let tree_config = config.tree_config();
        let mut seeds = Pcg32::seed_from_u64(config.seed);

        let trees = (0..config.n_trees)
            .map(|_| {
                let mut rng = Pcg32::seed_from_u64(seeds.random());
                let weights = sample_weights(data, &class_weights, config.bootstrap, &mut rng);
                DecisionTree::fit(data, &weights, &tree_config, &mut rng)
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            trees = trees.len(),
            samples = data.len(),
            mean_nodes = mean_node_count(&trees),
            "fitted random forest"
        );
        Self {
            trees,
            n_features: data.n_features(),
            n_classes: data.n_classes(),
            class_weights,
        }
    }

    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    #[must_use]
    pub fn class_weights(&self) -> &[f64] {
        &self.class_weights
    }

    /// Mean of the trees' leaf distributions for `sample`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn predict_proba(&self, sample: &[f64]) -> Vec<f64> {
        let mut proba = vec![0.0; self.n_classes];
        if self.trees.is_empty() {
            return proba;
        }
        for tree in &self.trees {
            for (p, d) in proba.iter_mut().zip(tree.predict_distribution(sample)) {
                *p += d;
            }
        }
        let n = self.trees.len() as f64;
        for p in &mut proba {
            *p /= n;
        }
        proba
    }

    /// Most probable class; ties go to the lowest class index.
    #[must_use]
    pub fn predict(&self, sample: &[f64]) -> usize {
        let proba = self.predict_proba(sample);
        let mut best = 0;
        for (class, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = class;
            }
        }
        best
    }

    /// Mean decrease in impurity per feature, averaged over trees and
    /// normalized to sum to 1.
    ///
    /// Falls back to uniform importances when no tree ever split.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn feature_importances(&self) -> Vec<f64> {
        let mut importances = vec![0.0; self.n_features];
        for tree in &self.trees {
            for (sum, value) in importances.iter_mut().zip(tree.feature_importances()) {
                *sum += value;
            }
        }
        let total = importances.iter().sum::<f64>();
        if total > 0.0 {
            for value in &mut importances {
                *value /= total;
            }
        } else if self.n_features > 0 {
            importances.fill(1.0 / self.n_features as f64);
        }
        importances
    }
}

fn sample_weights<R>(
    data: &Dataset,
    class_weights: &[f64],
    bootstrap: bool,
    rng: &mut R,
) -> Vec<f64>
where
    R: Rng + ?Sized,
{
    let n = data.len();
    let mut multiplicity = vec![0.0; n];
    if bootstrap {
        for _ in 0..n {
            multiplicity[rng.random_range(0..n)] += 1.0;
        }
    } else {
        multiplicity.fill(1.0);
    }
    multiplicity
        .iter()
        .zip(data.classes())
        .map(|(m, &class)| m * class_weights[class])
        .collect()
}

#[expect(clippy::cast_precision_loss)]
fn mean_node_count(trees: &[DecisionTree]) -> f64 {
    if trees.is_empty() {
        return 0.0;
    }
    trees.iter().map(DecisionTree::node_count).sum::<usize>() as f64 / trees.len() as f64
}
