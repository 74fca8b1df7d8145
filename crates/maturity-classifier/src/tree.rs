//! Weighted CART decision trees.
//!
//! Trees are grown greedily on the weighted Gini impurity. Each node draws a
//! random subset of candidate features; constant features are skipped
//! without counting toward that subset. Thresholds sit halfway between
//! consecutive distinct values, and a sample goes left when its value is
//! `<=` the threshold. Leaves store the weighted class distribution of their
//! training samples.

use rand::{Rng, seq::SliceRandom};

/// Number of candidate features examined at each split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaxFeatures {
    /// `floor(sqrt(n_features))`, at least one.
    #[default]
    Sqrt,
    All,
    Count(usize),
}

impl MaxFeatures {
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    #[must_use]
    pub fn resolve(self, n_features: usize) -> usize {
        let count = match self {
            Self::Sqrt => (n_features as f64).sqrt().floor() as usize,
            Self::All => n_features,
            Self::Count(count) => count,
        };
        count.clamp(1, n_features.max(1))
    }
}

/// Growth limits of a single tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Maximum depth; `None` grows until leaves are pure or unsplittable.
    pub max_depth: Option<usize>,
    /// Nodes with fewer distinct samples than this become leaves.
    pub min_samples_split: usize,
    pub max_features: MaxFeatures,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            max_features: MaxFeatures::Sqrt,
        }
    }
}

/// Training data: one feature row and one class index per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Vec<Vec<f64>>,
    classes: Vec<usize>,
    n_features: usize,
    n_classes: usize,
}

impl Dataset {
    /// # Panics
    ///
    /// Panics if rows and classes differ in length, rows differ in width, or a
    /// class index is out of range.
    #[must_use]
    pub fn new(features: Vec<Vec<f64>>, classes: Vec<usize>, n_classes: usize) -> Self {
        assert_eq!(features.len(), classes.len(), "one class per feature row");
        let n_features = features.first().map_or(0, Vec::len);
        assert!(
            features.iter().all(|row| row.len() == n_features),
            "all feature rows must have the same width"
        );
        assert!(
            classes.iter().all(|&c| c < n_classes),
            "class index out of range"
        );
        Self {
            features,
            classes,
            n_features,
            n_classes,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    #[must_use]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    #[must_use]
    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    #[must_use]
    pub fn classes(&self) -> &[usize] {
        &self.classes
    }

    fn value(&self, row: usize, feature: usize) -> f64 {
        self.features[row][feature]
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        distribution: Vec<f64>,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// A fitted decision tree.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    impurity_decrease: Vec<f64>,
}

#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    children_impurity: f64,
}

struct PendingNode {
    node: usize,
    rows: Vec<usize>,
    depth: usize,
}

impl DecisionTree {
    /// Grows a tree on the rows of `data` with positive `weights`.
    ///
    /// `weights[i]` is the total weight of row `i` (bootstrap multiplicity
    /// times class weight); rows with zero weight do not take part.
    ///
    /// # Panics
    ///
    /// Panics if `weights` does not have one entry per row.
    pub fn fit<R>(data: &Dataset, weights: &[f64], config: &TreeConfig, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        assert_eq!(weights.len(), data.len(), "one weight per row");
        let mut tree = Self {
            nodes: vec![],
            impurity_decrease: vec![0.0; data.n_features()],
        };
        let max_features = config.max_features.resolve(data.n_features());

        let rows = (0..data.len()).filter(|&i| weights[i] > 0.0).collect();
        tree.nodes.push(Node::Leaf {
            distribution: vec![],
        });
        let mut stack = vec![PendingNode {
            node: 0,
            rows,
            depth: 0,
        }];

        while let Some(PendingNode { node, rows, depth }) = stack.pop() {
            let totals = class_totals(data, weights, &rows);
            let weight = totals.iter().sum::<f64>();
            let impurity = gini(&totals, weight);

            let can_split = impurity > 0.0
                && rows.len() >= config.min_samples_split
                && config.max_depth.is_none_or(|max| depth < max);
            let split = can_split
                .then(|| best_split(data, weights, &rows, &totals, max_features, rng))
                .flatten();

            let Some(split) = split else {
                tree.nodes[node] = Node::Leaf {
                    distribution: normalize_distribution(totals),
                };
                continue;
            };

            tree.impurity_decrease[split.feature] += weight * impurity - split.children_impurity;
            let (left_rows, right_rows) = rows
                .into_iter()
                .partition::<Vec<_>, _>(|&row| data.value(row, split.feature) <= split.threshold);

            let left = tree.nodes.len();
            let right = left + 1;
            tree.nodes.push(Node::Leaf {
                distribution: vec![],
            });
            tree.nodes.push(Node::Leaf {
                distribution: vec![],
            });
            tree.nodes[node] = Node::Split {
                feature: split.feature,
                threshold: split.threshold,
                left,
                right,
            };
            stack.push(PendingNode {
                node: right,
                rows: right_rows,
                depth: depth + 1,
            });
            stack.push(PendingNode {
                node: left,
                rows: left_rows,
                depth: depth + 1,
            });
        }

        tree.fix_empty_leaves(data.n_classes());
        tree
    }

    /// Class distribution of the leaf `sample` falls into.
    #[must_use]
    pub fn predict_distribution(&self, sample: &[f64]) -> &[f64] {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { distribution } => return distribution,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if sample[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    /// Weighted impurity decrease per feature, normalized to sum to 1.
    ///
    /// All zeros when the tree is a single leaf.
    #[must_use]
    pub fn feature_importances(&self) -> Vec<f64> {
        let total = self.impurity_decrease.iter().sum::<f64>();
        if total > 0.0 {
            self.impurity_decrease.iter().map(|d| d / total).collect()
        } else {
            vec![0.0; self.impurity_decrease.len()]
        }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        fn depth_of(nodes: &[Node], index: usize) -> usize {
            match &nodes[index] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => {
                    1 + depth_of(nodes, *left).max(depth_of(nodes, *right))
                }
            }
        }
        depth_of(&self.nodes, 0)
    }

    // A tree fitted on no rows has a root leaf with an empty distribution.
    #[expect(clippy::cast_precision_loss)]
    fn fix_empty_leaves(&mut self, n_classes: usize) {
        for node in &mut self.nodes {
            if let Node::Leaf { distribution } = node {
                if distribution.is_empty() {
                    *distribution = vec![1.0 / n_classes.max(1) as f64; n_classes];
                }
            }
        }
    }
}

fn class_totals(data: &Dataset, weights: &[f64], rows: &[usize]) -> Vec<f64> {
    let mut totals = vec![0.0; data.n_classes()];
    for &row in rows {
        totals[data.classes()[row]] += weights[row];
    }
    totals
}

fn gini(totals: &[f64], weight: f64) -> f64 {
    if weight <= 0.0 {
        return 0.0;
    }
    1.0 - totals.iter().map(|t| (t / weight).powi(2)).sum::<f64>()
}

fn normalize_distribution(mut totals: Vec<f64>) -> Vec<f64> {
    let weight = totals.iter().sum::<f64>();
    if weight > 0.0 {
        for t in &mut totals {
            *t /= weight;
        }
    } else {
        totals.clear();
    }
    totals
}

fn best_split<R>(
    data: &Dataset,
    weights: &[f64],
    rows: &[usize],
    totals: &[f64],
    max_features: usize,
    rng: &mut R,
) -> Option<SplitCandidate>
where
    R: Rng + ?Sized,
{
    let mut features = (0..data.n_features()).collect::<Vec<_>>();
    features.shuffle(rng);

    let weight = totals.iter().sum::<f64>();
    let mut best: Option<SplitCandidate> = None;
    let mut examined = 0;
    let mut sorted = rows.to_vec();
    for feature in features {
        if examined >= max_features {
            break;
        }
        sorted.sort_by(|&a, &b| data.value(a, feature).total_cmp(&data.value(b, feature)));
        let first = data.value(sorted[0], feature);
        let last = data.value(sorted[sorted.len() - 1], feature);
        if first >= last {
            continue;
        }
        examined += 1;

        let mut left = vec![0.0; totals.len()];
        let mut left_weight = 0.0;
        for pair in sorted.windows(2) {
            let (row, next) = (pair[0], pair[1]);
            left[data.classes()[row]] += weights[row];
            left_weight += weights[row];

            let value = data.value(row, feature);
            let next_value = data.value(next, feature);
            if value >= next_value {
                continue;
            }

            let right = totals
                .iter()
                .zip(&left)
                .map(|(t, l)| (t - l).max(0.0))
                .collect::<Vec<_>>();
            let right_weight = (weight - left_weight).max(0.0);
            let children_impurity =
                left_weight * gini(&left, left_weight) + right_weight * gini(&right, right_weight);

            if best.is_none_or(|b| children_impurity < b.children_impurity) {
                best = Some(SplitCandidate {
                    feature,
                    threshold: midpoint(value, next_value),
                    children_impurity,
                });
            }
        }
    }
    best
}

/// A threshold `t` with `low <= t < high`.
fn midpoint(low: f64, high: f64) -> f64 {
    let mid = low / 2.0 + high / 2.0;
    if mid >= high || mid < low { low } else { mid }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::*;

    fn fit(data: &Dataset, config: &TreeConfig) -> DecisionTree {
        let weights = vec![1.0; data.len()];
        DecisionTree::fit(data, &weights, config, &mut Pcg32::seed_from_u64(1))
    }

    #[test]
    fn test_single_threshold_separates_classes() {
        let data = Dataset::new(
            vec![vec![1.0], vec![2.0], vec![3.0], vec![10.0], vec![11.0]],
            vec![0, 0, 0, 1, 1],
            2,
        );
        let tree = fit(&data, &TreeConfig::default());
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.predict_distribution(&[2.5]), &[1.0, 0.0]);
        // The threshold is the midpoint 6.5, which itself goes left.
        assert_eq!(tree.predict_distribution(&[6.5]), &[1.0, 0.0]);
        assert_eq!(tree.predict_distribution(&[7.0]), &[0.0, 1.0]);
        assert_eq!(tree.feature_importances(), vec![1.0]);
    }

    #[test]
    fn test_pure_node_is_leaf() {
        let data = Dataset::new(vec![vec![1.0], vec![5.0]], vec![1, 1], 3);
        let tree = fit(&data, &TreeConfig::default());
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.predict_distribution(&[0.0]), &[0.0, 1.0, 0.0]);
        assert_eq!(tree.feature_importances(), vec![0.0]);
    }

    #[test]
    fn test_constant_features_cannot_split() {
        let data = Dataset::new(vec![vec![4.0, 4.0], vec![4.0, 4.0]], vec![0, 1], 2);
        let tree = fit(&data, &TreeConfig::default());
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.predict_distribution(&[4.0, 4.0]), &[0.5, 0.5]);
    }

    #[test]
    fn test_max_depth_limits_growth() {
        let data = Dataset::new(
            (0..8).map(|i| vec![f64::from(i)]).collect(),
            vec![0, 1, 0, 1, 0, 1, 0, 1],
            2,
        );
        let unlimited = fit(&data, &TreeConfig::default());
        assert!(unlimited.depth() > 1);
        let stump = fit(
            &data,
            &TreeConfig {
                max_depth: Some(1),
                ..TreeConfig::default()
            },
        );
        assert_eq!(stump.depth(), 1);
    }

    #[test]
    fn test_weights_shift_leaf_distribution() {
        let data = Dataset::new(vec![vec![1.0], vec![1.0], vec![1.0]], vec![0, 0, 1], 2);
        let tree = DecisionTree::fit(
            &data,
            &[1.0, 1.0, 2.0],
            &TreeConfig::default(),
            &mut Pcg32::seed_from_u64(0),
        );
        assert_eq!(tree.predict_distribution(&[1.0]), &[0.5, 0.5]);
    }

    #[test]
    fn test_zero_weight_rows_are_ignored() {
        let data = Dataset::new(vec![vec![1.0], vec![2.0]], vec![0, 1], 2);
        let tree = DecisionTree::fit(
            &data,
            &[0.0, 3.0],
            &TreeConfig::default(),
            &mut Pcg32::seed_from_u64(0),
        );
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.predict_distribution(&[1.0]), &[0.0, 1.0]);
    }

    #[test]
    fn test_empty_fit_predicts_uniform() {
        let data = Dataset::new(vec![], vec![], 2);
        let tree = fit(&data, &TreeConfig::default());
        assert_eq!(tree.predict_distribution(&[]), &[0.5, 0.5]);
    }

    #[test]
    fn test_midpoint_stays_in_range() {
        assert_eq!(midpoint(1.0, 3.0), 2.0);
        let low: f64 = 1.0;
        let high = f64::from_bits(low.to_bits() + 1);
        let t = midpoint(low, high);
        assert!(low <= t && t < high);
    }

    #[test]
    fn test_max_features_resolve() {
        assert_eq!(MaxFeatures::Sqrt.resolve(11), 3);
        assert_eq!(MaxFeatures::All.resolve(11), 11);
        assert_eq!(MaxFeatures::Count(50).resolve(11), 11);
        assert_eq!(MaxFeatures::Count(0).resolve(11), 1);
    }
}
