//! Stratified train/test splitting.
//!
//! The test set receives `ceil(test_fraction · n)` rows, allocated to classes
//! in proportion to their size by the largest-remainder rule. A class never
//! gives all of its members to the test set, so every class that has members
//! is represented in training. Within each class the rows are shuffled with a
//! seeded [`Pcg32`], which makes the split reproducible for a given seed and
//! input order.

use maturity_table::label::{MaturityClass, PerClass};
use rand::{SeedableRng, seq::SliceRandom};
use rand_pcg::Pcg32;

/// Parameters of a stratified split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitConfig {
    /// Fraction of rows held out for testing, in `[0, 1]`.
    pub test_fraction: f64,
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
        }
    }
}

/// Row indices of each side of a split.
///
/// Rows are grouped by class in display order; within a class they appear in
/// shuffled order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Splits row indices `0..classes.len()` into train and test sets,
/// preserving class proportions.
///
/// # Examples
///
/// ```
/// use maturity_classifier::split::{SplitConfig, stratified_split};
/// use maturity_table::label::MaturityClass;
///
/// let classes = [MaturityClass::Mature; 8]
///     .into_iter()
///     .chain([MaturityClass::Legacy; 2])
///     .collect::<Vec<_>>();
/// let split = stratified_split(&classes, &SplitConfig::default());
/// assert_eq!(split.test.len(), 2);
/// assert_eq!(split.train.len(), 8);
/// ```
#[must_use]
pub fn stratified_split(classes: &[MaturityClass], config: &SplitConfig) -> TrainTestSplit {
    let sizes = PerClass::count(classes.iter().copied());
    let test_sizes = allocate_test_sizes(&sizes, config.test_fraction);

    let mut rng = Pcg32::seed_from_u64(config.seed);
    let mut train = Vec::with_capacity(classes.len());
    let mut test = Vec::with_capacity(test_sizes.total());
    for class in MaturityClass::ALL {
        let mut members = classes
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == class)
            .map(|(i, _)| i)
            .collect::<Vec<_>>();
        members.shuffle(&mut rng);
        let (class_test, class_train) = members.split_at(test_sizes[class]);
        test.extend_from_slice(class_test);
        train.extend_from_slice(class_train);
    }

    tracing::debug!(
        train = train.len(),
        test = test.len(),
        %test_sizes,
        "stratified split"
    );
    TrainTestSplit { train, test }
}

#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn allocate_test_sizes(sizes: &PerClass<usize>, test_fraction: f64) -> PerClass<usize> {
    let total = sizes.total();
    if total == 0 {
        return PerClass::default();
    }
    // Guard against products like 0.2 * 35 landing a hair above an integer.
    let n_test = ((test_fraction.clamp(0.0, 1.0) * total as f64 - 1e-9).ceil() as usize).min(total);

    let exact = sizes.map(|_, size| n_test as f64 * *size as f64 / total as f64);
    let caps = sizes.map(|_, size| size.saturating_sub(1));
    let mut alloc = PerClass::from_fn(|class| (exact[class].floor() as usize).min(caps[class]));

    let mut order = MaturityClass::ALL;
    order.sort_by(|a, b| {
        let frac_a = exact[*a] - exact[*a].floor();
        let frac_b = exact[*b] - exact[*b].floor();
        frac_b.total_cmp(&frac_a).then(a.cmp(b))
    });

    let mut remaining = n_test.saturating_sub(alloc.total());
    while remaining > 0 {
        let mut progressed = false;
        for class in order {
            if remaining == 0 {
                break;
            }
            if alloc[class] < caps[class] {
                alloc[class] += 1;
                remaining -= 1;
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }
    alloc
}
