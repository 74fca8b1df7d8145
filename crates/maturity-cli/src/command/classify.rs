use std::path::PathBuf;

use maturity_classifier::{
    evaluation::{ClassifierEvaluation, EvaluatorConfig, evaluate},
    forest::{ClassWeighting, ForestConfig},
    split::SplitConfig,
};
use maturity_table::table::Table;

use crate::util::{Output, TableArg};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ClassifierArg {
    /// Fraction of records held out for evaluation
    #[arg(long, default_value_t = 0.2)]
    test_fraction: f64,
    /// Number of trees in the forest
    #[arg(long, default_value_t = 300)]
    trees: usize,
    /// Maximum tree depth (unlimited if omitted)
    #[arg(long)]
    max_depth: Option<usize>,
    /// Weight every record equally instead of balancing class weights
    #[arg(long)]
    unweighted: bool,
    /// Seed for the split and the forest
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

impl Default for ClassifierArg {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            trees: 300,
            max_depth: None,
            unweighted: false,
            seed: 42,
        }
    }
}

impl ClassifierArg {
    pub(crate) fn config(&self) -> EvaluatorConfig {
        EvaluatorConfig {
            split: SplitConfig {
                test_fraction: self.test_fraction,
                seed: self.seed,
            },
            forest: ForestConfig {
                n_trees: self.trees,
                max_depth: self.max_depth,
                class_weighting: if self.unweighted {
                    ClassWeighting::Uniform
                } else {
                    ClassWeighting::Balanced
                },
                seed: self.seed,
                ..ForestConfig::default()
            },
        }
    }
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ClassifyArg {
    #[clap(flatten)]
    table: TableArg,
    #[clap(flatten)]
    classifier: ClassifierArg,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ClassifyArg) -> anyhow::Result<()> {
    let ClassifyArg {
        table,
        classifier,
        output,
    } = arg;
    let table = table.load()?;
    let evaluation = run_classifier(&table, &classifier.config())?;
    Output::save_json(&evaluation, output.clone())?;
    Ok(())
}

pub(crate) fn run_classifier(
    table: &Table,
    config: &EvaluatorConfig,
) -> anyhow::Result<ClassifierEvaluation> {
    eprintln!(
        "Training random forest ({} trees, test fraction {})...",
        config.forest.n_trees, config.split.test_fraction
    );
    let evaluation = evaluate(table, config)?;
    eprintln!(
        "Trained on {} records, evaluated on {}",
        evaluation.train_size, evaluation.test_size
    );
    eprintln!();
    eprintln!("Confusion matrix (rows = truth, columns = predicted):");
    eprintln!("{}", evaluation.confusion);
    eprintln!();
    eprintln!("{}", evaluation.report);
    eprintln!("Feature importances:");
    eprintln!("{}", evaluation.importances);
    Ok(evaluation)
}
