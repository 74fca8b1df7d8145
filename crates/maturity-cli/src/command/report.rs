use std::path::PathBuf;

use chrono::{DateTime, Utc};
use maturity_classifier::evaluation::ClassifierEvaluation;
use maturity_overlap::layout::{OverlapCounts, OverlapLayout};
use maturity_projection::projection::Projection;
use maturity_table::summary::TableSummary;
use serde::Serialize;

use super::{
    classify::{self, ClassifierArg},
    overlap::{self, LayoutArg},
    project::{self, EllipseArg},
};
use crate::util::{Output, TableArg};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ReportArg {
    #[clap(flatten)]
    table: TableArg,
    #[clap(flatten)]
    classifier: ClassifierArg,
    #[clap(flatten)]
    ellipse: EllipseArg,
    /// JSON file with `total_a`, `total_b` and `overlap` counts for the
    /// overlap diagram
    #[arg(long)]
    overlap_counts: Option<PathBuf>,
    #[clap(flatten)]
    layout: LayoutArg,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct Report {
    generated_at: DateTime<Utc>,
    summary: TableSummary,
    classification: ClassifierEvaluation,
    projection: Projection,
    #[serde(skip_serializing_if = "Option::is_none")]
    overlap: Option<OverlapLayout>,
}

pub(crate) fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let ReportArg {
        table,
        classifier,
        ellipse,
        overlap_counts,
        layout,
        output,
    } = arg;

    let table = table.load()?;
    let summary = TableSummary::from_table(&table);
    eprintln!(
        "{} rows, {} classifiable ({})",
        summary.total, summary.classifiable, summary.classifiable_by_class
    );

    let classification = classify::run_classifier(&table, &classifier.config())?;
    let projection = project::run_projection(&table, &ellipse.config())?;
    let overlap = overlap_counts
        .as_ref()
        .map(|path| -> anyhow::Result<_> {
            let counts: OverlapCounts = crate::util::read_json_file("overlap counts", path)?;
            overlap::run_layout(&counts, &layout.config())
        })
        .transpose()?;

    let report = Report {
        generated_at: Utc::now(),
        summary,
        classification,
        projection,
        overlap,
    };
    Output::save_json(&report, output.clone())?;
    Ok(())
}
