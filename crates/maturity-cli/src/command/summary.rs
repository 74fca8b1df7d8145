use std::path::PathBuf;

use maturity_table::summary::TableSummary;

use crate::util::{Output, TableArg};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SummaryArg {
    #[clap(flatten)]
    table: TableArg,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SummaryArg) -> anyhow::Result<()> {
    let SummaryArg { table, output } = arg;
    let table = table.load()?;

    let summary = TableSummary::from_table(&table);
    eprintln!(
        "{} rows, {} with source link, {} valid, {} classifiable ({})",
        summary.total,
        summary.with_source_link,
        summary.valid,
        summary.classifiable,
        summary.classifiable_by_class
    );

    Output::save_json(&summary, output.clone())?;
    Ok(())
}
