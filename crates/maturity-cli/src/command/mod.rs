use clap::{Parser, Subcommand};

use self::{
    classify::ClassifyArg, overlap::OverlapArg, project::ProjectArg, report::ReportArg,
    summary::SummaryArg,
};

mod classify;
mod overlap;
mod project;
mod report;
mod summary;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Count records per validity subset and class
    Summary(#[clap(flatten)] SummaryArg),
    /// Train and evaluate the maturity classifier
    Classify(#[clap(flatten)] ClassifyArg),
    /// Project labeled records onto two principal components
    Project(#[clap(flatten)] ProjectArg),
    /// Solve an area-proportional two-circle overlap diagram
    Overlap(#[clap(flatten)] OverlapArg),
    /// Run every analysis and write one combined report
    Report(#[clap(flatten)] ReportArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Summary(arg) => summary::run(&arg)?,
        Mode::Classify(arg) => classify::run(&arg)?,
        Mode::Project(arg) => project::run(&arg)?,
        Mode::Overlap(arg) => overlap::run(&arg)?,
        Mode::Report(arg) => report::run(&arg)?,
    }
    Ok(())
}
