use std::path::PathBuf;

use maturity_projection::{
    ellipse::EllipseConfig,
    projection::{Projection, ProjectionConfig, project},
};
use maturity_table::table::Table;

use crate::util::{Output, TableArg};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EllipseArg {
    /// Confidence level of the class ellipses
    #[arg(long, default_value_t = 0.95)]
    confidence: f64,
    /// Fewest points a class needs to get an ellipse
    #[arg(long, default_value_t = 3)]
    min_points: usize,
}

impl Default for EllipseArg {
    fn default() -> Self {
        Self {
            confidence: 0.95,
            min_points: 3,
        }
    }
}

impl EllipseArg {
    pub(crate) fn config(&self) -> ProjectionConfig {
        ProjectionConfig {
            ellipse: EllipseConfig {
                min_points: self.min_points,
                ..EllipseConfig::with_confidence(self.confidence)
            },
        }
    }
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ProjectArg {
    #[clap(flatten)]
    table: TableArg,
    #[clap(flatten)]
    ellipse: EllipseArg,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ProjectArg) -> anyhow::Result<()> {
    let ProjectArg {
        table,
        ellipse,
        output,
    } = arg;
    let table = table.load()?;
    let projection = run_projection(&table, &ellipse.config())?;
    Output::save_json(&projection, output.clone())?;
    Ok(())
}

pub(crate) fn run_projection(
    table: &Table,
    config: &ProjectionConfig,
) -> anyhow::Result<Projection> {
    eprintln!("Computing principal component projection...");
    let projection = project(table, config)?;
    let [pc1, pc2] = projection.explained_variance_ratio;
    eprintln!(
        "Projected {} records (PC1 {:.1}%, PC2 {:.1}%)",
        projection.points.len(),
        pc1 * 100.0,
        pc2 * 100.0
    );
    for (class, fit) in projection.ellipses.iter() {
        match fit.ellipse() {
            Some(ellipse) => eprintln!(
                "  {class}: ellipse {:.3} x {:.3} at {:.1} deg",
                ellipse.width(),
                ellipse.height(),
                ellipse.angle_degrees()
            ),
            None => eprintln!("  {class}: no ellipse ({fit:?})"),
        }
    }
    Ok(projection)
}
