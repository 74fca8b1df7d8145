use std::path::PathBuf;

use anyhow::Context as _;
use maturity_overlap::layout::{Circle, LayoutConfig, OverlapCounts, OverlapLayout};

use crate::util::Output;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct LayoutArg {
    /// Circle placed at the origin with the reference radius (A or B)
    #[arg(long, default_value = "B")]
    reference: Circle,
    /// Radius of the reference circle after rescaling
    #[arg(long, default_value_t = 1.0)]
    reference_radius: f64,
}

impl Default for LayoutArg {
    fn default() -> Self {
        Self {
            reference: Circle::B,
            reference_radius: 1.0,
        }
    }
}

impl LayoutArg {
    pub(crate) fn config(&self) -> LayoutConfig {
        LayoutConfig {
            reference: self.reference,
            reference_radius: self.reference_radius,
        }
    }
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct OverlapArg {
    /// Size of the first set
    #[arg(long)]
    total_a: u64,
    /// Size of the second set
    #[arg(long)]
    total_b: u64,
    /// Size of the intersection
    #[arg(long)]
    overlap: u64,
    #[clap(flatten)]
    layout: LayoutArg,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &OverlapArg) -> anyhow::Result<()> {
    let counts = OverlapCounts {
        total_a: arg.total_a,
        total_b: arg.total_b,
        overlap: arg.overlap,
    };
    let layout = run_layout(&counts, &arg.layout.config())?;
    Output::save_json(&layout, arg.output.clone())?;
    Ok(())
}

pub(crate) fn run_layout(
    counts: &OverlapCounts,
    config: &LayoutConfig,
) -> anyhow::Result<OverlapLayout> {
    eprintln!(
        "Solving overlap layout for |A| = {}, |B| = {}, |A ∩ B| = {}...",
        counts.total_a, counts.total_b, counts.overlap
    );
    let layout = counts
        .layout(config)
        .context("Failed to solve overlap layout")?;
    let geometry = layout.geometry();
    eprintln!(
        "Radii A = {:.4}, B = {:.4}; center distance {:.4} (scale {:.3e})",
        geometry.radius_a, geometry.radius_b, geometry.distance, layout.scale
    );
    Ok(layout)
}
