//! Validated, rescaled two-circle layout.

use serde::{Deserialize, Serialize};

use crate::{
    circle::radius_for,
    solver::{DistanceSolution, solve_distance},
};

/// Identifies one of the two sets.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
pub enum Circle {
    A,
    #[default]
    B,
}

/// The overlap exceeds one of the set sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("overlap {overlap} exceeds the smaller set (A: {total_a}, B: {total_b})")]
pub struct InvalidOverlapError {
    pub overlap: u64,
    pub total_a: u64,
    pub total_b: u64,
}

/// Cardinalities of two sets and their intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapCounts {
    pub total_a: u64,
    pub total_b: u64,
    pub overlap: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Circle placed at the origin and rescaled to `reference_radius`.
    pub reference: Circle,
    pub reference_radius: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            reference: Circle::B,
            reference_radius: 1.0,
        }
    }
}

/// Radii and center distance of the circle pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PairGeometry {
    pub radius_a: f64,
    pub radius_b: f64,
    pub distance: f64,
}

impl PairGeometry {
    fn scaled(self, factor: f64) -> Self {
        Self {
            radius_a: self.radius_a * factor,
            radius_b: self.radius_b * factor,
            distance: self.distance * factor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacedCircle {
    pub center: [f64; 2],
    pub radius: f64,
}

/// Result of [`OverlapCounts::layout`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverlapLayout {
    pub counts: OverlapCounts,
    /// Geometry in cardinality units, where each circle's area equals its set
    /// size.
    pub unscaled: PairGeometry,
    /// Factor applied to every length of `unscaled`.
    pub scale: f64,
    /// Distance solution after scaling.
    pub solution: DistanceSolution,
    pub a: PlacedCircle,
    pub b: PlacedCircle,
}

impl OverlapLayout {
    #[must_use]
    pub fn circle(&self, circle: Circle) -> &PlacedCircle {
        match circle {
            Circle::A => &self.a,
            Circle::B => &self.b,
        }
    }

    /// Scaled radii and center distance.
    #[must_use]
    pub fn geometry(&self) -> PairGeometry {
        PairGeometry {
            radius_a: self.a.radius,
            radius_b: self.b.radius,
            distance: self.solution.distance(),
        }
    }
}

impl OverlapCounts {
    /// Checks that the overlap fits in both sets.
    pub fn validate(&self) -> Result<(), InvalidOverlapError> {
        if self.overlap > self.total_a.min(self.total_b) {
            return Err(InvalidOverlapError {
                overlap: self.overlap,
                total_a: self.total_a,
                total_b: self.total_b,
            });
        }
        Ok(())
    }

    /// Solves the circle pair for these counts and places it.
    ///
    /// The geometry is solved in cardinality units, then every length is
    /// multiplied by one factor so that the reference circle has
    /// `config.reference_radius`. The reference circle is centered on the
    /// origin and the other circle at `(0, -d)`. An empty reference set
    /// cannot be rescaled and keeps a factor of `1`.
    #[expect(clippy::cast_precision_loss)]
    pub fn layout(&self, config: &LayoutConfig) -> Result<OverlapLayout, InvalidOverlapError> {
        self.validate()?;

        let radius_a = radius_for(self.total_a as f64);
        let radius_b = radius_for(self.total_b as f64);
        // Integer comparison: `π · radius_for(n)²` may round above `n`.
        let solution = if self.overlap == self.total_a.min(self.total_b) {
            DistanceSolution::Contained {
                distance: (radius_a - radius_b).abs(),
            }
        } else {
            solve_distance(radius_a, radius_b, self.overlap as f64)
        };
        let unscaled = PairGeometry {
            radius_a,
            radius_b,
            distance: solution.distance(),
        };

        let reference_radius = match config.reference {
            Circle::A => radius_a,
            Circle::B => radius_b,
        };
        let scale = if reference_radius > 0.0 {
            config.reference_radius / reference_radius
        } else {
            1.0
        };
        let scaled = unscaled.scaled(scale);
        let solution = solution.scaled(scale);

        let origin = [0.0, 0.0];
        let below = [0.0, -scaled.distance];
        let (center_a, center_b) = match config.reference {
            Circle::A => (origin, below),
            Circle::B => (below, origin),
        };
        tracing::info!(
            ?solution,
            scale,
            reference = %config.reference,
            "solved overlap layout"
        );

        Ok(OverlapLayout {
            counts: *self,
            unscaled,
            scale,
            solution,
            a: PlacedCircle {
                center: center_a,
                radius: scaled.radius_a,
            },
            b: PlacedCircle {
                center: center_b,
                radius: scaled.radius_b,
            },
        })
    }
}
