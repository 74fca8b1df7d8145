//! Center distance for a target intersection area.

use serde::Serialize;

use crate::circle::{intersection_area, max_intersection_area};

/// Bisection steps. The initial bracket is at most `r1 + r2` wide, so the
/// final error is below `(r1 + r2) / 2^60`.
pub const SEARCH_ITERATIONS: usize = 60;

/// Margin keeping the bisection bracket strictly inside the lens range.
pub const BRACKET_EPSILON: f64 = 1e-6;

/// Center distance solved by [`solve_distance`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DistanceSolution {
    /// The target is at least the area of the smaller circle: it lies
    /// entirely inside the larger one (internally tangent).
    Contained { distance: f64 },
    /// The target is zero: the circles touch externally.
    Disjoint { distance: f64 },
    /// Found by bisection.
    Searched { distance: f64 },
}

impl DistanceSolution {
    #[must_use]
    pub fn distance(&self) -> f64 {
        match *self {
            Self::Contained { distance }
            | Self::Disjoint { distance }
            | Self::Searched { distance } => distance,
        }
    }

    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        match self {
            Self::Contained { distance } => Self::Contained {
                distance: distance * factor,
            },
            Self::Disjoint { distance } => Self::Disjoint {
                distance: distance * factor,
            },
            Self::Searched { distance } => Self::Searched {
                distance: distance * factor,
            },
        }
    }
}

/// Finds the center distance at which circles of radii `r1` and `r2`
/// intersect in `target_area`.
///
/// The containment case is checked first, so two empty circles with an empty
/// target are reported as [`DistanceSolution::Contained`].
///
/// # Examples
///
/// ```
/// use maturity_overlap::{circle::intersection_area, solver::solve_distance};
///
/// let target = intersection_area(5.0, 3.0, 4.0);
/// let d = solve_distance(5.0, 3.0, target).distance();
/// assert!((d - 4.0).abs() < 1e-3);
/// ```
#[must_use]
pub fn solve_distance(r1: f64, r2: f64, target_area: f64) -> DistanceSolution {
    if target_area >= max_intersection_area(r1, r2) {
        return DistanceSolution::Contained {
            distance: (r1 - r2).abs(),
        };
    }
    if target_area <= 0.0 {
        return DistanceSolution::Disjoint { distance: r1 + r2 };
    }

    let mut lo = (r1 - r2).abs() + BRACKET_EPSILON;
    let mut hi = r1 + r2 - BRACKET_EPSILON;
    for _ in 0..SEARCH_ITERATIONS {
        let mid = 0.5 * (lo + hi);
        if intersection_area(r1, r2, mid) > target_area {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    let distance = 0.5 * (lo + hi);
    tracing::debug!(r1, r2, target_area, distance, "bisected center distance");
    DistanceSolution::Searched { distance }
}
