//! Area-proportional two-set overlap diagrams.
//!
//! Given the cardinalities of two sets and of their intersection, this crate
//! finds two circles whose areas equal the set sizes and whose lens-shaped
//! intersection has an area equal to the overlap:
//!
//! - [`circle`]: radius for a cardinality and the closed-form lens area
//! - [`solver`]: center distance for a target lens area (bisection over the
//!   monotone area function)
//! - [`layout`]: validation, uniform rescaling and placement of both circles
//!
//! The radii of realistic inputs differ by orders of magnitude, so the
//! geometry is solved in true units and rescaled only at the end. Uniform
//! scaling preserves every area ratio.
//!
//! # Example
//!
//! ```
//! use maturity_overlap::{
//!     circle,
//!     layout::{LayoutConfig, OverlapCounts},
//! };
//!
//! let counts = OverlapCounts {
//!     total_a: 395_000_000,
//!     total_b: 30_608,
//!     overlap: 13_391,
//! };
//! let layout = counts.layout(&LayoutConfig::default())?;
//!
//! // The second set is the reference circle: radius 1 at the origin.
//! assert!((layout.b.radius - 1.0).abs() < 1e-12);
//! assert_eq!(layout.b.center, [0.0, 0.0]);
//!
//! let lens = circle::intersection_area(
//!     layout.unscaled.radius_a,
//!     layout.unscaled.radius_b,
//!     layout.unscaled.distance,
//! );
//! assert!((lens - 13_391.0).abs() / 13_391.0 < 1e-6);
//! # Ok::<(), maturity_overlap::layout::InvalidOverlapError>(())
//! ```

pub mod circle;
pub mod layout;
pub mod solver;
