//! Circle geometry in cardinality units.

use std::f64::consts::PI;

/// Radius of a circle whose area equals `cardinality`.
///
/// ```
/// use maturity_overlap::circle::radius_for;
///
/// let r = radius_for(100.0);
/// assert!((std::f64::consts::PI * r * r - 100.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn radius_for(cardinality: f64) -> f64 {
    (cardinality / PI).sqrt()
}

/// Largest possible intersection of circles with radii `r1` and `r2`: the
/// area of the smaller circle.
#[must_use]
pub fn max_intersection_area(r1: f64, r2: f64) -> f64 {
    PI * r1.min(r2).powi(2)
}

/// Area of the intersection of two circles with radii `r1`, `r2` whose
/// centers are `d` apart.
///
/// Non-increasing in `d` on `[|r1 - r2|, r1 + r2]`, equal to
/// [`max_intersection_area`] below that range and to zero above it.
///
/// # Examples
///
/// ```
/// use maturity_overlap::circle::intersection_area;
///
/// assert_eq!(intersection_area(5.0, 3.0, 8.0), 0.0);
/// assert_eq!(intersection_area(5.0, 3.0, 1.0), std::f64::consts::PI * 9.0);
/// let lens = intersection_area(5.0, 3.0, 4.0);
/// assert!(lens > 0.0 && lens < std::f64::consts::PI * 9.0);
/// ```
#[must_use]
pub fn intersection_area(r1: f64, r2: f64, d: f64) -> f64 {
    if d >= r1 + r2 {
        return 0.0;
    }
    if d <= (r1 - r2).abs() {
        return max_intersection_area(r1, r2);
    }

    let (big, small) = if r1 >= r2 { (r1, r2) } else { (r2, r1) };
    // Signed distances from each center to the common chord, measured toward
    // the other center. `d - big` is exact when the small center sits near
    // the big circle's rim.
    let x_small = ((d - big) * (d + big) + small * small) / (2.0 * d);
    let x_big = d - x_small;
    let half_chord = ((small - x_small) * (small + x_small)).max(0.0).sqrt();

    segment_area(big, half_chord.atan2(x_big)) + segment_area(small, half_chord.atan2(x_small))
}

/// Area of the circular segment of radius `r` cut off by a chord that
/// subtends the half-angle `theta` at the center.
fn segment_area(r: f64, theta: f64) -> f64 {
    0.5 * r * r * angle_minus_sine(2.0 * theta)
}

/// `t - sin(t)`, expanded as a series for small `t` where the subtraction
/// cancels.
fn angle_minus_sine(t: f64) -> f64 {
    if t < 0.1 {
        let t2 = t * t;
        t * t2 / 6.0 * (1.0 - t2 / 20.0 * (1.0 - t2 / 42.0 * (1.0 - t2 / 72.0)))
    } else {
        t - t.sin()
    }
}
