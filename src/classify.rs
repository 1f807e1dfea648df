//! Shape classification against the fixed canonical taxonomy.
//!
//! A polyline is read as a bag of vertices and matched against circle,
//! rectangle, regular N-gon (N = 3..6) and 10-point star tests. Exactly one
//! [`ShapeKind`] comes back; anything unmatched is [`ShapeKind::Irregular`]
//! and passes through the regularizer unchanged.

use crate::float_types::{FRAC_PI_2, PI, Real, TAU};
use crate::geometry::{angle_about, distance, mean_radius, turn_angle, vertex_centroid};
use geo::{Coord, LineString};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Radial spread accepted by the circle test, as a fraction of the mean
/// radius. Mean-relative, so the test is scale-invariant.
pub const CIRCLE_RADIUS_TOLERANCE: Real = 0.10;

/// Angular band accepted by the rectangle and regular-polygon tests: 5°.
pub const ANGLE_TOLERANCE: Real = PI / 36.0;

/// The closed set of canonical shapes this engine recognizes.
///
/// `RegularPolygon` carries its side count; the classifier only produces
/// 3 through 6. `Irregular` is the explicit pass-through kind, so every
/// consumer matches exhaustively instead of falling through on a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Circle,
    Rectangle,
    RegularPolygon(usize),
    Star10,
    Irregular,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Circle => write!(f, "circle"),
            ShapeKind::Rectangle => write!(f, "rectangle"),
            ShapeKind::RegularPolygon(sides) => write!(f, "regular {}-gon", sides),
            ShapeKind::Star10 => write!(f, "star"),
            ShapeKind::Irregular => write!(f, "irregular"),
        }
    }
}

/// Tolerance bands consumed by the classifier. [`Tolerances::default`] wires
/// the named constants; tests tighten or loosen them per call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerances {
    /// Accepted radial spread as a fraction of the mean radius.
    pub circle_radius_ratio: Real,
    /// Accepted deviation from the ideal turn or gap angle, in radians.
    pub angle: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Tolerances {
            circle_radius_ratio: CIRCLE_RADIUS_TOLERANCE,
            angle: ANGLE_TOLERANCE,
        }
    }
}

/// Classify a polyline with the default [`Tolerances`].
pub fn classify(line: &LineString<Real>) -> ShapeKind {
    classify_with(line, &Tolerances::default())
}

/// Classify a polyline into exactly one [`ShapeKind`]. Pure and
/// deterministic; callers validate point counts at the boundary, so inputs
/// below 2 points simply read as `Irregular` here.
///
/// The exact-count tests own their vertex counts: 4 points try rectangle
/// first and the 4-gon gap test second, 10 points are a star unconditionally,
/// 3/5/6 points try the matching N-gon, and every other count runs the
/// radial circle test. Owning the counts this way keeps classification
/// stable under regularization; the one inherent overlap is that a regular
/// 4-gon is a square, and squares read as `Rectangle` because the rectangle
/// test has priority at 4 points.
pub fn classify_with(line: &LineString<Real>, tolerances: &Tolerances) -> ShapeKind {
    let n = line.0.len();
    let Some(center) = vertex_centroid(line) else {
        return ShapeKind::Irregular;
    };
    match n {
        0 | 1 => ShapeKind::Irregular,
        4 => {
            if is_rectangle(line, tolerances) {
                ShapeKind::Rectangle
            } else if is_regular_polygon(center, line, 4, tolerances) {
                ShapeKind::RegularPolygon(4)
            } else {
                ShapeKind::Irregular
            }
        },
        // Any decagon counts as a star. The upstream drawing tool never
        // produces other 10-point shapes, so no radial check is applied;
        // tightening this would change observable classifications.
        10 => ShapeKind::Star10,
        3 | 5 | 6 => {
            if is_regular_polygon(center, line, n, tolerances) {
                ShapeKind::RegularPolygon(n)
            } else {
                ShapeKind::Irregular
            }
        },
        _ => {
            if is_circle(center, line, tolerances) {
                ShapeKind::Circle
            } else {
                ShapeKind::Irregular
            }
        },
    }
}

/// Every vertex within `circle_radius_ratio` of the mean radius. Coincident
/// inputs fail automatically: a zero mean radius gives a zero-width band.
fn is_circle(center: Coord<Real>, line: &LineString<Real>, tolerances: &Tolerances) -> bool {
    let mean = mean_radius(center, line);
    let band = mean * tolerances.circle_radius_ratio;
    line.0.iter().all(|&c| (distance(center, c) - mean).abs() < band)
}

/// Every cyclic turn within `angle` of a right angle.
fn is_rectangle(line: &LineString<Real>, tolerances: &Tolerances) -> bool {
    let pts = &line.0;
    (0..4).all(|i| {
        let turn = turn_angle(pts[i], pts[(i + 1) % 4], pts[(i + 2) % 4]);
        (turn - FRAC_PI_2).abs() <= tolerances.angle
    })
}

/// Sorted angular gaps about the centroid (wrapping last back to first) all
/// within `angle` of the ideal 2π/sides.
fn is_regular_polygon(
    center: Coord<Real>,
    line: &LineString<Real>,
    sides: usize,
    tolerances: &Tolerances,
) -> bool {
    let mut angles: Vec<Real> = line.0.iter().map(|&c| angle_about(center, c)).collect();
    angles.sort_by(Real::total_cmp);
    let step = TAU / sides as Real;
    let n = angles.len();
    (0..n).all(|i| {
        let gap = if i + 1 == n {
            angles[0] + TAU - angles[n - 1]
        } else {
            angles[i + 1] - angles[i]
        };
        (gap - step).abs() <= tolerances.angle
    })
}
