//! Canonical shape emission.
//!
//! Given a polyline and the [`ShapeKind`] the classifier assigned it, emit
//! the idealized point set: centered on the vertex centroid, radii averaged,
//! angles evenly spaced. Circles, polygons and stars re-anchor their first
//! vertex at angle 0, trading the original orientation for a normal form;
//! rectangles keep the orientation of their first sorted edge.

use crate::classify::ShapeKind;
use crate::errors::ValidationError;
use crate::float_types::{PI, Real, TAU, tolerance};
use crate::geometry::{distance, mean_radius, sorted_by_angle, vertex_centroid};
use geo::{Coord, LineString};
use nalgebra::{Rotation2, Vector2};

/// Emit the canonical form of `line` for `kind`.
///
/// Total for valid polylines: `Irregular` echoes the input, every other kind
/// produces a fresh canonical point set. Fails with
/// [`ValidationError::DegenerateShape`] when coincident input leaves no
/// usable radius or extent to build from.
pub fn regularize(
    line: &LineString<Real>,
    kind: ShapeKind,
) -> Result<LineString<Real>, ValidationError> {
    match kind {
        ShapeKind::Irregular => Ok(line.clone()),
        ShapeKind::Circle => circle(line),
        ShapeKind::Rectangle => rectangle(line),
        ShapeKind::Star10 => star(line),
        ShapeKind::RegularPolygon(sides) => regular_ngon(line, sides),
    }
}

fn centroid_of(line: &LineString<Real>) -> Result<Coord<Real>, ValidationError> {
    vertex_centroid(line).ok_or(ValidationError::TooFewPoints {
        index: 0,
        count: line.0.len(),
    })
}

/// Mean-radius circle with as many vertices as the input, first vertex at
/// angle 0.
fn circle(line: &LineString<Real>) -> Result<LineString<Real>, ValidationError> {
    let center = centroid_of(line)?;
    let radius = mean_radius(center, line);
    if radius <= tolerance() {
        return Err(ValidationError::DegenerateShape(center));
    }
    let n = line.0.len();
    Ok(ring(center, n, |_| radius))
}

/// Mean-radius regular polygon, one vertex per side, first vertex at
/// angle 0.
fn regular_ngon(
    line: &LineString<Real>,
    sides: usize,
) -> Result<LineString<Real>, ValidationError> {
    let center = centroid_of(line)?;
    if sides < 3 {
        return Err(ValidationError::DegenerateShape(center));
    }
    let radius = mean_radius(center, line);
    if radius <= tolerance() {
        return Err(ValidationError::DegenerateShape(center));
    }
    Ok(ring(center, sides, |_| radius))
}

/// Ten vertices alternating between two averaged radii at 36° steps.
///
/// The vertices are sorted by angle about the centroid; even sorted indices
/// average into one radius, odd indices into the other. When the drawing
/// alternates spikes and notches this recovers the outer and inner radius;
/// for anything else it still emits a well-formed decagram from the two
/// averages.
fn star(line: &LineString<Real>) -> Result<LineString<Real>, ValidationError> {
    let center = centroid_of(line)?;
    let sorted = sorted_by_angle(center, line);
    if sorted.len() < 2 {
        return Err(ValidationError::TooFewPoints {
            index: 0,
            count: sorted.len(),
        });
    }
    let averaged = |parity: usize| {
        let picked: Vec<Real> = sorted
            .iter()
            .enumerate()
            .filter(|(i, _)| i % 2 == parity)
            .map(|(_, &c)| distance(center, c))
            .collect();
        picked.iter().sum::<Real>() / picked.len() as Real
    };
    let outer = averaged(0);
    let inner = averaged(1);
    if outer.max(inner) <= tolerance() {
        return Err(ValidationError::DegenerateShape(center));
    }
    let step = PI / 5.0;
    let pts = (0..10)
        .map(|i| {
            let radius = if i % 2 == 0 { outer } else { inner };
            let theta = step * i as Real;
            Coord {
                x: center.x + radius * theta.cos(),
                y: center.y + radius * theta.sin(),
            }
        })
        .collect();
    Ok(LineString::new(pts))
}

/// Oriented rectangle recovered from the angular sort.
///
/// Sorting the four corners by angle about the centroid recovers a
/// counter-clockwise winding regardless of drawing order. The first two
/// sorted corners span the width, the next pair the height, and the
/// direction of the first edge fixes the orientation. The emission walks the
/// four corners of that oriented box starting at the corner nearest
/// `sorted[0]`, so a rectangle that is already canonical maps to itself.
fn rectangle(line: &LineString<Real>) -> Result<LineString<Real>, ValidationError> {
    let center = centroid_of(line)?;
    let sorted = sorted_by_angle(center, line);
    if sorted.len() < 3 {
        return Err(ValidationError::TooFewPoints {
            index: 0,
            count: sorted.len(),
        });
    }
    let width = distance(sorted[0], sorted[1]);
    let height = distance(sorted[1], sorted[2]);
    if width <= tolerance() || height <= tolerance() {
        return Err(ValidationError::DegenerateShape(center));
    }
    let theta = (sorted[1].y - sorted[0].y).atan2(sorted[1].x - sorted[0].x);
    let rot = Rotation2::new(theta);
    let u = rot * Vector2::new(1.0, 0.0);
    let v = rot * Vector2::new(0.0, 1.0);
    let (hw, hh) = (width / 2.0, height / 2.0);
    let corner = |su: Real, sv: Real| Coord {
        x: center.x + su * u.x + sv * v.x,
        y: center.y + su * u.y + sv * v.y,
    };
    Ok(LineString::new(vec![
        corner(-hw, -hh),
        corner(hw, -hh),
        corner(hw, hh),
        corner(-hw, hh),
    ]))
}

/// `count` vertices around `center` at evenly spaced angles from 0, with a
/// per-vertex radius function.
fn ring(center: Coord<Real>, count: usize, radius_at: impl Fn(usize) -> Real) -> LineString<Real> {
    let pts = (0..count)
        .map(|i| {
            let theta = TAU * i as Real / count as Real;
            Coord {
                x: center.x + radius_at(i) * theta.cos(),
                y: center.y + radius_at(i) * theta.sin(),
            }
        })
        .collect();
    LineString::new(pts)
}
