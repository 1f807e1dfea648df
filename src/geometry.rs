//! Shared 2D primitives: vertex centroids, distances, angles about a center,
//! and angular sorting. Both the classify/regularize path and the stitcher
//! build on these.

use crate::errors::ValidationError;
use crate::float_types::Real;
use geo::{Coord, LineString};
use nalgebra::Vector2;

/// Arithmetic mean of a polyline's vertices.
///
/// This is deliberately not the length-weighted line centroid: every vertex
/// counts once, matching how the radial and angular tests treat a drawing as
/// a point set. Returns `None` for an empty polyline.
pub fn vertex_centroid(line: &LineString<Real>) -> Option<Coord<Real>> {
    if line.0.is_empty() {
        return None;
    }
    let n = line.0.len() as Real;
    let sum = line
        .0
        .iter()
        .fold(Coord { x: 0.0, y: 0.0 }, |acc, c| Coord {
            x: acc.x + c.x,
            y: acc.y + c.y,
        });
    Some(Coord {
        x: sum.x / n,
        y: sum.y / n,
    })
}

/// Euclidean distance between two coordinates.
#[inline]
pub fn distance(a: Coord<Real>, b: Coord<Real>) -> Real {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Angle of `p` as seen from `center`, in (-π, π].
#[inline]
pub fn angle_about(center: Coord<Real>, p: Coord<Real>) -> Real {
    (p.y - center.y).atan2(p.x - center.x)
}

/// Mean distance of the polyline's vertices from `center`.
pub fn mean_radius(center: Coord<Real>, line: &LineString<Real>) -> Real {
    if line.0.is_empty() {
        return 0.0;
    }
    let total: Real = line.0.iter().map(|&c| distance(center, c)).sum();
    total / line.0.len() as Real
}

/// Vertices sorted by ascending angle about `center`. The sort is stable, so
/// coincident angles keep their drawing order.
pub fn sorted_by_angle(center: Coord<Real>, line: &LineString<Real>) -> Vec<Coord<Real>> {
    let mut pts = line.0.clone();
    pts.sort_by(|p, q| angle_about(center, *p).total_cmp(&angle_about(center, *q)));
    pts
}

/// Unsigned turn angle at `b` between the edges `a -> b` and `b -> c`,
/// in [0, π]. A straight continuation turns by 0, a reversal by π.
pub fn turn_angle(a: Coord<Real>, b: Coord<Real>, c: Coord<Real>) -> Real {
    let incoming = Vector2::new(b.x - a.x, b.y - a.y);
    let outgoing = Vector2::new(c.x - b.x, c.y - b.y);
    incoming.angle(&outgoing)
}

/// Boundary check shared by every consumer of caller-supplied polylines:
/// at least 2 points, all coordinates finite.
pub fn validate_polyline(index: usize, line: &LineString<Real>) -> Result<(), ValidationError> {
    if line.0.len() < 2 {
        return Err(ValidationError::TooFewPoints {
            index,
            count: line.0.len(),
        });
    }
    for &c in &line.0 {
        if !c.x.is_finite() || !c.y.is_finite() {
            return Err(ValidationError::InvalidCoordinate(c));
        }
    }
    Ok(())
}
