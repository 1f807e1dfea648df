//! Mirror-axis hints for classified shapes, emitted as plain segments for
//! the caller's renderer to overlay.

use crate::classify::ShapeKind;
use crate::float_types::Real;
use crate::geometry::vertex_centroid;
use geo::{BoundingRect, Coord, Line, LineString};

/// Bounding-box aspect band inside which a rectangle is treated as a square
/// and receives both axes.
pub const SQUARE_ASPECT_LOW: Real = 0.9;
/// Upper bound of the square aspect band.
pub const SQUARE_ASPECT_HIGH: Real = 1.1;

/// Mirror axes for a polyline already classified as `kind`.
///
/// Circles and stars get the two bounding-box axes through the centroid,
/// rectangles one axis (or both when square-like), triangles an axis per
/// edge midpoint, hexagons an axis per vertex, pentagons the vertical.
/// Irregular shapes claim no symmetry. The list is empty rather than an
/// error for anything without a usable bounding box.
pub fn symmetry_axes(line: &LineString<Real>, kind: ShapeKind) -> Vec<Line<Real>> {
    let (Some(center), Some(rect)) = (vertex_centroid(line), line.bounding_rect()) else {
        return Vec::new();
    };

    let vertical = Line::new(
        Coord {
            x: center.x,
            y: rect.min().y,
        },
        Coord {
            x: center.x,
            y: rect.max().y,
        },
    );
    let horizontal = Line::new(
        Coord {
            x: rect.min().x,
            y: center.y,
        },
        Coord {
            x: rect.max().x,
            y: center.y,
        },
    );

    match kind {
        ShapeKind::Circle | ShapeKind::Star10 => vec![vertical, horizontal],
        ShapeKind::Rectangle | ShapeKind::RegularPolygon(4) => {
            let aspect = rect.width() / rect.height();
            if (SQUARE_ASPECT_LOW..=SQUARE_ASPECT_HIGH).contains(&aspect) {
                vec![vertical, horizontal]
            } else if rect.width() > rect.height() {
                vec![vertical]
            } else {
                vec![horizontal]
            }
        },
        ShapeKind::RegularPolygon(3) => {
            let pts = &line.0;
            (0..3)
                .map(|i| {
                    let a = pts[i % pts.len()];
                    let b = pts[(i + 1) % pts.len()];
                    let mid = Coord {
                        x: (a.x + b.x) / 2.0,
                        y: (a.y + b.y) / 2.0,
                    };
                    Line::new(mid, center)
                })
                .collect()
        },
        ShapeKind::RegularPolygon(5) => vec![vertical],
        ShapeKind::RegularPolygon(6) => {
            line.0.iter().map(|&v| Line::new(v, center)).collect()
        },
        ShapeKind::RegularPolygon(_) | ShapeKind::Irregular => Vec::new(),
    }
}
