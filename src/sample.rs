//! Sampling of parametric paths into polylines.
//!
//! Upstream vector sources hand this engine paths made of Bézier segments.
//! Nothing downstream understands curves, so a path is flattened here by
//! evaluating it at a fixed number of evenly spaced parameter values over
//! [0, 1], the global parameter mapping uniformly across segments.

use crate::errors::ValidationError;
use crate::float_types::Real;
use geo::{Coord, LineString};
use serde::{Deserialize, Serialize};

/// Sample count used when the caller does not specify one.
pub const DEFAULT_SAMPLES: usize = 100;

/// One Bézier segment of a parametric path, any degree: 2 control points
/// make a line, 3 a quadratic, 4 a cubic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    pub control: Vec<Coord<Real>>,
}

impl PathSegment {
    /// Segment from an arbitrary control polygon.
    pub const fn new(control: Vec<Coord<Real>>) -> Self {
        PathSegment { control }
    }

    /// Straight segment.
    pub fn line(start: Coord<Real>, end: Coord<Real>) -> Self {
        PathSegment {
            control: vec![start, end],
        }
    }

    /// Quadratic Bézier.
    pub fn quadratic(start: Coord<Real>, ctrl: Coord<Real>, end: Coord<Real>) -> Self {
        PathSegment {
            control: vec![start, ctrl, end],
        }
    }

    /// Cubic Bézier.
    pub fn cubic(
        start: Coord<Real>,
        ctrl1: Coord<Real>,
        ctrl2: Coord<Real>,
        end: Coord<Real>,
    ) -> Self {
        PathSegment {
            control: vec![start, ctrl1, ctrl2, end],
        }
    }
}

// de Casteljau evaluator
fn de_casteljau(ctrl: &[Coord<Real>], t: Real, tmp: &mut Vec<Coord<Real>>) -> Coord<Real> {
    tmp.clear();
    tmp.extend_from_slice(ctrl);
    let n = tmp.len();
    for k in 1..n {
        for i in 0..(n - k) {
            tmp[i].x = (1.0 - t) * tmp[i].x + t * tmp[i + 1].x;
            tmp[i].y = (1.0 - t) * tmp[i].y + t * tmp[i + 1].y;
        }
    }
    tmp[0]
}

/// Flatten a parametric path into one polyline of `samples` points.
///
/// The global parameter runs over [0, 1] inclusive and is split uniformly
/// across segments by count, not by arc length, matching the path objects
/// the vector frontend produces. Needs at least one segment, two control
/// points per segment, and `samples >= 2`.
pub fn sample_path(
    segments: &[PathSegment],
    samples: usize,
) -> Result<LineString<Real>, ValidationError> {
    if segments.is_empty() {
        return Err(ValidationError::EmptyBatch);
    }
    for (index, segment) in segments.iter().enumerate() {
        if segment.control.len() < 2 {
            return Err(ValidationError::TooFewPoints {
                index,
                count: segment.control.len(),
            });
        }
        for &c in &segment.control {
            if !c.x.is_finite() || !c.y.is_finite() {
                return Err(ValidationError::InvalidCoordinate(c));
            }
        }
    }
    if samples < 2 {
        return Err(ValidationError::TooFewPoints {
            index: 0,
            count: samples,
        });
    }

    let segment_count = segments.len() as Real;
    let mut tmp = Vec::with_capacity(4);
    let pts = (0..samples)
        .map(|i| {
            let t = i as Real / (samples - 1) as Real;
            let scaled = t * segment_count;
            let k = (scaled.floor() as usize).min(segments.len() - 1);
            let local = scaled - k as Real;
            de_casteljau(&segments[k].control, local, &mut tmp)
        })
        .collect();
    Ok(LineString::new(pts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: Real, y: Real) -> Coord<Real> {
        Coord { x, y }
    }

    fn approx(a: Coord<Real>, b: Coord<Real>) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn line_samples_evenly() {
        let path = [PathSegment::line(c(0.0, 0.0), c(4.0, 0.0))];
        let out = sample_path(&path, 5).unwrap();
        assert_eq!(out.0.len(), 5);
        for (i, &p) in out.0.iter().enumerate() {
            assert!(approx(p, c(i as Real, 0.0)));
        }
    }

    #[test]
    fn quadratic_midpoint() {
        let path = [PathSegment::quadratic(c(0.0, 0.0), c(1.0, 2.0), c(2.0, 0.0))];
        let out = sample_path(&path, 3).unwrap();
        assert!(approx(out.0[0], c(0.0, 0.0)));
        assert!(approx(out.0[1], c(1.0, 1.0)));
        assert!(approx(out.0[2], c(2.0, 0.0)));
    }

    #[test]
    fn cubic_hits_its_endpoints() {
        let path = [PathSegment::cubic(
            c(-1.0, -1.0),
            c(0.0, 3.0),
            c(2.0, -3.0),
            c(3.0, 1.0),
        )];
        let out = sample_path(&path, DEFAULT_SAMPLES).unwrap();
        assert_eq!(out.0.len(), DEFAULT_SAMPLES);
        assert!(approx(out.0[0], c(-1.0, -1.0)));
        assert!(approx(out.0[DEFAULT_SAMPLES - 1], c(3.0, 1.0)));
    }

    #[test]
    fn parameter_splits_uniformly_across_segments() {
        let path = [
            PathSegment::line(c(0.0, 0.0), c(2.0, 0.0)),
            PathSegment::line(c(2.0, 0.0), c(2.0, 2.0)),
        ];
        let out = sample_path(&path, 5).unwrap();
        let expected = [
            c(0.0, 0.0),
            c(1.0, 0.0),
            c(2.0, 0.0),
            c(2.0, 1.0),
            c(2.0, 2.0),
        ];
        for (&got, &want) in out.0.iter().zip(&expected) {
            assert!(approx(got, want));
        }
    }

    #[test]
    fn rejects_empty_and_undersized_input() {
        assert!(matches!(
            sample_path(&[], 10),
            Err(ValidationError::EmptyBatch)
        ));
        let degenerate = [PathSegment::new(vec![c(0.0, 0.0)])];
        assert!(matches!(
            sample_path(&degenerate, 10),
            Err(ValidationError::TooFewPoints { index: 0, count: 1 })
        ));
        let fine = [PathSegment::line(c(0.0, 0.0), c(1.0, 1.0))];
        assert!(matches!(
            sample_path(&fine, 1),
            Err(ValidationError::TooFewPoints { .. })
        ));
    }
}
