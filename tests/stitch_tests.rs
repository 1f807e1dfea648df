//! Curve completion scenarios and fuzzed stitcher properties.

use geo::algorithm::line_intersection::{LineIntersection, line_intersection};
use geo::{Coord, Line, LineString, line_string};
use linework::float_types::Real;
use linework::geometry::distance;
use linework::stitch::{DEFAULT_MAX_JOIN_DISTANCE, complete};
use proptest::prelude::*;

#[test]
fn two_fragments_bridge_into_one_chain() {
    let curves = vec![
        line_string![(x: 0.0, y: 0.0), (x: 5.0, y: 5.0)],
        line_string![(x: 5.2, y: 5.1), (x: 10.0, y: 10.0)],
    ];
    let out = complete(&curves, 1.0).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(
        out[0],
        line_string![
            (x: 0.0, y: 0.0),
            (x: 5.0, y: 5.0),
            (x: 5.2, y: 5.1),
            (x: 10.0, y: 10.0),
        ]
    );
}

#[test]
fn near_closed_curve_closes_into_a_ring() {
    let curve = line_string![
        (x: 0.0, y: 0.0),
        (x: 4.0, y: 0.0),
        (x: 4.0, y: 4.0),
        (x: 0.0, y: 4.0),
        (x: 0.0, y: 0.3),
    ];
    let out = complete(&[curve], DEFAULT_MAX_JOIN_DISTANCE).unwrap();
    assert_eq!(out.len(), 1);
    assert!(out[0].is_closed());
    assert_eq!(out[0].0.len(), 6);
    assert_eq!(out[0].0[5], Coord { x: 0.0, y: 0.0 });
}

#[test]
fn no_op_when_every_gap_exceeds_the_distance() {
    let curves = vec![
        line_string![(x: 0.0, y: 0.0), (x: 5.0, y: 5.0)],
        line_string![(x: 20.0, y: 0.0), (x: 30.0, y: 1.0)],
    ];
    let out = complete(&curves, 0.05).unwrap();
    assert_eq!(out, curves);
}

#[test]
fn every_input_point_survives_a_three_way_merge() {
    let curves = vec![
        line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)],
        line_string![(x: 1.2, y: 0.0), (x: 2.2, y: 0.0)],
        line_string![(x: 2.4, y: 0.0), (x: 3.4, y: 0.0)],
    ];
    let out = complete(&curves, 0.25).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].0.len(), 6);
    for curve in &curves {
        for p in &curve.0 {
            assert!(out[0].0.contains(p));
        }
    }
}

fn arb_curve() -> impl Strategy<Value = LineString<Real>> {
    prop::collection::vec((-50.0..50.0, -50.0..50.0), 2..6).prop_map(|pts| {
        LineString::new(pts.into_iter().map(|(x, y)| Coord { x, y }).collect())
    })
}

fn arb_curves() -> impl Strategy<Value = Vec<LineString<Real>>> {
    prop::collection::vec(arb_curve(), 1..6)
}

/// Segments of `chain` that were not present in the input, excluding the
/// seam segment of a closed chain (ring closure does not run the crossing
/// filter, so its seam may legitimately cross).
fn new_segments(
    chain: &LineString<Real>,
    inputs: &[(Coord<Real>, Coord<Real>)],
) -> Vec<Line<Real>> {
    let segments: Vec<Line<Real>> = chain.lines().collect();
    let count = segments.len();
    segments
        .into_iter()
        .enumerate()
        .filter(|(k, _)| !(chain.is_closed() && *k == count - 1))
        .map(|(_, seg)| seg)
        .filter(|seg| {
            !inputs.iter().any(|&(a, b)| {
                (a == seg.start && b == seg.end) || (a == seg.end && b == seg.start)
            })
        })
        .collect()
}

fn input_segments(curves: &[LineString<Real>]) -> Vec<(Coord<Real>, Coord<Real>)> {
    curves
        .iter()
        .flat_map(|c| c.lines().map(|l| (l.start, l.end)))
        .collect()
}

proptest! {
    #[test]
    fn completion_preserves_every_input_point(
        curves in arb_curves(),
        max_join in 0.0..5.0,
    ) {
        let out = complete(&curves, max_join).unwrap();
        for curve in &curves {
            for p in &curve.0 {
                prop_assert!(out.iter().any(|chain| chain.0.contains(p)));
            }
        }
    }

    #[test]
    fn new_edges_never_exceed_the_join_distance(
        curves in arb_curves(),
        max_join in 0.0..5.0,
    ) {
        let inputs = input_segments(&curves);
        let out = complete(&curves, max_join).unwrap();
        for chain in &out {
            for seg in chain.lines() {
                let known = inputs.iter().any(|&(a, b)| {
                    (a == seg.start && b == seg.end) || (a == seg.end && b == seg.start)
                });
                if !known {
                    prop_assert!(distance(seg.start, seg.end) <= max_join + 1e-9);
                }
            }
        }
    }

    #[test]
    fn new_edges_never_cross_existing_curves(
        curves in arb_curves(),
        max_join in 0.0..5.0,
    ) {
        let inputs = input_segments(&curves);
        let out = complete(&curves, max_join).unwrap();
        for chain in &out {
            for seg in new_segments(chain, &inputs) {
                for curve in &curves {
                    for existing in curve.lines() {
                        let proper = matches!(
                            line_intersection(seg, existing),
                            Some(LineIntersection::SinglePoint { is_proper: true, .. })
                        );
                        prop_assert!(!proper);
                    }
                }
            }
        }
    }

    #[test]
    fn below_the_smallest_gap_completion_is_identity(curves in arb_curves()) {
        let ends: Vec<Coord<Real>> = curves
            .iter()
            .flat_map(|c| [c.0[0], c.0[c.0.len() - 1]])
            .collect();
        let mut min_gap = Real::INFINITY;
        for i in 0..ends.len() {
            for j in (i + 1)..ends.len() {
                min_gap = min_gap.min(distance(ends[i], ends[j]));
            }
        }
        prop_assume!(min_gap > 1e-6);

        let out = complete(&curves, min_gap * 0.5).unwrap();
        prop_assert_eq!(out, curves);
    }
}
