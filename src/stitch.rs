//! Curve completion: bridge nearby endpoints, merge the result into maximal
//! chains, and close chains that come back to their start.
//!
//! Candidate connections come from a nearest-neighbor query over all curve
//! endpoints. A candidate survives only if it does not cross any curve in
//! the batch; touching an endpoint is not crossing. Merging is a walk over
//! the endpoint graph, so curves that share an exact endpoint fuse without
//! any connection being drawn.

use crate::errors::ValidationError;
use crate::float_types::{Real, tolerance};
use crate::geometry::{distance, validate_polyline};
use geo::algorithm::line_intersection::{LineIntersection, line_intersection};
use geo::{Coord, Line, LineString};
use rstar::{RTree, primitives::GeomWithData};

/// Join radius for callers without a domain-specific setting.
pub const DEFAULT_MAX_JOIN_DISTANCE: Real = 0.5;

/// Complete a batch of curves.
///
/// Every curve needs at least two finite points; an empty batch is an
/// error rather than an empty answer, since it almost always means the
/// caller filtered everything out by accident. Unjoined curves pass
/// through with their orientation intact. Merged chains may flip whole
/// curves so the chain reads in one direction.
pub fn complete(
    curves: &[LineString<Real>],
    max_join_distance: Real,
) -> Result<Vec<LineString<Real>>, ValidationError> {
    if curves.is_empty() {
        return Err(ValidationError::EmptyBatch);
    }
    for (index, curve) in curves.iter().enumerate() {
        validate_polyline(index, curve)?;
    }

    let connections = propose_connections(curves, max_join_distance);
    let mut chains = merge_chains(curves, &connections);
    let rings = close_rings(&mut chains, max_join_distance);
    log::debug!(
        "completed {} curves: {} connections accepted, {} chains out, {} rings closed",
        curves.len(),
        connections.len(),
        chains.len(),
        rings,
    );
    Ok(chains)
}

/// Endpoint index convention: curve `i` owns flat endpoints `2i` (first
/// point) and `2i + 1` (last point).
fn propose_connections(curves: &[LineString<Real>], max_join: Real) -> Vec<Line<Real>> {
    let endpoints: Vec<Coord<Real>> = curves
        .iter()
        .flat_map(|curve| [curve.0[0], curve.0[curve.0.len() - 1]])
        .collect();
    let tree = RTree::bulk_load(
        endpoints
            .iter()
            .enumerate()
            .map(|(i, c)| GeomWithData::new([c.x, c.y], i))
            .collect(),
    );

    let mut pairs: Vec<(usize, usize)> = Vec::new();
    for (i, &point) in endpoints.iter().enumerate() {
        let Some(nearest) = tree
            .nearest_neighbor_iter(&[point.x, point.y])
            .find(|entry| entry.data != i)
        else {
            continue;
        };
        let j = nearest.data;
        // A gap back to the same curve is ring closure's job, not ours.
        if j / 2 == i / 2 {
            continue;
        }
        if distance(point, endpoints[j]) > max_join {
            continue;
        }
        // Coincident endpoints already share a node in the merge graph.
        if point == endpoints[j] {
            continue;
        }
        pairs.push((i.min(j), i.max(j)));
    }
    pairs.sort_unstable();
    pairs.dedup();

    pairs
        .into_iter()
        .map(|(i, j)| Line::new(endpoints[i], endpoints[j]))
        .filter(|candidate| !curves.iter().any(|curve| crosses(candidate, curve)))
        .collect()
}

/// True when the candidate's interior passes through the curve's interior.
///
/// A touch at one of the candidate's own endpoints does not count, and
/// neither does a touch at an open curve's terminal points. A closed curve
/// has no terminals, so running through its seam vertex still rejects.
/// Collinear overlap is an overlap, not a crossing.
fn crosses(candidate: &Line<Real>, curve: &LineString<Real>) -> bool {
    let eps = tolerance();
    let closed = curve.is_closed();
    let first = curve.0[0];
    let last = curve.0[curve.0.len() - 1];

    for segment in curve.lines() {
        match line_intersection(*candidate, segment) {
            Some(LineIntersection::SinglePoint {
                intersection,
                is_proper,
            }) => {
                if is_proper {
                    return true;
                }
                let at_candidate_end = distance(intersection, candidate.start) <= eps
                    || distance(intersection, candidate.end) <= eps;
                let at_curve_terminal = !closed
                    && (distance(intersection, first) <= eps
                        || distance(intersection, last) <= eps);
                if !at_candidate_end && !at_curve_terminal {
                    return true;
                }
            },
            Some(LineIntersection::Collinear { .. }) | None => {},
        }
    }
    false
}

struct Edge {
    points: Vec<Coord<Real>>,
    start: usize,
    end: usize,
}

/// Merge curves and accepted connections into maximal chains.
///
/// Nodes are exact coordinates; every curve and connection is an edge
/// between its two end nodes. Chains extend only through simple
/// pass-through nodes (degree two), junction nodes stay split, and pure
/// cycles come out as closed rings. Chains are emitted in input order of
/// their earliest edge, so a batch with nothing to join comes back exactly
/// as it went in, closed curves included.
fn merge_chains(curves: &[LineString<Real>], connections: &[Line<Real>]) -> Vec<LineString<Real>> {
    let mut nodes: Vec<Coord<Real>> = Vec::new();
    let mut incident: Vec<Vec<(usize, bool)>> = Vec::new();
    let mut edges: Vec<Edge> = Vec::new();

    for points in curves
        .iter()
        .map(|curve| curve.0.clone())
        .chain(connections.iter().map(|line| vec![line.start, line.end]))
    {
        let start = node_of(&mut nodes, &mut incident, points[0]);
        let end = node_of(&mut nodes, &mut incident, points[points.len() - 1]);
        let index = edges.len();
        incident[start].push((index, true));
        incident[end].push((index, false));
        edges.push(Edge { points, start, end });
    }

    let mut used = vec![false; edges.len()];
    let mut chains: Vec<LineString<Real>> = Vec::new();
    for first in 0..edges.len() {
        if used[first] {
            continue;
        }
        let (edge, at_start) = chain_head(&edges, &incident, first);
        chains.push(walk_chain(&edges, &incident, &mut used, edge, at_start));
    }
    chains
}

fn node_of(
    nodes: &mut Vec<Coord<Real>>,
    incident: &mut Vec<Vec<(usize, bool)>>,
    coord: Coord<Real>,
) -> usize {
    if let Some(found) = nodes.iter().position(|&node| node == coord) {
        return found;
    }
    nodes.push(coord);
    incident.push(Vec::new());
    nodes.len() - 1
}

/// Back up from `first` through pass-through nodes to the head of its
/// chain, so the walk that starts there covers the whole component. On a
/// pure cycle there is no head; `first` starts its own walk and the cycle
/// comes back around to it.
fn chain_head(edges: &[Edge], incident: &[Vec<(usize, bool)>], first: usize) -> (usize, bool) {
    let mut edge = first;
    let mut entry = edges[first].start;
    loop {
        if incident[entry].len() != 2 {
            return (edge, entry == edges[edge].start);
        }
        let Some(&(prev, prev_at_start)) =
            incident[entry].iter().find(|&&(other, _)| other != edge)
        else {
            // Both slots belong to `edge`: a one-curve loop.
            return (first, true);
        };
        if prev == first {
            // Wrapped all the way around a multi-edge cycle.
            return (first, true);
        }
        // The walk will run `prev` into this node, so it enters `prev`
        // from the opposite end.
        edge = prev;
        entry = if prev_at_start {
            edges[prev].end
        } else {
            edges[prev].start
        };
    }
}

/// Walk one chain starting with `first`, entered at its start end when
/// `forward`. Each appended edge drops its leading point, which duplicates
/// the node the walk came in through.
fn walk_chain(
    edges: &[Edge],
    incident: &[Vec<(usize, bool)>],
    used: &mut [bool],
    first: usize,
    forward: bool,
) -> LineString<Real> {
    let mut points: Vec<Coord<Real>> = Vec::new();
    let mut edge = first;
    let mut from_start = forward;
    loop {
        used[edge] = true;
        let skip = usize::from(!points.is_empty());
        if from_start {
            points.extend(edges[edge].points.iter().skip(skip));
        } else {
            points.extend(edges[edge].points.iter().rev().skip(skip));
        }
        let exit = if from_start {
            edges[edge].end
        } else {
            edges[edge].start
        };
        if incident[exit].len() != 2 {
            break;
        }
        let Some(&(next, next_at_start)) = incident[exit].iter().find(|(e, _)| !used[*e]) else {
            break;
        };
        edge = next;
        from_start = next_at_start;
    }
    LineString::new(points)
}

/// Close any open chain whose two ends are within reach of each other.
fn close_rings(chains: &mut [LineString<Real>], max_join: Real) -> usize {
    let mut rings = 0;
    for chain in chains.iter_mut() {
        let head = chain.0[0];
        let tail = chain.0[chain.0.len() - 1];
        if head != tail && distance(head, tail) <= max_join {
            chain.0.push(head);
            rings += 1;
        }
    }
    rings
}
