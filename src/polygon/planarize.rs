//! Planar arrangement of the edges of two polygon sets.
//!
//! Every input edge is split wherever another edge crosses or touches it, all
//! split and input points are welded, and the resulting sub-edges are merged
//! by their (undirected) end vertices. A merged edge remembers how many times
//! each operand traverses it and in which direction, which is all the winding
//! classification needs.

use super::core::Polygon;
use crate::primitives::Point2;
use crate::tolerance::{
    collinear_deviation, segments_intersect, weld_vertices_indexed, SegmentIntersection,
};
use num_traits::Float;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// An undirected edge of the arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MergedEdge {
    /// Smaller vertex index.
    pub lo: usize,
    /// Larger vertex index.
    pub hi: usize,
    /// Signed multiplicity per operand, positive for traversals `lo -> hi`.
    pub multiplicity: [i32; 2],
}

/// The planarized edges of both operands.
#[derive(Debug, Clone)]
pub(crate) struct Arrangement<F> {
    /// Welded vertices in lexicographic order.
    pub vertices: Vec<Point2<F>>,
    /// Whether each vertex coincides with an input ring vertex.
    pub original: Vec<bool>,
    /// Merged edges ordered by `(lo, hi)`.
    pub edges: Vec<MergedEdge>,
    /// Near-collinear edge pairs that had to be snapped together.
    pub ambiguous_events: usize,
}

#[derive(Debug, Clone, Copy)]
struct InputEdge<F> {
    from: Point2<F>,
    to: Point2<F>,
    operand: usize,
    /// Indices of the endpoints in the shared point list.
    from_point: usize,
    to_point: usize,
}

impl<F: Float> InputEdge<F> {
    fn bounds(&self) -> (Point2<F>, Point2<F>) {
        (
            Point2::new(self.from.x.min(self.to.x), self.from.y.min(self.to.y)),
            Point2::new(self.from.x.max(self.to.x), self.from.y.max(self.to.y)),
        )
    }
}

/// Builds the arrangement of `a` and `b` with welding distance `eps`.
///
/// Outer rings are traversed counter-clockwise and holes clockwise,
/// whatever orientation the caller supplied.
pub(crate) fn planarize<F: Float>(a: &[Polygon<F>], b: &[Polygon<F>], eps: F) -> Arrangement<F> {
    let mut points: Vec<Point2<F>> = Vec::new();
    let mut edges: Vec<InputEdge<F>> = Vec::new();

    for (operand, set) in [a, b].into_iter().enumerate() {
        for polygon in set {
            let polygon = polygon.normalized();
            for ring in polygon.rings() {
                for (from, to) in ring.edges() {
                    if from.distance(to) <= eps {
                        continue;
                    }
                    points.push(from);
                    points.push(to);
                    edges.push(InputEdge {
                        from,
                        to,
                        operand,
                        from_point: points.len() - 2,
                        to_point: points.len() - 1,
                    });
                }
            }
        }
    }

    let (splits, ambiguous_events) = find_splits(&edges, &mut points, eps);
    if ambiguous_events > 0 {
        tracing::debug!(
            ambiguous_events,
            "snapped near-collinear edge pairs onto each other"
        );
    }

    let (vertices, mapping) = weld_vertices_indexed(&points, eps);

    let mut original = vec![false; vertices.len()];
    for edge in &edges {
        original[mapping[edge.from_point]] = true;
        original[mapping[edge.to_point]] = true;
    }

    let mut merged: BTreeMap<(usize, usize), [i32; 2]> = BTreeMap::new();
    for (edge, edge_splits) in edges.iter().zip(&splits) {
        let chain = split_chain(edge, edge_splits, &points, &mapping);
        for pair in chain.windows(2) {
            let (u, v) = (pair[0], pair[1]);
            let (key, sign) = if u < v { ((u, v), 1) } else { ((v, u), -1) };
            merged.entry(key).or_insert([0, 0])[edge.operand] += sign;
        }
    }

    let edges = merged
        .into_iter()
        .filter(|(_, m)| *m != [0, 0])
        .map(|((lo, hi), multiplicity)| MergedEdge {
            lo,
            hi,
            multiplicity,
        })
        .collect();

    Arrangement {
        vertices,
        original,
        edges,
        ambiguous_events,
    }
}

/// Tests every pair of edges and records the contact points on both.
///
/// Returns the split point indices per edge and the number of near-collinear
/// overlaps.
fn find_splits<F: Float>(
    edges: &[InputEdge<F>],
    points: &mut Vec<Point2<F>>,
    eps: F,
) -> (Vec<Vec<usize>>, usize) {
    let bounds: Vec<_> = edges.iter().map(InputEdge::bounds).collect();
    let mut splits: Vec<Vec<usize>> = vec![Vec::new(); edges.len()];
    let mut ambiguous = 0;

    for i in 0..edges.len() {
        let (lo_i, hi_i) = bounds[i];
        for j in (i + 1)..edges.len() {
            let (lo_j, hi_j) = bounds[j];
            if lo_j.x > hi_i.x + eps
                || lo_i.x > hi_j.x + eps
                || lo_j.y > hi_i.y + eps
                || lo_i.y > hi_j.y + eps
            {
                continue;
            }

            let (e, f) = (&edges[i], &edges[j]);
            let contacts = match segments_intersect(e.from, e.to, f.from, f.to, eps) {
                SegmentIntersection::None => continue,
                SegmentIntersection::Point(p) => [Some(p), None],
                SegmentIntersection::Overlapping(p, q) => {
                    if collinear_deviation(e.from, e.to, f.from, f.to) > F::zero() {
                        ambiguous += 1;
                    }
                    [Some(p), Some(q)]
                }
            };

            for p in contacts.into_iter().flatten() {
                points.push(p);
                let k = points.len() - 1;
                splits[i].push(k);
                splits[j].push(k);
            }
        }
    }

    (splits, ambiguous)
}

/// Welded vertex ids along one input edge, from its start to its end.
fn split_chain<F: Float>(
    edge: &InputEdge<F>,
    edge_splits: &[usize],
    points: &[Point2<F>],
    mapping: &[usize],
) -> Vec<usize> {
    let dir = edge.to - edge.from;
    let len_sq = dir.magnitude_squared();

    let mut interior: Vec<(F, usize)> = edge_splits
        .iter()
        .map(|&k| ((points[k] - edge.from).dot(dir) / len_sq, mapping[k]))
        .collect();
    interior.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(Ordering::Equal)
            .then(a.1.cmp(&b.1))
    });

    let mut chain = Vec::with_capacity(interior.len() + 2);
    chain.push(mapping[edge.from_point]);
    chain.extend(interior.into_iter().map(|(_, v)| v));
    chain.push(mapping[edge.to_point]);
    chain.dedup();
    chain
}
