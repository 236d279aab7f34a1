//! Geometric predicates with explicit tolerance.
//!
//! Every predicate here is symmetric in the order its segments are supplied:
//! segments are put into a canonical form (endpoints and segment pair sorted
//! lexicographically) before any arithmetic, so swapping the arguments
//! produces bit-identical results.

use crate::primitives::Point2;
use num_traits::Float;
use std::cmp::Ordering;

/// Result of an orientation test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// `c` is left of the directed line `a -> b`.
    CounterClockwise,
    /// `c` is right of the directed line `a -> b`.
    Clockwise,
    /// `c` is within tolerance of the line.
    Collinear,
}

/// Computes the orientation of `c` relative to the directed line `a -> b`.
///
/// `eps` is a distance: `c` is collinear when it lies within `eps` of the
/// supporting line. A degenerate line (`a == b`) reports every point as
/// collinear.
#[inline]
pub fn orient2d<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>, eps: F) -> Orientation {
    let ab = b - a;
    let len = ab.magnitude();
    if len <= F::zero() {
        return Orientation::Collinear;
    }
    let dist = ab.cross(c - a) / len;

    if dist > eps {
        Orientation::CounterClockwise
    } else if dist < -eps {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Distance from `p` to the closed segment `a`-`b`.
pub fn distance_to_segment<F: Float>(p: Point2<F>, a: Point2<F>, b: Point2<F>) -> F {
    let ab = b - a;
    let len_sq = ab.magnitude_squared();
    if len_sq <= F::zero() {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).max(F::zero()).min(F::one());
    p.distance(a + ab * t)
}

/// Checks whether `p` lies within `eps` of the segment `a`-`b`.
#[inline]
pub fn point_on_segment<F: Float>(p: Point2<F>, a: Point2<F>, b: Point2<F>, eps: F) -> bool {
    distance_to_segment(p, a, b) <= eps
}

/// How two segments meet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection<F> {
    /// Segments do not meet.
    None,
    /// Segments meet at a single point.
    Point(Point2<F>),
    /// Segments share a (near) collinear stretch between two points.
    ///
    /// The points are in lexicographic order.
    Overlapping(Point2<F>, Point2<F>),
}

/// Finds where segment `a1`-`a2` meets segment `b1`-`b2`.
///
/// Endpoints lying within `eps` of the other segment win over computed
/// crossing points: the contact is reported at the existing endpoint. This is
/// the tie-break that keeps touching and collinear configurations from
/// producing sliver geometry. Two or more such touches that are further than
/// `eps` apart are reported as [`SegmentIntersection::Overlapping`].
pub fn segments_intersect<F: Float>(
    a1: Point2<F>,
    a2: Point2<F>,
    b1: Point2<F>,
    b2: Point2<F>,
    eps: F,
) -> SegmentIntersection<F> {
    let ((p, q), (r, s)) = canonical_pair((a1, a2), (b1, b2));

    // Endpoint touches, in canonical order.
    let mut touches: Vec<Point2<F>> = Vec::with_capacity(4);
    for (point, a, b) in [(p, r, s), (q, r, s), (r, p, q), (s, p, q)] {
        if point_on_segment(point, a, b, eps) {
            touches.push(point);
        }
    }

    if !touches.is_empty() {
        touches.sort_by(|u, v| u.lex_cmp(v));
        let first = touches[0];
        let last = touches[touches.len() - 1];
        return if first.distance(last) > eps {
            SegmentIntersection::Overlapping(first, last)
        } else {
            SegmentIntersection::Point(first)
        };
    }

    let pq = q - p;
    let rs = s - r;
    let o1 = pq.cross(r - p);
    let o2 = pq.cross(s - p);
    let o3 = rs.cross(p - r);
    let o4 = rs.cross(q - r);

    let straddles_pq = (o1 > F::zero() && o2 < F::zero()) || (o1 < F::zero() && o2 > F::zero());
    let straddles_rs = (o3 > F::zero() && o4 < F::zero()) || (o3 < F::zero() && o4 > F::zero());

    if straddles_pq && straddles_rs {
        let t = o3 / (o3 - o4);
        SegmentIntersection::Point(p + pq * t)
    } else {
        SegmentIntersection::None
    }
}

/// Largest distance from an endpoint of one segment to the supporting line of
/// the other. Zero for exactly collinear pairs.
pub fn collinear_deviation<F: Float>(
    a1: Point2<F>,
    a2: Point2<F>,
    b1: Point2<F>,
    b2: Point2<F>,
) -> F {
    let line_distance = |p: Point2<F>, a: Point2<F>, b: Point2<F>| {
        let ab = b - a;
        let len = ab.magnitude();
        if len <= F::zero() {
            p.distance(a)
        } else {
            (ab.cross(p - a) / len).abs()
        }
    };
    line_distance(b1, a1, a2)
        .max(line_distance(b2, a1, a2))
        .max(line_distance(a1, b1, b2))
        .max(line_distance(a2, b1, b2))
}

type Seg<F> = (Point2<F>, Point2<F>);

fn canonical_segment<F: Float>((a, b): Seg<F>) -> Seg<F> {
    if b.lex_cmp(&a) == Ordering::Less {
        (b, a)
    } else {
        (a, b)
    }
}

fn canonical_pair<F: Float>(s1: Seg<F>, s2: Seg<F>) -> (Seg<F>, Seg<F>) {
    let s1 = canonical_segment(s1);
    let s2 = canonical_segment(s2);
    let order = s1.0.lex_cmp(&s2.0).then(s1.1.lex_cmp(&s2.1));
    if order == Ordering::Greater {
        (s2, s1)
    } else {
        (s1, s2)
    }
}
