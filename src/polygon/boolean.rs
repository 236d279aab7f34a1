//! Boolean operations on polygon sets.
//!
//! The clipper works on the planar arrangement of both operands:
//!
//! 1. Validate rings and normalise orientation (outer CCW, holes CW)
//! 2. Split all edges at mutual contacts and weld coincident points
//! 3. Compute the winding numbers of both operands on each side of every edge
//! 4. Keep edges that separate result interior from exterior
//! 5. Link kept edges into rings and group them into polygons with holes
//!
//! Every stage visits geometry in lexicographic order, so swapping the
//! operands of a symmetric operation yields an identical result.
//!
//! Inputs are expected to be simple rings. Self-intersecting rings are
//! processed on a best-effort basis under the chosen [`FillRule`].
//!
//! # Example
//!
//! ```
//! use pipeshape::polygon::{clip, BoolOp, Polygon};
//! use pipeshape::Point2;
//!
//! let a = Polygon::new(vec![
//!     Point2::new(0.0_f64, 0.0),
//!     Point2::new(2.0, 0.0),
//!     Point2::new(2.0, 2.0),
//!     Point2::new(0.0, 2.0),
//! ]);
//! let b = Polygon::new(vec![
//!     Point2::new(1.0, 1.0),
//!     Point2::new(3.0, 1.0),
//!     Point2::new(3.0, 3.0),
//!     Point2::new(1.0, 3.0),
//! ]);
//!
//! let overlap = clip(BoolOp::Intersection, &[a], &[b]).unwrap();
//! assert_eq!(overlap.len(), 1);
//! assert!((overlap[0].area() - 1.0).abs() < 1e-12);
//! ```

use super::core::{polygon_order, Polygon, Ring};
use super::planarize::{planarize, Arrangement, MergedEdge};
use super::validate::validate_operand;
use crate::error::{GeomError, Operand};
use crate::primitives::{Point2, Vec2};
use crate::tolerance::{orient2d, point_on_segment, Orientation};
use num_traits::Float;

/// Boolean operation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoolOp {
    /// Area covered by both operands.
    Intersection,
    /// Area covered by either operand.
    Union,
    /// Area covered by `a` but not by `b`.
    Difference,
    /// Area covered by exactly one operand.
    Xor,
}

impl BoolOp {
    #[inline]
    fn apply(self, in_a: bool, in_b: bool) -> bool {
        match self {
            BoolOp::Intersection => in_a && in_b,
            BoolOp::Union => in_a || in_b,
            BoolOp::Difference => in_a && !in_b,
            BoolOp::Xor => in_a != in_b,
        }
    }
}

/// Rule turning a winding number into inside/outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    /// Inside wherever the winding number is not zero.
    #[default]
    NonZero,
    /// Inside wherever the winding number is odd.
    EvenOdd,
}

impl FillRule {
    #[inline]
    fn is_inside(self, winding: i32) -> bool {
        match self {
            FillRule::NonZero => winding != 0,
            FillRule::EvenOdd => winding % 2 != 0,
        }
    }
}

/// Options for [`Clipper`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipOptions<F> {
    /// Relative snapping tolerance. Points closer than
    /// `tolerance * max(1, largest coordinate magnitude)` are merged.
    pub tolerance: F,
    /// How overlapping rings within one operand are filled.
    pub fill_rule: FillRule,
}

impl<F: Float> Default for ClipOptions<F> {
    fn default() -> Self {
        Self {
            tolerance: F::from(1e-9).unwrap().max(F::epsilon() * F::from(64.0).unwrap()),
            fill_rule: FillRule::NonZero,
        }
    }
}

impl<F: Float> ClipOptions<F> {
    /// Sets the relative snapping tolerance.
    pub fn tolerance(mut self, tolerance: F) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the fill rule.
    pub fn fill_rule(mut self, fill_rule: FillRule) -> Self {
        self.fill_rule = fill_rule;
        self
    }
}

/// Output of [`Clipper::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClipResult<F> {
    /// Result polygons in canonical order.
    pub polygons: Vec<Polygon<F>>,
    /// Topology decisions made by tie-breaking: snapped near-collinear
    /// edges, rings abandoned while linking and holes without an outer ring.
    pub ambiguous_events: usize,
}

impl<F: Float> ClipResult<F> {
    fn empty() -> Self {
        Self {
            polygons: Vec::new(),
            ambiguous_events: 0,
        }
    }

    /// Returns true if the result covers no area.
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Total area of the result.
    pub fn area(&self) -> F {
        super::core::total_area(&self.polygons)
    }
}

/// A configured polygon clipper.
#[derive(Debug, Clone, Copy)]
pub struct Clipper<F> {
    options: ClipOptions<F>,
}

impl<F: Float> Default for Clipper<F> {
    fn default() -> Self {
        Self::new(ClipOptions::default())
    }
}

impl<F: Float> Clipper<F> {
    /// Creates a clipper with the given options.
    pub fn new(options: ClipOptions<F>) -> Self {
        Self { options }
    }

    /// The options this clipper runs with.
    pub fn options(&self) -> &ClipOptions<F> {
        &self.options
    }

    /// Applies `op` to the polygon sets `a` and `b`.
    ///
    /// # Errors
    ///
    /// [`GeomError::InvalidRing`] if a ring has fewer than 3 vertices or a
    /// non-finite coordinate, and [`GeomError::InvalidConfig`] for a negative
    /// or non-finite tolerance.
    pub fn run(
        &self,
        op: BoolOp,
        a: &[Polygon<F>],
        b: &[Polygon<F>],
    ) -> Result<ClipResult<F>, GeomError> {
        let tolerance = self.options.tolerance;
        if !tolerance.is_finite() || tolerance < F::zero() {
            return Err(GeomError::InvalidConfig(
                "clip tolerance must be finite and non-negative",
            ));
        }
        validate_operand(a, Operand::A)?;
        validate_operand(b, Operand::B)?;

        let eps = tolerance * coordinate_scale(a, b);

        if op == BoolOp::Intersection && !bounds_overlap(a, b, eps) {
            return Ok(ClipResult::empty());
        }

        let arrangement = planarize(a, b, eps);
        let kept = classify_edges(&arrangement, op, self.options.fill_rule);
        let (rings, abandoned) = link_rings(&arrangement.vertices, &kept);
        if abandoned > 0 {
            tracing::warn!(abandoned, ?op, "abandoned open chains while linking result rings");
        }

        let rings: Vec<Ring<F>> = rings
            .into_iter()
            .filter_map(|ids| clean_ring(ids, &arrangement, eps))
            .collect();
        let (polygons, orphans) = assemble_polygons(rings, eps);
        if orphans > 0 {
            tracing::warn!(orphans, ?op, "dropped holes not enclosed by any outer ring");
        }

        let ambiguous_events = arrangement.ambiguous_events + abandoned + orphans;
        tracing::debug!(
            ?op,
            edges = arrangement.edges.len(),
            polygons = polygons.len(),
            ambiguous_events,
            "clipped polygon sets"
        );

        Ok(ClipResult {
            polygons,
            ambiguous_events,
        })
    }
}

/// Applies `op` to `a` and `b` with default options.
pub fn clip<F: Float>(
    op: BoolOp,
    a: &[Polygon<F>],
    b: &[Polygon<F>],
) -> Result<Vec<Polygon<F>>, GeomError> {
    Clipper::new(ClipOptions::default())
        .run(op, a, b)
        .map(|result| result.polygons)
}

/// Computes the intersection of two polygons.
///
/// Touching along an edge or at a vertex yields no polygon.
pub fn polygon_intersection<F: Float>(
    a: &Polygon<F>,
    b: &Polygon<F>,
) -> Result<Vec<Polygon<F>>, GeomError> {
    clip(BoolOp::Intersection, std::slice::from_ref(a), std::slice::from_ref(b))
}

/// Computes the union of two polygons.
///
/// Disjoint inputs come back as two polygons.
pub fn polygon_union<F: Float>(
    a: &Polygon<F>,
    b: &Polygon<F>,
) -> Result<Vec<Polygon<F>>, GeomError> {
    clip(BoolOp::Union, std::slice::from_ref(a), std::slice::from_ref(b))
}

/// Computes `a` minus `b`.
pub fn polygon_difference<F: Float>(
    a: &Polygon<F>,
    b: &Polygon<F>,
) -> Result<Vec<Polygon<F>>, GeomError> {
    clip(BoolOp::Difference, std::slice::from_ref(a), std::slice::from_ref(b))
}

/// Computes the symmetric difference of two polygons.
pub fn polygon_xor<F: Float>(
    a: &Polygon<F>,
    b: &Polygon<F>,
) -> Result<Vec<Polygon<F>>, GeomError> {
    clip(BoolOp::Xor, std::slice::from_ref(a), std::slice::from_ref(b))
}

fn coordinate_scale<F: Float>(a: &[Polygon<F>], b: &[Polygon<F>]) -> F {
    a.iter()
        .chain(b)
        .flat_map(|p| p.rings())
        .flat_map(|r| r.vertices.iter())
        .fold(F::one(), |acc, v| acc.max(v.x.abs()).max(v.y.abs()))
}

fn set_bounds<F: Float>(set: &[Polygon<F>]) -> Option<(Point2<F>, Point2<F>)> {
    set.iter()
        .flat_map(|p| p.rings())
        .filter_map(Ring::bounding_box)
        .reduce(|(lo, hi), (l, h)| {
            (
                Point2::new(lo.x.min(l.x), lo.y.min(l.y)),
                Point2::new(hi.x.max(h.x), hi.y.max(h.y)),
            )
        })
}

fn bounds_overlap<F: Float>(a: &[Polygon<F>], b: &[Polygon<F>], eps: F) -> bool {
    match (set_bounds(a), set_bounds(b)) {
        (Some((lo_a, hi_a)), Some((lo_b, hi_b))) => {
            lo_a.x <= hi_b.x + eps
                && lo_b.x <= hi_a.x + eps
                && lo_a.y <= hi_b.y + eps
                && lo_b.y <= hi_a.y + eps
        }
        _ => false,
    }
}

/// Returns the kept edges as directed vertex pairs with the result on the left.
fn classify_edges<F: Float>(
    arrangement: &Arrangement<F>,
    op: BoolOp,
    fill_rule: FillRule,
) -> Vec<(usize, usize)> {
    let inside = |w: [i32; 2]| op.apply(fill_rule.is_inside(w[0]), fill_rule.is_inside(w[1]));
    let edges = &arrangement.edges;

    let mut kept = Vec::new();
    for (index, edge) in edges.iter().enumerate() {
        let Some(right) = winding_right_of(&arrangement.vertices, edges, index) else {
            continue;
        };
        let left = [
            right[0] + edge.multiplicity[0],
            right[1] + edge.multiplicity[1],
        ];

        match (inside(left), inside(right)) {
            (true, false) => kept.push((edge.lo, edge.hi)),
            (false, true) => kept.push((edge.hi, edge.lo)),
            _ => {}
        }
    }
    kept
}

/// Winding numbers of both operands just right of edge `index`, travelling
/// `lo -> hi`.
///
/// Casts a ray from the edge midpoint along its right normal and sums signed
/// half-open crossings of every other edge.
fn winding_right_of<F: Float>(
    vertices: &[Point2<F>],
    edges: &[MergedEdge],
    index: usize,
) -> Option<[i32; 2]> {
    let edge = edges[index];
    let (p, q) = (vertices[edge.lo], vertices[edge.hi]);
    let along: Vec2<F> = (q - p).normalize_above(F::zero())?;
    let normal = along.perpendicular_cw();
    let origin = p.midpoint(q);

    let mut winding = [0, 0];
    for (k, other) in edges.iter().enumerate() {
        if k == index {
            continue;
        }
        let u = vertices[other.lo] - origin;
        let v = vertices[other.hi] - origin;
        let (su, sv) = (u.dot(along), v.dot(along));

        let sign = if su <= F::zero() && sv > F::zero() {
            1
        } else if sv <= F::zero() && su > F::zero() {
            -1
        } else {
            continue;
        };

        let (du, dv) = (u.dot(normal), v.dot(normal));
        let distance = du + (dv - du) * (-su / (sv - su));
        if distance > F::zero() {
            winding[0] += sign * other.multiplicity[0];
            winding[1] += sign * other.multiplicity[1];
        }
    }
    Some(winding)
}

/// Links directed edges into closed vertex cycles.
///
/// At each vertex the outgoing edge with the smallest clockwise turn from the
/// reversed incoming direction is taken. Returns the cycles and the number of
/// chains that ran into a dead end.
fn link_rings<F: Float>(vertices: &[Point2<F>], kept: &[(usize, usize)]) -> (Vec<Vec<usize>>, usize) {
    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); vertices.len()];
    for (i, &(from, _)) in kept.iter().enumerate() {
        outgoing[from].push(i);
    }

    let mut used = vec![false; kept.len()];
    let mut rings = Vec::new();
    let mut abandoned = 0;

    for start in 0..kept.len() {
        if used[start] {
            continue;
        }
        used[start] = true;

        let origin = kept[start].0;
        let mut ring = vec![origin];
        let mut current = start;

        loop {
            let (from, to) = kept[current];
            if to == origin {
                rings.push(ring);
                break;
            }
            ring.push(to);

            let back = vertices[from] - vertices[to];
            let next = outgoing[to]
                .iter()
                .copied()
                .filter(|&e| !used[e])
                .map(|e| (clockwise_turn(back, vertices[kept[e].1] - vertices[to]), e))
                .min_by(|x, y| {
                    x.0.partial_cmp(&y.0)
                        .unwrap_or(std::cmp::Ordering::Equal)
                        .then(x.1.cmp(&y.1))
                });

            match next {
                Some((_, e)) => {
                    used[e] = true;
                    current = e;
                }
                None => {
                    abandoned += 1;
                    break;
                }
            }
        }
    }

    (rings, abandoned)
}

/// Clockwise angle from `back` to `out` in `(0, 2pi]`.
fn clockwise_turn<F: Float>(back: Vec2<F>, out: Vec2<F>) -> F {
    let angle = out.cross(back).atan2(out.dot(back));
    if angle <= F::zero() {
        angle + F::from(std::f64::consts::TAU).unwrap()
    } else {
        angle
    }
}

/// Drops collinear vertices introduced by splitting, then rejects slivers.
fn clean_ring<F: Float>(mut ids: Vec<usize>, arrangement: &Arrangement<F>, eps: F) -> Option<Ring<F>> {
    let vertices = &arrangement.vertices;

    while ids.len() > 3 {
        let n = ids.len();
        let removable = (0..n).find(|&i| {
            let cur = ids[i];
            if arrangement.original[cur] {
                return false;
            }
            let prev = vertices[ids[(i + n - 1) % n]];
            let next = vertices[ids[(i + 1) % n]];
            let mid = vertices[cur];
            orient2d(prev, next, mid, eps) == Orientation::Collinear
                && (mid - prev).dot(next - mid) > F::zero()
        });
        match removable {
            Some(i) => {
                ids.remove(i);
            }
            None => break,
        }
    }

    let ring = Ring::new(ids.into_iter().map(|i| vertices[i]).collect());
    if ring.len() < 3 || ring.area() <= eps * ring.perimeter() {
        return None;
    }
    Some(ring)
}

/// Groups rings into polygons: CCW rings are outers, CW rings are holes of
/// the smallest outer that encloses them. Returns the polygons in canonical
/// order and the number of holes without an outer.
fn assemble_polygons<F: Float>(rings: Vec<Ring<F>>, eps: F) -> (Vec<Polygon<F>>, usize) {
    let (outers, holes): (Vec<Ring<F>>, Vec<Ring<F>>) =
        rings.into_iter().partition(|r| r.signed_area() > F::zero());

    let mut polygons: Vec<Polygon<F>> = outers
        .into_iter()
        .map(|outer| Polygon::with_holes(outer, Vec::new()))
        .collect();
    let mut orphans = 0;

    for hole in holes {
        let owner = polygons
            .iter()
            .enumerate()
            .filter(|(_, p)| encloses(&p.outer, &hole, eps))
            .min_by(|(_, p), (_, q)| {
                p.outer
                    .area()
                    .partial_cmp(&q.outer.area())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(i, _)| i);

        match owner {
            Some(i) => polygons[i].holes.push(hole),
            None => orphans += 1,
        }
    }

    for polygon in &mut polygons {
        polygon.outer.canonicalize();
        for hole in &mut polygon.holes {
            hole.canonicalize();
        }
        polygon.holes.sort_by(|r, s| match (r.vertices.first(), s.vertices.first()) {
            (Some(p), Some(q)) => p.lex_cmp(q),
            _ => std::cmp::Ordering::Equal,
        });
    }
    polygons.sort_by(polygon_order);

    (polygons, orphans)
}

/// Whether `hole` lies inside `outer`, judged at the first hole point that is
/// not on the outer boundary.
fn encloses<F: Float>(outer: &Ring<F>, hole: &Ring<F>, eps: F) -> bool {
    let on_boundary = |p: Point2<F>| outer.edges().any(|(a, b)| point_on_segment(p, a, b, eps));
    hole.vertices
        .iter()
        .copied()
        .chain(hole.edges().map(|(a, b)| a.midpoint(b)))
        .find(|&p| !on_boundary(p))
        .is_some_and(|p| outer.contains(p))
}
