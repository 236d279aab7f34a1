//! Core ring and polygon types.

use crate::primitives::Point2;
use num_traits::Float;
use std::cmp::Ordering;

/// A closed ring of vertices.
///
/// The ring is implicitly closed: the last vertex connects back to the first,
/// which is not repeated. Counter-clockwise rings have positive signed area.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring<F> {
    /// The vertices in traversal order.
    pub vertices: Vec<Point2<F>>,
}

impl<F: Float> Ring<F> {
    /// Creates a ring from vertices.
    #[inline]
    pub fn new(vertices: Vec<Point2<F>>) -> Self {
        Self { vertices }
    }

    /// Creates an empty ring.
    #[inline]
    pub fn empty() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    /// Returns true if the ring has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Iterates over the edges `(v[i], v[i + 1])`, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point2<F>, Point2<F>)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Signed area by the shoelace formula (positive for CCW).
    pub fn signed_area(&self) -> F {
        ring_signed_area(&self.vertices)
    }

    /// Absolute area.
    pub fn area(&self) -> F {
        self.signed_area().abs()
    }

    /// Returns true for counter-clockwise orientation.
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > F::zero()
    }

    /// Winding number of the ring around `point`.
    pub fn winding_number(&self, point: Point2<F>) -> i32 {
        winding_number(&self.vertices, point)
    }

    /// Tests if a point is inside the ring (non-zero rule).
    ///
    /// Points on the boundary may return either true or false.
    pub fn contains(&self, point: Point2<F>) -> bool {
        self.winding_number(point) != 0
    }

    /// Returns the bounding box as (min, max) points.
    pub fn bounding_box(&self) -> Option<(Point2<F>, Point2<F>)> {
        let first = *self.vertices.first()?;
        Some(self.vertices[1..].iter().fold((first, first), |(lo, hi), v| {
            (
                Point2::new(lo.x.min(v.x), lo.y.min(v.y)),
                Point2::new(hi.x.max(v.x), hi.y.max(v.y)),
            )
        }))
    }

    /// Perimeter length, including the closing edge.
    pub fn perimeter(&self) -> F {
        if self.vertices.len() < 2 {
            return F::zero();
        }
        self.edges().fold(F::zero(), |acc, (a, b)| acc + a.distance(b))
    }

    /// Reorients the ring counter-clockwise if needed.
    pub fn ensure_ccw(&mut self) {
        if self.signed_area() < F::zero() {
            self.vertices.reverse();
        }
    }

    /// Reorients the ring clockwise if needed.
    pub fn ensure_cw(&mut self) {
        if self.signed_area() > F::zero() {
            self.vertices.reverse();
        }
    }

    /// Returns the ring with reversed orientation.
    pub fn reversed(&self) -> Self {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Self { vertices }
    }

    /// Rotates the vertex list so it starts at the lexicographically smallest
    /// vertex. Two rings describing the same closed path compare equal after
    /// this.
    pub fn canonicalize(&mut self) {
        if let Some(start) = (0..self.vertices.len())
            .min_by(|&i, &j| self.vertices[i].lex_cmp(&self.vertices[j]))
        {
            self.vertices.rotate_left(start);
        }
    }

    /// Returns true if no two non-adjacent edges cross.
    pub fn is_simple(&self) -> bool {
        !super::validate::has_self_intersection(self)
    }
}

/// A polygon: one outer ring and zero or more hole rings.
///
/// Outputs of the clipper always have a counter-clockwise outer ring and
/// clockwise holes; inputs may use either orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<F> {
    /// The outer boundary.
    pub outer: Ring<F>,
    /// Holes inside the outer boundary.
    pub holes: Vec<Ring<F>>,
}

impl<F: Float> Polygon<F> {
    /// Creates a polygon without holes.
    pub fn new(outer: Vec<Point2<F>>) -> Self {
        Self {
            outer: Ring::new(outer),
            holes: Vec::new(),
        }
    }

    /// Creates a polygon with holes.
    pub fn with_holes(outer: Ring<F>, holes: Vec<Ring<F>>) -> Self {
        Self { outer, holes }
    }

    /// Iterates over all rings, outer first.
    pub fn rings(&self) -> impl Iterator<Item = &Ring<F>> {
        std::iter::once(&self.outer).chain(self.holes.iter())
    }

    /// Area of the outer ring minus the area of the holes.
    pub fn area(&self) -> F {
        self.holes
            .iter()
            .fold(self.outer.area(), |acc, hole| acc - hole.area())
    }

    /// Tests if a point is inside the outer ring and outside every hole.
    pub fn contains(&self, point: Point2<F>) -> bool {
        self.outer.contains(point) && !self.holes.iter().any(|h| h.contains(point))
    }

    /// Returns the bounding box of the outer ring.
    pub fn bounding_box(&self) -> Option<(Point2<F>, Point2<F>)> {
        self.outer.bounding_box()
    }

    /// Returns a copy with the outer ring CCW and every hole CW.
    pub fn normalized(&self) -> Self {
        let mut outer = self.outer.clone();
        outer.ensure_ccw();
        let holes = self
            .holes
            .iter()
            .map(|h| {
                let mut h = h.clone();
                h.ensure_cw();
                h
            })
            .collect();
        Self { outer, holes }
    }
}

/// Total area of a set of polygons.
pub fn total_area<F: Float>(polygons: &[Polygon<F>]) -> F {
    polygons.iter().fold(F::zero(), |acc, p| acc + p.area())
}

/// Computes the signed area of a closed vertex sequence (shoelace formula).
///
/// Positive for CCW winding, negative for CW winding.
pub fn ring_signed_area<F: Float>(vertices: &[Point2<F>]) -> F {
    let n = vertices.len();
    if n < 3 {
        return F::zero();
    }

    // Translate to the first vertex to keep the products small.
    let o = vertices[0];
    let mut area = F::zero();
    for i in 1..n - 1 {
        area = area + (vertices[i] - o).cross(vertices[i + 1] - o);
    }

    area / (F::one() + F::one())
}

/// Winding number of a closed vertex sequence around `point`.
///
/// Uses a horizontal ray with signed, half-open crossings.
pub fn winding_number<F: Float>(vertices: &[Point2<F>], point: Point2<F>) -> i32 {
    let n = vertices.len();
    if n < 3 {
        return 0;
    }

    let mut winding = 0;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let side = (b - a).cross(point - a);

        if a.y <= point.y {
            if b.y > point.y && side > F::zero() {
                winding += 1;
            }
        } else if b.y <= point.y && side < F::zero() {
            winding -= 1;
        }
    }

    winding
}

/// Orders polygons by the first vertex of their outer ring.
pub(crate) fn polygon_order<F: Float>(a: &Polygon<F>, b: &Polygon<F>) -> Ordering {
    match (a.outer.vertices.first(), b.outer.vertices.first()) {
        (Some(p), Some(q)) => p.lex_cmp(q),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
    }
}
