//! Input validation and simplicity checks for rings.
//!
//! The clipper rejects structurally invalid rings up front. Self-intersection
//! is not a rejection criterion: pipe outlines around sharp turns fold over
//! themselves, and callers that need simple outlines check them here.
//!
//! # Example
//!
//! ```
//! use pipeshape::{Point2, polygon::{Ring, has_self_intersection}};
//!
//! let bowtie = Ring::new(vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(2.0, 2.0),
//!     Point2::new(2.0, 0.0),
//!     Point2::new(0.0, 2.0),
//! ]);
//!
//! assert!(has_self_intersection(&bowtie));
//! ```

use super::core::{Polygon, Ring};
use crate::error::{GeomError, Operand, RingDefect};
use crate::primitives::Point2;
use num_traits::Float;

/// A crossing between two non-adjacent edges of one ring.
#[derive(Debug, Clone, PartialEq)]
pub struct SelfIntersection<F> {
    /// The crossing point.
    pub point: Point2<F>,
    /// Index of the first edge (edge `i` runs from vertex `i` to `i + 1`).
    pub edge1: usize,
    /// Index of the second edge.
    pub edge2: usize,
}

/// Checks that a ring has at least 3 vertices, all finite.
pub fn check_ring<F: Float>(ring: &Ring<F>) -> Result<(), RingDefect> {
    if let Some(i) = ring.vertices.iter().position(|v| !v.is_finite()) {
        return Err(RingDefect::NonFiniteVertex(i));
    }
    if ring.len() < 3 {
        return Err(RingDefect::TooFewVertices(ring.len()));
    }
    Ok(())
}

/// Checks every ring of every polygon in one clipper operand.
///
/// # Errors
///
/// [`GeomError::InvalidRing`] for the first offending ring.
pub fn validate_operand<F: Float>(
    polygons: &[Polygon<F>],
    operand: Operand,
) -> Result<(), GeomError> {
    for (polygon, poly) in polygons.iter().enumerate() {
        for (ring, r) in poly.rings().enumerate() {
            check_ring(r).map_err(|defect| GeomError::InvalidRing {
                operand,
                polygon,
                ring,
                defect,
            })?;
        }
    }
    Ok(())
}

/// Returns true if any two non-adjacent edges of the ring cross.
pub fn has_self_intersection<F: Float>(ring: &Ring<F>) -> bool {
    for_each_crossing(ring, |_| true)
}

/// Finds all proper crossings between non-adjacent edges.
pub fn find_self_intersections<F: Float>(ring: &Ring<F>) -> Vec<SelfIntersection<F>> {
    let mut found = Vec::new();
    for_each_crossing(ring, |hit| {
        found.push(hit);
        false
    });
    found
}

/// Visits proper crossings until `visit` returns true. Returns whether it did.
fn for_each_crossing<F: Float>(
    ring: &Ring<F>,
    mut visit: impl FnMut(SelfIntersection<F>) -> bool,
) -> bool {
    let v = &ring.vertices;
    let n = v.len();
    if n < 4 {
        return false;
    }

    for i in 0..n {
        let a1 = v[i];
        let a2 = v[(i + 1) % n];

        for j in (i + 2)..n {
            // The last edge is adjacent to the first.
            if (j + 1) % n == i {
                continue;
            }
            let b1 = v[j];
            let b2 = v[(j + 1) % n];

            if let Some(point) = proper_crossing(a1, a2, b1, b2) {
                if visit(SelfIntersection {
                    point,
                    edge1: i,
                    edge2: j,
                }) {
                    return true;
                }
            }
        }
    }

    false
}

/// Intersection point of two segments that strictly cross each other.
fn proper_crossing<F: Float>(
    a1: Point2<F>,
    a2: Point2<F>,
    b1: Point2<F>,
    b2: Point2<F>,
) -> Option<Point2<F>> {
    let da = a2 - a1;
    let db = b2 - b1;

    let d1 = db.cross(a1 - b1);
    let d2 = db.cross(a2 - b1);
    let d3 = da.cross(b1 - a1);
    let d4 = da.cross(b2 - a1);

    if d1 * d2 < F::zero() && d3 * d4 < F::zero() {
        let t = d3 / (d3 - d4);
        Some(b1 + db * t)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Ring<f64> {
        Ring::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ])
    }

    fn bowtie() -> Ring<f64> {
        Ring::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(2.0, 0.0),
            Point2::new(0.0, 2.0),
        ])
    }

    #[test]
    fn test_simple_ring() {
        assert!(!has_self_intersection(&square()));
        assert!(square().is_simple());
        assert!(find_self_intersections(&square()).is_empty());
    }

    #[test]
    fn test_bowtie() {
        let hits = find_self_intersections(&bowtie());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].point, Point2::new(1.0, 1.0));
        assert_eq!((hits[0].edge1, hits[0].edge2), (0, 2));
        assert!(!bowtie().is_simple());
    }

    #[test]
    fn test_check_ring() {
        assert_eq!(check_ring(&square()), Ok(()));

        let short = Ring::new(vec![Point2::new(0.0_f64, 0.0), Point2::new(1.0, 0.0)]);
        assert_eq!(check_ring(&short), Err(RingDefect::TooFewVertices(2)));

        let mut bad = square();
        bad.vertices[2].y = f64::NAN;
        assert_eq!(check_ring(&bad), Err(RingDefect::NonFiniteVertex(2)));
    }

    #[test]
    fn test_validate_operand_reports_location() {
        let good = Polygon::with_holes(square(), vec![]);
        let bad = Polygon::with_holes(
            square(),
            vec![Ring::new(vec![Point2::new(0.2, 0.2), Point2::new(0.4, 0.2)])],
        );

        assert!(validate_operand(&[good.clone()], Operand::A).is_ok());
        assert_eq!(
            validate_operand(&[good, bad], Operand::B),
            Err(GeomError::InvalidRing {
                operand: Operand::B,
                polygon: 1,
                ring: 1,
                defect: RingDefect::TooFewVertices(2),
            })
        );
    }

    #[test]
    fn test_adjacent_edges_not_counted() {
        // A triangle with a collinear extra vertex.
        let ring = Ring::new(vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(1.0, 1.0),
        ]);
        assert!(!has_self_intersection(&ring));
    }
}
