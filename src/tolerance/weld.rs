//! Vertex welding and duplicate removal.
//!
//! # Example
//!
//! ```
//! use pipeshape::tolerance::weld_vertices_indexed;
//! use pipeshape::Point2;
//!
//! let points = vec![
//!     Point2::new(1.0_f64, 1.0),
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0 + 1e-12, 1.0),
//! ];
//!
//! let (welded, mapping) = weld_vertices_indexed(&points, 1e-9);
//! assert_eq!(welded.len(), 2);
//! assert_eq!(mapping, vec![1, 0, 1]);
//! ```

use crate::primitives::Point2;
use num_traits::Float;

/// Merges points within `epsilon` of each other, returning the welded
/// vertices and, for each input point, the index of its vertex.
///
/// Points are visited in lexicographic order and each cluster keeps the
/// coordinates of its lexicographically smallest member, so the result only
/// depends on the set of input points, never on their order. Output vertices
/// are in lexicographic order.
pub fn weld_vertices_indexed<F: Float>(
    points: &[Point2<F>],
    epsilon: F,
) -> (Vec<Point2<F>>, Vec<usize>) {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&i, &j| points[i].lex_cmp(&points[j]));

    let eps_sq = epsilon * epsilon;
    let mut vertices: Vec<Point2<F>> = Vec::new();
    let mut mapping = vec![0; points.len()];

    for &i in &order {
        let p = points[i];

        // Representatives are sorted by x; only the tail can be close.
        let mut found = None;
        for (k, v) in vertices.iter().enumerate().rev() {
            if v.x < p.x - epsilon {
                break;
            }
            if v.distance_squared(p) <= eps_sq {
                found = Some(k);
            }
        }

        mapping[i] = match found {
            Some(k) => k,
            None => {
                vertices.push(p);
                vertices.len() - 1
            }
        };
    }

    (vertices, mapping)
}

/// Removes consecutive points within `epsilon` of their predecessor.
///
/// The first point of each run is kept.
pub fn remove_duplicate_vertices<F: Float>(points: &[Point2<F>], epsilon: F) -> Vec<Point2<F>> {
    let mut result: Vec<Point2<F>> = Vec::with_capacity(points.len());
    let eps_sq = epsilon * epsilon;

    for &p in points {
        match result.last() {
            Some(&last) if last.distance_squared(p) <= eps_sq => {}
            _ => result.push(p),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weld_is_order_independent() {
        let a = vec![
            Point2::new(3.0_f64, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 1e-12),
            Point2::new(1.0, 1.0),
        ];
        let mut b = a.clone();
        b.reverse();

        let (va, _) = weld_vertices_indexed(&a, 1e-9);
        let (vb, _) = weld_vertices_indexed(&b, 1e-9);
        assert_eq!(va, vb);
        assert_eq!(va.len(), 3);
    }

    #[test]
    fn test_weld_keeps_smallest_member() {
        let points = vec![Point2::new(1.0_f64, 1e-12), Point2::new(1.0, 0.0)];
        let (vertices, mapping) = weld_vertices_indexed(&points, 1e-9);
        assert_eq!(vertices, vec![Point2::new(1.0, 0.0)]);
        assert_eq!(mapping, vec![0, 0]);
    }

    #[test]
    fn test_weld_scans_past_same_x_neighbours() {
        // Same x, far apart in y: the scan must not stop at the first miss.
        let points = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(0.0, 5.0),
            Point2::new(1e-12, 0.0),
        ];
        let (vertices, mapping) = weld_vertices_indexed(&points, 1e-9);
        assert_eq!(vertices.len(), 2);
        assert_eq!(mapping[0], mapping[2]);
    }

    #[test]
    fn test_weld_empty() {
        let (vertices, mapping) = weld_vertices_indexed::<f64>(&[], 1e-9);
        assert!(vertices.is_empty());
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_remove_duplicate_vertices() {
        let points = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0 + 1e-12, 0.0),
            Point2::new(2.0, 0.0),
        ];
        let cleaned = remove_duplicate_vertices(&points, 1e-9);
        assert_eq!(cleaned.len(), 3);
        assert_eq!(cleaned[1], Point2::new(1.0, 0.0));
    }
}
