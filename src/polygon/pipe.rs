//! Fixed-width pipe outlines around a sampled centerline.
//!
//! Each segment of the centerline contributes one point to each side of the
//! pipe: its start point pushed out along the segment normal by the
//! half-width. There are no caps or joins; the outline is the naive
//! perpendicular offset, so it folds over itself where the centerline turns
//! tighter than the half-width. Use [`Ring::is_simple`] to detect that.
//!
//! # Example
//!
//! ```
//! use pipeshape::{Point2, polygon::pipe_boundary};
//!
//! let centerline = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(10.0, 0.0),
//!     Point2::new(20.0, 0.0),
//! ];
//!
//! let pipe = pipe_boundary(&centerline, 2.0);
//! assert_eq!(pipe.upper.len(), 2);
//! assert_eq!(pipe.outer_ring().len(), 4);
//! ```

use super::core::{Polygon, Ring};
use crate::primitives::{Point2, Vec2};
use num_traits::Float;

/// The two offset sides of a pipe.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeBoundary<F> {
    /// Points offset to the left of the direction of travel.
    pub upper: Vec<Point2<F>>,
    /// Points offset to the right of the direction of travel.
    pub lower: Vec<Point2<F>>,
    /// Number of zero-length centerline segments that borrowed a neighbour's normal.
    pub degenerate_segments: usize,
}

impl<F: Float> PipeBoundary<F> {
    /// A boundary with no points.
    pub fn empty() -> Self {
        Self {
            upper: Vec::new(),
            lower: Vec::new(),
            degenerate_segments: 0,
        }
    }

    /// Returns true if no outline could be built.
    pub fn is_empty(&self) -> bool {
        self.upper.is_empty()
    }

    /// The closed outline: `upper` forward, then `lower` backward.
    ///
    /// The ring winds clockwise for a centerline travelling in +x; the
    /// clipper accepts either orientation.
    pub fn outer_ring(&self) -> Ring<F> {
        let mut vertices = Vec::with_capacity(self.upper.len() + self.lower.len());
        vertices.extend_from_slice(&self.upper);
        vertices.extend(self.lower.iter().rev().copied());
        Ring::new(vertices)
    }

    /// The outline as a polygon without holes.
    pub fn to_polygon(&self) -> Polygon<F> {
        Polygon::with_holes(self.outer_ring(), Vec::new())
    }
}

/// Builds the pipe outline of half-width `half_width` around `centerline`.
///
/// Returns an empty boundary for fewer than 2 points, a non-positive or
/// non-finite half-width, or a centerline whose segments all have zero
/// length.
pub fn pipe_boundary<F: Float>(centerline: &[Point2<F>], half_width: F) -> PipeBoundary<F> {
    if centerline.len() < 2 || !half_width.is_finite() || half_width <= F::zero() {
        return PipeBoundary::empty();
    }

    let normals: Vec<Option<Vec2<F>>> = centerline
        .windows(2)
        .map(|w| segment_normal(w[0], w[1]))
        .collect();

    let Some(first_valid) = normals.iter().flatten().next().copied() else {
        tracing::debug!(
            segments = normals.len(),
            "centerline has no segment with a usable direction"
        );
        return PipeBoundary::empty();
    };

    let count = normals.len();
    let mut upper = Vec::with_capacity(count);
    let mut lower = Vec::with_capacity(count);
    let mut degenerate_segments = 0;
    let mut current = first_valid;

    for (i, normal) in normals.into_iter().enumerate() {
        match normal {
            Some(n) => current = n,
            None => degenerate_segments += 1,
        }
        let offset = current * half_width;
        upper.push(centerline[i] + offset);
        lower.push(centerline[i] - offset);
    }

    if degenerate_segments > 0 {
        tracing::debug!(
            degenerate_segments,
            "reused neighbouring normals for zero-length centerline segments"
        );
    }

    PipeBoundary {
        upper,
        lower,
        degenerate_segments,
    }
}

/// Unit left normal of the segment `a -> b`, if it has a usable direction.
fn segment_normal<F: Float>(a: Point2<F>, b: Point2<F>) -> Option<Vec2<F>> {
    let scale = a.x.abs().max(a.y.abs()).max(F::one());
    let min_length = scale * F::epsilon();
    (b - a).normalize_above(min_length).map(|d| d.perpendicular())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn straight(n: usize, spacing: f64) -> Vec<Point2<f64>> {
        (0..n)
            .map(|i| Point2::new(i as f64 * spacing, 0.0))
            .collect()
    }

    #[test]
    fn test_straight_pipe_offsets() {
        let pipe = pipe_boundary(&straight(3, 10.0), 2.0);
        assert_eq!(pipe.upper, vec![Point2::new(0.0, 2.0), Point2::new(10.0, 2.0)]);
        assert_eq!(pipe.lower, vec![Point2::new(0.0, -2.0), Point2::new(10.0, -2.0)]);
        assert_eq!(pipe.degenerate_segments, 0);
    }

    #[test]
    fn test_outer_ring_order() {
        let pipe = pipe_boundary(&straight(3, 10.0), 2.0);
        let ring = pipe.outer_ring();
        assert_eq!(
            ring.vertices,
            vec![
                Point2::new(0.0, 2.0),
                Point2::new(10.0, 2.0),
                Point2::new(10.0, -2.0),
                Point2::new(0.0, -2.0),
            ]
        );
        assert!(!ring.is_ccw());
    }

    #[test]
    fn test_straight_pipe_area() {
        // The outline spans from the first sample to the last segment's start.
        let w = 40.0;
        let centerline = straight(70, 3.0);
        let span = centerline[68].x - centerline[0].x;
        let pipe = pipe_boundary(&centerline, w);
        assert_relative_eq!(pipe.outer_ring().area(), 2.0 * w * span, max_relative = 1e-12);
        assert!(pipe.outer_ring().is_simple());
    }

    #[test]
    fn test_degenerate_segment_reuses_previous_normal() {
        let centerline = vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 5.0),
            Point2::new(0.0, 5.0),
            Point2::new(0.0, 10.0),
        ];
        let pipe = pipe_boundary(&centerline, 1.0);
        assert_eq!(pipe.degenerate_segments, 1);
        assert_eq!(pipe.upper.len(), 3);
        assert_relative_eq!(pipe.upper[1].x, -1.0);
        assert_relative_eq!(pipe.upper[1].y, 5.0);
        assert!(pipe.upper.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_leading_degenerate_segments_use_first_valid_normal() {
        let centerline = vec![
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(4.0, 1.0),
        ];
        let pipe = pipe_boundary(&centerline, 0.5);
        assert_eq!(pipe.degenerate_segments, 2);
        for p in &pipe.upper {
            assert_relative_eq!(p.y, 1.5);
        }
    }

    #[test]
    fn test_empty_inputs() {
        assert!(pipe_boundary::<f64>(&[], 1.0).is_empty());
        assert!(pipe_boundary(&[Point2::new(0.0, 0.0)], 1.0).is_empty());
        assert!(pipe_boundary(&straight(3, 1.0), 0.0).is_empty());
        assert!(pipe_boundary(&straight(3, 1.0), -1.0).is_empty());
        assert!(pipe_boundary(&straight(3, 1.0), f64::NAN).is_empty());

        let stuck = vec![Point2::new(2.0, 2.0); 4];
        let pipe = pipe_boundary(&stuck, 1.0);
        assert!(pipe.is_empty());
        assert!(pipe.outer_ring().is_empty());
    }

    #[test]
    fn test_tight_turn_self_intersects() {
        // A U-turn narrower than the pipe folds the inner side over itself.
        let centerline = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 1.0),
            Point2::new(0.0, 1.0),
            Point2::new(-1.0, 1.0),
        ];
        let pipe = pipe_boundary(&centerline, 5.0);
        assert!(!pipe.outer_ring().is_simple());
    }

    #[test]
    fn test_to_polygon() {
        let polygon = pipe_boundary(&straight(2, 4.0), 1.0).to_polygon();
        assert_eq!(polygon.outer.len(), 2);
        assert!(polygon.holes.is_empty());
    }
}
