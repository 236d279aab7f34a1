//! Overlap of two pipes.
//!
//! [`OverlapEngine`] runs the whole pipeline for a pair of branches: spline
//! interpolation, pipe outline, then intersection and union of the two
//! outlines. It keeps no state between calls; every call recomputes from the
//! control points it is given.
//!
//! # Example
//!
//! ```
//! use pipeshape::{compute_overlap, Point2};
//!
//! let a = vec![Point2::new(0.0, 0.0), Point2::new(200.0, 0.0)];
//! let b = vec![Point2::new(0.0, 60.0), Point2::new(200.0, 60.0)];
//!
//! let overlap = compute_overlap(&a, &b, 40.0).unwrap();
//! assert_eq!(overlap.intersection.len(), 1);
//! assert_eq!(overlap.union.len(), 1);
//! ```

use crate::branch::{find_proximity, Branch, ProximityHit};
use crate::config::PipeConfig;
use crate::curves::interpolate;
use crate::error::GeomError;
use crate::polygon::{pipe_boundary, total_area, BoolOp, Clipper, PipeBoundary, Polygon};
use crate::primitives::Point2;
use num_traits::Float;

/// Geometry derived from two branches.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlap<F> {
    /// Sampled centerline of the first branch.
    pub centerline_a: Vec<Point2<F>>,
    /// Sampled centerline of the second branch.
    pub centerline_b: Vec<Point2<F>>,
    /// Pipe outline of the first branch.
    pub pipe_a: PipeBoundary<F>,
    /// Pipe outline of the second branch.
    pub pipe_b: PipeBoundary<F>,
    /// Regions covered by both pipes.
    pub intersection: Vec<Polygon<F>>,
    /// Regions covered by either pipe.
    pub union: Vec<Polygon<F>>,
    /// Tie-break decisions made by both clip runs.
    pub ambiguous_events: usize,
}

impl<F: Float> Overlap<F> {
    /// Returns true if the pipes share any area.
    pub fn has_overlap(&self) -> bool {
        !self.intersection.is_empty()
    }

    /// Total area of the intersection.
    pub fn overlap_area(&self) -> F {
        total_area(&self.intersection)
    }

    /// Total area of the union.
    pub fn union_area(&self) -> F {
        total_area(&self.union)
    }
}

/// Computes pipe overlaps with a fixed configuration.
#[derive(Debug, Clone, Copy)]
pub struct OverlapEngine<F> {
    config: PipeConfig<F>,
}

impl<F: Float> Default for OverlapEngine<F> {
    fn default() -> Self {
        Self::new(PipeConfig::default())
    }
}

impl<F: Float> OverlapEngine<F> {
    /// Creates an engine with the given configuration.
    pub fn new(config: PipeConfig<F>) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &PipeConfig<F> {
        &self.config
    }

    /// Builds both pipes from raw control points and overlaps them.
    ///
    /// A branch with fewer than 2 usable control points gets an empty pipe
    /// and takes no part in the clip.
    ///
    /// # Errors
    ///
    /// [`GeomError::InvalidConfig`] if the configuration does not validate.
    /// Clipper errors are passed through.
    pub fn compute(&self, a: &[Point2<F>], b: &[Point2<F>]) -> Result<Overlap<F>, GeomError> {
        self.config.validate()?;
        let config = &self.config;

        let centerline_a = interpolate(a, config.sample_count, config.tension);
        let centerline_b = interpolate(b, config.sample_count, config.tension);
        let pipe_a = pipe_boundary(&centerline_a, config.half_width);
        let pipe_b = pipe_boundary(&centerline_b, config.half_width);

        let operand_a = clip_operand(&pipe_a);
        let operand_b = clip_operand(&pipe_b);

        let clipper = Clipper::new(config.clip);
        let intersection = clipper.run(BoolOp::Intersection, &operand_a, &operand_b)?;
        let union = clipper.run(BoolOp::Union, &operand_a, &operand_b)?;
        let ambiguous_events = intersection.ambiguous_events + union.ambiguous_events;

        tracing::debug!(
            samples_a = centerline_a.len(),
            samples_b = centerline_b.len(),
            intersection = intersection.polygons.len(),
            union = union.polygons.len(),
            ambiguous_events,
            "computed pipe overlap"
        );

        Ok(Overlap {
            centerline_a,
            centerline_b,
            pipe_a,
            pipe_b,
            intersection: intersection.polygons,
            union: union.polygons,
            ambiguous_events,
        })
    }

    /// Snapshots both branches and overlaps their pipes.
    ///
    /// # Errors
    ///
    /// As for [`OverlapEngine::compute`].
    pub fn compute_branches(&self, a: &Branch<F>, b: &Branch<F>) -> Result<Overlap<F>, GeomError> {
        self.compute(&a.positions(), &b.positions())
    }

    /// Control points of `a` lying within the configured proximity
    /// threshold of a control point of `b`.
    pub fn proximity(&self, a: &Branch<F>, b: &Branch<F>) -> Vec<ProximityHit<F>> {
        find_proximity(a, b, self.config.proximity_threshold)
    }
}

/// Overlaps the pipes around two control point sequences with default
/// settings and the given half-width.
///
/// # Errors
///
/// [`GeomError::InvalidConfig`] for a non-positive or non-finite half-width.
pub fn compute_overlap<F: Float>(
    a: &[Point2<F>],
    b: &[Point2<F>],
    half_width: F,
) -> Result<Overlap<F>, GeomError> {
    OverlapEngine::new(PipeConfig::default().half_width(half_width)).compute(a, b)
}

fn clip_operand<F: Float>(pipe: &PipeBoundary<F>) -> Vec<Polygon<F>> {
    let polygon = pipe.to_polygon();
    if polygon.outer.len() < 3 {
        if !pipe.is_empty() {
            tracing::warn!(
                vertices = polygon.outer.len(),
                "pipe outline too short to enclose an area"
            );
        }
        Vec::new()
    } else {
        vec![polygon]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branch::IdAllocator;
    use approx::assert_relative_eq;

    fn horizontal(y: f64) -> Vec<Point2<f64>> {
        vec![Point2::new(0.0, y), Point2::new(300.0, y)]
    }

    #[test]
    fn test_separated_pipes() {
        let overlap = compute_overlap(&horizontal(0.0), &horizontal(100.0), 40.0).unwrap();
        assert!(!overlap.has_overlap());
        assert_eq!(overlap.union.len(), 2);
        assert_eq!(overlap.centerline_a.len(), 70);
    }

    #[test]
    fn test_overlapping_band() {
        let overlap = compute_overlap(&horizontal(0.0), &horizontal(60.0), 40.0).unwrap();
        assert_eq!(overlap.intersection.len(), 1);

        // The pipe spans from the first sample to the start of the last segment.
        let c = &overlap.centerline_a;
        let span = c[c.len() - 2].x - c[0].x;
        assert_relative_eq!(overlap.overlap_area(), 20.0 * span, max_relative = 1e-9);
        assert_relative_eq!(overlap.union_area(), 140.0 * span, max_relative = 1e-9);
    }

    #[test]
    fn test_degenerate_branch_is_empty_operand() {
        let overlap = compute_overlap(&horizontal(0.0), &[Point2::new(5.0, 5.0)], 40.0).unwrap();
        assert!(overlap.centerline_b.is_empty());
        assert!(overlap.pipe_b.is_empty());
        assert!(overlap.intersection.is_empty());
        assert_eq!(overlap.union.len(), 1);
    }

    #[test]
    fn test_invalid_half_width() {
        assert!(matches!(
            compute_overlap(&horizontal(0.0), &horizontal(10.0), 0.0),
            Err(GeomError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_two_samples_rejected() {
        let engine = OverlapEngine::new(PipeConfig::default().sample_count(2));
        let a = horizontal(0.0);
        assert!(matches!(
            engine.compute(&a, &a),
            Err(GeomError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_fewest_samples_still_overlap() {
        let engine = OverlapEngine::new(PipeConfig::default().sample_count(3));
        let a = horizontal(0.0);
        let overlap = engine.compute(&a, &a).unwrap();
        assert_eq!(overlap.pipe_a.outer_ring().len(), 4);
        assert_eq!(overlap.intersection.len(), 1);
        assert_eq!(overlap.union.len(), 1);

        // Three samples at x = 0, 150, 300; the outline covers 0..150.
        assert_relative_eq!(overlap.overlap_area(), 80.0 * 150.0, max_relative = 1e-9);
        assert_relative_eq!(overlap.union_area(), 80.0 * 150.0, max_relative = 1e-9);
    }

    #[test]
    fn test_compute_branches_matches_points() {
        let mut ids = IdAllocator::new();
        let mut a = Branch::new(ids.next_branch_id());
        let mut b = Branch::new(ids.next_branch_id());
        for p in horizontal(0.0) {
            a.push_point(&mut ids, p);
        }
        for p in horizontal(60.0) {
            b.push_point(&mut ids, p);
        }

        let engine = OverlapEngine::default();
        let from_branches = engine.compute_branches(&a, &b).unwrap();
        let from_points = engine.compute(&horizontal(0.0), &horizontal(60.0)).unwrap();
        assert_eq!(from_branches, from_points);

        assert_eq!(engine.proximity(&a, &b).len(), 0);
        let close = engine.config().proximity_threshold - 1.0;
        b.move_point(b.points()[0].id, Point2::new(0.0, close)).unwrap();
        assert_eq!(engine.proximity(&a, &b).len(), 1);
    }
}
