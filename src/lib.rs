//! pipeshape - Pipe geometry for layout editors
//!
//! Turns sparse control points into smooth fixed-width pipes and computes how
//! two pipes overlap. The pipeline runs Catmull-Rom interpolation, then a
//! perpendicular offset into a closed outline, then a winding-number polygon
//! clipper for intersection and union.
//!
//! # Example
//!
//! ```
//! use pipeshape::{OverlapEngine, PipeConfig, Point2};
//!
//! let engine = OverlapEngine::new(PipeConfig::default());
//! let a = vec![Point2::new(0.0, 0.0), Point2::new(150.0, 40.0), Point2::new(300.0, 0.0)];
//! let b = vec![Point2::new(0.0, 100.0), Point2::new(300.0, 100.0)];
//!
//! let overlap = engine.compute(&a, &b).unwrap();
//! assert!(overlap.has_overlap());
//! assert!(overlap.overlap_area() <= overlap.union_area());
//! ```

pub mod branch;
pub mod config;
pub mod curves;
pub mod error;
pub mod io;
pub mod overlap;
pub mod polygon;
pub mod primitives;
pub mod tolerance;

pub use branch::{Branch, BranchId, BranchKind, ControlPoint, IdAllocator, PointId};
pub use config::PipeConfig;
pub use curves::{interpolate, CatmullRom2};
pub use error::{GeomError, Operand, RingDefect};
pub use overlap::{compute_overlap, Overlap, OverlapEngine};
pub use polygon::{clip, pipe_boundary, BoolOp, ClipOptions, Clipper, PipeBoundary, Polygon, Ring};
pub use primitives::{Point2, Vec2};
pub use tolerance::{
    orient2d, point_on_segment, segments_intersect, Orientation, SegmentIntersection,
};
