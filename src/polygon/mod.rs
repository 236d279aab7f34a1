//! Rings, polygons, pipe outlines and boolean operations.
//!
//! This module provides:
//! - [`Ring`] and [`Polygon`] with area, orientation and containment queries
//! - [`pipe_boundary`] to offset a centerline into a closed pipe outline
//! - [`clip`] and [`Clipper`] for intersection, union, difference and XOR
//! - Ring validation and self-intersection checks
//!
//! # Example
//!
//! ```
//! use pipeshape::polygon::{clip, pipe_boundary, BoolOp};
//! use pipeshape::Point2;
//!
//! let a: Vec<_> = (0..5).map(|i| Point2::new(i as f64 * 25.0, 0.0)).collect();
//! let b: Vec<_> = (0..5).map(|i| Point2::new(i as f64 * 25.0, 60.0)).collect();
//!
//! let pipe_a = pipe_boundary(&a, 40.0).to_polygon();
//! let pipe_b = pipe_boundary(&b, 40.0).to_polygon();
//!
//! let overlap = clip(BoolOp::Intersection, &[pipe_a], &[pipe_b]).unwrap();
//! assert_eq!(overlap.len(), 1);
//! ```

mod boolean;
mod core;
mod pipe;
mod planarize;
mod validate;

pub use boolean::{
    clip, polygon_difference, polygon_intersection, polygon_union, polygon_xor, BoolOp,
    ClipOptions, ClipResult, Clipper, FillRule,
};
pub use core::{ring_signed_area, total_area, winding_number, Polygon, Ring};
pub use pipe::{pipe_boundary, PipeBoundary};
pub use validate::{
    check_ring, find_self_intersections, has_self_intersection, validate_operand,
    SelfIntersection,
};
