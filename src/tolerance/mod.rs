//! Epsilon-aware geometric predicates and vertex welding.
//!
//! All functions in this module take explicit tolerance parameters.
//! No hidden epsilons are used.

mod predicates;
mod weld;

pub use predicates::{
    collinear_deviation, distance_to_segment, orient2d, point_on_segment, segments_intersect,
    Orientation, SegmentIntersection,
};
pub use weld::{remove_duplicate_vertices, weld_vertices_indexed};
