//! Error types for pipeshape operations.

use crate::branch::PointId;
use std::fmt;
use thiserror::Error;

/// Which input of a binary polygon operation a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    /// The first (subject) polygon set.
    A,
    /// The second (clip) polygon set.
    B,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::A => write!(f, "A"),
            Operand::B => write!(f, "B"),
        }
    }
}

/// Why a ring was rejected by the clipper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RingDefect {
    /// Fewer than three vertices.
    #[error("ring has {0} vertices, at least 3 are required")]
    TooFewVertices(usize),

    /// A vertex has a NaN or infinite coordinate.
    #[error("vertex {0} has a non-finite coordinate")]
    NonFiniteVertex(usize),
}

/// Errors that can occur while building or combining pipe geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeomError {
    /// Not enough usable control points to define a curve.
    #[error("at least 2 distinct control points are required, found {found}")]
    InsufficientPoints {
        /// Number of usable points after filtering.
        found: usize,
    },

    /// A ring passed to the clipper is structurally invalid.
    #[error("invalid ring {ring} of polygon {polygon} in operand {operand}: {defect}")]
    InvalidRing {
        /// Operand containing the ring.
        operand: Operand,
        /// Polygon index within the operand.
        polygon: usize,
        /// Ring index within the polygon (0 is the outer ring).
        ring: usize,
        /// What is wrong with it.
        defect: RingDefect,
    },

    /// A control point id is already used in the branch.
    #[error("control point {0} already exists in this branch")]
    DuplicatePointId(PointId),

    /// No control point with this id exists in the branch.
    #[error("no control point {0} in this branch")]
    UnknownPointId(PointId),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
