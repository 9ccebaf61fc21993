//! Error types for topovalid operations.
//!
//! Geometry defects found by validation are *not* errors in this sense: they
//! are reported as [`TopologyValidationError`](crate::valid::TopologyValidationError)
//! values. The enums here cover malformed input to the geometry model and
//! internal conditions that indicate a bug rather than an invalid geometry.

use thiserror::Error;

/// Errors raised while constructing geometry values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// An ordinate is NaN or infinite.
    #[error("coordinate {index} has a non-finite ordinate")]
    NonFiniteCoordinate {
        /// Position of the offending coordinate in its sequence.
        index: usize,
    },

    /// A linear ring whose first and last coordinates differ.
    #[error("linear ring is not closed")]
    RingNotClosed,
}

/// Fatal conditions detected during validation.
///
/// These never describe a defect of the input geometry; they mean the
/// geometry graph violated a precondition the checks rely on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidityError {
    /// Every vertex of the inner ring is a node of the search ring.
    #[error("unable to find a point of the ring that is not a node of the search ring")]
    NoNonNodePoint,

    /// A node had an incoming result edge but no outgoing one to link to.
    #[error("unable to link incoming directed edge at node ({x}, {y})")]
    UnlinkedDirectedEdge {
        /// Node x ordinate.
        x: f64,
        /// Node y ordinate.
        y: f64,
    },

    /// Following `next` links did not return to the starting directed edge.
    #[error("directed edge ring is not closed")]
    OpenEdgeRing,

    /// A shell ring has no directed edge with the area interior on its right.
    #[error("unable to find a shell edge with the interior on its right")]
    MissingShellEdge,
}
