//! Simple Features validity checks.
//!
//! [`IsValidOp`] runs the checks in a fixed priority order and reports the
//! first violation as a [`TopologyValidationError`]. The individual testers
//! are public for callers that need a single check:
//!
//! - [`RepeatedPointTester`] - consecutive identical coordinates
//! - [`ConsistentAreaTester`] - crossing rings and duplicate rings
//! - [`NestedRingTester`] - holes inside holes, shells inside shells
//! - [`ConnectedInteriorTester`] - interiors cut apart by touching holes
//!
//! # Example
//!
//! ```
//! use topovalid::geometry::{Geometry, LinearRing, Polygon};
//! use topovalid::valid::{validate, TopologyErrorKind};
//!
//! let bow_tie = LinearRing::from_xy(&[
//!     (0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0), (0.0, 0.0),
//! ]).unwrap();
//! let geom = Geometry::Polygon(Polygon::new(bow_tie, vec![]));
//!
//! let err = validate(&geom).unwrap().unwrap();
//! assert_eq!(err.kind, TopologyErrorKind::RingSelfIntersection);
//! assert_eq!(err.to_string(), "Ring Self-intersection at or near point (5 5)");
//! ```

mod connected_interior;
mod consistent_area;
mod error;
mod is_valid_op;
mod nested_ring;
mod repeated_point;

pub use connected_interior::ConnectedInteriorTester;
pub use consistent_area::ConsistentAreaTester;
pub use error::{TopologyErrorKind, TopologyValidationError};
pub use is_valid_op::{is_valid, validate, IsValidOp, ValidOptions};
pub use nested_ring::{NestedRingTester, NestingStrategy};
pub use repeated_point::RepeatedPointTester;
