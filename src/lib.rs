//! topovalid - Topological validity of planar geometries
//!
//! Checks points, lines, rings, polygons and their collections against the
//! OGC Simple Features validity rules and reports the first violation found,
//! with a witness coordinate near it.
//!
//! # Example
//!
//! ```
//! use topovalid::geometry::{Geometry, LinearRing, Polygon};
//! use topovalid::{is_valid, validate, TopologyErrorKind};
//!
//! let shell = LinearRing::from_xy(&[
//!     (0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0),
//! ]).unwrap();
//! let hole = LinearRing::from_xy(&[
//!     (2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0), (2.0, 2.0),
//! ]).unwrap();
//! let nested = LinearRing::from_xy(&[
//!     (2.5, 2.5), (3.5, 2.5), (3.5, 3.5), (2.5, 3.5), (2.5, 2.5),
//! ]).unwrap();
//!
//! let ok = Geometry::Polygon(Polygon::new(shell.clone(), vec![hole.clone()]));
//! assert_eq!(is_valid(&ok), Ok(true));
//!
//! let bad = Geometry::Polygon(Polygon::new(shell, vec![hole, nested]));
//! let err = validate(&bad).unwrap().unwrap();
//! assert_eq!(err.kind, TopologyErrorKind::NestedHoles);
//! ```

pub mod bounds;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod predicates;
pub mod primitives;
pub mod spatial;
pub mod valid;

pub use bounds::Envelope;
pub use error::{GeometryError, ValidityError};
pub use geometry::{Geometry, LineString, LinearRing, MultiPolygon, Polygon};
pub use predicates::{orient2d, Location, Orientation};
pub use primitives::{Coordinate, Vec2};
pub use valid::{
    is_valid, validate, IsValidOp, NestingStrategy, TopologyErrorKind, TopologyValidationError,
    ValidOptions,
};
