//! Read-only geometry model consumed by the validity checks.
//!
//! Constructors reject non-finite ordinates and unclosed rings, so every
//! value reaching [`crate::valid`] is well-formed at the coordinate level.
//!
//! # Example
//!
//! ```
//! use topovalid::geometry::{Geometry, LinearRing, Polygon};
//!
//! let shell = LinearRing::from_xy(&[
//!     (0.0, 0.0),
//!     (10.0, 0.0),
//!     (10.0, 10.0),
//!     (0.0, 10.0),
//!     (0.0, 0.0),
//! ])
//! .unwrap();
//!
//! let polygon = Geometry::Polygon(Polygon::new(shell, vec![]));
//! assert_eq!(polygon.kind_name(), "Polygon");
//! ```

mod line;
mod polygon;

pub use line::{LineString, LinearRing};
pub use polygon::{MultiPolygon, Polygon};

pub(crate) use line::remove_repeated_points;

use crate::bounds::Envelope;
use crate::primitives::Coordinate;
use num_traits::Float;

/// A planar geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry<F> {
    /// A single position.
    Point(Coordinate<F>),
    /// An open curve.
    LineString(LineString<F>),
    /// A closed curve.
    LinearRing(LinearRing<F>),
    /// An area with optional holes.
    Polygon(Polygon<F>),
    /// Several curves.
    MultiLineString(Vec<LineString<F>>),
    /// Several areas.
    MultiPolygon(MultiPolygon<F>),
    /// A heterogeneous collection.
    GeometryCollection(Vec<Geometry<F>>),
}

impl<F: Float> Geometry<F> {
    /// Returns the variant name.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::LineString(_) => "LineString",
            Geometry::LinearRing(_) => "LinearRing",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::MultiPolygon(_) => "MultiPolygon",
            Geometry::GeometryCollection(_) => "GeometryCollection",
        }
    }

    /// Returns the envelope of the geometry, or `None` when empty.
    pub fn envelope(&self) -> Option<Envelope<F>> {
        match self {
            Geometry::Point(c) => Some(Envelope::from_coordinate(*c)),
            Geometry::LineString(l) => l.envelope(),
            Geometry::LinearRing(r) => r.envelope(),
            Geometry::Polygon(p) => p.envelope(),
            Geometry::MultiLineString(lines) => lines
                .iter()
                .filter_map(LineString::envelope)
                .reduce(Envelope::expand_to_include_envelope),
            Geometry::MultiPolygon(mp) => mp.envelope(),
            Geometry::GeometryCollection(children) => children
                .iter()
                .filter_map(Geometry::envelope)
                .reduce(Envelope::expand_to_include_envelope),
        }
    }

    /// Returns a copy with every ring's orientation reversed.
    ///
    /// Line strings and points are returned unchanged.
    pub fn reversed(&self) -> Self {
        match self {
            Geometry::LinearRing(r) => Geometry::LinearRing(r.reversed()),
            Geometry::Polygon(p) => Geometry::Polygon(p.reversed()),
            Geometry::MultiPolygon(mp) => Geometry::MultiPolygon(MultiPolygon::new(
                mp.polygons().iter().map(Polygon::reversed).collect(),
            )),
            Geometry::GeometryCollection(children) => {
                Geometry::GeometryCollection(children.iter().map(Geometry::reversed).collect())
            }
            other => other.clone(),
        }
    }
}

impl<F: Float> From<Polygon<F>> for Geometry<F> {
    fn from(p: Polygon<F>) -> Self {
        Geometry::Polygon(p)
    }
}

impl<F: Float> From<MultiPolygon<F>> for Geometry<F> {
    fn from(mp: MultiPolygon<F>) -> Self {
        Geometry::MultiPolygon(mp)
    }
}

impl<F: Float> From<LinearRing<F>> for Geometry<F> {
    fn from(r: LinearRing<F>) -> Self {
        Geometry::LinearRing(r)
    }
}

impl<F: Float> From<LineString<F>> for Geometry<F> {
    fn from(l: LineString<F>) -> Self {
        Geometry::LineString(l)
    }
}
