//! Validity violations.

use crate::primitives::Coordinate;
use num_traits::Float;
use std::fmt;

/// Kind of topological violation.
///
/// Variants are declared in check-priority order: when a geometry breaks
/// several rules, the one reported is the smallest kind that applies to the
/// first failing component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TopologyErrorKind {
    /// Two consecutive coordinates are equal.
    RepeatedPoint,
    /// A line has fewer than 2 distinct points, or a ring fewer than 4.
    TooFewPoints,
    /// A ring touches or crosses itself.
    RingSelfIntersection,
    /// Rings cross, or a node has inconsistent area labels.
    SelfIntersection,
    /// Two rings are identical.
    DuplicateRings,
    /// A hole is not contained in its shell.
    HoleOutsideShell,
    /// A hole lies inside another hole.
    NestedHoles,
    /// Holes split the polygon interior into several pieces.
    DisconnectedInterior,
    /// A multipolygon element lies inside another element.
    NestedShells,
}

impl TopologyErrorKind {
    /// Human-readable description.
    pub fn message(self) -> &'static str {
        match self {
            TopologyErrorKind::RepeatedPoint => "Repeated Point",
            TopologyErrorKind::TooFewPoints => "Too few points in geometry component",
            TopologyErrorKind::RingSelfIntersection => "Ring Self-intersection",
            TopologyErrorKind::SelfIntersection => "Self-intersection",
            TopologyErrorKind::DuplicateRings => "Duplicate Rings",
            TopologyErrorKind::HoleOutsideShell => "Hole lies outside shell",
            TopologyErrorKind::NestedHoles => "Holes are nested",
            TopologyErrorKind::DisconnectedInterior => "Interior is disconnected",
            TopologyErrorKind::NestedShells => "Nested shells",
        }
    }
}

impl fmt::Display for TopologyErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// The first violation found in a geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopologyValidationError<F> {
    /// What rule was broken.
    pub kind: TopologyErrorKind,
    /// A point at or near the violation, when one is known.
    pub location: Option<Coordinate<F>>,
}

impl<F: Float> TopologyValidationError<F> {
    /// Creates an error, with a witness point when one is known.
    ///
    /// Accepts either a `Coordinate` or an `Option<Coordinate>`.
    pub fn new(kind: TopologyErrorKind, location: impl Into<Option<Coordinate<F>>>) -> Self {
        Self {
            kind,
            location: location.into(),
        }
    }

    /// Creates an error without a witness point.
    pub fn without_location(kind: TopologyErrorKind) -> Self {
        Self {
            kind,
            location: None,
        }
    }

    /// Human-readable description of the kind.
    pub fn message(&self) -> &'static str {
        self.kind.message()
    }
}

impl<F: Float + fmt::Display> fmt::Display for TopologyValidationError<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(p) => write!(f, "{} at or near point ({} {})", self.kind, p.x, p.y),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl<F: Float + fmt::Debug + fmt::Display> std::error::Error for TopologyValidationError<F> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        assert!(TopologyErrorKind::RepeatedPoint < TopologyErrorKind::TooFewPoints);
        assert!(TopologyErrorKind::RingSelfIntersection < TopologyErrorKind::SelfIntersection);
        assert!(TopologyErrorKind::DisconnectedInterior < TopologyErrorKind::NestedShells);
    }

    #[test]
    fn test_display() {
        let err: TopologyValidationError<f64> = TopologyValidationError::new(
            TopologyErrorKind::NestedHoles,
            Coordinate::new(2.0, 2.5),
        );
        assert_eq!(err.to_string(), "Holes are nested at or near point (2 2.5)");

        let witness = Some(Coordinate::new(2.0, 2.5));
        let same = TopologyValidationError::new(TopologyErrorKind::NestedHoles, witness);
        assert_eq!(err, same);

        let err: TopologyValidationError<f64> =
            TopologyValidationError::without_location(TopologyErrorKind::TooFewPoints);
        assert_eq!(err.to_string(), "Too few points in geometry component");
        assert_eq!(err.message(), TopologyErrorKind::TooFewPoints.message());
    }
}
