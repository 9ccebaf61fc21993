//! Axis-aligned envelope of a coordinate sequence.

use crate::primitives::Coordinate;
use num_traits::Float;

/// A 2D axis-aligned bounding box.
///
/// Defined by minimum and maximum corners. Boundaries are closed: envelopes
/// that only touch still intersect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope<F> {
    /// Minimum corner (smallest x and y values).
    pub min: Coordinate<F>,
    /// Maximum corner (largest x and y values).
    pub max: Coordinate<F>,
}

impl<F: Float> Envelope<F> {
    /// Creates a new envelope from min and max corners.
    ///
    /// Does not validate that min <= max.
    #[inline]
    pub fn new(min: Coordinate<F>, max: Coordinate<F>) -> Self {
        Self { min, max }
    }

    /// Creates an envelope from two arbitrary corners.
    #[inline]
    pub fn from_corners(a: Coordinate<F>, b: Coordinate<F>) -> Self {
        Self {
            min: Coordinate::new(a.x.min(b.x), a.y.min(b.y)),
            max: Coordinate::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Creates an envelope containing a single coordinate.
    #[inline]
    pub fn from_coordinate(p: Coordinate<F>) -> Self {
        Self::new(Coordinate::new(p.x, p.y), Coordinate::new(p.x, p.y))
    }

    /// Creates an envelope from an iterator of coordinates.
    ///
    /// Returns `None` if the iterator is empty.
    pub fn from_coordinates<I>(coords: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinate<F>>,
    {
        let mut iter = coords.into_iter();
        let first = iter.next()?;

        let mut env = Self::from_coordinate(first);
        for p in iter {
            env = env.expand_to_include(p);
        }
        Some(env)
    }

    /// Returns the width of the envelope.
    #[inline]
    pub fn width(self) -> F {
        self.max.x - self.min.x
    }

    /// Returns the height of the envelope.
    #[inline]
    pub fn height(self) -> F {
        self.max.y - self.min.y
    }

    /// Returns the center of the envelope.
    #[inline]
    pub fn center(self) -> Coordinate<F> {
        self.min.midpoint(self.max)
    }

    /// Returns a new envelope expanded to include the given coordinate.
    #[inline]
    pub fn expand_to_include(self, p: Coordinate<F>) -> Self {
        Self {
            min: Coordinate::new(self.min.x.min(p.x), self.min.y.min(p.y)),
            max: Coordinate::new(self.max.x.max(p.x), self.max.y.max(p.y)),
        }
    }

    /// Returns the smallest envelope containing both envelopes.
    #[inline]
    pub fn expand_to_include_envelope(self, other: Self) -> Self {
        Self {
            min: Coordinate::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Coordinate::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Returns `true` if this envelope contains the given coordinate.
    #[inline]
    pub fn contains_coordinate(self, p: Coordinate<F>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Returns `true` if `other` lies entirely inside this envelope.
    #[inline]
    pub fn contains_envelope(self, other: Self) -> bool {
        other.min.x >= self.min.x
            && other.max.x <= self.max.x
            && other.min.y >= self.min.y
            && other.max.y <= self.max.y
    }

    /// Returns `true` if this envelope intersects another envelope.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(x0: f64, y0: f64, x1: f64, y1: f64) -> Envelope<f64> {
        Envelope::new(Coordinate::new(x0, y0), Coordinate::new(x1, y1))
    }

    #[test]
    fn test_from_corners() {
        // Corners in "wrong" order
        let e = Envelope::from_corners(Coordinate::new(10.0, 10.0), Coordinate::new(0.0, 0.0));
        assert_eq!(e, env(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_from_coordinates() {
        let coords = vec![
            Coordinate::new(1.0, 2.0),
            Coordinate::new(-3.0, 5.0),
            Coordinate::new(4.0, -1.0),
        ];
        let e = Envelope::from_coordinates(coords).unwrap();
        assert_eq!(e, env(-3.0, -1.0, 4.0, 5.0));
        assert_eq!(e.width(), 7.0);
        assert_eq!(e.height(), 6.0);
    }

    #[test]
    fn test_from_coordinates_empty() {
        let coords: Vec<Coordinate<f64>> = vec![];
        assert!(Envelope::from_coordinates(coords).is_none());
    }

    #[test]
    fn test_intersects_touching() {
        let a = env(0.0, 0.0, 10.0, 10.0);
        let b = env(10.0, 5.0, 15.0, 15.0);
        let c = env(20.0, 20.0, 30.0, 30.0);

        assert!(a.intersects(b));
        assert!(b.intersects(a));
        assert!(!a.intersects(c));
    }

    #[test]
    fn test_contains() {
        let a = env(0.0, 0.0, 10.0, 10.0);

        assert!(a.contains_coordinate(Coordinate::new(0.0, 10.0)));
        assert!(!a.contains_coordinate(Coordinate::new(-1.0, 5.0)));
        assert!(a.contains_envelope(env(1.0, 1.0, 9.0, 9.0)));
        assert!(a.contains_envelope(a));
        assert!(!a.contains_envelope(env(1.0, 1.0, 11.0, 9.0)));
    }

    #[test]
    fn test_expand() {
        let a = env(0.0, 0.0, 5.0, 5.0);
        let b = a.expand_to_include(Coordinate::new(7.0, -2.0));
        assert_eq!(b, env(0.0, -2.0, 7.0, 5.0));

        let c = a.expand_to_include_envelope(env(3.0, 3.0, 10.0, 10.0));
        assert_eq!(c, env(0.0, 0.0, 10.0, 10.0));
        assert_eq!(c.center(), Coordinate::new(5.0, 5.0));
    }
}
