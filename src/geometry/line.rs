//! Line strings and linear rings.

use crate::bounds::Envelope;
use crate::error::GeometryError;
use crate::predicates::is_ccw;
use crate::primitives::Coordinate;
use num_traits::Float;

fn check_finite<F: Float>(coords: &[Coordinate<F>]) -> Result<(), GeometryError> {
    match coords.iter().position(|c| !c.is_finite()) {
        Some(index) => Err(GeometryError::NonFiniteCoordinate { index }),
        None => Ok(()),
    }
}

/// An open sequence of coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LineString<F> {
    coords: Vec<Coordinate<F>>,
    envelope: Option<Envelope<F>>,
}

impl<F: Float> LineString<F> {
    /// Creates a line string, rejecting non-finite ordinates.
    pub fn new(coords: Vec<Coordinate<F>>) -> Result<Self, GeometryError> {
        check_finite(&coords)?;
        let envelope = Envelope::from_coordinates(coords.iter().copied());
        Ok(Self { coords, envelope })
    }

    /// Creates a line string from `(x, y)` pairs.
    pub fn from_xy(points: &[(F, F)]) -> Result<Self, GeometryError> {
        Self::new(points.iter().map(|&p| Coordinate::from(p)).collect())
    }

    /// Returns the coordinates.
    #[inline]
    pub fn coords(&self) -> &[Coordinate<F>] {
        &self.coords
    }

    /// Returns the cached envelope, or `None` when empty.
    #[inline]
    pub fn envelope(&self) -> Option<Envelope<F>> {
        self.envelope
    }

    /// Returns true if there are no coordinates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Returns the number of coordinates.
    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }
}

/// A closed sequence of coordinates (first equals last) bounding an area.
///
/// An empty ring is allowed and is treated as absent by every check.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRing<F> {
    coords: Vec<Coordinate<F>>,
    envelope: Option<Envelope<F>>,
}

impl<F: Float> LinearRing<F> {
    /// Creates a ring, rejecting non-finite ordinates and open sequences.
    ///
    /// Closure is tested in 2D, so a ring whose end points differ only in z
    /// is accepted.
    pub fn new(coords: Vec<Coordinate<F>>) -> Result<Self, GeometryError> {
        check_finite(&coords)?;
        if let (Some(first), Some(last)) = (coords.first(), coords.last()) {
            if first != last {
                return Err(GeometryError::RingNotClosed);
            }
        }
        let envelope = Envelope::from_coordinates(coords.iter().copied());
        Ok(Self { coords, envelope })
    }

    /// Creates a ring from `(x, y)` pairs.
    pub fn from_xy(points: &[(F, F)]) -> Result<Self, GeometryError> {
        Self::new(points.iter().map(|&p| Coordinate::from(p)).collect())
    }

    /// Returns the coordinates, including the closing repeat of the first.
    #[inline]
    pub fn coords(&self) -> &[Coordinate<F>] {
        &self.coords
    }

    /// Returns the cached envelope, or `None` when empty.
    #[inline]
    pub fn envelope(&self) -> Option<Envelope<F>> {
        self.envelope
    }

    /// Returns true if there are no coordinates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Returns the number of coordinates, counting the closing repeat.
    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Tests if the ring is oriented counter-clockwise.
    pub fn is_ccw(&self) -> bool {
        is_ccw(&self.coords)
    }

    /// Returns a ring with reversed orientation.
    pub fn reversed(&self) -> Self {
        let mut coords = self.coords.clone();
        coords.reverse();
        Self {
            coords,
            envelope: self.envelope,
        }
    }
}

/// Returns the coordinates with consecutive 2D duplicates collapsed.
pub(crate) fn remove_repeated_points<F: Float>(coords: &[Coordinate<F>]) -> Vec<Coordinate<F>> {
    let mut result: Vec<Coordinate<F>> = Vec::with_capacity(coords.len());
    for &c in coords {
        if result.last() != Some(&c) {
            result.push(c);
        }
    }
    result
}
