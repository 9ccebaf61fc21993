//! Polygons and multi-polygons.

use super::LinearRing;
use crate::bounds::Envelope;
use num_traits::Float;

/// A polygon: one shell and zero or more holes.
///
/// The rings are owned by the polygon and borrowed by every check for the
/// duration of a validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<F> {
    shell: LinearRing<F>,
    holes: Vec<LinearRing<F>>,
}

impl<F: Float> Polygon<F> {
    /// Creates a polygon, taking ownership of its rings.
    #[inline]
    pub fn new(shell: LinearRing<F>, holes: Vec<LinearRing<F>>) -> Self {
        Self { shell, holes }
    }

    /// Returns the outer ring.
    #[inline]
    pub fn shell(&self) -> &LinearRing<F> {
        &self.shell
    }

    /// Returns the inner rings.
    #[inline]
    pub fn holes(&self) -> &[LinearRing<F>] {
        &self.holes
    }

    /// Returns true if the shell is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shell.is_empty()
    }

    /// Returns the envelope of the shell.
    #[inline]
    pub fn envelope(&self) -> Option<Envelope<F>> {
        self.shell.envelope()
    }

    /// Iterates over the shell followed by the holes.
    pub fn rings(&self) -> impl Iterator<Item = &LinearRing<F>> {
        std::iter::once(&self.shell).chain(self.holes.iter())
    }

    /// Returns a polygon with every ring's orientation reversed.
    pub fn reversed(&self) -> Self {
        Self {
            shell: self.shell.reversed(),
            holes: self.holes.iter().map(LinearRing::reversed).collect(),
        }
    }
}

/// A collection of polygons treated as one area.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPolygon<F> {
    polygons: Vec<Polygon<F>>,
}

impl<F: Float> MultiPolygon<F> {
    /// Creates a multi-polygon from its elements.
    #[inline]
    pub fn new(polygons: Vec<Polygon<F>>) -> Self {
        Self { polygons }
    }

    /// Returns the element polygons.
    #[inline]
    pub fn polygons(&self) -> &[Polygon<F>] {
        &self.polygons
    }

    /// Returns true if there are no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.polygons.iter().all(Polygon::is_empty)
    }

    /// Returns the envelope of all element shells.
    pub fn envelope(&self) -> Option<Envelope<F>> {
        self.polygons
            .iter()
            .filter_map(Polygon::envelope)
            .reduce(Envelope::expand_to_include_envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Coordinate;

    fn square(x0: f64, y0: f64, size: f64) -> LinearRing<f64> {
        LinearRing::from_xy(&[
            (x0, y0),
            (x0 + size, y0),
            (x0 + size, y0 + size),
            (x0, y0 + size),
            (x0, y0),
        ])
        .unwrap()
    }

    #[test]
    fn test_rings_iterates_shell_first() {
        let poly = Polygon::new(square(0.0, 0.0, 10.0), vec![square(1.0, 1.0, 2.0)]);
        let rings: Vec<_> = poly.rings().collect();
        assert_eq!(rings.len(), 2);
        assert_eq!(rings[0], poly.shell());
    }

    #[test]
    fn test_reversed_flips_all_rings() {
        let poly = Polygon::new(square(0.0, 0.0, 10.0), vec![square(1.0, 1.0, 2.0)]);
        let rev = poly.reversed();
        assert_ne!(poly.shell().is_ccw(), rev.shell().is_ccw());
        assert_ne!(poly.holes()[0].is_ccw(), rev.holes()[0].is_ccw());
    }

    #[test]
    fn test_multi_polygon_envelope() {
        let mp = MultiPolygon::new(vec![
            Polygon::new(square(0.0, 0.0, 1.0), vec![]),
            Polygon::new(square(5.0, 5.0, 1.0), vec![]),
        ]);
        let env = mp.envelope().unwrap();
        assert_eq!(env.min, Coordinate::new(0.0, 0.0));
        assert_eq!(env.max, Coordinate::new(6.0, 6.0));
        assert!(!mp.is_empty());
        assert!(MultiPolygon::<f64>::new(vec![]).is_empty());
    }
}
