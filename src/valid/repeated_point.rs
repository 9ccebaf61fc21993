//! Detection of consecutive duplicate coordinates.

use crate::geometry::{Geometry, Polygon};
use crate::primitives::Coordinate;
use num_traits::Float;

/// Finds consecutive coordinates that are equal in 2D.
///
/// # Example
///
/// ```
/// use topovalid::valid::RepeatedPointTester;
/// use topovalid::Coordinate;
///
/// let coords = [
///     Coordinate::new(0.0, 0.0),
///     Coordinate::new(1.0, 0.0),
///     Coordinate::new(1.0, 0.0),
/// ];
///
/// let mut tester = RepeatedPointTester::new();
/// assert!(tester.has_repeated_point_in(&coords));
/// assert_eq!(tester.coordinate(), Some(Coordinate::new(1.0, 0.0)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RepeatedPointTester<F> {
    repeated: Option<Coordinate<F>>,
}

impl<F: Float> RepeatedPointTester<F> {
    /// Creates a tester with no recorded repeat.
    pub fn new() -> Self {
        Self { repeated: None }
    }

    /// The repeated coordinate found by the last positive test.
    pub fn coordinate(&self) -> Option<Coordinate<F>> {
        self.repeated
    }

    /// Tests every coordinate sequence of `geom`, in component order.
    pub fn has_repeated_point(&mut self, geom: &Geometry<F>) -> bool {
        match geom {
            Geometry::Point(_) => false,
            Geometry::LineString(line) => self.has_repeated_point_in(line.coords()),
            Geometry::LinearRing(ring) => self.has_repeated_point_in(ring.coords()),
            Geometry::Polygon(polygon) => self.has_repeated_point_in_polygon(polygon),
            Geometry::MultiLineString(lines) => {
                lines.iter().any(|line| self.has_repeated_point_in(line.coords()))
            }
            Geometry::MultiPolygon(multi) => multi
                .polygons()
                .iter()
                .any(|polygon| self.has_repeated_point_in_polygon(polygon)),
            Geometry::GeometryCollection(members) => {
                members.iter().any(|member| self.has_repeated_point(member))
            }
        }
    }

    /// Tests a polygon's shell, then its holes.
    pub fn has_repeated_point_in_polygon(&mut self, polygon: &Polygon<F>) -> bool {
        polygon
            .rings()
            .any(|ring| self.has_repeated_point_in(ring.coords()))
    }

    /// Tests a bare coordinate sequence.
    pub fn has_repeated_point_in(&mut self, coords: &[Coordinate<F>]) -> bool {
        match coords.windows(2).find(|w| w[0] == w[1]) {
            Some(w) => {
                self.repeated = Some(w[1]);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{LineString, LinearRing, MultiPolygon};

    fn ring(points: &[(f64, f64)]) -> LinearRing<f64> {
        LinearRing::from_xy(points).unwrap()
    }

    fn square() -> LinearRing<f64> {
        ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)])
    }

    #[test]
    fn test_repeated_start_vertex() {
        let repeated = ring(&[
            (0.0, 0.0),
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (0.0, 10.0),
            (0.0, 0.0),
        ]);
        let mut tester = RepeatedPointTester::new();
        assert!(tester.has_repeated_point(&Geometry::LinearRing(repeated)));
        assert_eq!(tester.coordinate(), Some(Coordinate::new(0.0, 0.0)));
    }

    #[test]
    fn test_clean_geometry() {
        let mut tester = RepeatedPointTester::new();
        assert!(!tester.has_repeated_point(&Geometry::LinearRing(square())));
        assert!(!tester.has_repeated_point(&Geometry::Point(Coordinate::new(1.0, 1.0))));
        assert!(tester.coordinate().is_none());
    }

    #[test]
    fn test_z_is_ignored() {
        let coords = [
            Coordinate::new_3d(1.0, 1.0, 0.0),
            Coordinate::new_3d(1.0, 1.0, 5.0),
        ];
        let mut tester = RepeatedPointTester::new();
        assert!(tester.has_repeated_point_in(&coords));
    }

    #[test]
    fn test_repeat_in_hole() {
        let hole = ring(&[(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (4.0, 4.0), (2.0, 2.0)]);
        let polygon = Polygon::new(square(), vec![hole]);
        let mut tester = RepeatedPointTester::new();
        assert!(tester.has_repeated_point(&Geometry::Polygon(polygon)));
        assert_eq!(tester.coordinate(), Some(Coordinate::new(4.0, 4.0)));
    }

    #[test]
    fn test_nested_collections() {
        let line = LineString::from_xy(&[(0.0, 0.0), (1.0, 1.0), (1.0, 1.0)]).unwrap();
        let collection = Geometry::GeometryCollection(vec![
            Geometry::MultiPolygon(MultiPolygon::new(vec![Polygon::new(square(), vec![])])),
            Geometry::MultiLineString(vec![line]),
        ]);
        let mut tester = RepeatedPointTester::new();
        assert!(tester.has_repeated_point(&collection));
        assert_eq!(tester.coordinate(), Some(Coordinate::new(1.0, 1.0)));
    }
}
