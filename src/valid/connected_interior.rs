//! Connectedness of polygon interiors.

use crate::error::ValidityError;
use crate::graph::{EdgeRing, GeometryGraph, PlanarGraph, SplitEdge};
use crate::predicates::Location;
use crate::primitives::Coordinate;
use num_traits::Float;

/// Detects holes that together cut a polygon's interior into pieces.
///
/// The edges bounding the interior are linked into rings. Starting from each
/// shell, every ring reachable along the shell's boundary is visited. Since
/// holes only touch, an interior in one piece is bounded by a single linked
/// ring per shell; any other clockwise ring bounds a separate piece.
///
/// Assumes the geometry already passed the consistent-area and hole checks.
#[derive(Debug, Clone)]
pub struct ConnectedInteriorTester<'a, F> {
    graph: &'a GeometryGraph<'a, F>,
    disconnected_point: Option<Coordinate<F>>,
}

impl<'a, F: Float> ConnectedInteriorTester<'a, F> {
    /// Creates a tester over `graph`.
    pub fn new(graph: &'a GeometryGraph<'a, F>) -> Self {
        Self {
            graph,
            disconnected_point: None,
        }
    }

    /// Start point of an unvisited interior edge found by the last check.
    pub fn coordinate(&self) -> Option<Coordinate<F>> {
        self.disconnected_point
    }

    /// Tests that every polygon interior is connected.
    pub fn is_interiors_connected(&mut self) -> Result<bool, ValidityError> {
        let split_edges = self.graph.split_edges();
        let shell_starts = self.shell_start_edges(&split_edges);
        let mut planar = PlanarGraph::new(split_edges);

        for de in 0..planar.directed_edges().len() {
            let interior_right = planar.directed_edges()[de].label().right == Location::Interior;
            planar.set_in_result(de, interior_right);
        }

        planar.link_result_directed_edges()?;
        let rings = planar.build_minimal_edge_rings()?;

        for edge in shell_starts {
            let forward = PlanarGraph::<F>::forward(edge);
            let sym = PlanarGraph::<F>::sym(forward);
            let start = if planar.directed_edges()[forward].label().right == Location::Interior {
                forward
            } else if planar.directed_edges()[sym].label().right == Location::Interior {
                sym
            } else {
                return Err(ValidityError::MissingShellEdge);
            };
            planar.visit_linked_directed_edges(start)?;
        }

        self.disconnected_point = unvisited_shell_edge(&planar, &rings);
        Ok(self.disconnected_point.is_none())
    }

    /// Index of the first split edge of every shell.
    fn shell_start_edges(&self, split_edges: &[SplitEdge<F>]) -> Vec<usize> {
        self.graph
            .edges()
            .iter()
            .enumerate()
            .filter(|(_, edge)| !edge.is_hole())
            .filter_map(|(parent, _)| split_edges.iter().position(|s| s.parent() == parent))
            .collect()
    }
}

/// Finds a clockwise ring bounding interior that no shell traversal reached.
fn unvisited_shell_edge<F: Float>(
    planar: &PlanarGraph<F>,
    rings: &[EdgeRing<F>],
) -> Option<Coordinate<F>> {
    let dir_edges = planar.directed_edges();
    rings
        .iter()
        .filter(|ring| !ring.is_hole())
        .filter(|ring| {
            ring.edges()
                .first()
                .map_or(false, |&de| dir_edges[de].label().right == Location::Interior)
        })
        .flat_map(|ring| ring.edges().iter())
        .find(|&&de| !dir_edges[de].is_visited())
        .map(|&de| dir_edges[de].origin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{LinearRing, MultiPolygon, Polygon};

    fn ring(points: &[(f64, f64)]) -> LinearRing<f64> {
        LinearRing::from_xy(points).unwrap()
    }

    fn square(x: f64, y: f64, size: f64) -> LinearRing<f64> {
        ring(&[
            (x, y),
            (x + size, y),
            (x + size, y + size),
            (x, y + size),
            (x, y),
        ])
    }

    fn connected(polygon: &Polygon<f64>) -> (bool, Option<Coordinate<f64>>) {
        let graph = GeometryGraph::from_polygon(polygon);
        let mut tester = ConnectedInteriorTester::new(&graph);
        let result = tester.is_interiors_connected().unwrap();
        (result, tester.coordinate())
    }

    #[test]
    fn test_polygon_without_holes() {
        let polygon = Polygon::new(square(0.0, 0.0, 10.0), vec![]);
        assert_eq!(connected(&polygon), (true, None));
    }

    #[test]
    fn test_isolated_hole() {
        let polygon = Polygon::new(square(0.0, 0.0, 10.0), vec![square(2.0, 2.0, 2.0)]);
        assert_eq!(connected(&polygon), (true, None));
    }

    #[test]
    fn test_hole_touching_shell_once() {
        let hole = ring(&[(5.0, 0.0), (6.0, 2.0), (4.0, 2.0), (5.0, 0.0)]);
        let polygon = Polygon::new(square(0.0, 0.0, 10.0), vec![hole]);
        assert_eq!(connected(&polygon), (true, None));
    }

    #[test]
    fn test_chain_of_holes_cuts_interior() {
        let lower = ring(&[(5.0, 0.0), (6.0, 2.5), (5.0, 5.0), (4.0, 2.5), (5.0, 0.0)]);
        let upper = ring(&[(5.0, 5.0), (6.0, 7.5), (5.0, 10.0), (4.0, 7.5), (5.0, 5.0)]);
        let polygon = Polygon::new(square(0.0, 0.0, 10.0), vec![lower, upper]);

        assert_eq!(connected(&polygon), (false, Some(Coordinate::new(5.0, 10.0))));
    }

    #[test]
    fn test_chain_of_holes_reversed_rings() {
        let lower = ring(&[(5.0, 0.0), (4.0, 2.5), (5.0, 5.0), (6.0, 2.5), (5.0, 0.0)]);
        let upper = ring(&[(5.0, 5.0), (4.0, 7.5), (5.0, 10.0), (6.0, 7.5), (5.0, 5.0)]);
        let polygon = Polygon::new(square(0.0, 0.0, 10.0).reversed(), vec![lower, upper]);

        let (is_connected, witness) = connected(&polygon);
        assert!(!is_connected);
        assert!(witness.is_some());
    }

    #[test]
    fn test_each_multipolygon_shell_is_visited() {
        let multi = MultiPolygon::new(vec![
            Polygon::new(square(0.0, 0.0, 4.0), vec![]),
            Polygon::new(square(10.0, 0.0, 4.0), vec![square(11.0, 1.0, 1.0)]),
        ]);
        let graph = GeometryGraph::from_multi_polygon(&multi);
        let mut tester = ConnectedInteriorTester::new(&graph);

        assert_eq!(tester.is_interiors_connected(), Ok(true));
        assert!(tester.coordinate().is_none());
    }
}
