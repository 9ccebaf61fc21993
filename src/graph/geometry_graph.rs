//! Noded ring edges of an areal geometry.

use super::label::Label;
use super::noding::{self_node, EdgeIntersectionList};
use crate::geometry::{remove_repeated_points, LinearRing, MultiPolygon, Polygon};
use crate::predicates::is_ccw;
use crate::primitives::Coordinate;
use num_traits::Float;

/// One ring of the geometry, noded against all other rings.
#[derive(Debug, Clone)]
pub struct RingEdge<'a, F> {
    ring: &'a LinearRing<F>,
    pts: Vec<Coordinate<F>>,
    label: Label,
    polygon: usize,
    is_hole: bool,
    intersections: EdgeIntersectionList<F>,
}

impl<'a, F: Float> RingEdge<'a, F> {
    /// The ring this edge was built from.
    pub fn ring(&self) -> &'a LinearRing<F> {
        self.ring
    }

    /// The ring's coordinates with consecutive duplicates removed.
    pub fn coords(&self) -> &[Coordinate<F>] {
        &self.pts
    }

    /// Side labels in the ring's stored direction.
    pub fn label(&self) -> Label {
        self.label
    }

    /// Index of the owning polygon within the geometry.
    pub fn polygon(&self) -> usize {
        self.polygon
    }

    /// Returns true for polygon holes.
    pub fn is_hole(&self) -> bool {
        self.is_hole
    }

    /// The nodes of this edge, including both end points.
    pub fn intersections(&self) -> &EdgeIntersectionList<F> {
        &self.intersections
    }
}

/// A piece of a ring edge between two consecutive nodes.
#[derive(Debug, Clone)]
pub struct SplitEdge<F> {
    pts: Vec<Coordinate<F>>,
    label: Label,
    parent: usize,
}

impl<F: Float> SplitEdge<F> {
    /// The coordinates from start node to end node.
    pub fn coords(&self) -> &[Coordinate<F>] {
        &self.pts
    }

    /// Side labels in the edge's direction.
    pub fn label(&self) -> Label {
        self.label
    }

    /// Index of the ring edge this piece was cut from.
    pub fn parent(&self) -> usize {
        self.parent
    }
}

/// The noded rings of a linear ring, polygon or multipolygon.
///
/// Rings are borrowed from the geometry, which stays the owner of all
/// coordinate data; edges refer back to their ring by identity. Empty rings
/// take no part in the graph.
///
/// # Example
///
/// ```
/// use topovalid::geometry::{LinearRing, Polygon};
/// use topovalid::graph::GeometryGraph;
/// use topovalid::Coordinate;
///
/// let shell = LinearRing::from_xy(&[
///     (0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0),
/// ]).unwrap();
/// let hole = LinearRing::from_xy(&[
///     (5.0, 0.0), (6.0, 2.0), (4.0, 2.0), (5.0, 0.0),
/// ]).unwrap();
/// let polygon = Polygon::new(shell, vec![hole]);
///
/// let graph = GeometryGraph::from_polygon(&polygon);
/// assert_eq!(graph.edges().len(), 2);
/// assert!(graph.is_node_of(polygon.shell(), Coordinate::new(5.0, 0.0)));
/// assert!(graph.proper_intersection().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct GeometryGraph<'a, F> {
    edges: Vec<RingEdge<'a, F>>,
    proper_intersection: Option<Coordinate<F>>,
}

impl<'a, F: Float> GeometryGraph<'a, F> {
    /// Builds the graph of a single linear ring.
    pub fn from_ring(ring: &'a LinearRing<F>) -> Self {
        Self::build(vec![(ring, 0, false)])
    }

    /// Builds the graph of a polygon's shell and holes.
    pub fn from_polygon(polygon: &'a Polygon<F>) -> Self {
        Self::from_polygons(std::slice::from_ref(polygon))
    }

    /// Builds one graph over the rings of all member polygons.
    pub fn from_multi_polygon(multi: &'a MultiPolygon<F>) -> Self {
        Self::from_polygons(multi.polygons())
    }

    /// Builds one graph over the rings of `polygons`, each ring remembering
    /// the index of its polygon.
    pub fn from_polygons(polygons: &'a [Polygon<F>]) -> Self {
        let rings = polygons
            .iter()
            .enumerate()
            .flat_map(|(i, polygon)| polygon_rings(polygon, i))
            .collect();
        Self::build(rings)
    }

    fn build(rings: Vec<(&'a LinearRing<F>, usize, bool)>) -> Self {
        let rings: Vec<_> = rings.into_iter().filter(|(r, _, _)| !r.is_empty()).collect();
        let pts: Vec<Vec<Coordinate<F>>> = rings
            .iter()
            .map(|(r, _, _)| remove_repeated_points(r.coords()))
            .collect();

        let noding = self_node(&pts);
        log::trace!(
            "noded {} ring edges, proper intersection: {}",
            pts.len(),
            noding.proper_intersection.is_some()
        );

        let edges = rings
            .into_iter()
            .zip(pts)
            .zip(noding.lists)
            .map(|(((ring, polygon, is_hole), pts), intersections)| RingEdge {
                ring,
                label: Label::for_ring(is_hole, is_ccw(&pts)),
                pts,
                polygon,
                is_hole,
                intersections,
            })
            .collect();

        Self {
            edges,
            proper_intersection: noding.proper_intersection,
        }
    }

    /// The ring edges, in geometry order (shell before holes).
    pub fn edges(&self) -> &[RingEdge<'a, F>] {
        &self.edges
    }

    /// Finds the edge built from `ring`, compared by identity.
    pub fn find_edge(&self, ring: &LinearRing<F>) -> Option<usize> {
        self.edges.iter().position(|e| std::ptr::eq(e.ring, ring))
    }

    /// Tests whether `p` is a node of the edge built from `ring`.
    pub fn is_node_of(&self, ring: &LinearRing<F>, p: Coordinate<F>) -> bool {
        self.find_edge(ring)
            .map_or(false, |i| self.edges[i].intersections.is_intersection(p))
    }

    /// The first proper intersection found while noding, if any.
    pub fn proper_intersection(&self) -> Option<Coordinate<F>> {
        self.proper_intersection
    }

    /// Cuts every ring edge at its nodes.
    ///
    /// Pieces of one ring are emitted in ring order, starting at the ring's
    /// first vertex.
    pub fn split_edges(&self) -> Vec<SplitEdge<F>> {
        let mut result = Vec::new();
        for (parent, edge) in self.edges.iter().enumerate() {
            let nodes: Vec<_> = edge.intersections.iter().collect();
            for pair in nodes.windows(2) {
                let (ei0, ei1) = (pair[0], pair[1]);

                let mut pts = Vec::with_capacity(ei1.segment_index - ei0.segment_index + 2);
                pts.push(ei0.coord);
                pts.extend_from_slice(&edge.pts[ei0.segment_index + 1..=ei1.segment_index]);

                // The end node is a vertex already pushed unless it lies inside a segment
                let last_seg_start = edge.pts[ei1.segment_index];
                if ei1.dist > F::zero() || ei1.coord != last_seg_start {
                    pts.push(ei1.coord);
                }

                result.push(SplitEdge {
                    pts,
                    label: edge.label,
                    parent,
                });
            }
        }
        result
    }
}

fn polygon_rings<F: Float>(
    polygon: &Polygon<F>,
    index: usize,
) -> impl Iterator<Item = (&LinearRing<F>, usize, bool)> {
    std::iter::once((polygon.shell(), index, false))
        .chain(polygon.holes().iter().map(move |h| (h, index, true)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicates::Location;

    fn ring(points: &[(f64, f64)]) -> LinearRing<f64> {
        LinearRing::from_xy(points).unwrap()
    }

    fn square(min: f64, max: f64) -> LinearRing<f64> {
        ring(&[(min, min), (max, min), (max, max), (min, max), (min, min)])
    }

    #[test]
    fn test_find_edge_by_identity() {
        let polygon = Polygon::new(square(0.0, 10.0), vec![square(2.0, 4.0)]);
        let graph = GeometryGraph::from_polygon(&polygon);

        assert_eq!(graph.find_edge(polygon.shell()), Some(0));
        assert_eq!(graph.find_edge(&polygon.holes()[0]), Some(1));

        // An equal ring that is not part of the geometry is not found
        let copy = polygon.shell().clone();
        assert_eq!(graph.find_edge(&copy), None);
    }

    #[test]
    fn test_empty_rings_are_skipped() {
        let empty = LinearRing::new(vec![]).unwrap();
        let polygon = Polygon::new(square(0.0, 10.0), vec![empty]);
        let graph = GeometryGraph::from_polygon(&polygon);

        assert_eq!(graph.edges().len(), 1);
        assert_eq!(graph.find_edge(&polygon.holes()[0]), None);
        assert!(!graph.is_node_of(&polygon.holes()[0], Coordinate::new(0.0, 0.0)));
    }

    #[test]
    fn test_ring_labels() {
        let polygon = Polygon::new(square(0.0, 10.0), vec![square(2.0, 4.0)]);
        let graph = GeometryGraph::from_polygon(&polygon);

        // Both rings are counter-clockwise
        let shell = graph.edges()[0].label();
        assert_eq!((shell.left, shell.right), (Location::Interior, Location::Exterior));
        let hole = graph.edges()[1].label();
        assert_eq!((hole.left, hole.right), (Location::Exterior, Location::Interior));
        assert!(graph.edges()[1].is_hole());
    }

    #[test]
    fn test_split_at_touch_point() {
        let hole = ring(&[(5.0, 0.0), (6.0, 2.0), (4.0, 2.0), (5.0, 0.0)]);
        let polygon = Polygon::new(square(0.0, 10.0), vec![hole]);
        let graph = GeometryGraph::from_polygon(&polygon);
        let splits = graph.split_edges();

        // Shell cut in two at (5, 0); the hole touches at its own start vertex
        assert_eq!(splits.len(), 3);
        assert_eq!(
            splits[0].coords(),
            &[Coordinate::new(0.0, 0.0), Coordinate::new(5.0, 0.0)]
        );
        assert_eq!(splits[1].coords().first(), Some(&Coordinate::new(5.0, 0.0)));
        assert_eq!(splits[1].coords().last(), Some(&Coordinate::new(0.0, 0.0)));
        assert_eq!(splits[1].coords().len(), 5);
        assert_eq!(splits[2].parent(), 1);
        assert_eq!(splits[2].coords().len(), 4);
    }

    #[test]
    fn test_split_ignores_repeated_points() {
        let shell = ring(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (0.0, 10.0),
            (0.0, 0.0),
        ]);
        let graph = GeometryGraph::from_ring(&shell);
        let splits = graph.split_edges();

        assert_eq!(splits.len(), 1);
        assert_eq!(splits[0].coords().len(), 5);
    }

    #[test]
    fn test_multi_polygon_owners() {
        let multi = MultiPolygon::new(vec![
            Polygon::new(square(0.0, 1.0), vec![]),
            Polygon::new(square(5.0, 8.0), vec![square(6.0, 7.0)]),
        ]);
        let graph = GeometryGraph::from_multi_polygon(&multi);

        let owners: Vec<_> = graph.edges().iter().map(|e| (e.polygon(), e.is_hole())).collect();
        assert_eq!(owners, vec![(0, false), (1, false), (1, true)]);
    }
}
