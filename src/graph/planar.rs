//! Directed-edge planar graph built from split edges.
//!
//! Each split edge yields a pair of directed edges, stored at `2 * e` (along
//! the edge) and `2 * e + 1` (against it), so the partner of directed edge `d`
//! is `d ^ 1`. Outgoing directed edges are grouped per node into a star sorted
//! counter-clockwise by direction, starting from the positive x axis.

use super::geometry_graph::SplitEdge;
use super::label::Label;
use crate::error::ValidityError;
use crate::predicates::{is_ccw, orientation, Orientation};
use crate::primitives::{CoordKey, Coordinate};
use num_traits::Float;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One direction of a split edge.
#[derive(Debug, Clone)]
pub struct DirectedEdge<F> {
    edge: usize,
    origin: Coordinate<F>,
    direction_pt: Coordinate<F>,
    label: Label,
    in_result: bool,
    visited: bool,
    next: Option<usize>,
    next_min: Option<usize>,
    edge_ring: Option<usize>,
    min_edge_ring: Option<usize>,
}

impl<F: Float> DirectedEdge<F> {
    /// Index of the underlying split edge.
    pub fn edge(&self) -> usize {
        self.edge
    }

    /// The node this edge leaves from.
    pub fn origin(&self) -> Coordinate<F> {
        self.origin
    }

    /// Side labels seen along this direction.
    pub fn label(&self) -> Label {
        self.label
    }

    /// Returns true if the edge bounds the result area.
    pub fn is_in_result(&self) -> bool {
        self.in_result
    }

    /// Returns true once a ring traversal has passed this edge.
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// The next edge of its maximal ring, once linked.
    pub fn next(&self) -> Option<usize> {
        self.next
    }

    /// Compares the directions of two edges leaving the same node.
    ///
    /// Directions are ordered by quadrant, then counter-clockwise within the
    /// quadrant; collinear directions compare equal.
    fn compare_direction(&self, other: &Self) -> Ordering {
        let d0 = self.direction_pt - self.origin;
        let d1 = other.direction_pt - other.origin;
        if d0.x == d1.x && d0.y == d1.y {
            return Ordering::Equal;
        }
        let (q0, q1) = (d0.quadrant(), d1.quadrant());
        if q0 != q1 {
            return q0.cmp(&q1);
        }
        match orientation(other.origin, other.direction_pt, self.direction_pt) {
            Orientation::CounterClockwise => Ordering::Greater,
            Orientation::Clockwise => Ordering::Less,
            Orientation::Collinear => Ordering::Equal,
        }
    }
}

/// A closed cycle of directed edges.
#[derive(Debug, Clone)]
pub struct EdgeRing<F> {
    edges: Vec<usize>,
    coords: Vec<Coordinate<F>>,
    is_hole: bool,
}

impl<F: Float> EdgeRing<F> {
    /// The directed edges in traversal order.
    pub fn edges(&self) -> &[usize] {
        &self.edges
    }

    /// The closed coordinate sequence traced by the ring.
    pub fn coords(&self) -> &[Coordinate<F>] {
        &self.coords
    }

    /// Returns true if the ring runs counter-clockwise.
    pub fn is_hole(&self) -> bool {
        self.is_hole
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkState {
    ScanningForIncoming,
    LinkingToOutgoing,
}

/// Which successor link a ring traversal follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RingKind {
    Maximal,
    Minimal,
}

/// Directed-edge graph with sorted node stars.
#[derive(Debug, Clone)]
pub struct PlanarGraph<F> {
    edges: Vec<SplitEdge<F>>,
    dir_edges: Vec<DirectedEdge<F>>,
    stars: BTreeMap<CoordKey<F>, Vec<usize>>,
}

impl<F: Float> PlanarGraph<F> {
    /// Builds the directed edges and node stars of `edges`.
    pub fn new(edges: Vec<SplitEdge<F>>) -> Self {
        let mut dir_edges = Vec::with_capacity(edges.len() * 2);
        for (i, edge) in edges.iter().enumerate() {
            let pts = edge.coords();
            let n = pts.len();
            dir_edges.push(DirectedEdge::new(i, pts[0], pts[1], edge.label()));
            dir_edges.push(DirectedEdge::new(i, pts[n - 1], pts[n - 2], edge.label().flip()));
        }

        let mut stars: BTreeMap<CoordKey<F>, Vec<usize>> = BTreeMap::new();
        for (i, de) in dir_edges.iter().enumerate() {
            stars.entry(CoordKey(de.origin)).or_default().push(i);
        }
        for star in stars.values_mut() {
            star.sort_by(|&a, &b| dir_edges[a].compare_direction(&dir_edges[b]));
        }

        Self {
            edges,
            dir_edges,
            stars,
        }
    }

    /// The split edges.
    pub fn edges(&self) -> &[SplitEdge<F>] {
        &self.edges
    }

    /// All directed edges.
    pub fn directed_edges(&self) -> &[DirectedEdge<F>] {
        &self.dir_edges
    }

    /// The partner of directed edge `de`.
    #[inline]
    pub fn sym(de: usize) -> usize {
        de ^ 1
    }

    /// The directed edge running along split edge `edge`.
    #[inline]
    pub fn forward(edge: usize) -> usize {
        edge * 2
    }

    /// Iterates the nodes in coordinate order with their sorted stars.
    pub fn nodes(&self) -> impl Iterator<Item = (Coordinate<F>, &[usize])> {
        self.stars.iter().map(|(k, star)| (k.0, star.as_slice()))
    }

    /// Groups a sorted star into runs of edges leaving in the same direction.
    pub fn bundles(&self, star: &[usize]) -> Vec<Vec<usize>> {
        let mut bundles: Vec<Vec<usize>> = Vec::new();
        for &de in star {
            match bundles.last_mut() {
                Some(bundle)
                    if self.dir_edges[bundle[0]].compare_direction(&self.dir_edges[de])
                        == Ordering::Equal =>
                {
                    bundle.push(de)
                }
                _ => bundles.push(vec![de]),
            }
        }
        bundles
    }

    /// Marks whether `de` bounds the result area.
    pub fn set_in_result(&mut self, de: usize, in_result: bool) {
        self.dir_edges[de].in_result = in_result;
    }

    /// Links every incoming result edge to the next outgoing result edge
    /// counter-clockwise around its end node.
    pub fn link_result_directed_edges(&mut self) -> Result<(), ValidityError> {
        let keys: Vec<CoordKey<F>> = self.stars.keys().copied().collect();
        for key in keys {
            self.link_result_at(key)?;
        }
        Ok(())
    }

    fn result_area_edges(&self, key: CoordKey<F>) -> Vec<usize> {
        self.stars
            .get(&key)
            .map(|star| {
                star.iter()
                    .copied()
                    .filter(|&de| {
                        self.dir_edges[de].in_result || self.dir_edges[Self::sym(de)].in_result
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn link_result_at(&mut self, key: CoordKey<F>) -> Result<(), ValidityError> {
        let mut first_out = None;
        let mut incoming = None;
        let mut state = LinkState::ScanningForIncoming;

        for next_out in self.result_area_edges(key) {
            let next_in = Self::sym(next_out);
            if first_out.is_none() && self.dir_edges[next_out].in_result {
                first_out = Some(next_out);
            }
            match state {
                LinkState::ScanningForIncoming => {
                    if self.dir_edges[next_in].in_result {
                        incoming = Some(next_in);
                        state = LinkState::LinkingToOutgoing;
                    }
                }
                LinkState::LinkingToOutgoing => {
                    if self.dir_edges[next_out].in_result {
                        if let Some(inc) = incoming {
                            self.dir_edges[inc].next = Some(next_out);
                        }
                        state = LinkState::ScanningForIncoming;
                    }
                }
            }
        }

        if state == LinkState::LinkingToOutgoing {
            match (incoming, first_out) {
                (Some(inc), Some(out)) => self.dir_edges[inc].next = Some(out),
                _ => return Err(unlinked(key.0)),
            }
        }
        Ok(())
    }

    /// Links the edges of maximal ring `ring` at `key` into minimal rings,
    /// scanning the star clockwise.
    fn link_minimal_at(&mut self, key: CoordKey<F>, ring: usize) -> Result<(), ValidityError> {
        let mut first_out = None;
        let mut incoming = None;
        let mut state = LinkState::ScanningForIncoming;

        for next_out in self.result_area_edges(key).into_iter().rev() {
            let next_in = Self::sym(next_out);
            if first_out.is_none() && self.dir_edges[next_out].edge_ring == Some(ring) {
                first_out = Some(next_out);
            }
            match state {
                LinkState::ScanningForIncoming => {
                    if self.dir_edges[next_in].edge_ring == Some(ring) {
                        incoming = Some(next_in);
                        state = LinkState::LinkingToOutgoing;
                    }
                }
                LinkState::LinkingToOutgoing => {
                    if self.dir_edges[next_out].edge_ring == Some(ring) {
                        if let Some(inc) = incoming {
                            self.dir_edges[inc].next_min = Some(next_out);
                        }
                        state = LinkState::ScanningForIncoming;
                    }
                }
            }
        }

        if state == LinkState::LinkingToOutgoing {
            match (incoming, first_out) {
                (Some(inc), Some(out)) => self.dir_edges[inc].next_min = Some(out),
                _ => return Err(unlinked(key.0)),
            }
        }
        Ok(())
    }

    /// Extracts the minimal edge rings of the linked result edges.
    ///
    /// Each maximal ring (a cycle of `next` links) is relinked at its nodes so
    /// that it splits into rings that pass every node at most once.
    pub fn build_minimal_edge_rings(&mut self) -> Result<Vec<EdgeRing<F>>, ValidityError> {
        let mut maximal_count = 0;
        let mut minimal = Vec::new();

        for start in 0..self.dir_edges.len() {
            let de = &self.dir_edges[start];
            if !de.in_result || de.edge_ring.is_some() {
                continue;
            }

            let ring_id = maximal_count;
            maximal_count += 1;
            let maximal = self.trace_ring(start, ring_id, RingKind::Maximal)?;

            for &de in maximal.edges() {
                let key = CoordKey(self.dir_edges[de].origin);
                self.link_minimal_at(key, ring_id)?;
            }

            for &de in maximal.edges() {
                if self.dir_edges[de].min_edge_ring.is_none() {
                    let id = minimal.len();
                    minimal.push(self.trace_ring(de, id, RingKind::Minimal)?);
                }
            }
        }

        log::trace!(
            "built {} minimal rings from {} maximal rings",
            minimal.len(),
            maximal_count
        );
        Ok(minimal)
    }

    /// Follows successor links from `start` until the ring closes, tagging
    /// each edge with `ring_id`.
    fn trace_ring(
        &mut self,
        start: usize,
        ring_id: usize,
        kind: RingKind,
    ) -> Result<EdgeRing<F>, ValidityError> {
        let mut edges = Vec::new();
        let mut coords: Vec<Coordinate<F>> = Vec::new();
        let mut de = start;

        loop {
            let dir_edge = &mut self.dir_edges[de];
            let (tag, succ) = match kind {
                RingKind::Maximal => (&mut dir_edge.edge_ring, dir_edge.next),
                RingKind::Minimal => (&mut dir_edge.min_edge_ring, dir_edge.next_min),
            };
            if tag.is_some() {
                return Err(ValidityError::OpenEdgeRing);
            }
            *tag = Some(ring_id);
            edges.push(de);

            let pts = self.edges[de / 2].coords();
            let skip = usize::from(!coords.is_empty());
            if de % 2 == 0 {
                coords.extend(pts.iter().skip(skip).copied());
            } else {
                coords.extend(pts.iter().rev().skip(skip).copied());
            }

            de = succ.ok_or(ValidityError::OpenEdgeRing)?;
            if de == start {
                break;
            }
        }

        let is_hole = is_ccw(&coords);
        Ok(EdgeRing {
            edges,
            coords,
            is_hole,
        })
    }

    /// Marks every edge of the `next` cycle through `start` as visited.
    pub fn visit_linked_directed_edges(&mut self, start: usize) -> Result<(), ValidityError> {
        let mut de = start;
        for _ in 0..self.dir_edges.len() {
            self.dir_edges[de].visited = true;
            de = self.dir_edges[de].next.ok_or(ValidityError::OpenEdgeRing)?;
            if de == start {
                return Ok(());
            }
        }
        Err(ValidityError::OpenEdgeRing)
    }
}

impl<F: Float> DirectedEdge<F> {
    fn new(edge: usize, origin: Coordinate<F>, direction_pt: Coordinate<F>, label: Label) -> Self {
        Self {
            edge,
            origin,
            direction_pt,
            label,
            in_result: false,
            visited: false,
            next: None,
            next_min: None,
            edge_ring: None,
            min_edge_ring: None,
        }
    }
}

fn unlinked<F: Float>(node: Coordinate<F>) -> ValidityError {
    ValidityError::UnlinkedDirectedEdge {
        x: node.x.to_f64().unwrap_or(f64::NAN),
        y: node.y.to_f64().unwrap_or(f64::NAN),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{LinearRing, Polygon};
    use crate::graph::GeometryGraph;
    use crate::predicates::Location;

    fn ring(points: &[(f64, f64)]) -> LinearRing<f64> {
        LinearRing::from_xy(points).unwrap()
    }

    fn square() -> LinearRing<f64> {
        ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)])
    }

    fn planar(polygon: &Polygon<f64>) -> PlanarGraph<f64> {
        PlanarGraph::new(GeometryGraph::from_polygon(polygon).split_edges())
    }

    fn mark_interior_right(graph: &mut PlanarGraph<f64>) {
        for de in 0..graph.directed_edges().len() {
            let right = graph.directed_edges()[de].label().right;
            graph.set_in_result(de, right == Location::Interior);
        }
    }

    #[test]
    fn test_star_is_sorted_counter_clockwise() {
        let hole = ring(&[(5.0, 0.0), (6.0, 2.0), (4.0, 2.0), (5.0, 0.0)]);
        let polygon = Polygon::new(square(), vec![hole]);
        let graph = planar(&polygon);

        let (_, star) = graph
            .nodes()
            .find(|(c, _)| *c == Coordinate::new(5.0, 0.0))
            .unwrap();
        let directions: Vec<_> = star
            .iter()
            .map(|&de| {
                let d = &graph.directed_edges()[de];
                d.direction_pt - d.origin
            })
            .map(|v| (v.x, v.y))
            .collect();
        assert_eq!(
            directions,
            vec![(5.0, 0.0), (1.0, 2.0), (-1.0, 2.0), (-5.0, 0.0)]
        );
    }

    #[test]
    fn test_sym_pairs() {
        let polygon = Polygon::new(square(), vec![]);
        let graph = planar(&polygon);

        assert_eq!(graph.directed_edges().len(), 2);
        assert_eq!(PlanarGraph::<f64>::sym(0), 1);
        assert_eq!(PlanarGraph::<f64>::forward(0), 0);
        let (fwd, rev) = (&graph.directed_edges()[0], &graph.directed_edges()[1]);
        assert_eq!(fwd.label(), rev.label().flip());
        assert_eq!(fwd.edge(), rev.edge());
    }

    #[test]
    fn test_bundles_group_equal_directions() {
        let polygon = Polygon::new(square(), vec![square()]);
        let graph = planar(&polygon);

        let (_, star) = graph.nodes().next().unwrap();
        assert_eq!(star.len(), 4);
        let bundles = graph.bundles(star);
        assert_eq!(bundles.len(), 2);
        assert!(bundles.iter().all(|b| b.len() == 2));
    }

    #[test]
    fn test_touching_hole_rings() {
        let hole = ring(&[(5.0, 0.0), (6.0, 2.0), (4.0, 2.0), (5.0, 0.0)]);
        let polygon = Polygon::new(square(), vec![hole]);
        let mut graph = planar(&polygon);

        mark_interior_right(&mut graph);
        graph.link_result_directed_edges().unwrap();
        let rings = graph.build_minimal_edge_rings().unwrap();

        // The hole splits off the shell's maximal ring at the touch point
        assert_eq!(rings.len(), 2);
        assert_eq!(rings.iter().filter(|r| r.is_hole()).count(), 1);
        let shell_ring = rings.iter().find(|r| !r.is_hole()).unwrap();
        assert_eq!(shell_ring.edges().len(), 2);
        assert_eq!(shell_ring.coords().first(), shell_ring.coords().last());

        let start = shell_ring.edges()[0];
        graph.visit_linked_directed_edges(start).unwrap();
        assert!(graph.directed_edges()[start].is_visited());
        assert!(graph.directed_edges()[start].next().is_some());
    }

    #[test]
    fn test_unlinked_edges_fail_visit() {
        let polygon = Polygon::new(square(), vec![]);
        let mut graph = planar(&polygon);

        // Nothing linked yet
        assert_eq!(
            graph.visit_linked_directed_edges(0),
            Err(ValidityError::OpenEdgeRing)
        );
    }
}
