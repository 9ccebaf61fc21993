//! Tests whether any ring of a set lies inside another.
//!
//! All strategies confirm a candidate pair the same way and differ only in
//! how candidate pairs are generated:
//!
//! - [`NestingStrategy::Naive`] tries every ordered pair.
//! - [`NestingStrategy::SweepLine`] sweeps the rings' x-extents and tries
//!   only pairs whose extents overlap.
//! - [`NestingStrategy::Quadtree`] indexes ring envelopes in a quadtree and
//!   queries it once per ring.
//!
//! # Example
//!
//! ```
//! use topovalid::geometry::{LinearRing, Polygon};
//! use topovalid::graph::GeometryGraph;
//! use topovalid::valid::{NestedRingTester, NestingStrategy};
//! use topovalid::Coordinate;
//!
//! let square = |min: f64, max: f64| {
//!     LinearRing::from_xy(&[(min, min), (max, min), (max, max), (min, max), (min, min)]).unwrap()
//! };
//! let polygon = Polygon::new(square(0.0, 10.0), vec![square(1.0, 9.0), square(2.0, 8.0)]);
//! let graph = GeometryGraph::from_polygon(&polygon);
//!
//! let mut tester = NestedRingTester::new(&graph, NestingStrategy::SweepLine);
//! for hole in polygon.holes() {
//!     tester.add(hole);
//! }
//! assert_eq!(tester.is_non_nested(), Ok(false));
//! assert_eq!(tester.nested_point(), Some(Coordinate::new(2.0, 2.0)));
//! ```

use crate::bounds::Envelope;
use crate::error::ValidityError;
use crate::geometry::{LinearRing, Polygon};
use crate::graph::GeometryGraph;
use crate::predicates::is_point_in_ring;
use crate::primitives::Coordinate;
use crate::spatial::{Quadtree, SweepLineIndex};
use num_traits::Float;

/// Candidate-pair generation used by [`NestedRingTester`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NestingStrategy {
    /// Every ordered pair of rings.
    Naive,
    /// Pairs whose x-extents overlap, found with a sweepline.
    SweepLine,
    /// Pairs whose envelopes intersect, found with a quadtree.
    Quadtree,
}

impl NestingStrategy {
    /// Largest ring count for which the naive strategy is chosen by default.
    pub const DEFAULT_NAIVE_RING_LIMIT: usize = 16;

    /// Picks a strategy for `ring_count` rings using the default limit.
    pub fn for_ring_count(ring_count: usize) -> Self {
        Self::for_ring_count_with_limit(ring_count, Self::DEFAULT_NAIVE_RING_LIMIT)
    }

    /// Picks [`Naive`](Self::Naive) up to `naive_ring_limit` rings and
    /// [`Quadtree`](Self::Quadtree) beyond.
    pub fn for_ring_count_with_limit(ring_count: usize, naive_ring_limit: usize) -> Self {
        if ring_count <= naive_ring_limit {
            NestingStrategy::Naive
        } else {
            NestingStrategy::Quadtree
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Participant<'a, F> {
    ring: &'a LinearRing<F>,
    envelope: Envelope<F>,
    /// Holes of the participant's polygon, for shells.
    holes: Option<&'a [LinearRing<F>]>,
}

/// Checks a set of rings for mutual nesting.
#[derive(Debug, Clone)]
pub struct NestedRingTester<'a, F> {
    graph: &'a GeometryGraph<'a, F>,
    strategy: NestingStrategy,
    rings: Vec<Participant<'a, F>>,
    nested_point: Option<Coordinate<F>>,
}

impl<'a, F: Float> NestedRingTester<'a, F> {
    /// Creates an empty tester over the nodes of `graph`.
    pub fn new(graph: &'a GeometryGraph<'a, F>, strategy: NestingStrategy) -> Self {
        Self {
            graph,
            strategy,
            rings: Vec::new(),
            nested_point: None,
        }
    }

    /// The strategy this tester runs.
    pub fn strategy(&self) -> NestingStrategy {
        self.strategy
    }

    /// Number of participating rings.
    pub fn len(&self) -> usize {
        self.rings.len()
    }

    /// Returns true if no ring has been added.
    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    /// Adds a ring. Empty rings are ignored.
    pub fn add(&mut self, ring: &'a LinearRing<F>) {
        if let Some(envelope) = ring.envelope() {
            self.rings.push(Participant {
                ring,
                envelope,
                holes: None,
            });
        }
    }

    /// Adds the shell of `polygon`.
    ///
    /// Another shell lying inside this one is accepted when it also lies
    /// inside one of `polygon`'s holes.
    pub fn add_shell(&mut self, polygon: &'a Polygon<F>) {
        if let Some(envelope) = polygon.shell().envelope() {
            self.rings.push(Participant {
                ring: polygon.shell(),
                envelope,
                holes: Some(polygon.holes()),
            });
        }
    }

    /// A point of the inner ring found inside another ring by the last
    /// [`is_non_nested`](Self::is_non_nested) call.
    pub fn nested_point(&self) -> Option<Coordinate<F>> {
        self.nested_point
    }

    /// Tests that no ring lies inside another.
    ///
    /// Stops at the first nested pair. Fails if a ring of a candidate pair
    /// has no point off the other ring's boundary.
    pub fn is_non_nested(&mut self) -> Result<bool, ValidityError> {
        log::trace!(
            "nesting test over {} rings with {:?} strategy",
            self.rings.len(),
            self.strategy
        );
        self.nested_point = match self.strategy {
            NestingStrategy::Naive => self.find_nested_naive()?,
            NestingStrategy::SweepLine => self.find_nested_sweepline()?,
            NestingStrategy::Quadtree => self.find_nested_quadtree()?,
        };
        Ok(self.nested_point.is_none())
    }

    fn find_nested_naive(&self) -> Result<Option<Coordinate<F>>, ValidityError> {
        for inner in 0..self.rings.len() {
            for search in 0..self.rings.len() {
                if let Some(p) = self.nested_in(inner, search)? {
                    return Ok(Some(p));
                }
            }
        }
        Ok(None)
    }

    fn find_nested_sweepline(&self) -> Result<Option<Coordinate<F>>, ValidityError> {
        let mut index = SweepLineIndex::new();
        for (i, r) in self.rings.iter().enumerate() {
            index.add(r.envelope.min.x, r.envelope.max.x, i);
        }

        let mut outcome = Ok(None);
        index.for_each_overlap(|a, b| {
            // Overlap is symmetric, nesting is not
            outcome = match self.nested_in(a, b) {
                Ok(None) => self.nested_in(b, a),
                other => other,
            };
            matches!(outcome, Ok(None))
        });
        outcome
    }

    fn find_nested_quadtree(&self) -> Result<Option<Coordinate<F>>, ValidityError> {
        let Some(extent) = self
            .rings
            .iter()
            .map(|r| r.envelope)
            .reduce(|a, b| a.expand_to_include_envelope(b))
        else {
            return Ok(None);
        };

        let mut tree = Quadtree::new(extent);
        for (i, r) in self.rings.iter().enumerate() {
            tree.insert(r.envelope, i);
        }

        for (inner, r) in self.rings.iter().enumerate() {
            for search in tree.query(r.envelope) {
                if let Some(p) = self.nested_in(inner, search)? {
                    return Ok(Some(p));
                }
            }
        }
        Ok(None)
    }

    /// Confirms whether ring `inner` lies inside ring `search`, returning a
    /// witness point of `inner` if it does.
    fn nested_in(
        &self,
        inner: usize,
        search: usize,
    ) -> Result<Option<Coordinate<F>>, ValidityError> {
        let (a, b) = (&self.rings[inner], &self.rings[search]);
        if std::ptr::eq(a.ring, b.ring) || !a.envelope.intersects(b.envelope) {
            return Ok(None);
        }

        let p = find_point_not_node(self.graph, a.ring, b.ring)?;
        if !is_point_in_ring(p, b.ring.coords()) {
            return Ok(None);
        }

        match b.holes {
            Some(holes) if !holes.is_empty() => {
                // Nested in the shell is fine if nested in one of its holes
                let mut witness = p;
                for hole in holes {
                    match self.shell_outside_hole(a.ring, hole)? {
                        Some(bad) => witness = bad,
                        None => return Ok(None),
                    }
                }
                Ok(Some(witness))
            }
            _ => Ok(Some(p)),
        }
    }

    /// Returns a point showing that `shell` is not inside `hole`, or `None`
    /// if it is.
    fn shell_outside_hole(
        &self,
        shell: &LinearRing<F>,
        hole: &LinearRing<F>,
    ) -> Result<Option<Coordinate<F>>, ValidityError> {
        if let Ok(shell_pt) = find_point_not_node(self.graph, shell, hole) {
            if !is_point_in_ring(shell_pt, hole.coords()) {
                return Ok(Some(shell_pt));
            }
        }
        match find_point_not_node(self.graph, hole, shell) {
            Ok(hole_pt) if is_point_in_ring(hole_pt, shell.coords()) => Ok(Some(hole_pt)),
            Ok(_) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

/// Finds a vertex of `test` that is not a node of `search` in `graph`.
///
/// Rings that passed the consistent-area check always have one, so running
/// out of vertices means the graph is broken.
pub(crate) fn find_point_not_node<F: Float>(
    graph: &GeometryGraph<'_, F>,
    test: &LinearRing<F>,
    search: &LinearRing<F>,
) -> Result<Coordinate<F>, ValidityError> {
    let nodes = graph
        .find_edge(search)
        .map(|i| graph.edges()[i].intersections());

    test.coords()
        .iter()
        .copied()
        .find(|&p| nodes.map_or(true, |list| !list.is_intersection(p)))
        .ok_or(ValidityError::NoNonNodePoint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::MultiPolygon;

    const STRATEGIES: [NestingStrategy; 3] = [
        NestingStrategy::Naive,
        NestingStrategy::SweepLine,
        NestingStrategy::Quadtree,
    ];

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

    fn holes_non_nested(polygon: &Polygon<f64>, strategy: NestingStrategy) -> Result<bool, ValidityError> {
        let graph = GeometryGraph::from_polygon(polygon);
        let mut tester = NestedRingTester::new(&graph, strategy);
        for hole in polygon.holes() {
            tester.add(hole);
        }
        tester.is_non_nested()
    }

    #[test]
    fn test_strategy_selection() {
        assert_eq!(NestingStrategy::for_ring_count(0), NestingStrategy::Naive);
        assert_eq!(
            NestingStrategy::for_ring_count(NestingStrategy::DEFAULT_NAIVE_RING_LIMIT),
            NestingStrategy::Naive
        );
        assert_eq!(
            NestingStrategy::for_ring_count(NestingStrategy::DEFAULT_NAIVE_RING_LIMIT + 1),
            NestingStrategy::Quadtree
        );
        assert_eq!(
            NestingStrategy::for_ring_count_with_limit(3, 2),
            NestingStrategy::Quadtree
        );
    }

    #[test]
    fn test_nested_holes_all_strategies() {
        let polygon = Polygon::new(
            square(0.0, 0.0, 10.0),
            vec![square(1.0, 1.0, 8.0), square(2.0, 2.0, 6.0)],
        );
        for strategy in STRATEGIES {
            let graph = GeometryGraph::from_polygon(&polygon);
            let mut tester = NestedRingTester::new(&graph, strategy);
            for hole in polygon.holes() {
                tester.add(hole);
            }
            assert_eq!(tester.strategy(), strategy);
            assert_eq!(tester.len(), 2);
            assert_eq!(tester.is_non_nested(), Ok(false), "{:?}", strategy);
            assert_eq!(tester.nested_point(), Some(Coordinate::new(2.0, 2.0)));
        }
    }

    #[test]
    fn test_disjoint_holes_all_strategies() {
        let polygon = Polygon::new(
            square(0.0, 0.0, 10.0),
            vec![
                square(1.0, 1.0, 2.0),
                square(5.0, 1.0, 2.0),
                square(1.0, 5.0, 2.0),
                square(5.0, 5.0, 2.0),
            ],
        );
        for strategy in STRATEGIES {
            assert_eq!(holes_non_nested(&polygon, strategy), Ok(true), "{:?}", strategy);
        }
    }

    #[test]
    fn test_touching_holes_are_not_nested() {
        // Holes share the vertex (5, 5) and nothing else
        let polygon = Polygon::new(
            square(0.0, 0.0, 10.0),
            vec![square(3.0, 3.0, 2.0), square(5.0, 5.0, 2.0)],
        );
        for strategy in STRATEGIES {
            assert_eq!(holes_non_nested(&polygon, strategy), Ok(true), "{:?}", strategy);
        }
    }

    #[test]
    fn test_inner_touching_at_every_vertex_is_fatal() {
        // Every vertex of the diamond lies on the square's boundary
        let polygon = Polygon::new(
            square(-10.0, -10.0, 30.0),
            vec![
                square(0.0, 0.0, 10.0),
                ring(&[(5.0, 0.0), (10.0, 5.0), (5.0, 10.0), (0.0, 5.0), (5.0, 0.0)]),
            ],
        );
        for strategy in STRATEGIES {
            let graph = GeometryGraph::from_polygon(&polygon);
            let mut tester = NestedRingTester::new(&graph, strategy);
            for hole in polygon.holes() {
                tester.add(hole);
            }
            assert_eq!(
                tester.is_non_nested(),
                Err(ValidityError::NoNonNodePoint),
                "{:?}",
                strategy
            );
            assert!(tester.nested_point().is_none());
        }
    }

    #[test]
    fn test_identical_rings_are_fatal() {
        let a = square(0.0, 0.0, 4.0);
        let b = square(0.0, 0.0, 4.0);
        let polygon = Polygon::new(square(-1.0, -1.0, 10.0), vec![a, b]);
        let graph = GeometryGraph::from_polygon(&polygon);

        let mut tester = NestedRingTester::new(&graph, NestingStrategy::Naive);
        for hole in polygon.holes() {
            tester.add(hole);
        }
        assert_eq!(tester.is_non_nested(), Err(ValidityError::NoNonNodePoint));
    }

    #[test]
    fn test_empty_rings_ignored() {
        let empty = LinearRing::new(vec![]).unwrap();
        let polygon = Polygon::new(square(0.0, 0.0, 10.0), vec![empty]);
        let graph = GeometryGraph::from_polygon(&polygon);

        let mut tester = NestedRingTester::new(&graph, NestingStrategy::Quadtree);
        tester.add(&polygon.holes()[0]);
        assert!(tester.is_empty());
        assert_eq!(tester.is_non_nested(), Ok(true));
        assert!(tester.nested_point().is_none());
    }

    fn shells_non_nested(multi: &MultiPolygon<f64>, strategy: NestingStrategy) -> Option<Coordinate<f64>> {
        let graph = GeometryGraph::from_multi_polygon(multi);
        let mut tester = NestedRingTester::new(&graph, strategy);
        for polygon in multi.polygons() {
            tester.add_shell(polygon);
        }
        match tester.is_non_nested() {
            Ok(true) => None,
            Ok(false) => tester.nested_point(),
            Err(err) => panic!("unexpected failure: {}", err),
        }
    }

    #[test]
    fn test_shell_inside_hole_is_legal() {
        let multi = MultiPolygon::new(vec![
            Polygon::new(square(0.0, 0.0, 10.0), vec![square(2.0, 2.0, 6.0)]),
            Polygon::new(square(3.0, 3.0, 4.0), vec![]),
        ]);
        for strategy in STRATEGIES {
            assert_eq!(shells_non_nested(&multi, strategy), None, "{:?}", strategy);
        }
    }

    #[test]
    fn test_shell_inside_shell_is_nested() {
        let multi = MultiPolygon::new(vec![
            Polygon::new(square(0.0, 0.0, 10.0), vec![]),
            Polygon::new(square(3.0, 3.0, 4.0), vec![]),
        ]);
        for strategy in STRATEGIES {
            assert_eq!(
                shells_non_nested(&multi, strategy),
                Some(Coordinate::new(3.0, 3.0)),
                "{:?}",
                strategy
            );
        }
    }

    #[test]
    fn test_shell_beside_hole_is_nested() {
        // The second shell is inside the first but not inside its hole
        let multi = MultiPolygon::new(vec![
            Polygon::new(square(0.0, 0.0, 10.0), vec![square(1.0, 1.0, 2.0)]),
            Polygon::new(square(5.0, 5.0, 3.0), vec![]),
        ]);
        for strategy in STRATEGIES {
            assert_eq!(
                shells_non_nested(&multi, strategy),
                Some(Coordinate::new(5.0, 5.0)),
                "{:?}",
                strategy
            );
        }
    }
}
