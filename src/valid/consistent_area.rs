//! Consistency of area labels around graph nodes.

use crate::graph::{GeometryGraph, Label, PlanarGraph};
use crate::predicates::Location;
use crate::primitives::Coordinate;
use num_traits::Float;

/// Checks that every node of an areal graph separates interior from
/// exterior consistently, and that no two rings coincide.
///
/// Around a node the edges must alternate: walking counter-clockwise, the
/// area to the right of each edge must be the area left of the previous one.
/// Any other arrangement means rings cross or a ring is self-tangent there.
#[derive(Debug, Clone)]
pub struct ConsistentAreaTester<'a, F> {
    graph: &'a GeometryGraph<'a, F>,
    nodes: PlanarGraph<F>,
    invalid_point: Option<Coordinate<F>>,
}

impl<'a, F: Float> ConsistentAreaTester<'a, F> {
    /// Builds the node stars of `graph`'s split edges.
    pub fn new(graph: &'a GeometryGraph<'a, F>) -> Self {
        Self {
            graph,
            nodes: PlanarGraph::new(graph.split_edges()),
            invalid_point: None,
        }
    }

    /// The witness of the last failed check.
    pub fn invalid_point(&self) -> Option<Coordinate<F>> {
        self.invalid_point
    }

    /// Tests for proper intersections and inconsistent node labelling.
    pub fn is_node_consistent_area(&mut self) -> bool {
        if let Some(p) = self.graph.proper_intersection() {
            self.invalid_point = Some(p);
            return false;
        }

        for (node, star) in self.nodes.nodes() {
            let labels: Vec<Label> = self
                .nodes
                .bundles(star)
                .iter()
                .map(|bundle| self.bundle_label(bundle))
                .collect();
            if !labels_consistent(&labels) {
                log::trace!(
                    "inconsistent area labels at ({:?}, {:?})",
                    node.x.to_f64(),
                    node.y.to_f64()
                );
                self.invalid_point = Some(node);
                return false;
            }
        }
        true
    }

    /// Tests for coincident edges, which in a consistent area can only come
    /// from identical rings.
    ///
    /// Only meaningful after [`is_node_consistent_area`](Self::is_node_consistent_area)
    /// has passed.
    pub fn has_duplicate_rings(&mut self) -> bool {
        for (_, star) in self.nodes.nodes() {
            if let Some(bundle) = self.nodes.bundles(star).into_iter().find(|b| b.len() > 1) {
                let de = &self.nodes.directed_edges()[bundle[0]];
                let parent = self.nodes.edges()[de.edge()].parent();
                self.invalid_point = self.graph.edges()[parent].coords().first().copied();
                return true;
            }
        }
        false
    }

    /// Merged side labels of a bundle of coincident edge ends.
    fn bundle_label(&self, bundle: &[usize]) -> Label {
        let labels: Vec<Label> = bundle
            .iter()
            .map(|&de| self.nodes.directed_edges()[de].label())
            .collect();
        Label::area(
            merge_locations(labels.iter().map(|l| l.left)),
            merge_locations(labels.iter().map(|l| l.right)),
        )
    }
}

/// Interior wins over exterior.
fn merge_locations(locations: impl Iterator<Item = Location>) -> Location {
    let mut merged = Location::Boundary;
    for loc in locations {
        match loc {
            Location::Interior => return Location::Interior,
            Location::Exterior => merged = Location::Exterior,
            Location::Boundary => {}
        }
    }
    merged
}

/// Checks the alternation rule over a counter-clockwise sorted star.
fn labels_consistent(labels: &[Label]) -> bool {
    let Some(last) = labels.last() else {
        return true;
    };
    let mut current = last.left;
    for label in labels {
        if label.left == label.right || label.right != current {
            return false;
        }
        current = label.left;
    }
    true
}
