//! Region quadtree over envelopes.
//!
//! Items are stored in the smallest node whose quadrant fully contains their
//! envelope; items straddling a split line stay in the parent. Like [`Bvh`],
//! nodes live in a flat arena and items are referred to by caller-chosen
//! indices.
//!
//! [`Bvh`]: super::Bvh

use crate::bounds::Envelope;
use crate::primitives::Coordinate;
use num_traits::Float;

/// Maximum number of items a leaf holds before it is split.
const NODE_CAPACITY: usize = 8;

/// Depth at which nodes stop splitting.
const MAX_DEPTH: usize = 16;

#[derive(Debug, Clone)]
struct QuadNode<F> {
    bounds: Envelope<F>,
    depth: usize,
    /// Positions in `Quadtree::entries`.
    items: Vec<usize>,
    /// Arena indices of the NE, NW, SW, SE children.
    children: Option<[usize; 4]>,
}

impl<F: Float> QuadNode<F> {
    fn new(bounds: Envelope<F>, depth: usize) -> Self {
        Self {
            bounds,
            depth,
            items: Vec::new(),
            children: None,
        }
    }
}

/// A quadtree answering "which items' envelopes intersect this envelope?".
///
/// # Example
///
/// ```
/// use topovalid::bounds::Envelope;
/// use topovalid::spatial::Quadtree;
/// use topovalid::Coordinate;
///
/// let extent = Envelope::new(Coordinate::new(0.0, 0.0), Coordinate::new(100.0, 100.0));
/// let mut tree = Quadtree::new(extent);
/// tree.insert(Envelope::new(Coordinate::new(1.0, 1.0), Coordinate::new(2.0, 2.0)), 0);
/// tree.insert(Envelope::new(Coordinate::new(50.0, 50.0), Coordinate::new(60.0, 60.0)), 1);
///
/// let hits = tree.query(Envelope::new(Coordinate::new(0.0, 0.0), Coordinate::new(5.0, 5.0)));
/// assert_eq!(hits, vec![0]);
/// ```
#[derive(Debug, Clone)]
pub struct Quadtree<F> {
    nodes: Vec<QuadNode<F>>,
    entries: Vec<(Envelope<F>, usize)>,
}

impl<F: Float> Quadtree<F> {
    /// Creates an empty quadtree covering `extent`.
    ///
    /// Items outside the extent are still accepted; they are kept at the root.
    pub fn new(extent: Envelope<F>) -> Self {
        Self {
            nodes: vec![QuadNode::new(extent, 0)],
            entries: Vec::new(),
        }
    }

    /// Returns the number of inserted items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no items were inserted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts an item with the given envelope.
    pub fn insert(&mut self, bounds: Envelope<F>, item: usize) {
        let entry = self.entries.len();
        self.entries.push((bounds, item));

        let mut node_idx = 0;
        while let Some(child) = self.child_containing(node_idx, bounds) {
            node_idx = child;
        }

        self.nodes[node_idx].items.push(entry);

        if self.nodes[node_idx].children.is_none()
            && self.nodes[node_idx].items.len() > NODE_CAPACITY
            && self.nodes[node_idx].depth < MAX_DEPTH
        {
            self.split(node_idx);
        }
    }

    /// Returns the items whose envelopes intersect `query`, in ascending order.
    pub fn query(&self, query: Envelope<F>) -> Vec<usize> {
        let mut results = Vec::new();
        let mut stack = vec![0usize];

        while let Some(node_idx) = stack.pop() {
            let node = &self.nodes[node_idx];

            // The root may hold items outside its own extent
            if node_idx != 0 && !node.bounds.intersects(query) {
                continue;
            }

            results.extend(
                node.items
                    .iter()
                    .map(|&entry| self.entries[entry])
                    .filter(|(bounds, _)| bounds.intersects(query))
                    .map(|(_, item)| item),
            );

            if let Some(children) = node.children {
                stack.extend_from_slice(&children);
            }
        }

        results.sort_unstable();
        results
    }

    /// Returns the child of `node_idx` whose quadrant fully contains `bounds`.
    fn child_containing(&self, node_idx: usize, bounds: Envelope<F>) -> Option<usize> {
        self.nodes[node_idx].children?
            .into_iter()
            .find(|&child| self.nodes[child].bounds.contains_envelope(bounds))
    }

    /// Creates the four children of a leaf and pushes down what fits.
    fn split(&mut self, node_idx: usize) {
        let bounds = self.nodes[node_idx].bounds;
        let depth = self.nodes[node_idx].depth;
        let c = bounds.center();
        let quadrants = [
            Envelope::new(c, bounds.max),
            Envelope::new(Coordinate::new(bounds.min.x, c.y), Coordinate::new(c.x, bounds.max.y)),
            Envelope::new(bounds.min, c),
            Envelope::new(Coordinate::new(c.x, bounds.min.y), Coordinate::new(bounds.max.x, c.y)),
        ];

        let first_child = self.nodes.len();
        for quadrant in quadrants {
            self.nodes.push(QuadNode::new(quadrant, depth + 1));
        }
        let children = [first_child, first_child + 1, first_child + 2, first_child + 3];
        self.nodes[node_idx].children = Some(children);

        let items = std::mem::take(&mut self.nodes[node_idx].items);
        for entry in items {
            let entry_bounds = self.entries[entry].0;
            match self.child_containing(node_idx, entry_bounds) {
                Some(child) => self.nodes[child].items.push(entry),
                None => self.nodes[node_idx].items.push(entry),
            }
        }
    }
}
