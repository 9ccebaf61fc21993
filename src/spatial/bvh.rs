//! Bounding volume hierarchy over envelopes.
//!
//! Built once over a fixed slice of items and queried many times; the
//! geometry graph uses it to find candidate segment pairs while noding.

use crate::bounds::Envelope;
use num_traits::Float;
use std::cmp::Ordering;

/// Anything with an envelope that can be stored in a [`Bvh`].
pub trait Bounded<F: Float> {
    /// Returns the envelope of this item.
    fn bounds(&self) -> Envelope<F>;
}

impl<F: Float> Bounded<F> for Envelope<F> {
    fn bounds(&self) -> Envelope<F> {
        *self
    }
}

#[derive(Debug, Clone)]
enum Node<F> {
    /// A run of `order[first..first + count]`.
    Leaf {
        bounds: Envelope<F>,
        first: usize,
        count: usize,
    },
    Branch {
        bounds: Envelope<F>,
        children: [usize; 2],
    },
}

impl<F: Copy> Node<F> {
    fn bounds(&self) -> Envelope<F> {
        match self {
            Node::Leaf { bounds, .. } | Node::Branch { bounds, .. } => *bounds,
        }
    }
}

/// A bounding volume hierarchy storing item indices.
///
/// Items stay in the caller's slice; the tree keeps their envelopes and a
/// permutation of their indices.
///
/// # Example
///
/// ```
/// use topovalid::bounds::Envelope;
/// use topovalid::spatial::Bvh;
/// use topovalid::Coordinate;
///
/// let boxes: Vec<Envelope<f64>> = vec![
///     Envelope::new(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)),
///     Envelope::new(Coordinate::new(5.0, 5.0), Coordinate::new(6.0, 6.0)),
/// ];
///
/// let bvh = Bvh::build(&boxes, 1);
/// let query = Envelope::new(Coordinate::new(0.5, 0.5), Coordinate::new(2.0, 2.0));
/// assert_eq!(bvh.query(query), vec![0]);
/// ```
#[derive(Debug, Clone)]
pub struct Bvh<F> {
    nodes: Vec<Node<F>>,
    order: Vec<usize>,
    envelopes: Vec<Envelope<F>>,
}

impl<F: Float> Bvh<F> {
    /// Builds the hierarchy, splitting nodes holding more than `leaf_size`
    /// items at the median along their longer side.
    pub fn build<T: Bounded<F>>(items: &[T], leaf_size: usize) -> Self {
        let envelopes: Vec<Envelope<F>> = items.iter().map(Bounded::bounds).collect();
        let mut order: Vec<usize> = (0..items.len()).collect();
        let mut nodes = Vec::new();

        if !envelopes.is_empty() {
            split(&envelopes, &mut order, 0, leaf_size.max(1), &mut nodes);
        }

        Self {
            nodes,
            order,
            envelopes,
        }
    }

    /// Returns true if no items were indexed.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the number of indexed items.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Indices of the items whose envelope intersects `query`, ascending.
    ///
    /// Touching envelopes count as intersecting.
    pub fn query(&self, query: Envelope<F>) -> Vec<usize> {
        let mut hits = Vec::new();
        let mut stack = Vec::new();
        if !self.nodes.is_empty() {
            stack.push(0);
        }

        while let Some(n) = stack.pop() {
            let node = &self.nodes[n];
            if !node.bounds().intersects(query) {
                continue;
            }
            match *node {
                Node::Leaf { first, count, .. } => hits.extend(
                    self.order[first..first + count]
                        .iter()
                        .copied()
                        .filter(|&i| self.envelopes[i].intersects(query)),
                ),
                Node::Branch { children, .. } => stack.extend(children),
            }
        }

        hits.sort_unstable();
        hits
    }
}

/// Builds the subtree over `order` (which starts at `offset` in the full
/// permutation) and returns its node index.
fn split<F: Float>(
    envelopes: &[Envelope<F>],
    order: &mut [usize],
    offset: usize,
    leaf_size: usize,
    nodes: &mut Vec<Node<F>>,
) -> usize {
    let bounds = order
        .iter()
        .map(|&i| envelopes[i])
        .reduce(Envelope::expand_to_include_envelope)
        .unwrap_or_else(|| envelopes[0]);

    let index = nodes.len();
    if order.len() <= leaf_size {
        nodes.push(Node::Leaf {
            bounds,
            first: offset,
            count: order.len(),
        });
        return index;
    }

    let along_x = bounds.width() >= bounds.height();
    let key = |i: usize| {
        let c = envelopes[i].center();
        if along_x {
            c.x
        } else {
            c.y
        }
    };
    let mid = order.len() / 2;
    order.select_nth_unstable_by(mid, |&a, &b| {
        key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal)
    });

    // Children are filled in once built
    nodes.push(Node::Branch {
        bounds,
        children: [index, index],
    });
    let (low, high) = order.split_at_mut(mid);
    let left = split(envelopes, low, offset, leaf_size, nodes);
    let right = split(envelopes, high, offset + mid, leaf_size, nodes);
    nodes[index] = Node::Branch {
        bounds,
        children: [left, right],
    };
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Coordinate;

    fn env(x0: f64, y0: f64, x1: f64, y1: f64) -> Envelope<f64> {
        Envelope::new(Coordinate::new(x0, y0), Coordinate::new(x1, y1))
    }

    #[test]
    fn test_empty() {
        let boxes: Vec<Envelope<f64>> = vec![];
        let bvh = Bvh::build(&boxes, 1);
        assert!(bvh.is_empty());
        assert!(bvh.query(env(0.0, 0.0, 1.0, 1.0)).is_empty());
    }

    #[test]
    fn test_query_overlaps() {
        let boxes = vec![
            env(0.0, 0.0, 2.0, 2.0),
            env(1.0, 1.0, 3.0, 3.0),
            env(5.0, 5.0, 7.0, 7.0),
        ];
        let bvh = Bvh::build(&boxes, 1);

        assert_eq!(bvh.len(), 3);
        assert_eq!(bvh.query(env(1.5, 1.5, 1.5, 1.5)), vec![0, 1]);
        assert_eq!(bvh.query(env(6.0, 6.0, 8.0, 8.0)), vec![2]);
        assert!(bvh.query(env(10.0, 10.0, 11.0, 11.0)).is_empty());
    }

    #[test]
    fn test_touching_counts() {
        let boxes = vec![env(0.0, 0.0, 1.0, 1.0), env(2.0, 2.0, 3.0, 3.0)];
        let bvh = Bvh::build(&boxes, 1);
        assert_eq!(bvh.query(env(1.0, 1.0, 1.5, 1.5)), vec![0]);
    }

    #[test]
    fn test_grid_matches_brute_force() {
        let boxes: Vec<Envelope<f64>> = (0..100)
            .map(|i| {
                let c = Coordinate::new((i % 10) as f64, (i / 10) as f64);
                Envelope::from_coordinate(c)
            })
            .collect();
        let bvh = Bvh::build(&boxes, 4);

        let query = env(2.0, 2.0, 5.0, 5.0);
        let expected: Vec<usize> = (0..boxes.len())
            .filter(|&i| boxes[i].intersects(query))
            .collect();
        assert_eq!(expected.len(), 16);
        assert_eq!(bvh.query(query), expected);
    }

    #[test]
    fn test_identical_envelopes() {
        let boxes = vec![env(0.0, 0.0, 1.0, 1.0); 9];
        let bvh = Bvh::build(&boxes, 2);
        assert_eq!(bvh.query(env(0.5, 0.5, 0.5, 0.5)), (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_f32() {
        let boxes: Vec<Envelope<f32>> = (0..3)
            .map(|i| Envelope::from_coordinate(Coordinate::new(i as f32, i as f32)))
            .collect();
        let bvh = Bvh::build(&boxes, 1);
        let query = Envelope::new(Coordinate::new(0.0, 0.0), Coordinate::new(1.5, 1.5));
        assert_eq!(bvh.query(query), vec![0, 1]);
    }
}
