//! Self-noding of ring edges.
//!
//! Every segment of every edge is intersected with every other segment whose
//! envelope it touches. Intersection points are recorded on both edges as
//! [`EdgeIntersection`]s, ordered along the edge, so the edges can later be
//! split at them.

use crate::bounds::Envelope;
use crate::predicates::{intersect_segments, SegmentIntersection};
use crate::primitives::{CoordKey, Coordinate};
use crate::spatial::{Bounded, Bvh};
use num_traits::Float;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Maximum segments per BVH leaf during noding.
const NODING_LEAF_SIZE: usize = 4;

/// A point where an edge is intersected, located by segment and distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeIntersection<F> {
    /// The intersection point.
    pub coord: Coordinate<F>,
    /// Index of the segment containing the point.
    pub segment_index: usize,
    /// Distance from the segment start, in the segment's dominant ordinate.
    pub dist: F,
}

impl<F: Float> EdgeIntersection<F> {
    fn compare_position(&self, segment_index: usize, dist: F) -> Ordering {
        self.segment_index
            .cmp(&segment_index)
            .then_with(|| self.dist.partial_cmp(&dist).unwrap_or(Ordering::Equal))
    }
}

/// The intersections of one edge, sorted along the edge without duplicates.
#[derive(Debug, Clone)]
pub struct EdgeIntersectionList<F> {
    items: Vec<EdgeIntersection<F>>,
}

impl<F: Float> EdgeIntersectionList<F> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Inserts an intersection, returning false if the position is already
    /// present.
    pub fn add(&mut self, coord: Coordinate<F>, segment_index: usize, dist: F) -> bool {
        match self
            .items
            .binary_search_by(|ei| ei.compare_position(segment_index, dist))
        {
            Ok(_) => false,
            Err(pos) => {
                self.items.insert(
                    pos,
                    EdgeIntersection {
                        coord,
                        segment_index,
                        dist,
                    },
                );
                true
            }
        }
    }

    /// Returns the number of intersections.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no intersections.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates the intersections in edge order.
    pub fn iter(&self) -> impl Iterator<Item = &EdgeIntersection<F>> {
        self.items.iter()
    }

    /// Tests whether `p` is one of the intersection points.
    pub fn is_intersection(&self, p: Coordinate<F>) -> bool {
        self.items.iter().any(|ei| ei.coord == p)
    }

    /// Returns the first point that occurs at two positions of the list.
    ///
    /// The first entry is skipped: for a closed edge it is the same vertex as
    /// the closing entry, which is counted instead.
    pub fn first_repeated_coordinate(&self) -> Option<Coordinate<F>> {
        let mut seen = BTreeSet::new();
        self.items
            .iter()
            .skip(1)
            .find(|ei| !seen.insert(CoordKey(ei.coord)))
            .map(|ei| ei.coord)
    }
}

/// Records `p`, found on segment `segment_index` of `pts`, in `list`.
///
/// A point equal to the segment's end vertex is stored as the start of the
/// next segment, so every vertex has a single position.
fn add_intersection<F: Float>(
    list: &mut EdgeIntersectionList<F>,
    pts: &[Coordinate<F>],
    p: Coordinate<F>,
    segment_index: usize,
) {
    let next = segment_index + 1;
    if next < pts.len() && p == pts[next] {
        list.add(p, next, F::zero());
    } else {
        let dist = edge_distance(p, pts[segment_index], pts[next]);
        list.add(p, segment_index, dist);
    }
}

/// Distance of `p` from `p0` along the segment `p0-p1`.
///
/// Uses the larger of the segment's x and y extents, which orders points
/// along the segment exactly without computing square roots.
fn edge_distance<F: Float>(p: Coordinate<F>, p0: Coordinate<F>, p1: Coordinate<F>) -> F {
    let dx = (p1.x - p0.x).abs();
    let dy = (p1.y - p0.y).abs();

    if p == p0 {
        return F::zero();
    }
    if p == p1 {
        return dx.max(dy);
    }

    let pdx = (p.x - p0.x).abs();
    let pdy = (p.y - p0.y).abs();
    let dist = if dx > dy { pdx } else { pdy };

    // Points off the dominant axis still need a non-zero distance
    if dist == F::zero() {
        pdx.max(pdy)
    } else {
        dist
    }
}

#[derive(Debug, Clone, Copy)]
struct SegmentRef<F> {
    envelope: Envelope<F>,
    edge: usize,
    index: usize,
}

impl<F: Float> Bounded<F> for SegmentRef<F> {
    fn bounds(&self) -> Envelope<F> {
        self.envelope
    }
}

/// Result of noding a set of edges against each other.
#[derive(Debug, Clone)]
pub(crate) struct SelfNoding<F> {
    /// One list per input edge, including both end points.
    pub lists: Vec<EdgeIntersectionList<F>>,
    /// The first proper intersection found, in segment order.
    pub proper_intersection: Option<Coordinate<F>>,
}

/// Nodes the closed edges `edges` against themselves and each other.
///
/// Intersections between adjacent segments of the same edge at their shared
/// vertex carry no information and are skipped.
pub(crate) fn self_node<F: Float>(edges: &[Vec<Coordinate<F>>]) -> SelfNoding<F> {
    let mut lists: Vec<EdgeIntersectionList<F>> = edges
        .iter()
        .map(|pts| {
            let mut list = EdgeIntersectionList::new();
            if let (Some(&first), Some(&last)) = (pts.first(), pts.last()) {
                list.add(first, 0, F::zero());
                list.add(last, pts.len() - 1, F::zero());
            }
            list
        })
        .collect();

    let segments: Vec<SegmentRef<F>> = edges
        .iter()
        .enumerate()
        .flat_map(|(edge, pts)| {
            pts.windows(2).enumerate().map(move |(index, w)| SegmentRef {
                envelope: Envelope::from_corners(w[0], w[1]),
                edge,
                index,
            })
        })
        .collect();

    let bvh = Bvh::build(&segments, NODING_LEAF_SIZE);
    let mut proper_intersection = None;

    for (i, seg0) in segments.iter().enumerate() {
        for j in bvh.query(seg0.envelope).into_iter().filter(|&j| j > i) {
            let seg1 = &segments[j];
            let pts0 = &edges[seg0.edge];
            let pts1 = &edges[seg1.edge];

            let result = intersect_segments(
                pts0[seg0.index],
                pts0[seg0.index + 1],
                pts1[seg1.index],
                pts1[seg1.index + 1],
            );

            match result {
                SegmentIntersection::None => {}
                SegmentIntersection::Point { point, proper } => {
                    if is_trivial(seg0, seg1, pts0.len() - 1) {
                        continue;
                    }
                    add_intersection(&mut lists[seg0.edge], pts0, point, seg0.index);
                    add_intersection(&mut lists[seg1.edge], pts1, point, seg1.index);
                    if proper && proper_intersection.is_none() {
                        log::trace!("proper intersection between segments {} and {}", i, j);
                        proper_intersection = Some(point);
                    }
                }
                SegmentIntersection::Overlapping { start, end } => {
                    for p in [start, end] {
                        add_intersection(&mut lists[seg0.edge], pts0, p, seg0.index);
                        add_intersection(&mut lists[seg1.edge], pts1, p, seg1.index);
                    }
                }
            }
        }
    }

    SelfNoding {
        lists,
        proper_intersection,
    }
}

/// Tests whether a single-point intersection is just the vertex shared by
/// two consecutive segments of one closed edge with `segment_count` segments.
fn is_trivial<F>(seg0: &SegmentRef<F>, seg1: &SegmentRef<F>, segment_count: usize) -> bool {
    if seg0.edge != seg1.edge {
        return false;
    }
    let lo = seg0.index.min(seg1.index);
    let hi = seg0.index.max(seg1.index);
    hi - lo == 1 || (lo == 0 && hi + 1 == segment_count)
}
