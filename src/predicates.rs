//! Geometric predicates used by the validity checks.
//!
//! The orientation test takes an explicit tolerance like every predicate in
//! this module; the graph and the validity checks call it with zero so that
//! noding decisions are made on the raw ordinates.

use crate::bounds::Envelope;
use crate::primitives::Coordinate;
use num_traits::Float;

/// Result of an orientation test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Points are counter-clockwise (positive area).
    CounterClockwise,
    /// Points are clockwise (negative area).
    Clockwise,
    /// Points are collinear (within tolerance).
    Collinear,
}

impl Orientation {
    /// Returns the opposite turn direction.
    #[inline]
    pub fn reverse(self) -> Self {
        match self {
            Orientation::CounterClockwise => Orientation::Clockwise,
            Orientation::Clockwise => Orientation::CounterClockwise,
            Orientation::Collinear => Orientation::Collinear,
        }
    }
}

/// Computes the orientation of three points with tolerance.
///
/// Returns the orientation of the triangle formed by points `a`, `b`, `c`:
/// - `CounterClockwise` if `c` is to the left of the line from `a` to `b`
/// - `Clockwise` if `c` is to the right of the line from `a` to `b`
/// - `Collinear` if `c` is on the line (within `eps` tolerance)
///
/// `eps` is compared against the absolute value of the cross product (twice
/// the signed area of the triangle).
#[inline]
pub fn orient2d<F: Float>(
    a: Coordinate<F>,
    b: Coordinate<F>,
    c: Coordinate<F>,
    eps: F,
) -> Orientation {
    let cross = (b - a).cross(c - a);

    if cross > eps {
        Orientation::CounterClockwise
    } else if cross < -eps {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Exact-ordinate orientation, as used by noding and containment tests.
#[inline]
pub(crate) fn orientation<F: Float>(a: Coordinate<F>, b: Coordinate<F>, c: Coordinate<F>) -> Orientation {
    orient2d(a, b, c, F::zero())
}

/// Topological location of a point relative to an area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// Strictly inside.
    Interior,
    /// On the boundary.
    Boundary,
    /// Strictly outside.
    Exterior,
}

/// Locates a point relative to a closed ring using ray crossing.
///
/// Counts crossings of a ray from `p` towards positive x. Points on any
/// segment (including vertices) are reported as [`Location::Boundary`].
/// The ring must be closed (first coordinate equal to the last).
pub fn locate_point_in_ring<F: Float>(p: Coordinate<F>, ring: &[Coordinate<F>]) -> Location {
    let mut crossings = 0usize;

    for w in ring.windows(2) {
        let (p1, p2) = (w[0], w[1]);

        // Segment strictly left of the point cannot cross the ray
        if p1.x < p.x && p2.x < p.x {
            continue;
        }

        if p == p2 {
            return Location::Boundary;
        }

        // Horizontal segment on the ray's line
        if p1.y == p.y && p2.y == p.y {
            let min_x = p1.x.min(p2.x);
            let max_x = p1.x.max(p2.x);
            if p.x >= min_x && p.x <= max_x {
                return Location::Boundary;
            }
            continue;
        }

        // Half-open rule so vertices on the ray are counted once
        if (p1.y > p.y && p2.y <= p.y) || (p2.y > p.y && p1.y <= p.y) {
            let mut orient = orientation(p1, p2, p);
            if orient == Orientation::Collinear {
                return Location::Boundary;
            }
            if p2.y < p1.y {
                orient = orient.reverse();
            }
            if orient == Orientation::CounterClockwise {
                crossings += 1;
            }
        }
    }

    if crossings % 2 == 1 {
        Location::Interior
    } else {
        Location::Exterior
    }
}

/// Tests whether a point lies inside or on the boundary of a closed ring.
#[inline]
pub fn is_point_in_ring<F: Float>(p: Coordinate<F>, ring: &[Coordinate<F>]) -> bool {
    locate_point_in_ring(p, ring) != Location::Exterior
}

/// Returns twice the signed area of a closed ring.
///
/// Positive for counter-clockwise rings.
pub fn ring_signed_area2<F: Float>(ring: &[Coordinate<F>]) -> F {
    ring.windows(2).fold(F::zero(), |acc, w| {
        acc + (w[0].x * w[1].y - w[1].x * w[0].y)
    })
}

/// Tests whether a closed ring is oriented counter-clockwise.
#[inline]
pub fn is_ccw<F: Float>(ring: &[Coordinate<F>]) -> bool {
    ring_signed_area2(ring) > F::zero()
}

/// Result of a segment intersection test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection<F> {
    /// Segments do not intersect.
    None,
    /// Segments intersect at a single point.
    Point {
        /// The intersection point.
        point: Coordinate<F>,
        /// True if the point is interior to both segments.
        proper: bool,
    },
    /// Segments are collinear and share a stretch of non-zero length.
    Overlapping {
        /// One end of the shared stretch.
        start: Coordinate<F>,
        /// The other end of the shared stretch.
        end: Coordinate<F>,
    },
}

/// Intersects segment `p1-p2` with segment `q1-q2`.
///
/// Endpoint intersections are reported with the exact input endpoint, so
/// nodes formed at shared vertices compare equal to those vertices.
pub fn intersect_segments<F: Float>(
    p1: Coordinate<F>,
    p2: Coordinate<F>,
    q1: Coordinate<F>,
    q2: Coordinate<F>,
) -> SegmentIntersection<F> {
    let env_p = Envelope::from_corners(p1, p2);
    let env_q = Envelope::from_corners(q1, q2);
    if !env_p.intersects(env_q) {
        return SegmentIntersection::None;
    }

    let pq1 = orientation(p1, p2, q1);
    let pq2 = orientation(p1, p2, q2);
    if pq1 == pq2 && pq1 != Orientation::Collinear {
        return SegmentIntersection::None;
    }

    let qp1 = orientation(q1, q2, p1);
    let qp2 = orientation(q1, q2, p2);
    if qp1 == qp2 && qp1 != Orientation::Collinear {
        return SegmentIntersection::None;
    }

    let collinear = Orientation::Collinear;
    if pq1 == collinear && pq2 == collinear && qp1 == collinear && qp2 == collinear {
        return collinear_intersection(p1, p2, q1, q2);
    }

    if pq1 == collinear || pq2 == collinear || qp1 == collinear || qp2 == collinear {
        // Endpoint intersection: prefer a shared vertex, then the touching endpoint
        let point = if p1 == q1 || p1 == q2 {
            p1
        } else if p2 == q1 || p2 == q2 {
            p2
        } else if pq1 == collinear {
            q1
        } else if pq2 == collinear {
            q2
        } else if qp1 == collinear {
            p1
        } else {
            p2
        };
        return SegmentIntersection::Point {
            point,
            proper: false,
        };
    }

    SegmentIntersection::Point {
        point: proper_intersection_point(p1, p2, q1, q2, env_p, env_q),
        proper: true,
    }
}

/// Intersection of two collinear segments.
fn collinear_intersection<F: Float>(
    p1: Coordinate<F>,
    p2: Coordinate<F>,
    q1: Coordinate<F>,
    q2: Coordinate<F>,
) -> SegmentIntersection<F> {
    let env_p = Envelope::from_corners(p1, p2);
    let env_q = Envelope::from_corners(q1, q2);

    let q1_in_p = env_p.contains_coordinate(q1);
    let q2_in_p = env_p.contains_coordinate(q2);
    let p1_in_q = env_q.contains_coordinate(p1);
    let p2_in_q = env_q.contains_coordinate(p2);

    let pair = |a: Coordinate<F>, b: Coordinate<F>| {
        if a == b {
            SegmentIntersection::Point {
                point: a,
                proper: false,
            }
        } else {
            SegmentIntersection::Overlapping { start: a, end: b }
        }
    };

    if q1_in_p && q2_in_p {
        pair(q1, q2)
    } else if p1_in_q && p2_in_q {
        pair(p1, p2)
    } else if q1_in_p && p1_in_q {
        pair(q1, p1)
    } else if q1_in_p && p2_in_q {
        pair(q1, p2)
    } else if q2_in_p && p1_in_q {
        pair(q2, p1)
    } else if q2_in_p && p2_in_q {
        pair(q2, p2)
    } else {
        SegmentIntersection::None
    }
}

/// Computes the crossing point of two properly intersecting segments.
///
/// Rounding may push the computed point outside the segments' envelopes; the
/// endpoint closest to it is used instead in that case.
fn proper_intersection_point<F: Float>(
    p1: Coordinate<F>,
    p2: Coordinate<F>,
    q1: Coordinate<F>,
    q2: Coordinate<F>,
    env_p: Envelope<F>,
    env_q: Envelope<F>,
) -> Coordinate<F> {
    let d1 = p2 - p1;
    let d2 = q2 - q1;
    let denom = d1.cross(d2);
    let t = (q1 - p1).cross(d2) / denom;
    let point = Coordinate::new(p1.x + d1.x * t, p1.y + d1.y * t);

    if point.is_finite() && env_p.contains_coordinate(point) && env_q.contains_coordinate(point) {
        return point;
    }

    [p1, p2, q1, q2]
        .into_iter()
        .fold((p1, F::infinity()), |(best, best_d), c| {
            let d = c.distance_squared(point);
            if d < best_d {
                (c, d)
            } else {
                (best, best_d)
            }
        })
        .0
}
