//! One-dimensional sweepline index reporting overlapping intervals.

use num_traits::Float;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum EventKind {
    // Inserts sort before deletes at equal x so touching intervals overlap
    Insert,
    Delete,
}

#[derive(Debug, Clone, Copy)]
struct SweepEvent<F> {
    x: F,
    kind: EventKind,
    interval: usize,
}

/// Finds all pairs of overlapping closed intervals by sweeping their end points.
///
/// # Example
///
/// ```
/// use topovalid::spatial::SweepLineIndex;
///
/// let mut index = SweepLineIndex::new();
/// index.add(0.0, 2.0, 10);
/// index.add(1.0, 3.0, 11);
/// index.add(5.0, 6.0, 12);
///
/// let mut pairs = Vec::new();
/// index.for_each_overlap(|a, b| {
///     pairs.push((a, b));
///     true
/// });
/// assert_eq!(pairs, vec![(10, 11)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SweepLineIndex<F> {
    /// `(min, max, item)` per interval.
    intervals: Vec<(F, F, usize)>,
}

impl<F: Float> SweepLineIndex<F> {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self {
            intervals: Vec::new(),
        }
    }

    /// Adds the interval `[min, max]` for `item`.
    pub fn add(&mut self, min: F, max: F, item: usize) {
        self.intervals.push((min.min(max), min.max(max), item));
    }

    /// Returns the number of intervals.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Returns true if no intervals were added.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Calls `callback(a, b)` once for every unordered pair of overlapping
    /// intervals, `a` being the one that starts first in sweep order.
    ///
    /// Returning `false` from the callback stops the sweep.
    pub fn for_each_overlap<C>(&self, mut callback: C)
    where
        C: FnMut(usize, usize) -> bool,
    {
        let mut events: Vec<SweepEvent<F>> = Vec::with_capacity(self.intervals.len() * 2);
        for (i, &(min, max, _)) in self.intervals.iter().enumerate() {
            events.push(SweepEvent {
                x: min,
                kind: EventKind::Insert,
                interval: i,
            });
            events.push(SweepEvent {
                x: max,
                kind: EventKind::Delete,
                interval: i,
            });
        }

        // Stable so that ties keep insertion order
        events.sort_by(|a, b| {
            a.x.partial_cmp(&b.x)
                .unwrap_or(Ordering::Equal)
                .then(a.kind.cmp(&b.kind))
        });

        let mut delete_pos = vec![0usize; self.intervals.len()];
        for (pos, ev) in events.iter().enumerate() {
            if ev.kind == EventKind::Delete {
                delete_pos[ev.interval] = pos;
            }
        }

        for (pos, ev) in events.iter().enumerate() {
            if ev.kind != EventKind::Insert {
                continue;
            }
            let item0 = self.intervals[ev.interval].2;
            for other in &events[pos + 1..delete_pos[ev.interval]] {
                if other.kind == EventKind::Insert {
                    let item1 = self.intervals[other.interval].2;
                    if !callback(item0, item1) {
                        return;
                    }
                }
            }
        }
    }
}
