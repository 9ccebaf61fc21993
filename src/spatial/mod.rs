//! Spatial data structures and queries.
//!
//! This module provides acceleration structures used to prune candidate pairs
//! before exact geometric tests:
//!
//! - [`Bvh`] - A bounding volume hierarchy over envelopes
//! - [`Quadtree`] - A region quadtree over envelopes
//! - [`SweepLineIndex`] - An interval sweep reporting overlapping x-extents

mod bvh;
mod quadtree;
mod sweepline;

pub use bvh::{Bounded, Bvh};
pub use quadtree::Quadtree;
pub use sweepline::SweepLineIndex;
