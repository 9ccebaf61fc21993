//! Planar graph of the rings of an areal geometry.
//!
//! - [`GeometryGraph`] nodes all rings against each other and keeps, per
//!   ring, the list of points where it meets itself or another ring.
//! - [`SplitEdge`]s are the ring pieces between consecutive nodes, labelled
//!   with the area locations on either side.
//! - [`PlanarGraph`] turns split edges into directed edges around sorted node
//!   stars, and links them into [`EdgeRing`]s.

mod geometry_graph;
mod label;
mod noding;
mod planar;

pub use geometry_graph::{GeometryGraph, RingEdge, SplitEdge};
pub use label::Label;
pub use noding::{EdgeIntersection, EdgeIntersectionList};
pub use planar::{DirectedEdge, EdgeRing, PlanarGraph};
