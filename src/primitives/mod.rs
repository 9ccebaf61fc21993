//! Floating-point geometric primitives.

mod coordinate;
mod vec2;

pub use coordinate::Coordinate;
pub use vec2::Vec2;

pub(crate) use coordinate::CoordKey;
