//! Planar coordinate with an optional z ordinate.

use super::Vec2;
use num_traits::Float;
use std::cmp::Ordering;
use std::ops::Sub;

/// A planar coordinate.
///
/// Generic over floating-point types (`f32` or `f64`). The optional `z`
/// ordinate is carried along but ignored by equality, ordering and every
/// validity check.
#[derive(Debug, Clone, Copy)]
pub struct Coordinate<F> {
    pub x: F,
    pub y: F,
    pub z: Option<F>,
}

impl<F: Float> Coordinate<F> {
    /// Creates a new 2D coordinate.
    #[inline]
    pub fn new(x: F, y: F) -> Self {
        Self { x, y, z: None }
    }

    /// Creates a coordinate with a z ordinate.
    #[inline]
    pub fn new_3d(x: F, y: F, z: F) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// Returns true if both planar ordinates (and `z`, when present) are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.map_or(true, |z| z.is_finite())
    }

    /// Compares x, then y.
    ///
    /// Coordinates are finite by construction, so the partial order is total
    /// in practice.
    #[inline]
    pub fn compare_2d(&self, other: &Self) -> Ordering {
        self.x
            .partial_cmp(&other.x)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.y.partial_cmp(&other.y).unwrap_or(Ordering::Equal))
    }

    /// Equality including the z ordinate. Two missing z values are equal.
    #[inline]
    pub fn equals_3d(&self, other: &Self) -> bool {
        *self == *other && self.z == other.z
    }

    /// Computes the squared distance to another coordinate.
    #[inline]
    pub fn distance_squared(self, other: Self) -> F {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Returns the midpoint between `self` and `other` (z is dropped).
    #[inline]
    pub fn midpoint(self, other: Self) -> Self {
        let two = F::one() + F::one();
        Self::new((self.x + other.x) / two, (self.y + other.y) / two)
    }
}

impl<F: PartialEq> PartialEq for Coordinate<F> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

// Coordinate - Coordinate = Vec2
impl<F: Float> Sub for Coordinate<F> {
    type Output = Vec2<F>;

    #[inline]
    fn sub(self, other: Self) -> Vec2<F> {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl<F: Float> From<(F, F)> for Coordinate<F> {
    fn from((x, y): (F, F)) -> Self {
        Self::new(x, y)
    }
}

impl<F: Float> From<(F, F, F)> for Coordinate<F> {
    fn from((x, y, z): (F, F, F)) -> Self {
        Self::new_3d(x, y, z)
    }
}

/// A coordinate usable as an ordered map key (x, then y).
#[derive(Debug, Clone, Copy)]
pub(crate) struct CoordKey<F>(pub Coordinate<F>);

impl<F: Float> PartialEq for CoordKey<F> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<F: Float> Eq for CoordKey<F> {}

impl<F: Float> PartialOrd for CoordKey<F> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<F: Float> Ord for CoordKey<F> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.compare_2d(&other.0)
    }
}
