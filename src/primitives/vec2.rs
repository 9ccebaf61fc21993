//! 2D vector type for directions and offsets.

use num_traits::Float;

/// A 2D vector representing a direction or offset.
///
/// Generic over floating-point types (`f32` or `f64`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2<F> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    /// Creates a new vector.
    #[inline]
    pub fn new(x: F, y: F) -> Self {
        Self { x, y }
    }

    /// Computes the dot product with another vector.
    #[inline]
    pub fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y
    }

    /// Computes the 2D cross product (perpendicular dot product).
    ///
    /// Returns the z-component of the 3D cross product if the vectors
    /// were extended to 3D with z=0. Positive means `other` is counter-clockwise
    /// from `self`.
    #[inline]
    pub fn cross(self, other: Self) -> F {
        self.x * other.y - self.y * other.x
    }

    /// Returns the squared magnitude (length squared).
    #[inline]
    pub fn magnitude_squared(self) -> F {
        self.dot(self)
    }

    /// Returns true if both components are exactly zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.x == F::zero() && self.y == F::zero()
    }

    /// Returns the quadrant this direction points into.
    ///
    /// Quadrants are numbered counter-clockwise starting at the positive x
    /// axis: 0 = NE, 1 = NW, 2 = SW, 3 = SE. A zero ordinate counts as
    /// non-negative, so the quadrants cover the angle ranges `[0, 90]`,
    /// `(90, 180]`, `(180, 270)` and `[270, 360)`.
    #[inline]
    pub fn quadrant(self) -> u8 {
        let zero = F::zero();
        match (self.x >= zero, self.y >= zero) {
            (true, true) => 0,
            (false, true) => 1,
            (false, false) => 2,
            (true, false) => 3,
        }
    }
}
