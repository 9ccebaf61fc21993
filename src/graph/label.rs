//! Side labels of area edges.

use crate::predicates::Location;

/// Locations on and beside an edge, relative to the area being validated.
///
/// `left` and `right` are taken looking along the edge's direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    pub on: Location,
    pub left: Location,
    pub right: Location,
}

impl Label {
    /// Creates a label for an area boundary edge.
    #[inline]
    pub fn area(left: Location, right: Location) -> Self {
        Self {
            on: Location::Boundary,
            left,
            right,
        }
    }

    /// Labels a polygon ring in its stored direction.
    ///
    /// A clockwise shell has the interior on its right; a clockwise hole has
    /// it on its left. Counter-clockwise rings swap sides.
    pub fn for_ring(is_hole: bool, is_ccw: bool) -> Self {
        let (cw_left, cw_right) = if is_hole {
            (Location::Interior, Location::Exterior)
        } else {
            (Location::Exterior, Location::Interior)
        };
        if is_ccw {
            Self::area(cw_right, cw_left)
        } else {
            Self::area(cw_left, cw_right)
        }
    }

    /// Returns the label seen when traversing the edge backwards.
    #[inline]
    pub fn flip(self) -> Self {
        Self {
            on: self.on,
            left: self.right,
            right: self.left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_labels() {
        let ccw = Label::for_ring(false, true);
        assert_eq!(ccw.left, Location::Interior);
        assert_eq!(ccw.right, Location::Exterior);

        let cw = Label::for_ring(false, false);
        assert_eq!(cw.right, Location::Interior);
    }

    #[test]
    fn test_hole_labels() {
        let ccw = Label::for_ring(true, true);
        assert_eq!(ccw.left, Location::Exterior);
        assert_eq!(ccw.right, Location::Interior);

        let cw = Label::for_ring(true, false);
        assert_eq!(cw.left, Location::Interior);
    }

    #[test]
    fn test_flip() {
        let label = Label::for_ring(false, true);
        let flipped = label.flip();
        assert_eq!(flipped.left, label.right);
        assert_eq!(flipped.right, label.left);
        assert_eq!(flipped.flip(), label);
    }
}
