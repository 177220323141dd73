//! # Lines
//!
//! A line is an origin and a direction. The direction is never normalized;
//! only its orientation matters to the solver.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// A position in 3D space.
pub type Point3 = DVec3;

/// A direction in 3D space. Not required to be unit length.
pub type Vector3 = DVec3;

/// An infinite line through `origin` along `direction`.
///
/// A zero `direction` is legal; such a line is degenerate and the solver
/// maps it to its fallback output.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use line_geometry::Line;
///
/// let line = Line::new(DVec3::new(1.0, 2.0, 3.0), DVec3::X);
/// assert_eq!(line.point_at(2.0), DVec3::new(3.0, 2.0, 3.0));
/// assert!(!line.is_degenerate());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// A point on the line.
    pub origin: Point3,
    /// Orientation of the line.
    pub direction: Vector3,
}

impl Line {
    /// Creates a line.
    pub const fn new(origin: Point3, direction: Vector3) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn point_at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction
    }

    /// True when the direction has zero magnitude.
    ///
    /// Magnitude is measured as the squared length, so a direction small
    /// enough for it to underflow is degenerate too.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.direction.length_squared() == 0.0
    }

    /// Closest point between this line and `other`.
    ///
    /// See [`crate::closest_point`].
    pub fn closest_point(&self, other: &Line) -> Point3 {
        crate::closest::closest_approach(self, other).midpoint()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_at_zero_is_origin() {
        let line = Line::new(DVec3::new(4.0, -2.0, 1.0), DVec3::new(0.3, 0.2, 0.1));
        assert_eq!(line.point_at(0.0), line.origin);
    }

    #[test]
    fn test_negative_zero_direction_is_degenerate() {
        let line = Line::new(DVec3::ONE, DVec3::new(-0.0, 0.0, -0.0));
        assert!(line.is_degenerate());
    }

    #[test]
    fn test_underflowing_direction_is_degenerate() {
        assert!(Line::new(DVec3::ZERO, DVec3::new(1e-200, 0.0, 0.0)).is_degenerate());
        assert!(!Line::new(DVec3::ZERO, DVec3::new(1e-100, 0.0, 0.0)).is_degenerate());
    }
}
