//! # Closest Approach
//!
//! Closed-form closest points between two lines.
//!
//! ## Branches
//!
//! | Condition                  | Feet                                   |
//! |----------------------------|----------------------------------------|
//! | `|d|^2 == 0` for either    | both at the origin                     |
//! | `d1 x d2 == 0` (parallel)  | foot of `P2` on line 1, and `P2`       |
//! | otherwise (skew/crossing)  | mutual closest points `c1`, `c2`       |
//!
//! The reported point is always the midpoint of the two feet. All checks are
//! against exact zero; there is no tolerance snapping.

use config::constants::EPSILON;
use glam::{DMat3, DVec3};

use crate::line::{Line, Point3, Vector3};

/// Which branch of the solver produced a [`ClosestApproach`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApproachKind {
    /// At least one direction has zero magnitude.
    Degenerate,
    /// Directions are parallel (including coincident lines).
    Parallel,
    /// General case: lines cross or are skew.
    Skew,
}

/// The pair of points realizing the closest approach of two lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestApproach {
    /// Branch taken by the solver.
    pub kind: ApproachKind,
    /// Foot on line 1.
    pub on_first: Point3,
    /// Foot on line 2.
    pub on_second: Point3,
}

impl ClosestApproach {
    fn degenerate() -> Self {
        Self {
            kind: ApproachKind::Degenerate,
            on_first: DVec3::ZERO,
            on_second: DVec3::ZERO,
        }
    }

    /// Midpoint of the two feet. This is the intersection point when the
    /// lines meet.
    #[inline]
    pub fn midpoint(&self) -> Point3 {
        (self.on_first + self.on_second) / 2.0
    }

    /// Distance between the two feet.
    #[inline]
    pub fn separation(&self) -> f64 {
        self.on_first.distance(self.on_second)
    }

    /// True when the feet coincide within [`EPSILON`].
    pub fn intersects(&self) -> bool {
        self.kind != ApproachKind::Degenerate && self.separation() < EPSILON
    }
}

/// Computes the closest approach of two lines.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use line_geometry::{closest_approach, ApproachKind, Line};
///
/// let first = Line::new(DVec3::ZERO, DVec3::X);
/// let second = Line::new(DVec3::new(0.0, 1.0, 0.0), DVec3::new(2.0, 0.0, 0.0));
///
/// let approach = closest_approach(&first, &second);
/// assert_eq!(approach.kind, ApproachKind::Parallel);
/// assert_eq!(approach.separation(), 1.0);
/// ```
pub fn closest_approach(first: &Line, second: &Line) -> ClosestApproach {
    if first.is_degenerate() || second.is_degenerate() {
        return ClosestApproach::degenerate();
    }

    let (p1, d1) = (first.origin, first.direction);
    let (p2, d2) = (second.origin, second.direction);
    let offset = p2 - p1;

    let cross = d1.cross(d2);
    let denom = cross.length_squared();

    if denom == 0.0 {
        // Project P2 onto line 1; only d1 is used, d2 is the same up to scale.
        // d1.dot(d1) > 0 here since degenerate lines returned above.
        let t = offset.dot(d1) / d1.dot(d1);
        return ClosestApproach {
            kind: ApproachKind::Parallel,
            on_first: first.point_at(t),
            on_second: p2,
        };
    }

    let t1 = det(offset, d2, cross) / denom;
    let t2 = det(offset, d1, cross) / denom;

    ClosestApproach {
        kind: ApproachKind::Skew,
        on_first: first.point_at(t1),
        on_second: second.point_at(t2),
    }
}

/// Closest point between the lines `(p1, d1)` and `(p2, d2)`.
///
/// Returns the origin when either direction is zero.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use line_geometry::closest_point;
///
/// // Crossing lines report their intersection
/// let p = closest_point(
///     DVec3::new(-1.0, 0.0, 0.0), DVec3::X,
///     DVec3::new(0.0, -1.0, 0.0), DVec3::Y,
/// );
/// assert_eq!(p, DVec3::ZERO);
///
/// // Degenerate direction
/// assert_eq!(closest_point(DVec3::ONE, DVec3::ZERO, DVec3::ONE, DVec3::X), DVec3::ZERO);
/// ```
pub fn closest_point(p1: Point3, d1: Vector3, p2: Point3, d2: Vector3) -> Point3 {
    closest_approach(&Line::new(p1, d1), &Line::new(p2, d2)).midpoint()
}

/// Determinant of the 3x3 matrix with rows (equivalently columns) `a`, `b`, `c`.
#[inline]
fn det(a: DVec3, b: DVec3, c: DVec3) -> f64 {
    DMat3::from_cols(a, b, c).determinant()
}

// =============================================================================
// TESTS
// =============================================================================
