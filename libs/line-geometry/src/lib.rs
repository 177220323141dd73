//! # Line Geometry
//!
//! Closed-form closest point between two lines in 3D.
//!
//! ## Architecture
//!
//! ```text
//! (P1, d1), (P2, d2) → closest_approach → ClosestApproach → midpoint (P3)
//! ```
//!
//! The solver is total: a zero direction or parallel lines select a
//! fallback branch instead of producing an error or NaN.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use line_geometry::closest_point;
//!
//! let p3 = closest_point(DVec3::ZERO, DVec3::X, DVec3::Z, DVec3::Y);
//! assert_eq!(p3, DVec3::new(0.0, 0.0, 0.5));
//! ```

pub mod closest;
pub mod line;

// Re-export public API
pub use closest::{closest_approach, closest_point, ApproachKind, ClosestApproach};
pub use line::{Line, Point3, Vector3};
