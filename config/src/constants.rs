//! # Configuration Constants
//!
//! Centralized constants for the line intersection tool.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Sliders**: Domains and steps of the numeric input channels
//! - **Parameters**: Defaults for the persisted line parameters
//! - **Control Points**: Layout of the spatial control points
//! - **Display**: Output formatting

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// The closest-point solver compares against exact zero; this tolerance is
/// only used when checking results, e.g. in tests and by hosts deciding
/// whether a point moved.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

// =============================================================================
// SLIDER CONSTANTS
// =============================================================================

/// Lower bound of a point coordinate slider (P1/P2).
pub const POINT_SLIDER_MIN: f64 = -100.0;

/// Upper bound of a point coordinate slider (P1/P2).
pub const POINT_SLIDER_MAX: f64 = 100.0;

/// Single step of a point coordinate slider.
pub const POINT_SLIDER_STEP: f64 = 0.1;

/// Lower bound of a direction component slider (d1/d2).
pub const DIRECTION_SLIDER_MIN: f64 = -1.0;

/// Upper bound of a direction component slider (d1/d2).
pub const DIRECTION_SLIDER_MAX: f64 = 1.0;

/// Single step of a direction component slider.
pub const DIRECTION_SLIDER_STEP: f64 = 0.01;

/// Number of decimals every slider displays.
pub const SLIDER_DECIMALS: usize = 2;

/// Number of scalar channels on the numeric input surface.
///
/// Three for each of P1, P2, d1 and d2.
///
/// # Example
///
/// ```rust
/// use config::constants::SLIDER_CHANNEL_COUNT;
///
/// assert_eq!(SLIDER_CHANNEL_COUNT, 4 * 3);
/// ```
pub const SLIDER_CHANNEL_COUNT: usize = 12;

/// Kind of quantity a slider channel edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliderKind {
    /// Coordinate of P1 or P2.
    Point,
    /// Component of d1 or d2.
    Direction,
}

impl SliderKind {
    /// Inclusive `(min, max)` domain of the channel.
    pub const fn domain(self) -> (f64, f64) {
        match self {
            SliderKind::Point => (POINT_SLIDER_MIN, POINT_SLIDER_MAX),
            SliderKind::Direction => (DIRECTION_SLIDER_MIN, DIRECTION_SLIDER_MAX),
        }
    }

    /// Single step of the channel.
    pub const fn step(self) -> f64 {
        match self {
            SliderKind::Point => POINT_SLIDER_STEP,
            SliderKind::Direction => DIRECTION_SLIDER_STEP,
        }
    }
}

// =============================================================================
// PARAMETER DEFAULTS
// =============================================================================

/// Default direction of line 1.
pub const DEFAULT_D1: [f64; 3] = [1.0, 0.0, 0.0];

/// Default direction of line 2.
pub const DEFAULT_D2: [f64; 3] = [0.0, 1.0, 0.0];

/// Default value of the auto-update flag.
pub const DEFAULT_AUTO_UPDATE: bool = false;

// =============================================================================
// CONTROL POINT LAYOUT
// =============================================================================

/// Name of the spatial node holding the control points.
pub const MARKUPS_NODE_NAME: &str = "LineIntersectionPoints";

/// Number of control points: P1, P2 and the computed P3.
pub const CONTROL_POINT_COUNT: usize = 3;

/// Control point index of P1.
pub const P1_INDEX: usize = 0;

/// Control point index of P2.
pub const P2_INDEX: usize = 1;

/// Control point index of the computed P3. Locked against user edits.
pub const P3_INDEX: usize = 2;

// =============================================================================
// DISPLAY CONSTANTS
// =============================================================================

/// Decimals used when displaying the computed closest point.
pub const LABEL_DECIMALS: usize = 2;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Clamps a value into the domain of a slider kind.
///
/// Non-finite input is passed through unchanged so callers can reject it
/// explicitly.
///
/// # Example
///
/// ```rust
/// use config::constants::{clamp_to_domain, SliderKind};
///
/// assert_eq!(clamp_to_domain(SliderKind::Point, 250.0), 100.0);
/// assert_eq!(clamp_to_domain(SliderKind::Direction, -0.5), -0.5);
/// ```
#[inline]
pub fn clamp_to_domain(kind: SliderKind, value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let (min, max) = kind.domain();
    value.clamp(min, max)
}
