//! # Result Display
//!
//! Formats the computed closest point for the output label.

use std::cell::{Cell, RefCell};

use config::constants::LABEL_DECIMALS;
use line_geometry::Point3;

use crate::collaborators::ResultDisplay;

/// Formats a point as `(x, y, z)` with two decimals per coordinate.
///
/// Values that round to zero print without a sign.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use line_sync::format_point;
///
/// assert_eq!(format_point(DVec3::new(1.0, -2.5, 0.126)), "(1.00, -2.50, 0.13)");
/// assert_eq!(format_point(DVec3::new(-0.001, 0.0, 0.0)), "(0.00, 0.00, 0.00)");
/// ```
pub fn format_point(p: Point3) -> String {
    format!(
        "({}, {}, {})",
        format_coordinate(p.x),
        format_coordinate(p.y),
        format_coordinate(p.z)
    )
}

fn format_coordinate(value: f64) -> String {
    let text = format!("{:.*}", LABEL_DECIMALS, value);
    match text.strip_prefix('-') {
        Some(magnitude) if magnitude.chars().all(|c| c == '0' || c == '.') => {
            magnitude.to_string()
        }
        _ => text,
    }
}

/// Label showing the latest closest point.
#[derive(Debug, Default)]
pub struct IntersectionLabel {
    text: RefCell<String>,
    updates: Cell<u64>,
}

impl IntersectionLabel {
    /// Empty label.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current label text.
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    /// How many times the label was written.
    pub fn update_count(&self) -> u64 {
        self.updates.get()
    }
}

impl ResultDisplay for IntersectionLabel {
    fn show_closest_point(&self, p3: Point3) {
        *self.text.borrow_mut() = format_point(p3);
        self.updates.set(self.updates.get() + 1);
    }
}
