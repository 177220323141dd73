//! # Config Crate
//!
//! Centralized configuration constants for the line intersection tool.
//! Slider domains, default line parameters and control-point layout are
//! defined here so the geometry, synchronization and host crates agree on
//! them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{clamp_to_domain, SliderKind, DEFAULT_D1};
//!
//! // Direction sliders saturate at their bounds
//! assert_eq!(clamp_to_domain(SliderKind::Direction, 3.0), 1.0);
//!
//! // Line 1 points along +X until the user says otherwise
//! assert_eq!(DEFAULT_D1, [1.0, 0.0, 0.0]);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Host-Agnostic**: No UI toolkit or scene-graph specific values

pub mod constants;
