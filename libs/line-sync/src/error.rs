//! # Sync Errors
//!
//! Errors raised by the host-facing adapters. Propagation itself cannot
//! fail; these only reject malformed edits before they reach the controller.

use thiserror::Error;

/// Errors that can occur at the adapter boundary.
#[derive(Error, Debug)]
pub enum SyncError {
    /// A user tried to drag a locked control point.
    #[error("Control point {index} is locked")]
    PointLocked {
        /// Control point index.
        index: usize,
    },

    /// Control point index outside the point list.
    #[error("Control point index {index} out of range (expected < {count})")]
    PointIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of control points.
        count: usize,
    },

    /// Slider channel index outside the panel.
    #[error("Slider channel index {0} out of range")]
    ChannelIndexOutOfRange(usize),

    /// Slider channel label not recognised.
    #[error("Unknown slider channel: {0}")]
    UnknownChannel(String),

    /// NaN or infinite value from a host.
    #[error("Non-finite value for {what}: {value}")]
    NonFiniteValue {
        /// What the value was for.
        what: String,
        /// Rejected value.
        value: f64,
    },

    /// Persisted parameters could not be decoded or encoded.
    #[error("Parameter JSON error: {0}")]
    ParameterJson(#[from] serde_json::Error),
}

/// Result type alias for adapter operations.
pub type SyncResult<T> = Result<T, SyncError>;

// =============================================================================
// TESTS
// =============================================================================
