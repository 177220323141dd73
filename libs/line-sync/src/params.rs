//! # Line Parameters
//!
//! The persisted half of the state: both directions and the auto-update
//! flag. Encoding is a plain serde derive; missing fields fall back to the
//! configured defaults.

use std::cell::Cell;

use config::constants::{DEFAULT_AUTO_UPDATE, DEFAULT_D1, DEFAULT_D2};
use glam::DVec3;
use line_geometry::Vector3;
use serde::{Deserialize, Serialize};

use crate::collaborators::ParameterStore;
use crate::error::SyncResult;

/// Persisted line parameters.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use line_sync::LineParameters;
///
/// let params = LineParameters::from_json(r#"{"autoUpdate": true}"#).unwrap();
/// assert!(params.auto_update);
/// assert_eq!(params.d1, DVec3::X);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LineParameters {
    /// Direction of line 1.
    pub d1: Vector3,
    /// Direction of line 2.
    pub d2: Vector3,
    /// Whether edits propagate without a manual trigger.
    pub auto_update: bool,
}

impl Default for LineParameters {
    fn default() -> Self {
        Self {
            d1: DVec3::from_array(DEFAULT_D1),
            d2: DVec3::from_array(DEFAULT_D2),
            auto_update: DEFAULT_AUTO_UPDATE,
        }
    }
}

impl LineParameters {
    /// Encodes as JSON.
    pub fn to_json(&self) -> SyncResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes from JSON.
    ///
    /// # Errors
    /// Returns [`crate::SyncError::ParameterJson`] on malformed input.
    pub fn from_json(json: &str) -> SyncResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Parameter store kept in memory.
#[derive(Debug, Default)]
pub struct InMemoryParameterStore {
    params: Cell<LineParameters>,
}

impl InMemoryParameterStore {
    /// Store seeded with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with `params`.
    pub fn with_parameters(params: LineParameters) -> Self {
        Self {
            params: Cell::new(params),
        }
    }

    /// Exports the current parameters as JSON.
    pub fn export_json(&self) -> SyncResult<String> {
        self.params.get().to_json()
    }

    /// Replaces the parameters from JSON. Leaves the store untouched on error.
    pub fn import_json(&self, json: &str) -> SyncResult<()> {
        let params = LineParameters::from_json(json)?;
        self.params.set(params);
        Ok(())
    }
}

impl ParameterStore for InMemoryParameterStore {
    fn parameters(&self) -> LineParameters {
        self.params.get()
    }

    fn set_parameters(&self, params: LineParameters) {
        self.params.set(params);
    }
}

// =============================================================================
// TESTS
// =============================================================================
