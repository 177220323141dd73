//! WASM-facing entry points for the line intersection tool.
//!
//! A JavaScript host owns the widgets (sliders, draggable spheres) and
//! forwards user edits here. Every edit runs through the same session the
//! native tests use, so both surfaces and the computed point stay in step.
//! Native tests call the `_internal` helpers, which expose Rust error types
//! instead of `JsValue`.
//!
//! ```
//! use line_wasm::LineIntersectionApp;
//!
//! let app = LineIntersectionApp::new();
//! app.set_slider_internal(5, 1.0).unwrap(); // P2 Z
//! assert_eq!(app.closest_point(), vec![0.0, 0.0, 0.5]);
//! ```

use config::constants::{CONTROL_POINT_COUNT, SLIDER_CHANNEL_COUNT};
use glam::DVec3;
use line_sync::{
    ChannelId, ControlPoint, DefaultSession, LineParameters, NumericInput, ParameterStore,
    SpatialRepresentation, SyncError, SyncResult,
};
use wasm_bindgen::prelude::*;

/// Installs a panic hook that forwards Rust panics to the browser console.
///
/// # Examples
/// ```no_run
/// // In JavaScript: import and call once at startup.
/// // import { init_panic_hook } from "line_wasm";
/// // init_panic_hook();
/// ```
#[cfg(feature = "console_error_panic_hook")]
#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Number of slider channels the host must render.
///
/// # Examples
/// ```
/// assert_eq!(line_wasm::slider_channel_count(), 12);
/// ```
#[wasm_bindgen]
pub fn slider_channel_count() -> usize {
    SLIDER_CHANNEL_COUNT
}

/// Form label of slider `channel`, e.g. `"P1 X"`.
///
/// # Errors
/// Returns a JavaScript error for an unknown channel index.
#[wasm_bindgen]
pub fn slider_label(channel: usize) -> Result<String, JsValue> {
    ChannelId::from_index(channel)
        .map(|id| id.label().to_string())
        .map_err(to_js_error)
}

/// `[min, max, step]` of slider `channel`.
///
/// # Errors
/// Returns a JavaScript error for an unknown channel index.
#[wasm_bindgen]
pub fn slider_range(channel: usize) -> Result<Vec<f64>, JsValue> {
    slider_range_internal(channel).map_err(to_js_error)
}

/// Host-only helper behind [`slider_range`].
///
/// # Examples
/// ```
/// assert_eq!(line_wasm::slider_range_internal(0).unwrap(), vec![-100.0, 100.0, 0.1]);
/// ```
pub fn slider_range_internal(channel: usize) -> SyncResult<Vec<f64>> {
    let kind = ChannelId::from_index(channel)?.kind();
    let (min, max) = kind.domain();
    Ok(vec![min, max, kind.step()])
}

/// The line intersection tool as seen from JavaScript.
///
/// # Examples
/// ```no_run
/// // In JavaScript:
/// // const app = new LineIntersectionApp();
/// // slider.oninput = () => app.set_slider(channel, slider.valueAsNumber);
/// // sphere.ondrag = (p) => app.drag_point(0, p.x, p.y, p.z);
/// // label.textContent = app.label();
/// ```
#[wasm_bindgen]
pub struct LineIntersectionApp {
    session: DefaultSession,
}

impl Default for LineIntersectionApp {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl LineIntersectionApp {
    /// Creates the tool with default parameters and every point at the origin.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            session: DefaultSession::with_defaults(),
        }
    }

    /// Sets slider `channel` (0..12). Returns whether the value changed.
    ///
    /// # Errors
    /// Returns a JavaScript error for an unknown channel or a non-finite value.
    pub fn set_slider(&self, channel: usize, value: f64) -> Result<bool, JsValue> {
        self.set_slider_internal(channel, value).map_err(to_js_error)
    }

    /// Drags control point `index` (0 = P1, 1 = P2) to `(x, y, z)`.
    ///
    /// # Errors
    /// Returns a JavaScript error for P3, an unknown index or non-finite input.
    pub fn drag_point(&self, index: usize, x: f64, y: f64, z: f64) -> Result<(), JsValue> {
        self.drag_point_internal(index, x, y, z).map_err(to_js_error)
    }

    /// Replaces the parameters from JSON.
    ///
    /// # Errors
    /// Returns a JavaScript error when the JSON is malformed.
    pub fn load_parameters_json(&self, json: &str) -> Result<(), JsValue> {
        self.load_parameters_json_internal(json).map_err(to_js_error)
    }

    /// Current parameters as JSON.
    ///
    /// # Errors
    /// Returns a JavaScript error if encoding fails.
    pub fn parameters_json(&self) -> Result<String, JsValue> {
        self.session
            .params()
            .parameters()
            .to_json()
            .map_err(to_js_error)
    }

    /// Computed closest point as `[x, y, z]`.
    pub fn closest_point(&self) -> Vec<f64> {
        self.session.closest_point().to_array().to_vec()
    }

    /// P1, P2 and P3 as `[x1, y1, z1, x2, ...]`.
    pub fn control_points(&self) -> Vec<f64> {
        let mut flat = Vec::with_capacity(CONTROL_POINT_COUNT * 3);
        for point in ControlPoint::ALL {
            flat.extend_from_slice(&self.session.points().point(point).to_array());
        }
        flat
    }

    /// Every slider value in channel order.
    pub fn slider_values(&self) -> Vec<f64> {
        self.session.sliders().values().to_channels().to_vec()
    }

    /// Text of the output label.
    pub fn label(&self) -> String {
        self.session.display().text()
    }

    /// Auto-update flag.
    pub fn auto_update(&self) -> bool {
        self.session.params().auto_update()
    }

    /// Stores the auto-update flag.
    pub fn set_auto_update(&self, auto_update: bool) {
        self.session.controller().set_auto_update(auto_update);
    }

    /// Manual trigger. Returns the closest point.
    pub fn recompute(&self) -> Vec<f64> {
        self.session.recompute();
        self.closest_point()
    }
}

impl LineIntersectionApp {
    /// Host-only helper behind [`LineIntersectionApp::set_slider`].
    pub fn set_slider_internal(&self, channel: usize, value: f64) -> SyncResult<bool> {
        let id = ChannelId::from_index(channel)?;
        self.session.sliders().set_value(id, value)
    }

    /// Host-only helper behind [`LineIntersectionApp::drag_point`].
    pub fn drag_point_internal(&self, index: usize, x: f64, y: f64, z: f64) -> SyncResult<()> {
        self.session
            .points()
            .user_move_point(index, DVec3::new(x, y, z))
    }

    /// Host-only helper behind [`LineIntersectionApp::load_parameters_json`].
    pub fn load_parameters_json_internal(&self, json: &str) -> SyncResult<()> {
        let loaded = LineParameters::from_json(json)?;
        self.session.load_parameters(loaded);
        Ok(())
    }
}

fn to_js_error(err: SyncError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[cfg(test)]
mod tests;
