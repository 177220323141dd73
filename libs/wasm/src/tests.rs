//! Tests for the WASM-facing helpers.

use super::*;
use line_sync::SyncError;

/// Confirms the channel table matches the panel layout.
#[test]
fn slider_ranges_follow_channel_kind() {
    assert_eq!(slider_range_internal(2).unwrap(), vec![-100.0, 100.0, 0.1]);
    assert_eq!(slider_range_internal(11).unwrap(), vec![-1.0, 1.0, 0.01]);
    assert!(matches!(
        slider_range_internal(12),
        Err(SyncError::ChannelIndexOutOfRange(12))
    ));
}

/// A fresh app mirrors the default session.
#[test]
fn new_app_starts_at_origin() {
    let app = LineIntersectionApp::new();
    assert_eq!(app.control_points(), vec![0.0; 9]);
    assert_eq!(app.closest_point(), vec![0.0, 0.0, 0.0]);
    assert_eq!(app.label(), "(0.00, 0.00, 0.00)");
    assert!(!app.auto_update());

    let sliders = app.slider_values();
    assert_eq!(sliders.len(), slider_channel_count());
    assert_eq!(&sliders[6..], &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
}

/// Slider edits reach the control points.
#[test]
fn set_slider_moves_points() {
    let app = LineIntersectionApp::new();
    assert!(app.set_slider_internal(5, 1.0).unwrap());
    assert!(!app.set_slider_internal(5, 1.0).unwrap());

    let points = app.control_points();
    assert_eq!(&points[3..6], &[0.0, 0.0, 1.0]);
    assert_eq!(&points[6..9], &[0.0, 0.0, 0.5]);
    assert_eq!(app.label(), "(0.00, 0.00, 0.50)");
}

/// Point drags reach the sliders.
#[test]
fn drag_point_updates_sliders() {
    let app = LineIntersectionApp::new();
    app.drag_point_internal(0, 0.0, 0.0, 4.0).unwrap();

    assert_eq!(&app.slider_values()[0..3], &[0.0, 0.0, 4.0]);
    assert_eq!(app.closest_point(), vec![0.0, 0.0, 2.0]);
}

/// The computed point cannot be dragged.
#[test]
fn drag_point_rejects_p3() {
    let app = LineIntersectionApp::new();
    let err = app.drag_point_internal(2, 1.0, 1.0, 1.0).unwrap_err();
    assert!(matches!(err, SyncError::PointLocked { index: 2 }));
    assert!(app.drag_point_internal(3, 0.0, 0.0, 0.0).is_err());
}

/// Non-finite host input is rejected before it reaches the session.
#[test]
fn non_finite_input_rejected() {
    let app = LineIntersectionApp::new();
    assert!(app.set_slider_internal(0, f64::NAN).is_err());
    assert!(app.drag_point_internal(1, f64::INFINITY, 0.0, 0.0).is_err());
    assert_eq!(app.control_points(), vec![0.0; 9]);
}

/// Parameters survive a JSON round trip through the host.
#[test]
fn parameters_json_round_trip() {
    let source = LineIntersectionApp::new();
    source.set_slider_internal(7, -0.25).unwrap();
    source.set_auto_update(true);
    let json = source
        .session
        .params()
        .parameters()
        .to_json()
        .unwrap();

    let target = LineIntersectionApp::new();
    target.load_parameters_json_internal(&json).unwrap();
    assert!(target.auto_update());
    assert_eq!(target.slider_values()[7], -0.25);
}

/// Malformed JSON leaves the app untouched.
#[test]
fn load_parameters_rejects_malformed_json() {
    let app = LineIntersectionApp::new();
    let err = app.load_parameters_json_internal("{ not json").unwrap_err();
    assert!(matches!(err, SyncError::ParameterJson(_)));
    assert_eq!(&app.slider_values()[6..9], &[1.0, 0.0, 0.0]);
}

/// Manual recompute returns the current closest point.
#[test]
fn recompute_returns_closest_point() {
    let app = LineIntersectionApp::new();
    app.set_slider_internal(4, 3.0).unwrap();
    app.set_slider_internal(2, 2.0).unwrap();
    assert_eq!(app.recompute(), app.closest_point());
}

/// A direction too small to square falls back to the origin.
#[test]
fn tiny_loaded_direction_keeps_label_finite() {
    let app = LineIntersectionApp::new();
    app.set_slider_internal(5, 2.0).unwrap();
    assert_eq!(app.label(), "(0.00, 0.00, 1.00)");

    app.load_parameters_json_internal(r#"{"d1": [1e-200, 0.0, 0.0]}"#)
        .unwrap();

    assert!(app.closest_point().iter().all(|c| c.is_finite()));
    assert_eq!(app.label(), "(0.00, 0.00, 0.00)");
}
