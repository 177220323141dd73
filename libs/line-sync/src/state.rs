//! # Line Intersection State
//!
//! The single source of truth for both input surfaces. Slider values and
//! control point positions are projections of this state; `p3` is derived
//! and recomputed on every change, never patched.

use config::constants::{DEFAULT_AUTO_UPDATE, DEFAULT_D1, DEFAULT_D2, SLIDER_CHANNEL_COUNT};
use glam::DVec3;
use line_geometry::{Line, Point3, Vector3};

use crate::markups::{ControlPoint, PointBatch};
use crate::params::LineParameters;

/// The numeric-surface projection: twelve scalars grouped as four vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderValues {
    /// P1 X/Y/Z channels.
    pub p1: Point3,
    /// P2 X/Y/Z channels.
    pub p2: Point3,
    /// d1 X/Y/Z channels.
    pub d1: Vector3,
    /// d2 X/Y/Z channels.
    pub d2: Vector3,
}

impl SliderValues {
    /// Builds the projection from channel order `P1, P2, d1, d2`.
    pub fn from_channels(channels: &[f64; SLIDER_CHANNEL_COUNT]) -> Self {
        let vec = |i: usize| DVec3::new(channels[i], channels[i + 1], channels[i + 2]);
        Self {
            p1: vec(0),
            p2: vec(3),
            d1: vec(6),
            d2: vec(9),
        }
    }

    /// Flattens into channel order `P1, P2, d1, d2`.
    pub fn to_channels(&self) -> [f64; SLIDER_CHANNEL_COUNT] {
        let mut channels = [0.0; SLIDER_CHANNEL_COUNT];
        for (chunk, v) in channels
            .chunks_exact_mut(3)
            .zip([self.p1, self.p2, self.d1, self.d2])
        {
            chunk.copy_from_slice(&v.to_array());
        }
        channels
    }
}

/// Full addressable state of the two lines.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use line_sync::LineIntersectionState;
///
/// let mut state = LineIntersectionState::default();
/// state.set_points(DVec3::ZERO, DVec3::Z);
/// assert_eq!(state.p3(), DVec3::new(0.0, 0.0, 0.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineIntersectionState {
    p1: Point3,
    p2: Point3,
    d1: Vector3,
    d2: Vector3,
    p3: Point3,
    auto_update: bool,
}

impl Default for LineIntersectionState {
    fn default() -> Self {
        Self::new(
            DVec3::ZERO,
            DVec3::from_array(DEFAULT_D1),
            DVec3::ZERO,
            DVec3::from_array(DEFAULT_D2),
            DEFAULT_AUTO_UPDATE,
        )
    }
}

impl LineIntersectionState {
    /// Creates a state and computes its closest point.
    pub fn new(p1: Point3, d1: Vector3, p2: Point3, d2: Vector3, auto_update: bool) -> Self {
        let mut state = Self {
            p1,
            p2,
            d1,
            d2,
            p3: DVec3::ZERO,
            auto_update,
        };
        state.recompute();
        state
    }

    /// Position of the point defining line 1.
    pub fn p1(&self) -> Point3 {
        self.p1
    }

    /// Position of the point defining line 2.
    pub fn p2(&self) -> Point3 {
        self.p2
    }

    /// Direction of line 1.
    pub fn d1(&self) -> Vector3 {
        self.d1
    }

    /// Direction of line 2.
    pub fn d2(&self) -> Vector3 {
        self.d2
    }

    /// Closest point between the two lines.
    pub fn p3(&self) -> Point3 {
        self.p3
    }

    /// Persisted auto-update flag.
    pub fn auto_update(&self) -> bool {
        self.auto_update
    }

    /// Stores the auto-update flag. Does not affect P3.
    pub fn set_auto_update(&mut self, auto_update: bool) {
        self.auto_update = auto_update;
    }

    /// Line through P1 along d1.
    pub fn first_line(&self) -> Line {
        Line::new(self.p1, self.d1)
    }

    /// Line through P2 along d2.
    pub fn second_line(&self) -> Line {
        Line::new(self.p2, self.d2)
    }

    /// Moves both defining points.
    pub fn set_points(&mut self, p1: Point3, p2: Point3) {
        self.p1 = p1;
        self.p2 = p2;
        self.recompute();
    }

    /// Replaces both directions.
    pub fn set_directions(&mut self, d1: Vector3, d2: Vector3) {
        self.d1 = d1;
        self.d2 = d2;
        self.recompute();
    }

    /// Applies every slider channel at once.
    pub fn apply_sliders(&mut self, values: &SliderValues) {
        self.p1 = values.p1;
        self.p2 = values.p2;
        self.d1 = values.d1;
        self.d2 = values.d2;
        self.recompute();
    }

    /// Applies the persisted parameters.
    pub fn apply_parameters(&mut self, params: &LineParameters) {
        self.auto_update = params.auto_update;
        self.set_directions(params.d1, params.d2);
    }

    /// Projection onto the slider surface.
    pub fn slider_values(&self) -> SliderValues {
        SliderValues {
            p1: self.p1,
            p2: self.p2,
            d1: self.d1,
            d2: self.d2,
        }
    }

    /// Projection onto the spatial surface, indexed by control point.
    pub fn control_points(&self) -> [Point3; 3] {
        [self.p1, self.p2, self.p3]
    }

    /// Batch writing P1, P2 and P3.
    pub fn full_batch(&self) -> PointBatch {
        PointBatch::new()
            .with(ControlPoint::P1, self.p1)
            .with(ControlPoint::P2, self.p2)
            .with(ControlPoint::P3, self.p3)
    }

    /// Batch writing P3 only.
    pub fn result_batch(&self) -> PointBatch {
        PointBatch::new().with(ControlPoint::P3, self.p3)
    }

    fn recompute(&mut self) {
        self.p3 = self.first_line().closest_point(&self.second_line());
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seeds_origin_and_default_directions() {
        let state = LineIntersectionState::default();
        assert_eq!(state.p1(), DVec3::ZERO);
        assert_eq!(state.p2(), DVec3::ZERO);
        assert_eq!(state.d1(), DVec3::X);
        assert_eq!(state.d2(), DVec3::Y);
        assert_eq!(state.p3(), DVec3::ZERO);
        assert!(!state.auto_update());
    }

    #[test]
    fn test_p3_follows_every_setter() {
        let mut state = LineIntersectionState::default();
        state.set_points(DVec3::ZERO, DVec3::new(0.0, 0.0, 4.0));
        assert_eq!(state.p3(), DVec3::new(0.0, 0.0, 2.0));

        state.set_directions(DVec3::ZERO, DVec3::Y);
        assert_eq!(state.p3(), DVec3::ZERO);
    }

    #[test]
    fn test_apply_parameters_keeps_points() {
        let mut state = LineIntersectionState::default();
        state.set_points(DVec3::new(1.0, 0.0, 0.0), DVec3::new(0.0, 1.0, 0.0));
        state.apply_parameters(&LineParameters {
            d1: DVec3::Y,
            d2: DVec3::X,
            auto_update: true,
        });
        assert_eq!(state.p1(), DVec3::new(1.0, 0.0, 0.0));
        assert_eq!(state.d1(), DVec3::Y);
        assert!(state.auto_update());
        assert_eq!(state.p3(), DVec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_slider_projection_round_trip() {
        let state = LineIntersectionState::new(
            DVec3::new(1.0, 2.0, 3.0),
            DVec3::new(0.1, 0.2, 0.3),
            DVec3::new(4.0, 5.0, 6.0),
            DVec3::new(0.4, 0.5, 0.6),
            false,
        );
        let channels = state.slider_values().to_channels();
        assert_eq!(
            channels,
            [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6]
        );
        assert_eq!(SliderValues::from_channels(&channels), state.slider_values());
    }

    #[test]
    fn test_batches() {
        let mut state = LineIntersectionState::default();
        state.set_points(DVec3::ONE, DVec3::NEG_ONE);
        let full = state.full_batch();
        assert_eq!(full.get(ControlPoint::P1), Some(DVec3::ONE));
        assert_eq!(full.get(ControlPoint::P3), Some(state.p3()));

        let result = state.result_batch();
        assert_eq!(result.get(ControlPoint::P1), None);
        assert_eq!(result.get(ControlPoint::P3), Some(state.p3()));
    }
}
