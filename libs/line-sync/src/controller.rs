//! # Sync Controller
//!
//! Mediates change events from the slider surface and the spatial surface.
//!
//! ## State Machine
//!
//! ```text
//!            event                     write-back done / unwind
//!   Idle ─────────────> Propagating ──────────────────────────> Idle
//!                          │  ^
//!                          └──┘ events while propagating are suppressed
//! ```
//!
//! Writing the result into a surface synchronously fires that surface's own
//! change notification. Those nested notifications arrive while the phase is
//! `Propagating` and are dropped. The phase is reset by a drop guard, so an
//! early return or a panic inside a collaborator cannot leave it stuck.

use std::cell::{Cell, RefCell};

use line_geometry::Point3;

use crate::collaborators::{NumericInput, ParameterStore, ResultDisplay, SpatialRepresentation};
use crate::markups::ControlPoint;
use crate::state::{LineIntersectionState, SliderValues};

/// Re-entrancy state of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    /// Ready for the next external event.
    Idle,
    /// A propagation cycle is writing to the surfaces.
    Propagating,
}

/// Which surface drove a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOrigin {
    /// The numeric slider surface.
    Sliders,
    /// The spatial control points.
    Spatial,
}

/// An external change event with the authoritative values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SyncEvent {
    /// Slider values changed; every channel is authoritative.
    SlidersChanged(SliderValues),
    /// P1 or P2 was moved in space.
    SpatialPointsChanged {
        /// New position of P1.
        p1: Point3,
        /// New position of P2.
        p2: Point3,
    },
}

impl SyncEvent {
    /// Surface that produced the event.
    pub fn origin(&self) -> SyncOrigin {
        match self {
            SyncEvent::SlidersChanged(_) => SyncOrigin::Sliders,
            SyncEvent::SpatialPointsChanged { .. } => SyncOrigin::Spatial,
        }
    }
}

/// Result of handling one event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SyncOutcome {
    /// A full cycle ran and produced `p3`.
    Propagated {
        /// The recomputed closest point.
        p3: Point3,
    },
    /// The event arrived during a cycle and was ignored.
    Suppressed,
}

/// Resets the phase to `Idle` when dropped.
struct PropagationGuard<'a> {
    phase: &'a Cell<SyncPhase>,
}

impl<'a> PropagationGuard<'a> {
    fn enter(phase: &'a Cell<SyncPhase>) -> Option<Self> {
        match phase.get() {
            SyncPhase::Propagating => None,
            SyncPhase::Idle => {
                phase.set(SyncPhase::Propagating);
                Some(Self { phase })
            }
        }
    }
}

impl Drop for PropagationGuard<'_> {
    fn drop(&mut self) {
        self.phase.set(SyncPhase::Idle);
    }
}

/// Keeps sliders, control points and the closest point consistent.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use line_sync::{
///     ControlPoint, InMemoryParameterStore, IntersectionLabel, MarkupPoints, SliderPanel,
///     SpatialRepresentation, SyncController, SyncEvent, SyncOutcome, SliderValues,
/// };
///
/// let controller = SyncController::new(
///     MarkupPoints::new(),
///     SliderPanel::new(),
///     InMemoryParameterStore::new(),
///     IntersectionLabel::new(),
/// );
///
/// let outcome = controller.handle(SyncEvent::SlidersChanged(SliderValues {
///     p1: DVec3::ZERO,
///     p2: DVec3::Z,
///     d1: DVec3::X,
///     d2: DVec3::Y,
/// }));
/// assert_eq!(outcome, SyncOutcome::Propagated { p3: DVec3::new(0.0, 0.0, 0.5) });
/// assert_eq!(controller.spatial().point(ControlPoint::P2), DVec3::Z);
/// ```
#[derive(Debug)]
pub struct SyncController<S, N, P, D> {
    spatial: S,
    inputs: N,
    params: P,
    display: D,
    state: RefCell<LineIntersectionState>,
    phase: Cell<SyncPhase>,
    propagations: Cell<u64>,
    suppressed: Cell<u64>,
}

impl<S, N, P, D> SyncController<S, N, P, D>
where
    S: SpatialRepresentation,
    N: NumericInput,
    P: ParameterStore,
    D: ResultDisplay,
{
    /// Creates an idle controller.
    ///
    /// The internal state is seeded from the current control points and the
    /// stored parameters. Nothing is written to the surfaces until the first
    /// event.
    pub fn new(spatial: S, inputs: N, params: P, display: D) -> Self {
        let mut state = LineIntersectionState::default();
        state.apply_parameters(&params.parameters());
        state.set_points(spatial.point(ControlPoint::P1), spatial.point(ControlPoint::P2));
        Self {
            spatial,
            inputs,
            params,
            display,
            state: RefCell::new(state),
            phase: Cell::new(SyncPhase::Idle),
            propagations: Cell::new(0),
            suppressed: Cell::new(0),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> SyncPhase {
        self.phase.get()
    }

    /// Snapshot of the source-of-truth state.
    pub fn state(&self) -> LineIntersectionState {
        *self.state.borrow()
    }

    /// Number of completed or in-flight propagation cycles.
    pub fn propagation_count(&self) -> u64 {
        self.propagations.get()
    }

    /// Number of events dropped by the re-entrancy guard.
    pub fn suppressed_count(&self) -> u64 {
        self.suppressed.get()
    }

    /// Spatial surface.
    pub fn spatial(&self) -> &S {
        &self.spatial
    }

    /// Numeric surface.
    pub fn inputs(&self) -> &N {
        &self.inputs
    }

    /// Parameter store.
    pub fn params(&self) -> &P {
        &self.params
    }

    /// Output display.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Slider surface notification: re-reads every channel and propagates.
    pub fn on_sliders_changed(&self) -> SyncOutcome {
        if self.phase.get() == SyncPhase::Propagating {
            return self.suppress(SyncOrigin::Sliders);
        }
        self.handle(SyncEvent::SlidersChanged(self.inputs.values()))
    }

    /// Spatial surface notification: re-reads P1 and P2 and propagates.
    pub fn on_spatial_points_changed(&self) -> SyncOutcome {
        if self.phase.get() == SyncPhase::Propagating {
            return self.suppress(SyncOrigin::Spatial);
        }
        self.handle(SyncEvent::SpatialPointsChanged {
            p1: self.spatial.point(ControlPoint::P1),
            p2: self.spatial.point(ControlPoint::P2),
        })
    }

    /// Manual trigger: propagates from the current slider values.
    pub fn recompute(&self) -> SyncOutcome {
        self.on_sliders_changed()
    }

    /// Stores the auto-update flag. No propagation happens.
    pub fn set_auto_update(&self, auto_update: bool) {
        self.params.set_auto_update(auto_update);
        self.state.borrow_mut().set_auto_update(auto_update);
    }

    /// Handles one event.
    ///
    /// From `Idle`: applies the event to the state, recomputes P3, writes the
    /// other surface and P3, updates the display, returns to `Idle`.
    /// From `Propagating`: ignores the event.
    pub fn handle(&self, event: SyncEvent) -> SyncOutcome {
        let Some(_guard) = PropagationGuard::enter(&self.phase) else {
            return self.suppress(event.origin());
        };
        self.propagate(event)
    }

    /// Writes `values` into the slider surface and propagates once.
    ///
    /// The write happens inside the cycle, so the per-channel notifications
    /// it fires are suppressed and no partially applied values are
    /// published. Propagation reads the values back from the surface, so
    /// any clamping it applies is kept.
    pub fn apply_slider_values(&self, values: &SliderValues) -> SyncOutcome {
        let Some(_guard) = PropagationGuard::enter(&self.phase) else {
            return self.suppress(SyncOrigin::Sliders);
        };
        self.inputs.set_values(values);
        self.propagate(SyncEvent::SlidersChanged(self.inputs.values()))
    }

    /// Runs one cycle. The caller holds the guard.
    fn propagate(&self, event: SyncEvent) -> SyncOutcome {
        let origin = event.origin();
        self.propagations.set(self.propagations.get() + 1);
        tracing::debug!(?origin, "propagation started");

        let state = match event {
            SyncEvent::SlidersChanged(values) => {
                self.params.set_d1(values.d1);
                self.params.set_d2(values.d2);
                let auto_update = self.params.auto_update();
                let state = self.update_state(|state| {
                    state.apply_sliders(&values);
                    state.set_auto_update(auto_update);
                });
                self.spatial.set_points(&state.full_batch());
                state
            }
            SyncEvent::SpatialPointsChanged { p1, p2 } => {
                let params = self.params.parameters();
                let state = self.update_state(|state| {
                    state.apply_parameters(&params);
                    state.set_points(p1, p2);
                });
                self.inputs.set_values(&state.slider_values());
                self.spatial.set_points(&state.result_batch());
                state
            }
        };

        let p3 = state.p3();
        self.display.show_closest_point(p3);
        tracing::debug!(?origin, ?p3, "propagation finished");
        SyncOutcome::Propagated { p3 }
    }

    fn update_state(&self, apply: impl FnOnce(&mut LineIntersectionState)) -> LineIntersectionState {
        let mut state = self.state.borrow_mut();
        apply(&mut state);
        *state
    }

    fn suppress(&self, origin: SyncOrigin) -> SyncOutcome {
        self.suppressed.set(self.suppressed.get() + 1);
        tracing::trace!(?origin, "suppressed re-entrant change notification");
        SyncOutcome::Suppressed
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::IntersectionLabel;
    use crate::markups::PointBatch;
    use crate::params::InMemoryParameterStore;
    use crate::sliders::SliderPanel;
    use glam::DVec3;
    use std::panic::{self, AssertUnwindSafe};
    use std::rc::Rc;

    type Hook = Rc<dyn Fn()>;

    /// Spatial surface that runs a hook on every write, standing in for a
    /// scene observer firing during the write-back.
    #[derive(Default)]
    struct HookedSpatial {
        points: RefCell<[Point3; 3]>,
        writes: Cell<u32>,
        hook: RefCell<Option<Hook>>,
        fail: Cell<bool>,
    }

    impl SpatialRepresentation for HookedSpatial {
        fn point(&self, point: ControlPoint) -> Point3 {
            self.points.borrow()[point.index()]
        }

        fn set_points(&self, batch: &PointBatch) {
            if self.fail.get() {
                panic!("scene rejected write");
            }
            for (point, position) in batch.iter() {
                self.points.borrow_mut()[point.index()] = position;
            }
            self.writes.set(self.writes.get() + 1);
            let hook = self.hook.borrow().clone();
            if let Some(hook) = hook {
                hook();
            }
        }
    }

    type TestController =
        SyncController<Rc<HookedSpatial>, SliderPanel, InMemoryParameterStore, IntersectionLabel>;

    fn controller() -> (Rc<TestController>, Rc<HookedSpatial>) {
        let spatial = Rc::new(HookedSpatial::default());
        let controller = Rc::new(SyncController::new(
            Rc::clone(&spatial),
            SliderPanel::new(),
            InMemoryParameterStore::new(),
            IntersectionLabel::new(),
        ));
        (controller, spatial)
    }

    fn skew_values() -> SliderValues {
        SliderValues {
            p1: DVec3::ZERO,
            p2: DVec3::Z,
            d1: DVec3::X,
            d2: DVec3::Y,
        }
    }

    #[test]
    fn test_new_is_idle_and_silent() {
        let (controller, spatial) = controller();
        assert_eq!(controller.phase(), SyncPhase::Idle);
        assert_eq!(controller.propagation_count(), 0);
        assert_eq!(spatial.writes.get(), 0);
        assert_eq!(controller.display().text(), "");
    }

    #[test]
    fn test_sliders_event_writes_points_and_params() {
        let (controller, spatial) = controller();
        let mut values = skew_values();
        values.d2 = DVec3::new(0.0, 0.5, 0.0);

        controller.handle(SyncEvent::SlidersChanged(values));

        assert_eq!(spatial.point(ControlPoint::P1), DVec3::ZERO);
        assert_eq!(spatial.point(ControlPoint::P2), DVec3::Z);
        assert_eq!(spatial.point(ControlPoint::P3), DVec3::new(0.0, 0.0, 0.5));
        assert_eq!(spatial.writes.get(), 1);
        assert_eq!(controller.params().d2(), DVec3::new(0.0, 0.5, 0.0));
        assert_eq!(controller.display().text(), "(0.00, 0.00, 0.50)");
        assert_eq!(controller.phase(), SyncPhase::Idle);
    }

    #[test]
    fn test_spatial_event_writes_sliders_and_p3_only() {
        let (controller, spatial) = controller();
        let outcome = controller.handle(SyncEvent::SpatialPointsChanged {
            p1: DVec3::new(0.0, 0.0, 2.0),
            p2: DVec3::ZERO,
        });

        assert_eq!(outcome, SyncOutcome::Propagated { p3: DVec3::new(0.0, 0.0, 1.0) });
        assert_eq!(controller.inputs().values().p1, DVec3::new(0.0, 0.0, 2.0));
        // P1 and P2 are left to the surface that reported them
        assert_eq!(spatial.point(ControlPoint::P1), DVec3::ZERO);
        assert_eq!(spatial.point(ControlPoint::P3), DVec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_spatial_event_uses_stored_directions() {
        let (controller, _spatial) = controller();
        controller.params().set_d1(DVec3::ZERO);
        let outcome = controller.handle(SyncEvent::SpatialPointsChanged {
            p1: DVec3::ONE,
            p2: DVec3::NEG_ONE,
        });
        assert_eq!(outcome, SyncOutcome::Propagated { p3: DVec3::ZERO });
        assert_eq!(controller.state().d1(), DVec3::ZERO);
    }

    #[test]
    fn test_reentrant_spatial_event_is_suppressed() {
        let (controller, spatial) = controller();
        let weak = Rc::downgrade(&controller);
        let nested = Rc::new(RefCell::new(Vec::new()));
        let record = Rc::clone(&nested);
        *spatial.hook.borrow_mut() = Some(Rc::new(move || {
            if let Some(controller) = weak.upgrade() {
                record.borrow_mut().push(controller.on_spatial_points_changed());
            }
        }));

        controller.handle(SyncEvent::SlidersChanged(skew_values()));

        assert_eq!(*nested.borrow(), vec![SyncOutcome::Suppressed]);
        assert_eq!(controller.propagation_count(), 1);
        assert_eq!(controller.suppressed_count(), 1);
        assert_eq!(spatial.writes.get(), 1);
        assert_eq!(controller.phase(), SyncPhase::Idle);
    }

    #[test]
    fn test_payload_event_also_suppressed_while_propagating() {
        let (controller, spatial) = controller();
        let weak = Rc::downgrade(&controller);
        *spatial.hook.borrow_mut() = Some(Rc::new(move || {
            if let Some(controller) = weak.upgrade() {
                let outcome = controller.handle(SyncEvent::SpatialPointsChanged {
                    p1: DVec3::splat(50.0),
                    p2: DVec3::splat(-50.0),
                });
                assert_eq!(outcome, SyncOutcome::Suppressed);
            }
        }));

        controller.handle(SyncEvent::SlidersChanged(skew_values()));
        assert_eq!(controller.state().p1(), DVec3::ZERO);
    }

    #[test]
    fn test_idempotent_sliders_event() {
        let (controller, spatial) = controller();
        controller.handle(SyncEvent::SlidersChanged(skew_values()));
        let before = controller.state();
        let points_before = ControlPoint::ALL.map(|point| spatial.point(point));

        controller.handle(SyncEvent::SlidersChanged(skew_values()));

        assert_eq!(controller.state(), before);
        assert_eq!(ControlPoint::ALL.map(|point| spatial.point(point)), points_before);
        assert_eq!(controller.propagation_count(), 2);
    }

    #[test]
    fn test_apply_slider_values_is_one_cycle() {
        let (controller, spatial) = controller();
        let mut values = skew_values();
        values.d1 = DVec3::new(4.0, 0.0, 0.0);

        let outcome = controller.apply_slider_values(&values);

        assert_eq!(outcome, SyncOutcome::Propagated { p3: DVec3::new(0.0, 0.0, 0.5) });
        assert_eq!(controller.propagation_count(), 1);
        assert_eq!(spatial.writes.get(), 1);
        assert_eq!(controller.display().update_count(), 1);
        // Clamped by the panel, then read back
        assert_eq!(controller.inputs().values().d1, DVec3::X);
        assert_eq!(controller.params().d1(), DVec3::X);
        assert_eq!(controller.phase(), SyncPhase::Idle);
    }

    #[test]
    fn test_apply_slider_values_suppressed_while_propagating() {
        let (controller, spatial) = controller();
        let weak = Rc::downgrade(&controller);
        let nested = Rc::new(RefCell::new(Vec::new()));
        let record = Rc::clone(&nested);
        *spatial.hook.borrow_mut() = Some(Rc::new(move || {
            if let Some(controller) = weak.upgrade() {
                let mut values = skew_values();
                values.p2 = DVec3::new(0.0, 0.0, 9.0);
                record.borrow_mut().push(controller.apply_slider_values(&values));
            }
        }));

        controller.handle(SyncEvent::SlidersChanged(skew_values()));

        assert_eq!(*nested.borrow(), vec![SyncOutcome::Suppressed]);
        assert_eq!(controller.inputs().values().p2, DVec3::ZERO);
        assert_eq!(controller.propagation_count(), 1);
    }

    #[test]
    fn test_panic_in_collaborator_resets_phase() {
        let (controller, spatial) = controller();
        spatial.fail.set(true);

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            controller.handle(SyncEvent::SlidersChanged(skew_values()))
        }));
        assert!(result.is_err());
        assert_eq!(controller.phase(), SyncPhase::Idle);

        spatial.fail.set(false);
        let outcome = controller.handle(SyncEvent::SlidersChanged(skew_values()));
        assert!(matches!(outcome, SyncOutcome::Propagated { .. }));
    }

    #[test]
    fn test_set_auto_update_does_not_propagate() {
        let (controller, spatial) = controller();
        controller.set_auto_update(true);
        assert!(controller.params().auto_update());
        assert!(controller.state().auto_update());
        assert_eq!(controller.propagation_count(), 0);
        assert_eq!(spatial.writes.get(), 0);
    }

    #[test]
    fn test_recompute_reads_sliders() {
        let (controller, spatial) = controller();
        controller.inputs().set_values(&skew_values());
        controller.recompute();
        assert_eq!(spatial.point(ControlPoint::P3), DVec3::new(0.0, 0.0, 0.5));
    }
}
