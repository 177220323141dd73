//! # Session Wiring
//!
//! Connects the surfaces to a [`SyncController`]: seeds the sliders,
//! registers change observers on both surfaces, runs the initial
//! synchronization and detaches the observers on cleanup.

use std::rc::Rc;

use line_geometry::Point3;

use crate::collaborators::{
    ChangeNotifier, NumericInput, ParameterStore, ResultDisplay, SpatialRepresentation,
};
use crate::controller::{SyncController, SyncOutcome};
use crate::display::IntersectionLabel;
use crate::markups::{ControlPoint, MarkupPoints};
use crate::observer::ObserverId;
use crate::params::{InMemoryParameterStore, LineParameters};
use crate::sliders::SliderPanel;
use crate::state::{LineIntersectionState, SliderValues};

/// Controller over shared surface handles.
pub type SharedController<S, N, P, D> = SyncController<Rc<S>, Rc<N>, Rc<P>, Rc<D>>;

/// Session built from the in-memory reference adapters.
pub type DefaultSession =
    LineIntersectionSession<MarkupPoints, SliderPanel, InMemoryParameterStore, IntersectionLabel>;

/// A live pairing of both surfaces with a controller.
pub struct LineIntersectionSession<S, N, P, D>
where
    S: SpatialRepresentation + ChangeNotifier + 'static,
    N: NumericInput + ChangeNotifier + 'static,
    P: ParameterStore + 'static,
    D: ResultDisplay + 'static,
{
    controller: Rc<SharedController<S, N, P, D>>,
    points: Rc<S>,
    sliders: Rc<N>,
    params: Rc<P>,
    display: Rc<D>,
    observers: Option<(ObserverId, ObserverId)>,
}

impl DefaultSession {
    /// Session over fresh reference adapters with default parameters.
    pub fn with_defaults() -> Self {
        Self::new(
            Rc::new(MarkupPoints::new()),
            Rc::new(SliderPanel::new()),
            Rc::new(InMemoryParameterStore::new()),
            Rc::new(IntersectionLabel::new()),
        )
    }
}

impl<S, N, P, D> LineIntersectionSession<S, N, P, D>
where
    S: SpatialRepresentation + ChangeNotifier + 'static,
    N: NumericInput + ChangeNotifier + 'static,
    P: ParameterStore + 'static,
    D: ResultDisplay + 'static,
{
    /// Wires the surfaces and runs the initial synchronization.
    ///
    /// Point sliders are seeded from the current control points and
    /// direction sliders from the parameter store, before any observer is
    /// attached, so seeding does not trigger propagation.
    pub fn new(points: Rc<S>, sliders: Rc<N>, params: Rc<P>, display: Rc<D>) -> Self {
        let stored = params.parameters();
        sliders.set_values(&SliderValues {
            p1: points.point(ControlPoint::P1),
            p2: points.point(ControlPoint::P2),
            d1: stored.d1,
            d2: stored.d2,
        });

        let controller = Rc::new(SyncController::new(
            Rc::clone(&points),
            Rc::clone(&sliders),
            Rc::clone(&params),
            Rc::clone(&display),
        ));

        let weak = Rc::downgrade(&controller);
        let spatial_id = points.add_observer(Rc::new(move || {
            if let Some(controller) = weak.upgrade() {
                controller.on_spatial_points_changed();
            }
        }));
        let weak = Rc::downgrade(&controller);
        let slider_id = sliders.add_observer(Rc::new(move || {
            if let Some(controller) = weak.upgrade() {
                controller.on_sliders_changed();
            }
        }));

        controller.on_sliders_changed();
        tracing::debug!(p3 = ?controller.state().p3(), "line intersection session ready");

        Self {
            controller,
            points,
            sliders,
            params,
            display,
            observers: Some((spatial_id, slider_id)),
        }
    }

    /// The controller.
    pub fn controller(&self) -> &SharedController<S, N, P, D> {
        &self.controller
    }

    /// Spatial surface.
    pub fn points(&self) -> &S {
        &self.points
    }

    /// Numeric surface.
    pub fn sliders(&self) -> &N {
        &self.sliders
    }

    /// Parameter store.
    pub fn params(&self) -> &P {
        &self.params
    }

    /// Output display.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Snapshot of the controller state.
    pub fn state(&self) -> LineIntersectionState {
        self.controller.state()
    }

    /// Current closest point.
    pub fn closest_point(&self) -> Point3 {
        self.controller.state().p3()
    }

    /// Manual trigger.
    pub fn recompute(&self) -> SyncOutcome {
        self.controller.recompute()
    }

    /// Applies externally loaded parameters through the slider surface.
    ///
    /// Directions go through the sliders, so they saturate at the slider
    /// domain like any other edit. All channels are written inside a single
    /// cycle, which then publishes one consistent result to the store, the
    /// sliders, the control points and the display.
    pub fn load_parameters(&self, loaded: LineParameters) -> SyncOutcome {
        self.controller.set_auto_update(loaded.auto_update);
        let current = self.sliders.values();
        self.controller.apply_slider_values(&SliderValues {
            d1: loaded.d1,
            d2: loaded.d2,
            ..current
        })
    }

    /// Whether the observers are still attached.
    pub fn is_attached(&self) -> bool {
        self.observers.is_some()
    }

    /// Detaches both observers. Safe to call more than once.
    pub fn cleanup(&mut self) {
        if let Some((spatial_id, slider_id)) = self.observers.take() {
            self.points.remove_observer(spatial_id);
            self.sliders.remove_observer(slider_id);
            tracing::debug!("line intersection session detached");
        }
    }
}

impl<S, N, P, D> Drop for LineIntersectionSession<S, N, P, D>
where
    S: SpatialRepresentation + ChangeNotifier + 'static,
    N: NumericInput + ChangeNotifier + 'static,
    P: ParameterStore + 'static,
    D: ResultDisplay + 'static,
{
    fn drop(&mut self) {
        self.cleanup();
    }
}
