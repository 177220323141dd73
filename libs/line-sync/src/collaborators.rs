//! # Collaborator Interfaces
//!
//! The controller never touches a UI toolkit or scene graph directly. Hosts
//! implement these traits; the crate ships in-memory reference adapters.
//!
//! All methods take `&self`: surfaces are shared between the host and the
//! controller and notify synchronously, so implementations keep their state
//! behind `Cell`/`RefCell` and never hold a borrow across a notification.

use std::rc::Rc;

use line_geometry::{Point3, Vector3};

use crate::markups::{ControlPoint, PointBatch};
use crate::observer::{Observer, ObserverId};
use crate::params::LineParameters;
use crate::state::SliderValues;

/// Spatial surface holding the three control points.
pub trait SpatialRepresentation {
    /// Current position of `point`.
    fn point(&self, point: ControlPoint) -> Point3;

    /// Writes every position in `batch` as one atomic update.
    ///
    /// Observers must see a single change notification, after all writes.
    fn set_points(&self, batch: &PointBatch);
}

/// Numeric surface: twelve scalar channels.
pub trait NumericInput {
    /// Current value of every channel.
    fn values(&self) -> SliderValues;

    /// Writes every channel. A surface may clamp to its own domain.
    fn set_values(&self, values: &SliderValues);
}

/// Persisted line parameters.
pub trait ParameterStore {
    /// Snapshot of all parameters.
    fn parameters(&self) -> LineParameters;

    /// Replaces all parameters.
    fn set_parameters(&self, params: LineParameters);

    /// Direction of line 1.
    fn d1(&self) -> Vector3 {
        self.parameters().d1
    }

    /// Stores the direction of line 1.
    fn set_d1(&self, d1: Vector3) {
        let mut params = self.parameters();
        params.d1 = d1;
        self.set_parameters(params);
    }

    /// Direction of line 2.
    fn d2(&self) -> Vector3 {
        self.parameters().d2
    }

    /// Stores the direction of line 2.
    fn set_d2(&self, d2: Vector3) {
        let mut params = self.parameters();
        params.d2 = d2;
        self.set_parameters(params);
    }

    /// Auto-update flag.
    fn auto_update(&self) -> bool {
        self.parameters().auto_update
    }

    /// Stores the auto-update flag.
    fn set_auto_update(&self, auto_update: bool) {
        let mut params = self.parameters();
        params.auto_update = auto_update;
        self.set_parameters(params);
    }
}

/// Output display for the computed closest point.
pub trait ResultDisplay {
    /// Shows the latest closest point.
    fn show_closest_point(&self, p3: Point3);
}

/// Payload-free change notification.
pub trait ChangeNotifier {
    /// Registers a callback invoked after each change.
    fn add_observer(&self, observer: Observer) -> ObserverId;

    /// Unregisters a callback. Returns false if `id` was unknown.
    fn remove_observer(&self, id: ObserverId) -> bool;
}

// =============================================================================
// SHARED HANDLES
// =============================================================================

impl<T: SpatialRepresentation + ?Sized> SpatialRepresentation for Rc<T> {
    fn point(&self, point: ControlPoint) -> Point3 {
        (**self).point(point)
    }

    fn set_points(&self, batch: &PointBatch) {
        (**self).set_points(batch)
    }
}

impl<T: NumericInput + ?Sized> NumericInput for Rc<T> {
    fn values(&self) -> SliderValues {
        (**self).values()
    }

    fn set_values(&self, values: &SliderValues) {
        (**self).set_values(values)
    }
}

impl<T: ParameterStore + ?Sized> ParameterStore for Rc<T> {
    fn parameters(&self) -> LineParameters {
        (**self).parameters()
    }

    fn set_parameters(&self, params: LineParameters) {
        (**self).set_parameters(params)
    }
}

impl<T: ResultDisplay + ?Sized> ResultDisplay for Rc<T> {
    fn show_closest_point(&self, p3: Point3) {
        (**self).show_closest_point(p3)
    }
}

impl<T: ChangeNotifier + ?Sized> ChangeNotifier for Rc<T> {
    fn add_observer(&self, observer: Observer) -> ObserverId {
        (**self).add_observer(observer)
    }

    fn remove_observer(&self, id: ObserverId) -> bool {
        (**self).remove_observer(id)
    }
}
