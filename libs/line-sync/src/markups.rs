//! # Markup Points
//!
//! Reference spatial surface: a named list of three draggable control
//! points. Point 2 holds the computed closest point and is locked against
//! user drags; only the controller writes it.
//!
//! Writes happen inside a begin/end modify bracket. Observers are told once,
//! when the outermost bracket closes, and only if a position changed.

use std::cell::{Cell, RefCell};

use config::constants::{CONTROL_POINT_COUNT, MARKUPS_NODE_NAME, P1_INDEX, P2_INDEX, P3_INDEX};
use glam::DVec3;
use line_geometry::Point3;

use crate::collaborators::{ChangeNotifier, SpatialRepresentation};
use crate::error::{SyncError, SyncResult};
use crate::observer::{Observer, ObserverId, ObserverList};

/// One of the three control points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlPoint {
    /// Point defining line 1.
    P1,
    /// Point defining line 2.
    P2,
    /// Computed closest point.
    P3,
}

impl ControlPoint {
    /// All control points in index order.
    pub const ALL: [ControlPoint; CONTROL_POINT_COUNT] =
        [ControlPoint::P1, ControlPoint::P2, ControlPoint::P3];

    /// Position of this point in the markup list.
    pub const fn index(self) -> usize {
        match self {
            ControlPoint::P1 => P1_INDEX,
            ControlPoint::P2 => P2_INDEX,
            ControlPoint::P3 => P3_INDEX,
        }
    }

    /// Looks up a control point by list index.
    pub fn from_index(index: usize) -> SyncResult<Self> {
        Self::ALL
            .into_iter()
            .find(|point| point.index() == index)
            .ok_or(SyncError::PointIndexOutOfRange {
                index,
                count: CONTROL_POINT_COUNT,
            })
    }
}

/// Positions to write in one atomic update.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointBatch {
    entries: [Option<Point3>; CONTROL_POINT_COUNT],
}

impl PointBatch {
    /// Empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the position of `point`.
    pub fn with(mut self, point: ControlPoint, position: Point3) -> Self {
        self.entries[point.index()] = Some(position);
        self
    }

    /// Position queued for `point`, if any.
    pub fn get(&self, point: ControlPoint) -> Option<Point3> {
        self.entries[point.index()]
    }

    /// Queued writes in index order.
    pub fn iter(&self) -> impl Iterator<Item = (ControlPoint, Point3)> + '_ {
        ControlPoint::ALL
            .into_iter()
            .filter_map(|point| self.get(point).map(|position| (point, position)))
    }

    /// True when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct PointSlot {
    position: Point3,
    locked: bool,
}

/// In-memory control point list.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use line_sync::{ControlPoint, MarkupPoints, SpatialRepresentation};
///
/// let points = MarkupPoints::new();
/// assert!(points.is_locked(ControlPoint::P3));
///
/// points.user_move_point(0, DVec3::new(1.0, 2.0, 3.0)).unwrap();
/// assert_eq!(points.point(ControlPoint::P1), DVec3::new(1.0, 2.0, 3.0));
///
/// assert!(points.user_move_point(2, DVec3::ONE).is_err());
/// ```
#[derive(Debug)]
pub struct MarkupPoints {
    name: String,
    slots: RefCell<[PointSlot; CONTROL_POINT_COUNT]>,
    modify_depth: Cell<u32>,
    pending: Cell<bool>,
    observers: ObserverList,
}

impl Default for MarkupPoints {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupPoints {
    /// Creates the list with every point at the origin and P3 locked.
    pub fn new() -> Self {
        Self::named(MARKUPS_NODE_NAME)
    }

    /// Same as [`MarkupPoints::new`] with a custom node name.
    pub fn named(name: impl Into<String>) -> Self {
        let points = Self {
            name: name.into(),
            slots: RefCell::new([PointSlot::default(); CONTROL_POINT_COUNT]),
            modify_depth: Cell::new(0),
            pending: Cell::new(false),
            observers: ObserverList::new(),
        };
        points.set_locked(ControlPoint::P3, true);
        points
    }

    /// Node name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether user drags of `point` are rejected.
    pub fn is_locked(&self, point: ControlPoint) -> bool {
        self.slots.borrow()[point.index()].locked
    }

    /// Locks or unlocks `point` for user drags.
    pub fn set_locked(&self, point: ControlPoint, locked: bool) {
        self.slots.borrow_mut()[point.index()].locked = locked;
    }

    /// Opens a modify bracket. Returns whether one was already open.
    pub fn start_modify(&self) -> bool {
        let depth = self.modify_depth.get();
        self.modify_depth.set(depth + 1);
        depth > 0
    }

    /// Closes a bracket opened by [`MarkupPoints::start_modify`].
    ///
    /// Observers are notified when the outermost bracket closes.
    pub fn end_modify(&self, was_modifying: bool) {
        let depth = self.modify_depth.get().saturating_sub(1);
        self.modify_depth.set(depth);
        if was_modifying || depth > 0 {
            return;
        }
        if self.pending.replace(false) {
            self.observers.notify();
        }
    }

    /// User drag of the point at list `index`.
    ///
    /// # Errors
    /// Rejects an unknown index, a locked point, or non-finite coordinates.
    pub fn user_move_point(&self, index: usize, position: Point3) -> SyncResult<()> {
        let point = ControlPoint::from_index(index)?;
        if self.is_locked(point) {
            tracing::warn!(index, "rejected drag of locked control point");
            return Err(SyncError::PointLocked { index });
        }
        if !position.is_finite() {
            tracing::warn!(index, ?position, "rejected non-finite control point position");
            return Err(SyncError::NonFiniteValue {
                what: format!("control point {index}"),
                value: first_non_finite(position),
            });
        }
        let was_modifying = self.start_modify();
        self.write(point, position);
        self.end_modify(was_modifying);
        Ok(())
    }

    fn write(&self, point: ControlPoint, position: Point3) {
        let mut slots = self.slots.borrow_mut();
        let slot = &mut slots[point.index()];
        if slot.position != position {
            slot.position = position;
            self.pending.set(true);
        }
    }
}

fn first_non_finite(v: DVec3) -> f64 {
    v.to_array()
        .into_iter()
        .find(|c| !c.is_finite())
        .unwrap_or(f64::NAN)
}

impl SpatialRepresentation for MarkupPoints {
    fn point(&self, point: ControlPoint) -> Point3 {
        self.slots.borrow()[point.index()].position
    }

    fn set_points(&self, batch: &PointBatch) {
        let was_modifying = self.start_modify();
        for (point, position) in batch.iter() {
            self.write(point, position);
        }
        self.end_modify(was_modifying);
    }
}

impl ChangeNotifier for MarkupPoints {
    fn add_observer(&self, observer: Observer) -> ObserverId {
        self.observers.add(observer)
    }

    fn remove_observer(&self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }
}

// =============================================================================
// TESTS
// =============================================================================
