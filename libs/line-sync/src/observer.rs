//! # Change Observers
//!
//! Payload-free change notification shared by the reference adapters.
//! Callbacks are invoked after every internal borrow is released, so an
//! observer may call straight back into the notifying object.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Handle returned when registering an observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Change callback.
pub type Observer = Rc<dyn Fn()>;

/// Ordered list of change callbacks.
#[derive(Default)]
pub struct ObserverList {
    next_id: Cell<u64>,
    observers: RefCell<Vec<(ObserverId, Observer)>>,
}

impl fmt::Debug for ObserverList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverList")
            .field("len", &self.len())
            .finish()
    }
}

impl ObserverList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback.
    pub fn add(&self, observer: Observer) -> ObserverId {
        let id = ObserverId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.observers.borrow_mut().push((id, observer));
        id
    }

    /// Removes a callback. Returns false when the id was not registered.
    pub fn remove(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.borrow_mut();
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.observers.borrow().len()
    }

    /// True when no callback is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invokes every callback in registration order.
    pub fn notify(&self) {
        let snapshot: Vec<Observer> = self
            .observers
            .borrow()
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect();
        for observer in snapshot {
            observer();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
