//! # Line Sync
//!
//! Bidirectional synchronization between a numeric slider surface and
//! draggable spatial control points describing two 3D lines.
//!
//! ## Architecture
//!
//! ```text
//! slider change ─┐                                  ┌─> control points (P1, P2, P3)
//!                ├─> SyncController ─> closest_point ┤
//! point drag ────┘      (Idle/Propagating)           └─> sliders, label
//! ```
//!
//! The controller owns a single [`LineIntersectionState`]; both surfaces are
//! projections of it. Writing into one surface re-triggers that surface's
//! change notification synchronously, which the controller suppresses while
//! it is propagating.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use line_sync::{ChannelId, DefaultSession};
//!
//! let session = DefaultSession::with_defaults();
//! session.sliders().set_value(ChannelId::P2Z, 1.0).unwrap();
//!
//! // Default directions are +X and +Y: skew lines one unit apart
//! assert_eq!(session.state().p3(), DVec3::new(0.0, 0.0, 0.5));
//! assert_eq!(session.display().text(), "(0.00, 0.00, 0.50)");
//! ```

pub mod collaborators;
pub mod controller;
pub mod display;
pub mod error;
pub mod markups;
pub mod observer;
pub mod params;
pub mod session;
pub mod sliders;
pub mod state;

// Re-export public API
pub use collaborators::{
    ChangeNotifier, NumericInput, ParameterStore, ResultDisplay, SpatialRepresentation,
};
pub use controller::{SyncController, SyncEvent, SyncOrigin, SyncOutcome, SyncPhase};
pub use display::{format_point, IntersectionLabel};
pub use error::{SyncError, SyncResult};
pub use markups::{ControlPoint, MarkupPoints, PointBatch};
pub use observer::{ObserverId, ObserverList};
pub use params::{InMemoryParameterStore, LineParameters};
pub use session::{DefaultSession, LineIntersectionSession};
pub use sliders::{ChannelId, SliderPanel};
pub use state::{LineIntersectionState, SliderValues};
