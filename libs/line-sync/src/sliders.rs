//! # Slider Panel
//!
//! Reference numeric surface with twelve bounded channels. Values saturate
//! at the channel domain, and a change notification fires per channel whose
//! value actually changed, like a slider widget's value-changed signal.

use std::cell::RefCell;
use std::str::FromStr;

use config::constants::{clamp_to_domain, SliderKind, SLIDER_CHANNEL_COUNT, SLIDER_DECIMALS};

use crate::collaborators::{ChangeNotifier, NumericInput};
use crate::error::{SyncError, SyncResult};
use crate::observer::{Observer, ObserverId, ObserverList};
use crate::state::SliderValues;

/// One scalar channel of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelId {
    P1X,
    P1Y,
    P1Z,
    P2X,
    P2Y,
    P2Z,
    D1X,
    D1Y,
    D1Z,
    D2X,
    D2Y,
    D2Z,
}

impl ChannelId {
    /// Every channel in panel order.
    pub const ALL: [ChannelId; SLIDER_CHANNEL_COUNT] = [
        ChannelId::P1X,
        ChannelId::P1Y,
        ChannelId::P1Z,
        ChannelId::P2X,
        ChannelId::P2Y,
        ChannelId::P2Z,
        ChannelId::D1X,
        ChannelId::D1Y,
        ChannelId::D1Z,
        ChannelId::D2X,
        ChannelId::D2Y,
        ChannelId::D2Z,
    ];

    /// Position in panel order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Channel at panel position `index`.
    pub fn from_index(index: usize) -> SyncResult<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(SyncError::ChannelIndexOutOfRange(index))
    }

    /// Form label, e.g. `"P1 X"` or `"d2 Z"`.
    pub fn label(self) -> &'static str {
        match self {
            ChannelId::P1X => "P1 X",
            ChannelId::P1Y => "P1 Y",
            ChannelId::P1Z => "P1 Z",
            ChannelId::P2X => "P2 X",
            ChannelId::P2Y => "P2 Y",
            ChannelId::P2Z => "P2 Z",
            ChannelId::D1X => "d1 X",
            ChannelId::D1Y => "d1 Y",
            ChannelId::D1Z => "d1 Z",
            ChannelId::D2X => "d2 X",
            ChannelId::D2Y => "d2 Y",
            ChannelId::D2Z => "d2 Z",
        }
    }

    /// Whether the channel edits a point coordinate or a direction component.
    pub fn kind(self) -> SliderKind {
        if self.index() < 6 {
            SliderKind::Point
        } else {
            SliderKind::Direction
        }
    }
}

impl FromStr for ChannelId {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|channel| channel.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SyncError::UnknownChannel(s.to_string()))
    }
}

/// In-memory slider panel.
///
/// # Example
///
/// ```rust
/// use line_sync::{ChannelId, SliderPanel};
///
/// let panel = SliderPanel::new();
/// panel.set_value(ChannelId::D1X, 5.0).unwrap();
/// assert_eq!(panel.value(ChannelId::D1X), 1.0);
/// assert_eq!(panel.display_text(ChannelId::D1X), "1.00");
/// ```
#[derive(Debug, Default)]
pub struct SliderPanel {
    values: RefCell<[f64; SLIDER_CHANNEL_COUNT]>,
    observers: ObserverList,
}

impl SliderPanel {
    /// Panel with every channel at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `channel`.
    pub fn value(&self, channel: ChannelId) -> f64 {
        self.values.borrow()[channel.index()]
    }

    /// Sets `channel`, clamped to its domain. Returns whether it changed.
    ///
    /// # Errors
    /// Rejects NaN and infinite values.
    pub fn set_value(&self, channel: ChannelId, value: f64) -> SyncResult<bool> {
        if !value.is_finite() {
            tracing::warn!(channel = channel.label(), value, "rejected non-finite slider value");
            return Err(SyncError::NonFiniteValue {
                what: channel.label().to_string(),
                value,
            });
        }
        let changed = self.store(channel, value);
        if changed {
            self.observers.notify();
        }
        Ok(changed)
    }

    /// Moves `channel` up by `steps` single steps (negative moves down).
    pub fn step(&self, channel: ChannelId, steps: i32) -> SyncResult<bool> {
        let value = self.value(channel) + f64::from(steps) * channel.kind().step();
        self.set_value(channel, value)
    }

    /// Value formatted with the panel's display decimals.
    pub fn display_text(&self, channel: ChannelId) -> String {
        format!("{:.*}", SLIDER_DECIMALS, self.value(channel))
    }

    fn store(&self, channel: ChannelId, value: f64) -> bool {
        let clamped = clamp_to_domain(channel.kind(), value);
        let mut values = self.values.borrow_mut();
        let slot = &mut values[channel.index()];
        if *slot == clamped {
            return false;
        }
        *slot = clamped;
        true
    }
}

impl NumericInput for SliderPanel {
    fn values(&self) -> SliderValues {
        SliderValues::from_channels(&self.values.borrow())
    }

    fn set_values(&self, values: &SliderValues) {
        for (channel, value) in ChannelId::ALL.into_iter().zip(values.to_channels()) {
            if !value.is_finite() {
                tracing::warn!(channel = channel.label(), value, "skipped non-finite slider value");
                continue;
            }
            if self.store(channel, value) {
                self.observers.notify();
            }
        }
    }
}

impl ChangeNotifier for SliderPanel {
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
