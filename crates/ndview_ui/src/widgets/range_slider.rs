//! A two-handle slider over the normalized range `[0, 1]`.

use crate::{callback_setter, Callback};

/// A two-handle range slider.
///
/// Handle values are normalized to `[0, 1]` and kept ordered (`low <= high`).
/// User drags emit `on_change`; [`RangeSlider::sync`] is the state-driven path
/// and never emits.
pub struct RangeSlider<Message> {
    low: f32,
    high: f32,
    enabled: bool,
    on_change: Callback<(f32, f32), Message>,
}

impl<Message> RangeSlider<Message> {
    /// Create a range slider spanning the full range.
    pub fn new() -> Self {
        Self {
            low: 0.0,
            high: 1.0,
            enabled: true,
            on_change: Callback::none(),
        }
    }

    callback_setter!(on_change, (f32, f32));

    /// Current `(low, high)` values.
    pub fn values(&self) -> (f32, f32) {
        (self.low, self.high)
    }

    /// Whether the slider accepts user input.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set both handles from user input.
    ///
    /// Values are clamped to `[0, 1]` and swapped if given out of order.
    /// Returns `None` when disabled or when nothing moved.
    pub fn set_values(&mut self, low: f32, high: f32) -> Option<Message> {
        if !self.enabled {
            log::trace!("Ignoring range slider input while disabled");
            return None;
        }
        let (low, high) = ordered(low, high);
        if low == self.low && high == self.high {
            return None;
        }
        self.low = low;
        self.high = high;
        self.on_change.call((low, high))
    }

    /// Drag the lower handle.
    pub fn drag_low(&mut self, value: f32) -> Option<Message> {
        self.set_values(value.min(self.high), self.high)
    }

    /// Drag the upper handle.
    pub fn drag_high(&mut self, value: f32) -> Option<Message> {
        self.set_values(self.low, value.max(self.low))
    }

    /// Update the handles and enabled state from application state.
    pub fn sync(&mut self, values: Option<(f32, f32)>, enabled: bool) {
        if let Some((low, high)) = values {
            let (low, high) = ordered(low, high);
            self.low = low;
            self.high = high;
        }
        self.enabled = enabled;
    }
}

impl<Message> Default for RangeSlider<Message> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Message> std::fmt::Debug for RangeSlider<Message> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangeSlider")
            .field("low", &self.low)
            .field("high", &self.high)
            .field("enabled", &self.enabled)
            .finish()
    }
}

fn ordered(a: f32, b: f32) -> (f32, f32) {
    let a = if a.is_nan() { 0.0 } else { a.clamp(0.0, 1.0) };
    let b = if b.is_nan() { 1.0 } else { b.clamp(0.0, 1.0) };
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
