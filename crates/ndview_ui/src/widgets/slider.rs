//! An integer slider for selecting a value within an inclusive range.

use crate::{builder_field, callback_setter, Callback};

/// An integer slider.
///
/// Mirrors the usual toolkit slider contract: the value is always kept inside
/// `[min, max]`, and a change notification fires only when the value actually
/// moves. The notification is the message produced by `on_change`.
pub struct Slider<Message> {
    /// Current value
    value: usize,
    /// Minimum value
    min: usize,
    /// Maximum value
    max: usize,
    /// Single step size used by keyboard-style stepping
    step: usize,
    /// Short label shown next to the slider
    label: String,
    /// Callback when the value changes
    on_change: Callback<usize, Message>,
}

impl<Message> Slider<Message> {
    /// Create a new slider positioned at `min`.
    pub fn new(min: usize, max: usize) -> Self {
        let max = max.max(min);
        Self {
            value: min,
            min,
            max,
            step: 1,
            label: String::new(),
            on_change: Callback::none(),
        }
    }

    callback_setter!(on_change, usize);
    builder_field!(label, String);

    /// Set the step size (minimum 1).
    pub fn step(mut self, step: usize) -> Self {
        self.step = step.max(1);
        self
    }

    /// Set the initial value without emitting a change.
    pub fn value(mut self, value: usize) -> Self {
        self.value = value.clamp(self.min, self.max);
        self
    }

    /// Current value.
    pub fn current(&self) -> usize {
        self.value
    }

    /// Lower bound of the range.
    pub fn minimum(&self) -> usize {
        self.min
    }

    /// Upper bound of the range.
    pub fn maximum(&self) -> usize {
        self.max
    }

    /// Label text.
    pub fn label_text(&self) -> &str {
        &self.label
    }

    /// Replace the range, clamping the current value into it.
    ///
    /// Returns the change message if clamping moved the value.
    pub fn set_range(&mut self, min: usize, max: usize) -> Option<Message> {
        self.min = min;
        self.max = max.max(min);
        let clamped = self.value.clamp(self.min, self.max);
        if clamped != self.value {
            log::debug!(
                "Slider '{}' value {} clamped to {} by range {}..={}",
                self.label,
                self.value,
                clamped,
                self.min,
                self.max
            );
        }
        self.move_to(clamped)
    }

    /// Replace only the upper bound of the range.
    pub fn set_maximum(&mut self, max: usize) -> Option<Message> {
        self.set_range(self.min, max)
    }

    /// Move the slider to `value` (clamped) and emit a change if it moved.
    pub fn set_value(&mut self, value: usize) -> Option<Message> {
        self.move_to(value.clamp(self.min, self.max))
    }

    /// Move one step towards the maximum.
    pub fn step_up(&mut self) -> Option<Message> {
        self.set_value(self.value.saturating_add(self.step))
    }

    /// Move one step towards the minimum.
    pub fn step_down(&mut self) -> Option<Message> {
        self.set_value(self.value.saturating_sub(self.step).max(self.min))
    }

    /// Move to the value at `ratio` along the track (0.0 = min, 1.0 = max).
    pub fn drag_to(&mut self, ratio: f32) -> Option<Message> {
        let ratio = ratio.clamp(0.0, 1.0);
        let span = (self.max - self.min) as f32;
        let raw = self.min as f32 + ratio * span;
        let steps = ((raw - self.min as f32) / self.step as f32).round() as usize;
        self.set_value(self.min + steps * self.step)
    }

    /// Normalized position (0-1) of the current value.
    pub fn value_ratio(&self) -> f32 {
        if self.max == self.min {
            0.0
        } else {
            (self.value - self.min) as f32 / (self.max - self.min) as f32
        }
    }

    fn move_to(&mut self, value: usize) -> Option<Message> {
        if value == self.value {
            return None;
        }
        self.value = value;
        self.on_change.call(value)
    }
}

impl<Message> std::fmt::Debug for Slider<Message> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slider")
            .field("value", &self.value)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("label", &self.label)
            .finish()
    }
}

/// Helper function to create a slider.
pub fn slider<Message>(min: usize, max: usize) -> Slider<Message> {
    Slider::new(min, max)
}
