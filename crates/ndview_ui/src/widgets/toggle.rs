//! Checkbox-style toggle.

use crate::{builder_field, callback_setter, Callback};

/// A two-state toggle.
pub struct Toggle<Message> {
    checked: bool,
    label: String,
    on_toggle: Callback<bool, Message>,
}

impl<Message> Toggle<Message> {
    /// Create a toggle in the given state.
    pub fn new(checked: bool) -> Self {
        Self {
            checked,
            label: String::new(),
            on_toggle: Callback::none(),
        }
    }

    callback_setter!(on_toggle, bool);
    builder_field!(label, String);

    /// Current state.
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Label text.
    pub fn label_text(&self) -> &str {
        &self.label
    }

    /// Flip the state and emit the new value.
    pub fn toggle(&mut self) -> Option<Message> {
        self.checked = !self.checked;
        self.on_toggle.call(self.checked)
    }

    /// Set the state, emitting only when it changes.
    pub fn set_checked(&mut self, checked: bool) -> Option<Message> {
        if checked == self.checked {
            return None;
        }
        self.toggle()
    }
}

impl<Message> std::fmt::Debug for Toggle<Message> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toggle")
            .field("checked", &self.checked)
            .field("label", &self.label)
            .finish()
    }
}
