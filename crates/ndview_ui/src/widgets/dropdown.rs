//! Dropdown control for selecting one entry from a list of options.

use crate::{builder_field, callback_setter, Callback};

/// A dropdown control.
///
/// Activating an entry emits `on_select` with the entry text, even when the
/// entry is already selected (the usual combo-box `activated` contract).
pub struct Dropdown<Message> {
    options: Vec<String>,
    selected: Option<usize>,
    label: String,
    on_select: Callback<String, Message>,
}

impl<Message> Dropdown<Message> {
    /// Create a new dropdown with no selection.
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            selected: None,
            label: String::new(),
            on_select: Callback::none(),
        }
    }

    callback_setter!(on_select, String);
    builder_field!(label, String);

    /// Preselect the entry matching `text` (case-insensitive), if present.
    pub fn selected_text(mut self, text: &str) -> Self {
        if let Some(index) = self.find_text(text) {
            self.selected = Some(index);
        }
        self
    }

    /// Find the index of the entry matching `text` exactly, ignoring case.
    pub fn find_text(&self, text: &str) -> Option<usize> {
        self.options
            .iter()
            .position(|option| option.eq_ignore_ascii_case(text))
    }

    /// All entries.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Index of the selected entry.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Text of the selected entry.
    pub fn current_text(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
    }

    /// Label text.
    pub fn label_text(&self) -> &str {
        &self.label
    }

    /// Activate the entry at `index`. Out-of-range indices are ignored.
    pub fn activate(&mut self, index: usize) -> Option<Message> {
        let text = self.options.get(index)?.clone();
        self.selected = Some(index);
        self.on_select.call(text)
    }

    /// Activate the entry matching `text` (case-insensitive).
    pub fn activate_text(&mut self, text: &str) -> Option<Message> {
        let index = self.find_text(text)?;
        self.activate(index)
    }
}

impl<Message> std::fmt::Debug for Dropdown<Message> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dropdown")
            .field("options", &self.options)
            .field("selected", &self.selected)
            .field("label", &self.label)
            .finish()
    }
}

/// Helper function to create a dropdown.
pub fn dropdown<Message, I, S>(options: I) -> Dropdown<Message>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Dropdown::new(options)
}
