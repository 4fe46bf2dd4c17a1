//! ndview_ui - headless control models for the ndview viewer
//!
//! Controls hold their own presentation state (range, selection, checked) and
//! turn user changes into application messages through a [`Callback`]. They
//! never reach into application state, which keeps the data flow one-way:
//! control → message → controller → state → rebuilt controls.

mod macros;
mod callback;
mod widgets;

pub use callback::Callback;
pub use widgets::{dropdown, slider, Dropdown, RangeSlider, Slider, Toggle};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::callback::Callback;
    pub use crate::widgets::{dropdown, slider, Dropdown, RangeSlider, Slider, Toggle};
}
