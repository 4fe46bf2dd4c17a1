//! Headless control models.

mod dropdown;
mod range_slider;
mod slider;
mod toggle;

pub use dropdown::{dropdown, Dropdown};
pub use range_slider::RangeSlider;
pub use slider::{slider, Slider};
pub use toggle::Toggle;
