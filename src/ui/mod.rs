//! Control models built from viewer state.

mod layer_panel;

pub use layer_panel::{LayerControls, LayerPanel, StyleControls};
