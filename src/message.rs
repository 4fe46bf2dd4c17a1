//! Application messages: every UI intent the viewer controller handles.

use crate::dims::DimsMessage;
use crate::layers::{LayerId, StyleAttr};

/// Keys the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Held to pan/zoom while annotating
    Space,
    /// Resets the view to fit all visible layers
    Home,
    /// Anything else
    Other,
}

/// Messages produced by controls and input events.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// A dimension slider moved
    Dims(DimsMessage),

    /// Color-limit range slider moved (normalized handles)
    ClimChanged(f32, f32),

    /// A style control changed
    LayerStyle { layer: LayerId, attr: StyleAttr },
    /// Visibility toggle changed
    SetVisible { layer: LayerId, visible: bool },
    /// Selection toggle changed
    SetSelected { layer: LayerId, selected: bool },
    /// A layer row was dragged onto `insert`
    MoveLayer { index: usize, insert: usize },
    /// Delete all selected layers
    RemoveSelected,
    /// Add an empty markers layer
    NewMarkers,

    /// Annotation mode toggle
    SetAnnotation(bool),
    /// Fit the view to the visible layers
    ResetView,

    KeyPressed(Key),
    KeyReleased(Key),

    /// Cursor moved, in canvas pixels
    MouseMoved { x: f32, y: f32 },
    /// Primary button pressed, in canvas pixels
    MousePressed { x: f32, y: f32 },
    /// Cursor dragged with the button down, delta in canvas pixels
    MouseDragged { dx: f32, dy: f32 },
    /// Wheel scrolled at a canvas position; positive zooms in
    Scrolled { delta: f32, x: f32, y: f32 },
}
