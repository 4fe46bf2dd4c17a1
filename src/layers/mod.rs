//! Layers: the drawable data stack.
//!
//! A [`Layer`] owns the state shared by every kind (name, visibility,
//! selection, opacity) and one of three kind-specific payloads. Style writes
//! go through [`Layer::set_style`], which validates them against the schema
//! of the layer's kind.

mod image;
mod list;
mod markers;
mod rectangles;
mod style;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;
use ndview_render::Visual;

pub use image::{guess_multichannel, ImageLayer};
pub use list::LayerList;
pub use markers::MarkersLayer;
pub use rectangles::RectanglesLayer;
pub use style::{StyleAttr, StyleError, SIZE_RANGE};

use style::check_range;

static NEXT_LAYER_ID: AtomicU64 = AtomicU64::new(0);

/// Stable identity of a layer, independent of its position in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(u64);

impl LayerId {
    fn next() -> Self {
        Self(NEXT_LAYER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Layer kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Image,
    Markers,
    Rectangles,
}

impl LayerKind {
    /// Lowercase name, also the prefix of default layer names.
    pub fn name(&self) -> &'static str {
        match self {
            LayerKind::Image => "image",
            LayerKind::Markers => "markers",
            LayerKind::Rectangles => "rectangles",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Data value under the cursor.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Scalar image pixel
    Scalar(f32),
    /// Multichannel image pixel
    Channels(Vec<f32>),
    /// Index of the marker or rectangle hit
    Index(usize),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(v) => write!(f, "{}", v),
            Value::Channels(values) => {
                f.write_str("[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                f.write_str("]")
            }
            Value::Index(i) => write!(f, "{}", i),
        }
    }
}

/// Result of [`Layer::get_value`].
#[derive(Debug, Clone, PartialEq)]
pub struct LayerValue {
    /// Cursor coordinate, one entry per layer axis
    pub coord: Vec<i64>,
    /// `None` when nothing of this layer is under the cursor
    pub value: Option<Value>,
    /// Status-bar text
    pub message: String,
}

/// Kind-specific layer payload.
#[derive(Debug, Clone)]
pub enum LayerData {
    Image(ImageLayer),
    Markers(MarkersLayer),
    Rectangles(RectanglesLayer),
}

/// One entry of the layer stack.
#[derive(Debug, Clone)]
pub struct Layer {
    id: LayerId,
    name: String,
    visible: bool,
    selected: bool,
    opacity: f32,
    data: LayerData,
}

impl Layer {
    /// New visible, unselected, opaque layer.
    pub fn new(name: impl Into<String>, data: LayerData) -> Self {
        Self {
            id: LayerId::next(),
            name: name.into(),
            visible: true,
            selected: false,
            opacity: 1.0,
            data,
        }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn kind(&self) -> LayerKind {
        match self.data {
            LayerData::Image(_) => LayerKind::Image,
            LayerData::Markers(_) => LayerKind::Markers,
            LayerData::Rectangles(_) => LayerKind::Rectangles,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns true if the value changed.
    pub fn set_visible(&mut self, visible: bool) -> bool {
        let changed = self.visible != visible;
        self.visible = visible;
        changed
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Returns true if the value changed.
    pub fn set_selected(&mut self, selected: bool) -> bool {
        let changed = self.selected != selected;
        self.selected = selected;
        changed
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn data(&self) -> &LayerData {
        &self.data
    }

    pub fn as_image(&self) -> Option<&ImageLayer> {
        match &self.data {
            LayerData::Image(image) => Some(image),
            _ => None,
        }
    }

    pub fn as_image_mut(&mut self) -> Option<&mut ImageLayer> {
        match &mut self.data {
            LayerData::Image(image) => Some(image),
            _ => None,
        }
    }

    pub fn as_markers(&self) -> Option<&MarkersLayer> {
        match &self.data {
            LayerData::Markers(markers) => Some(markers),
            _ => None,
        }
    }

    pub fn as_markers_mut(&mut self) -> Option<&mut MarkersLayer> {
        match &mut self.data {
            LayerData::Markers(markers) => Some(markers),
            _ => None,
        }
    }

    pub fn as_rectangles(&self) -> Option<&RectanglesLayer> {
        match &self.data {
            LayerData::Rectangles(rects) => Some(rects),
            _ => None,
        }
    }

    /// Number of data axes (channel axis excluded).
    pub fn ndim(&self) -> usize {
        match &self.data {
            LayerData::Image(image) => image.ndim(),
            LayerData::Markers(markers) => markers.ndim(),
            LayerData::Rectangles(rects) => rects.ndim(),
        }
    }

    /// Length of every data axis, as used to size the dimension sliders.
    pub fn extent(&self) -> Vec<usize> {
        match &self.data {
            LayerData::Image(image) => image.extent(),
            LayerData::Markers(markers) => markers.extent(),
            LayerData::Rectangles(rects) => rects.extent(),
        }
    }

    /// Validate and apply a style write.
    pub fn set_style(&mut self, attr: &StyleAttr) -> Result<(), StyleError> {
        match (attr, &mut self.data) {
            (StyleAttr::Opacity(opacity), _) => {
                self.opacity = check_range("opacity", *opacity, (0.0, 1.0))?;
            }
            (_, LayerData::Image(image)) => image.apply_style(attr)?,
            (_, LayerData::Markers(markers)) => markers.apply_style(attr)?,
            (_, LayerData::Rectangles(rects)) => rects.apply_style(attr)?,
        }
        debug!("Layer '{}' {} updated", self.name, attr.name());
        Ok(())
    }

    /// Re-slice at the given per-axis indices.
    pub fn set_view_slice(&mut self, indices: &[usize]) {
        match &mut self.data {
            LayerData::Image(image) => image.set_view_slice(indices),
            LayerData::Markers(markers) => markers.set_view_slice(indices),
            LayerData::Rectangles(rects) => rects.set_view_slice(indices),
        }
    }

    /// What lies under `position` (row, col in data coordinates).
    pub fn get_value(&self, position: [f64; 2], indices: &[usize]) -> LayerValue {
        match &self.data {
            LayerData::Image(image) => image.get_value(&self.name, position, indices),
            LayerData::Markers(markers) => markers.get_value(&self.name, position, indices),
            LayerData::Rectangles(rects) => rects.get_value(&self.name, position, indices),
        }
    }

    /// Drawable for the current slice; `None` while hidden.
    pub fn visual(&self) -> Option<Visual> {
        if !self.visible {
            return None;
        }
        Some(match &self.data {
            LayerData::Image(image) => image.visual(self.opacity),
            LayerData::Markers(markers) => markers.visual(self.opacity),
            LayerData::Rectangles(rects) => rects.visual(self.opacity, self.selected),
        })
    }
}
