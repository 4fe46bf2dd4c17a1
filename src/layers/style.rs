//! Layer style attributes and their validation.

use ndview_render::{Color, Colormap, Symbol};
use thiserror::Error;

use super::LayerKind;

/// Lower and upper bound of the size and edge-width attributes.
pub const SIZE_RANGE: (f32, f32) = (0.0, 100.0);

/// A single style write.
///
/// Names (colors, colormaps, symbols) are carried as text, the way the
/// dropdowns report them, and resolved when the write is validated.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleAttr {
    Opacity(f32),
    Colormap(String),
    Clim(f32, f32),
    Size(f32),
    EdgeWidth(f32),
    FaceColor(String),
    EdgeColor(String),
    VertexColor(String),
    Symbol(String),
}

impl StyleAttr {
    /// Attribute name as shown in errors and controls.
    pub fn name(&self) -> &'static str {
        match self {
            StyleAttr::Opacity(_) => "opacity",
            StyleAttr::Colormap(_) => "colormap",
            StyleAttr::Clim(..) => "clim",
            StyleAttr::Size(_) => "size",
            StyleAttr::EdgeWidth(_) => "edge_width",
            StyleAttr::FaceColor(_) => "face_color",
            StyleAttr::EdgeColor(_) => "edge_color",
            StyleAttr::VertexColor(_) => "vertex_color",
            StyleAttr::Symbol(_) => "symbol",
        }
    }
}

/// A rejected style write.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    #[error("{kind} layers have no {attr} attribute")]
    Unsupported { attr: &'static str, kind: LayerKind },

    #[error("{attr} must be within {min}..={max}, got {value}")]
    OutOfRange {
        attr: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("unknown color: {0}")]
    UnknownColor(String),

    #[error("unknown colormap: {0}")]
    UnknownColormap(String),

    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("invalid contrast limits ({low}, {high})")]
    InvalidClim { low: f32, high: f32 },
}

impl StyleError {
    pub(crate) fn unsupported(attr: &StyleAttr, kind: LayerKind) -> Self {
        StyleError::Unsupported {
            attr: attr.name(),
            kind,
        }
    }
}

/// Check `value` lies in `[min, max]`.
pub(crate) fn check_range(attr: &'static str, value: f32, (min, max): (f32, f32)) -> Result<f32, StyleError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(StyleError::OutOfRange {
            attr,
            value,
            min,
            max,
        })
    }
}

/// Resolve a palette color name, returning the canonical lowercase name.
pub(crate) fn check_color(name: &str) -> Result<String, StyleError> {
    Color::from_name(name)
        .map(|_| name.to_ascii_lowercase())
        .ok_or_else(|| StyleError::UnknownColor(name.to_string()))
}

pub(crate) fn check_colormap(name: &str) -> Result<Colormap, StyleError> {
    Colormap::from_name(name).ok_or_else(|| StyleError::UnknownColormap(name.to_string()))
}

pub(crate) fn check_symbol(name: &str) -> Result<Symbol, StyleError> {
    Symbol::from_name(name).ok_or_else(|| StyleError::UnknownSymbol(name.to_string()))
}

pub(crate) fn check_clim(low: f32, high: f32) -> Result<(f32, f32), StyleError> {
    if low.is_finite() && high.is_finite() && low < high {
        Ok((low, high))
    } else {
        Err(StyleError::InvalidClim { low, high })
    }
}

/// Palette color by name; names are validated on write.
pub(crate) fn palette_color(name: &str) -> Color {
    Color::from_name(name).unwrap_or(Color::WHITE)
}
