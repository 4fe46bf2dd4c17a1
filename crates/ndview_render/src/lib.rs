//! ndview_render - scene description and software rendering for ndview
//!
//! The viewer talks to rendering only through the [`Canvas`] trait: fit the
//! camera to content, render a [`Scene`] off-screen, and request redraws.
//! [`RasterCanvas`] implements it on the CPU with tiny-skia.

pub mod camera;
pub mod canvas;
pub mod color;
pub mod colormap;
pub mod error;
pub mod scene;

pub use camera::{Bounds, Camera};
pub use canvas::{Canvas, RasterCanvas, Region, RenderRequest};
pub use color::{color_names, Color, NAMED_COLORS};
pub use colormap::Colormap;
pub use error::{RenderError, Result};
pub use scene::{ImageVisual, MarkersVisual, RectanglesVisual, Scene, Symbol, Visual};
