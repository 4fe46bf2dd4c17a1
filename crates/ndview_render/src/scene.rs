//! Draw list handed to a [`Canvas`](crate::Canvas).
//!
//! Visuals are drawn in insertion order, so the first visual ends up at the
//! bottom of the stack.

use crate::camera::Bounds;
use crate::color::Color;

/// Marker glyph shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Symbol {
    #[default]
    Disc,
    Square,
    Cross,
}

impl Symbol {
    /// Get the display name for this symbol.
    pub fn name(&self) -> &'static str {
        match self {
            Symbol::Disc => "disc",
            Symbol::Square => "square",
            Symbol::Cross => "cross",
        }
    }

    /// Get all available symbols.
    pub fn all() -> &'static [Symbol] {
        &[Symbol::Disc, Symbol::Square, Symbol::Cross]
    }

    /// Look up a symbol by name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }
}

/// An RGBA raster placed at the world origin, one world unit per pixel.
#[derive(Debug, Clone)]
pub struct ImageVisual {
    /// Row-major straight-alpha RGBA bytes
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub opacity: f32,
}

/// Point markers. Centers and size are in world units.
#[derive(Debug, Clone)]
pub struct MarkersVisual {
    /// Marker centers as `(x, y)`
    pub centers: Vec<(f32, f32)>,
    /// Marker diameter
    pub size: f32,
    /// Outline width in screen pixels
    pub edge_width: f32,
    pub face_color: Color,
    pub edge_color: Color,
    pub symbol: Symbol,
    pub opacity: f32,
}

/// Axis-aligned rectangles in world units.
#[derive(Debug, Clone)]
pub struct RectanglesVisual {
    pub rects: Vec<Bounds>,
    /// Outline width in screen pixels
    pub edge_width: f32,
    pub face_color: Color,
    pub edge_color: Color,
    /// Corner handles, drawn when set: `(color, size in screen pixels)`
    pub vertices: Option<(Color, f32)>,
    pub opacity: f32,
}

/// One drawable entity.
#[derive(Debug, Clone)]
pub enum Visual {
    Image(ImageVisual),
    Markers(MarkersVisual),
    Rectangles(RectanglesVisual),
}

impl Visual {
    /// World-space extent of this visual, if it has any content.
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Visual::Image(image) => {
                if image.width == 0 || image.height == 0 {
                    None
                } else {
                    Some(Bounds::new(0.0, 0.0, image.width as f32, image.height as f32))
                }
            }
            Visual::Markers(markers) => {
                let r = markers.size / 2.0;
                markers
                    .centers
                    .iter()
                    .map(|&(x, y)| Bounds::new(x - r, y - r, 2.0 * r, 2.0 * r))
                    .reduce(|a, b| a.union(&b))
            }
            Visual::Rectangles(rects) => rects.rects.iter().copied().reduce(|a, b| a.union(&b)),
        }
    }
}

/// Ordered list of visuals.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    visuals: Vec<Visual>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a visual on top of the existing ones.
    pub fn push(&mut self, visual: Visual) {
        self.visuals.push(visual);
    }

    pub fn visuals(&self) -> &[Visual] {
        &self.visuals
    }

    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }

    /// Union of all visual extents.
    pub fn bounds(&self) -> Option<Bounds> {
        self.visuals
            .iter()
            .filter_map(Visual::bounds)
            .reduce(|a, b| a.union(&b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers(centers: Vec<(f32, f32)>) -> Visual {
        Visual::Markers(MarkersVisual {
            centers,
            size: 4.0,
            edge_width: 1.0,
            face_color: Color::WHITE,
            edge_color: Color::BLACK,
            symbol: Symbol::Disc,
            opacity: 1.0,
        })
    }

    #[test]
    fn test_empty_markers_have_no_bounds() {
        assert_eq!(markers(vec![]).bounds(), None);
    }

    #[test]
    fn test_scene_bounds_union() {
        let mut scene = Scene::new();
        scene.push(Visual::Image(ImageVisual {
            pixels: vec![0; 4 * 6],
            width: 3,
            height: 2,
            opacity: 1.0,
        }));
        scene.push(markers(vec![(10.0, 10.0)]));
        assert_eq!(scene.bounds(), Some(Bounds::new(0.0, 0.0, 12.0, 12.0)));
    }

    #[test]
    fn test_symbol_names() {
        assert_eq!(Symbol::from_name("Square"), Some(Symbol::Square));
        assert_eq!(Symbol::from_name("star"), None);
    }
}
