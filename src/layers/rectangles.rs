//! Rectangle layers: axis-aligned boxes given by two opposite corners.

use ndarray::Array3;
use ndview_render::{Bounds, RectanglesVisual, Visual};

use super::image::slice_coord;
use super::style::{check_color, check_range, palette_color, StyleAttr, StyleError, SIZE_RANGE};
use super::{LayerKind, LayerValue, Value};
use crate::constants::{DEFAULT_EDGE_WIDTH, DEFAULT_VERTEX_SIZE, DISPLAY_AXES};
use crate::error::LayerError;

/// Rectangles stored as an `(N, 2, ndim)` corner array.
///
/// Axes beyond the display axes are taken from the first corner.
#[derive(Debug, Clone)]
pub struct RectanglesLayer {
    corners: Array3<f64>,
    /// Corner handle size in screen pixels
    size: f32,
    edge_width: f32,
    face_color: String,
    edge_color: String,
    vertex_color: String,
    in_slice: Vec<usize>,
}

impl RectanglesLayer {
    pub fn new(corners: Array3<f64>) -> Result<Self, LayerError> {
        let shape = corners.shape();
        if shape[1] != 2 || shape[2] < DISPLAY_AXES {
            return Err(LayerError::ShapeMismatch {
                shape: shape.to_vec(),
                reason: "expected (N, 2, ndim) corners with ndim >= 2".to_string(),
            });
        }
        let mut layer = Self {
            corners,
            size: DEFAULT_VERTEX_SIZE,
            edge_width: DEFAULT_EDGE_WIDTH,
            face_color: "transparent".to_string(),
            edge_color: "red".to_string(),
            vertex_color: "white".to_string(),
            in_slice: Vec::new(),
        };
        layer.set_view_slice(&[]);
        Ok(layer)
    }

    pub fn corners(&self) -> &Array3<f64> {
        &self.corners
    }

    pub fn len(&self) -> usize {
        self.corners.shape()[0]
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ndim(&self) -> usize {
        self.corners.shape()[2]
    }

    pub fn extent(&self) -> Vec<usize> {
        (0..self.ndim())
            .map(|axis| {
                self.corners
                    .index_axis(ndarray::Axis(2), axis)
                    .iter()
                    .map(|&c| (c.round() as i64).saturating_add(1).max(0) as usize)
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn edge_width(&self) -> f32 {
        self.edge_width
    }

    pub fn face_color(&self) -> &str {
        &self.face_color
    }

    pub fn edge_color(&self) -> &str {
        &self.edge_color
    }

    pub fn vertex_color(&self) -> &str {
        &self.vertex_color
    }

    pub(crate) fn apply_style(&mut self, attr: &StyleAttr) -> Result<(), StyleError> {
        match attr {
            StyleAttr::Size(size) => self.size = check_range("size", *size, SIZE_RANGE)?,
            StyleAttr::EdgeWidth(width) => {
                self.edge_width = check_range("edge_width", *width, SIZE_RANGE)?
            }
            StyleAttr::FaceColor(name) => self.face_color = check_color(name)?,
            StyleAttr::EdgeColor(name) => self.edge_color = check_color(name)?,
            StyleAttr::VertexColor(name) => self.vertex_color = check_color(name)?,
            _ => return Err(StyleError::unsupported(attr, LayerKind::Rectangles)),
        }
        Ok(())
    }

    pub fn set_view_slice(&mut self, indices: &[usize]) {
        let ndim = self.ndim();
        self.in_slice = (0..self.len())
            .filter(|&n| {
                (DISPLAY_AXES..ndim).all(|axis| {
                    self.corners[[n, 0, axis]].round() as i64
                        == indices.get(axis).copied().unwrap_or(0) as i64
                })
            })
            .collect();
    }

    pub fn in_slice(&self) -> &[usize] {
        &self.in_slice
    }

    /// World-space box of rectangle `n` (x = column, y = row).
    fn bounds(&self, n: usize) -> Bounds {
        let c = &self.corners;
        Bounds::from_corners(
            c[[n, 0, 1]] as f32,
            c[[n, 0, 0]] as f32,
            c[[n, 1, 1]] as f32,
            c[[n, 1, 0]] as f32,
        )
    }

    /// Topmost in-slice rectangle containing `position`.
    pub fn get_value(&self, name: &str, position: [f64; 2], indices: &[usize]) -> LayerValue {
        let hit = self
            .in_slice
            .iter()
            .rev()
            .copied()
            .find(|&n| self.bounds(n).contains(position[1] as f32, position[0] as f32));

        let display = [position[0].round() as i64, position[1].round() as i64];
        let coord = slice_coord(self.ndim(), display, indices, &[]);
        let mut message = format!("{:?}, {}", coord, name);
        if let Some(n) = hit {
            message.push_str(&format!(", index {}", n));
        }
        LayerValue {
            coord,
            value: hit.map(Value::Index),
            message,
        }
    }

    /// Corner handles are drawn only while the layer is selected.
    pub fn visual(&self, opacity: f32, selected: bool) -> Visual {
        Visual::Rectangles(RectanglesVisual {
            rects: self.in_slice.iter().map(|&n| self.bounds(n)).collect(),
            edge_width: self.edge_width,
            face_color: palette_color(&self.face_color),
            edge_color: palette_color(&self.edge_color),
            vertices: selected.then(|| (palette_color(&self.vertex_color), self.size)),
            opacity,
        })
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    fn layer() -> RectanglesLayer {
        RectanglesLayer::new(array![
            [[0.0, 0.0, 0.0], [10.0, 20.0, 0.0]],
            [[5.0, 5.0, 0.0], [8.0, 8.0, 0.0]],
            [[0.0, 0.0, 2.0], [4.0, 4.0, 2.0]],
        ])
        .unwrap()
    }

    #[test]
    fn test_rejects_bad_corners() {
        assert!(RectanglesLayer::new(Array3::zeros((1, 3, 2))).is_err());
        assert!(RectanglesLayer::new(Array3::zeros((1, 2, 1))).is_err());
    }

    #[test]
    fn test_extent() {
        assert_eq!(layer().extent(), vec![11, 21, 3]);
    }

    #[test]
    fn test_extent_saturates_on_huge_coordinates() {
        let rects = RectanglesLayer::new(array![[[0.0, 0.0], [1e300, -1e300]]]).unwrap();
        assert_eq!(rects.extent(), vec![i64::MAX as usize, 1]);
    }

    #[test]
    fn test_get_value_topmost_containing() {
        let rects = layer();
        let inner = rects.get_value("rectangles 0", [6.0, 7.0], &[0, 0, 0]);
        assert_eq!(inner.value, Some(Value::Index(1)));
        assert_eq!(inner.message, "[6, 7, 0], rectangles 0, index 1");

        let outer = rects.get_value("rectangles 0", [2.0, 15.0], &[0, 0, 0]);
        assert_eq!(outer.value, Some(Value::Index(0)));

        assert_eq!(rects.get_value("r", [30.0, 30.0], &[0, 0, 0]).value, None);
    }

    #[test]
    fn test_view_slice() {
        let mut rects = layer();
        assert_eq!(rects.in_slice(), &[0, 1]);
        rects.set_view_slice(&[0, 0, 2]);
        assert_eq!(rects.in_slice(), &[2]);
        assert_eq!(rects.get_value("r", [2.0, 2.0], &[0, 0, 2]).value, Some(Value::Index(2)));
    }

    #[test]
    fn test_vertices_only_when_selected() {
        let rects = layer();
        let Visual::Rectangles(visual) = rects.visual(1.0, false) else {
            panic!("expected rectangles visual");
        };
        assert!(visual.vertices.is_none());
        assert_eq!(visual.rects[0], Bounds::new(0.0, 0.0, 20.0, 10.0));

        let Visual::Rectangles(visual) = rects.visual(1.0, true) else {
            panic!("expected rectangles visual");
        };
        assert!(visual.vertices.is_some());
    }

    #[test]
    fn test_vertex_color_style() {
        let mut rects = layer();
        rects.apply_style(&StyleAttr::VertexColor("Yellow".into())).unwrap();
        assert_eq!(rects.vertex_color(), "yellow");
        assert!(rects.apply_style(&StyleAttr::Symbol("disc".into())).is_err());
    }
}
