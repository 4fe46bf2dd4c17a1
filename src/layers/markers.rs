//! Marker layers: point sets in N dimensions.

use ndarray::{Array2, ArrayView1};
use ndview_render::{MarkersVisual, Symbol, Visual};

use super::style::{check_color, check_range, check_symbol, palette_color, StyleAttr, StyleError, SIZE_RANGE};
use super::{LayerKind, LayerValue, Value};
use crate::constants::{DEFAULT_EDGE_WIDTH, DEFAULT_MARKER_SIZE, DISPLAY_AXES};
use crate::error::LayerError;

use super::image::slice_coord;

/// Points stored as an `(N, ndim)` coordinate array, axes in data order.
#[derive(Debug, Clone)]
pub struct MarkersLayer {
    coords: Array2<f64>,
    size: f32,
    edge_width: f32,
    face_color: String,
    edge_color: String,
    symbol: Symbol,
    /// Rows in the current slice, ascending
    in_slice: Vec<usize>,
}

impl MarkersLayer {
    pub fn new(coords: Array2<f64>) -> Result<Self, LayerError> {
        if coords.ncols() < DISPLAY_AXES {
            return Err(LayerError::ShapeMismatch {
                shape: coords.shape().to_vec(),
                reason: format!("markers need at least {} coordinates", DISPLAY_AXES),
            });
        }
        let mut layer = Self {
            coords,
            size: DEFAULT_MARKER_SIZE,
            edge_width: DEFAULT_EDGE_WIDTH,
            face_color: "white".to_string(),
            edge_color: "black".to_string(),
            symbol: Symbol::default(),
            in_slice: Vec::new(),
        };
        layer.set_view_slice(&[]);
        Ok(layer)
    }

    /// Layer with no points and `ndim` coordinates per point.
    pub fn empty(ndim: usize) -> Self {
        Self {
            coords: Array2::zeros((0, ndim.max(DISPLAY_AXES))),
            size: DEFAULT_MARKER_SIZE,
            edge_width: DEFAULT_EDGE_WIDTH,
            face_color: "white".to_string(),
            edge_color: "black".to_string(),
            symbol: Symbol::default(),
            in_slice: Vec::new(),
        }
    }

    pub fn coords(&self) -> &Array2<f64> {
        &self.coords
    }

    pub fn len(&self) -> usize {
        self.coords.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.nrows() == 0
    }

    pub fn ndim(&self) -> usize {
        self.coords.ncols()
    }

    /// One past the largest rounded coordinate along every axis.
    pub fn extent(&self) -> Vec<usize> {
        self.coords
            .columns()
            .into_iter()
            .map(|column| {
                column
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

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub(crate) fn apply_style(&mut self, attr: &StyleAttr) -> Result<(), StyleError> {
        match attr {
            StyleAttr::Size(size) => self.size = check_range("size", *size, SIZE_RANGE)?,
            StyleAttr::EdgeWidth(width) => {
                self.edge_width = check_range("edge_width", *width, SIZE_RANGE)?
            }
            StyleAttr::FaceColor(name) => self.face_color = check_color(name)?,
            StyleAttr::EdgeColor(name) => self.edge_color = check_color(name)?,
            StyleAttr::Symbol(name) => self.symbol = check_symbol(name)?,
            _ => return Err(StyleError::unsupported(attr, LayerKind::Markers)),
        }
        Ok(())
    }

    /// Add a point at `position` in the slice at `indices`. Returns its row.
    pub fn add_point(&mut self, position: [f64; 2], indices: &[usize]) -> Result<usize, LayerError> {
        let point: Vec<f64> = (0..self.ndim())
            .map(|axis| match axis {
                0 | 1 => position[axis],
                _ => indices.get(axis).copied().unwrap_or(0) as f64,
            })
            .collect();
        self.coords
            .push_row(ArrayView1::from(&point))
            .map_err(|e| LayerError::ShapeMismatch {
                shape: vec![point.len()],
                reason: e.to_string(),
            })?;
        let row = self.coords.nrows() - 1;
        self.in_slice.push(row);
        Ok(row)
    }

    pub fn set_view_slice(&mut self, indices: &[usize]) {
        self.in_slice = self
            .coords
            .rows()
            .into_iter()
            .enumerate()
            .filter(|(_, point)| {
                point.iter().enumerate().skip(DISPLAY_AXES).all(|(axis, &c)| {
                    c.round() as i64 == indices.get(axis).copied().unwrap_or(0) as i64
                })
            })
            .map(|(row, _)| row)
            .collect();
    }

    /// Rows drawn at the current slice.
    pub fn in_slice(&self) -> &[usize] {
        &self.in_slice
    }

    /// Topmost in-slice marker whose center is within `size / 2` of
    /// `position`.
    pub fn get_value(&self, name: &str, position: [f64; 2], indices: &[usize]) -> LayerValue {
        let radius = f64::from(self.size) / 2.0;
        let hit = self.in_slice.iter().rev().copied().find(|&row| {
            let dr = self.coords[[row, 0]] - position[0];
            let dc = self.coords[[row, 1]] - position[1];
            (dr * dr + dc * dc).sqrt() <= radius
        });

        let display = [position[0].round() as i64, position[1].round() as i64];
        let coord = slice_coord(self.ndim(), display, indices, &[]);
        let mut message = format!("{:?}, {}", coord, name);
        if let Some(row) = hit {
            message.push_str(&format!(", index {}", row));
        }
        LayerValue {
            coord,
            value: hit.map(Value::Index),
            message,
        }
    }

    pub fn visual(&self, opacity: f32) -> Visual {
        Visual::Markers(MarkersVisual {
            centers: self
                .in_slice
                .iter()
                .map(|&row| (self.coords[[row, 1]] as f32, self.coords[[row, 0]] as f32))
                .collect(),
            size: self.size,
            edge_width: self.edge_width,
            face_color: palette_color(&self.face_color),
            edge_color: palette_color(&self.edge_color),
            symbol: self.symbol,
            opacity,
        })
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    fn layer() -> MarkersLayer {
        MarkersLayer::new(array![[10.0, 10.0, 0.0], [20.0, 5.0, 1.0], [11.0, 11.0, 0.0]]).unwrap()
    }

    #[test]
    fn test_rejects_one_column() {
        assert!(MarkersLayer::new(array![[1.0], [2.0]]).is_err());
    }

    #[test]
    fn test_extent() {
        assert_eq!(layer().extent(), vec![21, 12, 2]);
        assert_eq!(MarkersLayer::empty(3).extent(), vec![0, 0, 0]);
    }

    #[test]
    fn test_extent_saturates_on_huge_coordinates() {
        let markers = MarkersLayer::new(array![[1.0, -5.0, 1e30], [f64::INFINITY, 0.0, 0.0]]).unwrap();
        assert_eq!(markers.extent(), vec![i64::MAX as usize, 1, i64::MAX as usize]);
    }

    #[test]
    fn test_view_slice_filters_by_extra_axes() {
        let mut markers = layer();
        assert_eq!(markers.in_slice(), &[0, 2]);
        markers.set_view_slice(&[0, 0, 1]);
        assert_eq!(markers.in_slice(), &[1]);
    }

    #[test]
    fn test_get_value_topmost_hit() {
        let markers = layer();
        let hit = markers.get_value("markers 1", [10.4, 10.4], &[0, 0, 0]);
        assert_eq!(hit.value, Some(Value::Index(2)));
        assert_eq!(hit.message, "[10, 10, 0], markers 1, index 2");

        let miss = markers.get_value("markers 1", [40.0, 40.0], &[0, 0, 0]);
        assert_eq!(miss.value, None);
        assert_eq!(miss.message, "[40, 40, 0], markers 1");
    }

    #[test]
    fn test_get_value_ignores_other_slices() {
        let markers = layer();
        // Marker 1 sits on plane 1, which is not the current slice
        assert_eq!(markers.get_value("m", [20.0, 5.0], &[0, 0, 0]).value, None);
    }

    #[test]
    fn test_add_point_joins_current_slice() {
        let mut markers = layer();
        markers.set_view_slice(&[0, 0, 1]);
        let row = markers.add_point([3.0, 4.0], &[0, 0, 1]).unwrap();
        assert_eq!(row, 3);
        assert_eq!(markers.coords().row(3).to_vec(), vec![3.0, 4.0, 1.0]);
        assert_eq!(markers.in_slice(), &[1, 3]);
    }

    #[test]
    fn test_add_point_to_empty_layer() {
        let mut markers = MarkersLayer::empty(2);
        markers.add_point([1.0, 2.0], &[0, 0]).unwrap();
        assert_eq!(markers.len(), 1);
    }

    #[test]
    fn test_style_schema() {
        let mut markers = layer();
        markers.apply_style(&StyleAttr::Symbol("Cross".into())).unwrap();
        assert_eq!(markers.symbol(), Symbol::Cross);
        markers.apply_style(&StyleAttr::FaceColor("RED".into())).unwrap();
        assert_eq!(markers.face_color(), "red");
        assert!(matches!(
            markers.apply_style(&StyleAttr::Size(-1.0)),
            Err(StyleError::OutOfRange { .. })
        ));
        assert!(matches!(
            markers.apply_style(&StyleAttr::VertexColor("red".into())),
            Err(StyleError::Unsupported { .. })
        ));
    }
}
