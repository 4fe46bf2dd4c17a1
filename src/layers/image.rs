//! Image layers: N-dimensional scalar or multichannel arrays.

use ndarray::{ArrayD, Axis, IxDyn};
use ndview_render::{Colormap, ImageVisual, Visual};

use super::style::{check_clim, check_colormap, StyleAttr, StyleError};
use super::{LayerKind, LayerValue, Value};
use crate::constants::{DISPLAY_AXES, MULTICHANNEL_LENGTHS};
use crate::error::LayerError;

/// Guess whether `shape` carries color channels in its last axis.
///
/// Only 3-D data whose last axis has 3 or 4 entries qualifies.
pub fn guess_multichannel(shape: &[usize]) -> bool {
    shape.len() == 3 && MULTICHANNEL_LENGTHS.contains(&shape[2])
}

/// Image data plus its current 2-D slice.
#[derive(Debug, Clone)]
pub struct ImageLayer {
    data: ArrayD<f32>,
    multichannel: bool,
    colormap: Colormap,
    clim: (f32, f32),
    clim_range: (f32, f32),
    /// Slice at the current indices: `(rows, cols)` or `(rows, cols, channels)`
    slice: ArrayD<f32>,
}

impl ImageLayer {
    /// Wrap `data`. With `multichannel`, the last axis holds 1 to 4 color
    /// channels and is not a slider axis.
    pub fn new(data: ArrayD<f32>, multichannel: bool) -> Result<Self, LayerError> {
        let shape = data.shape().to_vec();
        let min_ndim = DISPLAY_AXES + usize::from(multichannel);
        if shape.len() < min_ndim {
            return Err(LayerError::ShapeMismatch {
                reason: format!("expected at least {} axes", min_ndim),
                shape,
            });
        }
        if shape.contains(&0) {
            return Err(LayerError::ShapeMismatch {
                shape,
                reason: "axes must not be empty".to_string(),
            });
        }
        if multichannel && shape[shape.len() - 1] > 4 {
            return Err(LayerError::ShapeMismatch {
                shape,
                reason: "channel axis holds at most 4 channels".to_string(),
            });
        }

        let clim_range = data_range(&data);
        let slice = slice_at(&data, shape.len() - usize::from(multichannel), &[]);
        Ok(Self {
            data,
            multichannel,
            colormap: Colormap::default(),
            clim: clim_range,
            clim_range,
            slice,
        })
    }

    /// Replace the range the contrast slider spans (and reset clim to it).
    pub fn with_contrast_range(mut self, low: f32, high: f32) -> Result<Self, StyleError> {
        self.clim_range = check_clim(low, high)?;
        self.clim = self.clim_range;
        Ok(self)
    }

    pub fn data(&self) -> &ArrayD<f32> {
        &self.data
    }

    pub fn is_multichannel(&self) -> bool {
        self.multichannel
    }

    /// Number of spatial/slider axes (channel axis excluded).
    pub fn ndim(&self) -> usize {
        self.data.ndim() - usize::from(self.multichannel)
    }

    /// Length of every non-channel axis.
    pub fn extent(&self) -> Vec<usize> {
        self.data.shape()[..self.ndim()].to_vec()
    }

    pub fn colormap(&self) -> Colormap {
        self.colormap
    }

    pub fn clim(&self) -> (f32, f32) {
        self.clim
    }

    /// Data range the contrast slider maps onto.
    pub fn clim_range(&self) -> (f32, f32) {
        self.clim_range
    }

    /// Set contrast limits without validation (slider path, `low == high`
    /// allowed).
    pub(crate) fn set_clim(&mut self, low: f32, high: f32) {
        self.clim = (low.min(high), low.max(high));
    }

    pub(crate) fn apply_style(&mut self, attr: &StyleAttr) -> Result<(), StyleError> {
        match attr {
            StyleAttr::Colormap(name) => self.colormap = check_colormap(name)?,
            StyleAttr::Clim(low, high) => self.clim = check_clim(*low, *high)?,
            _ => return Err(StyleError::unsupported(attr, LayerKind::Image)),
        }
        Ok(())
    }

    pub fn set_view_slice(&mut self, indices: &[usize]) {
        self.slice = slice_at(&self.data, self.ndim(), indices);
    }

    /// Value under `position` (row, col), clipped into the image.
    pub fn get_value(&self, name: &str, position: [f64; 2], indices: &[usize]) -> LayerValue {
        let shape = self.slice.shape();
        let row = clip(position[0], shape[0]);
        let col = clip(position[1], shape[1]);

        let value = if self.multichannel {
            let pixel = self.slice.index_axis(Axis(0), row);
            let pixel = pixel.index_axis(Axis(0), col);
            Value::Channels(pixel.iter().copied().collect())
        } else {
            Value::Scalar(self.slice[IxDyn(&[row, col])])
        };

        let coord = slice_coord(self.ndim(), [row as i64, col as i64], indices, self.data.shape());
        let message = format!("{:?}, {}, value {}", coord, name, value);
        LayerValue {
            coord,
            value: Some(value),
            message,
        }
    }

    fn normalize(&self, value: f32) -> f32 {
        let (low, high) = self.clim;
        if high > low {
            ((value - low) / (high - low)).clamp(0.0, 1.0)
        } else if value >= low {
            1.0
        } else {
            0.0
        }
    }

    /// Current slice as straight-alpha RGBA.
    pub fn rgba(&self) -> Vec<u8> {
        let mut pixels = Vec::with_capacity(self.slice.shape()[0] * self.slice.shape()[1] * 4);
        if self.multichannel {
            for lane in self.slice.lanes(Axis(2)) {
                let v: Vec<u8> = lane.iter().map(|&v| to_u8(self.normalize(v))).collect();
                let pixel = match v.as_slice() {
                    [l] => [*l, *l, *l, 255],
                    [l, a] => [*l, *l, *l, *a],
                    [r, g, b] => [*r, *g, *b, 255],
                    [r, g, b, a, ..] => [*r, *g, *b, *a],
                    [] => [0, 0, 0, 0],
                };
                pixels.extend_from_slice(&pixel);
            }
        } else {
            for &value in self.slice.iter() {
                pixels.extend_from_slice(&self.colormap.map(self.normalize(value)));
            }
        }
        pixels
    }

    pub fn visual(&self, opacity: f32) -> Visual {
        Visual::Image(ImageVisual {
            pixels: self.rgba(),
            width: self.slice.shape()[1] as u32,
            height: self.slice.shape()[0] as u32,
            opacity,
        })
    }
}

/// Finite min/max of `data`; never returns an empty range.
fn data_range(data: &ArrayD<f32>) -> (f32, f32) {
    let (min, max) = data
        .iter()
        .filter(|v| v.is_finite())
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if !min.is_finite() {
        (0.0, 1.0)
    } else if min == max {
        (min, min + 1.0)
    } else {
        (min, max)
    }
}

/// Take the 2-D (or 2-D + channels) slice at `indices` along every axis
/// from 2 to `ndim`.
fn slice_at(data: &ArrayD<f32>, ndim: usize, indices: &[usize]) -> ArrayD<f32> {
    let mut view = data.view();
    // Highest axis first so lower axis numbers stay valid
    for axis in (DISPLAY_AXES..ndim).rev() {
        let len = view.len_of(Axis(axis));
        let index = indices.get(axis).copied().unwrap_or(0).min(len - 1);
        view = view.index_axis_move(Axis(axis), index);
    }
    view.to_owned()
}

fn clip(position: f64, len: usize) -> usize {
    if position.is_nan() {
        return 0;
    }
    position.round().clamp(0.0, (len - 1) as f64) as usize
}

fn to_u8(t: f32) -> u8 {
    if t.is_nan() {
        0
    } else {
        (t * 255.0).round() as u8
    }
}

/// Coordinate of `display` within the slice at `indices`, one entry per axis.
pub(crate) fn slice_coord(ndim: usize, display: [i64; 2], indices: &[usize], shape: &[usize]) -> Vec<i64> {
    (0..ndim)
        .map(|axis| match axis {
            0 | 1 => display[axis],
            _ => {
                let index = indices.get(axis).copied().unwrap_or(0);
                match shape.get(axis) {
                    Some(&len) if len > 0 => index.min(len - 1) as i64,
                    _ => index as i64,
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use ndarray::{Array, Array3};

    use super::*;

    /// 4 rows, 5 cols, 3 planes; value = plane * 100 + row * 10 + col
    fn stack() -> ArrayD<f32> {
        Array3::from_shape_fn((4, 5, 3), |(r, c, p)| (p * 100 + r * 10 + c) as f32).into_dyn()
    }

    #[test]
    fn test_guess_multichannel() {
        assert!(guess_multichannel(&[10, 10, 3]));
        assert!(guess_multichannel(&[10, 10, 4]));
        assert!(!guess_multichannel(&[10, 10, 5]));
        assert!(!guess_multichannel(&[10, 10, 3, 3]));
        assert!(!guess_multichannel(&[10, 10]));
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert!(ImageLayer::new(Array::zeros(IxDyn(&[5])), false).is_err());
        assert!(ImageLayer::new(Array::zeros(IxDyn(&[5, 0])), false).is_err());
        assert!(ImageLayer::new(Array::zeros(IxDyn(&[5, 5])), true).is_err());
        assert!(ImageLayer::new(Array::zeros(IxDyn(&[5, 5, 6])), true).is_err());
    }

    #[test]
    fn test_extent_excludes_channels() {
        let layer = ImageLayer::new(Array::zeros(IxDyn(&[6, 7, 3])), true).unwrap();
        assert_eq!(layer.ndim(), 2);
        assert_eq!(layer.extent(), vec![6, 7]);

        let layer = ImageLayer::new(stack(), false).unwrap();
        assert_eq!(layer.extent(), vec![4, 5, 3]);
    }

    #[test]
    fn test_view_slice_selects_plane() {
        let mut layer = ImageLayer::new(stack(), false).unwrap();
        let value = layer.get_value("image 0", [1.0, 2.0], &[0, 0, 0]);
        assert_eq!(value.value, Some(Value::Scalar(12.0)));

        layer.set_view_slice(&[0, 0, 2]);
        let value = layer.get_value("image 0", [1.0, 2.0], &[0, 0, 2]);
        assert_eq!(value.value, Some(Value::Scalar(212.0)));
        assert_eq!(value.coord, vec![1, 2, 2]);
        assert_eq!(value.message, "[1, 2, 2], image 0, value 212");
    }

    #[test]
    fn test_get_value_clips_position() {
        let layer = ImageLayer::new(stack(), false).unwrap();
        let value = layer.get_value("img", [-3.0, 99.4], &[0, 0, 0]);
        assert_eq!(value.coord, vec![0, 4, 0]);
        assert_eq!(value.value, Some(Value::Scalar(4.0)));
    }

    #[test]
    fn test_multichannel_value_and_pixels() {
        let data = Array3::from_shape_fn((2, 2, 3), |(_, _, ch)| [0.0, 127.5, 255.0][ch]).into_dyn();
        let layer = ImageLayer::new(data, true)
            .unwrap()
            .with_contrast_range(0.0, 255.0)
            .unwrap();

        let value = layer.get_value("rgb", [0.0, 1.0], &[]);
        assert_eq!(value.value, Some(Value::Channels(vec![0.0, 127.5, 255.0])));
        assert_eq!(&layer.rgba()[..4], &[0, 128, 255, 255]);
    }

    #[test]
    fn test_clim_style_validated() {
        let mut layer = ImageLayer::new(stack(), false).unwrap();
        assert_eq!(layer.clim_range(), (0.0, 234.0));
        assert!(layer.apply_style(&StyleAttr::Clim(5.0, 1.0)).is_err());
        layer.apply_style(&StyleAttr::Clim(10.0, 20.0)).unwrap();
        assert_eq!(layer.clim(), (10.0, 20.0));
        assert!(layer.apply_style(&StyleAttr::Size(3.0)).is_err());
    }

    #[test]
    fn test_flat_data_gets_unit_range() {
        let layer = ImageLayer::new(Array::from_elem(IxDyn(&[3, 3]), 7.0), false).unwrap();
        assert_eq!(layer.clim_range(), (7.0, 8.0));
        assert_eq!(&layer.rgba()[..4], &[0, 0, 0, 255]);
    }
}
