//! Generated demo data.
//!
//! The demo volume has shape `(height, width, planes)`; each plane along the
//! last axis has its own pattern so stepping the slider is easy to follow:
//! - Plane 0: Horizontal gradient
//! - Plane 1: Vertical gradient
//! - Plane 2: Checkerboard
//! - Plane 3: Circular pattern (radial gradient)
//! - Plane 4: Concentric rings
//! - Plane 5: Noise-like pattern
//! - Plane 6+: Offset gradients

use ndarray::{Array, Array2, Array3, IxDyn};

use crate::data::Volume;

/// Default demo shape (height, width, planes).
pub const SAMPLE_SHAPE: (usize, usize, usize) = (128, 160, 8);

/// Generate the demo volume.
pub fn sample_volume(height: usize, width: usize, planes: usize) -> Volume {
    log::info!(
        "Generating sample volume: {}x{} with {} planes",
        height,
        width,
        planes
    );
    let data = Array::from_shape_fn(IxDyn(&[height, width, planes]), |ix| {
        plane_pixel(ix[2], ix[1], ix[0], width, height)
    });
    Volume::new(data).contrast_range(0.0, 1.0).source("sample")
}

fn plane_pixel(plane: usize, x: usize, y: usize, width: usize, height: usize) -> f32 {
    let fx = x as f32 / width as f32;
    let fy = y as f32 / height as f32;

    match plane {
        0 => fx,
        1 => fy,
        2 => {
            let checker = ((x / 16) + (y / 16)) % 2 == 0;
            if checker { 0.8 } else { 0.2 }
        }
        3 => {
            let dist = ((fx - 0.5).powi(2) + (fy - 0.5).powi(2)).sqrt();
            (1.0 - dist * 2.0).clamp(0.0, 1.0)
        }
        4 => {
            let dist = ((fx - 0.5).powi(2) + (fy - 0.5).powi(2)).sqrt();
            ((dist * 20.0).sin() * 0.5 + 0.5).clamp(0.0, 1.0)
        }
        5 => {
            let noise = ((x as f32 * 12.9898 + y as f32 * 78.233).sin() * 43758.5453).fract();
            noise.abs() * 0.5 + fy * 0.5
        }
        _ => {
            let offset = (plane as f32 * 0.1) % 1.0;
            ((fx + offset) % 1.0 + fy) / 2.0
        }
    }
}

/// Points on a circle around the volume center, one per plane.
///
/// Rows are `(row, col, plane)` so each marker shows on exactly one plane.
pub fn sample_markers(height: usize, width: usize, planes: usize) -> Array2<f64> {
    let (cy, cx) = (height as f64 / 2.0, width as f64 / 2.0);
    let radius = cy.min(cx) / 2.0;
    Array2::from_shape_fn((planes, 3), |(i, axis)| {
        let angle = i as f64 / planes.max(1) as f64 * std::f64::consts::TAU;
        match axis {
            0 => (cy + radius * angle.sin()).round(),
            1 => (cx + radius * angle.cos()).round(),
            _ => i as f64,
        }
    })
}

/// One box around the checkerboard plane's top-left tile.
pub fn sample_rectangles() -> Array3<f64> {
    ndarray::array![[[0.0, 0.0, 2.0], [15.0, 15.0, 2.0]]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_shape_and_range() {
        let volume = sample_volume(16, 20, 7);
        assert_eq!(volume.data.shape(), &[16, 20, 7]);
        assert!(volume.data.iter().all(|v| (0.0..=1.0).contains(v)));
        assert_eq!(volume.data[IxDyn(&[0, 10, 0])], 0.5);
        assert_eq!(volume.name().as_deref(), Some("sample"));
    }

    #[test]
    fn test_markers_one_per_plane() {
        let markers = sample_markers(100, 100, 4);
        assert_eq!(markers.dim(), (4, 3));
        assert_eq!(markers.row(0).to_vec(), vec![50.0, 75.0, 0.0]);
        assert_eq!(markers[[3, 2]], 3.0);
    }
}
