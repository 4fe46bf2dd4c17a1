//! Which layers the cursor talks to.
//!
//! Both functions are pure: they read the layer stack and return a result,
//! leaving notification to the viewer.

use crate::layers::{Layer, LayerKind};

/// Layers taking part in cursor queries and annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveElements {
    /// Topmost visible image
    pub active_image: Option<usize>,
    /// Visible markers layers above the active image, topmost first
    pub visible_markers: Vec<usize>,
    /// First selected entry of `visible_markers`
    pub active_markers: Option<usize>,
}

impl ActiveElements {
    /// Scan the stack from the top down.
    pub fn resolve(layers: &[Layer]) -> Self {
        let mut active_image = None;
        let mut visible_markers = Vec::new();

        let mut found = false;
        let mut index = layers.len();
        while index > 0 && !found {
            index -= 1;
            let layer = &layers[index];
            if !layer.is_visible() {
                continue;
            }
            match layer.kind() {
                LayerKind::Image => {
                    active_image = Some(index);
                    found = true;
                }
                LayerKind::Markers => visible_markers.push(index),
                LayerKind::Rectangles => {}
            }
        }

        let active_markers = visible_markers
            .iter()
            .copied()
            .find(|&i| layers[i].is_selected());

        Self {
            active_image,
            visible_markers,
            active_markers,
        }
    }
}

/// Status text for the cursor at `position` (row, col).
///
/// The first visible markers layer with something under the cursor wins;
/// otherwise the active image reports its pixel. With neither, the status
/// is empty.
pub fn resolve_status(
    layers: &[Layer],
    active: &ActiveElements,
    position: [f64; 2],
    indices: &[usize],
) -> String {
    let hit = active.visible_markers.iter().find_map(|&i| {
        let value = layers.get(i)?.get_value(position, indices);
        value.value.is_some().then_some(value.message)
    });
    if let Some(message) = hit {
        return message;
    }
    active
        .active_image
        .and_then(|i| layers.get(i))
        .map(|image| image.get_value(position, indices).message)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use ndarray::{array, Array, IxDyn};

    use super::*;
    use crate::layers::{ImageLayer, LayerData, MarkersLayer};

    fn image(visible: bool) -> Layer {
        let data = ImageLayer::new(Array::from_elem(IxDyn(&[20, 20]), 0.5), false).unwrap();
        let mut layer = Layer::new("image", LayerData::Image(data));
        layer.set_visible(visible);
        layer
    }

    fn markers(name: &str, visible: bool, selected: bool) -> Layer {
        let data = MarkersLayer::new(array![[5.0, 5.0]]).unwrap();
        let mut layer = Layer::new(name, LayerData::Markers(data));
        layer.set_visible(visible);
        layer.set_selected(selected);
        layer
    }

    #[test]
    fn test_scan_stops_at_topmost_visible_image() {
        let layers = vec![
            image(false),
            markers("m1", true, true),
            image(true),
            markers("m3", true, false),
        ];
        let active = ActiveElements::resolve(&layers);
        assert_eq!(active.active_image, Some(2));
        assert_eq!(active.visible_markers, vec![3]);
        assert_eq!(active.active_markers, None);
    }

    #[test]
    fn test_no_visible_image_collects_all_markers() {
        let layers = vec![
            image(false),
            markers("m1", true, true),
            image(false),
            markers("m3", true, false),
        ];
        let active = ActiveElements::resolve(&layers);
        assert_eq!(active.active_image, None);
        assert_eq!(active.visible_markers, vec![3, 1]);
        assert_eq!(active.active_markers, Some(1));
    }

    #[test]
    fn test_hidden_markers_skipped() {
        let layers = vec![markers("a", false, true), markers("b", true, false)];
        let active = ActiveElements::resolve(&layers);
        assert_eq!(active.visible_markers, vec![1]);
        assert_eq!(active.active_markers, None);
    }

    #[test]
    fn test_empty_stack() {
        assert_eq!(ActiveElements::resolve(&[]), ActiveElements::default());
    }

    #[test]
    fn test_status_prefers_marker_hit() {
        let layers = vec![image(true), markers("points", true, false)];
        let active = ActiveElements::resolve(&layers);

        let status = resolve_status(&layers, &active, [5.0, 6.0], &[0, 0]);
        assert_eq!(status, "[5, 6], points, index 0");

        let status = resolve_status(&layers, &active, [15.0, 15.0], &[0, 0]);
        assert_eq!(status, "[15, 15], image, value 0.5");
    }

    #[test]
    fn test_status_empty_without_image() {
        let layers = vec![markers("points", true, false)];
        let active = ActiveElements::resolve(&layers);
        assert_eq!(resolve_status(&layers, &active, [15.0, 15.0], &[0, 0]), "");
    }
}
