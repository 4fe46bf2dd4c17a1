//! Color-limit control bar.

use log::debug;
use ndview_ui::RangeSlider;

use crate::constants::READY_STATUS;
use crate::events::SliderUpdate;
use crate::layers::LayerList;
use crate::message::Message;

/// Range slider mapping `[0, 1]` onto the contrast range of the selected
/// image layers.
#[derive(Debug)]
pub struct ControlBars {
    slider: RangeSlider<Message>,
}

impl Default for ControlBars {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlBars {
    pub fn new() -> Self {
        Self {
            slider: RangeSlider::new().on_change(|(low, high)| Message::ClimChanged(low, high)),
        }
    }

    pub fn slider(&self) -> &RangeSlider<Message> {
        &self.slider
    }

    pub fn slider_mut(&mut self) -> &mut RangeSlider<Message> {
        &mut self.slider
    }

    /// Apply slider handles to every selected image layer.
    ///
    /// Returns the status text: the last updated layer's limits, or
    /// `"Ready"` when no image is selected.
    pub fn on_slider_changed(&mut self, low: f32, high: f32, layers: &mut LayerList) -> String {
        self.slider.sync(Some((low, high)), self.slider.is_enabled());
        let (low, high) = self.slider.values();

        let mut status = READY_STATUS.to_string();
        for layer in layers.iter_mut().filter(|l| l.is_selected()) {
            let Some(image) = layer.as_image_mut() else {
                continue;
            };
            let (min, max) = image.clim_range();
            let cmin = min + low * (max - min);
            let cmax = min + high * (max - min);
            image.set_clim(cmin, cmax);
            debug!("Contrast limits ({}, {})", cmin, cmax);
            status = format!("({:.3}, {:.3})", cmin, cmax);
        }
        status
    }

    /// Follow the topmost selected image layer.
    ///
    /// Returns the status text and the slider state to broadcast.
    pub fn sync(&mut self, layers: &LayerList) -> (String, SliderUpdate) {
        let selected_image = layers
            .iter()
            .rev()
            .filter(|layer| layer.is_selected())
            .find_map(|layer| layer.as_image());

        match selected_image {
            Some(image) => {
                let (min, max) = image.clim_range();
                let (cmin, cmax) = image.clim();
                let values = ((cmin - min) / (max - min), (cmax - min) / (max - min));
                self.slider.sync(Some(values), true);
                let update = SliderUpdate {
                    values: Some(self.slider.values()),
                    enabled: true,
                };
                (format!("({:.3}, {:.3})", cmin, cmax), update)
            }
            None => {
                self.slider.sync(None, false);
                let update = SliderUpdate {
                    values: None,
                    enabled: false,
                };
                (READY_STATUS.to_string(), update)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{Array, IxDyn};

    use super::*;
    use crate::layers::{ImageLayer, Layer, LayerData, MarkersLayer, StyleAttr};

    fn image_list(selected: bool) -> LayerList {
        let data = Array::from_shape_fn(IxDyn(&[2, 2]), |ix| (ix[0] * 2 + ix[1]) as f32 * 10.0);
        let mut layer = Layer::new("image 0", LayerData::Image(ImageLayer::new(data, false).unwrap()));
        layer.set_selected(selected);
        let mut list = LayerList::new();
        list.append(layer);
        list
    }

    #[test]
    fn test_slider_maps_onto_clim_range() {
        let mut bars = ControlBars::new();
        let mut layers = image_list(true);

        let status = bars.on_slider_changed(0.25, 0.5, &mut layers);
        assert_eq!(status, "(7.500, 15.000)");
        assert_eq!(layers.get(0).unwrap().as_image().unwrap().clim(), (7.5, 15.0));
    }

    #[test]
    fn test_slider_without_selection_reports_ready() {
        let mut bars = ControlBars::new();
        let mut layers = image_list(false);
        assert_eq!(bars.on_slider_changed(0.0, 0.5, &mut layers), "Ready");
        assert_eq!(layers.get(0).unwrap().as_image().unwrap().clim(), (0.0, 30.0));
    }

    #[test]
    fn test_sync_follows_selected_image() {
        let mut bars = ControlBars::new();
        let mut layers = image_list(true);
        layers
            .get_mut(0)
            .unwrap()
            .set_style(&StyleAttr::Clim(3.0, 27.0))
            .unwrap();

        let (status, update) = bars.sync(&layers);
        assert_eq!(status, "(3.000, 27.000)");
        assert!(update.enabled);
        let (low, high) = update.values.unwrap();
        assert!((low - 0.1).abs() < 1e-6);
        assert!((high - 0.9).abs() < 1e-6);
        assert!(bars.slider().is_enabled());
    }

    #[test]
    fn test_sync_disables_without_image() {
        let mut bars = ControlBars::new();
        let mut layers = LayerList::new();
        layers.append(Layer::new("m", LayerData::Markers(MarkersLayer::empty(2))));
        layers.get_mut(0).unwrap().set_selected(true);

        let (status, update) = bars.sync(&layers);
        assert_eq!(status, "Ready");
        assert_eq!(update, SliderUpdate { values: None, enabled: false });
        assert!(!bars.slider().is_enabled());
        assert_eq!(bars.slider_mut().set_values(0.2, 0.3), None);
    }
}
