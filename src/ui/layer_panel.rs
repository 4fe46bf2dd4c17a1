//! Per-layer controls.
//!
//! The panel is rebuilt from layer state whenever the stack changes. Controls
//! only produce messages; applying them is the viewer's job.

use ndview_render::{color_names, Colormap, Symbol};
use ndview_ui::prelude::*;

use crate::constants::STYLE_SLIDER_MAX;
use crate::layers::{Layer, LayerData, LayerId, LayerKind, LayerList, StyleAttr};
use crate::message::Message;

/// Kind-specific style controls.
#[derive(Debug)]
pub enum StyleControls {
    Image {
        colormap: Dropdown<Message>,
    },
    Markers {
        size: Slider<Message>,
        edge_width: Slider<Message>,
        face_color: Dropdown<Message>,
        edge_color: Dropdown<Message>,
        symbol: Dropdown<Message>,
    },
    Rectangles {
        size: Slider<Message>,
        edge_width: Slider<Message>,
        face_color: Dropdown<Message>,
        edge_color: Dropdown<Message>,
        vertex_color: Dropdown<Message>,
    },
}

/// Control group for one layer.
#[derive(Debug)]
pub struct LayerControls {
    pub layer: LayerId,
    pub name: String,
    pub kind: LayerKind,
    pub visible: Toggle<Message>,
    pub selected: Toggle<Message>,
    /// Percent, 0-100
    pub opacity: Slider<Message>,
    pub style: StyleControls,
}

impl LayerControls {
    pub fn new(layer: &Layer) -> Self {
        let id = layer.id();
        let style = match layer.data() {
            LayerData::Image(image) => StyleControls::Image {
                colormap: dropdown(Colormap::all().iter().map(Colormap::name))
                    .label("colormap".to_string())
                    .selected_text(image.colormap().name())
                    .on_select(move |name| style_message(id, StyleAttr::Colormap(name))),
            },
            LayerData::Markers(markers) => StyleControls::Markers {
                size: size_slider(id, "size", markers.size(), StyleAttr::Size),
                edge_width: size_slider(id, "width", markers.edge_width(), StyleAttr::EdgeWidth),
                face_color: color_dropdown(id, "face_color", markers.face_color(), StyleAttr::FaceColor),
                edge_color: color_dropdown(id, "edge_color", markers.edge_color(), StyleAttr::EdgeColor),
                symbol: dropdown(Symbol::all().iter().map(Symbol::name))
                    .label("symbol".to_string())
                    .selected_text(markers.symbol().name())
                    .on_select(move |name| style_message(id, StyleAttr::Symbol(name))),
            },
            LayerData::Rectangles(rects) => StyleControls::Rectangles {
                size: size_slider(id, "size", rects.size(), StyleAttr::Size),
                edge_width: size_slider(id, "width", rects.edge_width(), StyleAttr::EdgeWidth),
                face_color: color_dropdown(id, "face_color", rects.face_color(), StyleAttr::FaceColor),
                edge_color: color_dropdown(id, "edge_color", rects.edge_color(), StyleAttr::EdgeColor),
                vertex_color: color_dropdown(
                    id,
                    "vertex_color",
                    rects.vertex_color(),
                    StyleAttr::VertexColor,
                ),
            },
        };

        Self {
            layer: id,
            name: layer.name().to_string(),
            kind: layer.kind(),
            visible: Toggle::new(layer.is_visible())
                .label("visible".to_string())
                .on_toggle(move |visible| Message::SetVisible { layer: id, visible }),
            selected: Toggle::new(layer.is_selected())
                .label(layer.name().to_string())
                .on_toggle(move |selected| Message::SetSelected { layer: id, selected }),
            opacity: slider(0, 100)
                .label("opacity".to_string())
                .value((layer.opacity() * 100.0).round() as usize)
                .on_change(move |percent| style_message(id, StyleAttr::Opacity(percent as f32 / 100.0))),
            style,
        }
    }
}

fn style_message(layer: LayerId, attr: StyleAttr) -> Message {
    Message::LayerStyle { layer, attr }
}

fn size_slider(id: LayerId, label: &str, value: f32, attr: fn(f32) -> StyleAttr) -> Slider<Message> {
    slider(0, STYLE_SLIDER_MAX)
        .label(label.to_string())
        .value(value.round().max(0.0) as usize)
        .on_change(move |v| style_message(id, attr(v as f32)))
}

fn color_dropdown(
    id: LayerId,
    label: &str,
    current: &str,
    attr: fn(String) -> StyleAttr,
) -> Dropdown<Message> {
    dropdown(color_names())
        .label(label.to_string())
        .selected_text(current)
        .on_select(move |name| style_message(id, attr(name)))
}

/// Control groups for the whole stack, topmost layer first.
#[derive(Debug, Default)]
pub struct LayerPanel {
    controls: Vec<LayerControls>,
}

impl LayerPanel {
    pub fn build(layers: &LayerList) -> Self {
        Self {
            controls: layers.iter().rev().map(LayerControls::new).collect(),
        }
    }

    pub fn controls(&self) -> &[LayerControls] {
        &self.controls
    }

    pub fn for_layer_mut(&mut self, id: LayerId) -> Option<&mut LayerControls> {
        self.controls.iter_mut().find(|c| c.layer == id)
    }

    /// Turn a drag of panel row `from` onto row `to` into a move message.
    ///
    /// Rows are topmost-first, so both are mirrored into list indices.
    pub fn drag(&self, from: usize, to: usize) -> Option<Message> {
        let len = self.controls.len();
        if from >= len || to > len {
            return None;
        }
        Some(Message::MoveLayer {
            index: len - 1 - from,
            insert: len - to,
        })
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{array, Array, IxDyn};

    use super::*;
    use crate::layers::{ImageLayer, MarkersLayer};

    fn stack() -> LayerList {
        let mut layers = LayerList::new();
        let image = ImageLayer::new(Array::zeros(IxDyn(&[4, 4])), false).unwrap();
        layers.append(Layer::new("image 0", LayerData::Image(image)));
        let markers = MarkersLayer::new(array![[1.0, 1.0]]).unwrap();
        layers.append(Layer::new("markers 1", LayerData::Markers(markers)));
        layers
    }

    #[test]
    fn test_topmost_first() {
        let panel = LayerPanel::build(&stack());
        let names: Vec<_> = panel.controls().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["markers 1", "image 0"]);
    }

    #[test]
    fn test_controls_reflect_state() {
        let mut layers = stack();
        let layer = layers.get_mut(1).unwrap();
        layer.set_style(&StyleAttr::FaceColor("Red".into())).unwrap();
        layer.set_style(&StyleAttr::Opacity(0.5)).unwrap();

        let panel = LayerPanel::build(&layers);
        let controls = &panel.controls()[0];
        assert_eq!(controls.opacity.current(), 50);
        assert_eq!(controls.opacity.label_text(), "opacity");
        assert_eq!(controls.visible.label_text(), "visible");
        assert_eq!(controls.selected.label_text(), "markers 1");
        let StyleControls::Markers { face_color, size, symbol, .. } = &controls.style else {
            panic!("expected marker controls");
        };
        assert_eq!(face_color.current_text(), Some("red"));
        assert_eq!(symbol.label_text(), "symbol");
        assert_eq!(size.current(), 10);
    }

    #[test]
    fn test_controls_emit_messages() {
        let layers = stack();
        let id = layers.get(0).unwrap().id();
        let mut panel = LayerPanel::build(&layers);
        let controls = panel.for_layer_mut(id).unwrap();

        assert_eq!(
            controls.visible.toggle(),
            Some(Message::SetVisible { layer: id, visible: false })
        );
        assert_eq!(
            controls.opacity.set_value(25),
            Some(Message::LayerStyle { layer: id, attr: StyleAttr::Opacity(0.25) })
        );
        let StyleControls::Image { colormap } = &mut controls.style else {
            panic!("expected image controls");
        };
        assert_eq!(
            colormap.activate_text("HSV"),
            Some(Message::LayerStyle { layer: id, attr: StyleAttr::Colormap("hsv".into()) })
        );
    }

    #[test]
    fn test_drag_mirrors_rows() {
        let panel = LayerPanel::build(&stack());
        // Top row dropped below the bottom row
        assert_eq!(panel.drag(0, 2), Some(Message::MoveLayer { index: 1, insert: 0 }));
        assert_eq!(panel.drag(3, 0), None);
    }
}
