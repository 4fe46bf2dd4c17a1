//! The viewer: composition root for dimensions, layers and the canvas.
//!
//! Controls never mutate state directly. They produce [`Message`]s that go
//! through [`Viewer::update`]; every state change that observers care about
//! is announced on one of the typed channels in [`ViewerEvents`].

use std::path::Path;

use log::{debug, info};
use ndarray::{Array2, Array3, ArrayD};
use ndview_render::{Canvas, RasterCanvas, RenderRequest, Scene};

use crate::active::{ActiveElements, resolve_status};
use crate::config::LayerDefaults;
use crate::constants::{ANNOTATION_HELP, MAX_ZOOM, MIN_ZOOM, READY_STATUS, ZOOM_FACTOR};
use crate::control_bars::ControlBars;
use crate::data::Volume;
use crate::dims::Dimensions;
use crate::error::{LayerError, Result, ViewerError};
use crate::events::{LayerListChange, ViewerEvents};
use crate::layers::{
    guess_multichannel, ImageLayer, Layer, LayerData, LayerId, LayerKind, LayerList, MarkersLayer,
    RectanglesLayer, StyleAttr,
};
use crate::message::{Key, Message};
use crate::ui::LayerPanel;

#[cfg(test)]
mod tests;

/// Layered N-dimensional image viewer.
#[derive(Debug)]
pub struct Viewer<C: Canvas = RasterCanvas> {
    dims: Dimensions,
    layers: LayerList,
    control_bars: ControlBars,
    canvas: C,
    events: ViewerEvents,
    active: ActiveElements,

    status: String,
    help: String,
    annotation: bool,
    /// Annotation state saved while space is held
    annotation_history: Option<bool>,
    /// Cursor position in data coordinates (row, col)
    position: [f64; 2],

    defaults: LayerDefaults,
}

impl<C: Canvas> Viewer<C> {
    pub fn new(canvas: C) -> Self {
        Self {
            dims: Dimensions::new(),
            layers: LayerList::new(),
            control_bars: ControlBars::new(),
            canvas,
            events: ViewerEvents::default(),
            active: ActiveElements::default(),
            status: READY_STATUS.to_string(),
            help: String::new(),
            annotation: false,
            annotation_history: None,
            position: [0.0, 0.0],
            defaults: LayerDefaults::default(),
        }
    }

    /// Style applied to markers and rectangles layers added from now on.
    pub fn with_defaults(mut self, defaults: LayerDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn dims(&self) -> &Dimensions {
        &self.dims
    }

    pub fn layers(&self) -> &LayerList {
        &self.layers
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn control_bars(&self) -> &ControlBars {
        &self.control_bars
    }

    pub fn control_bars_mut(&mut self) -> &mut ControlBars {
        &mut self.control_bars
    }

    pub fn events(&self) -> &ViewerEvents {
        &self.events
    }

    /// Subscribe to notifications.
    pub fn events_mut(&mut self) -> &mut ViewerEvents {
        &mut self.events
    }

    pub fn active(&self) -> &ActiveElements {
        &self.active
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn annotation(&self) -> bool {
        self.annotation
    }

    pub fn position(&self) -> [f64; 2] {
        self.position
    }

    /// Per-layer controls for the current stack.
    pub fn panel(&self) -> LayerPanel {
        LayerPanel::build(&self.layers)
    }

    // =========================================================================
    // Adding layers
    // =========================================================================

    /// Put `layer` on top of the stack as the sole selection.
    ///
    /// The first layer added to an empty viewer also fits the view to it.
    pub fn add_layer(&mut self, mut layer: Layer) -> LayerId {
        let first = self.layers.is_empty();
        let id = layer.id();

        self.layers.unselect_all();
        layer.set_selected(true);
        info!("Adding {} layer '{}'", layer.kind(), layer.name());
        let index = self.layers.append(layer);
        self.events.layers.emit(&LayerListChange::Added { id, index });

        self.on_layers_change();
        if first {
            self.reset_view();
        }
        id
    }

    /// Add an image layer named after the layer count.
    pub fn add_image(&mut self, data: ArrayD<f32>, multichannel: bool) -> Result<LayerId> {
        let image = ImageLayer::new(data, multichannel)?;
        let name = self.layers.next_name(LayerKind::Image);
        Ok(self.add_layer(Layer::new(name, LayerData::Image(image))))
    }

    /// Add an image layer, treating a trailing axis of 3 or 4 as color.
    pub fn imshow(&mut self, data: ArrayD<f32>) -> Result<LayerId> {
        let multichannel = guess_multichannel(data.shape());
        self.add_image(data, multichannel)
    }

    /// Add a loaded volume, keeping its source name and contrast range.
    pub fn add_volume(&mut self, volume: Volume) -> Result<LayerId> {
        let name = volume
            .name()
            .unwrap_or_else(|| self.layers.next_name(LayerKind::Image));
        let mut image = ImageLayer::new(volume.data, volume.multichannel)?;
        if let Some((low, high)) = volume.contrast_range {
            image = image.with_contrast_range(low, high)?;
        }
        Ok(self.add_layer(Layer::new(name, LayerData::Image(image))))
    }

    /// Add markers at `coords`, one row per point.
    pub fn add_markers(&mut self, coords: Array2<f64>) -> Result<LayerId> {
        let markers = MarkersLayer::new(coords)?;
        self.add_styled(LayerData::Markers(markers))
    }

    /// Add rectangles from `(N, 2, ndim)` opposite corners.
    pub fn add_rectangles(&mut self, corners: Array3<f64>) -> Result<LayerId> {
        let rects = RectanglesLayer::new(corners)?;
        self.add_styled(LayerData::Rectangles(rects))
    }

    /// Add an empty markers layer spanning the current dimensions.
    pub fn new_markers(&mut self) -> Result<LayerId> {
        let markers = MarkersLayer::empty(self.dims.ndim().max(2));
        self.add_styled(LayerData::Markers(markers))
    }

    fn add_styled(&mut self, data: LayerData) -> Result<LayerId> {
        let kind = match &data {
            LayerData::Image(_) => LayerKind::Image,
            LayerData::Markers(_) => LayerKind::Markers,
            LayerData::Rectangles(_) => LayerKind::Rectangles,
        };
        let mut layer = Layer::new(self.layers.next_name(kind), data);
        self.defaults.apply(&mut layer)?;
        Ok(self.add_layer(layer))
    }

    // =========================================================================
    // Stack mutation
    // =========================================================================

    /// Insert `layer` before `index`.
    pub fn insert_layer(&mut self, index: usize, layer: Layer) -> Result<LayerId> {
        let first = self.layers.is_empty();
        let id = layer.id();
        self.layers.insert(index, layer)?;
        self.events.layers.emit(&LayerListChange::Added { id, index });

        self.on_layers_change();
        if first {
            self.reset_view();
        }
        Ok(id)
    }

    pub fn remove_layer(&mut self, id: LayerId) -> Result<Layer> {
        let layer = self.layers.remove(id)?;
        self.after_removal(&layer);
        Ok(layer)
    }

    /// Remove the layer at `index`, or the top layer.
    pub fn pop_layer(&mut self, index: Option<usize>) -> Result<Layer> {
        let layer = self.layers.pop(index)?;
        self.after_removal(&layer);
        Ok(layer)
    }

    /// Remove every selected layer.
    pub fn remove_selected(&mut self) -> Vec<Layer> {
        let removed = self.layers.remove_selected();
        if removed.is_empty() {
            return removed;
        }
        for layer in &removed {
            info!("Removed layer '{}'", layer.name());
            self.events.layers.emit(&LayerListChange::Removed { id: layer.id() });
        }
        self.on_layers_change();
        removed
    }

    fn after_removal(&mut self, layer: &Layer) {
        info!("Removed layer '{}'", layer.name());
        self.events
            .layers
            .emit(&LayerListChange::Removed { id: layer.id() });
        self.on_layers_change();
    }

    pub fn swap_layers(&mut self, a: usize, b: usize) -> Result<()> {
        self.layers.swap(a, b)?;
        self.after_reorder(true);
        Ok(())
    }

    /// See [`LayerList::reorder`].
    pub fn reorder_layers(&mut self, ordering: &[usize]) -> Result<()> {
        self.layers.reorder(ordering)?;
        self.after_reorder(true);
        Ok(())
    }

    /// Drag-and-drop move; see [`LayerList::move_layers`].
    pub fn move_layers(&mut self, index: usize, insert: usize) -> Result<bool> {
        let changed = self.layers.move_layers(index, insert)?;
        self.after_reorder(changed);
        Ok(changed)
    }

    fn after_reorder(&mut self, changed: bool) {
        if changed {
            self.events.layers.emit(&LayerListChange::Reordered);
        }
        self.update_active_layers();
        self.refresh_status();
        self.canvas.update();
    }

    pub fn unselect_all(&mut self) {
        if self.layers.unselect_all() {
            self.update_active_layers();
        }
    }

    pub fn set_visible(&mut self, id: LayerId, visible: bool) -> Result<()> {
        let layer = self.layers.by_id_mut(id).ok_or(LayerError::NotFound(id))?;
        if layer.set_visible(visible) {
            debug!("Layer '{}' visible: {}", layer.name(), visible);
            self.update_active_layers();
            self.refresh_status();
            self.canvas.update();
        }
        Ok(())
    }

    pub fn set_selected(&mut self, id: LayerId, selected: bool) -> Result<()> {
        let layer = self.layers.by_id_mut(id).ok_or(LayerError::NotFound(id))?;
        if layer.set_selected(selected) {
            debug!("Layer '{}' selected: {}", layer.name(), selected);
            self.update_active_layers();
            self.canvas.update();
        }
        Ok(())
    }

    /// Validated style write.
    pub fn set_style(&mut self, id: LayerId, attr: &StyleAttr) -> Result<()> {
        let layer = self.layers.by_id_mut(id).ok_or(LayerError::NotFound(id))?;
        layer.set_style(attr)?;
        if matches!(attr, StyleAttr::Clim(..)) {
            self.sync_control_bars();
        }
        self.canvas.update();
        Ok(())
    }

    /// Recompute dimensions, re-slice and refresh derived state after the
    /// set of layers changed.
    fn on_layers_change(&mut self) {
        self.refresh_dims();
        self.update_active_layers();
    }

    /// Follow layer extents with the dimension sliders and re-slice.
    fn refresh_dims(&mut self) {
        let extents: Vec<Vec<usize>> = self.layers.iter().map(Layer::extent).collect();
        self.dims.on_layers_change(extents.iter().map(Vec::as_slice));
        self.update_layers();
    }

    // =========================================================================
    // Derived state
    // =========================================================================

    /// Re-resolve the active elements and follow them with the control bar.
    pub fn update_active_layers(&mut self) {
        let resolved = ActiveElements::resolve(self.layers.as_slice());
        let active_markers = resolved.active_markers;
        self.active = ActiveElements {
            active_markers: self.active.active_markers,
            ..resolved
        };
        self.set_active_markers(active_markers);
        self.sync_control_bars();
    }

    fn sync_control_bars(&mut self) {
        let (status, update) = self.control_bars.sync(&self.layers);
        self.events.update_slider.emit(&update);
        self.set_status(status);
    }

    /// Re-slice every layer at the current indices.
    pub fn update_layers(&mut self) {
        self.dims.take_redraw();
        let indices = self.dims.indices();
        for layer in self.layers.iter_mut() {
            layer.set_view_slice(indices);
        }
        self.refresh_status();
        self.canvas.update();
    }

    /// Move the slider of `axis` to `index`.
    pub fn set_index(&mut self, axis: isize, index: usize) -> Result<bool> {
        let changed = self.dims.set_index(axis, index)?;
        if changed {
            self.update_layers();
        }
        Ok(changed)
    }

    fn refresh_status(&mut self) {
        if self.layers.is_empty() {
            return;
        }
        let status = resolve_status(
            self.layers.as_slice(),
            &self.active,
            self.position,
            self.dims.indices(),
        );
        self.set_status(status);
    }

    // =========================================================================
    // Properties
    // =========================================================================

    pub fn set_status(&mut self, status: impl Into<String>) {
        let status = status.into();
        if self.status == status {
            return;
        }
        self.status = status;
        self.events.status.emit(&self.status);
    }

    pub fn set_help(&mut self, help: impl Into<String>) {
        let help = help.into();
        if self.help == help {
            return;
        }
        self.help = help;
        self.events.help.emit(&self.help);
    }

    pub fn set_annotation_flag(&mut self, annotation: bool) {
        if self.annotation == annotation {
            return;
        }
        self.annotation = annotation;
        debug!("Annotation mode: {}", annotation);
        self.events.annotation.emit(&annotation);
    }

    pub fn set_active_markers(&mut self, active_markers: Option<usize>) {
        if self.active.active_markers == active_markers {
            return;
        }
        self.active.active_markers = active_markers;
        self.events.active_markers.emit(&active_markers);
    }

    /// Turn annotation mode on or off along with its help text.
    pub fn set_annotation(&mut self, enabled: bool) {
        self.set_annotation_flag(enabled);
        self.set_help(if enabled { ANNOTATION_HELP } else { "" });
    }

    // =========================================================================
    // View
    // =========================================================================

    /// Drawables for every visible layer, bottom to top.
    pub fn scene(&self) -> Scene {
        let mut scene = Scene::new();
        for visual in self.layers.iter().filter_map(Layer::visual) {
            scene.push(visual);
        }
        scene
    }

    /// Fit the camera to all visible content.
    pub fn reset_view(&mut self) {
        let bounds = self.scene().bounds();
        debug!("Resetting view to {:?}", bounds);
        self.canvas.set_range(bounds);
    }

    /// Render the current scene off-screen to `(height, width, 4)` RGBA.
    pub fn screenshot(&self, request: &RenderRequest) -> Result<Array3<u8>> {
        Ok(self.canvas.render(&self.scene(), request)?)
    }

    /// Render and write a PNG (or any format `image` infers from the path).
    pub fn save_screenshot(&self, path: &Path, request: &RenderRequest) -> Result<()> {
        let pixels = self.screenshot(request)?;
        let (height, width, _) = pixels.dim();
        let raw: Vec<u8> = pixels.iter().copied().collect();
        let image = image::RgbaImage::from_raw(width as u32, height as u32, raw).ok_or_else(|| {
            ViewerError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "screenshot buffer does not match its size",
            ))
        })?;
        image.save(path)?;
        info!("Saved screenshot {}x{} to {}", width, height, path.display());
        Ok(())
    }

    fn pan(&mut self, dx: f32, dy: f32) {
        let camera = self.canvas.camera().pan_by(dx, dy);
        *self.canvas.camera_mut() = camera;
    }

    fn zoom(&mut self, delta: f32, x: f32, y: f32) {
        let camera = *self.canvas.camera();
        let zoom = (camera.zoom * ZOOM_FACTOR.powf(delta)).clamp(MIN_ZOOM, MAX_ZOOM);
        *self.canvas.camera_mut() = camera.zoom_to_cursor(zoom, x, y, self.canvas.size());
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Store the cursor position (row, col in data coordinates) and refresh
    /// the status text.
    pub fn set_position(&mut self, position: [f64; 2]) {
        self.position = position;
        self.refresh_status();
    }

    /// Cursor moved to canvas pixel `(x, y)`.
    pub fn on_mouse_move(&mut self, x: f32, y: f32) {
        let (col, row) = self.canvas.screen_to_world(x, y);
        self.set_position([f64::from(row), f64::from(col)]);
    }

    /// Primary button pressed at canvas pixel `(x, y)`.
    ///
    /// While annotating, adds a marker to the active markers layer and
    /// returns its index.
    pub fn on_mouse_press(&mut self, x: f32, y: f32) -> Result<Option<usize>> {
        self.on_mouse_move(x, y);
        if !self.annotation {
            return Ok(None);
        }
        let Some(index) = self.active.active_markers else {
            return Ok(None);
        };
        let Some(markers) = self.layers.get_mut(index).and_then(Layer::as_markers_mut) else {
            return Ok(None);
        };
        let point = markers.add_point(self.position, self.dims.indices())?;
        debug!("Added marker {} at {:?}", point, self.position);
        self.refresh_dims();
        Ok(Some(point))
    }

    fn on_key_press(&mut self, key: Key) {
        match key {
            Key::Space => {
                if self.annotation && self.annotation_history.is_none() {
                    self.annotation_history = Some(true);
                    self.set_annotation(false);
                }
            }
            Key::Home => self.reset_view(),
            Key::Other => {}
        }
    }

    fn on_key_release(&mut self, key: Key) {
        if key == Key::Space {
            if let Some(annotation) = self.annotation_history.take() {
                self.set_annotation(annotation);
            }
        }
    }

    /// Apply a UI intent.
    pub fn update(&mut self, message: Message) -> Result<()> {
        match message {
            Message::Dims(message) => {
                if self.dims.apply(message) {
                    self.update_layers();
                }
            }
            Message::ClimChanged(low, high) => {
                let status = self.control_bars.on_slider_changed(low, high, &mut self.layers);
                self.set_status(status);
                self.canvas.update();
            }
            Message::LayerStyle { layer, attr } => self.set_style(layer, &attr)?,
            Message::SetVisible { layer, visible } => self.set_visible(layer, visible)?,
            Message::SetSelected { layer, selected } => self.set_selected(layer, selected)?,
            Message::MoveLayer { index, insert } => {
                self.move_layers(index, insert)?;
            }
            Message::RemoveSelected => {
                self.remove_selected();
            }
            Message::NewMarkers => {
                self.new_markers()?;
            }
            Message::SetAnnotation(enabled) => self.set_annotation(enabled),
            Message::ResetView => self.reset_view(),
            Message::KeyPressed(key) => self.on_key_press(key),
            Message::KeyReleased(key) => self.on_key_release(key),
            Message::MouseMoved { x, y } => self.on_mouse_move(x, y),
            Message::MousePressed { x, y } => {
                self.on_mouse_press(x, y)?;
            }
            Message::MouseDragged { dx, dy } => {
                if !self.annotation {
                    self.pan(dx, dy);
                }
            }
            Message::Scrolled { delta, x, y } => {
                if !self.annotation {
                    self.zoom(delta, x, y);
                }
            }
        }
        Ok(())
    }
}
