//! Viewer scenario tests.
//!
//! These drive the viewer the way a frontend would and check state and the
//! notifications it emits.

mod annotation_tests;
mod event_tests;
mod layer_tests;

use std::cell::RefCell;
use std::rc::Rc;

use ndarray::{Array, Array3, ArrayD, IxDyn};
use ndview_render::{Bounds, Camera, Canvas, Color, RasterCanvas, RenderRequest, Scene};

use super::Viewer;

/// Raster canvas that counts view resets.
#[derive(Debug)]
pub(super) struct CountingCanvas {
    inner: RasterCanvas,
    pub resets: usize,
}

impl CountingCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            inner: RasterCanvas::new(width, height),
            resets: 0,
        }
    }
}

impl Canvas for CountingCanvas {
    fn size(&self) -> (u32, u32) {
        self.inner.size()
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.inner.resize(width, height);
    }

    fn camera(&self) -> &Camera {
        self.inner.camera()
    }

    fn camera_mut(&mut self) -> &mut Camera {
        self.inner.camera_mut()
    }

    fn background(&self) -> Color {
        self.inner.background()
    }

    fn set_range(&mut self, bounds: Option<Bounds>) {
        self.resets += 1;
        self.inner.set_range(bounds);
    }

    fn render(&self, scene: &Scene, request: &RenderRequest) -> ndview_render::Result<Array3<u8>> {
        self.inner.render(scene, request)
    }

    fn update(&mut self) {
        self.inner.update();
    }

    fn take_redraw(&mut self) -> bool {
        self.inner.take_redraw()
    }
}

pub(super) fn viewer() -> Viewer<CountingCanvas> {
    Viewer::new(CountingCanvas::new(200, 100))
}

/// `(rows, cols, planes)` volume whose value encodes its index.
pub(super) fn volume(rows: usize, cols: usize, planes: usize) -> ArrayD<f32> {
    Array::from_shape_fn(IxDyn(&[rows, cols, planes]), |ix| {
        (ix[0] * 100 + ix[1] * 10 + ix[2]) as f32
    })
}

/// Record every value emitted on a channel.
pub(super) fn record<T: Clone + 'static>(
    emitter: &mut crate::events::Emitter<T>,
) -> Rc<RefCell<Vec<T>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    emitter.connect(move |value: &T| sink.borrow_mut().push(value.clone()));
    log
}
