//! Top-level window binding one viewer to an application frame.

use std::cell::RefCell;
use std::rc::Rc;

use ndview_render::{Canvas, RasterCanvas};

use crate::constants::{DEFAULT_WINDOW_SIZE, READY_STATUS};
use crate::viewer::Viewer;

/// Application frame the window lives in.
pub trait Frame {
    fn resize(&mut self, width: u32, height: u32);

    fn size(&self) -> (u32, u32);

    /// Preferred size for the current contents.
    fn size_hint(&self) -> (u32, u32);

    fn show(&mut self);

    /// Bring to the front.
    fn raise(&mut self);

    /// Replace the status-bar text.
    fn show_message(&mut self, message: &str);
}

/// Frame without a native window. Records what it was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessFrame {
    size: (u32, u32),
    size_hint: (u32, u32),
    visible: bool,
    raised: bool,
    message: String,
}

impl HeadlessFrame {
    pub fn new(size_hint: (u32, u32)) -> Self {
        Self {
            size: (0, 0),
            size_hint,
            visible: false,
            raised: false,
            message: String::new(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_raised(&self) -> bool {
        self.raised
    }

    /// Current status-bar text.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for HeadlessFrame {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}

impl Frame for HeadlessFrame {
    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn size_hint(&self) -> (u32, u32) {
        self.size_hint
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn raise(&mut self) {
        self.raised = true;
    }

    fn show_message(&mut self, message: &str) {
        self.message = message.to_string();
    }
}

/// A viewer inside a frame. The frame's status bar mirrors the viewer
/// status.
pub struct Window<F: Frame + 'static, C: Canvas = RasterCanvas> {
    frame: Rc<RefCell<F>>,
    viewer: Viewer<C>,
}

impl<F: Frame + 'static, C: Canvas> Window<F, C> {
    pub fn new(frame: F, mut viewer: Viewer<C>) -> Self {
        let frame = Rc::new(RefCell::new(frame));
        frame.borrow_mut().show_message(READY_STATUS);

        let status_frame = Rc::clone(&frame);
        viewer
            .events_mut()
            .status
            .connect(move |status: &String| status_frame.borrow_mut().show_message(status));

        Self { frame, viewer }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.frame.borrow_mut().resize(width, height);
    }

    /// Resize to the size hint, show and raise.
    pub fn show(&mut self) {
        let mut frame = self.frame.borrow_mut();
        let (width, height) = frame.size_hint();
        frame.resize(width, height);
        frame.show();
        frame.raise();
    }

    pub fn frame(&self) -> std::cell::Ref<'_, F> {
        self.frame.borrow()
    }

    pub fn viewer(&self) -> &Viewer<C> {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut Viewer<C> {
        &mut self.viewer
    }
}

impl<F: Frame + 'static, C: Canvas> std::fmt::Debug for Window<F, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("size", &self.frame.borrow().size())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{Array, IxDyn};

    use super::*;

    fn window() -> Window<HeadlessFrame> {
        Window::new(HeadlessFrame::new((640, 480)), Viewer::new(RasterCanvas::new(100, 100)))
    }

    #[test]
    fn test_starts_ready() {
        let window = window();
        assert_eq!(window.frame().message(), "Ready");
        assert!(!window.frame().is_visible());
    }

    #[test]
    fn test_status_is_mirrored() {
        let mut window = window();
        let data = Array::from_shape_fn(IxDyn(&[4, 4]), |ix| (ix[0] * 4 + ix[1]) as f32);
        window.viewer_mut().add_image(data, false).unwrap();
        window.viewer_mut().set_position([1.0, 2.0]);

        assert_eq!(window.viewer().status(), "[1, 2], image 0, value 6");
        assert_eq!(window.frame().message(), "[1, 2], image 0, value 6");
    }

    #[test]
    fn test_show_uses_size_hint() {
        let mut window = window();
        window.resize(10, 20);
        assert_eq!(window.frame().size(), (10, 20));

        window.show();
        assert_eq!(window.frame().size(), (640, 480));
        assert!(window.frame().is_visible());
        assert!(window.frame().is_raised());
    }
}
