//! Pan/zoom camera mapping world (data) coordinates onto the canvas.
//!
//! World space uses image conventions: `x` grows along columns, `y` grows
//! down along rows, and pixel `(row, col)` covers `[col, col + 1) x [row, row + 1)`.
//! Screen space is canvas pixels with the origin at the top-left corner.
//!
//! The mapping is `screen = viewport_center + pan + world * zoom`.

/// Relative padding added around content when fitting the view.
pub const FIT_MARGIN: f32 = 0.05;

/// Axis-aligned rectangle in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounds spanning two corner points in any order.
    pub fn from_corners(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new(x1.min(x2), y1.min(y2), (x2 - x1).abs(), (y2 - y1).abs())
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Check if a point lies inside (edges included).
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Smallest bounds covering both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Bounds::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }
}

/// Pan/zoom transform state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub zoom: f32,
    pub pan_x: f32,
    pub pan_y: f32,
}

impl Camera {
    /// Create a camera with the given zoom and pan.
    pub fn new(zoom: f32, pan_x: f32, pan_y: f32) -> Self {
        Self { zoom, pan_x, pan_y }
    }

    /// Create an identity camera (zoom=1, no pan).
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// Camera that shows all of `bounds` centered in a `viewport` of
    /// `(width, height)` pixels, keeping a square pixel aspect.
    pub fn fit(bounds: Bounds, viewport: (u32, u32)) -> Self {
        let width = (bounds.width * (1.0 + 2.0 * FIT_MARGIN)).max(f32::EPSILON);
        let height = (bounds.height * (1.0 + 2.0 * FIT_MARGIN)).max(f32::EPSILON);
        let zoom = (viewport.0.max(1) as f32 / width).min(viewport.1.max(1) as f32 / height);
        let (cx, cy) = bounds.center();
        Self::new(zoom, -cx * zoom, -cy * zoom)
    }

    /// Map a world point to canvas pixels.
    pub fn world_to_screen(&self, x: f32, y: f32, viewport: (u32, u32)) -> (f32, f32) {
        let (vcx, vcy) = viewport_center(viewport);
        (vcx + self.pan_x + x * self.zoom, vcy + self.pan_y + y * self.zoom)
    }

    /// Map canvas pixels back to a world point.
    pub fn screen_to_world(&self, x: f32, y: f32, viewport: (u32, u32)) -> (f32, f32) {
        let (vcx, vcy) = viewport_center(viewport);
        (
            (x - vcx - self.pan_x) / self.zoom,
            (y - vcy - self.pan_y) / self.zoom,
        )
    }

    /// Calculate zoom-to-cursor transformation.
    ///
    /// The world point under the cursor stays under the cursor after zooming.
    pub fn zoom_to_cursor(
        &self,
        new_zoom: f32,
        cursor_x: f32,
        cursor_y: f32,
        viewport: (u32, u32),
    ) -> Camera {
        let (vcx, vcy) = viewport_center(viewport);
        let cursor_rel_x = cursor_x - vcx;
        let cursor_rel_y = cursor_y - vcy;

        let world_x = (cursor_rel_x - self.pan_x) / self.zoom;
        let world_y = (cursor_rel_y - self.pan_y) / self.zoom;

        Camera {
            zoom: new_zoom,
            pan_x: cursor_rel_x - world_x * new_zoom,
            pan_y: cursor_rel_y - world_y * new_zoom,
        }
    }

    /// Apply a pan delta in screen pixels.
    pub fn pan_by(&self, dx: f32, dy: f32) -> Camera {
        Camera {
            zoom: self.zoom,
            pan_x: self.pan_x + dx,
            pan_y: self.pan_y + dy,
        }
    }

    /// Zoom in by a factor (e.g., 1.2 for 20% zoom in).
    pub fn zoom_in(&self, factor: f32, max_zoom: f32) -> Camera {
        Camera {
            zoom: (self.zoom * factor).min(max_zoom),
            ..*self
        }
    }

    /// Zoom out by a factor (e.g., 1.2 for 20% zoom out).
    pub fn zoom_out(&self, factor: f32, min_zoom: f32) -> Camera {
        Camera {
            zoom: (self.zoom / factor).max(min_zoom),
            ..*self
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::identity()
    }
}

fn viewport_center(viewport: (u32, u32)) -> (f32, f32) {
    (viewport.0 as f32 / 2.0, viewport.1 as f32 / 2.0)
}
