//! The canvas call surface and its software implementation.

use ndarray::Array3;
use tiny_skia::{
    BlendMode, FillRule, FilterQuality, IntSize, Paint, PathBuilder, Pixmap, PixmapPaint, Rect,
    Stroke, Transform,
};

use crate::camera::{Bounds, Camera};
use crate::color::Color;
use crate::error::{RenderError, Result};
use crate::scene::{ImageVisual, MarkersVisual, RectanglesVisual, Scene, Symbol, Visual};

/// Default canvas background.
pub const DEFAULT_BACKGROUND: Color = Color::BLACK;

/// Pixel rectangle `(x, y, width, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Off-screen render parameters. Every field is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderRequest {
    /// Part of the canvas to render, in canvas pixels. Default: whole canvas.
    pub region: Option<Region>,
    /// Output `(width, height)`. Default: the region size.
    pub size: Option<(u32, u32)>,
    /// Background color. Default: the canvas background.
    pub bgcolor: Option<Color>,
    /// Pixels to keep, relative to the rendered output. Default: everything.
    pub crop: Option<Region>,
}

/// Rendering surface used by the viewer.
pub trait Canvas {
    /// Canvas size in pixels `(width, height)`.
    fn size(&self) -> (u32, u32);

    fn resize(&mut self, width: u32, height: u32);

    fn camera(&self) -> &Camera;

    fn camera_mut(&mut self) -> &mut Camera;

    fn background(&self) -> Color;

    /// Fit the camera to `bounds`, or to a unit square when there is nothing
    /// to show.
    fn set_range(&mut self, bounds: Option<Bounds>);

    /// Render `scene` off-screen into a `(height, width, 4)` RGBA buffer whose
    /// index `[0, 0]` is the top-left pixel.
    fn render(&self, scene: &Scene, request: &RenderRequest) -> Result<Array3<u8>>;

    /// Request a redraw at the next paint.
    fn update(&mut self);

    /// Consume the pending redraw request.
    fn take_redraw(&mut self) -> bool;

    /// Map canvas pixels to world coordinates.
    fn screen_to_world(&self, x: f32, y: f32) -> (f32, f32) {
        self.camera().screen_to_world(x, y, self.size())
    }
}

/// CPU canvas rasterizing scenes with tiny-skia.
#[derive(Debug, Clone)]
pub struct RasterCanvas {
    width: u32,
    height: u32,
    camera: Camera,
    background: Color,
    needs_redraw: bool,
}

impl RasterCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            camera: Camera::identity(),
            background: DEFAULT_BACKGROUND,
            needs_redraw: true,
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }
}

impl Canvas for RasterCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.needs_redraw = true;
    }

    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut Camera {
        self.needs_redraw = true;
        &mut self.camera
    }

    fn background(&self) -> Color {
        self.background
    }

    fn set_range(&mut self, bounds: Option<Bounds>) {
        let bounds = bounds.unwrap_or(Bounds::new(0.0, 0.0, 1.0, 1.0));
        self.camera = Camera::fit(bounds, self.size());
        log::debug!(
            "Camera fit to {:?}: zoom {:.3}, pan ({:.1}, {:.1})",
            bounds,
            self.camera.zoom,
            self.camera.pan_x,
            self.camera.pan_y
        );
        self.needs_redraw = true;
    }

    fn render(&self, scene: &Scene, request: &RenderRequest) -> Result<Array3<u8>> {
        let region = request
            .region
            .unwrap_or(Region::new(0, 0, self.width, self.height));
        if region.width == 0 || region.height == 0 {
            return Err(RenderError::EmptyRegion {
                width: region.width,
                height: region.height,
            });
        }

        let (out_width, out_height) = request.size.unwrap_or((region.width, region.height));
        if out_width == 0 || out_height == 0 {
            return Err(RenderError::EmptyRegion {
                width: out_width,
                height: out_height,
            });
        }

        let mut pixmap = Pixmap::new(out_width, out_height).ok_or(RenderError::Pixmap {
            width: out_width,
            height: out_height,
        })?;
        pixmap.fill(request.bgcolor.unwrap_or(self.background).to_skia());

        let mapping = OutputMapping::new(&self.camera, self.size(), region, (out_width, out_height));
        for visual in scene.visuals() {
            match visual {
                Visual::Image(image) => draw_image(&mut pixmap, image, &mapping)?,
                Visual::Markers(markers) => draw_markers(&mut pixmap, markers, &mapping),
                Visual::Rectangles(rects) => draw_rectangles(&mut pixmap, rects, &mapping),
            }
        }

        let crop = request
            .crop
            .unwrap_or(Region::new(0, 0, out_width, out_height));
        if crop.width == 0
            || crop.height == 0
            || crop.x.checked_add(crop.width).is_none_or(|end| end > out_width)
            || crop.y.checked_add(crop.height).is_none_or(|end| end > out_height)
        {
            return Err(RenderError::CropOutOfBounds {
                x: crop.x,
                y: crop.y,
                width: crop.width,
                height: crop.height,
                image_width: out_width,
                image_height: out_height,
            });
        }

        to_array(&pixmap, crop)
    }

    fn update(&mut self) {
        self.needs_redraw = true;
    }

    fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }
}

/// World → output-pixel mapping for one render call.
struct OutputMapping {
    zoom: f32,
    scale_x: f32,
    scale_y: f32,
    offset_x: f32,
    offset_y: f32,
}

impl OutputMapping {
    fn new(camera: &Camera, viewport: (u32, u32), region: Region, output: (u32, u32)) -> Self {
        let scale_x = output.0 as f32 / region.width as f32;
        let scale_y = output.1 as f32 / region.height as f32;
        let (origin_x, origin_y) = camera.world_to_screen(0.0, 0.0, viewport);
        Self {
            zoom: camera.zoom,
            scale_x,
            scale_y,
            offset_x: (origin_x - region.x as f32) * scale_x,
            offset_y: (origin_y - region.y as f32) * scale_y,
        }
    }

    fn point(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.offset_x + x * self.zoom * self.scale_x,
            self.offset_y + y * self.zoom * self.scale_y,
        )
    }

    fn transform(&self) -> Transform {
        Transform::from_row(
            self.zoom * self.scale_x,
            0.0,
            0.0,
            self.zoom * self.scale_y,
            self.offset_x,
            self.offset_y,
        )
    }

    /// World length along x in output pixels.
    fn length(&self, world: f32) -> f32 {
        world * self.zoom * self.scale_x
    }
}

fn paint_for(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = true;
    paint
}

fn draw_image(pixmap: &mut Pixmap, image: &ImageVisual, mapping: &OutputMapping) -> Result<()> {
    let expected = image.width as usize * image.height as usize * 4;
    if image.pixels.len() != expected {
        return Err(RenderError::ImageSize {
            expected,
            actual: image.pixels.len(),
        });
    }
    let Some(size) = IntSize::from_wh(image.width, image.height) else {
        return Ok(());
    };

    let premultiplied: Vec<u8> = image
        .pixels
        .chunks_exact(4)
        .flat_map(|px| {
            let a = u16::from(px[3]);
            let mul = |c: u8| ((u16::from(c) * a + 127) / 255) as u8;
            [mul(px[0]), mul(px[1]), mul(px[2]), px[3]]
        })
        .collect();

    let source = Pixmap::from_vec(premultiplied, size).ok_or(RenderError::Pixmap {
        width: image.width,
        height: image.height,
    })?;
    let paint = PixmapPaint {
        opacity: image.opacity.clamp(0.0, 1.0),
        blend_mode: BlendMode::SourceOver,
        quality: FilterQuality::Nearest,
    };
    pixmap.draw_pixmap(0, 0, source.as_ref(), &paint, mapping.transform(), None);
    Ok(())
}

fn draw_markers(pixmap: &mut Pixmap, markers: &MarkersVisual, mapping: &OutputMapping) {
    let radius = mapping.length(markers.size) / 2.0;
    if radius <= 0.0 {
        return;
    }
    let face = paint_for(markers.face_color.with_opacity(markers.opacity));
    let edge = paint_for(markers.edge_color.with_opacity(markers.opacity));
    let stroke = Stroke {
        width: markers.edge_width,
        ..Default::default()
    };

    for &(x, y) in &markers.centers {
        let (cx, cy) = mapping.point(x, y);
        match markers.symbol {
            Symbol::Disc => {
                if let Some(path) = PathBuilder::from_circle(cx, cy, radius) {
                    pixmap.fill_path(&path, &face, FillRule::Winding, Transform::identity(), None);
                    if markers.edge_width > 0.0 {
                        pixmap.stroke_path(&path, &edge, &stroke, Transform::identity(), None);
                    }
                }
            }
            Symbol::Square => {
                if let Some(rect) = Rect::from_xywh(cx - radius, cy - radius, 2.0 * radius, 2.0 * radius) {
                    let path = PathBuilder::from_rect(rect);
                    pixmap.fill_path(&path, &face, FillRule::Winding, Transform::identity(), None);
                    if markers.edge_width > 0.0 {
                        pixmap.stroke_path(&path, &edge, &stroke, Transform::identity(), None);
                    }
                }
            }
            Symbol::Cross => {
                let mut pb = PathBuilder::new();
                pb.move_to(cx - radius, cy);
                pb.line_to(cx + radius, cy);
                pb.move_to(cx, cy - radius);
                pb.line_to(cx, cy + radius);
                if let Some(path) = pb.finish() {
                    let cross = Stroke {
                        width: markers.edge_width.max(1.0),
                        ..Default::default()
                    };
                    pixmap.stroke_path(&path, &face, &cross, Transform::identity(), None);
                }
            }
        }
    }
}

fn draw_rectangles(pixmap: &mut Pixmap, rects: &RectanglesVisual, mapping: &OutputMapping) {
    let face = paint_for(rects.face_color.with_opacity(rects.opacity));
    let edge = paint_for(rects.edge_color.with_opacity(rects.opacity));
    let stroke = Stroke {
        width: rects.edge_width,
        ..Default::default()
    };

    for bounds in &rects.rects {
        let (left, top) = mapping.point(bounds.x, bounds.y);
        let (right, bottom) = mapping.point(bounds.right(), bounds.bottom());
        let Some(rect) = Rect::from_ltrb(left, top, right, bottom) else {
            continue;
        };
        let path = PathBuilder::from_rect(rect);
        pixmap.fill_path(&path, &face, FillRule::Winding, Transform::identity(), None);
        if rects.edge_width > 0.0 {
            pixmap.stroke_path(&path, &edge, &stroke, Transform::identity(), None);
        }

        if let Some((color, size)) = rects.vertices {
            let handle = paint_for(color.with_opacity(rects.opacity));
            let half = size / 2.0;
            for (vx, vy) in [(left, top), (right, top), (right, bottom), (left, bottom)] {
                if let Some(r) = Rect::from_xywh(vx - half, vy - half, size, size) {
                    pixmap.fill_rect(r, &handle, Transform::identity(), None);
                }
            }
        }
    }
}

fn to_array(pixmap: &Pixmap, crop: Region) -> Result<Array3<u8>> {
    let width = pixmap.width() as usize;
    let pixels = pixmap.pixels();
    let mut data = Vec::with_capacity(crop.width as usize * crop.height as usize * 4);
    for row in crop.y..crop.y + crop.height {
        let start = row as usize * width + crop.x as usize;
        for px in &pixels[start..start + crop.width as usize] {
            let c = px.demultiply();
            data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
    }
    Ok(Array3::from_shape_vec(
        (crop.height as usize, crop.width as usize, 4),
        data,
    )?)
}
