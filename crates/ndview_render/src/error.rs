use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Render region is empty: {width}x{height}")]
    EmptyRegion { width: u32, height: u32 },

    #[error("Crop ({x}, {y}, {width}, {height}) exceeds rendered {image_width}x{image_height} buffer")]
    CropOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },

    #[error("Failed to allocate {width}x{height} pixmap")]
    Pixmap { width: u32, height: u32 },

    #[error("Image visual has {actual} bytes, expected {expected}")]
    ImageSize { expected: usize, actual: usize },

    #[error("Buffer shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

pub type Result<T> = std::result::Result<T, RenderError>;
