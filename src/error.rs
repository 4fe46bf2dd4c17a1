//! Error types for viewer operations.

use thiserror::Error;

use crate::layers::{LayerId, StyleError};

/// Errors raised by the dimensions tracker.
///
/// Both kinds signal a caller error and are surfaced immediately.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DimsError {
    /// Axis is outside `[-ndim, ndim)`
    #[error("axis {axis} out of bounds for {ndim} dims")]
    OutOfBounds {
        /// The axis as requested
        axis: isize,
        /// Number of dimensions at the time of the request
        ndim: usize,
    },

    /// Axis is one of the two display axes, which have no slider row
    #[error("cannot convert y/x-axes to rows (axis {axis})")]
    DisplayAxis {
        /// The resolved axis
        axis: usize,
    },
}

/// Errors raised by layer collection operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayerError {
    /// No layer with this id is in the collection
    #[error("layer {0} not found")]
    NotFound(LayerId),

    /// Index outside the collection
    #[error("index {index} out of range for {len} layers")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Collection length
        len: usize,
    },

    /// A reorder listed the same index twice
    #[error("duplicate index: {0}")]
    DuplicateIndex(usize),

    /// A reorder did not list every index
    #[error("indices {0:?} not provided")]
    MissingIndices(Vec<usize>),

    /// Layer data does not have the expected shape
    #[error("invalid layer data shape {shape:?}: {reason}")]
    ShapeMismatch {
        /// Offending shape
        shape: Vec<usize>,
        /// What was expected
        reason: String,
    },
}

/// Top-level error for viewer operations.
#[derive(Error, Debug)]
pub enum ViewerError {
    #[error(transparent)]
    Dims(#[from] DimsError),

    #[error(transparent)]
    Layer(#[from] LayerError),

    #[error(transparent)]
    Style(#[from] StyleError),

    #[error("Render error: {0}")]
    Render(#[from] ndview_render::RenderError),

    #[error("Load error: {0}")]
    Load(#[from] crate::data::LoaderError),

    #[error("Image encode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
