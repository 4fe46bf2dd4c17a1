//! Data loading for the viewer.
//!
//! This module provides:
//! - `Volume`: an N-dimensional array plus how it should be displayed
//! - `LoaderRegistry`: format detection and loading from bytes or paths
//! - Built-in loaders for images (PNG, JPEG, etc.) and NumPy (.npy) files
//! - `sample`: generated demo data
//!
//! ## Adding New Formats
//!
//! 1. Create a new loader in `loaders/` implementing `VolumeLoader`
//! 2. Register it in `LoaderRegistry::new()`

mod loader;
pub mod loaders;
pub mod sample;
mod volume;

pub use loader::{LoaderError, LoaderRegistry, VolumeLoader};
pub use volume::Volume;
