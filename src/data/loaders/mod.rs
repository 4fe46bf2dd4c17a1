//! Built-in [`VolumeLoader`](super::VolumeLoader) implementations.

mod image_loader;
mod npy_loader;

pub use image_loader::ImageLoader;
pub use npy_loader::NpyLoader;
