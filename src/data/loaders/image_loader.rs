//! Loader for standard image formats (PNG, JPEG, BMP, TIFF, WebP).

use image::DynamicImage;
use ndarray::{Array, IxDyn};

use crate::data::Volume;
use crate::data::loader::{LoaderError, VolumeLoader};

/// Loader for standard image formats.
///
/// Grayscale images become `(height, width)` arrays. Color images become
/// `(height, width, 3)` or, with an alpha channel, `(height, width, 4)` and
/// are flagged multichannel. Values stay in 0-255.
pub struct ImageLoader;

impl ImageLoader {
    fn to_volume(img: DynamicImage) -> Result<Volume, String> {
        let color = img.color();
        let (width, height) = (img.width() as usize, img.height() as usize);

        let volume = if !color.has_color() && !color.has_alpha() {
            let gray = img.to_luma8();
            let data = Array::from_shape_vec(
                IxDyn(&[height, width]),
                gray.into_raw().into_iter().map(f32::from).collect(),
            )
            .map_err(|e| e.to_string())?;
            Volume::new(data)
        } else {
            let (channels, raw) = if color.has_alpha() {
                (4, img.to_rgba8().into_raw())
            } else {
                (3, img.to_rgb8().into_raw())
            };
            let data = Array::from_shape_vec(
                IxDyn(&[height, width, channels]),
                raw.into_iter().map(f32::from).collect(),
            )
            .map_err(|e| e.to_string())?;
            Volume::new(data).multichannel(true)
        };

        log::trace!(
            "ImageLoader: loaded {}x{} image as {:?}",
            width,
            height,
            volume.data.shape()
        );
        Ok(volume.contrast_range(0.0, 255.0))
    }
}

impl VolumeLoader for ImageLoader {
    fn id(&self) -> &'static str {
        "image"
    }

    fn display_name(&self) -> &'static str {
        "Standard Image"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["png", "jpg", "jpeg", "bmp", "tiff", "tif", "webp"]
    }

    fn can_load(&self, data: &[u8]) -> bool {
        if data.len() < 8 {
            return false;
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return true;
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return true;
        }

        // BMP: 42 4D (BM)
        if data.starts_with(&[0x42, 0x4D]) {
            return true;
        }

        // TIFF: 49 49 2A 00 (little endian) or 4D 4D 00 2A (big endian)
        if data.starts_with(&[0x49, 0x49, 0x2A, 0x00])
            || data.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
        {
            return true;
        }

        // WebP: RIFF....WEBP
        data.len() >= 12 && data.starts_with(&[0x52, 0x49, 0x46, 0x46]) && &data[8..12] == b"WEBP"
    }

    fn load(&self, data: &[u8]) -> Result<Volume, LoaderError> {
        image::load_from_memory(data)
            .map_err(|e| e.to_string())
            .and_then(Self::to_volume)
            .map_err(|reason| LoaderError::decode(self.id(), reason))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{GrayImage, ImageFormat, Luma, Rgb, RgbImage};

    use super::*;

    fn png_bytes(img: DynamicImage) -> Vec<u8> {
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_magic_detection() {
        let loader = ImageLoader;
        assert!(loader.can_load(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]));
        assert!(loader.can_load(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46]));
        assert!(!loader.can_load(&[0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07]));
    }

    #[test]
    fn test_grayscale_is_two_dimensional() {
        let img = GrayImage::from_fn(3, 2, |x, y| Luma([(x + 10 * y) as u8]));
        let volume = ImageLoader.load(&png_bytes(DynamicImage::ImageLuma8(img))).unwrap();

        assert_eq!(volume.data.shape(), &[2, 3]);
        assert_eq!(volume.data[IxDyn(&[1, 2])], 12.0);
        assert!(!volume.multichannel);
        assert_eq!(volume.contrast_range, Some((0.0, 255.0)));
    }

    #[test]
    fn test_rgb_is_multichannel() {
        let img = RgbImage::from_pixel(4, 2, Rgb([200, 100, 50]));
        let volume = ImageLoader.load(&png_bytes(DynamicImage::ImageRgb8(img))).unwrap();

        assert_eq!(volume.data.shape(), &[2, 4, 3]);
        assert_eq!(volume.data[IxDyn(&[0, 3, 1])], 100.0);
        assert!(volume.multichannel);
    }

    #[test]
    fn test_corrupt_data() {
        let err = ImageLoader.load(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]).unwrap_err();
        assert!(matches!(err, LoaderError::Decode { loader: "image", .. }));
    }
}
