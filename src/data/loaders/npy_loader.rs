//! Loader for NumPy `.npy` files.

use std::io::Cursor;

use ndarray::ArrayD;
use ndarray_npy::ReadNpyExt;

use crate::data::Volume;
use crate::data::loader::{LoaderError, VolumeLoader};

/// Loader for NumPy `.npy` files.
///
/// Axes are kept in file order: axis 0 is rows, axis 1 is columns and every
/// further axis gets a slider. Values are kept as-is; 8-bit arrays report
/// their full 0-255 range as contrast range.
///
/// Supported data types: `f32`, `f64`, `u8`, `u16`, `i16`, `i32`.
pub struct NpyLoader;

impl NpyLoader {
    /// NumPy magic bytes: \x93NUMPY
    const MAGIC: &'static [u8] = &[0x93, b'N', b'U', b'M', b'P', b'Y'];

    fn to_volume<T>(array: ArrayD<T>) -> Result<Volume, String>
    where
        T: NumericConvert + Copy,
    {
        log::debug!("NpyLoader: array shape = {:?}", array.shape());
        if array.ndim() < 2 {
            return Err(format!(
                "{}-dimensional array, expected at least 2 axes",
                array.ndim()
            ));
        }
        let volume = Volume::new(array.mapv(<T as NumericConvert>::to_f32));
        Ok(match T::CONTRAST_RANGE {
            Some((low, high)) => volume.contrast_range(low, high),
            None => volume,
        })
    }

    fn try_read<T>(data: &[u8]) -> Option<Result<Volume, String>>
    where
        T: NumericConvert + Copy + ndarray_npy::ReadableElement,
    {
        ArrayD::<T>::read_npy(Cursor::new(data))
            .ok()
            .map(Self::to_volume)
    }
}

impl VolumeLoader for NpyLoader {
    fn id(&self) -> &'static str {
        "npy"
    }

    fn display_name(&self) -> &'static str {
        "NumPy Array (.npy)"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["npy"]
    }

    fn can_load(&self, data: &[u8]) -> bool {
        data.len() >= Self::MAGIC.len() && data.starts_with(Self::MAGIC)
    }

    fn load(&self, data: &[u8]) -> Result<Volume, LoaderError> {
        // Most likely dtypes first
        Self::try_read::<f32>(data)
            .or_else(|| Self::try_read::<f64>(data))
            .or_else(|| Self::try_read::<u8>(data))
            .or_else(|| Self::try_read::<u16>(data))
            .or_else(|| Self::try_read::<i16>(data))
            .or_else(|| Self::try_read::<i32>(data))
            .unwrap_or_else(|| Err("unsupported dtype or malformed header".to_string()))
            .map_err(|reason| LoaderError::decode(self.id(), reason))
    }

    fn priority(&self) -> i32 {
        10
    }
}

/// Element types readable from `.npy` files.
trait NumericConvert {
    /// Full value range of the type, when it is a useful display default
    const CONTRAST_RANGE: Option<(f32, f32)> = None;

    fn to_f32(self) -> f32;
}

impl NumericConvert for f32 {
    fn to_f32(self) -> f32 {
        self
    }
}

impl NumericConvert for f64 {
    fn to_f32(self) -> f32 {
        self as f32
    }
}

impl NumericConvert for u8 {
    const CONTRAST_RANGE: Option<(f32, f32)> = Some((0.0, 255.0));

    fn to_f32(self) -> f32 {
        f32::from(self)
    }
}

impl NumericConvert for u16 {
    fn to_f32(self) -> f32 {
        f32::from(self)
    }
}

impl NumericConvert for i16 {
    fn to_f32(self) -> f32 {
        f32::from(self)
    }
}

impl NumericConvert for i32 {
    fn to_f32(self) -> f32 {
        self as f32
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{Array, IxDyn};
    use ndarray_npy::WriteNpyExt;

    use super::*;

    fn npy_bytes<T: ndarray_npy::WritableElement>(array: &ArrayD<T>) -> Vec<u8> {
        let mut bytes = Vec::new();
        array.write_npy(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_magic_detection() {
        let loader = NpyLoader;
        assert!(loader.can_load(&[0x93, b'N', b'U', b'M', b'P', b'Y', 0x01, 0x00]));
        assert!(!loader.can_load(&[0x89, 0x50, 0x4E, 0x47]));
    }

    #[test]
    fn test_load_keeps_shape_and_values() {
        let array = Array::from_shape_fn(IxDyn(&[4, 5, 3]), |ix| (ix[0] * 100 + ix[1] * 10 + ix[2]) as f64);
        let volume = NpyLoader.load(&npy_bytes(&array)).unwrap();

        assert_eq!(volume.data.shape(), &[4, 5, 3]);
        assert_eq!(volume.data[IxDyn(&[3, 2, 1])], 321.0);
        assert!(!volume.multichannel);
        assert_eq!(volume.contrast_range, None);
    }

    #[test]
    fn test_u8_reports_full_range() {
        let array = Array::from_elem(IxDyn(&[2, 2]), 7u8);
        let volume = NpyLoader.load(&npy_bytes(&array)).unwrap();
        assert_eq!(volume.contrast_range, Some((0.0, 255.0)));
        assert_eq!(volume.data[IxDyn(&[1, 1])], 7.0);
    }

    #[test]
    fn test_one_dimensional_rejected() {
        let array = Array::from_elem(IxDyn(&[6]), 1.0f32);
        let err = NpyLoader.load(&npy_bytes(&array)).unwrap_err();
        let LoaderError::Decode { loader, reason } = err else {
            panic!("expected decode error");
        };
        assert_eq!(loader, "npy");
        assert!(reason.contains("at least 2"));
    }
}
