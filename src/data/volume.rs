//! Loaded array data.

use ndarray::ArrayD;

/// An N-dimensional array ready to become an image layer.
#[derive(Debug, Clone)]
pub struct Volume {
    /// Values in data order; axes 0 and 1 are rows and columns
    pub data: ArrayD<f32>,
    /// Last axis holds color channels
    pub multichannel: bool,
    /// Full value range of the source type (e.g. 0-255 for 8-bit images),
    /// when it is known
    pub contrast_range: Option<(f32, f32)>,
    /// File the data came from
    pub source: Option<String>,
}

impl Volume {
    pub fn new(data: ArrayD<f32>) -> Self {
        Self {
            data,
            multichannel: false,
            contrast_range: None,
            source: None,
        }
    }

    pub fn multichannel(mut self, multichannel: bool) -> Self {
        self.multichannel = multichannel;
        self
    }

    pub fn contrast_range(mut self, low: f32, high: f32) -> Self {
        self.contrast_range = Some((low, high));
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Layer name derived from the source file stem.
    pub fn name(&self) -> Option<String> {
        let source = self.source.as_deref()?;
        std::path::Path::new(source)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{Array, IxDyn};

    use super::*;

    #[test]
    fn test_name_from_source() {
        let volume = Volume::new(Array::zeros(IxDyn(&[2, 2]))).source("/data/cells.npy");
        assert_eq!(volume.name().as_deref(), Some("cells"));
        assert_eq!(Volume::new(Array::zeros(IxDyn(&[2, 2]))).name(), None);
    }
}
