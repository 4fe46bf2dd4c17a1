//! Picking a decoder for a file and turning it into a [`Volume`].
//!
//! A [`LoaderRegistry`] holds one [`VolumeLoader`] per format. Candidates
//! for a file are the loaders claiming its extension, followed by those
//! recognizing its leading bytes. Every candidate is tried in that order and
//! each failure is kept, so an undecodable file reports why every matching
//! decoder rejected it.

use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::data::Volume;

/// Failure to read or decode a volume.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single decoder rejected the data.
    #[error("[{loader}] {reason}")]
    Decode { loader: &'static str, reason: String },

    /// Neither the extension nor the leading bytes match a known format.
    #[error("No loader recognizes {file} (supported extensions: {})", supported.join(", "))]
    Unrecognized {
        file: String,
        supported: Vec<&'static str>,
    },

    /// Several decoders matched and all of them failed.
    #[error("No loader could decode {file}: {}", join_failures(failures))]
    AllFailed {
        file: String,
        failures: Vec<LoaderError>,
    },
}

impl LoaderError {
    pub fn decode(loader: &'static str, reason: impl Into<String>) -> Self {
        Self::Decode {
            loader,
            reason: reason.into(),
        }
    }
}

fn join_failures(failures: &[LoaderError]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A file format that decodes to a [`Volume`].
pub trait VolumeLoader: Send + Sync {
    /// Short id used in logs and errors ("image", "npy").
    fn id(&self) -> &'static str;

    fn display_name(&self) -> &'static str;

    /// Lowercase extensions without the dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Whether `data` starts with this format's signature.
    fn can_load(&self, data: &[u8]) -> bool;

    /// Decode raw file bytes. Failures are [`LoaderError::Decode`].
    fn load(&self, data: &[u8]) -> Result<Volume, LoaderError>;

    /// Higher values are tried first when several loaders match.
    fn priority(&self) -> i32 {
        0
    }
}

/// Why a loader became a candidate for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchedBy {
    Extension,
    Signature,
}

impl fmt::Display for MatchedBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MatchedBy::Extension => "extension",
            MatchedBy::Signature => "signature",
        })
    }
}

/// Available loaders, highest priority first.
pub struct LoaderRegistry {
    loaders: Vec<Box<dyn VolumeLoader>>,
}

impl LoaderRegistry {
    /// Registry with the image and `.npy` loaders.
    pub fn new() -> Self {
        let mut registry = Self {
            loaders: Vec::new(),
        };
        registry.register(Box::new(super::loaders::ImageLoader));
        registry.register(Box::new(super::loaders::NpyLoader));
        registry
    }

    pub fn register(&mut self, loader: Box<dyn VolumeLoader>) {
        self.loaders.push(loader);
        self.loaders.sort_by_key(|loader| std::cmp::Reverse(loader.priority()));
    }

    /// Every extension some loader claims, sorted.
    pub fn supported_extensions(&self) -> Vec<&'static str> {
        let mut extensions: Vec<&'static str> = self
            .loaders
            .iter()
            .flat_map(|loader| loader.extensions().iter().copied())
            .collect();
        extensions.sort_unstable();
        extensions.dedup();
        extensions
    }

    fn candidates(&self, data: &[u8], filename: Option<&str>) -> Vec<(&dyn VolumeLoader, MatchedBy)> {
        let extension = filename
            .and_then(|name| Path::new(name).extension())
            .map(|ext| ext.to_string_lossy().to_lowercase());

        let mut candidates: Vec<(&dyn VolumeLoader, MatchedBy)> = Vec::new();
        if let Some(ext) = &extension {
            candidates.extend(
                self.loaders
                    .iter()
                    .filter(|loader| loader.extensions().iter().any(|e| *e == ext))
                    .map(|loader| (loader.as_ref(), MatchedBy::Extension)),
            );
        }
        for loader in &self.loaders {
            let seen = candidates.iter().any(|(c, _)| c.id() == loader.id());
            if !seen && loader.can_load(data) {
                candidates.push((loader.as_ref(), MatchedBy::Signature));
            }
        }
        candidates
    }

    /// Decode `data`, using `filename` only for its extension and in errors.
    pub fn load(&self, data: &[u8], filename: Option<&str>) -> Result<Volume, LoaderError> {
        let file = filename.unwrap_or("in-memory data").to_string();
        let candidates = self.candidates(data, filename);
        if candidates.is_empty() {
            return Err(LoaderError::Unrecognized {
                file,
                supported: self.supported_extensions(),
            });
        }

        let mut failures = Vec::new();
        for (loader, matched_by) in candidates {
            match loader.load(data) {
                Ok(volume) => {
                    debug!("{} decoded {} (matched by {})", loader.display_name(), file, matched_by);
                    return Ok(volume);
                }
                Err(e) => {
                    debug!("{} rejected {}: {}", loader.display_name(), file, e);
                    failures.push(e);
                }
            }
        }

        if failures.len() == 1 {
            return Err(failures.remove(0));
        }
        Err(LoaderError::AllFailed { file, failures })
    }

    /// Read and decode a file, recording it as the volume's source.
    pub fn load_path(&self, path: &Path) -> Result<Volume, LoaderError> {
        let bytes = std::fs::read(path).map_err(|source| LoaderError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let filename = path.file_name().map(|name| name.to_string_lossy());
        let volume = self.load(&bytes, filename.as_deref())?;
        info!("Loaded {} with shape {:?}", path.display(), volume.data.shape());
        Ok(volume.source(path.to_string_lossy()))
    }
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
