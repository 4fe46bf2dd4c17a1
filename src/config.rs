//! Configuration file support for ndview.
//!
//! Settings are stored as versioned JSON in the user config directory and can
//! also be loaded from an explicit path.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CANVAS_SIZE, DEFAULT_EDGE_WIDTH, DEFAULT_MARKER_SIZE, DEFAULT_WINDOW_SIZE};
use crate::layers::{Layer, LayerKind, StyleAttr, StyleError};

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Get the display name for this log level.
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// User preferences
    #[serde(default)]
    pub preferences: UserPreferences,

    /// Style applied to newly added layers
    #[serde(default)]
    pub layer_defaults: LayerDefaults,
}

/// User preferences section of the config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Canvas size in pixels
    #[serde(default = "default_canvas_size")]
    pub canvas_size: (u32, u32),

    /// Window size hint
    #[serde(default = "default_window_size")]
    pub window_size: (u32, u32),

    /// Canvas background, a palette color name
    #[serde(default = "default_background")]
    pub background: String,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_canvas_size() -> (u32, u32) {
    DEFAULT_CANVAS_SIZE
}

fn default_window_size() -> (u32, u32) {
    DEFAULT_WINDOW_SIZE
}

fn default_background() -> String {
    "black".to_string()
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            canvas_size: default_canvas_size(),
            window_size: default_window_size(),
            background: default_background(),
            log_level: LogLevel::default(),
        }
    }
}

/// Default style of new markers and rectangles layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerDefaults {
    pub marker_size: f32,
    pub marker_symbol: String,
    pub marker_face_color: String,
    pub marker_edge_color: String,
    pub edge_width: f32,
    pub rectangle_edge_color: String,
    pub rectangle_face_color: String,
    pub rectangle_vertex_color: String,
}

impl Default for LayerDefaults {
    fn default() -> Self {
        Self {
            marker_size: DEFAULT_MARKER_SIZE,
            marker_symbol: "disc".to_string(),
            marker_face_color: "white".to_string(),
            marker_edge_color: "black".to_string(),
            edge_width: DEFAULT_EDGE_WIDTH,
            rectangle_edge_color: "red".to_string(),
            rectangle_face_color: "transparent".to_string(),
            rectangle_vertex_color: "white".to_string(),
        }
    }
}

impl LayerDefaults {
    /// Style writes for a new layer of `kind`.
    pub fn attrs(&self, kind: LayerKind) -> Vec<StyleAttr> {
        match kind {
            LayerKind::Image => Vec::new(),
            LayerKind::Markers => vec![
                StyleAttr::Size(self.marker_size),
                StyleAttr::EdgeWidth(self.edge_width),
                StyleAttr::Symbol(self.marker_symbol.clone()),
                StyleAttr::FaceColor(self.marker_face_color.clone()),
                StyleAttr::EdgeColor(self.marker_edge_color.clone()),
            ],
            LayerKind::Rectangles => vec![
                StyleAttr::EdgeWidth(self.edge_width),
                StyleAttr::FaceColor(self.rectangle_face_color.clone()),
                StyleAttr::EdgeColor(self.rectangle_edge_color.clone()),
                StyleAttr::VertexColor(self.rectangle_vertex_color.clone()),
            ],
        }
    }

    /// Apply to `layer`, validating every value.
    pub fn apply(&self, layer: &mut Layer) -> Result<(), StyleError> {
        for attr in self.attrs(layer.kind()) {
            layer.set_style(&attr)?;
        }
        Ok(())
    }
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            preferences: UserPreferences::default(),
            layer_defaults: LayerDefaults::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse JSON, rejecting files written by a newer format version.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    pub fn default_filename() -> &'static str {
        "ndview-config.json"
    }

    /// `<config dir>/ndview/ndview-config.json`, with `~/.config` standing in
    /// on platforms without a config dir.
    pub fn default_path() -> Option<PathBuf> {
        let base = dirs::config_dir().or_else(|| dirs::home_dir().map(|home| home.join(".config")))?;
        Some(base.join("ndview").join(Self::default_filename()))
    }

    /// Load configuration from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::from_json(&std::fs::read_to_string(path)?)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// The user's saved configuration, if there is a readable one.
    ///
    /// A missing file is normal; a broken one is logged and ignored.
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.is_file() {
            log::debug!("No configuration at {}", path.display());
            return None;
        }
        Self::load(&path)
            .inspect_err(|e| log::warn!("Ignoring configuration {}: {}", path.display(), e))
            .ok()
    }

    /// Write configuration to `path`, creating missing directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, self.to_json()?)?;
        log::info!("Saved configuration to {}", path.display());
        Ok(())
    }

    pub fn save_to_default_path(&self) -> Result<(), ConfigError> {
        let path = Self::default_path().ok_or_else(|| {
            ConfigError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no config or home directory for this user",
            ))
        })?;
        self.save(&path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
