//! Command-line front end.
//!
//! Usage examples:
//!   ndview stack.npy --index 2=10 --screenshot slice.png
//!   ndview photo.png cells.npy --size 1024x768
//!   ndview --demo --annotate

use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};
use ndview_render::{Color, RasterCanvas, RenderRequest};

use crate::config::{AppConfig, LogLevel};
use crate::data::sample::{sample_markers, sample_rectangles, sample_volume, SAMPLE_SHAPE};
use crate::data::LoaderRegistry;
use crate::error::Result;
use crate::viewer::Viewer;
use crate::window::{HeadlessFrame, Window};

/// Layered viewer for N-dimensional images.
#[derive(Parser, Debug)]
#[command(name = "ndview", version, about)]
pub struct CliArgs {
    /// Files to open as image layers (.npy, png, jpeg, bmp, tiff, webp).
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Treat the last axis of every file as color channels.
    #[arg(short, long)]
    pub multichannel: bool,

    /// Open generated sample data with markers and a rectangle.
    #[arg(long)]
    pub demo: bool,

    /// Slider position as AXIS=INDEX; negative axes count from the end.
    #[arg(short, long, value_name = "AXIS=INDEX", value_parser = parse_index, allow_hyphen_values = true)]
    pub index: Vec<(isize, usize)>,

    /// Add an empty markers layer and start in annotation mode.
    #[arg(long)]
    pub annotate: bool,

    /// Canvas size as WIDTHxHEIGHT.
    #[arg(long, value_name = "WxH", value_parser = parse_size)]
    pub size: Option<(u32, u32)>,

    /// Write the rendered canvas to this file.
    #[arg(long, value_name = "FILE")]
    pub screenshot: Option<PathBuf>,

    /// Configuration file; defaults to the user config directory.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the configured log level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Save the effective configuration to the default path.
    #[arg(long)]
    pub save_config: bool,
}

fn parse_index(arg: &str) -> std::result::Result<(isize, usize), String> {
    let (axis, index) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected AXIS=INDEX, got '{}'", arg))?;
    let axis = axis
        .trim()
        .parse()
        .map_err(|e| format!("invalid axis '{}': {}", axis, e))?;
    let index = index
        .trim()
        .parse()
        .map_err(|e| format!("invalid index '{}': {}", index, e))?;
    Ok((axis, index))
}

fn parse_size(arg: &str) -> std::result::Result<(u32, u32), String> {
    let (width, height) = arg
        .to_lowercase()
        .split_once('x')
        .map(|(w, h)| (w.trim().parse::<u32>(), h.trim().parse::<u32>()))
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", arg))?;
    match (width, height) {
        (Ok(width), Ok(height)) if width > 0 && height > 0 => Ok((width, height)),
        _ => Err(format!("invalid size '{}'", arg)),
    }
}

/// Load the configuration named on the command line, or the user's
/// default one.
pub fn load_config(args: &CliArgs) -> AppConfig {
    let config = match &args.config {
        Some(path) => match AppConfig::load(path) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Ignoring config {:?}: {}", path, e);
                None
            }
        },
        None => AppConfig::load_from_default_path(),
    };
    let mut config = config.unwrap_or_default();
    if let Some(size) = args.size {
        config.preferences.canvas_size = size;
    }
    if let Some(level) = args.log_level {
        config.preferences.log_level = level;
    }
    config
}

/// Build a window holding every requested layer.
pub fn build(args: &CliArgs, config: &AppConfig) -> Result<Window<HeadlessFrame>> {
    let (width, height) = config.preferences.canvas_size;
    let background = Color::from_name(&config.preferences.background).unwrap_or_else(|| {
        warn!(
            "Unknown background color '{}', using black",
            config.preferences.background
        );
        Color::BLACK
    });
    let canvas = RasterCanvas::new(width, height).with_background(background);
    let mut viewer = Viewer::new(canvas).with_defaults(config.layer_defaults.clone());

    let registry = LoaderRegistry::new();
    for path in &args.files {
        let mut volume = registry.load_path(path)?;
        volume.multichannel |= args.multichannel;
        viewer.add_volume(volume)?;
    }

    if args.demo {
        let (rows, cols, planes) = SAMPLE_SHAPE;
        viewer.add_volume(sample_volume(rows, cols, planes))?;
        viewer.add_markers(sample_markers(rows, cols, planes))?;
        viewer.add_rectangles(sample_rectangles())?;
    }

    for &(axis, index) in &args.index {
        viewer.set_index(axis, index)?;
    }

    if args.annotate {
        viewer.new_markers()?;
        viewer.set_annotation(true);
    }

    let mut window = Window::new(HeadlessFrame::new(config.preferences.window_size), viewer);
    window.show();
    Ok(window)
}

/// Run the command line: build, report and optionally screenshot.
pub fn run(args: &CliArgs, config: &AppConfig) -> Result<()> {
    if args.save_config {
        if let Err(e) = config.save_to_default_path() {
            warn!("Failed to save config: {}", e);
        }
    }

    let window = build(args, config)?;
    let viewer = window.viewer();
    for layer in viewer.layers() {
        info!(
            "{} '{}' with extent {:?}",
            layer.kind(),
            layer.name(),
            layer.extent()
        );
    }
    info!("Indices {:?}; status: {}", viewer.dims().indices(), window.frame().message());

    if let Some(path) = &args.screenshot {
        viewer.save_screenshot(path, &RenderRequest::default())?;
    }
    Ok(())
}
