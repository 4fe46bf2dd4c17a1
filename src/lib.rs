//! ndview - layered viewer for N-dimensional images
//!
//! A stack of image, markers and rectangles layers is shown on a canvas;
//! every axis beyond the two display axes gets a slider. The [`Viewer`] owns
//! the state and applies [`Message`]s produced by the controls; observers
//! subscribe to its typed notification channels.

pub mod active;
pub mod cli;
pub mod config;
pub mod constants;
pub mod control_bars;
pub mod data;
pub mod dims;
pub mod error;
pub mod events;
pub mod layers;
pub mod message;
pub mod ui;
pub mod viewer;
pub mod window;

pub use active::{resolve_status, ActiveElements};
pub use config::AppConfig;
pub use dims::{Dimensions, DimsMessage};
pub use error::{DimsError, LayerError, Result, ViewerError};
pub use layers::{Layer, LayerData, LayerId, LayerKind, LayerList, StyleAttr};
pub use message::{Key, Message};
pub use viewer::Viewer;
pub use window::{Frame, HeadlessFrame, Window};
