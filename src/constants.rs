//! Global constants for the ndview application

/// Status text shown when nothing more specific applies
pub const READY_STATUS: &str = "Ready";

/// Help text shown while annotation mode is on
pub const ANNOTATION_HELP: &str = "hold <space> to pan/zoom";

/// Number of leading axes shown spatially (row, column); they get no slider
pub const DISPLAY_AXES: usize = 2;

/// Default canvas size in pixels
pub const DEFAULT_CANVAS_SIZE: (u32, u32) = (800, 600);

/// Default window size in logical pixels
pub const DEFAULT_WINDOW_SIZE: (u32, u32) = (1100, 700);

/// Upper bound of the size and edge-width style sliders
pub const STYLE_SLIDER_MAX: usize = 100;

/// Default marker diameter in data units
pub const DEFAULT_MARKER_SIZE: f32 = 10.0;

/// Default outline width in screen pixels
pub const DEFAULT_EDGE_WIDTH: f32 = 1.0;

/// Default rectangle corner-handle size in screen pixels
pub const DEFAULT_VERTEX_SIZE: f32 = 6.0;

/// Last dimension lengths treated as color channels by `imshow`
pub const MULTICHANNEL_LENGTHS: [usize; 2] = [3, 4];

/// Zoom multiplier per scroll step
pub const ZOOM_FACTOR: f32 = 1.2;

/// Zoom limits (screen pixels per data unit)
pub const MIN_ZOOM: f32 = 0.01;
pub const MAX_ZOOM: f32 = 200.0;
