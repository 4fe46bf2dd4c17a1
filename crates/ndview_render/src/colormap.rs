//! Colormaps for scalar image data.

/// Maps a normalized scalar in `0.0..=1.0` to an opaque RGBA pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Colormap {
    #[default]
    Gray,
    Red,
    Green,
    Blue,
    Magenta,
    Cyan,
    /// Hue sweep from red through blue
    Hsv,
}

impl Colormap {
    /// Get the display name for this colormap.
    pub fn name(&self) -> &'static str {
        match self {
            Colormap::Gray => "gray",
            Colormap::Red => "red",
            Colormap::Green => "green",
            Colormap::Blue => "blue",
            Colormap::Magenta => "magenta",
            Colormap::Cyan => "cyan",
            Colormap::Hsv => "hsv",
        }
    }

    /// Get all available colormaps.
    pub fn all() -> &'static [Colormap] {
        &[
            Colormap::Gray,
            Colormap::Red,
            Colormap::Green,
            Colormap::Blue,
            Colormap::Magenta,
            Colormap::Cyan,
            Colormap::Hsv,
        ]
    }

    /// Look up a colormap by name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    /// Map `t` (clamped to `0..=1`, NaN treated as 0) to RGBA.
    pub fn map(&self, t: f32) -> [u8; 4] {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let (r, g, b) = match self {
            Colormap::Gray => (t, t, t),
            Colormap::Red => (t, 0.0, 0.0),
            Colormap::Green => (0.0, t, 0.0),
            Colormap::Blue => (0.0, 0.0, t),
            Colormap::Magenta => (t, 0.0, t),
            Colormap::Cyan => (0.0, t, t),
            Colormap::Hsv => hsv_to_rgb(t * 300.0, 1.0, 1.0),
        };
        [to_u8(r), to_u8(g), to_u8(b), 255]
    }
}

fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Convert HSV to RGB.
///
/// # Arguments
/// * `h` - Hue in degrees (0-360)
/// * `s` - Saturation (0.0-1.0)
/// * `v` - Value/brightness (0.0-1.0)
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (r + m, g + m, b + m)
}
