use std::fmt;

/// An RGBA color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn from_rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Parses `#rgb` or `#rrggbb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_owned(),
            _ => return None,
        };
        let channel = |i: usize| u8::from_str_radix(expanded.get(i..i + 2)?, 16).ok();
        Some(Self::from_rgb8(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Returns the same color with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// `#rrggbb`, ignoring alpha.
    pub fn to_hex(&self) -> String {
        let [r, g, b] = [self.r, self.g, self.b].map(to_u8);
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

/// Formats as a CSS color: hex when opaque, `rgba()` otherwise.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            f.write_str(&self.to_hex())
        } else {
            let [r, g, b] = [self.r, self.g, self.b].map(to_u8);
            write!(f, "rgba({r}, {g}, {b}, {:.2})", self.a.clamp(0.0, 1.0))
        }
    }
}

fn to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Default chart series color.
pub const BLUE: Color = Color::from_rgb8(0x3b, 0x82, 0xf6);
/// Light end of the gauge progress gradient.
pub const GAUGE_LIGHT: Color = Color::from_rgb8(0x60, 0xa5, 0xfa);
/// Dark end of the gauge progress gradient.
pub const GAUGE_DARK: Color = Color::from_rgb8(0x1d, 0x4e, 0xd8);
/// Background ring behind the gauge arc.
pub const TRACK: Color = Color::from_rgba(59.0 / 255.0, 130.0 / 255.0, 246.0 / 255.0, 0.1);
/// Axis labels and secondary text.
pub const TEXT_MUTED: Color = Color::from_rgb8(0x6b, 0x72, 0x80);
/// Primary text.
pub const TEXT_STRONG: Color = Color::from_rgb8(0x11, 0x18, 0x27);
/// Alert text (very hot readings).
pub const ALERT_RED: Color = Color::from_rgb8(0xdc, 0x26, 0x26);
/// Cold reading text.
pub const COLD_BLUE: Color = Color::from_rgb8(0x25, 0x63, 0xeb);
/// Normal reading text.
pub const NEUTRAL_GRAY: Color = Color::from_rgb8(0x4b, 0x55, 0x63);
/// Healthy status.
pub const GREEN: Color = Color::from_rgb8(0x22, 0xc5, 0x5e);
/// Moderate status.
pub const YELLOW: Color = Color::from_rgb8(0xea, 0xb3, 0x08);
/// Unhealthy status.
pub const RED: Color = Color::from_rgb8(0xef, 0x44, 0x44);

/// Linearly interpolate between two colors.
pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    Color::from_rgba(
        a.r + (b.r - a.r) * t,
        a.g + (b.g - a.g) * t,
        a.b + (b.b - a.b) * t,
        a.a + (b.a - a.a) * t,
    )
}
