use std::f32::consts::PI;
use std::fmt::Write;

use serde::Serialize;

use crate::colors::{self, Color};
use crate::geometry::{Point, num};
use crate::sample::finite_or_zero;
use crate::svg;

/// Default ring diameter in pixels.
pub const DEFAULT_SIZE: f32 = 220.0;
/// Distance from the outer edge to the ring's center line.
pub const RING_INSET: f32 = 25.0;
/// Ring thickness.
const STROKE_WIDTH: f32 = 18.0;

/// Readings at or above this are hot.
pub const HOT_THRESHOLD: f64 = 35.0;
/// Readings at or below this are cold.
pub const COLD_THRESHOLD: f64 = 25.0;
/// Readings at or above this get alert-colored status text.
const ALERT_THRESHOLD: f64 = 60.0;

/// Temperature category shown under the gauge value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureStatus {
    Hot,
    Normal,
    Cold,
}

impl TemperatureStatus {
    /// `≥ 35` is hot, `≤ 25` is cold, anything between is normal.
    /// Non-finite input is treated as 0.
    pub fn classify(value: f64) -> Self {
        let value = finite_or_zero(value);
        if value >= HOT_THRESHOLD {
            Self::Hot
        } else if value <= COLD_THRESHOLD {
            Self::Cold
        } else {
            Self::Normal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Hot => "Hot",
            Self::Normal => "Normal",
            Self::Cold => "Cold",
        }
    }

    /// Icon identifier (lucide naming).
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Hot => "thermometer-sun",
            Self::Normal => "thermometer",
            Self::Cold => "thermometer-snowflake",
        }
    }
}

/// Text color for the status line under the value.
pub fn status_text_color(value: f64) -> Color {
    let value = finite_or_zero(value);
    if value >= ALERT_THRESHOLD {
        colors::ALERT_RED
    } else if value <= COLD_THRESHOLD {
        colors::COLD_BLUE
    } else {
        colors::NEUTRAL_GRAY
    }
}

/// Ring geometry for a dash-offset arc.
///
/// The arc is drawn as a full circle whose dash pattern hides
/// `dash_offset` pixels, so the visible length is
/// `circumference - dash_offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GaugeGeometry {
    pub size: f32,
    pub center: Point,
    pub radius: f32,
    pub circumference: f32,
    pub fill_fraction: f32,
    pub dash_offset: f32,
}

impl GaugeGeometry {
    /// Computes ring geometry for `value` on a 0-100 scale.
    ///
    /// The fill fraction is clamped to `[0, 1]`; NaN and infinities count as 0.
    /// A non-positive or non-finite `size` falls back to [`DEFAULT_SIZE`].
    pub fn compute(value: f64, size: f32) -> Self {
        let size = if size.is_finite() && size > 0.0 {
            size
        } else {
            DEFAULT_SIZE
        };
        let radius = (size / 2.0 - RING_INSET).max(0.0);
        let circumference = 2.0 * PI * radius;
        let fill_fraction = (finite_or_zero(value) / 100.0).clamp(0.0, 1.0) as f32;
        let dash_offset = circumference - fill_fraction * circumference;

        Self {
            size,
            center: Point::new(size / 2.0, size / 2.0),
            radius,
            circumference,
            fill_fraction,
            dash_offset,
        }
    }

    /// Visible arc length.
    pub fn arc_length(&self) -> f32 {
        self.circumference - self.dash_offset
    }

    /// Where the arc ends, measured clockwise from 12 o'clock.
    pub fn arc_end(&self) -> Point {
        let angle = -PI / 2.0 + 2.0 * PI * self.fill_fraction;
        Point::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }
}

/// A circular gauge for a single 0-100 reading.
///
/// ```
/// use airwatch_widgets::CircularGauge;
///
/// let svg = CircularGauge::new(31.0).render_svg();
/// assert!(svg.contains("31℃"));
/// ```
#[derive(Debug, Clone)]
pub struct CircularGauge {
    value: f64,
    size: f32,
    unit: String,
}

impl CircularGauge {
    pub fn new(value: f64) -> Self {
        Self {
            value: finite_or_zero(value),
            size: DEFAULT_SIZE,
            unit: "℃".into(),
        }
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn geometry(&self) -> GaugeGeometry {
        GaugeGeometry::compute(self.value, self.size)
    }

    pub fn status(&self) -> TemperatureStatus {
        TemperatureStatus::classify(self.value)
    }

    /// Value text with the unit, e.g. `31℃` or `31.5℃`.
    pub fn value_text(&self) -> String {
        // `+ 0.0` folds -0.0 into 0.0.
        let tenths = (self.value * 10.0).round() / 10.0 + 0.0;
        if tenths == tenths.round() {
            format!("{:.0}{}", tenths, self.unit)
        } else {
            format!("{:.1}{}", tenths, self.unit)
        }
    }

    /// Renders the gauge as a standalone SVG element.
    pub fn render_svg(&self) -> String {
        let geo = self.geometry();
        let status = self.status();
        let (cx, cy, r) = (num(geo.center.x), num(geo.center.y), num(geo.radius));

        let mut out = String::new();
        svg::open(
            &mut out,
            geo.size,
            geo.size,
            &format!("{} {}", self.value_text(), status.label()),
        );

        let _ = writeln!(out, "  <defs>");
        let _ = writeln!(
            out,
            "    <linearGradient id=\"gauge-progress\" x1=\"0%\" y1=\"0%\" x2=\"100%\" y2=\"100%\">"
        );
        for (offset, t) in [(0, 0.0), (30, 0.3), (70, 0.7), (100, 1.0)] {
            svg::stop(
                &mut out,
                offset,
                colors::lerp_color(colors::GAUGE_LIGHT, colors::GAUGE_DARK, t),
                1.0,
            );
        }
        let _ = writeln!(out, "    </linearGradient>");
        svg::glow_filter(&mut out, "gauge-glow", 8.0);
        let _ = writeln!(out, "  </defs>");

        // Rotate so the dash pattern starts at 12 o'clock.
        let _ = writeln!(out, "  <g transform=\"rotate(-90 {cx} {cy})\">");
        let _ = writeln!(
            out,
            "    <circle cx=\"{cx}\" cy=\"{cy}\" r=\"{r}\" stroke=\"{}\" stroke-width=\"{}\" fill=\"transparent\"/>",
            colors::TRACK,
            num(STROKE_WIDTH)
        );
        if geo.fill_fraction > 0.0 {
            let _ = writeln!(
                out,
                "    <circle cx=\"{cx}\" cy=\"{cy}\" r=\"{r}\" stroke=\"url(#gauge-progress)\" stroke-width=\"{}\" fill=\"transparent\" stroke-dasharray=\"{}\" stroke-dashoffset=\"{}\" stroke-linecap=\"round\" filter=\"url(#gauge-glow)\"/>",
                num(STROKE_WIDTH),
                num(geo.circumference),
                num(geo.dash_offset)
            );
        }
        let _ = writeln!(out, "  </g>");

        let value_size = geo.size * 0.2;
        let _ = writeln!(
            out,
            "  <text x=\"{cx}\" y=\"{}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" font-weight=\"700\" fill=\"{}\">{}</text>",
            num(geo.center.y - geo.size * 0.05),
            svg::FONT_FAMILY,
            num(value_size),
            colors::TEXT_STRONG,
            svg::escape_text(&self.value_text())
        );
        let _ = writeln!(
            out,
            "  <text x=\"{cx}\" y=\"{}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" font-weight=\"500\" fill=\"{}\" data-icon=\"{}\">{}</text>",
            num(geo.center.y + geo.size * 0.14),
            svg::FONT_FAMILY,
            num(geo.size * 0.065),
            status_text_color(self.value),
            status.icon(),
            status.label()
        );
        let _ = writeln!(out, "</svg>");
        out
    }
}
