//! Headless dashboard widgets rendered to SVG.
//!
//! Each widget splits into a layout step that produces plain geometry
//! (useful for testing and for non-SVG hosts) and a `render_svg` step.

pub mod colors;
pub mod gauge;
pub mod geometry;
pub mod line_chart;
pub mod responsive;
pub mod sample;
pub mod svg;

pub use colors::{Color, lerp_color};
pub use gauge::{CircularGauge, GaugeGeometry, TemperatureStatus};
pub use geometry::{PathCommand, PathData, Point};
pub use line_chart::{ChartLayout, ChartOptions, ChartViewport, LabelPrecision, LineChart};
pub use responsive::{ResizeSubscription, ResponsiveLineChart, Viewport};
pub use sample::Sample;
