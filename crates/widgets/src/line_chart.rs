use std::fmt::Write;

use serde::Serialize;

use crate::colors::{self, Color};
use crate::geometry::{PathData, Point, num};
use crate::sample::{Sample, finite_or_zero};
use crate::svg;

/// Fractions of the value range that get a gridline.
pub const GRID_FRACTIONS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];
/// Proportional expansion applied to each side of a non-degenerate range.
const RANGE_BUFFER: f64 = 0.1;
/// Half-span synthesized around a flat series.
const FLAT_HALF_SPAN: f64 = 1.0;
/// Axis labels are thinned once a series is longer than this.
const DENSE_LABEL_THRESHOLD: usize = 8;
/// Target number of horizontal-axis labels for a dense series.
const TARGET_LABELS: usize = 6;
/// Radius of the per-sample marker.
const MARKER_RADIUS: f32 = 6.0;
/// Shown in place of the plot when there is nothing to draw.
pub const EMPTY_MESSAGE: &str = "Waiting for sensor data...";

/// Vertical extent of the chart in data units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Value at `fraction` of the way from `min` to `max`.
    pub fn value_at(&self, fraction: f64) -> f64 {
        self.min + self.span() * fraction
    }
}

/// Computes the displayed value range for a series.
///
/// A flat series gets a synthesized `±1` span. Otherwise the observed range
/// is widened by 10% of its span on each side. With `floor_at_zero` the lower
/// bound stops at 0 unless the data itself is negative.
pub fn value_range(samples: &[Sample], floor_at_zero: bool) -> ValueRange {
    if samples.is_empty() {
        return ValueRange { min: 0.0, max: 1.0 };
    }

    let mut data_min = f64::INFINITY;
    let mut data_max = f64::NEG_INFINITY;
    for s in samples {
        let v = finite_or_zero(s.value);
        data_min = data_min.min(v);
        data_max = data_max.max(v);
    }

    let (mut min, max) = if data_max - data_min <= f64::EPSILON * data_max.abs().max(1.0) {
        (data_min - FLAT_HALF_SPAN, data_max + FLAT_HALF_SPAN)
    } else {
        let buffer = (data_max - data_min) * RANGE_BUFFER;
        (data_min - buffer, data_max + buffer)
    };

    if floor_at_zero && min < 0.0 && data_min >= 0.0 {
        min = 0.0;
    }

    ValueRange { min, max }
}

/// Pixel box the chart is drawn into.
///
/// The plot area is the box shrunk by `padding` on every side; axis labels
/// live in the padding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartViewport {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
}

impl ChartViewport {
    /// Fixed-width variant: 700×320 with 80px padding.
    pub const FIXED: Self = Self {
        width: 700.0,
        height: 320.0,
        padding: 80.0,
    };

    /// Height used by the responsive variant.
    pub const RESPONSIVE_HEIGHT: f32 = 320.0;
    /// Padding used by the responsive variant.
    pub const RESPONSIVE_PADDING: f32 = 60.0;
    /// Narrowest width the responsive variant lays out at.
    pub const MIN_RESPONSIVE_WIDTH: f32 = 200.0;

    /// Responsive variant for a measured container width.
    pub fn responsive(container_width: f32) -> Self {
        let width = if container_width.is_finite() {
            container_width.max(Self::MIN_RESPONSIVE_WIDTH)
        } else {
            Self::MIN_RESPONSIVE_WIDTH
        };
        Self {
            width,
            height: Self::RESPONSIVE_HEIGHT,
            padding: Self::RESPONSIVE_PADDING,
        }
    }

    pub fn plot_left(&self) -> f32 {
        self.padding
    }

    pub fn plot_right(&self) -> f32 {
        self.plot_left() + self.plot_width()
    }

    pub fn plot_top(&self) -> f32 {
        self.padding
    }

    pub fn plot_bottom(&self) -> f32 {
        self.plot_top() + self.plot_height()
    }

    pub fn plot_width(&self) -> f32 {
        (self.width - self.padding * 2.0).max(0.0)
    }

    pub fn plot_height(&self) -> f32 {
        (self.height - self.padding * 2.0).max(0.0)
    }
}

impl Default for ChartViewport {
    fn default() -> Self {
        Self::FIXED
    }
}

/// Rounding applied to gridline labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LabelPrecision {
    Integer,
    OneDecimal,
}

impl LabelPrecision {
    pub fn format(&self, value: f64) -> String {
        let value = finite_or_zero(value);
        let s = match self {
            Self::Integer => format!("{:.0}", value.round()),
            Self::OneDecimal => format!("{:.1}", (value * 10.0).round() / 10.0),
        };
        // Avoid "-0" for values that round to zero from below.
        if s.trim_start_matches('-').trim_matches(|c| c == '0' || c == '.').is_empty() {
            s.trim_start_matches('-').to_owned()
        } else {
            s
        }
    }
}

/// Presentation options for a time-series chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub unit: String,
    pub color: Color,
    pub precision: LabelPrecision,
    pub floor_at_zero: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            unit: String::new(),
            color: colors::BLUE,
            precision: LabelPrecision::Integer,
            floor_at_zero: true,
        }
    }
}

/// A horizontal gridline with its axis label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridLine {
    pub y: f32,
    pub value: f64,
    pub label: String,
}

/// A label under the horizontal axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLabel {
    pub index: usize,
    pub x: f32,
    pub text: String,
}

/// A per-sample point marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub center: Point,
    pub radius: f32,
    pub tooltip: String,
}

/// Everything needed to draw a non-empty series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotGeometry {
    pub viewport: ChartViewport,
    pub range: ValueRange,
    pub points: Vec<Point>,
    pub line: PathData,
    pub area: PathData,
    pub grid: Vec<GridLine>,
    pub x_labels: Vec<AxisLabel>,
    pub markers: Vec<Marker>,
}

/// Result of laying out a series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartLayout {
    /// No samples: draw a placeholder.
    Empty { viewport: ChartViewport },
    Plot(PlotGeometry),
}

impl ChartLayout {
    /// Lays out `samples` inside `viewport`.
    pub fn compute(samples: &[Sample], viewport: ChartViewport, options: &ChartOptions) -> Self {
        if samples.is_empty() {
            return Self::Empty { viewport };
        }

        let range = value_range(samples, options.floor_at_zero);
        let count = samples.len();
        let points: Vec<Point> = samples
            .iter()
            .enumerate()
            .map(|(i, s)| {
                Point::new(
                    map_x(i, count, &viewport),
                    map_y(s.value, &range, &viewport),
                )
            })
            .collect();

        let (line, span_left, span_right) = if let [only] = points.as_slice() {
            // A lone sample becomes a flat segment across the plot.
            let mut line = PathData::new();
            line.move_to(Point::new(viewport.plot_left(), only.y))
                .line_to(Point::new(viewport.plot_right(), only.y));
            (line, viewport.plot_left(), viewport.plot_right())
        } else {
            let first = points.first().map_or(viewport.plot_left(), |p| p.x);
            let last = points.last().map_or(viewport.plot_right(), |p| p.x);
            (smooth_path(&points), first, last)
        };
        let area = area_path(&line, span_left, span_right, viewport.plot_bottom());

        let grid = GRID_FRACTIONS
            .iter()
            .map(|&fraction| {
                let value = range.value_at(fraction);
                GridLine {
                    y: viewport.plot_bottom() - fraction as f32 * viewport.plot_height(),
                    value,
                    label: options.precision.format(value),
                }
            })
            .collect();

        let x_labels = axis_label_indices(count)
            .into_iter()
            .map(|index| AxisLabel {
                index,
                x: points[index].x,
                text: samples[index].label.clone(),
            })
            .collect();

        let markers = samples
            .iter()
            .zip(&points)
            .map(|(s, &center)| Marker {
                center,
                radius: MARKER_RADIUS,
                tooltip: tooltip_text(s, &options.unit),
            })
            .collect();

        Self::Plot(PlotGeometry {
            viewport,
            range,
            points,
            line,
            area,
            grid,
            x_labels,
            markers,
        })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }

    pub fn viewport(&self) -> ChartViewport {
        match self {
            Self::Empty { viewport } => *viewport,
            Self::Plot(plot) => plot.viewport,
        }
    }

    /// Renders the layout as a standalone SVG element.
    pub fn render_svg(&self, options: &ChartOptions) -> String {
        match self {
            Self::Empty { viewport } => render_empty(viewport),
            Self::Plot(plot) => render_plot(plot, options),
        }
    }
}

/// Horizontal pixel position of sample `index` out of `count`.
///
/// A single sample sits at the horizontal midpoint of the plot.
pub fn map_x(index: usize, count: usize, viewport: &ChartViewport) -> f32 {
    if count <= 1 {
        return viewport.plot_left() + viewport.plot_width() / 2.0;
    }
    let ratio = index as f32 / (count - 1) as f32;
    viewport.plot_left() + ratio * viewport.plot_width()
}

/// Vertical pixel position of `value` (top = max, bottom = min).
pub fn map_y(value: f64, range: &ValueRange, viewport: &ChartViewport) -> f32 {
    let span = range.span();
    let ratio = if span > 0.0 && span.is_finite() {
        (finite_or_zero(value) - range.min) / span
    } else {
        0.5
    };
    viewport.plot_bottom() - ratio as f32 * viewport.plot_height()
}

/// Joins `points` with cubic Béziers whose control points share the
/// horizontal midpoint of each segment, each pinned to its endpoint's Y.
pub fn smooth_path(points: &[Point]) -> PathData {
    let mut path = PathData::new();
    let Some((&first, rest)) = points.split_first() else {
        return path;
    };

    path.move_to(first);
    let mut prev = first;
    for &p in rest {
        let mid_x = (prev.x + p.x) / 2.0;
        path.cubic_to(Point::new(mid_x, prev.y), Point::new(mid_x, p.y), p);
        prev = p;
    }
    path
}

/// Closes `line` down to `baseline` between `left` and `right`.
pub fn area_path(line: &PathData, left: f32, right: f32, baseline: f32) -> PathData {
    let mut area = line.clone();
    if area.is_empty() {
        return area;
    }
    area.line_to(Point::new(right, baseline))
        .line_to(Point::new(left, baseline))
        .close();
    area
}

/// Indices of samples whose label is drawn under the axis.
///
/// Every sample is labeled up to 8 samples; past that the step is
/// `ceil(count / 6)`. The last sample is always labeled.
pub fn axis_label_indices(count: usize) -> Vec<usize> {
    if count == 0 {
        return Vec::new();
    }
    let step = if count > DENSE_LABEL_THRESHOLD {
        count.div_ceil(TARGET_LABELS)
    } else {
        1
    };
    let mut indices: Vec<usize> = (0..count).step_by(step).collect();
    if indices.last() != Some(&(count - 1)) {
        indices.push(count - 1);
    }
    indices
}

/// `label: value unit`
fn tooltip_text(sample: &Sample, unit: &str) -> String {
    let text = format!("{}: {} {}", sample.label, finite_or_zero(sample.value), unit);
    text.trim_end().to_owned()
}

fn render_empty(viewport: &ChartViewport) -> String {
    let mut out = String::new();
    svg::open(&mut out, viewport.width, viewport.height, EMPTY_MESSAGE);
    let _ = writeln!(
        out,
        "  <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"14\" fill=\"{}\">{}</text>",
        num(viewport.width / 2.0),
        num(viewport.height / 2.0),
        svg::FONT_FAMILY,
        colors::TEXT_MUTED,
        EMPTY_MESSAGE
    );
    let _ = writeln!(out, "</svg>");
    out
}

fn render_plot(plot: &PlotGeometry, options: &ChartOptions) -> String {
    let vp = &plot.viewport;
    let color = options.color;
    let mut out = String::new();
    svg::open(&mut out, vp.width, vp.height, "time series chart");

    let _ = writeln!(out, "  <defs>");
    let _ = writeln!(
        out,
        "    <linearGradient id=\"chart-area\" x1=\"0\" y1=\"0\" x2=\"0\" y2=\"1\">"
    );
    svg::stop(&mut out, 0, color, 0.4);
    svg::stop(&mut out, 50, color, 0.2);
    svg::stop(&mut out, 100, color, 0.0);
    let _ = writeln!(out, "    </linearGradient>");
    svg::glow_filter(&mut out, "chart-glow", 4.0);
    let _ = writeln!(out, "  </defs>");

    for line in &plot.grid {
        let y = num(line.y);
        let _ = writeln!(
            out,
            "  <line x1=\"{}\" y1=\"{y}\" x2=\"{}\" y2=\"{y}\" stroke=\"{}\" stroke-opacity=\"0.12\" stroke-dasharray=\"6,12\" stroke-width=\"1\"/>",
            num(vp.plot_left()),
            num(vp.plot_right()),
            color.to_hex()
        );
        let _ = writeln!(
            out,
            "  <text x=\"{}\" y=\"{}\" text-anchor=\"end\" font-size=\"11\" font-family=\"{}\" font-weight=\"500\" fill=\"{}\">{}</text>",
            num(vp.plot_left() - 15.0),
            num(line.y + 5.0),
            svg::FONT_FAMILY,
            colors::TEXT_MUTED,
            line.label
        );
    }

    for label in &plot.x_labels {
        let _ = writeln!(
            out,
            "  <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"12\" font-family=\"{}\" font-weight=\"500\" fill=\"{}\">{}</text>",
            num(label.x),
            num(vp.plot_bottom() + 30.0),
            svg::FONT_FAMILY,
            colors::TEXT_MUTED,
            svg::escape_text(&label.text)
        );
    }

    let _ = writeln!(out, "  <path d=\"{}\" fill=\"url(#chart-area)\"/>", plot.area);
    let _ = writeln!(
        out,
        "  <path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"4\" filter=\"url(#chart-glow)\"/>",
        plot.line,
        color.to_hex()
    );

    for marker in &plot.markers {
        let _ = writeln!(out, "  <g class=\"marker\">");
        let _ = writeln!(
            out,
            "    <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" stroke=\"white\" stroke-width=\"3\"/>",
            num(marker.center.x),
            num(marker.center.y),
            num(marker.radius),
            color.to_hex()
        );
        let _ = writeln!(
            out,
            "    <title>{}</title>",
            svg::escape_text(&marker.tooltip)
        );
        let _ = writeln!(out, "  </g>");
    }

    let _ = writeln!(out, "</svg>");
    out
}

/// A fixed-size smoothed line chart for one series.
///
/// ```
/// use airwatch_widgets::{LineChart, Sample};
///
/// let series = vec![Sample::new("00:00", 450.5), Sample::new("01:00", 460.2)];
/// let svg = LineChart::new(&series).with_unit("ppm").render_svg();
/// assert!(svg.contains("01:00: 460.2 ppm"));
/// ```
#[derive(Debug, Clone)]
pub struct LineChart<'a> {
    samples: &'a [Sample],
    viewport: ChartViewport,
    options: ChartOptions,
}

impl<'a> LineChart<'a> {
    pub fn new(samples: &'a [Sample]) -> Self {
        Self {
            samples,
            viewport: ChartViewport::FIXED,
            options: ChartOptions::default(),
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.options.unit = unit.into();
        self
    }

    /// Sets the series color from a hex string; invalid input keeps the default.
    pub fn with_color(mut self, hex: &str) -> Self {
        if let Some(color) = Color::from_hex(hex) {
            self.options.color = color;
        }
        self
    }

    pub fn with_options(mut self, options: ChartOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_viewport(mut self, viewport: ChartViewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    pub fn layout(&self) -> ChartLayout {
        ChartLayout::compute(self.samples, self.viewport, &self.options)
    }

    pub fn render_svg(&self) -> String {
        self.layout().render_svg(&self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> Vec<Sample> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| Sample::new(format!("{i:02}:00"), v))
            .collect()
    }

    fn plot(samples: &[Sample]) -> PlotGeometry {
        match LineChart::new(samples).layout() {
            ChartLayout::Plot(p) => p,
            ChartLayout::Empty { .. } => panic!("expected a plot"),
        }
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn value_range_empty() {
        let r = value_range(&[], true);
        assert_eq!(r, ValueRange { min: 0.0, max: 1.0 });
    }

    #[test]
    fn value_range_flat_synthesizes_span() {
        let r = value_range(&series(&[10.0, 10.0, 10.0]), true);
        assert!((r.min - 9.0).abs() < 1e-9);
        assert!((r.max - 11.0).abs() < 1e-9);
    }

    #[test]
    fn value_range_flat_zero_floors() {
        let r = value_range(&series(&[0.0, 0.0]), true);
        assert_eq!(r.min, 0.0);
        assert!(r.span() > 0.0);
    }

    #[test]
    fn value_range_buffers_ten_percent() {
        let r = value_range(&series(&[100.0, 200.0]), true);
        assert!((r.min - 90.0).abs() < 1e-9);
        assert!((r.max - 210.0).abs() < 1e-9);
    }

    #[test]
    fn value_range_floor_at_zero() {
        let r = value_range(&series(&[1.0, 100.0]), true);
        assert_eq!(r.min, 0.0);

        let unfloored = value_range(&series(&[1.0, 100.0]), false);
        assert!(unfloored.min < 0.0);
    }

    #[test]
    fn value_range_keeps_negative_data() {
        let r = value_range(&series(&[-5.0, -5.0]), true);
        assert!((r.min + 6.0).abs() < 1e-9);
        assert!((r.max + 4.0).abs() < 1e-9);
    }

    #[test]
    fn viewport_plot_box() {
        let vp = ChartViewport::FIXED;
        assert!(approx(vp.plot_left(), 80.0));
        assert!(approx(vp.plot_right(), 620.0));
        assert!(approx(vp.plot_top(), 80.0));
        assert!(approx(vp.plot_bottom(), 240.0));
    }

    #[test]
    fn responsive_viewport_has_minimum_width() {
        assert!(approx(ChartViewport::responsive(50.0).width, 200.0));
        assert!(approx(ChartViewport::responsive(f32::NAN).width, 200.0));
        assert!(approx(ChartViewport::responsive(900.0).width, 900.0));
    }

    #[test]
    fn map_x_single_sample_is_midpoint() {
        let vp = ChartViewport::FIXED;
        assert!(approx(map_x(0, 1, &vp), 350.0));
    }

    #[test]
    fn map_x_spans_plot_width() {
        let vp = ChartViewport::FIXED;
        assert!(approx(map_x(0, 3, &vp), 80.0));
        assert!(approx(map_x(1, 3, &vp), 350.0));
        assert!(approx(map_x(2, 3, &vp), 620.0));
    }

    #[test]
    fn map_y_is_inverted() {
        let vp = ChartViewport::FIXED;
        let range = ValueRange { min: 0.0, max: 100.0 };
        assert!(approx(map_y(0.0, &range, &vp), 240.0));
        assert!(approx(map_y(100.0, &range, &vp), 80.0));
        assert!(approx(map_y(50.0, &range, &vp), 160.0));
    }

    #[test]
    fn map_y_degenerate_range_centers() {
        let vp = ChartViewport::FIXED;
        let range = ValueRange { min: 5.0, max: 5.0 };
        assert!(approx(map_y(5.0, &range, &vp), 160.0));
    }

    #[test]
    fn empty_series_is_placeholder() {
        let layout = LineChart::new(&[]).layout();
        assert!(layout.is_empty());
        let svg = LineChart::new(&[]).render_svg();
        assert!(svg.contains(EMPTY_MESSAGE));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn single_sample_is_flat_line_across_plot() {
        let samples = vec![Sample::new("00:00", 100.0)];
        let p = plot(&samples);

        assert_eq!(p.points.len(), 1);
        assert!(approx(p.points[0].x, 350.0));
        assert!(approx(p.markers[0].center.x, 350.0));

        let coords: Vec<Point> = p.line.coordinates().collect();
        assert_eq!(coords.len(), 2);
        assert!(approx(coords[0].x, 80.0));
        assert!(approx(coords[1].x, 620.0));
        assert!(approx(coords[0].y, p.points[0].y));
        assert!(approx(coords[1].y, p.points[0].y));
        assert!(approx(p.points[0].y, map_y(100.0, &p.range, &p.viewport)));
    }

    #[test]
    fn flat_series_shares_one_y() {
        let p = plot(&series(&[10.0, 10.0, 10.0]));
        let y = p.points[0].y;
        assert!(p.points.iter().all(|pt| approx(pt.y, y)));
        assert!(p.line.coordinates().all(|pt| approx(pt.y, y)));
        let labels: Vec<&str> = p.grid.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["9", "10", "10", "11", "11"]);
    }

    #[test]
    fn min_is_drawn_below_max() {
        let samples = series(&[450.5, 530.2, 410.2]);
        let p = plot(&samples);
        assert!(p.points[2].y > p.points[1].y);
        assert!(p.points.iter().all(|pt| pt.y.is_finite()));
    }

    #[test]
    fn points_stay_inside_plot() {
        let p = plot(&series(&[3.0, 9.0, 1.0, 7.0]));
        let vp = p.viewport;
        for pt in &p.points {
            assert!(pt.y >= vp.plot_top() && pt.y <= vp.plot_bottom());
            assert!(pt.x >= vp.plot_left() && pt.x <= vp.plot_right());
        }
    }

    #[test]
    fn smooth_path_uses_midpoint_controls() {
        let pts = [Point::new(0.0, 10.0), Point::new(10.0, 0.0)];
        let path = smooth_path(&pts);
        assert_eq!(path.to_string(), "M 0 10 C 5 10, 5 0, 10 0");
    }

    #[test]
    fn smooth_path_handles_short_input() {
        assert!(smooth_path(&[]).is_empty());
        assert_eq!(smooth_path(&[Point::new(1.0, 2.0)]).to_string(), "M 1 2");
    }

    #[test]
    fn area_closes_to_baseline() {
        let p = plot(&series(&[1.0, 2.0]));
        let text = p.area.to_string();
        assert!(text.starts_with(&p.line.to_string()));
        assert!(text.ends_with("L 620 240 L 80 240 Z"));
    }

    #[test]
    fn area_of_empty_line_is_empty() {
        assert!(area_path(&PathData::new(), 0.0, 10.0, 10.0).is_empty());
    }

    #[test]
    fn grid_spans_range() {
        let p = plot(&series(&[100.0, 200.0]));
        assert_eq!(p.grid.len(), 5);
        assert!(approx(p.grid[0].y, 240.0));
        assert!(approx(p.grid[4].y, 80.0));
        assert_eq!(p.grid[0].label, "90");
        assert_eq!(p.grid[4].label, "210");
    }

    #[test]
    fn axis_labels_small_series_shows_all() {
        assert_eq!(axis_label_indices(0), Vec::<usize>::new());
        assert_eq!(axis_label_indices(1), vec![0]);
        assert_eq!(axis_label_indices(8), (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn axis_labels_dense_series_subsamples() {
        // ceil(10 / 6) = 2
        assert_eq!(axis_label_indices(10), vec![0, 2, 4, 6, 8, 9]);
        // ceil(24 / 6) = 4
        assert_eq!(axis_label_indices(24), vec![0, 4, 8, 12, 16, 20, 23]);
        // ceil(13 / 6) = 3, last already aligned
        assert_eq!(axis_label_indices(13), vec![0, 3, 6, 9, 12]);
    }

    #[test]
    fn tooltips_include_unit() {
        let samples = vec![Sample::new("00:00", 450.5)];
        let chart = LineChart::new(&samples).with_unit("ppm");
        let ChartLayout::Plot(p) = chart.layout() else {
            panic!("expected plot");
        };
        assert_eq!(p.markers[0].tooltip, "00:00: 450.5 ppm");

        let ChartLayout::Plot(bare) = LineChart::new(&samples).layout() else {
            panic!("expected plot");
        };
        assert_eq!(bare.markers[0].tooltip, "00:00: 450.5");
    }

    #[test]
    fn non_finite_values_never_reach_geometry() {
        let samples = vec![
            Sample {
                label: "a".into(),
                value: f64::NAN,
            },
            Sample {
                label: "b".into(),
                value: f64::INFINITY,
            },
            Sample::new("c", 5.0),
        ];
        let p = plot(&samples);
        assert!(p.range.min.is_finite() && p.range.max.is_finite());
        assert!(p.line.coordinates().all(|pt| pt.x.is_finite() && pt.y.is_finite()));
    }

    #[test]
    fn label_precision_formats() {
        assert_eq!(LabelPrecision::Integer.format(9.5), "10");
        assert_eq!(LabelPrecision::Integer.format(-0.2), "0");
        assert_eq!(LabelPrecision::OneDecimal.format(9.54), "9.5");
        assert_eq!(LabelPrecision::OneDecimal.format(-0.01), "0.0");
    }

    #[test]
    fn with_color_ignores_invalid_hex() {
        let chart = LineChart::new(&[]).with_color("not-a-color");
        assert_eq!(chart.options().color, colors::BLUE);
        let chart = LineChart::new(&[]).with_color("#10B981");
        assert_eq!(chart.options().color.to_hex(), "#10b981");
    }

    #[test]
    fn render_svg_escapes_labels() {
        let samples = vec![Sample::new("<b>", 1.0), Sample::new("a&b", 2.0)];
        let svg = LineChart::new(&samples).render_svg();
        assert!(svg.contains("&lt;b&gt;"));
        assert!(svg.contains("a&amp;b"));
        assert!(!svg.contains("<b>"));
    }

    #[test]
    fn render_svg_has_gradient_and_markers() {
        let samples = series(&[1.0, 2.0, 3.0]);
        let svg = LineChart::new(&samples).with_color("#3B82F6").render_svg();
        assert!(svg.contains("id=\"chart-area\""));
        assert!(svg.contains("stop-opacity=\"0.4\""));
        assert_eq!(svg.matches("<circle").count(), 3);
        assert_eq!(svg.matches("<title>").count(), 3);
    }
}
