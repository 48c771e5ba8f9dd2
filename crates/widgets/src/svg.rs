//! Small helpers shared by the SVG writers.

use std::fmt::Write;

use crate::colors::Color;
use crate::geometry::num;

pub(crate) const FONT_FAMILY: &str = "Inter, Poppins, sans-serif";

/// Escapes text for use in element content or attribute values.
pub fn escape_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Writes the opening `<svg>` tag.
pub(crate) fn open(out: &mut String, width: f32, height: f32, label: &str) {
    let (w, h) = (num(width), num(height));
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" role=\"img\" aria-label=\"{}\">",
        escape_text(label)
    );
}

/// Writes a `<stop>` for a gradient.
pub(crate) fn stop(out: &mut String, offset_percent: u32, color: Color, opacity: f32) {
    let _ = writeln!(
        out,
        "      <stop offset=\"{offset_percent}%\" stop-color=\"{}\" stop-opacity=\"{}\"/>",
        color.to_hex(),
        num(opacity)
    );
}

/// Writes a blur-and-merge glow filter.
pub(crate) fn glow_filter(out: &mut String, id: &str, std_deviation: f32) {
    let _ = writeln!(
        out,
        "    <filter id=\"{id}\" x=\"-50%\" y=\"-50%\" width=\"200%\" height=\"200%\">"
    );
    let _ = writeln!(
        out,
        "      <feGaussianBlur stdDeviation=\"{}\" result=\"coloredBlur\"/>",
        num(std_deviation)
    );
    let _ = writeln!(out, "      <feMerge>");
    let _ = writeln!(out, "        <feMergeNode in=\"coloredBlur\"/>");
    let _ = writeln!(out, "        <feMergeNode in=\"SourceGraphic\"/>");
    let _ = writeln!(out, "      </feMerge>");
    let _ = writeln!(out, "    </filter>");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_text_replaces_markup() {
        assert_eq!(
            escape_text("<b>\"a\" & 'b'</b>"),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn open_writes_viewbox() {
        let mut out = String::new();
        open(&mut out, 700.0, 320.0, "chart");
        assert!(out.contains("viewBox=\"0 0 700 320\""));
        assert!(out.contains("aria-label=\"chart\""));
    }
}
