//! HTML page composition.

use std::fmt::Write as _;
use std::io;
use std::path::Path;
use std::time::Duration;

use airwatch_protocol::AirStatus;
use airwatch_state::DashboardState;
use airwatch_widgets::colors::{self, Color};
use airwatch_widgets::svg::escape_text;
use airwatch_widgets::{CircularGauge, LineChart};

const TITLE: &str = "Intersection Air Quality Monitor";
const LOADING_MESSAGE: &str = "Loading data...";
const EMPTY_MESSAGE: &str = "Waiting for sensor data...";

const STYLE: &str = "\
body{margin:0;min-height:100vh;font-family:Inter,Poppins,sans-serif;color:#111827;\
background:linear-gradient(135deg,#e6f0ff 0%,#f0f8ff 40%,#fff 100%)}\
header{padding:20px 24px;background:rgba(255,255,255,.9);border-bottom:1px solid rgba(255,255,255,.2)}\
h1{margin:0;font-size:24px}header p{margin:4px 0 0;color:#4b5563;font-size:14px}\
main{max-width:1280px;margin:0 auto;padding:32px 24px}\
.cards{display:grid;grid-template-columns:repeat(auto-fit,minmax(220px,1fr));gap:24px;margin-bottom:32px}\
.charts{display:grid;grid-template-columns:1fr 2fr;gap:32px}\
.card{background:rgba(255,255,255,.7);border-radius:16px;padding:20px;box-shadow:0 10px 25px rgba(0,0,0,.08)}\
.card h2{margin:0 0 12px;font-size:14px;color:#374151}.card h3{margin:0 0 12px;font-size:20px}\
.value{font-size:36px;font-weight:700}\
.progress{height:12px;border-radius:6px;background:#dbeafe;overflow:hidden;margin-top:12px}\
.progress div{height:100%;background:#3b82f6}\
.placeholder{min-height:300px;display:flex;align-items:center;justify-content:center;color:#9ca3af}\
svg{max-width:100%;height:auto}\
footer{text-align:center;padding:24px;color:#374151;font-size:14px;font-weight:600}";

/// Rendering settings taken from the configuration.
#[derive(Debug, Clone)]
pub struct PageOptions {
    pub gauge_size: f32,
    pub chart_color: String,
    /// Browser reload period; matches the poll interval.
    pub refresh: Duration,
}

/// Color of the air status text.
pub fn status_color(status: &AirStatus) -> Color {
    match status {
        AirStatus::Good => colors::GREEN,
        AirStatus::Moderate => colors::YELLOW,
        AirStatus::Unhealthy => colors::RED,
        AirStatus::Other(_) => colors::TEXT_STRONG,
    }
}

/// Width of the humidity progress bar, in percent.
fn progress_percent(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Formats a reading the way numbers print on the page (`450.5`, `30`).
fn display_number(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    format!("{value}")
}

/// Renders the complete dashboard page.
pub fn render_page(state: &DashboardState, options: &PageOptions) -> String {
    let snap = state.snapshot();
    let mut out = String::new();

    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, "<html lang=\"en\">");
    let _ = writeln!(out, "<head>");
    let _ = writeln!(out, "<meta charset=\"utf-8\">");
    let _ = writeln!(
        out,
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">"
    );
    let _ = writeln!(
        out,
        "<meta http-equiv=\"refresh\" content=\"{}\">",
        options.refresh.as_secs().max(1)
    );
    let _ = writeln!(out, "<title>{TITLE}</title>");
    let _ = writeln!(out, "<style>{STYLE}</style>");
    let _ = writeln!(out, "</head>");
    let _ = writeln!(out, "<body>");
    let _ = writeln!(
        out,
        "<header><h1>{TITLE}</h1><p>IoT-Based Monitoring System</p></header>"
    );
    let _ = writeln!(out, "<main>");

    // Reading cards.
    let _ = writeln!(out, "<section class=\"cards\">");
    let _ = writeln!(
        out,
        "<div class=\"card\" id=\"humidity\"><h2>Humidity</h2><div class=\"value\">{}%</div>\
<div class=\"progress\"><div style=\"width:{}%\"></div></div></div>",
        display_number(snap.humidity),
        progress_percent(snap.humidity)
    );
    let _ = writeln!(
        out,
        "<div class=\"card\" id=\"co2\"><h2>CO2/Benzene</h2><div class=\"value\">{} ppm</div></div>",
        display_number(snap.co2_ppm)
    );
    let _ = writeln!(
        out,
        "<div class=\"card\" id=\"smoke\"><h2>Smoke/Hydrocarbon</h2><div class=\"value\">{} ppm</div></div>",
        display_number(snap.smoke_ppm)
    );
    let _ = writeln!(
        out,
        "<div class=\"card\" id=\"status\"><h2>Air Status</h2><div class=\"value\" style=\"color:{}\">{}</div></div>",
        status_color(&snap.air_status()),
        escape_text(&snap.status)
    );
    let _ = writeln!(out, "</section>");

    // Gauge and history.
    let gauge = CircularGauge::new(snap.temperature).with_size(options.gauge_size);
    let _ = writeln!(out, "<section class=\"charts\">");
    let _ = writeln!(
        out,
        "<div class=\"card\" id=\"temperature\"><h3 data-icon=\"{}\">Temperature</h3>",
        gauge.status().icon()
    );
    out.push_str(&gauge.render_svg());
    let _ = writeln!(out, "</div>");

    let _ = writeln!(
        out,
        "<div class=\"card\" id=\"history\"><h3>Air Quality History</h3>"
    );
    if state.is_loading() {
        let _ = writeln!(out, "<div class=\"placeholder\">{LOADING_MESSAGE}</div>");
    } else if state.history().is_empty() {
        let _ = writeln!(out, "<div class=\"placeholder\">{EMPTY_MESSAGE}</div>");
    } else {
        let chart = LineChart::new(state.history())
            .with_unit("ppm")
            .with_color(&options.chart_color);
        out.push_str(&chart.render_svg());
    }
    let _ = writeln!(out, "</div>");
    let _ = writeln!(out, "</section>");
    let _ = writeln!(out, "</main>");

    let _ = write!(out, "<footer>");
    if let Some(at) = state.updated_at() {
        let _ = write!(out, "Last updated {} UTC", at.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(err) = state.last_error() {
        let _ = write!(
            out,
            "<p class=\"error\">Last poll failed: {}</p>",
            escape_text(err)
        );
    }
    let _ = writeln!(out, "</footer>");
    let _ = writeln!(out, "</body>");
    let _ = writeln!(out, "</html>");
    out
}

/// Writes `contents` to `path` via a sibling temporary file and a rename, so
/// readers never observe a partially written page.
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    std::fs::write(&tmp_path, contents)?;
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e);
    }
    Ok(())
}
