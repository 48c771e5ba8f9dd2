//! Reduces raw readings to one averaged sample per hour.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Timelike};
use tracing::debug;

use airwatch_protocol::SensorReading;
use airwatch_widgets::Sample;

use crate::sanitize::{round_to, safe_number};

/// How far back, in hours, readings count toward the history.
pub const HISTORY_WINDOW_HOURS: i64 = 24;
/// Number of newest readings used when none fall inside the window.
pub const FALLBACK_READINGS: usize = 24;

#[derive(Debug, Default)]
struct Bucket {
    sum: f64,
    count: u32,
}

/// Builds the hourly CO2 history shown on the chart.
///
/// Readings timestamped within `HISTORY_WINDOW_HOURS` before `now` are kept. When
/// none are, the first `FALLBACK_READINGS` readings are used instead (the
/// endpoint sends newest first). Readings are grouped by calendar hour in
/// `now`'s time zone, `co2_ppm` is averaged per group and rounded to two
/// decimals, and the result is sorted oldest to newest with `HH:00` labels.
/// Readings without a parseable timestamp are skipped.
pub fn hourly_series<Tz: TimeZone>(readings: &[SensorReading], now: DateTime<Tz>) -> Vec<Sample> {
    let tz = now.timezone();
    let window_start = now.clone() - Duration::hours(HISTORY_WINDOW_HOURS);

    let recent: Vec<(&SensorReading, DateTime<Tz>)> = readings
        .iter()
        .filter_map(|r| r.timestamp().map(|t| (r, t.with_timezone(&tz))))
        .filter(|(_, t)| *t >= window_start && *t <= now)
        .collect();

    let selected = if recent.is_empty() {
        debug!(
            total = readings.len(),
            "no readings inside history window, using newest {FALLBACK_READINGS}"
        );
        readings
            .iter()
            .take(FALLBACK_READINGS)
            .filter_map(|r| r.timestamp().map(|t| (r, t.with_timezone(&tz))))
            .collect()
    } else {
        recent
    };

    let mut buckets: BTreeMap<(NaiveDate, u32), Bucket> = BTreeMap::new();
    for (reading, at) in &selected {
        let bucket = buckets.entry((at.date_naive(), at.hour())).or_default();
        bucket.sum += safe_number(reading.co2_ppm);
        bucket.count += 1;
    }

    buckets
        .into_iter()
        .map(|((_, hour), bucket)| {
            let average = bucket.sum / f64::from(bucket.count);
            Sample::new(format!("{hour:02}:00"), round_to(average, 2))
        })
        .collect()
}
