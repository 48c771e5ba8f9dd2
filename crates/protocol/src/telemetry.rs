use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Value of [`ApiResponse::status`] when the endpoint answered normally.
pub const STATUS_SUCCESS: &str = "Sukses";

/// Envelope returned by the telemetry endpoint.
///
/// Readings are ordered newest first; `data[0]` is the latest sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "lenient::readings")]
    pub data: Vec<SensorReading>,
}

impl ApiResponse {
    /// Whether the response carries usable readings.
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS && !self.data.is_empty()
    }

    /// The most recent reading, if any.
    pub fn latest(&self) -> Option<&SensorReading> {
        self.data.first()
    }
}

/// One row of sensor output.
///
/// Numeric fields are decoded leniently: numbers, numeric strings, `null`
/// and missing fields all produce a finite value (anything unusable is 0).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Air temperature in °C.
    #[serde(rename = "suhu", default, deserialize_with = "lenient::number")]
    pub temperature: f64,
    /// Relative humidity in percent.
    #[serde(rename = "kelembaban", default, deserialize_with = "lenient::number")]
    pub humidity: f64,
    /// MQ-135 reading (CO2 / benzene proxy) in ppm.
    #[serde(rename = "mq135_ppm", default, deserialize_with = "lenient::number")]
    pub co2_ppm: f64,
    /// MQ-2 reading (smoke / hydrocarbon proxy) in ppm.
    #[serde(rename = "mq2_ppm", default, deserialize_with = "lenient::number")]
    pub smoke_ppm: f64,
    /// Externally classified road/air status.
    #[serde(
        rename = "status_jalan",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub air_status: Option<String>,
    /// Measurement time as sent by the endpoint (RFC 2822).
    #[serde(
        rename = "waktu",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub recorded_at: Option<String>,
}

impl SensorReading {
    /// Parses [`recorded_at`](Self::recorded_at).
    ///
    /// Accepts RFC 2822 (`Fri, 29 Nov 2024 00:10:05 GMT`) and falls back to
    /// RFC 3339. Returns `None` when absent or unparseable.
    pub fn timestamp(&self) -> Option<DateTime<FixedOffset>> {
        let raw = self.recorded_at.as_deref()?.trim();
        DateTime::parse_from_rfc2822(raw)
            .or_else(|_| DateTime::parse_from_rfc3339(raw))
            .ok()
    }

    /// The status string, treating an empty value as absent.
    pub fn status_text(&self) -> Option<&str> {
        self.air_status.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// Forgiving deserializers for the endpoint's loosely typed JSON.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::SensorReading;

    /// Coerces a JSON value to a finite number, defaulting to 0.
    pub(crate) fn coerce_number(value: &Value) -> f64 {
        let n = match value {
            Value::Number(n) => n.as_f64().unwrap_or(0.0),
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().unwrap_or(0.0)
                }
            }
            Value::Bool(true) => 1.0,
            _ => 0.0,
        };
        if n.is_finite() { n } else { 0.0 }
    }

    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(coerce_number(&value))
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(Some(s)),
            _ => Ok(None),
        }
    }

    /// Accepts only an array of objects; anything else yields no readings.
    pub fn readings<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<SensorReading>, D::Error> {
        let Value::Array(items) = Value::deserialize(deserializer)? else {
            return Ok(Vec::new());
        };
        Ok(items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect())
    }
}
