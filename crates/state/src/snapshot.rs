use serde::Serialize;

use airwatch_protocol::{AirStatus, SensorReading};

use crate::sanitize::{round_to, safe_number};

/// Status shown before the first successful poll.
pub const LOADING_STATUS: &str = "Loading...";
/// Status shown when a reading carries no status text.
pub const WAITING_STATUS: &str = "Waiting...";

/// The latest reading, rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorSnapshot {
    /// Whole degrees Celsius.
    pub temperature: f64,
    /// Whole percent.
    pub humidity: f64,
    pub co2_ppm: f64,
    pub smoke_ppm: f64,
    pub status: String,
}

impl SensorSnapshot {
    /// Builds a display snapshot from a raw reading.
    pub fn from_reading(reading: &SensorReading) -> Self {
        Self {
            temperature: safe_number(reading.temperature).round(),
            humidity: safe_number(reading.humidity).round(),
            co2_ppm: round_to(reading.co2_ppm, 2),
            smoke_ppm: round_to(reading.smoke_ppm, 2),
            status: reading
                .status_text()
                .map_or_else(|| WAITING_STATUS.to_owned(), str::to_owned),
        }
    }

    /// Classification of [`status`](Self::status).
    pub fn air_status(&self) -> AirStatus {
        AirStatus::parse(&self.status)
    }
}

impl Default for SensorSnapshot {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            humidity: 0.0,
            co2_ppm: 0.0,
            smoke_ppm: 0.0,
            status: LOADING_STATUS.to_owned(),
        }
    }
}
