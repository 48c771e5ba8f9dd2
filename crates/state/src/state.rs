use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use tracing::{debug, warn};

use airwatch_protocol::ApiResponse;
use airwatch_widgets::Sample;

use crate::aggregate::hourly_series;
use crate::snapshot::SensorSnapshot;

/// Everything the dashboard page is rendered from.
///
/// The poll loop feeds responses and failures in; the page writer reads the
/// accessors. All methods are synchronous.
#[derive(Debug, Clone)]
pub struct DashboardState {
    snapshot: SensorSnapshot,
    history: Vec<Sample>,
    loading: bool,
    last_error: Option<String>,
    updated_at: Option<DateTime<Utc>>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            snapshot: SensorSnapshot::default(),
            history: Vec::new(),
            loading: true,
            last_error: None,
            updated_at: None,
        }
    }

    /// Folds a poll response into the state.
    ///
    /// Returns `true` when the response carried readings and replaced the
    /// snapshot and history. Any other response leaves the previous values
    /// in place. Either way the initial loading phase ends.
    pub fn apply_response<Tz: TimeZone>(&mut self, response: &ApiResponse, now: DateTime<Tz>) -> bool {
        self.loading = false;

        let latest = match response.latest() {
            Some(latest) if response.is_success() => latest,
            _ => {
                warn!(
                    status = %response.status,
                    readings = response.data.len(),
                    "ignoring unsuccessful response"
                );
                return false;
            }
        };

        self.snapshot = SensorSnapshot::from_reading(latest);
        self.history = hourly_series(&response.data, now.clone());
        self.last_error = None;
        self.updated_at = Some(now.with_timezone(&Utc));
        debug!(
            readings = response.data.len(),
            buckets = self.history.len(),
            status = %self.snapshot.status,
            "dashboard state updated"
        );
        true
    }

    /// Records a failed poll. Previous readings stay on screen.
    pub fn record_failure(&mut self, error: impl fmt::Display) {
        self.loading = false;
        self.last_error = Some(error.to_string());
    }

    pub fn snapshot(&self) -> &SensorSnapshot {
        &self.snapshot
    }

    /// Hourly CO2 averages, oldest first.
    pub fn history(&self) -> &[Sample] {
        &self.history
    }

    /// Whether no poll has completed yet.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// When the last successful response was applied.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}
