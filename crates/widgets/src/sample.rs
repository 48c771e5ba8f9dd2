use serde::{Deserialize, Serialize};

/// One observed metric for one time bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub label: String,
    pub value: f64,
}

impl Sample {
    /// Creates a sample, replacing a non-finite `value` with 0.
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value: finite_or_zero(value),
        }
    }
}

/// Returns `value` unchanged if finite, otherwise 0.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
