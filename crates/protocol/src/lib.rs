//! Wire types for the air-quality telemetry endpoint.

pub mod status;
pub mod telemetry;

pub use status::AirStatus;
pub use telemetry::{ApiResponse, STATUS_SUCCESS, SensorReading};

/// Errors decoding an endpoint response.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decodes a raw response body.
pub fn decode_response(body: &[u8]) -> Result<ApiResponse, ProtocolError> {
    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_response_ok() {
        let body = br#"{"status":"Sukses","data":[{"suhu":"30"}]}"#;
        let resp = decode_response(body).unwrap();
        assert!(resp.is_success());
    }

    #[test]
    fn decode_response_rejects_non_json() {
        let err = decode_response(b"<html>502</html>").unwrap_err();
        assert!(err.to_string().starts_with("JSON error"));
    }
}
