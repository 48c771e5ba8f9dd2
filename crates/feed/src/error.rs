use airwatch_protocol::ProtocolError;

/// Errors from fetching telemetry.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),
}
