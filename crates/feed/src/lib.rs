//! Fetching telemetry from the sensor endpoint.
//!
//! [`Client`] performs one HTTP request per call. [`Poller`] drives any
//! [`TelemetrySource`] on a fixed interval and forwards results as
//! [`FeedEvent`]s until cancelled.

pub mod client;
pub mod error;
pub mod poller;
pub mod source;

pub use client::Client;
pub use error::FeedError;
pub use poller::{FeedEvent, PollConfig, PollHandle, Poller};
pub use source::TelemetrySource;
