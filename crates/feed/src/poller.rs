//! Fixed-interval polling of a [`TelemetrySource`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use airwatch_protocol::ApiResponse;

use crate::source::TelemetrySource;

/// Default time between polls.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(3);
/// Default capacity of the event channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// Poller settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    pub channel_capacity: usize,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Outcome of one poll.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    Snapshot(ApiResponse),
    /// The fetch failed; the message is the rendered error.
    Failed(String),
}

/// Polls a source on a fixed interval, starting immediately.
pub struct Poller<S> {
    source: Arc<S>,
    config: PollConfig,
}

impl<S: TelemetrySource> Poller<S> {
    pub fn new(source: S, config: PollConfig) -> Self {
        Self {
            source: Arc::new(source),
            config,
        }
    }

    /// Starts polling on the current runtime.
    ///
    /// Ticks that fall behind a slow fetch are skipped rather than bunched.
    /// Polling stops when the handle is shut down or the receiver is dropped.
    pub fn spawn(self) -> (PollHandle, mpsc::Receiver<FeedEvent>) {
        let (tx, rx) = mpsc::channel(self.config.channel_capacity.max(1));
        let cancel = CancellationToken::new();
        let task = tokio::spawn(poll_loop(
            self.source,
            self.config.interval,
            tx,
            cancel.clone(),
        ));
        (PollHandle { cancel, task }, rx)
    }
}

/// Controls a running poller.
#[derive(Debug)]
pub struct PollHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Token that stops the poller when cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancels polling and waits for the task to exit.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            warn!("poller task ended abnormally: {e}");
        }
    }
}

async fn poll_loop<S: TelemetrySource>(
    source: Arc<S>,
    period: Duration,
    tx: mpsc::Sender<FeedEvent>,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    info!(interval_ms = period.as_millis() as u64, "telemetry poller started");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {}
        }

        let result = tokio::select! {
            _ = cancel.cancelled() => break,
            result = source.fetch() => result,
        };

        let event = match result {
            Ok(response) => {
                debug!(readings = response.data.len(), "poll succeeded");
                FeedEvent::Snapshot(response)
            }
            Err(e) => {
                warn!(error = %e, "poll failed");
                FeedEvent::Failed(e.to_string())
            }
        };

        if tx.send(event).await.is_err() {
            debug!("event receiver dropped");
            break;
        }
    }

    info!("telemetry poller stopped");
}
