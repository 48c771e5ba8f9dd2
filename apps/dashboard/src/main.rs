//! Air-quality dashboard entry point.
//!
//! Polls the telemetry endpoint and rewrites a static HTML dashboard after
//! every poll until interrupted.

mod config;
mod page;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use airwatch_feed::{Client, FeedEvent, PollConfig, Poller};
use airwatch_state::DashboardState;

use crate::config::DashboardConfig;
use crate::page::{PageOptions, render_page, write_atomic};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "starting air-quality dashboard"
    );

    let mut config = match DashboardConfig::load() {
        Ok(c) => {
            tracing::info!(endpoint = %c.endpoint, "configuration loaded");
            c
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to load config, using defaults");
            DashboardConfig::default()
        }
    };
    config.apply_env(|key| std::env::var(key).ok());

    let client = Client::new(&config.endpoint, config.request_timeout())
        .context("creating telemetry client")?;
    let poller = Poller::new(
        client,
        PollConfig {
            interval: config.poll_interval(),
            ..PollConfig::default()
        },
    );
    let (handle, events) = poller.spawn();

    let options = PageOptions {
        gauge_size: config.gauge_size,
        chart_color: config.chart_color.clone(),
        refresh: config.poll_interval(),
    };
    let mut state = DashboardState::new();
    publish(&state, &options, &config);

    tokio::select! {
        _ = run(events, &mut state, &options, &config) => {
            tracing::warn!("poller stopped unexpectedly");
        }
        result = tokio::signal::ctrl_c() => {
            result.context("listening for ctrl-c")?;
            tracing::info!("interrupt received, shutting down");
        }
    }

    handle.shutdown().await;
    tracing::info!("dashboard stopped");
    Ok(())
}

/// Applies poll events to `state` and republishes the page after each one.
async fn run(
    mut events: mpsc::Receiver<FeedEvent>,
    state: &mut DashboardState,
    options: &PageOptions,
    config: &DashboardConfig,
) {
    while let Some(event) = events.recv().await {
        match event {
            FeedEvent::Snapshot(response) => {
                state.apply_response(&response, chrono::Local::now());
            }
            FeedEvent::Failed(err) => state.record_failure(err),
        }
        publish(state, options, config);
    }
}

fn publish(state: &DashboardState, options: &PageOptions, config: &DashboardConfig) {
    let html = render_page(state, options);
    match write_atomic(&config.output_path, &html) {
        Ok(()) => tracing::debug!(path = %config.output_path.display(), "dashboard written"),
        Err(e) => tracing::warn!(
            path = %config.output_path.display(),
            error = %e,
            "failed to write dashboard"
        ),
    }
}
