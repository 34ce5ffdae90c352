// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava-Archive track decoder
//!
//! Reads `activities.csv` from an unpacked Strava bulk export and decodes
//! the route file of every activity, logging one line per activity.

use anyhow::Context;
use std::sync::Arc;
use strava_archive::{
    config::Config,
    services::{read_index, ArchiveStore, BatchDecoder, BatchSummary, GpsBabel, TrackParser},
    time_utils::format_utc_rfc3339,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        archive = %config.archive_path.display(),
        gpsbabel = %config.gpsbabel_path.display(),
        "Starting Strava-Archive decoder"
    );

    // Read the activity index
    let index_path = config.index_path();
    let records = read_index(&index_path)
        .with_context(|| format!("Failed to read {}", index_path.display()))?;
    tracing::info!(count = records.len(), "Activity index loaded");

    // Wire the pipeline
    let parser = TrackParser::new(
        Arc::new(ArchiveStore::new(&config.archive_path)),
        Arc::new(GpsBabel::new(
            &config.gpsbabel_path,
            config.transcode_timeout,
        )),
    );
    let batch = BatchDecoder::new(parser, config.max_concurrent_decodes);

    let outcomes = batch.decode_all(records).await;

    for outcome in &outcomes {
        if let Ok(Some(track)) = &outcome.result {
            if let Some((start, end)) = track.time_span() {
                tracing::debug!(
                    filename = %outcome.record.filename,
                    start = %format_utc_rfc3339(start),
                    end = %format_utc_rfc3339(end),
                    "Track time span"
                );
            }
        }
    }

    let summary = BatchSummary::from_outcomes(&outcomes);
    tracing::info!(
        decoded = summary.decoded,
        without_route = summary.without_route,
        failed = summary.failed,
        points = summary.points,
        "Finished decoding activity tracks"
    );
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("strava_archive=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
