// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Parallel track decoding for a whole export.
//!
//! Each activity is decoded on the blocking pool; at most `max_concurrency`
//! decodes run at once. Activities share no state, so a failure only marks
//! that activity's outcome.

use crate::error::{ActivityError, IoError};
use crate::models::{ActivityRecord, Track};
use crate::services::track_parser::TrackParser;
use futures_util::stream::{self, StreamExt};
use std::sync::Arc;

/// Default number of concurrent decodes when none is configured.
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Result of decoding one activity.
#[derive(Debug)]
pub struct ActivityOutcome {
    pub record: Arc<ActivityRecord>,
    pub result: Result<Option<Track>, ActivityError>,
}

/// Counts over a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub decoded: usize,
    pub without_route: usize,
    pub failed: usize,
    pub points: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[ActivityOutcome]) -> Self {
        outcomes
            .iter()
            .fold(Self::default(), |mut summary, outcome| {
                match &outcome.result {
                    Ok(Some(track)) => {
                        summary.decoded += 1;
                        summary.points += track.len();
                    }
                    Ok(None) => summary.without_route += 1,
                    Err(_) => summary.failed += 1,
                }
                summary
            })
    }
}

/// Decodes many activities with bounded parallelism.
#[derive(Clone)]
pub struct BatchDecoder {
    parser: TrackParser,
    max_concurrency: usize,
}

impl BatchDecoder {
    pub fn new(parser: TrackParser, max_concurrency: usize) -> Self {
        Self {
            parser,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Decode every record. Outcomes are returned in completion order.
    pub async fn decode_all(&self, records: Vec<ActivityRecord>) -> Vec<ActivityOutcome> {
        tracing::info!(
            activities = records.len(),
            max_concurrency = self.max_concurrency,
            "Decoding activity tracks"
        );

        stream::iter(records)
            .map(|record| self.decode_one(Arc::new(record)))
            .buffer_unordered(self.max_concurrency)
            .collect()
            .await
    }

    async fn decode_one(&self, record: Arc<ActivityRecord>) -> ActivityOutcome {
        let parser = self.parser.clone();
        let task_record = record.clone();
        let result = match tokio::task::spawn_blocking(move || parser.parse(&task_record)).await {
            Ok(result) => result,
            Err(e) => Err(ActivityError::new(
                record.filename.clone(),
                IoError::Worker(e.to_string()),
            )),
        };

        match &result {
            Ok(Some(track)) => tracing::info!(
                filename = %record.filename,
                title = %record.title,
                points = track.len(),
                "Decoded activity track"
            ),
            Ok(None) => tracing::debug!(title = %record.title, "Activity has no route"),
            Err(e) => tracing::warn!(
                filename = %e.filename,
                title = %record.title,
                error = %e.source,
                "Failed to decode activity track"
            ),
        }

        ActivityOutcome { record, result }
    }
}
