// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity record from the bulk export's index.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of `activities.csv`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Strava activity ID
    pub activity_id: Option<u64>,
    /// Start date/time
    pub start_date: Option<DateTime<Utc>>,
    /// Activity name/title
    pub title: String,
    /// Activity type (Ride, Run, Rowing, etc.)
    pub activity_type: String,
    /// Free-text description
    pub description: String,
    /// Route file relative to the archive root; empty for stationary activities
    pub filename: String,
    /// Distance as reported in the export
    pub distance: Option<f32>,
    /// Elapsed time in seconds
    pub elapsed_time: Option<u32>,
    /// Moving time in seconds
    pub moving_time: Option<u32>,
    /// Elevation gain in meters
    pub elevation_gain: Option<f32>,
    /// Elevation loss in meters
    pub elevation_loss: Option<f32>,
    /// Lowest elevation in meters
    pub elevation_min: Option<f32>,
    /// Highest elevation in meters
    pub elevation_max: Option<f32>,
}

impl ActivityRecord {
    /// Record with only a route filename, mostly useful in tests.
    pub fn with_filename(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Self::default()
        }
    }

    /// Whether the activity has a route file at all.
    pub fn has_route(&self) -> bool {
        !self.filename.trim().is_empty()
    }
}
