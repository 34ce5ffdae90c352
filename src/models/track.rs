// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Normalized track model shared by all decoders.

use chrono::{DateTime, Utc};
use geo::LineString;
use serde::{Deserialize, Serialize};

/// One instant along a track.
///
/// Optional readings are `None` when the source document did not carry the
/// field, so a genuine zero is never confused with a missing value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Elevation in meters
    pub elevation: Option<f64>,
    pub time: Option<DateTime<Utc>>,
    /// Heart rate in beats per minute
    pub heart_rate: Option<u32>,
    pub cadence: Option<u32>,
}

impl Sample {
    /// Sample with coordinates only.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            elevation: None,
            time: None,
            heart_rate: None,
            cadence: None,
        }
    }
}

/// Ordered samples in source document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    samples: Vec<Sample>,
}

impl Track {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }

    /// First and last timestamps present in the track.
    pub fn time_span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let first = self.samples.iter().find_map(|s| s.time)?;
        let last = self.samples.iter().rev().find_map(|s| s.time)?;
        Some((first, last))
    }

    /// Track geometry as a line string (x = longitude, y = latitude).
    pub fn line_string(&self) -> LineString<f64> {
        self.samples
            .iter()
            .map(|s| (s.lon, s.lat))
            .collect::<Vec<_>>()
            .into()
    }
}

impl<'a> IntoIterator for &'a Track {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
