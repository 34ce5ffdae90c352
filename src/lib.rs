// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava-Archive: decode activity tracks from a Strava bulk export
//!
//! This crate reads the export's activity index and turns each activity's
//! route file (GPX, TCX or FIT, optionally gzipped) into a normalized
//! [`Track`](models::Track) of samples.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

pub use error::{ActivityError, ExternalToolError, FormatError, IoError, TrackError};
pub use models::{ActivityRecord, Sample, Track};
