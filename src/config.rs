// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local runs.

use crate::services::batch::DEFAULT_MAX_CONCURRENCY;
use crate::services::transcoder::DEFAULT_TIMEOUT;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the unpacked bulk export
    pub archive_path: PathBuf,
    /// Activity index, relative to the archive root
    pub activities_index: PathBuf,
    /// GPSBabel executable used to transcode FIT files
    pub gpsbabel_path: PathBuf,
    /// Limit on a single transcoder run
    pub transcode_timeout: Duration,
    /// Bound on parallel activity decodes
    pub max_concurrent_decodes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            archive_path: PathBuf::from("./archive"),
            activities_index: PathBuf::from("activities.csv"),
            gpsbabel_path: PathBuf::from("gpsbabel"),
            transcode_timeout: DEFAULT_TIMEOUT,
            max_concurrent_decodes: default_concurrency(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();
        Ok(Self {
            archive_path: env::var("STRAVA_ARCHIVE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.archive_path),
            activities_index: env::var("ACTIVITIES_INDEX")
                .map(PathBuf::from)
                .unwrap_or(defaults.activities_index),
            gpsbabel_path: env::var("GPSBABEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.gpsbabel_path),
            transcode_timeout: match positive_var("TRANSCODE_TIMEOUT_SECS")? {
                Some(secs) => Duration::from_secs(secs),
                None => defaults.transcode_timeout,
            },
            max_concurrent_decodes: match positive_var("MAX_CONCURRENT_DECODES")? {
                Some(n) => usize::try_from(n)
                    .map_err(|_| ConfigError::Invalid("MAX_CONCURRENT_DECODES", n.to_string()))?,
                None => defaults.max_concurrent_decodes,
            },
        })
    }

    /// Full path of the activity index.
    pub fn index_path(&self) -> PathBuf {
        self.archive_path.join(&self.activities_index)
    }
}

/// Read an optional positive integer variable.
fn positive_var(name: &'static str) -> Result<Option<u64>, ConfigError> {
    let Ok(raw) = env::var(name) else {
        return Ok(None);
    };
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(ConfigError::Invalid(name, raw)),
        Ok(value) => Ok(Some(value)),
    }
}

fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(DEFAULT_MAX_CONCURRENCY)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
