// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route file format detection from the filename.
//!
//! Accepted shapes are `<name>.<gpx|tcx|fit>` and `<name>.<gpx|tcx|fit>.gz`.
//! Only the final path component is inspected, so the `activities/` prefix
//! used by the export does not count as a segment.

use crate::error::FormatError;
use std::fmt;
use std::path::Path;

/// Suffix marking a gzip-wrapped route file.
pub const COMPRESSION_SUFFIX: &str = "gz";

/// Track file formats found in the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackFormat {
    Gpx,
    Tcx,
    Fit,
}

impl TrackFormat {
    /// Map a filename extension to a format. Extensions are case-sensitive.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "gpx" => Some(TrackFormat::Gpx),
            "tcx" => Some(TrackFormat::Tcx),
            "fit" => Some(TrackFormat::Fit),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            TrackFormat::Gpx => "gpx",
            TrackFormat::Tcx => "tcx",
            TrackFormat::Fit => "fit",
        }
    }
}

impl fmt::Display for TrackFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Detected format and compression of a route file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteFormat {
    pub format: TrackFormat,
    pub compressed: bool,
}

/// Classify a route filename.
pub fn detect_format(filename: &str) -> Result<RouteFormat, FormatError> {
    let name = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| FormatError::MalformedFilename(filename.to_string()))?;

    let segments: Vec<&str> = name.split('.').collect();
    let (ext, compressed) = match segments.as_slice() {
        [stem, ext] if !stem.is_empty() => (*ext, false),
        [stem, ext, suffix] if !stem.is_empty() && *suffix == COMPRESSION_SUFFIX => (*ext, true),
        _ => return Err(FormatError::MalformedFilename(filename.to_string())),
    };

    let format = TrackFormat::from_extension(ext)
        .ok_or_else(|| FormatError::UnsupportedFormat(ext.to_string()))?;

    Ok(RouteFormat { format, compressed })
}
