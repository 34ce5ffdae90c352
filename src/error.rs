// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types for track decoding.
//!
//! Every stage of the pipeline reports one of three kinds of failure:
//! I/O (the bytes could not be obtained), format (the bytes or filename are
//! not a valid track), or external tool (the transcoder misbehaved). The
//! track parser wraps whichever one it hit in [`ActivityError`] together with
//! the route filename.

use std::path::PathBuf;
use std::time::Duration;

/// Failure to obtain the bytes of a route file.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("Route file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Decompression failed: {0}")]
    Decompress(#[source] std::io::Error),

    #[error("Temporary file error: {0}")]
    TempFile(#[source] std::io::Error),

    #[error("Decode worker failed: {0}")]
    Worker(String),
}

/// The filename or document is not a decodable track.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("Malformed filename: {0}")]
    MalformedFilename(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Malformed GPX: {0}")]
    MalformedGpx(String),

    #[error("Malformed TCX: {0}")]
    MalformedTcx(String),
}

/// The external transcoder could not produce output.
#[derive(Debug, thiserror::Error)]
pub enum ExternalToolError {
    #[error("Failed to launch {}: {source}", program.display())]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Transcoding failed: {} exited with {}: {stderr}", program.display(), exit_code_label(*code))]
    NonZeroExit {
        program: PathBuf,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Transcoding failed: {} did not finish within {timeout:?}", program.display())]
    Timeout { program: PathBuf, timeout: Duration },

    #[error("Failed to collect transcoder output: {0}")]
    Output(#[source] std::io::Error),
}

fn exit_code_label(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

/// Any failure from a single decode stage.
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    ExternalTool(#[from] ExternalToolError),
}

impl TrackError {
    pub fn is_io(&self) -> bool {
        matches!(self, TrackError::Io(_))
    }

    pub fn is_format(&self) -> bool {
        matches!(self, TrackError::Format(_))
    }

    /// True when the transcoder is at fault rather than the data.
    pub fn is_external_tool(&self) -> bool {
        matches!(self, TrackError::ExternalTool(_))
    }
}

/// A failed track parse for one activity.
#[derive(Debug, thiserror::Error)]
#[error("{filename}: {source}")]
pub struct ActivityError {
    pub filename: String,
    #[source]
    pub source: TrackError,
}

impl ActivityError {
    pub fn new(filename: impl Into<String>, source: impl Into<TrackError>) -> Self {
        Self {
            filename: filename.into(),
            source: source.into(),
        }
    }
}

/// Result type alias for the decode pipeline.
pub type Result<T> = std::result::Result<T, TrackError>;
