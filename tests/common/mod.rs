// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use strava_archive::services::{BabelFormat, Transcoder};
use strava_archive::{ExternalToolError, TrackError};

/// Path of a file under `tests/fixtures`.
#[allow(dead_code)]
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Bytes of a file under `tests/fixtures`.
#[allow(dead_code)]
pub fn fixture(name: &str) -> Vec<u8> {
    fs::read(fixture_path(name)).expect("Failed to read fixture")
}

/// Gzip a buffer the way the export does.
#[allow(dead_code)]
pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).expect("Failed to gzip");
    encoder.finish().expect("Failed to finish gzip stream")
}

/// Write `contents` to `root/filename`, creating parent directories.
#[allow(dead_code)]
pub fn write_route(root: &Path, filename: &str, contents: &[u8]) {
    let path = root.join(filename);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create archive directory");
    }
    fs::write(path, contents).expect("Failed to write route file");
}

/// Transcoder that returns a fixed buffer and records its calls.
#[allow(dead_code)]
pub struct StubTranscoder {
    output: Vec<u8>,
    pub calls: Mutex<Vec<(Vec<u8>, BabelFormat, BabelFormat)>>,
}

#[allow(dead_code)]
impl StubTranscoder {
    pub fn new(output: Vec<u8>) -> Self {
        Self {
            output,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Transcoder for StubTranscoder {
    fn transcode(
        &self,
        input: &[u8],
        from: BabelFormat,
        to: BabelFormat,
    ) -> Result<Vec<u8>, TrackError> {
        self.calls.lock().unwrap().push((input.to_vec(), from, to));
        Ok(self.output.clone())
    }
}

/// Transcoder that always fails like a crashing executable.
#[allow(dead_code)]
pub struct FailingTranscoder;

impl Transcoder for FailingTranscoder {
    fn transcode(
        &self,
        _input: &[u8],
        _from: BabelFormat,
        _to: BabelFormat,
    ) -> Result<Vec<u8>, TrackError> {
        Err(ExternalToolError::NonZeroExit {
            program: PathBuf::from("gpsbabel"),
            code: Some(1),
            stderr: "Unknown file type".to_string(),
        }
        .into())
    }
}
