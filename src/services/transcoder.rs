// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! External transcoder for binary route formats.
//!
//! FIT files are not parsed here. They are written to a scratch file and
//! handed to GPSBabel, whose standard output is captured and decoded as
//! TCX. The scratch file is a [`tempfile::TempPath`], so it is removed when
//! the call returns, fails, or unwinds.

use crate::error::{ExternalToolError, IoError, TrackError};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

/// Default limit on a single transcoder run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Format names understood by the transcoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BabelFormat {
    GarminFit,
    /// Garmin Training Center (TCX)
    Gtrnctr,
    Gpx,
}

impl BabelFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            BabelFormat::GarminFit => "garmin_fit",
            BabelFormat::Gtrnctr => "gtrnctr",
            BabelFormat::Gpx => "gpx",
        }
    }

    fn file_suffix(self) -> &'static str {
        match self {
            BabelFormat::GarminFit => ".fit",
            BabelFormat::Gtrnctr => ".tcx",
            BabelFormat::Gpx => ".gpx",
        }
    }
}

/// Converts route bytes from one format to another.
pub trait Transcoder: Send + Sync {
    fn transcode(
        &self,
        input: &[u8],
        from: BabelFormat,
        to: BabelFormat,
    ) -> Result<Vec<u8>, TrackError>;
}

/// Transcoder backed by the `gpsbabel` executable.
#[derive(Debug, Clone)]
pub struct GpsBabel {
    program: PathBuf,
    timeout: Duration,
}

impl GpsBabel {
    pub fn new<P: Into<PathBuf>>(program: P, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run the transcoder on `input` and return its standard output.
    fn run(
        &self,
        input: &Path,
        from: BabelFormat,
        to: BabelFormat,
    ) -> Result<Vec<u8>, ExternalToolError> {
        let started = Instant::now();
        let deadline = started + self.timeout;
        let mut child = Command::new(&self.program)
            .args(["-t", "-i", from.as_str(), "-f"])
            .arg(input)
            .args(["-o", to.as_str(), "-F", "-"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ExternalToolError::Launch {
                program: self.program.clone(),
                source,
            })?;

        // Drain both pipes while waiting so a chatty child cannot block on a full pipe.
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        // Processes forked by the transcoder can hold the pipes open after it
        // exits or is killed, so output collection shares the same deadline.
        let collected = self.wait_until(&mut child, deadline)?.and_then(|status| {
            let stdout = collect(stdout, deadline)?;
            let stderr = collect(stderr, deadline)?;
            Some((status, stdout, stderr))
        });
        let Some((status, stdout, stderr)) = collected else {
            return Err(ExternalToolError::Timeout {
                program: self.program.clone(),
                timeout: self.timeout,
            });
        };

        tracing::debug!(
            program = %self.program.display(),
            status = ?status.code(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Transcoder finished"
        );

        if !status.success() {
            let stderr = stderr.unwrap_or_default();
            return Err(ExternalToolError::NonZeroExit {
                program: self.program.clone(),
                code: status.code(),
                stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
            });
        }

        stdout.map_err(ExternalToolError::Output)
    }

    /// Wait for the child, killing it once `deadline` passes.
    ///
    /// Returns `Ok(None)` on timeout.
    fn wait_until(
        &self,
        child: &mut Child,
        deadline: Instant,
    ) -> Result<Option<ExitStatus>, ExternalToolError> {
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(Some(status)),
                Ok(None) if Instant::now() >= deadline => {
                    tracing::warn!(
                        program = %self.program.display(),
                        timeout_ms = self.timeout.as_millis() as u64,
                        "Transcoder timed out, killing it"
                    );
                    kill_and_reap(child);
                    return Ok(None);
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    kill_and_reap(child);
                    return Err(ExternalToolError::Output(e));
                }
            }
        }
    }
}

impl Default for GpsBabel {
    fn default() -> Self {
        Self::new("gpsbabel", DEFAULT_TIMEOUT)
    }
}

impl Transcoder for GpsBabel {
    fn transcode(
        &self,
        input: &[u8],
        from: BabelFormat,
        to: BabelFormat,
    ) -> Result<Vec<u8>, TrackError> {
        let mut scratch = tempfile::Builder::new()
            .prefix("strava-archive-")
            .suffix(from.file_suffix())
            .tempfile()
            .map_err(IoError::TempFile)?;
        scratch.write_all(input).map_err(IoError::TempFile)?;
        scratch.flush().map_err(IoError::TempFile)?;
        // Close the handle; the path is still deleted on drop.
        let scratch = scratch.into_temp_path();

        tracing::debug!(
            program = %self.program.display(),
            input = %scratch.display(),
            from = from.as_str(),
            to = to.as_str(),
            bytes = input.len(),
            "Invoking transcoder"
        );

        let output = self.run(&scratch, from, to)?;
        scratch.close().map_err(IoError::TempFile)?;
        Ok(output)
    }
}

type Drained = Receiver<io::Result<Vec<u8>>>;

fn drain<R: Read + Send + 'static>(mut reader: R) -> Drained {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        // The receiver is gone once the deadline has passed.
        let _ = tx.send(reader.read_to_end(&mut buf).map(|_| buf));
    });
    rx
}

/// Wait for a drained pipe until `deadline`. `None` means it was still open.
fn collect(pipe: Option<Drained>, deadline: Instant) -> Option<io::Result<Vec<u8>>> {
    let Some(rx) = pipe else {
        return Some(Ok(Vec::new()));
    };
    match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(result) => Some(result),
        Err(RecvTimeoutError::Timeout) => None,
        Err(RecvTimeoutError::Disconnected) => {
            Some(Err(io::Error::other("output reader panicked")))
        }
    }
}

fn kill_and_reap(child: &mut Child) {
    // The child may already have exited between polls.
    let _ = child.kill();
    let _ = child.wait();
}
