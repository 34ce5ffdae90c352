// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! FIT decoding by way of the external transcoder.

use crate::error::TrackError;
use crate::models::Track;
use crate::services::tcx::{decode_tcx, TcxProfile};
use crate::services::transcoder::{BabelFormat, Transcoder};

/// Transcode FIT bytes to TCX and decode them with the transcoded profile.
///
/// A transcoder failure returns before any TCX parsing is attempted. Empty or
/// garbage output from a transcoder that exited cleanly surfaces as a TCX
/// format error.
pub fn decode_fit<T>(bytes: &[u8], transcoder: &T) -> Result<Track, TrackError>
where
    T: Transcoder + ?Sized,
{
    let tcx = transcoder.transcode(bytes, BabelFormat::GarminFit, BabelFormat::Gtrnctr)?;
    tracing::debug!(tcx_len = tcx.len(), "Transcoded FIT to TCX");
    Ok(decode_tcx(&tcx, TcxProfile::Transcoded)?)
}
