// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GPX track decoding.
//!
//! Points are read from `gpx/trk/trkseg/trkpt`. Heart rate and cadence come
//! from the Garmin `TrackPointExtension` block that Strava and most devices
//! write under `extensions`.

use crate::error::FormatError;
use crate::models::{Sample, Track};
use crate::services::markup::{
    child, child_at, document_text, field_text, nodes_at_path, parse_coordinate, parse_document,
    parse_field, parse_time,
};
use roxmltree::Node;

const ROOT: &str = "gpx";
const POINT_PATH: [&str; 3] = ["trk", "trkseg", "trkpt"];
const HEART_RATE_PATH: [&str; 3] = ["extensions", "TrackPointExtension", "hr"];
const CADENCE_PATH: [&str; 3] = ["extensions", "TrackPointExtension", "cad"];

/// Decode a GPX document into a track.
pub fn decode_gpx(bytes: &[u8]) -> Result<Track, FormatError> {
    let text = document_text(bytes).map_err(FormatError::MalformedGpx)?;
    let doc = parse_document(text, ROOT).map_err(FormatError::MalformedGpx)?;

    let samples = nodes_at_path(doc.root_element(), &POINT_PATH)
        .into_iter()
        .enumerate()
        .map(|(index, point)| {
            decode_point(point)
                .map_err(|e| FormatError::MalformedGpx(format!("trackpoint {}: {}", index, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(points = samples.len(), "Decoded GPX track");
    Ok(Track::new(samples))
}

fn decode_point(point: Node<'_, '_>) -> Result<Sample, String> {
    let lat = parse_coordinate(point.attribute("lat").map(str::trim), "lat")?;
    let lon = parse_coordinate(point.attribute("lon").map(str::trim), "lon")?;

    Ok(Sample {
        lat,
        lon,
        elevation: parse_field(field_text(child(point, "ele")), "ele")?,
        time: parse_time(field_text(child(point, "time")))?,
        heart_rate: parse_field(field_text(child_at(point, &HEART_RATE_PATH)), "hr")?,
        cadence: parse_field(field_text(child_at(point, &CADENCE_PATH)), "cad")?,
    })
}
