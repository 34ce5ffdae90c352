// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! TCX track decoding.
//!
//! Native TCX exports keep trackpoints under activity laps, while the TCX
//! that GPSBabel writes for a FIT file lays them out as a course. The caller
//! picks the layout with [`TcxProfile`]; the two are never mixed.

use crate::error::FormatError;
use crate::models::{Sample, Track};
use crate::services::markup::{
    child, child_at, document_text, field_text, nodes_at_path, parse_coordinate, parse_document,
    parse_field, parse_time,
};
use roxmltree::Node;

const ROOT: &str = "TrainingCenterDatabase";
const RUN_CADENCE_PATH: [&str; 3] = ["Extensions", "TPX", "RunCadence"];

/// Where trackpoints live inside a TCX document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TcxProfile {
    /// `Activities/Activity/Lap/Track/Trackpoint`, as exported by devices and Strava.
    Standard,
    /// `Courses/Course/Track/Trackpoint`, as produced by the transcoder from FIT.
    Transcoded,
}

impl TcxProfile {
    fn point_path(self) -> &'static [&'static str] {
        match self {
            TcxProfile::Standard => &["Activities", "Activity", "Lap", "Track", "Trackpoint"],
            TcxProfile::Transcoded => &["Courses", "Course", "Track", "Trackpoint"],
        }
    }
}

/// Decode a TCX document using the given profile.
pub fn decode_tcx(bytes: &[u8], profile: TcxProfile) -> Result<Track, FormatError> {
    let text = document_text(bytes).map_err(FormatError::MalformedTcx)?;
    let doc = parse_document(text, ROOT).map_err(FormatError::MalformedTcx)?;

    let samples = nodes_at_path(doc.root_element(), profile.point_path())
        .into_iter()
        .enumerate()
        .map(|(index, point)| {
            decode_point(point)
                .map_err(|e| FormatError::MalformedTcx(format!("Trackpoint {}: {}", index, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(points = samples.len(), ?profile, "Decoded TCX track");
    Ok(Track::new(samples))
}

fn decode_point(point: Node<'_, '_>) -> Result<Sample, String> {
    let position = child(point, "Position").ok_or("missing Position")?;
    let lat = parse_coordinate(field_text(child(position, "LatitudeDegrees")), "LatitudeDegrees")?;
    let lon = parse_coordinate(
        field_text(child(position, "LongitudeDegrees")),
        "LongitudeDegrees",
    )?;

    let cadence = match field_text(child(point, "Cadence")) {
        Some(text) => Some(text),
        None => field_text(child_at(point, &RUN_CADENCE_PATH)),
    };

    Ok(Sample {
        lat,
        lon,
        elevation: parse_field(field_text(child(point, "AltitudeMeters")), "AltitudeMeters")?,
        time: parse_time(field_text(child(point, "Time")))?,
        heart_rate: parse_field(
            field_text(child_at(point, &["HeartRateBpm", "Value"])),
            "HeartRateBpm",
        )?,
        cadence: parse_field(cadence, "Cadence")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NATIVE: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<TrainingCenterDatabase xmlns="http://www.garmin.com/xmlschemas/TrainingCenterDatabase/v2"
    xmlns:ns3="http://www.garmin.com/xmlschemas/ActivityExtension/v2">
  <Activities><Activity Sport="Running"><Id>2020-05-01T12:00:00Z</Id>
    <Lap StartTime="2020-05-01T12:00:00Z"><Track>
      <Trackpoint>
        <Time>2020-05-01T12:00:00Z</Time>
        <Position><LatitudeDegrees>37.1</LatitudeDegrees><LongitudeDegrees>-122.1</LongitudeDegrees></Position>
        <AltitudeMeters>12.0</AltitudeMeters>
        <HeartRateBpm><Value>101</Value></HeartRateBpm>
        <Extensions><ns3:TPX><ns3:RunCadence>84</ns3:RunCadence></ns3:TPX></Extensions>
      </Trackpoint>
    </Track></Lap>
    <Lap StartTime="2020-05-01T12:05:00Z"><Track>
      <Trackpoint>
        <Time>2020-05-01T12:05:00Z</Time>
        <Position><LatitudeDegrees>37.2</LatitudeDegrees><LongitudeDegrees>-122.2</LongitudeDegrees></Position>
        <Cadence>90</Cadence>
        <Extensions><ns3:TPX><ns3:RunCadence>84</ns3:RunCadence></ns3:TPX></Extensions>
      </Trackpoint>
    </Track></Lap>
  </Activity></Activities>
</TrainingCenterDatabase>"#;

    #[test]
    fn test_laps_are_concatenated() {
        let track = decode_tcx(NATIVE, TcxProfile::Standard).unwrap();
        assert_eq!(track.len(), 2);
        assert_eq!(track.samples()[0].lat, 37.1);
        assert_eq!(track.samples()[1].lat, 37.2);
    }

    #[test]
    fn test_run_cadence_fallback() {
        let track = decode_tcx(NATIVE, TcxProfile::Standard).unwrap();
        assert_eq!(track.samples()[0].cadence, Some(84));
        // Direct Cadence wins over the extension value.
        assert_eq!(track.samples()[1].cadence, Some(90));
        assert_eq!(track.samples()[1].heart_rate, None);
        assert_eq!(track.samples()[1].elevation, None);
    }

    #[test]
    fn test_missing_position_is_malformed() {
        let tcx = br#"<TrainingCenterDatabase><Courses><Course><Track>
            <Trackpoint><Time>2020-05-01T12:00:00Z</Time></Trackpoint>
        </Track></Course></Courses></TrainingCenterDatabase>"#;
        match decode_tcx(tcx, TcxProfile::Transcoded) {
            Err(FormatError::MalformedTcx(msg)) => assert!(msg.contains("Position")),
            other => panic!("expected MalformedTcx, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_root_is_malformed() {
        assert!(matches!(
            decode_tcx(b"<gpx/>", TcxProfile::Standard),
            Err(FormatError::MalformedTcx(_))
        ));
    }
}
