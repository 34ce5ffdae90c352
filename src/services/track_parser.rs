// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Track parsing for a single activity.
//!
//! Handles the core workflow:
//! 1. Skip activities without a route file
//! 2. Classify the filename (format + compression)
//! 3. Read the route file from the archive
//! 4. Decompress if needed
//! 5. Dispatch to the GPX, TCX or FIT decoder

use crate::error::{ActivityError, TrackError};
use crate::models::{ActivityRecord, Track};
use crate::services::archive::RouteSource;
use crate::services::decompress::decompress;
use crate::services::fit::decode_fit;
use crate::services::format::{detect_format, TrackFormat};
use crate::services::gpx::decode_gpx;
use crate::services::tcx::{decode_tcx, TcxProfile};
use crate::services::transcoder::Transcoder;
use std::sync::Arc;

/// Decodes the route file of an activity into a [`Track`].
#[derive(Clone)]
pub struct TrackParser {
    source: Arc<dyn RouteSource>,
    transcoder: Arc<dyn Transcoder>,
}

impl TrackParser {
    pub fn new(source: Arc<dyn RouteSource>, transcoder: Arc<dyn Transcoder>) -> Self {
        Self { source, transcoder }
    }

    /// Parse the track of one activity.
    ///
    /// Returns `Ok(None)` for activities without a route file (indoor rows,
    /// treadmill runs). Any failure is reported with the route filename and
    /// no partial track.
    pub fn parse(&self, record: &ActivityRecord) -> Result<Option<Track>, ActivityError> {
        if !record.has_route() {
            tracing::debug!(title = %record.title, "Activity has no route file");
            return Ok(None);
        }

        let filename = record.filename.trim();
        self.parse_route(filename)
            .map(Some)
            .map_err(|source| ActivityError::new(filename, source))
    }

    /// Decode a route file by its archive-relative filename.
    pub fn parse_route(&self, filename: &str) -> Result<Track, TrackError> {
        let route = detect_format(filename)?;
        tracing::debug!(
            filename,
            format = %route.format,
            compressed = route.compressed,
            "Detected route format"
        );

        let raw = self.source.read(filename)?;
        let bytes = decompress(&raw, route.compressed)?;

        let track = match route.format {
            TrackFormat::Gpx => decode_gpx(&bytes)?,
            TrackFormat::Tcx => decode_tcx(&bytes, TcxProfile::Standard)?,
            TrackFormat::Fit => decode_fit(&bytes, self.transcoder.as_ref())?,
        };

        tracing::debug!(filename, points = track.len(), "Parsed route");
        Ok(track)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FormatError, IoError};
    use crate::services::transcoder::BabelFormat;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory archive that counts reads.
    #[derive(Default)]
    struct MemorySource {
        files: HashMap<String, Vec<u8>>,
        reads: AtomicUsize,
    }

    impl RouteSource for MemorySource {
        fn read(&self, filename: &str) -> Result<Vec<u8>, IoError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.files
                .get(filename)
                .cloned()
                .ok_or_else(|| IoError::NotFound {
                    path: PathBuf::from(filename),
                })
        }
    }

    struct PanickingTranscoder;

    impl Transcoder for PanickingTranscoder {
        fn transcode(
            &self,
            _input: &[u8],
            _from: BabelFormat,
            _to: BabelFormat,
        ) -> Result<Vec<u8>, TrackError> {
            panic!("transcoder should not be called");
        }
    }

    fn parser_with(source: Arc<MemorySource>) -> TrackParser {
        TrackParser::new(source, Arc::new(PanickingTranscoder))
    }

    #[test]
    fn test_bad_filename_is_rejected_before_reading() {
        let source = Arc::new(MemorySource::default());
        let parser = parser_with(source.clone());

        let err = parser
            .parse(&ActivityRecord::with_filename("activities/1.kml"))
            .unwrap_err();
        assert_eq!(err.filename, "activities/1.kml");
        assert!(matches!(
            err.source,
            TrackError::Format(FormatError::UnsupportedFormat(_))
        ));
        assert_eq!(source.reads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_blank_filename_has_no_track() {
        let source = Arc::new(MemorySource::default());
        let parser = parser_with(source.clone());

        let result = parser.parse(&ActivityRecord::with_filename("  ")).unwrap();
        assert!(result.is_none());
        assert_eq!(source.reads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_gpx_dispatch() {
        let mut source = MemorySource::default();
        source.files.insert(
            "a.gpx".to_string(),
            br#"<gpx><trk><trkseg><trkpt lat="1.5" lon="2.5"/></trkseg></trk></gpx>"#.to_vec(),
        );
        let parser = parser_with(Arc::new(source));

        let track = parser
            .parse(&ActivityRecord::with_filename("a.gpx"))
            .unwrap()
            .unwrap();
        assert_eq!(track.len(), 1);
        assert_eq!(track.samples()[0].lon, 2.5);
    }

    #[test]
    fn test_padded_filename_is_trimmed() {
        let mut source = MemorySource::default();
        source.files.insert(
            "a.gpx".to_string(),
            br#"<gpx><trk><trkseg><trkpt lat="1.5" lon="2.5"/></trkseg></trk></gpx>"#.to_vec(),
        );
        let parser = parser_with(Arc::new(source));

        let track = parser
            .parse(&ActivityRecord::with_filename(" a.gpx "))
            .unwrap()
            .unwrap();
        assert_eq!(track.len(), 1);
    }

    #[test]
    fn test_padded_missing_filename_reports_trimmed_name() {
        let parser = parser_with(Arc::new(MemorySource::default()));

        let err = parser
            .parse(&ActivityRecord::with_filename(" b.gpx"))
            .unwrap_err();
        assert_eq!(err.filename, "b.gpx");
        assert!(err.source.is_io());
    }
}
