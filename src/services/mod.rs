// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - decoding pipeline.

pub mod archive;
pub mod batch;
pub mod decompress;
pub mod fit;
pub mod format;
pub mod gpx;
pub mod index;
mod markup;
pub mod tcx;
pub mod track_parser;
pub mod transcoder;

pub use archive::{ArchiveStore, RouteSource};
pub use batch::{ActivityOutcome, BatchDecoder, BatchSummary};
pub use decompress::decompress;
pub use fit::decode_fit;
pub use format::{detect_format, RouteFormat, TrackFormat};
pub use gpx::decode_gpx;
pub use index::{read_index, read_index_from, IndexError};
pub use tcx::{decode_tcx, TcxProfile};
pub use track_parser::TrackParser;
pub use transcoder::{BabelFormat, GpsBabel, Transcoder};
