// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gzip unwrapping for compressed route files.

use crate::error::IoError;
use flate2::read::GzDecoder;
use std::borrow::Cow;
use std::io::Read;

/// Undo the gzip wrapper when `compressed` is set; otherwise pass the bytes through.
///
/// Only the first gzip member is read.
pub fn decompress(bytes: &[u8], compressed: bool) -> Result<Cow<'_, [u8]>, IoError> {
    if !compressed {
        return Ok(Cow::Borrowed(bytes));
    }

    let mut decoder = GzDecoder::new(bytes);
    let mut out = Vec::with_capacity(bytes.len().saturating_mul(4));
    decoder
        .read_to_end(&mut out)
        .map_err(IoError::Decompress)?;

    tracing::debug!(
        compressed_len = bytes.len(),
        decompressed_len = out.len(),
        "Decompressed route file"
    );
    Ok(Cow::Owned(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_passthrough_borrows() {
        let data = b"<gpx/>";
        let out = decompress(data, false).unwrap();
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(&*out, data);
    }

    #[test]
    fn test_truncated_stream_fails() {
        let packed = gzip(b"some route data that is long enough to matter");
        let truncated = &packed[..packed.len() / 2];
        assert!(matches!(
            decompress(truncated, true),
            Err(IoError::Decompress(_))
        ));
    }
}
