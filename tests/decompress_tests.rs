// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gzip unwrapping of route files.

mod common;

use common::{fixture, gzip};
use strava_archive::services::decompress;
use strava_archive::IoError;

#[test]
fn test_round_trip_restores_bytes() {
    let pseudo_random: Vec<u8> = (0u32..50_000)
        .map(|i| (i.wrapping_mul(2_654_435_761) >> 13) as u8)
        .collect();
    let inputs: Vec<Vec<u8>> = vec![
        Vec::new(),
        b"x".to_vec(),
        fixture("morning_ride.gpx"),
        pseudo_random,
    ];

    for input in inputs {
        let packed = gzip(&input);
        let unpacked = decompress(&packed, true).expect("round trip should succeed");
        assert_eq!(&*unpacked, input.as_slice());
    }
}

#[test]
fn test_uncompressed_bytes_pass_through() {
    let input = fixture("evening_run.tcx");
    let out = decompress(&input, false).unwrap();
    assert_eq!(&*out, input.as_slice());
}

#[test]
fn test_plain_bytes_flagged_compressed_fail() {
    let input = fixture("morning_ride.gpx");
    assert!(matches!(
        decompress(&input, true),
        Err(IoError::Decompress(_))
    ));
}

#[test]
fn test_corrupt_header_fails() {
    let mut packed = gzip(b"<gpx></gpx>");
    packed[0] = 0x00;
    assert!(matches!(
        decompress(&packed, true),
        Err(IoError::Decompress(_))
    ));
}
