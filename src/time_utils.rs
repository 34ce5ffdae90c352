// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time parsing and formatting.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Date format used by the bulk export's activity index, e.g. `Jan 2, 2006, 3:04:05 PM`.
const INDEX_DATE_FORMAT: &str = "%b %d, %Y, %I:%M:%S %p";

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse an ISO-8601 timestamp from a GPX or TCX document.
///
/// Accepts RFC3339 with any offset. Timestamps without a zone are taken as UTC.
pub fn parse_xml_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Parse the start date column of the activity index (always UTC).
pub fn parse_index_date(text: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(text.trim(), INDEX_DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}
