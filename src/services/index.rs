// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reader for the export's `activities.csv` index.
//!
//! The export repeats some header names (two "Distance" and two "Elapsed
//! Time" columns), so columns are addressed by position.

use crate::models::ActivityRecord;
use crate::time_utils::parse_index_date;
use csv::StringRecord;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

mod column {
    pub const ACTIVITY_ID: usize = 0;
    pub const START_DATE: usize = 1;
    pub const TITLE: usize = 2;
    pub const TYPE: usize = 3;
    pub const DESCRIPTION: usize = 4;
    pub const FILENAME: usize = 10;
    pub const ELAPSED_TIME: usize = 13;
    pub const MOVING_TIME: usize = 14;
    pub const DISTANCE: usize = 15;
    pub const ELEVATION_GAIN: usize = 18;
    pub const ELEVATION_LOSS: usize = 19;
    pub const ELEVATION_MIN: usize = 20;
    pub const ELEVATION_MAX: usize = 21;
}

/// Fewest columns a row may have.
const MIN_COLUMNS: usize = column::ELEVATION_MAX + 1;

/// Errors from reading the activity index.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("Failed to read activity index: {0}")]
    Csv(#[from] csv::Error),

    #[error("Row {row}: expected at least {min} columns, found {found}", min = MIN_COLUMNS)]
    Row { row: usize, found: usize },
}

/// Read the index from a file.
pub fn read_index<P: AsRef<Path>>(path: P) -> Result<Vec<ActivityRecord>, IndexError> {
    let reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path.as_ref())?;
    collect_records(reader)
}

/// Read the index from any reader (header row included).
pub fn read_index_from<R: Read>(input: R) -> Result<Vec<ActivityRecord>, IndexError> {
    let reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    collect_records(reader)
}

fn collect_records<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<ActivityRecord>, IndexError> {
    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        // Row numbers are 1-based and count the header.
        records.push(parse_row(&row, index + 2)?);
    }
    tracing::debug!(count = records.len(), "Read activity index");
    Ok(records)
}

fn parse_row(row: &StringRecord, row_number: usize) -> Result<ActivityRecord, IndexError> {
    if row.len() < MIN_COLUMNS {
        return Err(IndexError::Row {
            row: row_number,
            found: row.len(),
        });
    }

    let text = |i: usize| row.get(i).unwrap_or("").to_string();

    Ok(ActivityRecord {
        activity_id: number(row, column::ACTIVITY_ID),
        start_date: row.get(column::START_DATE).and_then(parse_index_date),
        title: text(column::TITLE),
        activity_type: text(column::TYPE),
        description: text(column::DESCRIPTION),
        filename: text(column::FILENAME).trim().to_string(),
        distance: number(row, column::DISTANCE),
        elapsed_time: number(row, column::ELAPSED_TIME),
        moving_time: number(row, column::MOVING_TIME),
        elevation_gain: number(row, column::ELEVATION_GAIN),
        elevation_loss: number(row, column::ELEVATION_LOSS),
        elevation_min: number(row, column::ELEVATION_MIN),
        elevation_max: number(row, column::ELEVATION_MAX),
    })
}

/// Parse a numeric cell, ignoring thousands separators. Blank or bad cells are `None`.
fn number<T: FromStr>(row: &StringRecord, index: usize) -> Option<T> {
    let cell = row.get(index)?.trim().replace(',', "");
    if cell.is_empty() {
        return None;
    }
    cell.parse().ok()
}
