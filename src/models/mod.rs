// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod track;

pub use activity::ActivityRecord;
pub use track::{Sample, Track};
