// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route file lookup in the unpacked export.

use crate::error::IoError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Anything that can hand out route file bytes by filename.
pub trait RouteSource: Send + Sync {
    fn read(&self, filename: &str) -> Result<Vec<u8>, IoError>;
}

/// Route files under an archive root directory.
#[derive(Debug, Clone)]
pub struct ArchiveStore {
    root: PathBuf,
}

impl ArchiveStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of a route file.
    pub fn resolve(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }
}

impl RouteSource for ArchiveStore {
    fn read(&self, filename: &str) -> Result<Vec<u8>, IoError> {
        let path = self.resolve(filename);
        fs::read(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => IoError::NotFound { path },
            _ => IoError::Read { path, source },
        })
    }
}
