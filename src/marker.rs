//! Marker.
//!
//! This module contains the marker lifecycle used for idempotence: a marker
//! is absent until the work it certifies has fully completed and present
//! afterwards, so its presence always implies a complete, valid resource.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// A filesystem marker with a two-state `Absent -> Present` lifecycle.
#[derive(Debug)]
pub(crate) struct Marker {
    path: PathBuf,
}

impl Marker {
    /// Creates a new `Marker` at the given path.
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the marker.
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Consumes the `Marker` and returns its path.
    pub(crate) fn into_path(self) -> PathBuf {
        self.path
    }

    /// Whether the marker is present.
    pub(crate) fn is_present(&self) -> bool {
        self.path.exists()
    }

    /// Transitions the marker to present. Must only be called after the
    /// certified work has fully completed.
    pub(crate) fn set_present(&self) -> io::Result<()> {
        File::create(&self.path)?;

        Ok(())
    }
}
