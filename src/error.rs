//! Errors.
//!
//! This module contains the error taxonomy of the installer. No error is
//! recovered or retried anywhere in the pipeline; every one propagates to
//! the entry point, which prints it and terminates with a non-zero status.

use std::path::PathBuf;

/// The error type for everything that can go wrong while installing.
#[derive(Debug, thiserror::Error)]
pub(crate) enum InstallerError {
    /// The command line was unusable.
    #[error("{0}")]
    Usage(String),
    /// The per-user base directory could not be resolved.
    #[error("{0}")]
    Configuration(String),
    /// The per-project configuration file is absent.
    #[error("Missing configuration of Loom Installer: {}", .0.display())]
    MissingConfig(PathBuf),
    /// The per-project configuration file has no usable `distributionUrl`.
    #[error("No distributionUrl defined in {}", .0.display())]
    InvalidConfig(PathBuf),
    /// The distribution URL has no filename component.
    #[error("Can't parse url: {0}")]
    MalformedUrl(String),
    /// The download failed, either on transport level or with a non-success status.
    #[error("Downloading {url} failed: {reason}")]
    Download { url: String, reason: String },
    /// The distribution archive does not start with a directory entry.
    #[error("First entry in {} is not a directory: {entry}", .archive.display())]
    CorruptArchive { archive: PathBuf, entry: String },
    /// Extraction of the distribution archive failed midway.
    #[error("Failed to extract {}", .archive.display())]
    Extraction {
        archive: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Any other I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
