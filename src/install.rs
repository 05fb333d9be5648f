//! Installation.
//!
//! This module extracts a downloaded distribution archive into the library
//! directory. The first archive entry must be a directory; its name becomes
//! the installation directory, and a `loom.ok` sentinel inside it certifies
//! a completed extraction. Partially extracted trees are never rolled back;
//! the missing sentinel forces a clean retry on the next run.

use crate::colors::*;
use crate::error::InstallerError;
use crate::marker::Marker;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{instrument, trace};

/// Subdirectory of the base directory holding extracted installations.
pub(crate) const LIBRARY_DIR: &str = "library";

/// Name of the sentinel file certifying a completed extraction.
pub(crate) const OK_FILE: &str = "loom.ok";

/// Extracts the given archive into the given library directory and returns
/// the installation directory. Short-circuits without any write when the
/// sentinel is already present.
#[instrument(err(level = "trace"), level = "trace", skip(dst_dir))]
pub(crate) fn extract(archive: &Path, dst_dir: &Path) -> Result<PathBuf, InstallerError> {
    let file = File::open(archive).map_err(|err| extraction_err(archive, err))?;
    let mut zip = zip::ZipArchive::new(file).map_err(|err| extraction_err(archive, err))?;

    if zip.is_empty() {
        return Err(corrupt_err(archive, "<none>"));
    }

    let install_dir = {
        let first = zip.by_index(0).map_err(|err| extraction_err(archive, err))?;
        if !first.is_dir() {
            return Err(corrupt_err(archive, first.name()));
        }
        let Some(name) = first.enclosed_name() else {
            return Err(corrupt_err(archive, first.name()));
        };
        dst_dir.join(name)
    };

    let sentinel = Marker::new(install_dir.join(OK_FILE));
    if sentinel.is_present() {
        println!("Skip installation to {} as it exists already", PATH_COLOR.paint(install_dir.to_string_lossy()));
        return Ok(install_dir);
    }

    println!("Install Loom Library to {} ...", PATH_COLOR.paint(install_dir.to_string_lossy()));

    for i in 0..zip.len() {
        let mut entry = zip.by_index(i).map_err(|err| extraction_err(archive, err))?;

        // refuse names escaping the library directory
        let Some(name) = entry.enclosed_name() else {
            let err = io::Error::other(format!("dangerous entry name: {}", entry.name()));
            return Err(extraction_err(archive, err));
        };
        let dest = dst_dir.join(name);
        trace!(dest = %dest.display(), "unpacking");

        if entry.is_dir() {
            fs::create_dir_all(&dest).map_err(|err| extraction_err(archive, err))?;
        } else {
            if let Some(parent) = dest.parent()
                && !parent.exists()
            {
                fs::create_dir_all(parent).map_err(|err| extraction_err(archive, err))?;
            }
            let mut out = File::create(&dest).map_err(|err| extraction_err(archive, err))?;
            io::copy(&mut entry, &mut out).map_err(|err| extraction_err(archive, err))?;
        }
    }

    // writing the sentinel last is the idempotence invariant
    sentinel.set_present()?;

    Ok(install_dir)
}

// Creates a [`InstallerError::CorruptArchive`] for the given archive and entry name.
#[doc(hidden)]
fn corrupt_err(archive: &Path, entry: &str) -> InstallerError {
    InstallerError::CorruptArchive {
        archive: archive.to_path_buf(),
        entry: entry.to_string(),
    }
}

// Creates a [`InstallerError::Extraction`] for the given archive.
#[doc(hidden)]
fn extraction_err(archive: &Path, err: impl Into<io::Error>) -> InstallerError {
    InstallerError::Extraction {
        archive: archive.to_path_buf(),
        source: err.into(),
    }
}
