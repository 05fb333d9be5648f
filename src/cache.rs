//! Content cache.
//!
//! This module contains the hash-of-URL addressed download cache. A cached
//! archive lives at `<baseDir>/zip/<hash(url)>/<filename>`; once the file is
//! present it is trusted as-is and never re-downloaded or re-validated.

use crate::colors::*;
use crate::error::InstallerError;
use crate::marker::Marker;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{Result as IoResult, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{instrument, trace};

// Subdirectory of the base directory holding downloaded archives.
#[doc(hidden)]
const ZIP_DIR: &str = "zip";

// Timeout for establishing the connection.
#[doc(hidden)]
const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

// Timeout for a single read from the connection.
#[doc(hidden)]
const READ_TIMEOUT: Duration = Duration::from_secs(10);

// Interval between two download progress reports.
#[doc(hidden)]
const PROGRESS_INTERVAL: Duration = Duration::from_secs(5);

/// Returns the filename part of the given URL (the substring after the last `/`).
pub(crate) fn filename_from_url(url: &str) -> Result<&str, InstallerError> {
    match url.rfind('/') {
        Some(idx) => Ok(&url[idx + 1..]),
        None => Err(InstallerError::MalformedUrl(url.to_string())),
    }
}

/// Returns the lower-hex digest of the given URL, used as cache subdirectory name.
pub(crate) fn url_hash(url: &str) -> String {
    let hash = Sha256::digest(url.as_bytes());

    base16ct::lower::encode_string(&hash)
}

/// Ensures the archive behind the given URL is present in the cache below
/// the given base directory and returns its path. Downloads at most once;
/// a present file short-circuits without any network transfer.
#[instrument(err(level = "trace"), level = "trace", skip(base_dir))]
pub(crate) fn ensure_downloaded(base_dir: &Path, url: &str) -> Result<PathBuf, InstallerError> {
    let cache_dir = base_dir.join(ZIP_DIR).join(url_hash(url));
    fs::create_dir_all(&cache_dir)?;

    let archive = Marker::new(cache_dir.join(filename_from_url(url)?));
    if archive.is_present() {
        let path = PATH_COLOR.paint(archive.path().to_string_lossy());
        println!("Skip download of Loom Library from {} as it already exists: {path}", INFO_COLOR.paint(url));
        return Ok(archive.into_path());
    }

    download(url, &cache_dir, archive.path())?;

    Ok(archive.into_path())
}

// Downloads the given URL into the given target file, streaming through a
// temporary file in the same directory so the final rename stays on one
// filesystem and therefore atomic.
#[doc(hidden)]
fn download(url: &str, cache_dir: &Path, target: &Path) -> Result<(), InstallerError> {
    println!("Downloading Loom Library from {} ...", INFO_COLOR.paint(url));

    let download_err = |reason: String| InstallerError::Download {
        url: url.to_string(),
        reason,
    };

    let client = reqwest::blocking::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .read_timeout(READ_TIMEOUT)
        .build()
        .map_err(|err| download_err(err.to_string()))?;
    let mut response = client.get(url).send().map_err(|err| download_err(err.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(download_err(format!("status {status}")));
    }

    let total_size = response.content_length();
    trace!(?total_size);

    let tmp = tempfile::NamedTempFile::new_in(cache_dir)?;
    {
        let mut progress = ProgressWrite::new(tmp.as_file(), total_size, PROGRESS_INTERVAL);
        response.copy_to(&mut progress).map_err(|err| download_err(err.to_string()))?;
        progress.finish()?;
    }

    // another run may have produced the target in the meantime
    if !target.exists() {
        tmp.persist(target).map_err(|err| InstallerError::Io(err.error))?;
    }

    Ok(())
}

/// [`Write`] wrapper that counts transferred bytes and prints a percentage
/// line at most once per interval. Without a known total size no percentage
/// can be computed and reporting is skipped.
struct ProgressWrite<W> {
    write: W,
    total_size: Option<u64>,
    interval: Duration,
    transferred: u64,
    last_report: Instant,
    reported: bool,
}

impl<W: Write> ProgressWrite<W> {
    /// Creates a new `ProgressWrite` on top of the given [Write].
    fn new(write: W, total_size: Option<u64>, interval: Duration) -> Self {
        Self {
            write,
            total_size,
            interval,
            transferred: 0,
            last_report: Instant::now(),
            reported: false,
        }
    }

    /// Flushes and prints the final progress line, if any interim line was shown.
    fn finish(mut self) -> IoResult<()> {
        self.flush()?;
        if self.reported {
            self.report();
        }

        Ok(())
    }

    // The transferred share as a percentage of the total size.
    fn pct(&self) -> Option<u64> {
        match self.total_size {
            Some(total_size) if total_size > 0 => Some(self.transferred * 100 / total_size),
            _ => None,
        }
    }

    // Prints the current percentage.
    fn report(&self) {
        if let Some(pct) = self.pct() {
            println!("Downloaded {pct} %");
        }
    }
}

impl<W: Write> Write for ProgressWrite<W> {
    fn write(&mut self, buf: &[u8]) -> IoResult<usize> {
        let n = self.write.write(buf)?;
        self.transferred += n as u64;

        if self.last_report.elapsed() >= self.interval {
            self.report();
            self.last_report = Instant::now();
            self.reported = true;
        }

        Ok(n)
    }

    fn flush(&mut self) -> IoResult<()> {
        self.write.flush()
    }
}
