//! Configuration.
//!
//! This module contains the per-project configuration read from a
//! java-properties style file below the target directory.

use crate::error::InstallerError;
use std::fs;
use std::path::Path;
use tracing::{instrument, trace};

/// Name of the directory holding the configuration file.
pub(crate) const INSTALLER_DIR: &str = "loom-installer";

/// Name of the configuration file.
pub(crate) const INSTALLER_PROPERTIES: &str = "loom-installer.properties";

// Key of the distribution URL within the configuration file.
#[doc(hidden)]
const DISTRIBUTION_URL_KEY: &str = "distributionUrl";

/// Reads the distribution URL from `<targetDir>/loom-installer/loom-installer.properties`.
#[instrument(err(level = "trace"), level = "trace")]
pub(crate) fn read_distribution_url(target_dir: &Path) -> Result<String, InstallerError> {
    let properties_file = target_dir.join(INSTALLER_DIR).join(INSTALLER_PROPERTIES);

    if !properties_file.exists() {
        return Err(InstallerError::MissingConfig(properties_file));
    }

    let text = fs::read_to_string(&properties_file)?;
    let Some(url) = property(&text, DISTRIBUTION_URL_KEY) else {
        return Err(InstallerError::InvalidConfig(properties_file));
    };
    trace!(%url);

    Ok(url)
}

// Returns the value of the given key within the given properties text,
// or `None` if the key is absent or its value is empty.
#[doc(hidden)]
fn property(text: &str, key: &str) -> Option<String> {
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };
        if k.trim() != key {
            continue;
        }

        let v = v.trim();
        if v.is_empty() {
            return None;
        }

        return Some(v.to_string());
    }

    None
}

#[cfg(test)]
mod tests {

    use super::*;
    use tempfile::tempdir;
    use test_log::test;

    // Writes a configuration file with the given content below the given target directory.
    fn write_config(target_dir: &Path, content: &str) {
        let dir = target_dir.join(INSTALLER_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(INSTALLER_PROPERTIES), content).unwrap();
    }

    #[test]
    fn file_missing() {
        let tempdir = tempdir().unwrap();

        let err = read_distribution_url(tempdir.path()).unwrap_err();
        assert!(matches!(err, InstallerError::MissingConfig(_)));
    }

    #[test]
    fn key_missing() {
        let tempdir = tempdir().unwrap();
        write_config(tempdir.path(), "# no url in here\nother=value\n");

        let err = read_distribution_url(tempdir.path()).unwrap_err();
        assert!(matches!(err, InstallerError::InvalidConfig(_)));
    }

    #[test]
    fn value_empty() {
        let tempdir = tempdir().unwrap();
        write_config(tempdir.path(), "distributionUrl=\n");

        let err = read_distribution_url(tempdir.path()).unwrap_err();
        assert!(matches!(err, InstallerError::InvalidConfig(_)));
    }

    #[test]
    fn url_present() {
        let tempdir = tempdir().unwrap();
        write_config(tempdir.path(), "# Loom distribution\ndistributionUrl=https://example.test/dist-1.0.0.zip\n");

        let url = read_distribution_url(tempdir.path()).unwrap();
        assert_eq!(url, "https://example.test/dist-1.0.0.zip");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let tempdir = tempdir().unwrap();
        write_config(tempdir.path(), "distributionUrl = https://example.test/dist.zip \n");

        let url = read_distribution_url(tempdir.path()).unwrap();
        assert_eq!(url, "https://example.test/dist.zip");
    }
}
