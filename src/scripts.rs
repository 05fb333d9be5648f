//! Launcher scripts.
//!
//! This module copies the launcher scripts from the extracted installation
//! into the target project directory. The script contents are opaque payload
//! files; they are copied as-is, overwriting whatever is already there.

use crate::error::InstallerError;
use std::fs;
use std::path::Path;
use tracing::instrument;

// Subdirectory of the installation directory holding the launcher scripts.
#[doc(hidden)]
const SCRIPTS_DIR: &str = "scripts";

// Name of the Windows launcher script.
#[doc(hidden)]
const CMD_LAUNCHER: &str = "loom.cmd";

// Name of the Unix launcher script.
#[doc(hidden)]
const UNIX_LAUNCHER: &str = "loom";

/// Copies the launcher scripts from the given installation directory into
/// the given target directory and makes the Unix launcher executable.
#[instrument(err(level = "trace"), level = "trace")]
pub(crate) fn deploy(install_dir: &Path, target_dir: &Path) -> Result<(), InstallerError> {
    println!("Create Loom Launcher scripts");

    let scripts_root = install_dir.join(SCRIPTS_DIR);

    fs::copy(scripts_root.join(CMD_LAUNCHER), target_dir.join(CMD_LAUNCHER))?;

    let launcher = target_dir.join(UNIX_LAUNCHER);
    fs::copy(scripts_root.join(UNIX_LAUNCHER), &launcher)?;
    make_executable(&launcher)?;

    Ok(())
}

// Sets the permissions of the given file to `rwxr-xr-x`.
#[cfg(unix)]
#[doc(hidden)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
}

// Filesystems without a POSIX permission model have no notion of an
// executable bit; nothing to do.
#[cfg(not(unix))]
#[doc(hidden)]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {

    use super::*;
    use tempfile::tempdir;
    use test_log::test;

    // Creates an installation directory with both launcher scripts.
    fn fake_install_dir(root: &Path) -> std::path::PathBuf {
        let install_dir = root.join("dist-1.0.0");
        let scripts = install_dir.join(SCRIPTS_DIR);
        fs::create_dir_all(&scripts).unwrap();
        fs::write(scripts.join(UNIX_LAUNCHER), b"#!/bin/sh\n").unwrap();
        fs::write(scripts.join(CMD_LAUNCHER), b"@echo off\r\n").unwrap();

        install_dir
    }

    #[test]
    fn copies_both_launchers() {
        let tempdir = tempdir().unwrap();
        let install_dir = fake_install_dir(tempdir.path());
        let target_dir = tempdir.path().join("project");
        fs::create_dir_all(&target_dir).unwrap();

        deploy(&install_dir, &target_dir).unwrap();

        assert!(target_dir.join(UNIX_LAUNCHER).is_file());
        assert!(target_dir.join(CMD_LAUNCHER).is_file());
    }

    #[cfg(unix)]
    #[test]
    fn unix_launcher_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let tempdir = tempdir().unwrap();
        let install_dir = fake_install_dir(tempdir.path());
        let target_dir = tempdir.path().join("project");
        fs::create_dir_all(&target_dir).unwrap();

        deploy(&install_dir, &target_dir).unwrap();

        let mode = fs::metadata(target_dir.join(UNIX_LAUNCHER)).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn existing_scripts_are_overwritten() {
        let tempdir = tempdir().unwrap();
        let install_dir = fake_install_dir(tempdir.path());
        let target_dir = tempdir.path().join("project");
        fs::create_dir_all(&target_dir).unwrap();
        fs::write(target_dir.join(UNIX_LAUNCHER), b"stale").unwrap();

        deploy(&install_dir, &target_dir).unwrap();

        assert_eq!(fs::read(target_dir.join(UNIX_LAUNCHER)).unwrap(), b"#!/bin/sh\n");
    }

    #[test]
    fn missing_scripts_fail() {
        let tempdir = tempdir().unwrap();
        let install_dir = tempdir.path().join("dist-1.0.0");
        fs::create_dir_all(&install_dir).unwrap();
        let target_dir = tempdir.path().join("project");
        fs::create_dir_all(&target_dir).unwrap();

        let err = deploy(&install_dir, &target_dir).unwrap_err();
        assert!(matches!(err, InstallerError::Io(_)));
    }
}
