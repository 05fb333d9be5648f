//! Base directory.
//!
//! This module resolves the per-user cache root holding both downloaded
//! archives and extracted installations.

use crate::envprov::Environment;
use crate::error::InstallerError;
use std::path::PathBuf;
use tracing::instrument;

/// Environment variable overriding the base directory.
pub(crate) const LOOM_USER_HOME: &str = "LOOM_USER_HOME";

// Environment variable pointing to the local application data on Windows.
#[doc(hidden)]
const LOCAL_APP_DATA: &str = "LOCALAPPDATA";

// Product directory below the local application data on Windows.
#[doc(hidden)]
const PRODUCT_DIR: &str = "Loom";

// Dotfile directory below the home directory on other OS families.
#[doc(hidden)]
const DOT_DIR: &str = ".loom";

/// Resolves the base directory for the given environment.
///
/// Priority: the `LOOM_USER_HOME` override, else `<LOCALAPPDATA>/Loom/Loom`
/// on the Windows family, else `~/.loom`. The surrounding context
/// (`LOCALAPPDATA`, home) must exist; the returned directory need not.
#[instrument(level = "trace", skip(env))]
pub(crate) fn resolve(env: &dyn Environment) -> Result<PathBuf, InstallerError> {
    if let Some(user_home) = env.var(LOOM_USER_HOME) {
        return Ok(PathBuf::from(user_home));
    }

    if env.is_windows() {
        windows_base_dir(env)
    } else {
        generic_base_dir(env)
    }
}

// Resolves the base directory below the local application data directory.
#[doc(hidden)]
fn windows_base_dir(env: &dyn Environment) -> Result<PathBuf, InstallerError> {
    let Some(local_app_data) = env.var(LOCAL_APP_DATA) else {
        return Err(InstallerError::Configuration(format!("Windows environment variable {LOCAL_APP_DATA} missing")));
    };

    let local_app_data_dir = PathBuf::from(local_app_data);
    if !local_app_data_dir.is_dir() {
        return Err(InstallerError::Configuration(format!(
            "Windows environment variable {LOCAL_APP_DATA} points to a non existing directory: {}",
            local_app_data_dir.display()
        )));
    }

    Ok(local_app_data_dir.join(PRODUCT_DIR).join(PRODUCT_DIR))
}

// Resolves the base directory below the home directory.
#[doc(hidden)]
fn generic_base_dir(env: &dyn Environment) -> Result<PathBuf, InstallerError> {
    let Some(user_home) = env.home_dir() else {
        return Err(InstallerError::Configuration("User home could not be determined".to_string()));
    };

    if !user_home.is_dir() {
        return Err(InstallerError::Configuration(format!("User home ({}) doesn't exist", user_home.display())));
    }

    Ok(user_home.join(DOT_DIR))
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::envprov::FakeEnvironment;
    use tempfile::tempdir;
    use test_log::test;

    #[test]
    fn override_wins() {
        let mut env = FakeEnvironment::default();
        env.vars.insert(LOOM_USER_HOME.to_string(), "/somewhere/else".to_string());
        env.windows = true;

        let basedir = resolve(&env).unwrap();
        assert_eq!(basedir, PathBuf::from("/somewhere/else"));
    }

    #[test]
    fn windows_without_local_app_data() {
        let mut env = FakeEnvironment::default();
        env.windows = true;

        let err = resolve(&env).unwrap_err();
        assert!(matches!(err, InstallerError::Configuration(_)));
    }

    #[test]
    fn windows_with_dangling_local_app_data() {
        let tempdir = tempdir().unwrap();
        let gone = tempdir.path().join("gone");

        let mut env = FakeEnvironment::default();
        env.vars.insert(LOCAL_APP_DATA.to_string(), gone.to_string_lossy().into_owned());
        env.windows = true;

        let err = resolve(&env).unwrap_err();
        assert!(matches!(err, InstallerError::Configuration(_)));
    }

    #[test]
    fn windows_with_local_app_data() {
        let tempdir = tempdir().unwrap();

        let mut env = FakeEnvironment::default();
        env.vars.insert(LOCAL_APP_DATA.to_string(), tempdir.path().to_string_lossy().into_owned());
        env.windows = true;

        let basedir = resolve(&env).unwrap();
        assert_eq!(basedir, tempdir.path().join("Loom").join("Loom"));
    }

    #[test]
    fn generic_below_home() {
        let tempdir = tempdir().unwrap();

        let mut env = FakeEnvironment::default();
        env.home = Some(tempdir.path().to_path_buf());

        let basedir = resolve(&env).unwrap();
        assert_eq!(basedir, tempdir.path().join(".loom"));
    }

    #[test]
    fn generic_without_home() {
        let env = FakeEnvironment::default();

        let err = resolve(&env).unwrap_err();
        assert!(matches!(err, InstallerError::Configuration(_)));
    }
}
