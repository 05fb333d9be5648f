//! Environment provider.
//!
//! This module funnels every process-environment lookup (environment
//! variables, home directory, OS family) through a single trait, so the
//! base-directory resolution can be exercised without real OS state.

use std::fmt;
use std::path::PathBuf;

/// Trait for environment providers.
pub(crate) trait Environment: fmt::Debug {
    /// Returns the value of the environment variable with the given name.
    fn var(&self, name: &str) -> Option<String>;

    /// Returns the home directory of the current user.
    fn home_dir(&self) -> Option<PathBuf>;

    /// Whether the process runs on the Windows OS family.
    fn is_windows(&self) -> bool;
}

/// [`Environment`] implementation backed by the operating system.
#[derive(Debug)]
pub(crate) struct OsEnvironment;

impl Environment for OsEnvironment {
    #[tracing::instrument(level = "trace", ret)]
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        std::env::home_dir()
    }

    fn is_windows(&self) -> bool {
        cfg!(windows)
    }
}

/// [`Environment`] implementation with fixed values, for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FakeEnvironment {
    pub(crate) vars: std::collections::HashMap<String, String>,
    pub(crate) home: Option<PathBuf>,
    pub(crate) windows: bool,
}

#[cfg(test)]
impl Environment for FakeEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }

    fn is_windows(&self) -> bool {
        self.windows
    }
}
