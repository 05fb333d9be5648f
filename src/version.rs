//! Version.
//!
//! This module contains the version information baked into the executable,
//! printed as part of the startup banner.

use std::fmt;

/// Structure to hold the version information.
#[derive(Debug)]
pub(crate) struct Version {
    /// The version of the package.
    pub(crate) pkg_version: String,
    /// The value that `git describe` returned.
    pub(crate) git_describe: String,
    /// The version of the rust compiler.
    pub(crate) rustc_semver: String,
}

impl Default for Version {
    fn default() -> Self {
        Self {
            pkg_version: env!("CARGO_PKG_VERSION").to_string(),
            git_describe: env!("VERGEN_GIT_DESCRIBE").to_string(),
            rustc_semver: env!("VERGEN_RUSTC_SEMVER").to_string(),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            pkg_version,
            git_describe,
            rustc_semver,
        } = self;
        write!(f, "{pkg_version} (git/{git_describe}) (rustc/{rustc_semver})")
    }
}
