//! Arguments.
//!
//! This module contains the definition for the available command-line parameter.

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(author)]
pub(crate) struct Args {
    /// The project directory to install the Loom launcher scripts into
    #[clap(value_name = "target_dir")]
    pub(crate) target_dir: Option<PathBuf>,
    /// Suppress unnecessary information
    #[clap(short = 'q', long, action)]
    pub(crate) quiet: bool,
    /// Change level of verbosity (apply multiple times to increase level)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub(crate) verbose: u8,
    /// Print version information
    #[clap(short = 'V', long, action)]
    pub(crate) version: bool,
}
