mod args;
mod basedir;
mod cache;
mod colors;
mod config;
mod envprov;
mod error;
mod install;
mod marker;
mod scripts;
mod version;

use crate::args::Args;
use crate::colors::*;
use crate::envprov::{Environment, OsEnvironment};
use crate::error::InstallerError;
use crate::version::Version;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};
use tracing::{level_filters::*, *};
use tracing_subscriber::EnvFilter;

// Exit code used in case there were no errors.
#[doc(hidden)]
const EXIT_OK: i32 = 0;

// Exit code used in case of errors.
#[doc(hidden)]
const EXIT_NOK: i32 = 1;

/// Main entry point for the application.
fn main() {
    // enable ansi support to use colorised/styled output
    #[cfg(windows)]
    let _ = nu_ansi_term::enable_ansi_support();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // help and version end up on stdout and are not failures
            let code = if err.use_stderr() { EXIT_NOK } else { EXIT_OK };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    // delegate
    if let Err(err) = internal_main(args) {
        let err_str = ATTENTION_COLOR.paint(format!("err = {err:?}"));
        eprintln!("Failed! {err_str}");
        std::process::exit(EXIT_NOK);
    }
    std::process::exit(EXIT_OK);
}

// Internal main entry point for the application.
#[doc(hidden)]
fn internal_main(args: Args) -> anyhow::Result<()> {
    // remember start date/time
    let start = Instant::now();

    // print some information
    if !args.quiet || args.version {
        println!("Starting Loom Installer v{}", INFO_COLOR.paint(Version::default().to_string()));
    }

    // stop here in case only the version was requested
    if args.version {
        return Ok(());
    }

    // init tracing
    init_tracing(&args);

    // print parsed arguments
    trace!("arguments: {args:#?}");

    let target_dir = determine_target_dir(args.target_dir.as_deref())?;
    debug!(target_dir = %target_dir.display());

    // run the whole pipeline; every failure in any stage is fatal
    let env = OsEnvironment;
    run(&target_dir, &env)?;

    // print some statistics
    if !args.quiet {
        println!("Total time: {}", format_elapsed(start.elapsed()));
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        println!("Finished at: {}", format_now(now));
    }

    Ok(())
}

// Validates the target directory argument.
#[doc(hidden)]
fn determine_target_dir(arg: Option<&Path>) -> Result<PathBuf, InstallerError> {
    let Some(target_dir) = arg else {
        return Err(InstallerError::Usage("Usage: loom-installer target_dir".to_string()));
    };

    if !target_dir.is_dir() {
        return Err(InstallerError::Usage(format!("Directory doesn't exist: {}", target_dir.display())));
    }

    Ok(target_dir.to_path_buf())
}

// Runs the installation pipeline: read the distribution URL, ensure the
// archive is cached, ensure it is extracted, deploy the launcher scripts.
fn run(target_dir: &Path, env: &dyn Environment) -> anyhow::Result<()> {
    let base_dir = basedir::resolve(env)?;
    debug!(base_dir = %base_dir.display());

    let url = config::read_distribution_url(target_dir)?;
    let archive = cache::ensure_downloaded(&base_dir, &url)?;

    let lib_dir = base_dir.join(install::LIBRARY_DIR);
    fs::create_dir_all(&lib_dir)?;
    let install_dir = install::extract(&archive, &lib_dir)?;

    scripts::deploy(&install_dir, target_dir)?;

    Ok(())
}

// TODO short doc
#[doc(hidden)]
fn format_elapsed(elapsed: Duration) -> String {
    // null out everything below seconds
    let elapsed = Duration::from_secs(elapsed.as_secs());

    // format the remaining duration
    humantime::format_duration(elapsed).to_string()
}

// TODO short doc
#[doc(hidden)]
fn format_now(now: OffsetDateTime) -> String {
    // define format
    const FORMAT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day] [hour]:[minute]:[second][offset_hour sign:mandatory][offset_minute]");

    // local offset or UTC
    let offset = UtcOffset::current_local_offset();
    let offset = offset.unwrap_or(UtcOffset::UTC);
    trace!(?offset);

    // format
    let now = now.to_offset(offset);
    now.format(&FORMAT).unwrap_or(now.to_string())
}

// Initialises the tracing framework based on given command line arguments.
#[doc(hidden)]
fn init_tracing(args: &Args) {
    let level_filter = match args.verbose {
        0 => LevelFilter::ERROR.into(),
        1 => LevelFilter::WARN.into(),
        2 => LevelFilter::INFO.into(),
        3 => LevelFilter::DEBUG.into(),
        _ => LevelFilter::TRACE.into(),
    };
    let env_filter = EnvFilter::from_default_env().add_directive(level_filter);
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}
