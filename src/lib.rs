//! dupfind - Duplicate File Finder
//!
//! Walks a directory tree, fingerprints every regular file by content and
//! reports the groups of files that share a fingerprint.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! let duplicates = dupfind::scan(Path::new("/data")).unwrap();
//! for group in &duplicates {
//!     println!("{}", group.fingerprint);
//!     for path in &group.files {
//!         println!("  {}", path.display());
//!     }
//! }
//! ```

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use cli::{Cli, OutputFormat};
use config::Config;
use duplicates::{DuplicateFinder, DuplicateReport, FinderConfig, FinderError};
use error::ExitCode;
use output::{JsonOutput, TextOutput};
use progress::Progress;

/// Find duplicate files under `root` with the default settings.
///
/// Files that cannot be read are skipped and never grouped. Use
/// [`DuplicateFinder`] to see which files were skipped or to change the
/// algorithm and error policy.
///
/// # Errors
///
/// Returns [`FinderError::InvalidArgument`] if `root` is not a directory.
pub fn scan(root: &Path) -> Result<DuplicateReport, FinderError> {
    DuplicateFinder::new(FinderConfig::default())
        .scan(root)
        .map(|report| report.duplicates)
}

/// Run the command-line application, writing the report to stdout.
///
/// # Errors
///
/// Returns an error for an invalid root, a bad configuration, a strict-mode
/// abort or a failure to write the report.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_app_with_output(cli, &mut out)
}

/// Run the command-line application, writing the report to `out`.
///
/// # Errors
///
/// See [`run_app`].
pub fn run_app_with_output<W: Write>(cli: Cli, out: &mut W) -> anyhow::Result<ExitCode> {
    let json_output = cli.output == OutputFormat::Json;
    logging::init_logging(cli.verbose, cli.quiet, json_output);

    let Some(root) = cli.path.clone() else {
        writeln!(out, "{}", cli::USAGE)?;
        return Ok(ExitCode::Success);
    };

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_cli(&cli)?;
    log::debug!("Effective configuration: {:?}", config);

    let progress = Arc::new(Progress::new(cli.quiet || json_output));
    let finder = DuplicateFinder::new(config.finder_config().with_progress_callback(progress));
    let report = finder.scan(&root)?;

    let exit_code = ExitCode::for_report(&report);
    match cli.output {
        OutputFormat::Text => TextOutput::new(&report)
            .write_to(out)
            .context("Failed to write report")?,
        OutputFormat::Json => JsonOutput::new(&report, exit_code)
            .write_to(out, true)
            .context("Failed to write report")?,
    }
    out.flush()?;

    Ok(exit_code)
}
