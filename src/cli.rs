//! Command-line interface definitions for dupfind.
//!
//! This module defines all CLI arguments and options using the clap derive API.
//! Every option except the path can also come from the config file or from
//! `DUPFIND_*` environment variables; flags given here win.
//!
//! # Example
//!
//! ```bash
//! # List duplicate files under ~/Downloads
//! dupfind ~/Downloads
//!
//! # Use BLAKE3 and emit JSON for scripting
//! dupfind --algorithm blake3 --output json ~/Downloads
//!
//! # Abort on the first unreadable file
//! dupfind --strict ~/Downloads
//!
//! # Verbose mode for debugging
//! dupfind -v ~/Downloads
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::scanner::HashAlgorithm;

/// Usage line printed when no directory is given.
pub const USAGE: &str = "Usage: dupfind [OPTIONS] <DIRECTORY>";

/// Find files with identical content under a directory.
///
/// dupfind walks the directory tree, fingerprints every regular file with a
/// content hash and lists the groups of files that share a fingerprint.
#[derive(Debug, Parser)]
#[command(name = "dupfind")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan for duplicates
    #[arg(value_name = "DIRECTORY")]
    pub path: Option<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors and the report
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Hash algorithm used for fingerprints (md5, sha256, blake3)
    #[arg(long, value_name = "ALGORITHM", value_parser = parse_algorithm)]
    pub algorithm: Option<HashAlgorithm>,

    /// Read buffer size in bytes
    #[arg(long, value_name = "BYTES")]
    pub buffer_size: Option<usize>,

    /// Output format (text for people, json for scripting)
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Abort on the first file that cannot be read
    #[arg(long)]
    pub strict: bool,

    /// Follow symbolic links during scan
    ///
    /// Symlink loops are detected and reported as skipped entries.
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Skip hidden files and directories (starting with .)
    #[arg(long)]
    pub skip_hidden: bool,

    /// Visit directory entries in file-name order
    #[arg(long)]
    pub sort: bool,

    /// Path to a TOML config file
    ///
    /// If not specified, a default platform-specific path is used when it exists.
    #[arg(long, value_name = "FILE", env = "DUPFIND_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print fatal errors as a JSON object on stderr
    #[arg(long)]
    pub json_errors: bool,
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text listing
    Text,
    /// JSON output for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Parse a hash algorithm name.
///
/// # Examples
///
/// ```
/// use dupfind::cli::parse_algorithm;
/// use dupfind::scanner::HashAlgorithm;
///
/// assert_eq!(parse_algorithm("sha256").unwrap(), HashAlgorithm::Sha256);
/// assert!(parse_algorithm("crc32").is_err());
/// ```
///
/// # Errors
///
/// Returns an error naming the supported algorithms for anything else.
pub fn parse_algorithm(s: &str) -> Result<HashAlgorithm, String> {
    s.parse::<HashAlgorithm>().map_err(|e| e.to_string())
}
