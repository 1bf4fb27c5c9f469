//! JSON output formatter for scan results.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "duplicates": [
//!     {
//!       "fingerprint": "5d41402abc4b2a76b9719d911017c592",
//!       "algorithm": "md5",
//!       "files": ["/path/to/a.txt", "/path/to/b/b.txt"]
//!     }
//!   ],
//!   "errors": [
//!     { "path": "/path/to/locked", "kind": "permission_denied", "message": "..." }
//!   ],
//!   "summary": {
//!     "algorithm": "md5",
//!     "files_found": 4,
//!     "files_hashed": 3,
//!     "bytes_hashed": 15,
//!     "failed": 1,
//!     "unique_fingerprints": 2,
//!     "duplicate_groups": 1,
//!     "duplicate_files": 1,
//!     "reclaimable_space": 5,
//!     "scan_duration_ms": 3,
//!     "exit_code": 3,
//!     "exit_code_name": "DF003"
//!   }
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use crate::duplicates::{DuplicateGroup, FileError, ScanReport, ScanSummary};
use crate::error::ExitCode;
use crate::scanner::HashAlgorithm;

/// A single duplicate group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateGroup {
    /// Content fingerprint (lowercase hex)
    pub fingerprint: String,
    /// Digest that produced the fingerprint
    pub algorithm: HashAlgorithm,
    /// Paths of every file in the group
    pub files: Vec<String>,
}

impl JsonDuplicateGroup {
    /// Create a JSON duplicate group from a DuplicateGroup.
    #[must_use]
    pub fn from_duplicate_group(group: &DuplicateGroup, algorithm: HashAlgorithm) -> Self {
        Self {
            fingerprint: group.fingerprint.to_string(),
            algorithm,
            files: group
                .files
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
        }
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Digest used
    pub algorithm: HashAlgorithm,
    /// Regular files found
    pub files_found: usize,
    /// Files successfully fingerprinted
    pub files_hashed: usize,
    /// Bytes actually read while fingerprinting
    pub bytes_hashed: u64,
    /// Files and directories skipped because of errors
    pub failed: usize,
    /// Distinct fingerprints seen
    pub unique_fingerprints: usize,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Total number of redundant copies
    pub duplicate_files: usize,
    /// Space that removing redundant copies would free (bytes)
    pub reclaimable_space: u64,
    /// Duration of the scan in milliseconds
    pub scan_duration_ms: u64,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "DF000")
    pub exit_code_name: String,
}

impl JsonSummary {
    /// Create a JSON summary from a ScanSummary and an exit code.
    #[must_use]
    pub fn from_scan_summary(summary: &ScanSummary, exit_code: ExitCode) -> Self {
        Self {
            algorithm: summary.algorithm,
            files_found: summary.files_found,
            files_hashed: summary.files_hashed,
            bytes_hashed: summary.bytes_hashed,
            failed: summary.failed,
            unique_fingerprints: summary.unique_fingerprints,
            duplicate_groups: summary.duplicate_groups,
            duplicate_files: summary.duplicate_files,
            reclaimable_space: summary.reclaimable_space,
            scan_duration_ms: summary.scan_duration.as_millis() as u64,
            exit_code: exit_code.as_i32(),
            exit_code_name: exit_code.code_prefix().to_string(),
        }
    }
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// List of duplicate groups
    pub duplicates: Vec<JsonDuplicateGroup>,
    /// Files and directories that were skipped
    pub errors: Vec<FileError>,
    /// Scan summary statistics
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Create a new JSON output from a scan report and exit code.
    ///
    /// # Example
    ///
    /// ```
    /// use dupfind::duplicates::ScanReport;
    /// use dupfind::error::ExitCode;
    /// use dupfind::output::json::JsonOutput;
    ///
    /// let output = JsonOutput::new(&ScanReport::default(), ExitCode::NoDuplicates);
    /// assert!(output.duplicates.is_empty());
    /// assert_eq!(output.summary.exit_code, 2);
    /// ```
    #[must_use]
    pub fn new(report: &ScanReport, exit_code: ExitCode) -> Self {
        let algorithm = report.summary.algorithm;
        Self {
            duplicates: report
                .duplicates
                .iter()
                .map(|g| JsonDuplicateGroup::from_duplicate_group(g, algorithm))
                .collect(),
            errors: report.errors.clone(),
            summary: JsonSummary::from_scan_summary(&report.summary, exit_code),
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON to a writer.
    ///
    /// # Arguments
    ///
    /// * `writer` - The writer to output to (e.g., stdout)
    /// * `pretty` - Whether to pretty-print the output
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
