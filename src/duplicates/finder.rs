//! Duplicate finder: walks a tree, fingerprints each file, groups the results.
//!
//! # Overview
//!
//! [`DuplicateFinder`] is the consumer stage of the pipeline:
//! 1. **Validate** the root synchronously ([`FinderError::InvalidArgument`])
//! 2. **Walk** the tree with [`Walker`], one regular file at a time
//! 3. **Fingerprint** each file with the streaming [`Hasher`]
//! 4. **Index** the fingerprint in a [`FingerprintIndex`]
//! 5. **Filter** the index into a [`DuplicateReport`]
//!
//! Files that cannot be read are recorded as [`FileError`]s next to the
//! report instead of vanishing. They never receive a fingerprint, so two
//! unreadable files are never reported as duplicates of each other. With
//! [`FinderConfig::strict`] set, the first such failure aborts the scan.
//!
//! # Example
//!
//! ```no_run
//! use dupfind::duplicates::DuplicateFinder;
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let report = finder.scan(Path::new(".")).unwrap();
//!
//! for group in &report.duplicates {
//!     println!("{}: {} copies", group.fingerprint, group.len());
//! }
//! for error in &report.errors {
//!     eprintln!("skipped: {}", error);
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;

use super::groups::DuplicateReport;
use super::index::FingerprintIndex;
use crate::progress::ProgressCallback;
use crate::scanner::{
    Fingerprint, HashAlgorithm, HashError, Hasher, ScanError, Walker, WalkerConfig,
    DEFAULT_BUFFER_SIZE,
};

/// Configuration for a scan.
#[derive(Clone)]
pub struct FinderConfig {
    /// Directory walking options.
    pub walker_config: WalkerConfig,
    /// Digest used for fingerprints.
    pub algorithm: HashAlgorithm,
    /// Read chunk size in bytes.
    pub buffer_size: usize,
    /// Abort on the first file that cannot be walked or read.
    pub strict: bool,
    /// Optional progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("walker_config", &self.walker_config)
            .field("algorithm", &self.algorithm)
            .field("buffer_size", &self.buffer_size)
            .field("strict", &self.strict)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            walker_config: WalkerConfig::default(),
            algorithm: HashAlgorithm::default(),
            buffer_size: DEFAULT_BUFFER_SIZE,
            strict: false,
            progress_callback: None,
        }
    }
}

impl FinderConfig {
    /// Set the walker configuration.
    #[must_use]
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Set the hash algorithm.
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the read chunk size.
    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }

    /// Enable or disable strict mode.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }
}

/// What went wrong with a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileErrorKind {
    /// Vanished between listing and reading
    NotFound,
    /// Exists but could not be opened
    PermissionDenied,
    /// Symlink loop while following links
    Loop,
    /// Any other I/O failure, including mid-read errors
    Io,
}

/// A file or directory the scan had to skip.
#[derive(thiserror::Error, Debug, Clone, Serialize)]
#[error("{message}")]
pub struct FileError {
    /// Path that could not be processed
    pub path: PathBuf,
    /// Failure category
    pub kind: FileErrorKind,
    /// Human-readable description
    pub message: String,
}

impl From<ScanError> for FileError {
    fn from(err: ScanError) -> Self {
        let kind = match &err {
            ScanError::PermissionDenied(_) => FileErrorKind::PermissionDenied,
            ScanError::NotFound(_) => FileErrorKind::NotFound,
            ScanError::Loop { .. } => FileErrorKind::Loop,
            ScanError::Io { .. } => FileErrorKind::Io,
        };
        Self {
            path: err.path().to_path_buf(),
            kind,
            message: err.to_string(),
        }
    }
}

impl From<HashError> for FileError {
    fn from(err: HashError) -> Self {
        let kind = match &err {
            HashError::NotFound(_) => FileErrorKind::NotFound,
            HashError::PermissionDenied(_) => FileErrorKind::PermissionDenied,
            HashError::Io { .. } => FileErrorKind::Io,
        };
        Self {
            path: err.path().to_path_buf(),
            kind,
            message: err.to_string(),
        }
    }
}

/// Errors that end a scan.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The root does not exist or is not a directory.
    #[error("{0} is not a directory")]
    InvalidArgument(PathBuf),

    /// A file failed while running in strict mode.
    #[error("Scan aborted: {0}")]
    File(#[from] FileError),
}

/// Statistics for a completed scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Digest used
    pub algorithm: HashAlgorithm,
    /// Regular files yielded by the walker
    pub files_found: usize,
    /// Files successfully fingerprinted
    pub files_hashed: usize,
    /// Bytes read while fingerprinting
    pub bytes_hashed: u64,
    /// Files and directories skipped because of errors
    pub failed: usize,
    /// Distinct fingerprints seen
    pub unique_fingerprints: usize,
    /// Groups with two or more files
    pub duplicate_groups: usize,
    /// Redundant copies (group sizes minus one, summed)
    pub duplicate_files: usize,
    /// Bytes that removing the redundant copies would free
    pub reclaimable_space: u64,
    /// Wall-clock time of the scan
    pub scan_duration: Duration,
}

/// Result of [`DuplicateFinder::scan`].
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Duplicate groups
    pub duplicates: DuplicateReport,
    /// Files and directories that were skipped
    pub errors: Vec<FileError>,
    /// Scan statistics
    pub summary: ScanSummary,
}

impl ScanReport {
    /// True when every file under the root was fingerprinted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Unfiltered result of [`DuplicateFinder::index`].
#[derive(Debug, Clone, Default)]
pub struct IndexedScan {
    /// Every fingerprinted file, duplicates or not
    pub index: FingerprintIndex,
    /// Files and directories that were skipped
    pub errors: Vec<FileError>,
    /// Scan statistics
    pub summary: ScanSummary,
}

/// Mutable state of a scan in progress.
#[derive(Default)]
struct ScanState {
    index: FingerprintIndex,
    /// Bytes hashed for the first file seen per fingerprint
    sizes: HashMap<Fingerprint, u64>,
    errors: Vec<FileError>,
    summary: ScanSummary,
}

/// Runs scans with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct DuplicateFinder {
    config: FinderConfig,
}

impl DuplicateFinder {
    /// Create a finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        Self { config }
    }

    /// Create a finder with default settings (MD5, no symlinks, lenient).
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// The finder's configuration.
    #[must_use]
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Scan `root` and return only the duplicate groups, with skipped files
    /// and statistics.
    ///
    /// # Errors
    ///
    /// - [`FinderError::InvalidArgument`] if `root` is missing or not a directory
    /// - [`FinderError::File`] for the first failure in strict mode
    pub fn scan(&self, root: &Path) -> Result<ScanReport, FinderError> {
        let IndexedScan {
            index,
            errors,
            summary,
        } = self.index(root)?;

        Ok(ScanReport {
            duplicates: index.into_duplicates(),
            errors,
            summary,
        })
    }

    /// Scan `root` and return the full fingerprint index, unique files
    /// included.
    ///
    /// # Errors
    ///
    /// Same as [`DuplicateFinder::scan`].
    pub fn index(&self, root: &Path) -> Result<IndexedScan, FinderError> {
        validate_root(root)?;

        let start_time = Instant::now();
        log::info!(
            "Scanning {} ({} fingerprints)",
            root.display(),
            self.config.algorithm
        );

        let callback = self.config.progress_callback.as_deref();
        if let Some(callback) = callback {
            callback.on_scan_start(root);
        }

        let mut state = ScanState {
            summary: ScanSummary {
                algorithm: self.config.algorithm,
                ..Default::default()
            },
            ..Default::default()
        };
        let outcome = self.walk_and_hash(root, &mut state);

        if let Some(callback) = callback {
            callback.on_scan_end(state.summary.files_found);
        }
        outcome?;

        let ScanState {
            index,
            sizes,
            errors,
            mut summary,
        } = state;

        summary.failed = errors.len();
        summary.unique_fingerprints = index.len();
        for (fingerprint, files) in index.iter().filter(|(_, files)| files.len() > 1) {
            let copies = files.len() - 1;
            summary.duplicate_groups += 1;
            summary.duplicate_files += copies;
            let size = sizes.get(fingerprint).copied().unwrap_or(0);
            summary.reclaimable_space += size * copies as u64;
        }
        summary.scan_duration = start_time.elapsed();

        log::info!(
            "Scan complete: {} files, {} duplicate groups, {} skipped in {:.2?}",
            summary.files_hashed,
            summary.duplicate_groups,
            summary.failed,
            summary.scan_duration
        );

        Ok(IndexedScan {
            index,
            errors,
            summary,
        })
    }

    /// Walk `root`, fingerprinting and indexing every file found.
    fn walk_and_hash(&self, root: &Path, state: &mut ScanState) -> Result<(), FinderError> {
        let walker = Walker::new(root, self.config.walker_config.clone());
        let hasher = Hasher::new(self.config.algorithm).with_buffer_size(self.config.buffer_size);
        let callback = self.config.progress_callback.as_deref();

        for result in walker.walk() {
            let file = match result {
                Ok(file) => file,
                Err(e) => {
                    self.record_failure(FileError::from(e), &mut state.errors)?;
                    continue;
                }
            };

            state.summary.files_found += 1;
            if let Some(callback) = callback {
                callback.on_file(state.summary.files_found, &file.path);
            }

            match hasher.fingerprint_counted(&file.path) {
                Ok((fingerprint, bytes)) => {
                    if bytes != file.size {
                        log::debug!(
                            "{} changed size during scan ({} -> {} bytes)",
                            file.path.display(),
                            file.size,
                            bytes
                        );
                    }
                    state.summary.files_hashed += 1;
                    state.summary.bytes_hashed += bytes;
                    if let Some(callback) = callback {
                        callback.on_file_hashed(bytes);
                    }
                    state.sizes.entry(fingerprint.clone()).or_insert(bytes);
                    state.index.insert(fingerprint, file.path);
                }
                Err(e) => {
                    log::warn!("Skipping {}: {}", file.path.display(), e);
                    self.record_failure(FileError::from(e), &mut state.errors)?;
                }
            }
        }

        Ok(())
    }

    /// Keep a per-file failure, or turn it into a scan failure in strict mode.
    fn record_failure(
        &self,
        error: FileError,
        errors: &mut Vec<FileError>,
    ) -> Result<(), FinderError> {
        if self.config.strict {
            log::error!("Strict mode: aborting on {}", error.path.display());
            return Err(FinderError::File(error));
        }
        errors.push(error);
        Ok(())
    }
}

/// Check that `root` exists and is a directory.
///
/// # Errors
///
/// Returns [`FinderError::InvalidArgument`] otherwise.
pub fn validate_root(root: &Path) -> Result<(), FinderError> {
    match std::fs::metadata(root) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        _ => Err(FinderError::InvalidArgument(root.to_path_buf())),
    }
}
