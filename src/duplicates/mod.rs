//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Indexing files by content fingerprint
//! - Filtering the index down to duplicate groups
//! - Running a whole scan with per-file error collection

pub mod finder;
pub mod groups;
pub mod index;

pub use finder::{
    validate_root, DuplicateFinder, FileError, FileErrorKind, FinderConfig, FinderError,
    IndexedScan, ScanReport, ScanSummary,
};
pub use groups::{DuplicateGroup, DuplicateReport};
pub use index::FingerprintIndex;
