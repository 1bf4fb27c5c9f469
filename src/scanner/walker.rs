//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory
//! tree depth-first and yielding every regular file it contains. It uses
//! [`walkdir`] and runs on the calling thread.
//!
//! # Features
//!
//! - Descends into every subdirectory, no depth limit
//! - Optional symlink following (walkdir reports loops as errors)
//! - Optional hidden file filtering
//! - Optional name-sorted sibling order
//! - Unreadable directories are yielded as [`ScanError`] values
//!
//! # Example
//!
//! ```no_run
//! use dupfind::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let config = WalkerConfig {
//!     skip_hidden: true,
//!     ..Default::default()
//! };
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"), config);
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path.display(), file.size),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::{FileEntry, ScanError, WalkerConfig};

/// Depth-first directory walker.
///
/// The walker never hashes anything. It only yields the files a consumer
/// should fingerprint, which keeps traversal testable on its own.
#[derive(Debug, Clone)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// The path is not validated here; see
    /// [`crate::duplicates::DuplicateFinder::scan`] for the checked entry point.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dupfind::scanner::{Walker, WalkerConfig};
    /// use std::path::Path;
    ///
    /// let walker = Walker::new(Path::new("."), WalkerConfig::default());
    /// ```
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// Root directory of this walker.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the directory tree, yielding file entries.
    ///
    /// Returns a lazy iterator over [`FileEntry`] results in depth-first
    /// order. Errors are yielded as [`ScanError`] values rather than
    /// stopping iteration.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dupfind::scanner::{Walker, WalkerConfig};
    /// use std::path::Path;
    ///
    /// let walker = Walker::new(Path::new("."), WalkerConfig::default());
    /// let files: Vec<_> = walker.walk().filter_map(Result::ok).collect();
    /// println!("Found {} files", files.len());
    /// ```
    pub fn walk(&self) -> impl Iterator<Item = Result<FileEntry, ScanError>> + '_ {
        let mut walk_dir = WalkDir::new(&self.root).follow_links(self.config.follow_symlinks);
        if self.config.sort_entries {
            walk_dir = walk_dir.sort_by_file_name();
        }

        let skip_hidden = self.config.skip_hidden;
        walk_dir
            .into_iter()
            .filter_entry(move |entry| !(skip_hidden && entry.depth() > 0 && is_hidden(entry)))
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => self.process_entry(entry),
                Err(e) => Some(Err(self.handle_walk_error(e))),
            })
    }

    /// Turn a walkdir entry into a [`FileEntry`] if it is a regular file.
    fn process_entry(&self, entry: DirEntry) -> Option<Result<FileEntry, ScanError>> {
        let file_type = entry.file_type();

        if file_type.is_dir() {
            log::trace!("Entering directory: {}", entry.path().display());
            return None;
        }

        // Only reachable with follow_symlinks off; with it on walkdir
        // reports the target's type.
        if file_type.is_symlink() {
            log::trace!("Skipping symlink: {}", entry.path().display());
            return None;
        }

        if !file_type.is_file() {
            log::trace!("Skipping special file: {}", entry.path().display());
            return None;
        }

        let size = match entry.metadata() {
            Ok(metadata) => metadata.len(),
            Err(e) => return Some(Err(self.handle_walk_error(e))),
        };

        Some(Ok(FileEntry::new(entry.into_path(), size)))
    }

    /// Convert a walkdir error into a [`ScanError`].
    fn handle_walk_error(&self, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);

        if let Some(ancestor) = error.loop_ancestor() {
            let ancestor = ancestor.to_path_buf();
            log::warn!(
                "Symlink loop detected: {} -> {}",
                path.display(),
                ancestor.display()
            );
            return ScanError::Loop { path, ancestor };
        }

        let message = error.to_string();
        match error.into_io_error() {
            Some(io_error) => handle_io_error(path, io_error),
            None => {
                log::warn!("Walker error for {}: {}", path.display(), message);
                ScanError::Io {
                    path,
                    source: std::io::Error::other(message),
                }
            }
        }
    }
}

/// Map an I/O error to the matching [`ScanError`] variant.
fn handle_io_error(path: PathBuf, error: std::io::Error) -> ScanError {
    use std::io::ErrorKind;

    match error.kind() {
        ErrorKind::PermissionDenied => {
            log::warn!("Permission denied: {}", path.display());
            ScanError::PermissionDenied(path)
        }
        ErrorKind::NotFound => {
            log::debug!("Path not found (may have been deleted): {}", path.display());
            ScanError::NotFound(path)
        }
        _ => {
            log::warn!("I/O error for {}: {}", path.display(), error);
            ScanError::Io {
                path,
                source: error,
            }
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}
