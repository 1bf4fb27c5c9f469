//! Progress reporting utilities using indicatif.
//!
//! This module provides the [`Progress`] struct which implements
//! [`ProgressCallback`] to show a spinner with a running file count while a
//! scan is in progress. The spinner draws to stderr, so stdout stays clean
//! for the report.

use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress callback for a scan.
///
/// Implement this trait to receive progress updates from
/// [`crate::duplicates::DuplicateFinder`].
pub trait ProgressCallback: Send + Sync {
    /// Called once before the walk starts.
    fn on_scan_start(&self, root: &Path);

    /// Called for each file before it is fingerprinted.
    ///
    /// # Arguments
    ///
    /// * `current` - Number of files seen so far (1-based)
    /// * `path` - File about to be hashed
    fn on_file(&self, current: usize, path: &Path);

    /// Called after a file has been fingerprinted, with the bytes read.
    fn on_file_hashed(&self, _bytes: u64) {}

    /// Called once when the walk is exhausted.
    fn on_scan_end(&self, files: usize);
}

/// Spinner-based progress reporter.
pub struct Progress {
    bar: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, nothing is displayed.
    ///
    /// # Examples
    ///
    /// ```
    /// use dupfind::progress::Progress;
    ///
    /// let progress = Progress::new(true);
    /// ```
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            bar: Mutex::new(None),
            quiet,
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed_precise}] {pos} files")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
    }
}

impl ProgressCallback for Progress {
    fn on_scan_start(&self, root: &Path) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::style());
        pb.set_message(format!("Scanning {}", root.display()));
        pb.enable_steady_tick(Duration::from_millis(100));
        if let Ok(mut bar) = self.bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_file(&self, current: usize, path: &Path) {
        if self.quiet {
            return;
        }

        if let Ok(bar) = self.bar.lock() {
            if let Some(ref pb) = *bar {
                pb.set_position(current as u64);
                pb.set_message(truncate_path(path, 40));
            }
        }
    }

    fn on_scan_end(&self, files: usize) {
        if let Ok(mut bar) = self.bar.lock() {
            if let Some(pb) = bar.take() {
                pb.finish_and_clear();
                log::debug!("Progress finished after {} files", files);
            }
        }
    }
}

/// Truncate a path for display in the progress line.
fn truncate_path(path: &Path, max_chars: usize) -> String {
    let full = path.to_string_lossy();
    if full.chars().count() <= max_chars {
        return full.into_owned();
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name_chars = file_name.chars().count();

    if name_chars + 4 > max_chars {
        let tail: String = file_name
            .chars()
            .skip(name_chars.saturating_sub(max_chars.saturating_sub(3)))
            .collect();
        return format!("...{tail}");
    }

    format!(".../{file_name}")
}
