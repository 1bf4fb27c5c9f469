//! Fingerprint index: fingerprint → files, in traversal order.
//!
//! The index is filled one file at a time while a scan runs and never
//! loses entries. A fingerprint with one file is currently unique; two or
//! more make a duplicate group. [`FingerprintIndex::duplicates`] derives the
//! [`DuplicateReport`] without touching the index, so it can also be called
//! mid-scan for a partial view.

use std::collections::HashMap;
use std::path::PathBuf;

use super::groups::{DuplicateGroup, DuplicateReport};
use crate::scanner::Fingerprint;

/// Mapping from fingerprint to the files that produced it.
#[derive(Debug, Clone, Default)]
pub struct FingerprintIndex {
    /// Position of each fingerprint in `entries`
    positions: HashMap<Fingerprint, usize>,
    /// Fingerprints in first-seen order with their files
    entries: Vec<(Fingerprint, Vec<PathBuf>)>,
    /// Total number of inserted files
    file_count: usize,
}

impl FingerprintIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `path` to the files for `fingerprint`.
    pub fn insert(&mut self, fingerprint: Fingerprint, path: PathBuf) {
        self.file_count += 1;
        match self.positions.get(&fingerprint) {
            Some(&pos) => self.entries[pos].1.push(path),
            None => {
                self.positions.insert(fingerprint.clone(), self.entries.len());
                self.entries.push((fingerprint, vec![path]));
            }
        }
    }

    /// Number of distinct fingerprints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of inserted files.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.file_count
    }

    /// Files recorded for a fingerprint.
    #[must_use]
    pub fn get(&self, fingerprint: &Fingerprint) -> Option<&[PathBuf]> {
        self.positions
            .get(fingerprint)
            .map(|&pos| self.entries[pos].1.as_slice())
    }

    /// Iterate over every fingerprint and its files, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&Fingerprint, &[PathBuf])> + '_ {
        self.entries
            .iter()
            .map(|(fingerprint, files)| (fingerprint, files.as_slice()))
    }

    /// Build the report of fingerprints shared by two or more files.
    #[must_use]
    pub fn duplicates(&self) -> DuplicateReport {
        DuplicateReport::new(
            self.entries
                .iter()
                .filter(|(_, files)| files.len() > 1)
                .map(|(fingerprint, files)| DuplicateGroup::new(fingerprint.clone(), files.clone()))
                .collect(),
        )
    }

    /// Like [`FingerprintIndex::duplicates`], consuming the index to avoid copies.
    #[must_use]
    pub fn into_duplicates(self) -> DuplicateReport {
        DuplicateReport::new(
            self.entries
                .into_iter()
                .filter(|(_, files)| files.len() > 1)
                .map(|(fingerprint, files)| DuplicateGroup::new(fingerprint, files))
                .collect(),
        )
    }
}

impl Extend<(Fingerprint, PathBuf)> for FingerprintIndex {
    fn extend<T: IntoIterator<Item = (Fingerprint, PathBuf)>>(&mut self, iter: T) {
        for (fingerprint, path) in iter {
            self.insert(fingerprint, path);
        }
    }
}

impl FromIterator<(Fingerprint, PathBuf)> for FingerprintIndex {
    fn from_iter<T: IntoIterator<Item = (Fingerprint, PathBuf)>>(iter: T) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}
