//! Duplicate groups and the filtered duplicate report.
//!
//! # Overview
//!
//! A [`DuplicateGroup`] is a fingerprint plus the two or more files that
//! share it. A [`DuplicateReport`] is the ordered collection of all such
//! groups produced at the end of a scan by
//! [`FingerprintIndex::duplicates`](super::FingerprintIndex::duplicates).
//!
//! # Example
//!
//! ```
//! use dupfind::duplicates::FingerprintIndex;
//! use dupfind::scanner::Fingerprint;
//! use std::path::PathBuf;
//!
//! let mut index = FingerprintIndex::new();
//! index.insert(Fingerprint::from_digest(&[1]), PathBuf::from("/a.txt"));
//! index.insert(Fingerprint::from_digest(&[1]), PathBuf::from("/b.txt"));
//! index.insert(Fingerprint::from_digest(&[2]), PathBuf::from("/c.txt"));
//!
//! let report = index.duplicates();
//! assert_eq!(report.len(), 1);
//! assert_eq!(report.groups()[0].fingerprint.as_str(), "01");
//! assert_eq!(report.duplicate_file_count(), 1);
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::scanner::Fingerprint;

/// Files sharing one fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Content fingerprint shared by every file in the group
    pub fingerprint: Fingerprint,
    /// Member paths, in traversal order
    pub files: Vec<PathBuf>,
}

impl DuplicateGroup {
    /// Create a new duplicate group.
    #[must_use]
    pub fn new(fingerprint: Fingerprint, files: Vec<PathBuf>) -> Self {
        Self { fingerprint, files }
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of redundant copies (total - 1 original).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.files.len().saturating_sub(1)
    }

    /// Whether `path` is a member of this group.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.files.iter().any(|p| p == path)
    }
}

/// Every duplicate group found by a scan.
///
/// Groups appear in the order their fingerprint was first seen during
/// traversal. That order follows the filesystem listing and is not stable
/// across platforms; compare reports as sets when it matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DuplicateReport {
    groups: Vec<DuplicateGroup>,
}

impl DuplicateReport {
    /// Create a report from groups that already have two or more members.
    #[must_use]
    pub fn new(groups: Vec<DuplicateGroup>) -> Self {
        debug_assert!(groups.iter().all(|g| g.len() >= 2));
        Self { groups }
    }

    /// Number of duplicate groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True when no duplicates were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The groups, in first-seen order.
    #[must_use]
    pub fn groups(&self) -> &[DuplicateGroup] {
        &self.groups
    }

    /// Iterate over the groups.
    pub fn iter(&self) -> std::slice::Iter<'_, DuplicateGroup> {
        self.groups.iter()
    }

    /// Look up the group for a fingerprint.
    #[must_use]
    pub fn get(&self, fingerprint: &Fingerprint) -> Option<&DuplicateGroup> {
        self.groups.iter().find(|g| &g.fingerprint == fingerprint)
    }

    /// Total number of files that belong to some group.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.groups.iter().map(DuplicateGroup::len).sum()
    }

    /// Total number of redundant copies across all groups.
    #[must_use]
    pub fn duplicate_file_count(&self) -> usize {
        self.groups.iter().map(DuplicateGroup::duplicate_count).sum()
    }

    /// Consume the report, returning the groups.
    #[must_use]
    pub fn into_groups(self) -> Vec<DuplicateGroup> {
        self.groups
    }

    /// Consume the report as a fingerprint → paths mapping.
    #[must_use]
    pub fn into_map(self) -> HashMap<Fingerprint, Vec<PathBuf>> {
        self.groups
            .into_iter()
            .map(|g| (g.fingerprint, g.files))
            .collect()
    }
}

impl<'a> IntoIterator for &'a DuplicateReport {
    type Item = &'a DuplicateGroup;
    type IntoIter = std::slice::Iter<'a, DuplicateGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

impl IntoIterator for DuplicateReport {
    type Item = DuplicateGroup;
    type IntoIter = std::vec::IntoIter<DuplicateGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}
