//! Plain-text report, the default output of the `dupfind` binary.
//!
//! ```text
//! Listing duplicate files:
//!
//! -------------------------------------------
//! /data/a.txt
//! /data/b/b.txt
//! ```
//!
//! An empty report prints `No duplicates found`. Skipped files, if any,
//! follow the groups.

use std::io::{self, Write};

use crate::duplicates::ScanReport;

/// Line printed before each group.
pub const DIVIDER: &str = "-------------------------------------------";

/// Human-readable rendering of a [`ScanReport`].
#[derive(Debug, Clone, Copy)]
pub struct TextOutput<'a> {
    report: &'a ScanReport,
}

impl<'a> TextOutput<'a> {
    /// Create a text renderer for `report`.
    #[must_use]
    pub fn new(report: &'a ScanReport) -> Self {
        Self { report }
    }

    /// Write the report.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        if self.report.duplicates.is_empty() {
            writeln!(writer, "No duplicates found")?;
        } else {
            writeln!(writer, "Listing duplicate files:")?;
            for group in &self.report.duplicates {
                writeln!(writer)?;
                writeln!(writer, "{DIVIDER}")?;
                for path in &group.files {
                    writeln!(writer, "{}", path.display())?;
                }
            }
        }

        if !self.report.errors.is_empty() {
            writeln!(writer)?;
            writeln!(writer, "Skipped {} file(s):", self.report.errors.len())?;
            for error in &self.report.errors {
                writeln!(writer, "  {error}")?;
            }
        }

        Ok(())
    }

    /// Render the report into a string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        // Writing to a Vec cannot fail
        let _ = self.write_to(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }
}
