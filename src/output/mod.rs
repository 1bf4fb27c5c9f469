//! Output formatters for scan results.
//!
//! This module provides different output formats for scan results:
//! - Plain text for people (the default)
//! - JSON for automation and scripting
//!
//! # Example
//!
//! ```no_run
//! use dupfind::duplicates::DuplicateFinder;
//! use dupfind::error::ExitCode;
//! use dupfind::output::{JsonOutput, TextOutput};
//! use std::path::Path;
//!
//! let report = DuplicateFinder::with_defaults().scan(Path::new(".")).unwrap();
//!
//! print!("{}", TextOutput::new(&report).render());
//!
//! let output = JsonOutput::new(&report, ExitCode::for_report(&report));
//! println!("{}", output.to_json_pretty().unwrap());
//! ```

pub mod json;
pub mod text;

// Re-export main types
pub use json::JsonOutput;
pub use text::TextOutput;
