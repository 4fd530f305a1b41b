//! Report sinks for stampscan.
//!
//! Each sink implements [`Reporter`] and receives the header once, then one
//! row per scanned entry:
//!
//! - [`CsvReporter`] - spreadsheet-importable CSV, partial rows keep only
//!   their `name` and `ext` fields
//! - [`JsonLinesReporter`] - one JSON object per line, absent fields omitted
//! - [`MemoryReporter`] - keeps everything in memory

mod csv_report;
mod jsonl;
mod memory;

use serde::{Deserialize, Serialize};

pub use csv_report::CsvReporter;
pub use jsonl::JsonLinesReporter;
pub use memory::MemoryReporter;

// Re-export core types
pub use stampscan_core::{Column, ReportError, ReportRow, Reporter};

/// On-disk report format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    #[default]
    Csv,
    JsonLines,
}

impl ReportFormat {
    /// Conventional file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::JsonLines => "jsonl",
        }
    }

    /// Create an unopened reporter for this format.
    pub fn reporter(self) -> Box<dyn Reporter + Send> {
        match self {
            Self::Csv => Box::new(CsvReporter::new()),
            Self::JsonLines => Box::new(JsonLinesReporter::new()),
        }
    }
}
