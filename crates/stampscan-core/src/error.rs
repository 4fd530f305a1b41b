//! Error types for scanning and reporting.

use std::path::PathBuf;

use thiserror::Error;

use crate::summary::ScanSummary;

/// Terminal result of a scan.
pub type ScanOutcome = Result<ScanSummary, ScanError>;

/// Scan-level failures. Per-entry problems never surface here.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The report destination could not be opened or written.
    #[error("Cannot write output {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: ReportError,
    },

    /// The root directory could not be enumerated.
    #[error("Cannot read directory {path}: {source}")]
    Enumeration {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Create an output write error with destination context.
    pub fn output(path: impl Into<PathBuf>, source: ReportError) -> Self {
        Self::OutputWrite {
            path: path.into(),
            source,
        }
    }

    /// Create an enumeration error with root context.
    pub fn enumeration(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Enumeration {
            path: path.into(),
            source,
        }
    }

    /// Whether the scan failed because the report could not be written.
    pub fn is_output_write(&self) -> bool {
        matches!(self, Self::OutputWrite { .. })
    }

    /// Whether the scan failed because the root could not be read.
    pub fn is_enumeration(&self) -> bool {
        matches!(self, Self::Enumeration { .. })
    }
}

/// Errors raised by report sinks.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Destination could not be created.
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A write was attempted before `open` succeeded or after `finalize`.
    #[error("Report is not open")]
    NotOpen,

    /// Encoding or I/O failure while writing.
    #[error("Failed to write report: {source}")]
    Write {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ReportError {
    /// Wrap any write-side failure.
    pub fn write(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Write {
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_error_kinds() {
        let err = ScanError::output("/out/report.csv", ReportError::NotOpen);
        assert!(err.is_output_write());
        assert!(!err.is_enumeration());
        assert!(err.to_string().contains("Cannot write output"));

        let err = ScanError::enumeration(
            "/missing",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.is_enumeration());
        assert!(err.to_string().contains("Cannot read directory"));
    }

    #[test]
    fn test_report_error_write() {
        let err = ReportError::write(std::io::Error::other("disk full"));
        assert!(err.to_string().contains("disk full"));
    }
}
