//! In-memory report sink.

use std::io;
use std::path::{Path, PathBuf};

use stampscan_core::{Column, ReportError, ReportRow, Reporter};

/// Collects the header and rows in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryReporter {
    destination: Option<PathBuf>,
    header: Vec<Column>,
    rows: Vec<ReportRow>,
    finalized: bool,
    fail_open: bool,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A reporter whose `open` always fails with permission denied.
    pub fn failing_open() -> Self {
        Self {
            fail_open: true,
            ..Self::default()
        }
    }

    /// Destination passed to the last successful `open`.
    pub fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }

    pub fn header(&self) -> &[Column] {
        &self.header
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Consume the reporter, returning its rows.
    pub fn into_rows(self) -> Vec<ReportRow> {
        self.rows
    }

    /// Find the row for a report path.
    pub fn row(&self, path: &str) -> Option<&ReportRow> {
        self.rows.iter().find(|row| row.path == path)
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    fn ensure_open(&self) -> Result<(), ReportError> {
        if self.destination.is_none() || self.finalized {
            return Err(ReportError::NotOpen);
        }
        Ok(())
    }
}

impl Reporter for MemoryReporter {
    fn open(&mut self, destination: &Path) -> Result<(), ReportError> {
        if self.fail_open {
            return Err(ReportError::Open {
                path: destination.to_path_buf(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "destination is read-only"),
            });
        }
        self.destination = Some(destination.to_path_buf());
        self.header.clear();
        self.rows.clear();
        self.finalized = false;
        Ok(())
    }

    fn append_header(&mut self, columns: &[Column]) -> Result<(), ReportError> {
        self.ensure_open()?;
        self.header = columns.to_vec();
        Ok(())
    }

    fn append_row(&mut self, row: &ReportRow) -> Result<(), ReportError> {
        self.ensure_open()?;
        self.rows.push(row.clone());
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), ReportError> {
        self.ensure_open()?;
        self.finalized = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stampscan_core::EntryType;

    #[test]
    fn test_lifecycle() {
        let mut reporter = MemoryReporter::new();
        reporter.open(Path::new("mem")).unwrap();
        reporter.append_header(&Column::header(true)).unwrap();
        reporter
            .append_row(&ReportRow::partial("a", EntryType::Dir))
            .unwrap();
        reporter.finalize().unwrap();

        assert!(reporter.is_finalized());
        assert_eq!(reporter.header().len(), 5);
        assert_eq!(reporter.row("a").map(|r| &r.entry_type), Some(&EntryType::Dir));
        assert!(matches!(reporter.finalize(), Err(ReportError::NotOpen)));
    }

    #[test]
    fn test_failing_open() {
        let mut reporter = MemoryReporter::failing_open();
        assert!(matches!(
            reporter.open(Path::new("mem")),
            Err(ReportError::Open { .. })
        ));
        assert!(reporter.destination().is_none());
    }
}
