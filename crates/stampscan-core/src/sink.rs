//! Collaborator traits the engine reports through.

use std::path::Path;

use crate::error::ReportError;
use crate::row::{Column, ReportRow};

/// Destination for report rows.
///
/// The engine calls `open` once, then `append_header` once, then
/// `append_row` per entry in traversal order, then `finalize` once.
pub trait Reporter {
    /// Create or truncate the destination.
    fn open(&mut self, destination: &Path) -> Result<(), ReportError>;

    /// Write the column header.
    fn append_header(&mut self, columns: &[Column]) -> Result<(), ReportError>;

    /// Append one row.
    fn append_row(&mut self, row: &ReportRow) -> Result<(), ReportError>;

    /// Flush and close the destination.
    fn finalize(&mut self) -> Result<(), ReportError>;
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn open(&mut self, destination: &Path) -> Result<(), ReportError> {
        (**self).open(destination)
    }

    fn append_header(&mut self, columns: &[Column]) -> Result<(), ReportError> {
        (**self).append_header(columns)
    }

    fn append_row(&mut self, row: &ReportRow) -> Result<(), ReportError> {
        (**self).append_row(row)
    }

    fn finalize(&mut self) -> Result<(), ReportError> {
        (**self).finalize()
    }
}

/// Receiver of percentage updates (0 to 100).
///
/// May be invoked from a worker thread. Implementations that feed a UI
/// should forward the value rather than touch UI state directly.
pub trait ProgressSink {
    fn update(&mut self, percent: u8);
}

impl<F: FnMut(u8)> ProgressSink for F {
    fn update(&mut self, percent: u8) {
        self(percent)
    }
}

/// Progress sink that discards every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn update(&mut self, _percent: u8) {}
}
