//! CSV report sink.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::debug;

use stampscan_core::{Column, ReportError, ReportRow, Reporter};

/// Writes the report as CSV.
///
/// Records are flexible: a partial row has two fields while full rows have
/// four or five.
#[derive(Default)]
pub struct CsvReporter {
    writer: Option<csv::Writer<BufWriter<File>>>,
    destination: Option<PathBuf>,
    compute_hash: bool,
    rows_written: u64,
}

impl CsvReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows appended since `open`.
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    fn writer(&mut self) -> Result<&mut csv::Writer<BufWriter<File>>, ReportError> {
        self.writer.as_mut().ok_or(ReportError::NotOpen)
    }
}

impl Reporter for CsvReporter {
    fn open(&mut self, destination: &Path) -> Result<(), ReportError> {
        let file = File::create(destination).map_err(|source| ReportError::Open {
            path: destination.to_path_buf(),
            source,
        })?;

        debug!("Opened CSV report: {}", destination.display());
        self.writer = Some(
            csv::WriterBuilder::new()
                .flexible(true)
                .from_writer(BufWriter::new(file)),
        );
        self.destination = Some(destination.to_path_buf());
        self.rows_written = 0;
        Ok(())
    }

    fn append_header(&mut self, columns: &[Column]) -> Result<(), ReportError> {
        self.compute_hash = columns.contains(&Column::Md5);
        let writer = self.writer()?;
        writer
            .write_record(columns.iter().map(|c| c.name()))
            .map_err(ReportError::write)?;
        // Surface write problems before the walk starts.
        writer.flush().map_err(ReportError::write)
    }

    fn append_row(&mut self, row: &ReportRow) -> Result<(), ReportError> {
        let cells = row.cells(self.compute_hash);
        self.writer()?
            .write_record(&cells)
            .map_err(ReportError::write)?;
        self.rows_written += 1;
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), ReportError> {
        let mut writer = self.writer.take().ok_or(ReportError::NotOpen)?;
        writer.flush().map_err(ReportError::write)?;
        if let Some(destination) = &self.destination {
            debug!(
                "Wrote {} rows to {}",
                self.rows_written,
                destination.display()
            );
        }
        Ok(())
    }
}
