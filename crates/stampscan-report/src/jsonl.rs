//! JSON Lines report sink.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use stampscan_core::{Column, ReportError, ReportRow, Reporter};

#[derive(Serialize)]
struct HeaderLine<'a> {
    columns: &'a [&'static str],
}

/// Writes one JSON object per line.
///
/// The first line is `{"columns":[...]}`. Each following line is a row
/// object; fields that are absent for an entry are left out.
#[derive(Debug, Default)]
pub struct JsonLinesReporter {
    writer: Option<BufWriter<File>>,
    rows_written: u64,
}

impl JsonLinesReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> Result<(), ReportError> {
        let writer = self.writer.as_mut().ok_or(ReportError::NotOpen)?;
        serde_json::to_writer(&mut *writer, value).map_err(ReportError::write)?;
        writer.write_all(b"\n").map_err(ReportError::write)
    }
}

impl Reporter for JsonLinesReporter {
    fn open(&mut self, destination: &Path) -> Result<(), ReportError> {
        let file = File::create(destination).map_err(|source| ReportError::Open {
            path: destination.to_path_buf(),
            source,
        })?;
        debug!("Opened JSON Lines report: {}", destination.display());
        self.writer = Some(BufWriter::new(file));
        self.rows_written = 0;
        Ok(())
    }

    fn append_header(&mut self, columns: &[Column]) -> Result<(), ReportError> {
        let names: Vec<&'static str> = columns.iter().map(|c| c.name()).collect();
        self.write_line(&HeaderLine { columns: &names })?;
        self.writer
            .as_mut()
            .ok_or(ReportError::NotOpen)?
            .flush()
            .map_err(ReportError::write)
    }

    fn append_row(&mut self, row: &ReportRow) -> Result<(), ReportError> {
        self.write_line(row)?;
        self.rows_written += 1;
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), ReportError> {
        let mut writer = self.writer.take().ok_or(ReportError::NotOpen)?;
        writer.flush().map_err(ReportError::write)?;
        debug!("Wrote {} JSON rows", self.rows_written);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::SystemTime;

    use stampscan_core::{EntryStat, EntryType};
    use tempfile::TempDir;

    #[test]
    fn test_lines() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.jsonl");
        let mut reporter = JsonLinesReporter::new();

        let modified = SystemTime::now();

        reporter.open(&path).unwrap();
        reporter.append_header(&Column::header(false)).unwrap();
        reporter
            .append_row(&ReportRow::full(
                "src/main.rs",
                EntryType::from_name("main.rs"),
                EntryStat::new(10, modified),
            ))
            .unwrap();
        reporter
            .append_row(&ReportRow::partial("gone", EntryType::Plain))
            .unwrap();
        reporter.finalize().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0]["columns"],
            serde_json::json!(["name", "ext", "bytes", "mtime"])
        );
        let columns: Vec<&str> = lines[0]["columns"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c.as_str().unwrap())
            .collect();
        for row in &lines[1..] {
            for key in row.as_object().unwrap().keys() {
                assert!(columns.contains(&key.as_str()), "key {key} not in header");
            }
        }

        assert_eq!(lines[1]["name"], "src/main.rs");
        assert_eq!(lines[1]["mtime"], EntryStat::new(0, modified).modified_cell());
        assert_eq!(lines[1]["ext"], "rs");
        assert_eq!(lines[1]["bytes"], 10);
        assert!(lines[1].get("md5").is_none());
        assert_eq!(lines[2]["name"], "gone");
        assert_eq!(lines[2]["ext"], "");
        assert!(lines[2].get("bytes").is_none());
    }

    #[test]
    fn test_row_before_open() {
        let mut reporter = JsonLinesReporter::new();
        let err = reporter
            .append_row(&ReportRow::partial("x", EntryType::Plain))
            .unwrap_err();
        assert!(matches!(err, ReportError::NotOpen));
    }
}
