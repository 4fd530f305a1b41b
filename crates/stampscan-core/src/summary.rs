//! Scan summary statistics.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::row::ReportRow;

/// Counters describing a completed scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Paths collected by the enumeration pass.
    pub total_entries: u64,
    /// Rows appended to the reporter.
    pub rows_written: u64,
    /// Rows written without size and mtime.
    pub partial_rows: u64,
    /// Entries that disappeared between enumeration and visiting.
    pub vanished: u64,
    /// Regular files hashed successfully.
    pub digests_computed: u64,
    /// Regular files that could not be read for hashing.
    pub digests_failed: u64,
    /// Nested directories that could not be listed.
    pub walk_errors: u64,
    /// Sum of sizes over full rows.
    pub total_bytes: u64,
    /// Wall time of the run.
    pub elapsed: Duration,
}

impl ScanSummary {
    /// Create new empty counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update counters with a row that was just written.
    pub fn record_row(&mut self, row: &ReportRow) {
        self.rows_written += 1;
        match &row.stat {
            Some(stat) => self.total_bytes += stat.size,
            None => self.partial_rows += 1,
        }
    }

    /// Record the outcome of a hash attempt.
    pub fn record_digest(&mut self, succeeded: bool) {
        if succeeded {
            self.digests_computed += 1;
        } else {
            self.digests_failed += 1;
        }
    }

    /// Record an entry that vanished before it could be visited.
    pub fn record_vanished(&mut self) {
        self.vanished += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::{EntryStat, EntryType};
    use std::time::SystemTime;

    #[test]
    fn test_record_rows() {
        let mut summary = ScanSummary::new();
        summary.record_row(&ReportRow::partial("gone", EntryType::Link));
        summary.record_row(&ReportRow::full(
            "a.txt",
            EntryType::from_name("a.txt"),
            EntryStat::new(7, SystemTime::now()),
        ));

        assert_eq!(summary.rows_written, 2);
        assert_eq!(summary.partial_rows, 1);
        assert_eq!(summary.total_bytes, 7);
    }

    #[test]
    fn test_record_digest() {
        let mut summary = ScanSummary::new();
        summary.record_digest(true);
        summary.record_digest(false);
        summary.record_digest(true);
        assert_eq!(summary.digests_computed, 2);
        assert_eq!(summary.digests_failed, 1);
    }
}
