//! Two-pass scan engine: enumerate the whole tree, then classify and report
//! each entry in order.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use stampscan_core::{
    Column, ProgressSink, ReportRow, Reporter, ScanError, ScanOutcome, ScanRequest, ScanSummary,
    normalize_path,
};

use crate::classify::{self, Classification};
use crate::progress::ProgressThrottle;
use crate::walk;

/// Sequential scanner that streams one report row per entry.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScanEngine;

impl ScanEngine {
    /// Create a new engine.
    pub fn new() -> Self {
        Self
    }

    /// Run a scan to completion.
    ///
    /// The reporter is opened and given its header before the tree is
    /// touched, so an unwritable destination fails fast with
    /// [`ScanError::OutputWrite`]. An unreadable root yields
    /// [`ScanError::Enumeration`] and leaves a header-only report behind.
    /// Once entries are being visited, problems with individual entries only
    /// shorten their rows.
    pub fn run<R, P>(&self, request: &ScanRequest, reporter: &mut R, progress: &mut P) -> ScanOutcome
    where
        R: Reporter + ?Sized,
        P: ProgressSink + ?Sized,
    {
        let start = Instant::now();
        let output = request.output.as_path();
        info!(
            root = %request.root.display(),
            output = %output.display(),
            hash = request.compute_hash,
            "Starting scan"
        );

        reporter
            .open(output)
            .map_err(|e| ScanError::output(output, e))?;
        reporter
            .append_header(&Column::header(request.compute_hash))
            .map_err(|e| ScanError::output(output, e))?;

        let enumeration = match walk::enumerate(&request.root) {
            Ok(enumeration) => enumeration,
            Err(err) => {
                if let Err(finalize_err) = reporter.finalize() {
                    warn!(error = %finalize_err, "Failed to close report after enumeration error");
                }
                return Err(err);
            }
        };
        debug!(
            entries = enumeration.len(),
            unreadable_dirs = enumeration.errors,
            "Enumeration complete"
        );

        let mut summary = ScanSummary::new();
        summary.total_entries = enumeration.len() as u64;
        summary.walk_errors = enumeration.errors;

        let mut throttle = ProgressThrottle::new(enumeration.len(), request.progress_interval);
        for (index, path) in enumeration.paths.iter().enumerate() {
            if let Some(row) = self.visit(request, path, &mut summary) {
                reporter
                    .append_row(&row)
                    .map_err(|e| ScanError::output(output, e))?;
                summary.record_row(&row);
            }
            if let Some(percent) = throttle.on_entry(index) {
                progress.update(percent);
            }
        }

        reporter
            .finalize()
            .map_err(|e| ScanError::output(output, e))?;
        progress.update(throttle.finish());

        summary.elapsed = start.elapsed();
        info!(
            rows = summary.rows_written,
            partial = summary.partial_rows,
            vanished = summary.vanished,
            hashed = summary.digests_computed,
            unhashable = summary.digests_failed,
            unreadable_dirs = summary.walk_errors,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "Scan complete"
        );

        Ok(summary)
    }

    /// Build the row for one enumerated path, or `None` if it must be skipped.
    fn visit(
        &self,
        request: &ScanRequest,
        path: &Path,
        summary: &mut ScanSummary,
    ) -> Option<ReportRow> {
        let relative = path.strip_prefix(&request.root).unwrap_or(path);
        if relative.as_os_str().is_empty() {
            return None;
        }
        if !classify::entry_exists(path) {
            summary.record_vanished();
            return None;
        }

        let Classification {
            entry_type,
            stat,
            is_regular_file,
        } = classify::classify(path);
        let name = normalize_path(relative);

        let Some(stat) = stat else {
            return Some(ReportRow::partial(name, entry_type));
        };

        let mut row = ReportRow::full(name, entry_type, stat);
        if request.compute_hash && is_regular_file {
            let digest = classify::compute_digest(path, request.hash_chunk_size);
            summary.record_digest(digest.is_some());
            row = row.with_digest(digest);
        }
        Some(row)
    }
}
