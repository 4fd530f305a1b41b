//! Directory traversal and entry classification engine for stampscan.
//!
//! # Overview
//!
//! `stampscan-scan` walks a directory tree and turns every entry into a
//! [`ReportRow`] streamed to a [`Reporter`]. Key properties:
//!
//! - **Two passes**: the whole tree is enumerated first (via jwalk, serial and
//!   sorted) so progress percentages are exact
//! - **Race tolerant**: entries that vanish or cannot be read degrade their
//!   row instead of failing the scan
//! - **Optional MD5** of every regular file, streamed in fixed-size chunks
//! - **Bounded progress** updates through a [`ProgressSink`]
//!
//! # Example
//!
//! ```rust,no_run
//! use stampscan_scan::{NoProgress, ScanEngine, ScanRequest};
//! # use stampscan_core::{Column, ReportError, ReportRow, Reporter};
//! # struct Stdout;
//! # impl Reporter for Stdout {
//! #     fn open(&mut self, _: &std::path::Path) -> Result<(), ReportError> { Ok(()) }
//! #     fn append_header(&mut self, _: &[Column]) -> Result<(), ReportError> { Ok(()) }
//! #     fn append_row(&mut self, row: &ReportRow) -> Result<(), ReportError> {
//! #         println!("{}", row.path);
//! #         Ok(())
//! #     }
//! #     fn finalize(&mut self) -> Result<(), ReportError> { Ok(()) }
//! # }
//!
//! let request = ScanRequest::new("/path/to/scan", "report.csv").with_hash(true);
//! let summary = ScanEngine::new()
//!     .run(&request, &mut Stdout, &mut NoProgress)
//!     .unwrap();
//!
//! println!("{} rows", summary.rows_written);
//! ```
//!
//! # Progress Monitoring
//!
//! Forward progress to another task:
//!
//! ```rust,no_run
//! use stampscan_scan::ChannelProgress;
//!
//! let (sink, mut progress_rx) = ChannelProgress::channel();
//!
//! tokio::spawn(async move {
//!     while let Some(percent) = progress_rx.recv().await {
//!         println!("{percent}%");
//!     }
//! });
//! # drop(sink);
//! ```

pub mod classify;
mod engine;
mod progress;
pub mod walk;

pub use classify::{Classification, classify, compute_digest, entry_exists};
pub use engine::ScanEngine;
pub use progress::{ChannelProgress, ProgressThrottle};

// Re-export core types for convenience
pub use stampscan_core::{
    Column, ContentDigest, EntryStat, EntryType, NoProgress, ProgressSink, ReportError, ReportRow,
    Reporter, ScanError, ScanOutcome, ScanRequest, ScanSummary,
};
