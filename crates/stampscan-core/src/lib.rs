//! Core types and traits for stampscan.
//!
//! This crate provides the data model shared by the scanning engine, the
//! report sinks and the command-line front end: report rows, the scan
//! request, the collaborator traits and the error types.

mod config;
mod error;
mod row;
mod sink;
mod summary;

pub use config::{ScanRequest, ScanRequestBuilder, ScanRequestBuilderError};
pub use error::{ReportError, ScanError, ScanOutcome};
pub use row::{
    Column, ContentDigest, EntryStat, EntryType, MTIME_FORMAT, ReportRow, normalize_path,
};
pub use sink::{NoProgress, ProgressSink, Reporter};
pub use summary::ScanSummary;
