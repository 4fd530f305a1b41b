//! Scan request types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Everything the engine needs for one run. Immutable once built.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanRequest {
    /// Root directory to scan.
    pub root: PathBuf,

    /// Report destination handed to the reporter.
    pub output: PathBuf,

    /// Compute an MD5 digest for every regular file.
    #[builder(default = "false")]
    #[serde(default)]
    pub compute_hash: bool,

    /// Number of entries between progress recomputations.
    #[builder(default = "100")]
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,

    /// Read buffer size used while hashing.
    #[builder(default = "4096")]
    #[serde(default = "default_hash_chunk_size")]
    pub hash_chunk_size: usize,
}

fn default_progress_interval() -> usize {
    100
}

fn default_hash_chunk_size() -> usize {
    4096
}

impl ScanRequestBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.root {
            Some(ref root) if root.as_os_str().is_empty() => {
                return Err("Root path cannot be empty".to_string());
            }
            None => return Err("Root path is required".to_string()),
            _ => {}
        }
        match self.output {
            Some(ref output) if output.as_os_str().is_empty() => {
                return Err("Output path cannot be empty".to_string());
            }
            None => return Err("Output path is required".to_string()),
            _ => {}
        }
        if self.progress_interval == Some(0) {
            return Err("Progress interval must be at least 1".to_string());
        }
        if self.hash_chunk_size == Some(0) {
            return Err("Hash chunk size must be at least 1".to_string());
        }
        Ok(())
    }
}

impl ScanRequest {
    /// Create a new request builder.
    pub fn builder() -> ScanRequestBuilder {
        ScanRequestBuilder::default()
    }

    /// Create a request with default settings.
    pub fn new(root: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output: output.into(),
            compute_hash: false,
            progress_interval: default_progress_interval(),
            hash_chunk_size: default_hash_chunk_size(),
        }
    }

    /// Enable or disable hashing.
    pub fn with_hash(mut self, compute_hash: bool) -> Self {
        self.compute_hash = compute_hash;
        self
    }
}
