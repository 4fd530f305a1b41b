//! Enumeration pass over the scan root.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use jwalk::{Parallelism, WalkDir};
use tracing::debug;

use stampscan_core::ScanError;

/// Result of the enumeration pass.
#[derive(Debug, Default)]
pub struct Enumeration {
    /// Every path below the root, in walk order. The root itself is excluded.
    pub paths: Vec<PathBuf>,
    /// Nested directories that could not be listed.
    pub errors: u64,
}

impl Enumeration {
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Collect every path under `root`.
///
/// The walk is serial and sorted by file name so repeated scans of an
/// unchanged tree produce the same order. Hidden entries are included and
/// links are reported but never descended into.
///
/// Fails only when the root itself cannot be listed.
pub fn enumerate(root: &Path) -> Result<Enumeration, ScanError> {
    check_root(root).map_err(|e| ScanError::enumeration(root, e))?;

    let walker = WalkDir::new(root)
        .parallelism(Parallelism::Serial)
        .skip_hidden(false)
        .follow_links(false)
        .sort(true)
        .min_depth(1);

    let mut enumeration = Enumeration::default();
    for entry_result in walker {
        match entry_result {
            Ok(entry) => enumeration.paths.push(entry.path()),
            Err(err) => {
                debug!(path = ?err.path(), error = %err, "Skipping unreadable entry");
                enumeration.errors += 1;
            }
        }
    }

    Ok(enumeration)
}

fn check_root(root: &Path) -> io::Result<()> {
    let metadata = fs::metadata(root)?;
    if !metadata.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotADirectory,
            "scan root is not a directory",
        ));
    }
    fs::read_dir(root)?;
    Ok(())
}
