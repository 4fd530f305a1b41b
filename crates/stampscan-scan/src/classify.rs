//! Per-entry classification and content hashing.
//!
//! Nothing here returns an error: every failure degrades to an absent
//! value so a single unreadable entry never stops a scan.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use stampscan_core::{ContentDigest, EntryStat, EntryType};

/// Default read size for [`compute_digest`].
pub const HASH_CHUNK_SIZE: usize = 4096;

/// What the classifier learned about one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Type tag for the `ext` column.
    pub entry_type: EntryType,
    /// Size and mtime, absent when stat failed.
    pub stat: Option<EntryStat>,
    /// True only for regular files (not links, directories or specials).
    pub is_regular_file: bool,
}

/// Check whether an entry is still present, without following links.
///
/// Only `NotFound` counts as gone. An entry we may not inspect still exists.
pub fn entry_exists(path: &Path) -> bool {
    match fs::symlink_metadata(path) {
        Ok(_) => true,
        Err(err) => err.kind() != io::ErrorKind::NotFound,
    }
}

/// Classify an entry.
///
/// Typing uses `lstat`, so a link is `LINK` even when it points at a
/// directory. Size and mtime come from `stat` and follow links; a broken
/// link therefore has no stat.
pub fn classify(path: &Path) -> Classification {
    let link_meta = fs::symlink_metadata(path).ok();

    let entry_type = match &link_meta {
        Some(meta) if meta.is_dir() => EntryType::Dir,
        Some(meta) if meta.file_type().is_symlink() => EntryType::Link,
        _ => type_from_name(path),
    };

    let is_regular_file = link_meta.as_ref().is_some_and(|meta| meta.is_file());

    Classification {
        entry_type,
        stat: stat_entry(path),
        is_regular_file,
    }
}

fn type_from_name(path: &Path) -> EntryType {
    path.file_name()
        .map(|name| EntryType::from_name(&name.to_string_lossy()))
        .unwrap_or(EntryType::Plain)
}

fn stat_entry(path: &Path) -> Option<EntryStat> {
    let meta = fs::metadata(path).ok()?;
    let modified = meta.modified().ok()?;
    Some(EntryStat::new(meta.len(), modified))
}

/// Stream a file through MD5 in `chunk_size` reads.
///
/// Returns `None` if the file cannot be opened or any read fails.
pub fn compute_digest(path: &Path, chunk_size: usize) -> Option<ContentDigest> {
    let file = File::open(path).ok()?;
    digest_reader(file, chunk_size).ok()
}

fn digest_reader(mut reader: impl Read, chunk_size: usize) -> io::Result<ContentDigest> {
    let mut context = md5::Context::new();
    let mut buffer = vec![0u8; chunk_size.max(1)];

    loop {
        let read = reader.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        context.consume(&buffer[..read]);
    }

    Ok(ContentDigest::new(context.compute().0))
}
