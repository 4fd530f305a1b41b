//! Report row types.

use std::fmt;
use std::path::{Component, Path};
use std::time::SystemTime;

use chrono::{DateTime, Local, SubsecRound};
use compact_str::CompactString;
use serde::{Serialize, Serializer};
use strum::IntoEnumIterator;

/// Timestamp layout used for the `mtime` cell.
pub const MTIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// MD5 content digest of a regular file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentDigest(pub [u8; 16]);

impl ContentDigest {
    /// Create a new ContentDigest from raw bytes.
    pub fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Get the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for ContentDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Type tag written to the `ext` column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryType {
    /// Directory, rendered `DIR`.
    Dir,
    /// Symbolic link, rendered `LINK`. Never followed for typing.
    Link,
    /// Lowercased text after the last `.` of the base name.
    Extension(CompactString),
    /// No extension, rendered as an empty string.
    Plain,
}

impl EntryType {
    /// Derive the tag from a base name alone.
    ///
    /// `report.v2.tar.gz` gives `gz`, `.bashrc` gives `bashrc` and a name
    /// without a dot gives [`EntryType::Plain`].
    pub fn from_name(name: &str) -> Self {
        match name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => Self::Extension(ext.to_lowercase().into()),
            _ => Self::Plain,
        }
    }

    /// Text written to the report.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Dir => "DIR",
            Self::Link => "LINK",
            Self::Extension(ext) => ext.as_str(),
            Self::Plain => "",
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Dir)
    }

    pub fn is_link(&self) -> bool {
        matches!(self, Self::Link)
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EntryType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Size and modification time of an entry that could be stat-ed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntryStat {
    /// Size in bytes.
    #[serde(rename = "bytes")]
    pub size: u64,
    /// Last modification, local time, whole seconds.
    #[serde(rename = "mtime", serialize_with = "serialize_mtime")]
    pub modified: DateTime<Local>,
}

impl EntryStat {
    /// Create stat info, truncating the timestamp to second precision.
    pub fn new(size: u64, modified: SystemTime) -> Self {
        Self {
            size,
            modified: DateTime::<Local>::from(modified).trunc_subsecs(0),
        }
    }

    /// The `mtime` cell text.
    pub fn modified_cell(&self) -> String {
        self.modified.format(MTIME_FORMAT).to_string()
    }
}

fn serialize_mtime<S: Serializer>(
    modified: &DateTime<Local>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&modified.format(MTIME_FORMAT))
}

/// Report columns, in output order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Column {
    Name,
    Ext,
    Bytes,
    Mtime,
    Md5,
}

impl Column {
    /// Ordered header for a run. `md5` is present only with hashing enabled.
    pub fn header(compute_hash: bool) -> Vec<Column> {
        Column::iter()
            .filter(|column| compute_hash || *column != Column::Md5)
            .collect()
    }

    /// Column name as written in the header.
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// One row of the report, describing a single filesystem entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// Root-relative path, `/`-separated, sink-illegal characters removed.
    #[serde(rename = "name")]
    pub path: String,
    /// Type tag.
    #[serde(rename = "ext")]
    pub entry_type: EntryType,
    /// Size and mtime, absent when stat failed.
    #[serde(flatten)]
    pub stat: Option<EntryStat>,
    /// Content digest, absent unless hashed successfully.
    #[serde(rename = "md5", skip_serializing_if = "Option::is_none")]
    pub digest: Option<ContentDigest>,
}

impl ReportRow {
    /// Row carrying only path and type.
    pub fn partial(path: impl Into<String>, entry_type: EntryType) -> Self {
        Self {
            path: path.into(),
            entry_type,
            stat: None,
            digest: None,
        }
    }

    /// Row with size and mtime.
    pub fn full(path: impl Into<String>, entry_type: EntryType, stat: EntryStat) -> Self {
        Self {
            path: path.into(),
            entry_type,
            stat: Some(stat),
            digest: None,
        }
    }

    /// Attach a digest.
    pub fn with_digest(mut self, digest: Option<ContentDigest>) -> Self {
        self.digest = digest;
        self
    }

    /// Whether stat failed for this entry.
    pub fn is_partial(&self) -> bool {
        self.stat.is_none()
    }

    /// Cell texts in column order.
    ///
    /// A partial row yields only `name` and `ext`. A full row yields the
    /// four base cells plus an `md5` cell (possibly empty) when hashing is on.
    pub fn cells(&self, compute_hash: bool) -> Vec<String> {
        let mut cells = vec![self.path.clone(), self.entry_type.to_string()];
        let Some(stat) = &self.stat else {
            return cells;
        };

        cells.push(stat.size.to_string());
        cells.push(stat.modified_cell());
        if compute_hash {
            cells.push(self.digest.map(|d| d.to_hex()).unwrap_or_default());
        }
        cells
    }
}

/// Render a root-relative path for the report.
///
/// Components are joined with `/` on every platform and characters that
/// spreadsheet cells cannot hold (C0 controls other than tab, LF and CR)
/// are dropped.
pub fn normalize_path(relative: &Path) -> String {
    let joined = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            Component::ParentDir => Some("..".into()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/");

    joined.chars().filter(|c| !is_illegal_cell_char(*c)).collect()
}

fn is_illegal_cell_char(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}')
}
