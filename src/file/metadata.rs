use chrono::{DateTime, Utc};
use filetime::FileTime;
use serde::Serialize;
use std::fs::Metadata;

/// Kind of filesystem entry, as reported without following symlinks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
    Other,
}

/// Snapshot of an entry's metadata
///
/// Only the file/directory predicates carry meaning for this crate; size and
/// timestamps are passed through from the platform as-is.
#[derive(Debug, Clone, Serialize)]
pub struct FileStat {
    kind: EntryKind,
    len: u64,
    readonly: bool,
    modified: Option<DateTime<Utc>>,
    accessed: Option<DateTime<Utc>>,
    created: Option<DateTime<Utc>>,
}

impl FileStat {
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_symlink(&self) -> bool {
        self.kind == EntryKind::Symlink
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Size in bytes
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn readonly(&self) -> bool {
        self.readonly
    }

    pub fn modified(&self) -> Option<DateTime<Utc>> {
        self.modified
    }

    pub fn accessed(&self) -> Option<DateTime<Utc>> {
        self.accessed
    }

    /// Creation time; not every platform/filesystem records one
    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }
}

impl From<Metadata> for FileStat {
    fn from(meta: Metadata) -> Self {
        let file_type = meta.file_type();
        let kind = if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        };

        Self {
            kind,
            len: meta.len(),
            readonly: meta.permissions().readonly(),
            modified: to_utc(FileTime::from_last_modification_time(&meta)),
            accessed: to_utc(FileTime::from_last_access_time(&meta)),
            created: FileTime::from_creation_time(&meta).and_then(to_utc),
        }
    }
}

fn to_utc(ft: FileTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ft.unix_seconds(), ft.nanoseconds())
}
