use std::path::PathBuf;

use serde::Serialize;

/// POSIX permission bits of a tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FileMode(u32);

impl FileMode {
    /// `rw-r--r--`, used for files whose source mode is unknown.
    pub const DEFAULT_FILE: Self = Self(0o644);
    /// `rwxr-xr-x`, used for directories whose source mode is unknown.
    pub const DEFAULT_DIR: Self = Self(0o755);

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits & 0o7777)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Mode to write for an entry: the source mode, unless it is missing or
    /// grants nothing at all.
    pub const fn or_default(mode: Option<Self>, kind: EntryKind) -> Self {
        match mode {
            Some(mode) if mode.0 != 0 => mode,
            _ => match kind {
                EntryKind::File => Self::DEFAULT_FILE,
                EntryKind::Directory => Self::DEFAULT_DIR,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// One entry of a directory walk, relative to the walked root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
    pub mode: Option<FileMode>,
}

impl TreeEntry {
    pub fn file(path: impl Into<PathBuf>, mode: Option<FileMode>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
            mode,
        }
    }

    pub fn directory(path: impl Into<PathBuf>, mode: Option<FileMode>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Directory,
            mode,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}
