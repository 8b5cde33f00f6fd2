use std::fs::FileType;
use std::path::{Path, PathBuf};

use derive_more::Display;

/// How an entry takes part in the traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EntryKind {
    #[display("directory")]
    Directory,
    #[display("symlink")]
    Symlink,
    #[display("file")]
    File,
}

impl From<FileType> for EntryKind {
    fn from(file_type: FileType) -> Self {
        if file_type.is_symlink() {
            Self::Symlink
        } else if file_type.is_dir() {
            Self::Directory
        } else {
            Self::File
        }
    }
}

/// What the builder knows about one directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMetadata {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
    pub len: u64,
}

impl EntryMetadata {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, kind: EntryKind, len: u64) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind,
            len,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// Decides which entries of one directory become nodes.
pub trait EntryFilter: Send + Sync {
    fn filter(&self, entries: Vec<EntryMetadata>) -> Vec<EntryMetadata>;
}

/// Turns entry names into display labels.
///
/// Implementations are called from worker threads. `symlink` resolves the link
/// target on the live filesystem and has to report failures inside the label.
pub trait EntryRenderer: Send + Sync {
    fn dir_icon(&self, name: &str) -> String;
    fn by_ext_icon(&self, name: &str) -> String;
    fn symlink(&self, name: &str, parent_dir: &Path) -> String;
}

/// Supplies the bracketed `[meta]` column drawn in front of a label.
///
/// Returning `None` leaves the entry unannotated.
pub trait EntryAnnotator: Send + Sync {
    fn annotate(&self, entry: &EntryMetadata) -> Option<String>;
}
