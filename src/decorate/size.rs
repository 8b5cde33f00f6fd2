use crate::tree::{EntryAnnotator, EntryKind, EntryMetadata};

const UNITS: [&str; 7] = ["B", "KB", "MB", "GB", "TB", "PB", "EB"];
const WIDTH: usize = 8;

/// Annotates entries with their size, scaled to the largest unit that keeps
/// the value below 1024.
///
/// Directories and empty files show `-`. Every annotation is right-aligned to
/// the same width so names line up.
#[derive(Debug, Clone, Copy, Default)]
pub struct SizeAnnotator;

impl EntryAnnotator for SizeAnnotator {
    fn annotate(&self, entry: &EntryMetadata) -> Option<String> {
        let size = match entry.kind {
            EntryKind::Directory => "-".to_string(),
            EntryKind::File | EntryKind::Symlink => human_size(entry.len),
        };
        Some(format!("{size:>WIDTH$}"))
    }
}

fn human_size(len: u64) -> String {
    if len == 0 {
        return "-".to_string();
    }
    let mut value = len as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}
