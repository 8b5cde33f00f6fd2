use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

use crate::ext::PathNameExt;
use crate::tree::EntryMetadata;

/// Blocking filesystem primitives the builder runs on its worker threads.
pub trait FileSystem: Send + Sync + 'static {
    /// Metadata of the traversal root, following symlinks.
    fn stat(&self, path: &Path) -> io::Result<EntryMetadata>;

    /// Raw names of the entries of `dir`, in a stable order. Names are joined
    /// onto `dir` as they are, so they must not be re-encoded.
    fn list(&self, dir: &Path) -> io::Result<Vec<OsString>>;

    /// Metadata of a single entry, without following symlinks.
    fn entry_metadata(&self, path: &Path) -> io::Result<EntryMetadata>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn stat(&self, path: &Path) -> io::Result<EntryMetadata> {
        Ok(describe(path, &fs::metadata(path)?))
    }

    fn list(&self, dir: &Path) -> io::Result<Vec<OsString>> {
        let mut names = fs::read_dir(dir)?
            .map(|entry| entry.map(|entry| entry.file_name()))
            .collect::<io::Result<Vec<_>>>()?;
        names.sort_unstable();
        Ok(names)
    }

    fn entry_metadata(&self, path: &Path) -> io::Result<EntryMetadata> {
        Ok(describe(path, &fs::symlink_metadata(path)?))
    }
}

fn describe(path: &Path, metadata: &fs::Metadata) -> EntryMetadata {
    EntryMetadata::new(
        path.entry_name(),
        path,
        metadata.file_type().into(),
        metadata.len(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::EntryKind;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn lists_names_sorted() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        for name in ["zeta", "alpha", "Mid"] {
            File::create(dir.path().join(name)).expect("Failed to create file");
        }

        let names = LocalFileSystem.list(dir.path()).expect("Failed to list");
        assert_eq!(names, ["Mid", "alpha", "zeta"].map(OsString::from));
    }

    #[test]
    fn classifies_entries() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let mut file = File::create(dir.path().join("data.bin")).expect("Failed to create file");
        file.write_all(b"12345").expect("Failed to write file");
        fs::create_dir(dir.path().join("sub")).expect("Failed to create directory");

        let file_meta = LocalFileSystem
            .entry_metadata(&dir.path().join("data.bin"))
            .expect("Failed to stat file");
        assert_eq!(file_meta.kind, EntryKind::File);
        assert_eq!(file_meta.name, "data.bin");
        assert_eq!(file_meta.len, 5);

        let dir_meta = LocalFileSystem
            .entry_metadata(&dir.path().join("sub"))
            .expect("Failed to stat directory");
        assert_eq!(dir_meta.kind, EntryKind::Directory);
        assert_eq!(
            LocalFileSystem.stat(dir.path()).expect("Failed to stat root").kind,
            EntryKind::Directory
        );
    }

    #[cfg(unix)]
    #[test]
    fn does_not_follow_entry_symlinks() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir(dir.path().join("target")).expect("Failed to create directory");
        std::os::unix::fs::symlink(dir.path().join("target"), dir.path().join("link"))
            .expect("Failed to create symlink");

        let meta = LocalFileSystem
            .entry_metadata(&dir.path().join("link"))
            .expect("Failed to stat link");
        assert_eq!(meta.kind, EntryKind::Symlink);
        assert_eq!(
            LocalFileSystem
                .stat(&dir.path().join("link"))
                .expect("Failed to stat link target")
                .kind,
            EntryKind::Directory
        );
    }

    #[cfg(unix)]
    #[test]
    fn keeps_non_utf8_names_intact() {
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().expect("Failed to create temp directory");
        let raw = std::ffi::OsStr::from_bytes(b"b\xff");
        File::create(dir.path().join(raw)).expect("Failed to create file");

        let names = LocalFileSystem.list(dir.path()).expect("Failed to list");
        assert_eq!(names, [raw.to_os_string()]);

        let meta = LocalFileSystem
            .entry_metadata(&dir.path().join(&names[0]))
            .expect("Failed to stat listed name");
        assert_eq!(meta.kind, EntryKind::File);
        assert_eq!(meta.name, "b\u{FFFD}");
    }

    #[test]
    fn missing_paths_fail() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let missing = dir.path().join("missing");
        assert!(LocalFileSystem.stat(&missing).is_err());
        assert!(LocalFileSystem.list(&missing).is_err());
        assert!(LocalFileSystem.entry_metadata(&missing).is_err());
    }
}
