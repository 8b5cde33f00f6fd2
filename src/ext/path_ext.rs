use std::path::{Component, Path, PathBuf};

/// Display helpers for paths shown to the user.
pub trait PathNameExt {
    /// Last component of the path, or the whole path when it has none
    /// (`/`, `..`).
    fn entry_name(&self) -> String;

    /// Absolute form of the path for messages. Falls back to a lexically
    /// normalized path when the path does not exist.
    fn best_effort_display(&self) -> String;
}

impl PathNameExt for Path {
    fn entry_name(&self) -> String {
        match self.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => self.display().to_string(),
        }
    }

    fn best_effort_display(&self) -> String {
        if let Ok(canonical) = self.canonicalize() {
            return canonical.display().to_string();
        }

        let absolute = if self.is_absolute() {
            self.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(self))
                .unwrap_or_else(|_| self.to_path_buf())
        };
        normalize(&absolute).display().to_string()
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut components: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(components.last(), Some(Component::Normal(_))) {
                    components.pop();
                }
            }
            other => components.push(other),
        }
    }
    components.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a/b/c.txt", "c.txt")]
    #[case("dir/", "dir")]
    #[case("/", "/")]
    #[case("..", "..")]
    fn extracts_entry_name(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(Path::new(path).entry_name(), expected);
    }

    #[cfg(unix)]
    #[test]
    fn normalizes_missing_paths() {
        let shown = Path::new("/definitely/not/../here/./file.yaml").best_effort_display();
        assert_eq!(shown, "/definitely/here/file.yaml");
    }

    #[test]
    fn resolves_existing_paths() {
        let dir = tempfile::TempDir::new().expect("Failed to create temp directory");
        let canonical = dir.path().canonicalize().expect("Failed to canonicalize");
        assert_eq!(
            dir.path().join(".").best_effort_display(),
            canonical.display().to_string()
        );
    }
}
