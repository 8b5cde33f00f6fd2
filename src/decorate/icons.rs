use std::fs;
use std::path::Path;

use colored::{Color, Colorize};

use crate::tree::EntryRenderer;

const DIR_ICON: &str = "\u{f115}";
const FILE_ICON: &str = "\u{f15b}";
const SYMLINK_ICON: &str = "\u{f481}";

/// Decorates labels with Nerd Font icons and ANSI colours.
///
/// Both decorations can be switched off independently; with both off the
/// renderer still resolves symlink targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct IconRenderer {
    icons: bool,
    color: bool,
}

impl IconRenderer {
    pub fn new(icons: bool, color: bool) -> Self {
        Self { icons, color }
    }

    fn compose(&self, icon: &str, name: &str) -> String {
        if self.icons {
            format!("{icon} {name}")
        } else {
            name.to_string()
        }
    }

    fn paint(&self, text: &str, color: Option<Color>, bold: bool) -> String {
        if !self.color {
            return text.to_string();
        }
        let mut painted = match color {
            Some(color) => text.color(color),
            None => text.normal(),
        };
        if bold {
            painted = painted.bold();
        }
        painted.to_string()
    }
}

impl EntryRenderer for IconRenderer {
    fn dir_icon(&self, name: &str) -> String {
        self.paint(&self.compose(DIR_ICON, name), Some(Color::Blue), true)
    }

    fn by_ext_icon(&self, name: &str) -> String {
        let ext = extension(name);
        let icon = ext_icon(&ext).unwrap_or(FILE_ICON);
        self.paint(&self.compose(icon, name), ext_color(&ext), false)
    }

    fn symlink(&self, name: &str, parent_dir: &Path) -> String {
        let link = self.paint(&self.compose(SYMLINK_ICON, name), Some(Color::Cyan), false);
        let path = parent_dir.join(name);
        match fs::canonicalize(&path) {
            Ok(target) => {
                let target = target.display().to_string();
                format!("{link} -> {}", self.paint(&target, Some(Color::Green), false))
            }
            Err(err) => {
                let target = match fs::read_link(&path) {
                    Ok(raw) => format!("{} ({err})", raw.display()),
                    Err(_) => err.to_string(),
                };
                format!("{link} -> {}", self.paint(&target, Some(Color::Red), false))
            }
        }
    }
}

/// Lowercased extension, or the whole name for files without one.
fn extension(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| name.to_lowercase())
}

fn ext_icon(ext: &str) -> Option<&'static str> {
    let icon = match ext {
        "rs" => "\u{e7a8}",
        "py" => "\u{e606}",
        "js" | "mjs" | "cjs" => "\u{e74e}",
        "ts" => "\u{e628}",
        "go" => "\u{e627}",
        "c" | "h" => "\u{e61e}",
        "cpp" | "hpp" | "cc" => "\u{e61d}",
        "java" => "\u{e738}",
        "rb" => "\u{e791}",
        "lua" => "\u{e620}",
        "sh" | "bash" | "zsh" => "\u{e795}",
        "html" => "\u{e736}",
        "css" => "\u{e749}",
        "md" => "\u{f48a}",
        "json" => "\u{e60b}",
        "toml" | "yaml" | "yml" | "ini" | "cfg" => "\u{e615}",
        "lock" => "\u{f023}",
        "txt" | "log" => "\u{f15c}",
        "zip" | "tar" | "gz" | "xz" | "zst" | "7z" => "\u{f410}",
        "png" | "jpg" | "jpeg" | "gif" | "svg" | "webp" => "\u{f1c5}",
        "mp3" | "flac" | "wav" | "ogg" => "\u{f1c7}",
        "mp4" | "mkv" | "webm" | "mov" => "\u{f1c8}",
        "pdf" => "\u{f1c1}",
        "dockerfile" => "\u{f308}",
        "makefile" => "\u{e779}",
        "license" => "\u{f02d}",
        _ => return None,
    };
    Some(icon)
}

fn ext_color(ext: &str) -> Option<Color> {
    match ext {
        "zip" | "tar" | "gz" | "xz" | "zst" | "7z" => Some(Color::Red),
        "png" | "jpg" | "jpeg" | "gif" | "svg" | "webp" | "mp3" | "flac" | "wav" | "ogg"
        | "mp4" | "mkv" | "webm" | "mov" => Some(Color::Magenta),
        "md" | "txt" | "pdf" => Some(Color::Yellow),
        "sh" | "bash" | "zsh" => Some(Color::Green),
        _ => None,
    }
}
