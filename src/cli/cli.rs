use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;

use crate::application::data::{ColorMode, LogLevel, StatErrorMode, StyleName};
use crate::config::ConfigSource;

/// Print the contents of a directory as a tree.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Cli {
    /// Directory (or file) to list
    #[clap(default_value = ".")]
    pub path: PathBuf,

    /// Levels to descend below the root; negative means no limit
    #[clap(long, short, allow_negative_numbers = true)]
    pub depth: Option<i64>,

    /// Glyphs used to draw the tree
    #[clap(long, short, value_enum)]
    pub style: Option<StyleName>,

    /// Prefix entries with Nerd Font icons
    #[clap(long)]
    pub icons: bool,

    #[clap(long, default_value = "auto", value_enum)]
    pub color: ColorMode,

    /// Print bare names: no icons, colours or symlink targets
    #[clap(long)]
    pub plain: bool,

    /// Include entries whose names start with a dot
    #[clap(long, short)]
    pub all: bool,

    /// Show entry sizes in front of their names
    #[clap(long)]
    pub size: bool,

    /// List directories only
    #[clap(long, short = 'D')]
    pub dirs_only: bool,

    /// Maximum number of directories expanded at the same time
    #[clap(long, short)]
    pub workers: Option<NonZeroUsize>,

    /// What to do with a directory when one of its entries cannot be read
    #[clap(long, default_value = "abort", value_enum)]
    pub on_stat_error: StatErrorMode,

    /// Read settings from this file instead of the default location
    #[clap(long, conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Ignore the config file
    #[clap(long)]
    pub no_config: bool,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}

impl Cli {
    pub fn config_source(&self) -> ConfigSource {
        match (&self.config, self.no_config) {
            (_, true) => ConfigSource::Disabled,
            (Some(path), false) => ConfigSource::Explicit(path.clone()),
            (None, false) => ConfigSource::Default,
        }
    }
}
