use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::Cli;
use crate::config::FileConfig;
use crate::decorate::{DirectoriesOnly, FilterChain, HiddenFilter, IconRenderer, SizeAnnotator};
use crate::tree::{
    BuildOptions, DepthLimit, EntryAnnotator, EntryFilter, EntryRenderer, StatFailurePolicy,
    TreeStyle,
};

/// Command-line flags merged over the config file.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub path: PathBuf,
    pub depth: DepthLimit,
    pub workers: Option<NonZeroUsize>,
    pub style: TreeStyle,
    pub show_hidden: bool,
    pub dirs_only: bool,
    pub show_size: bool,
    pub stat_failure: StatFailurePolicy,
    pub color: bool,
    /// `None` prints bare names.
    pub renderer: Option<IconRenderer>,
}

impl RuntimeConfig {
    pub fn new(cli: Cli, file: FileConfig) -> Self {
        let style = match (cli.style, file.style, file.tree_style) {
            (Some(name), _, _) | (None, Some(name), _) => name.to_style(),
            (None, None, Some(custom)) => custom,
            (None, None, None) => TreeStyle::default(),
        };
        let color = !cli.plain && cli.color.enabled();
        let icons = cli.icons || file.icons.unwrap_or(false);

        Self {
            path: cli.path,
            depth: cli.depth.or(file.depth).map(DepthLimit::from).unwrap_or_default(),
            workers: cli.workers.or(file.workers),
            style,
            show_hidden: cli.all || file.all.unwrap_or(false),
            dirs_only: cli.dirs_only,
            show_size: cli.size || file.size.unwrap_or(false),
            stat_failure: cli.on_stat_error.into(),
            color,
            renderer: (!cli.plain).then(|| IconRenderer::new(icons, color)),
        }
    }

    pub fn build_options(&self) -> BuildOptions {
        let mut chain = FilterChain::new();
        if !self.show_hidden {
            chain = chain.with(HiddenFilter);
        }
        if self.dirs_only {
            chain = chain.with(DirectoriesOnly);
        }

        let filter: Option<Arc<dyn EntryFilter>> = if chain.is_empty() {
            None
        } else {
            Some(Arc::new(chain))
        };
        let renderer = self
            .renderer
            .map(|renderer| Arc::new(renderer) as Arc<dyn EntryRenderer>);

        BuildOptions {
            depth: self.depth,
            filter,
            renderer,
            annotator: self
                .show_size
                .then(|| Arc::new(SizeAnnotator) as Arc<dyn EntryAnnotator>),
            stat_failure: self.stat_failure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::data::StyleName;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("canopy").chain(args.iter().copied()))
    }

    #[test]
    fn flags_override_the_file() {
        let file = FileConfig {
            depth: Some(5),
            workers: NonZeroUsize::new(8),
            style: Some(StyleName::Rounded),
            ..FileConfig::default()
        };
        let config = RuntimeConfig::new(cli(&["-d", "1", "-w", "2", "-s", "ascii"]), file);

        assert_eq!(config.depth, DepthLimit::Levels(1));
        assert_eq!(config.workers, NonZeroUsize::new(2));
        assert_eq!(config.style, TreeStyle::ascii());
    }

    #[test]
    fn file_fills_in_missing_flags() {
        let file = FileConfig {
            depth: Some(-3),
            workers: NonZeroUsize::new(8),
            all: Some(true),
            tree_style: Some(TreeStyle::rounded()),
            ..FileConfig::default()
        };
        let config = RuntimeConfig::new(cli(&[]), file);

        assert_eq!(config.depth, DepthLimit::Unlimited);
        assert_eq!(config.workers, NonZeroUsize::new(8));
        assert!(config.show_hidden);
        assert_eq!(config.style, TreeStyle::rounded());
    }

    #[test]
    fn defaults_hide_dot_entries_and_walk_everything() {
        let config = RuntimeConfig::new(cli(&["--color", "never"]), FileConfig::default());
        let options = config.build_options();

        assert_eq!(config.depth, DepthLimit::Unlimited);
        assert_eq!(config.style, TreeStyle::unicode());
        assert!(!config.color);
        assert!(options.filter.is_some());
        assert!(options.renderer.is_some());
        assert!(options.annotator.is_none());
        assert_eq!(options.stat_failure, StatFailurePolicy::AbortDirectory);
    }

    #[test]
    fn plain_all_builds_without_collaborators() {
        let config = RuntimeConfig::new(
            cli(&["--plain", "--all", "--on-stat-error", "skip"]),
            FileConfig::default(),
        );
        let options = config.build_options();

        assert!(options.filter.is_none());
        assert!(options.renderer.is_none());
        assert_eq!(options.stat_failure, StatFailurePolicy::SkipEntry);
    }

    #[test]
    fn size_comes_from_the_flag_or_the_file() {
        let from_flag = RuntimeConfig::new(cli(&["--size"]), FileConfig::default());
        assert!(from_flag.build_options().annotator.is_some());

        let file = FileConfig {
            size: Some(true),
            ..FileConfig::default()
        };
        let from_file = RuntimeConfig::new(cli(&[]), file);
        assert!(from_file.show_size);
        assert!(from_file.build_options().annotator.is_some());
    }
}
