use std::io::{self, Write};

use snafu::Snafu;
use snafu::prelude::*;
use tracing::debug;

use crate::application::RuntimeConfig;
use crate::cli::Cli;
use crate::config::{ConfigError, FileConfig};
use crate::tree::{BuildError, Tree, TreeBuilder, TreeStyle};

pub struct Application;

impl Application {
    pub async fn run(cli: Cli) -> Result<(), ApplicationError> {
        let file_config = FileConfig::load(&cli.config_source())
            .await
            .context(ConfigurationSnafu)?;
        debug!("Loaded config: {:?}", file_config);

        let runtime_config = RuntimeConfig::new(cli, file_config);
        debug!("Runtime config: {:?}", runtime_config);
        colored::control::set_override(runtime_config.color);

        let tree = TreeBuilder::new(runtime_config.workers)
            .context(TreeBuildSnafu)?
            .build(&runtime_config.path, runtime_config.build_options())
            .await
            .context(TreeBuildSnafu)?;

        write_tree(&tree, &runtime_config.style).context(OutputSnafu)
    }
}

fn write_tree(tree: &Tree, style: &TreeStyle) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", tree.render_with(style))?;
    writeln!(
        stdout,
        "\n{}",
        summary(tree.directory_count(), tree.file_count())
    )
}

/// `3 directories, 1 file`
pub fn summary(directories: u32, files: u32) -> String {
    format!(
        "{} {}, {} {}",
        directories,
        if directories == 1 { "directory" } else { "directories" },
        files,
        if files == 1 { "file" } else { "files" }
    )
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while loading the configuration"))]
    ConfigurationError { source: ConfigError },
    #[snafu(display("Critical failure encountered while building the tree"))]
    TreeBuildError { source: BuildError },
    #[snafu(display("Failed to write the tree to stdout"))]
    OutputError { source: io::Error },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 0, "1 directory, 0 files")]
    #[case(1, 1, "1 directory, 1 file")]
    #[case(3, 12, "3 directories, 12 files")]
    #[case(0, 1, "0 directories, 1 file")]
    fn summarizes_counts(#[case] directories: u32, #[case] files: u32, #[case] expected: &str) {
        assert_eq!(summary(directories, files), expected);
    }
}
