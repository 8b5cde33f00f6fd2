use clap::ValueEnum;

use crate::tree::StatFailurePolicy;

/// Command-line spelling of [`StatFailurePolicy`].
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum StatErrorMode {
    /// Stop listing the directory at the failing entry
    #[default]
    Abort,
    /// Skip the failing entry and keep going
    Skip,
}

impl From<StatErrorMode> for StatFailurePolicy {
    fn from(mode: StatErrorMode) -> Self {
        match mode {
            StatErrorMode::Abort => StatFailurePolicy::AbortDirectory,
            StatErrorMode::Skip => StatFailurePolicy::SkipEntry,
        }
    }
}
