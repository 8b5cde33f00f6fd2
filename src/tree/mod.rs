//! Concurrent construction and rendering of directory trees.
//!
//! [`TreeBuilder`] walks the filesystem on a pool of worker threads and
//! attaches what it finds to a tree of [`Node`]s, counting files and
//! directories in [`Statistics`] as it goes. The finished [`Tree`] renders to
//! box-drawing text with a [`TreeStyle`].

mod builder;
mod depth;
mod entry;
mod fs;
mod node;
mod statistics;
mod style;

pub use builder::{BuildError, BuildOptions, StatFailurePolicy, Tree, TreeBuilder};
pub use depth::DepthLimit;
pub use entry::{EntryAnnotator, EntryFilter, EntryKind, EntryMetadata, EntryRenderer};
pub use fs::{FileSystem, LocalFileSystem};
pub use node::Node;
pub use statistics::Statistics;
pub use style::TreeStyle;
