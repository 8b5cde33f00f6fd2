use std::ffi::OsString;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::available_parallelism;

use compio::dispatcher::{Dispatcher, DispatcherBuilder};
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use futures_channel::oneshot;
use snafu::{ResultExt, Snafu};
use tracing::{debug, info, warn};

use crate::tree::{
    DepthLimit, EntryAnnotator, EntryFilter, EntryKind, EntryMetadata, EntryRenderer,
    FileSystem, LocalFileSystem, Node, Statistics, TreeStyle,
};

/// What to do with the rest of a directory when one entry cannot be stat'ed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatFailurePolicy {
    /// Record the error and stop at that entry. Entries stat'ed before it are
    /// still listed.
    #[default]
    AbortDirectory,
    /// Record the error and carry on with the remaining entries.
    SkipEntry,
}

#[derive(Clone, Default)]
pub struct BuildOptions {
    pub depth: DepthLimit,
    pub filter: Option<Arc<dyn EntryFilter>>,
    pub renderer: Option<Arc<dyn EntryRenderer>>,
    /// Fills the `[meta]` column of every entry it returns a value for.
    pub annotator: Option<Arc<dyn EntryAnnotator>>,
    pub stat_failure: StatFailurePolicy,
}

/// A fully built tree together with its counters.
#[derive(Debug)]
pub struct Tree {
    root: Arc<Node>,
    statistics: Arc<Statistics>,
}

impl Tree {
    pub fn root(&self) -> &Arc<Node> {
        &self.root
    }

    pub fn file_count(&self) -> u32 {
        self.statistics.files()
    }

    pub fn directory_count(&self) -> u32 {
        self.statistics.directories()
    }

    pub fn render(&self) -> String {
        self.root.render()
    }

    pub fn render_with(&self, style: &TreeStyle) -> String {
        self.root.render_with(style)
    }
}

/// Builds trees by expanding directories on a pool of dispatcher threads.
///
/// The number of worker threads bounds how many expansion tasks run at once;
/// the rest wait in the dispatcher queue.
pub struct TreeBuilder<F = LocalFileSystem> {
    dispatcher: Dispatcher,
    file_system: Arc<F>,
}

impl TreeBuilder<LocalFileSystem> {
    pub fn new(workers: Option<NonZeroUsize>) -> Result<Self, BuildError> {
        Self::with_file_system(LocalFileSystem, workers)
    }
}

impl<F: FileSystem> TreeBuilder<F> {
    pub fn with_file_system(file_system: F, workers: Option<NonZeroUsize>) -> Result<Self, BuildError> {
        let workers_num = workers.unwrap_or_else(Self::determine_worker_count);
        debug!("Using {} worker threads for directory expansion", workers_num);

        let dispatcher = DispatcherBuilder::new()
            .worker_threads(workers_num)
            .build()
            .context(DispatcherCreationSnafu)?;

        Ok(Self {
            dispatcher,
            file_system: Arc::new(file_system),
        })
    }

    fn determine_worker_count() -> NonZeroUsize {
        available_parallelism().unwrap_or(NonZeroUsize::MIN)
    }

    /// Walks `root_path` and returns the finished tree.
    ///
    /// Only a failure to stat the root is fatal. Every other filesystem error
    /// ends up as a leaf carrying the error text. Subdirectories and symlinks
    /// are attached in the order their tasks finish, so their relative order
    /// differs between runs; plain files keep listing order.
    pub async fn build(
        &self,
        root_path: impl AsRef<Path>,
        options: BuildOptions,
    ) -> Result<Tree, BuildError> {
        let root_path = root_path.as_ref();
        let root_entry = self.file_system.stat(root_path).context(RootStatSnafu {
            path: root_path.to_path_buf(),
        })?;

        let expander = Arc::new(Expander {
            file_system: Arc::clone(&self.file_system),
            statistics: Arc::new(Statistics::default()),
            filter: options.filter,
            renderer: options.renderer,
            annotator: options.annotator,
            stat_failure: options.stat_failure,
        });

        let label = root_path.display().to_string();
        let root = match root_entry.kind {
            EntryKind::Directory => {
                expander.statistics.record_directory();
                let root = expander.root(&root_entry, expander.directory_label(&label));
                let tasks = expander.expand(&root, root_path, options.depth);
                self.join(&expander, tasks).await?;
                root
            }
            EntryKind::Symlink | EntryKind::File => {
                expander.statistics.record_file();
                expander.root(&root_entry, expander.file_label(&label))
            }
        };

        info!(
            "Built tree for {}: {} directories, {} files",
            root_path.display(),
            expander.statistics.directories(),
            expander.statistics.files()
        );

        Ok(Tree {
            root,
            statistics: Arc::clone(&expander.statistics),
        })
    }

    /// Dispatches `tasks` and every follow-up they report, returning once all
    /// of them have completed.
    async fn join(&self, expander: &Arc<Expander<F>>, tasks: Vec<Task>) -> Result<(), BuildError> {
        let mut in_flight = FuturesUnordered::new();
        let mut failure = None;
        self.dispatch_all(expander, tasks, &mut in_flight, &mut failure);

        // After a failure nothing new is dispatched, but tasks already running
        // are still awaited so none of them outlives the build.
        while let Some(result) = in_flight.next().await {
            match result {
                Ok(follow_ups) if failure.is_none() => {
                    self.dispatch_all(expander, follow_ups, &mut in_flight, &mut failure);
                }
                Ok(_) => {}
                Err(source) => {
                    failure.get_or_insert(BuildError::TaskCanceled { source });
                }
            }
        }

        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn dispatch_all(
        &self,
        expander: &Arc<Expander<F>>,
        tasks: Vec<Task>,
        in_flight: &mut FuturesUnordered<oneshot::Receiver<Vec<Task>>>,
        failure: &mut Option<BuildError>,
    ) {
        for task in tasks {
            match self.dispatch(expander, task) {
                Ok(receiver) => in_flight.push(receiver),
                Err(err) => {
                    *failure = Some(err);
                    return;
                }
            }
        }
    }

    fn dispatch(
        &self,
        expander: &Arc<Expander<F>>,
        task: Task,
    ) -> Result<oneshot::Receiver<Vec<Task>>, BuildError> {
        let expander = Arc::clone(expander);
        self.dispatcher
            .dispatch(move || async move { expander.run(task) })
            .map_err(|e| BuildError::Dispatch {
                message: e.to_string(),
            })
    }
}

/// A unit of concurrent work.
enum Task {
    /// Attach `entry` as a branch of `parent` and expand it.
    Directory {
        parent: Arc<Node>,
        entry: EntryMetadata,
        depth: DepthLimit,
    },
    /// Resolve the link and attach it as a leaf of `parent`.
    Symlink {
        parent: Arc<Node>,
        entry: EntryMetadata,
        dir: PathBuf,
    },
}

/// State shared by every task of one build.
struct Expander<F> {
    file_system: Arc<F>,
    statistics: Arc<Statistics>,
    filter: Option<Arc<dyn EntryFilter>>,
    renderer: Option<Arc<dyn EntryRenderer>>,
    annotator: Option<Arc<dyn EntryAnnotator>>,
    stat_failure: StatFailurePolicy,
}

impl<F: FileSystem> Expander<F> {
    fn run(&self, task: Task) -> Vec<Task> {
        match task {
            Task::Directory {
                parent,
                entry,
                depth,
            } => {
                let branch = self.add_branch(&parent, &entry, self.directory_label(&entry.name));
                self.expand(&branch, &entry.path, depth)
            }
            Task::Symlink { parent, entry, dir } => {
                let label = match &self.renderer {
                    Some(renderer) => renderer.symlink(&entry.name, &dir),
                    None => entry.name.clone(),
                };
                self.add_leaf(&parent, &entry, label);
                Vec::new()
            }
        }
    }

    /// Fills `node` with the entries of `dir`. Plain files are attached
    /// immediately; directories and, when decorating, symlinks come back as
    /// tasks.
    fn expand(&self, node: &Arc<Node>, dir: &Path, depth: DepthLimit) -> Vec<Task> {
        if depth.is_exhausted() {
            return Vec::new();
        }

        let names = match self.file_system.list(dir) {
            Ok(names) => names,
            Err(err) => {
                warn!("Failed to list {}: {}", dir.display(), err);
                node.add_leaf(err.to_string());
                return Vec::new();
            }
        };

        let entries = self.collect_metadata(node, dir, names);
        let entries = match &self.filter {
            Some(filter) => filter.filter(entries),
            None => entries,
        };

        let mut tasks = Vec::new();
        for entry in entries {
            match entry.kind {
                EntryKind::Directory => {
                    self.statistics.record_directory();
                    tasks.push(Task::Directory {
                        parent: Arc::clone(node),
                        entry,
                        depth: depth.descend(),
                    });
                }
                EntryKind::Symlink => {
                    self.statistics.record_file();
                    if self.renderer.is_some() {
                        tasks.push(Task::Symlink {
                            parent: Arc::clone(node),
                            entry,
                            dir: dir.to_path_buf(),
                        });
                    } else {
                        self.add_leaf(node, &entry, entry.name.clone());
                    }
                }
                EntryKind::File => {
                    self.statistics.record_file();
                    self.add_leaf(node, &entry, self.file_label(&entry.name));
                }
            }
        }
        tasks
    }

    fn collect_metadata(&self, node: &Arc<Node>, dir: &Path, names: Vec<OsString>) -> Vec<EntryMetadata> {
        let mut entries = Vec::with_capacity(names.len());
        for name in names {
            let path = dir.join(&name);
            match self.file_system.entry_metadata(&path) {
                Ok(entry) => entries.push(entry),
                Err(err) => {
                    warn!("Failed to stat {}: {}", path.display(), err);
                    node.add_leaf(err.to_string());
                    if self.stat_failure == StatFailurePolicy::AbortDirectory {
                        debug!("Skipping the remaining entries of {}", dir.display());
                        break;
                    }
                }
            }
        }
        entries
    }

    fn annotation(&self, entry: &EntryMetadata) -> Option<String> {
        self.annotator
            .as_ref()
            .and_then(|annotator| annotator.annotate(entry))
    }

    fn root(&self, entry: &EntryMetadata, label: String) -> Arc<Node> {
        match self.annotation(entry) {
            Some(meta) => Node::annotated_root(meta, label),
            None => Node::root(label),
        }
    }

    fn add_branch(&self, parent: &Arc<Node>, entry: &EntryMetadata, label: String) -> Arc<Node> {
        match self.annotation(entry) {
            Some(meta) => parent.add_annotated_branch(meta, label),
            None => parent.add_branch(label),
        }
    }

    fn add_leaf(&self, parent: &Arc<Node>, entry: &EntryMetadata, label: String) {
        match self.annotation(entry) {
            Some(meta) => parent.add_annotated_leaf(meta, label),
            None => parent.add_leaf(label),
        };
    }

    fn directory_label(&self, name: &str) -> String {
        match &self.renderer {
            Some(renderer) => renderer.dir_icon(name),
            None => name.to_string(),
        }
    }

    fn file_label(&self, name: &str) -> String {
        match &self.renderer {
            Some(renderer) => renderer.by_ext_icon(name),
            None => name.to_string(),
        }
    }
}

#[derive(Debug, Snafu)]
pub enum BuildError {
    #[snafu(display("Cannot access {}", path.display()))]
    RootStat {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to create the worker pool"))]
    DispatcherCreation { source: std::io::Error },
    #[snafu(display("Failed to dispatch an expansion task: {}", message))]
    Dispatch { message: String },
    #[snafu(display("An expansion task was lost before completing"))]
    TaskCanceled { source: oneshot::Canceled },
}
