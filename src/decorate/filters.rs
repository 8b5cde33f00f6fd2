use crate::tree::{EntryFilter, EntryKind, EntryMetadata};

/// Drops dot-entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct HiddenFilter;

impl EntryFilter for HiddenFilter {
    fn filter(&self, entries: Vec<EntryMetadata>) -> Vec<EntryMetadata> {
        entries.into_iter().filter(|entry| !entry.is_hidden()).collect()
    }
}

/// Keeps only directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoriesOnly;

impl EntryFilter for DirectoriesOnly {
    fn filter(&self, entries: Vec<EntryMetadata>) -> Vec<EntryMetadata> {
        entries
            .into_iter()
            .filter(|entry| entry.kind == EntryKind::Directory)
            .collect()
    }
}

/// Applies several filters in order.
#[derive(Default)]
pub struct FilterChain {
    filters: Vec<Box<dyn EntryFilter>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, filter: impl EntryFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl EntryFilter for FilterChain {
    fn filter(&self, entries: Vec<EntryMetadata>) -> Vec<EntryMetadata> {
        self.filters
            .iter()
            .fold(entries, |entries, filter| filter.filter(entries))
    }
}
