//! Stock collaborators for the tree builder: label decoration, size
//! annotations and entry filtering.

mod filters;
mod icons;
mod size;

pub use filters::{DirectoriesOnly, FilterChain, HiddenFilter};
pub use icons::IconRenderer;
pub use size::SizeAnnotator;
