mod path_ext;

pub use path_ext::PathNameExt;
