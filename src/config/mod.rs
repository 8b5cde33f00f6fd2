mod file_config;

pub use file_config::{ConfigError, ConfigSource, FileConfig};
