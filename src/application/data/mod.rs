mod color_mode;
mod log_level;
mod stat_error_mode;
mod style_name;

pub use color_mode::ColorMode;
pub use log_level::LogLevel;
pub use stat_error_mode::StatErrorMode;
pub use style_name::StyleName;
