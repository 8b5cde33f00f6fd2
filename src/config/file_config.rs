use std::borrow::Cow;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::debug;

use crate::application::data::StyleName;
use crate::ext::PathNameExt;
use crate::tree::TreeStyle;

const CONFIG_DIR_NAME: &str = "canopy";
const CONFIG_FILE_NAME: &str = "canopy.yaml";

type Mapping<'input> = LinkedHashMap<Yaml<'input>, Yaml<'input>>;

/// Where the config file comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `<config dir>/canopy/canopy.yaml`, silently skipped when absent.
    Default,
    /// A file the user asked for; it has to exist.
    Explicit(PathBuf),
    Disabled,
}

/// Settings read from the YAML config file. Every field is optional and is
/// overridden by the matching command-line flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    pub depth: Option<i64>,
    pub workers: Option<NonZeroUsize>,
    pub icons: Option<bool>,
    pub all: Option<bool>,
    pub size: Option<bool>,
    pub style: Option<StyleName>,
    pub tree_style: Option<TreeStyle>,
}

impl FileConfig {
    pub async fn load(source: &ConfigSource) -> Result<Self, ConfigError> {
        match source {
            ConfigSource::Disabled => Ok(Self::default()),
            ConfigSource::Explicit(path) => Self::from_path(path).await,
            ConfigSource::Default => match default_config_path() {
                Some(path) if path.is_file() => Self::from_path(&path).await,
                _ => {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub async fn from_path(path: &Path) -> Result<Self, ConfigError> {
        debug!("Reading config file: {}", path.best_effort_display());
        let bytes = compio::fs::read(path).await.context(ReadSnafu {
            file_path: path.best_effort_display(),
        })?;
        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.best_effort_display(),
        })?;
        contents.as_str().try_into()
    }

    fn parse_tree_style(top_level: &Mapping<'_>) -> Result<Option<TreeStyle>, ConfigError> {
        let Some(value) = field(top_level, "tree_style") else {
            return Ok(None);
        };
        let mapping = value.as_mapping().context(InvalidFieldSnafu {
            field: "tree_style",
            expected: "a map",
        })?;

        let mut style = TreeStyle::default();
        let slots = [
            ("child", &mut style.mid),
            ("last_child", &mut style.end),
            ("link", &mut style.link),
            ("empty", &mut style.blank),
        ];
        for (key, slot) in slots {
            if let Some(value) = field(mapping, key) {
                *slot = string(value, &format!("tree_style.{key}"))?;
            }
        }
        Ok(Some(style))
    }
}

impl TryFrom<&str> for FileConfig {
    type Error = ConfigError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let Some(document) = documents.first() else {
            return Ok(Self::default());
        };
        if matches!(document, Yaml::Value(Scalar::Null)) {
            return Ok(Self::default());
        }
        let top_level = document.as_mapping().context(TopLevelNotMapSnafu)?;

        let style = field(top_level, "style")
            .map(|value| {
                let name = string(value, "style")?;
                StyleName::from_str(&name, true).map_err(|_| ConfigError::InvalidField {
                    field: "style".to_string(),
                    expected: "one of unicode, ascii, rounded",
                })
            })
            .transpose()?;

        let workers = field(top_level, "workers")
            .map(|value| {
                let workers = integer(value, "workers")?;
                usize::try_from(workers)
                    .ok()
                    .and_then(NonZeroUsize::new)
                    .context(InvalidFieldSnafu {
                        field: "workers",
                        expected: "a positive integer",
                    })
            })
            .transpose()?;

        Ok(Self {
            depth: field(top_level, "depth")
                .map(|value| integer(value, "depth"))
                .transpose()?,
            workers,
            icons: field(top_level, "icons")
                .map(|value| boolean(value, "icons"))
                .transpose()?,
            all: field(top_level, "all")
                .map(|value| boolean(value, "all"))
                .transpose()?,
            size: field(top_level, "size")
                .map(|value| boolean(value, "size"))
                .transpose()?,
            style,
            tree_style: Self::parse_tree_style(top_level)?,
        })
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

fn field<'a, 'input>(mapping: &'a Mapping<'input>, key: &'static str) -> Option<&'a Yaml<'input>> {
    mapping.get(&Yaml::Value(Scalar::String(Cow::Borrowed(key))))
}

fn boolean(value: &Yaml<'_>, name: &str) -> Result<bool, ConfigError> {
    match value {
        Yaml::Value(Scalar::Boolean(flag)) => Ok(*flag),
        _ => InvalidFieldSnafu {
            field: name,
            expected: "a boolean",
        }
        .fail(),
    }
}

fn integer(value: &Yaml<'_>, name: &str) -> Result<i64, ConfigError> {
    match value {
        Yaml::Value(Scalar::Integer(number)) => Ok(*number),
        _ => InvalidFieldSnafu {
            field: name,
            expected: "an integer",
        }
        .fail(),
    }
}

fn string(value: &Yaml<'_>, name: &str) -> Result<String, ConfigError> {
    match value {
        Yaml::Value(Scalar::String(text)) => Ok(text.to_string()),
        _ => InvalidFieldSnafu {
            field: name,
            expected: "a string",
        }
        .fail(),
    }
}

#[derive(Debug, Snafu)]
pub enum ConfigError {
    #[snafu(display("Failed to read the config file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Config file {} is not valid UTF-8", file_path))]
    EncodingError {
        file_path: String,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the config file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Top level of config should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Config field '{}' should be {}", field, expected))]
    InvalidField {
        field: String,
        expected: &'static str,
    },
}
