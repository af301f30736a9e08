//! Generator configuration, read from a JSON5 file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use grove_registry::wood::DEFAULT_NAMESPACE;
use serde::Deserialize;
use thiserror::Error;

use crate::substitution::TARGET_DATA_VERSION;

/// The config file read when none is given explicitly.
pub const DEFAULT_CONFIG_PATH: &str = "grove.json5";

/// An error raised while loading the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// The config file.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
    /// The file is not valid JSON5 or has unexpected fields.
    #[error("invalid config {path}: {message}")]
    Parse {
        /// The config file.
        path: PathBuf,
        /// The parser's message.
        message: String,
    },
}

/// Paths and output settings of a generator run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GroveConfig {
    /// Directory holding the oak templates, one `<name>.nbt` per template.
    pub templates_dir: PathBuf,
    /// Structures root. Each species gets a subdirectory.
    pub output_dir: PathBuf,
    /// Catalog file replacing the embedded one.
    pub catalog: Option<PathBuf>,
    /// Namespace of the species blocks.
    pub namespace: String,
    /// `DataVersion` stamped on generated structures.
    pub data_version: i32,
    /// Report outcomes without writing anything.
    pub dry_run: bool,
}

impl Default for GroveConfig {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from("structure_templates"),
            output_dir: PathBuf::from("../src/main/resources/data/tfc/structures"),
            catalog: None,
            namespace: DEFAULT_NAMESPACE.to_owned(),
            data_version: TARGET_DATA_VERSION,
            dry_run: false,
        }
    }
}

impl GroveConfig {
    /// Parses a config from JSON5 text. `origin` is only used in error messages.
    pub fn from_json5(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        serde_json5::from_str(text).map_err(|e| ConfigError::Parse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Reads a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json5(&text, path)
    }

    /// Reads `path` if it exists, otherwise returns the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            log::debug!("Loading config from {}", path.display());
            Self::load(path)
        } else {
            log::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}
