use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::trees::{TreeSize, TreeSpec};

/// The embedded catalog, from `build_assets/trees.json`.
pub const VANILLA_TREES_JSON: &str = include_str!("../build_assets/trees.json");

/// An error raised while loading a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
    /// The catalog is not valid JSON or contains an invalid entry.
    #[error("invalid tree catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The normal and large tree lists.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Catalog {
    /// Regular trees. Sapling drop chances are computed for these.
    pub normal: Vec<TreeSpec>,
    /// Large tree variants.
    #[serde(default)]
    pub large: Vec<TreeSpec>,
}

impl Catalog {
    /// Parses the embedded catalog.
    pub fn vanilla() -> Result<Self, CatalogError> {
        Self::from_json(VANILLA_TREES_JSON)
    }

    /// Parses a catalog from JSON text.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        log::debug!(
            "Parsed tree catalog: {} normal, {} large",
            catalog.normal.len(),
            catalog.large.len()
        );
        Ok(catalog)
    }

    /// Reads and parses a catalog file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The specs of one size class.
    #[must_use]
    pub fn specs(&self, size: TreeSize) -> &[TreeSpec] {
        match size {
            TreeSize::Normal => &self.normal,
            TreeSize::Large => &self.large,
        }
    }

    /// All specs with their size class, normal trees first.
    pub fn iter(&self) -> impl Iterator<Item = (TreeSize, &TreeSpec)> {
        TreeSize::ALL
            .into_iter()
            .flat_map(move |size| self.specs(size).iter().map(move |spec| (size, spec)))
    }
}
