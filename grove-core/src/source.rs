//! Where templates are loaded from.

use std::io;
use std::path::{Path, PathBuf};

use grove_utils::{StructureError, StructureTemplate};
use rustc_hash::FxHashMap;

/// A named collection of structure templates.
pub trait TemplateSource {
    /// Loads the template called `name`. Each call returns a fresh copy the caller owns.
    fn load(&self, name: &str) -> Result<StructureTemplate, StructureError>;
}

/// Templates stored as `<root>/<name>.nbt`.
#[derive(Debug, Clone)]
pub struct TemplateDirectory {
    root: PathBuf,
}

impl TemplateDirectory {
    /// Creates a source reading from `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory templates are read from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file the template `name` is read from.
    #[must_use]
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.nbt"))
    }
}

impl TemplateSource for TemplateDirectory {
    fn load(&self, name: &str) -> Result<StructureTemplate, StructureError> {
        StructureTemplate::load(self.path_of(name))
    }
}

impl TemplateSource for FxHashMap<String, StructureTemplate> {
    fn load(&self, name: &str) -> Result<StructureTemplate, StructureError> {
        self.get(name).cloned().ok_or_else(|| {
            StructureError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no template named `{name}`"),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_maps_names_to_nbt_files() {
        let templates = TemplateDirectory::new("structure_templates");
        assert_eq!(
            templates.path_of("normal_overlay"),
            Path::new("structure_templates/normal_overlay.nbt")
        );
    }

    #[test]
    fn missing_template_is_not_found() {
        let templates: FxHashMap<String, StructureTemplate> = FxHashMap::default();
        let Err(StructureError::Io(err)) = templates.load("acacia1") else {
            panic!("expected a not-found error");
        };
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
