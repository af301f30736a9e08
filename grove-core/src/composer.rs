//! Expands catalog entries into generation jobs.
//!
//! Template and output names follow the layout of the template directory:
//!
//! | feature   | template                  | output          |
//! |-----------|---------------------------|-----------------|
//! | `random`  | `<variant><i>`            | `<i>`           |
//! | `overlay` | `<variant>`               | `base`          |
//! |           | `<variant>_overlay`       | `overlay`       |
//! | `stacked` | `<variant>_layer<j>_<i>`  | `layer<j>_<i>`  |
//!
//! Indices are 1-based.

use std::path::{Path, PathBuf};

use grove_registry::{TreeCount, TreeFeature, TreeSize, TreeSpec};
use thiserror::Error;

/// A catalog entry that cannot be expanded. These are catalog defects and abort the run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    /// The count does not have the shape the feature needs.
    #[error("tree `{species}` uses feature `{feature}` but has count {count:?}")]
    CountMismatch {
        /// The species name.
        species: String,
        /// The feature of the catalog entry.
        feature: TreeFeature,
        /// The count as given.
        count: TreeCount,
    },
    /// The count is well-formed but yields no templates.
    #[error("tree `{species}` has no templates to generate")]
    EmptyCount {
        /// The species name.
        species: String,
    },
}

/// One template to rewrite into one output structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationJob {
    /// Template name, without the `.nbt` extension.
    pub source: String,
    /// Wood the template is rewritten to.
    pub wood: String,
    /// Output structure name, without the `.nbt` extension.
    pub destination: String,
    /// Output directory, relative to the structures root.
    pub directory: String,
}

impl GenerationJob {
    /// The output file of this job under `root`.
    #[must_use]
    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(&self.directory)
            .join(format!("{}.nbt", self.destination))
    }
}

/// The overlay template belonging to an `overlay` variant.
#[must_use]
pub fn overlay_template(variant: &str) -> String {
    format!("{variant}_overlay")
}

/// Expands `spec` into its jobs for the given size class.
pub fn compose(spec: &TreeSpec, size: TreeSize) -> Result<Vec<GenerationJob>, ComposeError> {
    let directory = size.directory(&spec.name);
    let job = |source: String, destination: String| GenerationJob {
        source,
        wood: spec.name.clone(),
        destination,
        directory: directory.clone(),
    };

    let jobs: Vec<GenerationJob> = match (spec.feature, &spec.count) {
        (TreeFeature::Random, TreeCount::Single(count)) => (1..=*count)
            .map(|i| job(format!("{}{i}", spec.variant), i.to_string()))
            .collect(),
        (TreeFeature::Overlay, _) => vec![
            job(spec.variant.clone(), "base".to_owned()),
            job(overlay_template(&spec.variant), "overlay".to_owned()),
        ],
        (TreeFeature::Stacked, TreeCount::Layers(layers)) => layers
            .iter()
            .zip(1..)
            .flat_map(|(&count, layer)| {
                (1..=count).map(move |i| (layer, i))
            })
            .map(|(layer, i)| {
                job(
                    format!("{}_layer{layer}_{i}", spec.variant),
                    format!("layer{layer}_{i}"),
                )
            })
            .collect(),
        (feature, count) => {
            return Err(ComposeError::CountMismatch {
                species: spec.name.clone(),
                feature,
                count: count.clone(),
            });
        }
    };

    if jobs.is_empty() {
        return Err(ComposeError::EmptyCount {
            species: spec.name.clone(),
        });
    }
    Ok(jobs)
}
