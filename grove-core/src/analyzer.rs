//! Sapling drop chances from template leaf counts.
//!
//! Breaking every leaf of a tree should yield [`SAPLINGS_PER_TREE`] saplings on
//! average, so the per-leaf drop chance is that constant divided by the expected
//! number of leaves in one generated tree.
//!
//! - `random` trees pick one of their templates uniformly, so the expected leaf
//!   count is the mean over all templates.
//! - `overlay` trees place the overlay on top of the base with 50% integrity.
//!   Each overlay leaf on a new position adds half a leaf; each overlay leaf on a
//!   position the base already has leaves at takes half a leaf away.
//! - `stacked` trees have no defined counting policy.

use std::fmt::{self, Display, Formatter};

use glam::IVec3;
use grove_registry::wood::TEMPLATE_LEAVES;
use grove_registry::{TreeFeature, TreeSize, TreeSpec};
use grove_utils::{StructureError, StructureTemplate};
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::composer::{ComposeError, compose, overlay_template};
use crate::source::TemplateSource;

/// Expected saplings from fully harvesting the leaves of one tree.
pub const SAPLINGS_PER_TREE: f64 = 2.5;

/// An error raised while computing leaf statistics.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The feature has no leaf counting policy.
    #[error("leaf statistics are not implemented for `{feature}` trees (`{species}`)")]
    Unsupported {
        /// The species name.
        species: String,
        /// The unsupported feature.
        feature: TreeFeature,
    },
    /// The catalog entry could not be expanded into template names.
    #[error(transparent)]
    Compose(#[from] ComposeError),
    /// A template could not be loaded.
    #[error("failed to load template `{name}`: {source}")]
    Template {
        /// The template name.
        name: String,
        /// The underlying error.
        source: StructureError,
    },
    /// The templates contain no leaves, so no drop chance exists.
    #[error("tree `{0}` has no leaves")]
    NoLeaves(String),
}

/// The leaf statistic of one species.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafStatistics {
    /// The species name.
    pub species: String,
    /// Expected leaf blocks in one generated tree.
    pub average_leaves: f64,
}

impl LeafStatistics {
    /// The chance a single broken leaf drops a sapling.
    #[must_use]
    pub fn sapling_chance(&self) -> f64 {
        SAPLINGS_PER_TREE / self.average_leaves
    }
}

impl Display for LeafStatistics {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.4}", self.species, self.sapling_chance())
    }
}

/// Counts template leaves for catalog specs.
pub struct LeafAnalyzer<'a, S: TemplateSource + ?Sized> {
    templates: &'a S,
}

impl<'a, S: TemplateSource + ?Sized> LeafAnalyzer<'a, S> {
    /// Creates an analyzer reading templates from `templates`.
    pub const fn new(templates: &'a S) -> Self {
        Self { templates }
    }

    /// Computes the leaf statistic of `spec`, using its normal-size templates.
    pub fn analyze(&self, spec: &TreeSpec) -> Result<LeafStatistics, AnalysisError> {
        let average_leaves = match spec.feature {
            TreeFeature::Random => self.random_tree_leaves(spec)?,
            TreeFeature::Overlay => self.overlay_tree_leaves(&spec.variant)?,
            TreeFeature::Stacked => {
                return Err(AnalysisError::Unsupported {
                    species: spec.name.clone(),
                    feature: spec.feature,
                });
            }
        };

        if average_leaves <= 0.0 {
            return Err(AnalysisError::NoLeaves(spec.name.clone()));
        }
        Ok(LeafStatistics {
            species: spec.name.clone(),
            average_leaves,
        })
    }

    fn random_tree_leaves(&self, spec: &TreeSpec) -> Result<f64, AnalysisError> {
        let jobs = compose(spec, TreeSize::Normal)?;
        let mut total = 0usize;
        for job in &jobs {
            total += count_leaves(&self.load(&job.source)?);
        }
        Ok(total as f64 / jobs.len() as f64)
    }

    fn overlay_tree_leaves(&self, variant: &str) -> Result<f64, AnalysisError> {
        let base = self.load(variant)?;
        let overlay = self.load(&overlay_template(variant))?;
        Ok(overlay_leaf_count(&base, &overlay))
    }

    fn load(&self, name: &str) -> Result<StructureTemplate, AnalysisError> {
        self.templates
            .load(name)
            .map_err(|source| AnalysisError::Template {
                name: name.to_owned(),
                source,
            })
    }
}

/// Palette indices of template leaves.
fn leaf_states(template: &StructureTemplate) -> FxHashSet<u32> {
    template.palette_indices(|state| state.name == TEMPLATE_LEAVES)
}

/// Number of template leaf blocks in `template`.
#[must_use]
pub fn count_leaves(template: &StructureTemplate) -> usize {
    let leaves = leaf_states(template);
    template.blocks_with_states(&leaves).count()
}

/// Expected leaf count of a base structure with an overlay at 50% integrity.
///
/// Overlay blocks are classified as leaves by the base palette's leaf indices.
#[must_use]
pub fn overlay_leaf_count(base: &StructureTemplate, overlay: &StructureTemplate) -> f64 {
    let base_leaves = leaf_states(base);
    let positions: FxHashSet<IVec3> = base
        .blocks_with_states(&base_leaves)
        .map(|block| block.pos)
        .collect();

    overlay
        .blocks_with_states(&base_leaves)
        .fold(positions.len() as f64, |count, block| {
            if positions.contains(&block.pos) {
                count - 0.5
            } else {
                count + 0.5
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use grove_registry::wood::TEMPLATE_LOG;
    use grove_utils::BlockState;
    use rustc_hash::FxHashMap;

    fn tree(leaves: &[IVec3]) -> StructureTemplate {
        let mut template = StructureTemplate::new(IVec3::new(5, 8, 5));
        template.push_block(BlockState::new(TEMPLATE_LOG), IVec3::new(2, 0, 2));
        for &pos in leaves {
            template.push_block(
                BlockState::new(TEMPLATE_LEAVES).with_property("distance", "1"),
                pos,
            );
        }
        template
    }

    fn row(y: i32, count: i32) -> Vec<IVec3> {
        (0..count).map(|x| IVec3::new(x, y, 0)).collect()
    }

    #[test]
    fn random_tree_averages_over_templates() {
        let mut templates = FxHashMap::default();
        for i in 1..=35 {
            // 10, 14, 10, 14, ... with one extra 12: mean 12.
            let leaves = match i {
                35 => 12,
                i if i % 2 == 0 => 14,
                _ => 10,
            };
            templates.insert(format!("acacia{i}"), tree(&row(3, leaves)));
        }

        let stats = LeafAnalyzer::new(&templates)
            .analyze(&TreeSpec::random("acacia", "acacia", 35))
            .expect("all templates present");
        assert!((stats.average_leaves - 12.0).abs() < f64::EPSILON);
        assert_eq!(stats.to_string(), "acacia: 0.2083");
    }

    #[test]
    fn leaves_are_matched_through_the_palette() {
        let mut template = tree(&row(4, 3));
        template.push_block(BlockState::new(TEMPLATE_LOG), IVec3::new(2, 1, 2));
        template.push_block(
            BlockState::new(TEMPLATE_LEAVES).with_property("distance", "2"),
            IVec3::new(0, 5, 0),
        );
        assert_eq!(count_leaves(&template), 4);
    }

    #[test]
    fn identical_overlay_matches_base_count() {
        let base = tree(&row(3, 6));
        let overlay = StructureTemplate::new(IVec3::new(5, 8, 5));
        assert!((overlay_leaf_count(&base, &overlay) - 6.0).abs() < f64::EPSILON);

        let mut logs_only = StructureTemplate::new(IVec3::new(5, 8, 5));
        logs_only.push_block(BlockState::new(TEMPLATE_LOG), IVec3::new(0, 3, 0));
        assert!((overlay_leaf_count(&base, &logs_only) - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn overlay_adds_and_removes_half_leaves() {
        let base = tree(&row(3, 6));
        // Two leaves on new positions, one on a base leaf position.
        let overlay = tree(&[IVec3::new(0, 4, 0), IVec3::new(1, 4, 0), IVec3::new(0, 3, 0)]);
        assert!((overlay_leaf_count(&base, &overlay) - 6.5).abs() < f64::EPSILON);
    }

    #[test]
    fn overlay_is_classified_by_base_palette() {
        let base = tree(&row(3, 2));
        // The overlay palette is ordered leaves, log: the reverse of the base's.
        // State 1 is a leaf index in the base, so the overlay log over a base
        // leaf takes half a leaf away and the overlay leaf (state 0) is ignored.
        let mut overlay = StructureTemplate::new(IVec3::new(5, 8, 5));
        overlay.push_block(BlockState::new(TEMPLATE_LEAVES), IVec3::new(4, 4, 4));
        overlay.push_block(BlockState::new(TEMPLATE_LOG), IVec3::new(0, 3, 0));
        assert!((overlay_leaf_count(&base, &overlay) - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn overlay_tree_loads_base_and_overlay() {
        let mut templates = FxHashMap::default();
        templates.insert("tall".to_owned(), tree(&row(5, 8)));
        templates.insert("tall_overlay".to_owned(), tree(&row(6, 2)));

        let stats = LeafAnalyzer::new(&templates)
            .analyze(&TreeSpec::overlay("oak", "tall"))
            .expect("both templates present");
        assert!((stats.average_leaves - 9.0).abs() < f64::EPSILON);
        assert_eq!(stats.to_string(), "oak: 0.2778");
    }

    #[test]
    fn stacked_trees_are_unsupported() {
        let templates: FxHashMap<String, StructureTemplate> = FxHashMap::default();
        let err = LeafAnalyzer::new(&templates)
            .analyze(&TreeSpec::stacked("spruce", "conifer_large", &[3, 3, 3]))
            .expect_err("no policy for stacked trees");
        assert!(matches!(
            err,
            AnalysisError::Unsupported {
                feature: TreeFeature::Stacked,
                ..
            }
        ));
    }

    #[test]
    fn missing_template_names_the_template() {
        let mut templates = FxHashMap::default();
        templates.insert("normal".to_owned(), tree(&row(3, 4)));

        let err = LeafAnalyzer::new(&templates)
            .analyze(&TreeSpec::overlay("ash", "normal"))
            .expect_err("overlay template is missing");
        assert!(matches!(err, AnalysisError::Template { ref name, .. } if name == "normal_overlay"));
    }

    #[test]
    fn leafless_tree_has_no_drop_chance() {
        let mut templates = FxHashMap::default();
        templates.insert("willow1".to_owned(), tree(&[]));

        let err = LeafAnalyzer::new(&templates)
            .analyze(&TreeSpec::random("willow", "willow", 1))
            .expect_err("no leaves");
        assert!(matches!(err, AnalysisError::NoLeaves(species) if species == "willow"));
    }
}
