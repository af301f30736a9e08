//! Rewrites template blocks into species blocks.

use grove_registry::WoodBlocks;
use grove_registry::wood::{NATURAL, PERSISTENT, TEMPLATE_LEAVES, TEMPLATE_LOG, TEMPLATE_WOOD};
use grove_utils::{Identifier, StructureTemplate};

/// The `DataVersion` stamped on generated structures.
///
/// Structures saved with an older version are run through the game's data
/// fixers when loaded. Stamping the target version skips that step.
pub const TARGET_DATA_VERSION: i32 = 2865;

/// Rewrites oak template blocks into the blocks of a target wood.
#[derive(Debug, Clone)]
pub struct BlockSubstitution {
    namespace: String,
    data_version: i32,
}

/// What a substitution changed, and what it could not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionReport {
    /// Palette entries rewritten to a species block.
    pub rewritten: usize,
    /// Palette identities that are not template blocks. Left unchanged.
    pub anomalies: Vec<Identifier>,
}

impl SubstitutionReport {
    /// True if every palette entry was a template block.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }
}

impl BlockSubstitution {
    /// Creates a substitution producing blocks in `namespace` and stamping `data_version`.
    #[must_use]
    pub fn new(namespace: impl Into<String>, data_version: i32) -> Self {
        Self {
            namespace: namespace.into(),
            data_version,
        }
    }

    /// Rewrites every template block in the palette of `template` to `wood`.
    ///
    /// Logs and wood become natural, leaves become non-persistent. Any other
    /// palette entry is kept as is and reported in
    /// [`SubstitutionReport::anomalies`].
    pub fn apply(&self, template: &mut StructureTemplate, wood: &str) -> SubstitutionReport {
        let blocks = WoodBlocks::new(&self.namespace, wood);
        let mut report = SubstitutionReport::default();

        for state in &mut template.palette {
            if state.name == TEMPLATE_LOG {
                state.name = blocks.log.clone();
                state.set_property(NATURAL, "true");
            } else if state.name == TEMPLATE_WOOD {
                state.name = blocks.wood.clone();
                state.set_property(NATURAL, "true");
            } else if state.name == TEMPLATE_LEAVES {
                state.name = blocks.leaves.clone();
                state.set_property(PERSISTENT, "false");
            } else {
                report.anomalies.push(state.name.clone());
                continue;
            }
            report.rewritten += 1;
        }

        template.data_version = Some(self.data_version);
        report
    }
}

impl Default for BlockSubstitution {
    fn default() -> Self {
        Self::new(grove_registry::wood::DEFAULT_NAMESPACE, TARGET_DATA_VERSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec3;
    use grove_utils::BlockState;

    fn template_with(names: &[&'static str]) -> StructureTemplate {
        let mut template = StructureTemplate::new(IVec3::new(1, names.len() as i32, 1));
        template.data_version = Some(2586);
        for (y, &name) in names.iter().enumerate() {
            template.push_block(
                BlockState::new(Identifier::vanilla_static(name)),
                IVec3::new(0, y as i32, 0),
            );
        }
        template
    }

    #[test]
    fn rewrites_every_template_block() {
        let mut template = template_with(&["oak_log", "oak_wood", "oak_leaves"]);
        let report = BlockSubstitution::default().apply(&mut template, "maple");

        assert!(report.is_clean());
        assert_eq!(report.rewritten, 3);
        assert!(template.palette.iter().all(|state| !state.name.is_vanilla()));

        let log = &template.palette[0];
        assert_eq!(log.name.to_string(), "tfc:wood/log/maple");
        assert_eq!(log.property(NATURAL), Some("true"));

        let wood = &template.palette[1];
        assert_eq!(wood.name.to_string(), "tfc:wood/wood/maple");
        assert_eq!(wood.property(NATURAL), Some("true"));

        let leaves = &template.palette[2];
        assert_eq!(leaves.name.to_string(), "tfc:wood/leaves/maple");
        assert_eq!(leaves.property(PERSISTENT), Some("false"));
    }

    #[test]
    fn keeps_existing_properties() {
        let mut template = StructureTemplate::new(IVec3::ONE);
        template.push_block(
            BlockState::new(TEMPLATE_LOG).with_property("axis", "x"),
            IVec3::ZERO,
        );
        template.push_block(
            BlockState::new(TEMPLATE_LEAVES)
                .with_property("distance", "2")
                .with_property(PERSISTENT, "true"),
            IVec3::Y,
        );

        BlockSubstitution::default().apply(&mut template, "oak");
        assert_eq!(template.palette[0].property("axis"), Some("x"));
        assert_eq!(template.palette[1].property("distance"), Some("2"));
        assert_eq!(template.palette[1].property(PERSISTENT), Some("false"));
    }

    #[test]
    fn unknown_blocks_are_reported_and_left_alone() {
        let mut template = template_with(&["oak_log", "stone", "oak_leaves"]);
        let report = BlockSubstitution::default().apply(&mut template, "birch");

        assert_eq!(report.rewritten, 2);
        assert_eq!(report.anomalies, [Identifier::vanilla_static("stone")]);
        assert_eq!(template.palette[1], BlockState::new(Identifier::vanilla_static("stone")));
        assert_eq!(template.blocks.len(), 3);
    }

    #[test]
    fn stamps_data_version() {
        let mut template = template_with(&["oak_log"]);
        BlockSubstitution::new("tfc", 3465).apply(&mut template, "pine");
        assert_eq!(template.data_version, Some(3465));

        BlockSubstitution::default().apply(&mut template, "pine");
        assert_eq!(template.data_version, Some(TARGET_DATA_VERSION));
    }

    #[test]
    fn namespace_is_configurable() {
        let mut template = template_with(&["oak_leaves"]);
        BlockSubstitution::new("afc", TARGET_DATA_VERSION).apply(&mut template, "rubber_fig");
        assert_eq!(template.palette[0].name.to_string(), "afc:wood/leaves/rubber_fig");
    }
}
