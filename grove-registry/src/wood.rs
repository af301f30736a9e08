//! Block identities of tree templates and of the species they are rewritten to.
//!
//! Templates are built in-game from oak blocks. Each oak block is a stand-in for
//! the matching block of the target wood.

use grove_utils::Identifier;

/// The log block templates are built with.
pub const TEMPLATE_LOG: Identifier = Identifier::vanilla_static("oak_log");
/// The wood (bark on all sides) block templates are built with.
pub const TEMPLATE_WOOD: Identifier = Identifier::vanilla_static("oak_wood");
/// The leaves block templates are built with.
pub const TEMPLATE_LEAVES: Identifier = Identifier::vanilla_static("oak_leaves");

/// Marks logs and wood as part of a generated tree rather than player-placed.
pub const NATURAL: &str = "natural";
/// Leaves with `persistent=false` decay when cut off from logs.
pub const PERSISTENT: &str = "persistent";

/// The namespace species blocks live in unless configured otherwise.
pub const DEFAULT_NAMESPACE: &str = "tfc";

/// The three block identities of one wood type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WoodBlocks {
    /// `<namespace>:wood/log/<wood>`
    pub log: Identifier,
    /// `<namespace>:wood/wood/<wood>`
    pub wood: Identifier,
    /// `<namespace>:wood/leaves/<wood>`
    pub leaves: Identifier,
}

impl WoodBlocks {
    /// Builds the identities of `wood` in `namespace`.
    #[must_use]
    pub fn new(namespace: &str, wood: &str) -> Self {
        let block = |kind: &str| Identifier::new(namespace.to_owned(), format!("wood/{kind}/{wood}"));
        Self {
            log: block("log"),
            wood: block("wood"),
            leaves: block("leaves"),
        }
    }
}
