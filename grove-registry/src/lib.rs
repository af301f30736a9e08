//! Static tree data: the species catalog and the wood block identities.
//!
//! The catalog ships as `build_assets/trees.json`, embedded at compile time. A
//! replacement file with the same layout can be loaded with [`Catalog::load`].

mod catalog;
mod trees;
pub mod wood;

pub use catalog::{Catalog, CatalogError, VANILLA_TREES_JSON};
pub use trees::{TreeCount, TreeFeature, TreeSize, TreeSpec, UnknownFeature};
pub use wood::WoodBlocks;
