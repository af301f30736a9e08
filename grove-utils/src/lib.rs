//! Shared types for the grove workspace.
//!
//! # Key Types
//!
//! - [`Identifier`] - A namespaced resource location such as `minecraft:oak_log`
//! - [`StructureTemplate`] - A structure file: palette, blocks and the tags we carry through
//! - [`BlockState`] - A palette entry (block name + properties)

mod identifier;
pub mod structure;

pub use identifier::{Identifier, IdentifierError};
pub use structure::{BlockState, StructureBlock, StructureError, StructureTemplate};
