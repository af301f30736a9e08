//! Structure template files.
//!
//! A structure file is a gzip-compressed NBT compound with a `palette` of block
//! states and a list of `blocks`, each pointing into the palette by index. This
//! module models the parts of that compound the generator reads or rewrites and
//! carries every other root tag through unchanged.
//!
//! Equality on [`StructureTemplate`] is structural: the block list is compared in
//! order, while block state properties are compared as a key/value map. Nested
//! compounds (block entity data, unmodelled root tags) have their keys sorted on
//! read. Two files whose compressed bytes differ can still compare equal.

mod block_state;
mod nbt;

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use glam::IVec3;
use rustc_hash::FxHashSet;
use simdnbt::owned::{NbtCompound, NbtTag};
use thiserror::Error;

pub use block_state::BlockState;

/// An error raised while reading or writing a structure file.
#[derive(Error, Debug)]
pub enum StructureError {
    /// Reading or writing the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The bytes are not valid NBT.
    #[error("malformed NBT: {0}")]
    Nbt(#[from] simdnbt::Error),
    /// The NBT document has no root compound.
    #[error("structure file has no root compound")]
    EmptyDocument,
    /// A required root or entry field is absent.
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    /// A field is present but has the wrong type or an out-of-range value.
    #[error("invalid field `{field}`: {reason}")]
    InvalidField {
        /// The NBT key of the offending field.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },
}

/// One positioned block of a structure.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureBlock {
    /// Index into the owning template's palette.
    pub state: u32,
    /// Position relative to the structure origin.
    pub pos: IVec3,
    /// Block entity data, if the block carries any.
    pub nbt: Option<NbtCompound>,
}

impl StructureBlock {
    /// Creates a block without block entity data.
    #[must_use]
    pub const fn new(state: u32, pos: IVec3) -> Self {
        Self {
            state,
            pos,
            nbt: None,
        }
    }
}

/// A loaded structure file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructureTemplate {
    /// The `DataVersion` the file was saved with.
    pub data_version: Option<i32>,
    /// The bounding box size.
    pub size: IVec3,
    /// Distinct block states, referenced by index from [`Self::blocks`].
    pub palette: Vec<BlockState>,
    /// Positioned blocks, in file order.
    pub blocks: Vec<StructureBlock>,
    /// Root tags not modelled above (`entities` and anything else), keyed by name.
    pub other: BTreeMap<String, NbtTag>,
}

impl StructureTemplate {
    /// Creates an empty template with the given bounding box size.
    #[must_use]
    pub fn new(size: IVec3) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Places `state` at `pos`, reusing an equal palette entry if one exists.
    pub fn push_block(&mut self, state: BlockState, pos: IVec3) {
        let index = match self.palette.iter().position(|entry| *entry == state) {
            Some(index) => index,
            None => {
                self.palette.push(state);
                self.palette.len() - 1
            }
        };
        self.blocks.push(StructureBlock::new(index as u32, pos));
    }

    /// Returns the palette indices whose state satisfies `predicate`.
    pub fn palette_indices(&self, predicate: impl Fn(&BlockState) -> bool) -> FxHashSet<u32> {
        self.palette
            .iter()
            .enumerate()
            .filter(|(_, state)| predicate(state))
            .map(|(index, _)| index as u32)
            .collect()
    }

    /// Iterates the blocks whose palette index is in `states`.
    pub fn blocks_with_states<'a>(
        &'a self,
        states: &'a FxHashSet<u32>,
    ) -> impl Iterator<Item = &'a StructureBlock> + 'a {
        self.blocks
            .iter()
            .filter(move |block| states.contains(&block.state))
    }

    /// Decodes a structure from file bytes, gzip-compressed or raw.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StructureError> {
        let root = nbt::read_root(bytes)?;
        nbt::template_from_compound(&root)
    }

    /// Encodes the structure as gzip-compressed NBT.
    pub fn to_bytes(&self) -> Result<Vec<u8>, StructureError> {
        nbt::write_root(nbt::template_to_compound(self))
    }

    /// Loads a structure file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StructureError> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Saves the structure to disk, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StructureError> {
        fs::write(path, self.to_bytes()?)?;
        Ok(())
    }
}
