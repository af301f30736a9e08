//! Conversion between [`StructureTemplate`] and the `simdnbt` tag tree.
//!
//! Structure files are written gzip-compressed. Reading accepts both compressed
//! and raw NBT, detected from the gzip magic bytes.

use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use glam::IVec3;
use simdnbt::Mutf8String;
use simdnbt::owned::{BaseNbt, Nbt, NbtCompound, NbtList, NbtTag};

use super::{BlockState, StructureBlock, StructureError, StructureTemplate};
use crate::Identifier;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

const DATA_VERSION: &str = "DataVersion";
const SIZE: &str = "size";
const PALETTE: &str = "palette";
const BLOCKS: &str = "blocks";
const NAME: &str = "Name";
const PROPERTIES: &str = "Properties";
const STATE: &str = "state";
const POS: &str = "pos";
const BLOCK_NBT: &str = "nbt";

pub(super) fn read_root(bytes: &[u8]) -> Result<NbtCompound, StructureError> {
    let mut inflated = Vec::new();
    let data = if bytes.starts_with(&GZIP_MAGIC) {
        GzDecoder::new(bytes).read_to_end(&mut inflated)?;
        inflated.as_slice()
    } else {
        bytes
    };

    match simdnbt::owned::read(&mut Cursor::new(data))? {
        Nbt::Some(base) => {
            let root: &NbtCompound = &base;
            Ok(root.clone())
        }
        Nbt::None => Err(StructureError::EmptyDocument),
    }
}

pub(super) fn write_root(root: NbtCompound) -> Result<Vec<u8>, StructureError> {
    let mut raw = Vec::new();
    BaseNbt::new(mutf8(""), root).write(&mut raw);

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&raw)?;
    Ok(encoder.finish()?)
}

pub(super) fn template_from_compound(
    root: &NbtCompound,
) -> Result<StructureTemplate, StructureError> {
    let mut template = StructureTemplate::default();
    let mut size = None;
    let mut palette = None;
    let mut blocks = None;

    for (key, tag) in root.iter() {
        let key = key.to_str();
        match key.as_ref() {
            DATA_VERSION => template.data_version = Some(int(tag, DATA_VERSION)?),
            SIZE => size = Some(vec3(tag, SIZE)?),
            PALETTE => palette = Some(read_palette(compounds(tag, PALETTE)?)?),
            BLOCKS => blocks = Some(compounds(tag, BLOCKS)?),
            _ => {
                template.other.insert(key.into_owned(), canonical_tag(tag));
            }
        }
    }

    template.size = size.ok_or(StructureError::MissingField(SIZE))?;
    template.palette = palette.ok_or(StructureError::MissingField(PALETTE))?;
    template.blocks = blocks
        .ok_or(StructureError::MissingField(BLOCKS))?
        .iter()
        .map(|block| read_block(block, template.palette.len()))
        .collect::<Result<_, _>>()?;

    Ok(template)
}

pub(super) fn template_to_compound(template: &StructureTemplate) -> NbtCompound {
    let mut values = Vec::with_capacity(template.other.len() + 4);

    values.push((
        mutf8(SIZE),
        NbtTag::List(NbtList::Int(template.size.to_array().to_vec())),
    ));
    values.push((
        mutf8(BLOCKS),
        NbtTag::List(NbtList::Compound(
            template.blocks.iter().map(write_block).collect(),
        )),
    ));
    values.push((
        mutf8(PALETTE),
        NbtTag::List(NbtList::Compound(
            template.palette.iter().map(write_block_state).collect(),
        )),
    ));
    for (key, tag) in &template.other {
        values.push((mutf8(key), tag.clone()));
    }
    if let Some(data_version) = template.data_version {
        values.push((mutf8(DATA_VERSION), NbtTag::Int(data_version)));
    }

    NbtCompound::from_values(values)
}

fn read_palette(entries: &[NbtCompound]) -> Result<Vec<BlockState>, StructureError> {
    entries.iter().map(read_block_state).collect()
}

fn read_block_state(entry: &NbtCompound) -> Result<BlockState, StructureError> {
    let name = string(
        entry.get(NAME).ok_or(StructureError::MissingField(NAME))?,
        NAME,
    )?;
    let name: Identifier = name.parse().map_err(|e| invalid(NAME, e))?;

    let mut state = BlockState::new(name);
    if let Some(properties) = entry.get(PROPERTIES) {
        let NbtTag::Compound(properties) = properties else {
            return Err(invalid(PROPERTIES, "expected a compound"));
        };
        for (key, value) in properties.iter() {
            state.set_property(key.to_str().into_owned(), string(value, PROPERTIES)?);
        }
    }
    Ok(state)
}

fn write_block_state(state: &BlockState) -> NbtCompound {
    let mut values = vec![(mutf8(NAME), NbtTag::String(mutf8(state.name.to_string())))];
    if !state.properties.is_empty() {
        let properties = state
            .properties
            .iter()
            .map(|(key, value)| (mutf8(key), NbtTag::String(mutf8(value))))
            .collect();
        values.push((
            mutf8(PROPERTIES),
            NbtTag::Compound(NbtCompound::from_values(properties)),
        ));
    }
    NbtCompound::from_values(values)
}

fn read_block(entry: &NbtCompound, palette_len: usize) -> Result<StructureBlock, StructureError> {
    let state = int(
        entry.get(STATE).ok_or(StructureError::MissingField(STATE))?,
        STATE,
    )?;
    let state = u32::try_from(state)
        .ok()
        .filter(|index| (*index as usize) < palette_len)
        .ok_or_else(|| invalid(STATE, format!("{state} is not a palette index")))?;

    let pos = vec3(
        entry.get(POS).ok_or(StructureError::MissingField(POS))?,
        POS,
    )?;

    let nbt = match entry.get(BLOCK_NBT) {
        Some(NbtTag::Compound(nbt)) => Some(canonical_compound(nbt)),
        Some(_) => return Err(invalid(BLOCK_NBT, "expected a compound")),
        None => None,
    };

    Ok(StructureBlock { state, pos, nbt })
}

fn write_block(block: &StructureBlock) -> NbtCompound {
    let mut values = vec![
        (
            mutf8(POS),
            NbtTag::List(NbtList::Int(block.pos.to_array().to_vec())),
        ),
        (mutf8(STATE), NbtTag::Int(block.state as i32)),
    ];
    if let Some(nbt) = &block.nbt {
        values.push((mutf8(BLOCK_NBT), NbtTag::Compound(nbt.clone())));
    }
    NbtCompound::from_values(values)
}

/// Copies `compound` with its keys sorted at every depth, so compounds that
/// only differ in key order compare equal.
fn canonical_compound(compound: &NbtCompound) -> NbtCompound {
    let mut values: Vec<(Mutf8String, NbtTag)> = compound
        .iter()
        .map(|(key, tag)| (key.to_owned(), canonical_tag(tag)))
        .collect();
    values.sort_by(|(a, _), (b, _)| a.to_str().cmp(&b.to_str()));
    NbtCompound::from_values(values)
}

fn canonical_tag(tag: &NbtTag) -> NbtTag {
    match tag {
        NbtTag::Compound(compound) => NbtTag::Compound(canonical_compound(compound)),
        NbtTag::List(list) => NbtTag::List(canonical_list(list)),
        other => other.clone(),
    }
}

fn canonical_list(list: &NbtList) -> NbtList {
    match list {
        NbtList::Compound(compounds) => {
            NbtList::Compound(compounds.iter().map(canonical_compound).collect())
        }
        NbtList::List(lists) => NbtList::List(lists.iter().map(canonical_list).collect()),
        other => other.clone(),
    }
}

fn int(tag: &NbtTag, field: &'static str) -> Result<i32, StructureError> {
    match tag {
        NbtTag::Int(value) => Ok(*value),
        _ => Err(invalid(field, "expected an int")),
    }
}

fn string(tag: &NbtTag, field: &'static str) -> Result<String, StructureError> {
    match tag {
        NbtTag::String(value) => Ok(value.to_str().into_owned()),
        _ => Err(invalid(field, "expected a string")),
    }
}

fn vec3(tag: &NbtTag, field: &'static str) -> Result<IVec3, StructureError> {
    match tag {
        NbtTag::List(NbtList::Int(values)) if values.len() == 3 => {
            Ok(IVec3::new(values[0], values[1], values[2]))
        }
        _ => Err(invalid(field, "expected a list of three ints")),
    }
}

fn compounds<'a>(
    tag: &'a NbtTag,
    field: &'static str,
) -> Result<&'a [NbtCompound], StructureError> {
    match tag {
        NbtTag::List(NbtList::Compound(values)) => Ok(values),
        NbtTag::List(NbtList::Empty) => Ok(&[]),
        _ => Err(invalid(field, "expected a list of compounds")),
    }
}

fn invalid(field: &'static str, reason: impl ToString) -> StructureError {
    StructureError::InvalidField {
        field,
        reason: reason.to_string(),
    }
}

fn mutf8(value: impl Into<String>) -> Mutf8String {
    Mutf8String::from(value.into())
}
