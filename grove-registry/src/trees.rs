//! Tree species specifications.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// A feature tag that is not one of `random`, `overlay` or `stacked`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown tree feature `{0}` (expected `random`, `overlay` or `stacked`)")]
pub struct UnknownFeature(pub String);

/// How a species' structures are laid out on disk and placed in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum TreeFeature {
    /// `count` interchangeable structures, one chosen at random.
    Random,
    /// A base structure plus an overlay placed on top with 50% integrity.
    Overlay,
    /// Several layers stacked vertically, each chosen from its own set.
    Stacked,
}

impl TreeFeature {
    /// The tag used for this feature in catalog files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Overlay => "overlay",
            Self::Stacked => "stacked",
        }
    }
}

impl Display for TreeFeature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TreeFeature {
    type Err = UnknownFeature;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(Self::Random),
            "overlay" => Ok(Self::Overlay),
            "stacked" => Ok(Self::Stacked),
            other => Err(UnknownFeature(other.to_owned())),
        }
    }
}

impl TryFrom<String> for TreeFeature {
    type Error = UnknownFeature;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The `count` field of a [`TreeSpec`].
///
/// Its meaning depends on the feature: a template count for `random`, nothing
/// for `overlay`, and per-layer template counts for `stacked`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TreeCount {
    /// No count given.
    #[default]
    None,
    /// A single template count.
    Single(u32),
    /// One template count per layer, bottom layer first.
    Layers(Vec<u32>),
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TreeSpec {
    /// Species name; also the wood name used in block identifiers.
    pub name: String,
    /// The generation feature.
    pub feature: TreeFeature,
    /// The template family the species' structures are made from.
    pub variant: String,
    /// Template count(s), see [`TreeCount`].
    #[serde(default)]
    pub count: TreeCount,
}

impl TreeSpec {
    /// Creates a `random` spec with `count` templates.
    #[must_use]
    pub fn random(name: &str, variant: &str, count: u32) -> Self {
        Self {
            name: name.to_owned(),
            feature: TreeFeature::Random,
            variant: variant.to_owned(),
            count: TreeCount::Single(count),
        }
    }

    /// Creates an `overlay` spec.
    #[must_use]
    pub fn overlay(name: &str, variant: &str) -> Self {
        Self {
            name: name.to_owned(),
            feature: TreeFeature::Overlay,
            variant: variant.to_owned(),
            count: TreeCount::None,
        }
    }

    /// Creates a `stacked` spec with the given per-layer counts.
    #[must_use]
    pub fn stacked(name: &str, variant: &str, layers: &[u32]) -> Self {
        Self {
            name: name.to_owned(),
            feature: TreeFeature::Stacked,
            variant: variant.to_owned(),
            count: TreeCount::Layers(layers.to_vec()),
        }
    }
}

/// The size class a spec is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeSize {
    /// The regular tree.
    Normal,
    /// The large variant, written to `<species>_large`.
    Large,
}

impl TreeSize {
    /// Both size classes, in generation order.
    pub const ALL: [Self; 2] = [Self::Normal, Self::Large];

    /// The output directory name for `species` in this size class.
    #[must_use]
    pub fn directory(self, species: &str) -> String {
        match self {
            Self::Normal => species.to_owned(),
            Self::Large => format!("{species}_large"),
        }
    }
}
