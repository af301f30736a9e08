//! Namespaced resource identifiers.

use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

/// An error returned when a string is not a valid identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// The namespace part before the `:` is empty.
    #[error("identifier `{0}` has an empty namespace")]
    EmptyNamespace(String),
    /// The path part is empty.
    #[error("identifier `{0}` has an empty path")]
    EmptyPath(String),
}

/// A resource location in `namespace:path` form.
///
/// Parsing a string without a `:` places it in the `minecraft` namespace, the
/// same way the game resolves unqualified block names.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier {
    /// The namespace, e.g. `minecraft` or `tfc`.
    pub namespace: Cow<'static, str>,
    /// The path inside the namespace, e.g. `wood/log/oak`.
    pub path: Cow<'static, str>,
}

impl Identifier {
    /// The namespace of every vanilla resource.
    pub const VANILLA_NAMESPACE: &'static str = "minecraft";

    /// Creates an identifier from its two parts.
    #[must_use]
    pub fn new(namespace: impl Into<Cow<'static, str>>, path: impl Into<Cow<'static, str>>) -> Self {
        Self {
            namespace: namespace.into(),
            path: path.into(),
        }
    }

    /// Creates a `minecraft:` identifier usable in constants.
    #[must_use]
    pub const fn vanilla_static(path: &'static str) -> Self {
        Self {
            namespace: Cow::Borrowed(Self::VANILLA_NAMESPACE),
            path: Cow::Borrowed(path),
        }
    }

    /// Returns true if this identifier lives in the `minecraft` namespace.
    #[must_use]
    pub fn is_vanilla(&self) -> bool {
        self.namespace == Self::VANILLA_NAMESPACE
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, path) = match s.split_once(':') {
            Some((namespace, path)) => (namespace, path),
            None => (Self::VANILLA_NAMESPACE, s),
        };
        if namespace.is_empty() {
            return Err(IdentifierError::EmptyNamespace(s.to_owned()));
        }
        if path.is_empty() {
            return Err(IdentifierError::EmptyPath(s.to_owned()));
        }
        Ok(Self::new(namespace.to_owned(), path.to_owned()))
    }
}
