//! Writes generated structures only when their content changed.
//!
//! Re-compressing the same structure does not always produce the same bytes, so
//! a plain overwrite would show every output as modified in version control. The
//! writer loads the existing file and compares it structurally to the new
//! structure instead, and leaves the file alone when they match.

use std::fmt::{self, Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use grove_utils::{Identifier, StructureError, StructureTemplate};

/// The result of writing one structure.
#[derive(Debug)]
pub enum WriteOutcome {
    /// No file existed; it was created.
    NewFile,
    /// A different structure existed; it was replaced.
    Modified,
    /// An equal structure existed; nothing was written.
    Unchanged,
    /// Loading, comparing or writing failed.
    Error(StructureError),
}

impl Display for WriteOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewFile => f.write_str("new"),
            Self::Modified => f.write_str("modified"),
            Self::Unchanged => f.write_str("unchanged"),
            Self::Error(err) => write!(f, "error: {err}"),
        }
    }
}

/// Writes structures, skipping files whose content would not change.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdempotentWriter {
    dry_run: bool,
}

impl IdempotentWriter {
    /// Creates a writer that writes to disk.
    #[must_use]
    pub const fn new() -> Self {
        Self { dry_run: false }
    }

    /// Creates a writer that reports outcomes but never touches the filesystem.
    #[must_use]
    pub const fn dry_run() -> Self {
        Self { dry_run: true }
    }

    /// Writes `structure` to `path` unless an equal structure is already there.
    ///
    /// Never fails: errors are returned as [`WriteOutcome::Error`] so the caller
    /// can carry on with the next structure.
    pub fn write(&self, structure: &StructureTemplate, path: &Path) -> WriteOutcome {
        self.try_write(structure, path)
            .unwrap_or_else(WriteOutcome::Error)
    }

    fn try_write(
        &self,
        structure: &StructureTemplate,
        path: &Path,
    ) -> Result<WriteOutcome, StructureError> {
        let outcome = if path.is_file() {
            let existing = StructureTemplate::load(path)?;
            if existing == *structure {
                return Ok(WriteOutcome::Unchanged);
            }
            WriteOutcome::Modified
        } else {
            WriteOutcome::NewFile
        };

        if !self.dry_run {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            structure.save(path)?;
        }
        Ok(outcome)
    }
}

/// A structure that could not be written.
#[derive(Debug)]
pub struct JobFailure {
    /// The output file.
    pub path: PathBuf,
    /// Why it failed.
    pub error: StructureError,
}

/// A palette entry of a template that is not a template block. It is written
/// out unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockAnomaly {
    /// The template the block came from.
    pub template: String,
    /// The block identity.
    pub block: Identifier,
}

impl Display for BlockAnomaly {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Structure: {} has an invalid block state '{}'",
            self.template, self.block
        )
    }
}

/// Outcome counts for a batch of writes.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Files created.
    pub new: usize,
    /// Files replaced.
    pub modified: usize,
    /// Files left as they were.
    pub unchanged: usize,
    /// Writes that failed, in batch order.
    pub failures: Vec<JobFailure>,
    /// Unexpected template blocks, in batch order.
    pub anomalies: Vec<BlockAnomaly>,
}

impl BatchSummary {
    /// Counts one outcome.
    pub fn record(&mut self, path: PathBuf, outcome: WriteOutcome) {
        match outcome {
            WriteOutcome::NewFile => self.new += 1,
            WriteOutcome::Modified => self.modified += 1,
            WriteOutcome::Unchanged => self.unchanged += 1,
            WriteOutcome::Error(error) => self.failures.push(JobFailure { path, error }),
        }
    }

    /// Number of failed writes.
    #[must_use]
    pub const fn errors(&self) -> usize {
        self.failures.len()
    }

    /// Number of outcomes recorded.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.new + self.modified + self.unchanged + self.failures.len()
    }

    /// True if at least one file was created or replaced.
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.new + self.modified > 0
    }
}

impl Display for BatchSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "New = {}, Modified = {}, Unchanged = {}, Errors = {}",
            self.new,
            self.modified,
            self.unchanged,
            self.errors()
        )
    }
}
