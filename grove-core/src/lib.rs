//! Tree structure generation.
//!
//! Turns the generic oak templates into per-species structure files and computes
//! sapling drop chances from the templates' leaf counts.
//!
//! # Key Types
//!
//! - [`Pipeline`] - Runs the statistics pass and the generation batch
//! - [`GenerationJob`] - One template to rewrite into one output file
//! - [`BlockSubstitution`] - Rewrites oak blocks into a species' blocks
//! - [`IdempotentWriter`] - Writes a structure only if it differs from the file on disk
//! - [`LeafAnalyzer`] - Average leaf counts and sapling drop chances

pub mod analyzer;
pub mod composer;
pub mod config;
pub mod pipeline;
pub mod source;
pub mod substitution;
pub mod writer;

pub use analyzer::{AnalysisError, LeafAnalyzer, LeafStatistics, SAPLINGS_PER_TREE};
pub use composer::{ComposeError, GenerationJob, compose};
pub use config::{ConfigError, GroveConfig};
pub use pipeline::Pipeline;
pub use source::{TemplateDirectory, TemplateSource};
pub use substitution::{BlockSubstitution, SubstitutionReport};
pub use writer::{BatchSummary, BlockAnomaly, IdempotentWriter, JobFailure, WriteOutcome};
