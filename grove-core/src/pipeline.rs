//! The statistics pass and the generation batch over a whole catalog.

use std::path::{Path, PathBuf};

use grove_registry::{Catalog, TreeSize};

use crate::analyzer::{AnalysisError, LeafAnalyzer, LeafStatistics};
use crate::composer::{ComposeError, GenerationJob, compose};
use crate::config::GroveConfig;
use crate::source::TemplateSource;
use crate::substitution::BlockSubstitution;
use crate::writer::{BatchSummary, BlockAnomaly, IdempotentWriter, WriteOutcome};

/// Runs the generator over a catalog.
pub struct Pipeline<'a, S: TemplateSource + ?Sized> {
    catalog: &'a Catalog,
    templates: &'a S,
    substitution: BlockSubstitution,
    writer: IdempotentWriter,
    output_dir: PathBuf,
}

impl<'a, S: TemplateSource + ?Sized> Pipeline<'a, S> {
    /// Creates a pipeline writing below `config.output_dir`.
    pub fn new(config: &GroveConfig, catalog: &'a Catalog, templates: &'a S) -> Self {
        Self {
            catalog,
            templates,
            substitution: BlockSubstitution::new(config.namespace.clone(), config.data_version),
            writer: if config.dry_run {
                IdempotentWriter::dry_run()
            } else {
                IdempotentWriter::new()
            },
            output_dir: config.output_dir.clone(),
        }
    }

    /// The structures root outputs are written below.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Computes leaf statistics for every normal-size tree, lazily and in
    /// catalog order.
    ///
    /// Each tree is analysed when the iterator reaches it, so results ahead of a
    /// failing tree are available before the failure.
    pub fn analyze(&self) -> impl Iterator<Item = Result<LeafStatistics, AnalysisError>> {
        let analyzer = LeafAnalyzer::new(self.templates);
        self.catalog
            .specs(TreeSize::Normal)
            .iter()
            .map(move |spec| analyzer.analyze(spec))
    }

    /// Expands the whole catalog into jobs, normal trees first.
    ///
    /// Fails on the first catalog entry that cannot be expanded, before any job runs.
    pub fn plan(&self) -> Result<Vec<GenerationJob>, ComposeError> {
        let mut jobs = Vec::new();
        for (size, spec) in self.catalog.iter() {
            jobs.extend(compose(spec, size)?);
        }
        Ok(jobs)
    }

    /// Generates every structure of the catalog.
    ///
    /// A job that fails is counted in the summary and does not stop the batch.
    pub fn generate(&self) -> Result<BatchSummary, ComposeError> {
        let jobs = self.plan()?;
        log::info!("Generating {} tree structures", jobs.len());

        let mut summary = BatchSummary::default();
        for job in &jobs {
            let path = job.output_path(&self.output_dir);
            let (outcome, anomalies) = self.run_job(job, &path);
            log::debug!("{} -> {}: {outcome}", job.source, path.display());
            summary.anomalies.extend(anomalies);
            summary.record(path, outcome);
        }
        Ok(summary)
    }

    /// Loads, rewrites and writes the structure of one job.
    ///
    /// Returns the write outcome with the template blocks that could not be
    /// rewritten.
    #[tracing::instrument(level = "trace", skip_all, fields(template = %job.source))]
    pub fn run_job(
        &self,
        job: &GenerationJob,
        path: &Path,
    ) -> (WriteOutcome, Vec<BlockAnomaly>) {
        let mut structure = match self.templates.load(&job.source) {
            Ok(structure) => structure,
            Err(err) => return (WriteOutcome::Error(err), Vec::new()),
        };

        let report = self.substitution.apply(&mut structure, &job.wood);
        let anomalies: Vec<BlockAnomaly> = report
            .anomalies
            .into_iter()
            .map(|block| BlockAnomaly {
                template: job.source.clone(),
                block,
            })
            .collect();
        for anomaly in &anomalies {
            log::warn!("{anomaly}");
        }

        (self.writer.write(&structure, path), anomalies)
    }
}
