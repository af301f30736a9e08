//! Tree structure generator.
//!
//! Prints the sapling drop chance of every normal tree, then rewrites the oak
//! templates into per-species structures, touching only files whose content
//! changed.

mod cli;
mod logger;

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use grove_core::{GroveConfig, Pipeline, TemplateDirectory};
use grove_registry::Catalog;

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let mut config = GroveConfig::load_or_default(&cli.config)?;
    cli.apply(&mut config);

    let catalog = match &config.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::vanilla().context("embedded tree catalog is invalid")?,
    };
    let templates = TemplateDirectory::new(&config.templates_dir);
    let pipeline = Pipeline::new(&config, &catalog, &templates);
    tracing::debug!(
        templates = %templates.root().display(),
        output = %pipeline.output_dir().display(),
        dry_run = config.dry_run,
        "Configured"
    );

    if !cli.skip_analysis {
        println!("Tree sapling drop chances:");
        for tree in pipeline.analyze() {
            let tree = tree.context("failed to compute sapling drop chances")?;
            println!("{tree}");
        }
    }

    if cli.analyze_only {
        return Ok(());
    }

    println!("Making tree structures");
    let start = Instant::now();
    let summary = pipeline.generate().context("invalid tree catalog")?;
    for failure in &summary.failures {
        log::error!("Failed to write {}: {}", failure.path.display(), failure.error);
    }
    log::info!("Processed {} structures in {:?}", summary.total(), start.elapsed());

    println!("{summary}");
    Ok(())
}
