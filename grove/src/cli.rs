use std::path::PathBuf;

use clap::{ArgAction, Parser};
use grove_core::GroveConfig;
use grove_core::config::DEFAULT_CONFIG_PATH;

/// Generates per-species tree structures from the oak templates and prints
/// sapling drop chances.
#[derive(Parser, Debug)]
#[command(name = "grove", version, about)]
pub struct Cli {
    /// Config file. Missing files fall back to the defaults.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Template directory, overriding the config.
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Structures output root, overriding the config.
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Tree catalog replacing the embedded one.
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Skip the sapling drop chance pass.
    #[arg(long, conflicts_with = "analyze_only")]
    pub skip_analysis: bool,

    /// Only print sapling drop chances, generate nothing.
    #[arg(long)]
    pub analyze_only: bool,

    /// Report what would change without writing.
    #[arg(long)]
    pub dry_run: bool,

    /// More log output (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Applies command line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut GroveConfig) {
        if let Some(templates) = &self.templates {
            config.templates_dir.clone_from(templates);
        }
        if let Some(output) = &self.output {
            config.output_dir.clone_from(output);
        }
        if self.catalog.is_some() {
            config.catalog.clone_from(&self.catalog);
        }
        config.dry_run |= self.dry_run;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from(["grove", "--templates", "t", "--dry-run", "-vv"]);
        let mut config = GroveConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.templates_dir, PathBuf::from("t"));
        assert_eq!(config.output_dir, GroveConfig::default().output_dir);
        assert!(config.dry_run);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn analysis_flags_conflict() {
        assert!(Cli::try_parse_from(["grove", "--skip-analysis", "--analyze-only"]).is_err());
    }
}
