//! `apidoc generate` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use apidoc_config::{CliSettings, Config};
use apidoc_core::{Generator, GeneratorConfig};
use apidoc_stage::FsStager;
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the generate command.
#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// Directory containing `api.json` and an optional `responses/` directory.
    pub source_dir: PathBuf,

    /// Directory holding `theme/` and `input/` (default: current directory).
    pub base_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover apidoc.toml).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Theme directory, relative to the base directory (overrides config).
    #[arg(long)]
    theme_dir: Option<PathBuf>,

    /// Staging directory, relative to the base directory (overrides config).
    #[arg(long)]
    staging_dir: Option<PathBuf>,

    /// Output file (overrides config).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Enable verbose output (info-level logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl GenerateArgs {
    /// Execute the generate command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or generation fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            theme_dir: self.theme_dir,
            output: self.output,
            staging_dir: self.staging_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let base_dir = self.base_dir.unwrap_or_else(|| PathBuf::from("."));
        let layout = config.layout(&base_dir);

        if self.verbose {
            if let Some(path) = &config.config_path {
                output.path("Config", path);
            }
            output.path("Template", &layout.template_path);
            output.path("Staging", &layout.staging_dir);
        }

        let stager = Arc::new(FsStager::new(layout.staging_dir));
        let generator = Generator::new(
            stager,
            GeneratorConfig {
                template_path: layout.template_path,
                entry: layout.entry,
                output_path: layout.output_path,
            },
        );
        let report = generator.run(&self.source_dir)?;

        output.success(&format!(
            "Generated {} ({} endpoints)",
            report.output_path.display(),
            report.endpoint_count
        ));
        Ok(())
    }
}
