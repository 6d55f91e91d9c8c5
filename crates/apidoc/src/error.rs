//! CLI error types.

use apidoc_config::ConfigError;
use apidoc_core::GenerateError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    /// Missing or invalid command-line argument.
    #[error("{0}")]
    Argument(#[from] clap::Error),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Generate(#[from] GenerateError),
}
