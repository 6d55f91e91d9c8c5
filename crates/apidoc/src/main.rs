//! apidoc CLI - API documentation generator.
//!
//! Provides commands for:
//! - `generate`: Render a descriptor directory into a static HTML page

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::GenerateArgs;
use error::CliError;
use output::Output;

/// apidoc - API documentation generator.
#[derive(Parser)]
#[command(name = "apidoc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the documentation page from a descriptor directory.
    Generate(GenerateArgs),
}

fn main() {
    if let Err(err) = run(std::env::args_os()) {
        Output::new().error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// Parse `args` and run the selected command.
///
/// `--help` and `--version` print and return `Ok`; every other failure,
/// including argument errors, is returned for `main` to map to exit code 1.
fn run<I, T>(args: I) -> Result<(), CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            let _ = err.print();
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let verbose = matches!(&cli.command, Commands::Generate(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    // A subscriber may already be installed when called more than once.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match cli.command {
        Commands::Generate(args) => args.execute(),
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;
    use std::path::PathBuf;

    use clap::CommandFactory;
    use clap::error::ErrorKind;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate_defaults() {
        let cli = Cli::try_parse_from(["apidoc", "generate", "api"]).unwrap();

        let Commands::Generate(args) = cli.command;
        assert_eq!(args.source_dir, PathBuf::from("api"));
        assert_eq!(args.base_dir, None);
        assert!(!args.verbose);
    }

    #[test]
    fn test_parse_generate_with_base_and_options() {
        let cli = Cli::try_parse_from([
            "apidoc",
            "generate",
            "api",
            "site",
            "-v",
            "--config",
            "apidoc.toml",
            "--output",
            "out.html",
        ])
        .unwrap();

        let Commands::Generate(args) = cli.command;
        assert_eq!(args.base_dir, Some(PathBuf::from("site")));
        assert_eq!(args.config, Some(PathBuf::from("apidoc.toml")));
        assert_eq!(args.output, Some(PathBuf::from("out.html")));
        assert!(args.verbose);
    }

    #[test]
    fn test_missing_source_dir_is_argument_error() {
        let Err(err) = Cli::try_parse_from(["apidoc", "generate"]) else {
            panic!("Expected argument error");
        };

        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert!(err.use_stderr());
        assert!(matches!(CliError::from(err), CliError::Argument(_)));
    }

    #[test]
    fn test_run_missing_argument_fails() {
        let err = run(["apidoc", "generate"]).unwrap_err();

        assert!(matches!(err, CliError::Argument(_)));
    }

    #[test]
    fn test_run_version_succeeds() {
        assert!(run(["apidoc", "--version"]).is_ok());
    }

    #[test]
    fn test_run_generation_failure_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = temp_dir.path().join("apidoc.toml");
        std::fs::write(&config, "").unwrap();
        let missing = temp_dir.path().join("missing");
        let base = temp_dir.path().join("site");
        std::fs::create_dir_all(base.join("theme")).unwrap();
        std::fs::write(base.join("theme/index.html"), "{% block doc %}{% endblock %}").unwrap();

        let err = run([
            OsStr::new("apidoc"),
            OsStr::new("generate"),
            missing.as_os_str(),
            base.as_os_str(),
            OsStr::new("--config"),
            config.as_os_str(),
        ])
        .unwrap_err();

        assert!(matches!(err, CliError::Generate(_)));
    }

    #[test]
    fn test_help_is_not_an_error_exit() {
        let Err(err) = Cli::try_parse_from(["apidoc", "--help"]) else {
            panic!("Expected help output");
        };

        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(!err.use_stderr());
    }
}
