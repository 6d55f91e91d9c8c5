//! Configuration management for apidoc.
//!
//! Parses `apidoc.toml` with serde and provides auto-discovery of the config
//! file in the current directory and its parents. Without a config file the
//! defaults reproduce the fixed layout:
//!
//! ```text
//! <base>/theme/index.html   template, entry "doc"
//! <base>/theme/doc.html     output
//! <base>/input/             staging directory
//! ```
//!
//! CLI settings are applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! All string values support `${VAR}` and `${VAR:-default}`.

mod expand;

use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "apidoc.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override theme directory (relative to the base path unless absolute).
    pub theme_dir: Option<PathBuf>,
    /// Override the output file path.
    pub output: Option<PathBuf>,
    /// Override staging directory (relative to the base path).
    pub staging_dir: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme (template and output) configuration.
    pub theme: ThemeConfig,
    /// Staging configuration.
    pub staging: StagingConfig,

    /// Explicit output path from the CLI (set after loading).
    #[serde(skip)]
    pub output_override: Option<PathBuf>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Theme configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Theme directory, relative to the base path.
    pub dir: PathBuf,
    /// Template file name inside the theme directory.
    pub template: String,
    /// Name of the entry template the renderer invokes.
    pub entry: String,
    /// Output file name inside the theme directory.
    pub output: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("theme"),
            template: "index.html".to_owned(),
            entry: "doc".to_owned(),
            output: "doc.html".to_owned(),
        }
    }
}

/// Staging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StagingConfig {
    /// Staging directory, relative to the base path. Wiped on every run.
    pub dir: PathBuf,
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("input"),
        }
    }
}

/// Concrete paths for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Template file to load.
    pub template_path: PathBuf,
    /// Entry template name.
    pub entry: String,
    /// Rendered document destination.
    pub output_path: PathBuf,
    /// Staging root.
    pub staging_dir: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`theme.dir`").
        field: String,
        /// Error message (e.g., "${`THEME_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a field to be a bare file name (no directory components).
fn require_file_name(value: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(value, field)?;
    if value.contains(['/', '\\']) || value == "." || value == ".." {
        return Err(ConfigError::Validation(format!(
            "{field} must be a file name, got {value:?}"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `apidoc.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(theme_dir) = &settings.theme_dir {
            self.theme.dir.clone_from(theme_dir);
        }
        if let Some(staging_dir) = &settings.staging_dir {
            self.staging.dir.clone_from(staging_dir);
        }
        if let Some(output) = &settings.output {
            self.output_override = Some(output.clone());
        }
    }

    /// Resolve concrete paths under `base_dir`.
    #[must_use]
    pub fn layout(&self, base_dir: &Path) -> Layout {
        let theme_dir = base_dir.join(&self.theme.dir);
        Layout {
            template_path: theme_dir.join(&self.theme.template),
            entry: self.theme.entry.clone(),
            output_path: self
                .output_override
                .clone()
                .unwrap_or_else(|| theme_dir.join(&self.theme.output)),
            staging_dir: base_dir.join(&self.staging.dir),
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_file_name(&self.theme.template, "theme.template")?;
        require_file_name(&self.theme.entry, "theme.entry")?;
        require_file_name(&self.theme.output, "theme.output")?;
        self.validate_staging()
    }

    /// The staging directory is wiped each run, so it must stay strictly below
    /// the base path and must not overlap the theme directory.
    fn validate_staging(&self) -> Result<(), ConfigError> {
        let staging = self.staging.dir.as_path();
        if staging.is_absolute() || staging.has_root() {
            return Err(ConfigError::Validation(format!(
                "staging.dir must be relative to the base path: {}",
                staging.display()
            )));
        }
        if staging.components().any(|c| c == Component::ParentDir) {
            return Err(ConfigError::Validation(format!(
                "staging.dir cannot contain '..': {}",
                staging.display()
            )));
        }

        let staging = normalize(staging);
        if staging.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "staging.dir cannot be empty or '.'".to_owned(),
            ));
        }
        let theme = normalize(&self.theme.dir);
        if staging.starts_with(&theme) || theme.starts_with(&staging) {
            return Err(ConfigError::Validation(
                "staging.dir must differ from theme.dir and not contain it".to_owned(),
            ));
        }
        Ok(())
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.theme.dir = expand_path(&self.theme.dir, "theme.dir")?;
        self.theme.template = expand::expand_env(&self.theme.template, "theme.template")?;
        self.theme.entry = expand::expand_env(&self.theme.entry, "theme.entry")?;
        self.theme.output = expand::expand_env(&self.theme.output, "theme.output")?;
        self.staging.dir = expand_path(&self.staging.dir, "staging.dir")?;
        Ok(())
    }
}

/// Drop `.` components so `./theme` and `theme` compare equal.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

fn expand_path(path: &Path, field: &str) -> Result<PathBuf, ConfigError> {
    match path.to_str() {
        Some(s) => expand::expand_env(s, field).map(PathBuf::from),
        None => Ok(path.to_path_buf()),
    }
}
