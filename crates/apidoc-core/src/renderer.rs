//! Document rendering.
//!
//! The template file is registered with `minijinja` under its file name and must
//! define the entry as a named block (`{% block doc %}...{% endblock %}`). Only
//! that block is rendered, with a [`Document`] as its context; anything outside
//! it is evaluated but discarded. HTML auto-escaping is always on. Rendering
//! produces a `String`; nothing touches the destination until
//! [`write_document`] is called with the finished output.

use std::io::Write;
use std::path::{Path, PathBuf};

use apidoc_model::Document;
use chrono::{DateTime, Utc};
use minijinja::{AutoEscape, Environment, ErrorKind};

/// Timestamp format for `generated_at`, RFC 1123 style in UTC.
pub const TIMESTAMP_FORMAT: &str = "%a, %d %b %Y %H:%M:%S UTC";

/// Format a generation timestamp with [`TIMESTAMP_FORMAT`].
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Error returned when the document cannot be rendered or written.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Template file does not exist.
    #[error("Template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),
    /// Template file exists but can't be read.
    #[error("Failed to read template {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Template has a syntax error.
    #[error("Invalid template {}: {source}", .path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: minijinja::Error,
    },
    /// Template does not define the entry block.
    #[error("Template {} has no '{entry}' block", .path.display())]
    MissingEntry { path: PathBuf, entry: String },
    /// Template failed while rendering.
    #[error("Failed to render template {}: {source}", .path.display())]
    Execute {
        path: PathBuf,
        #[source]
        source: minijinja::Error,
    },
    /// Output could not be written.
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A compiled document template.
pub struct DocumentTemplate {
    env: Environment<'static>,
    name: String,
    entry: String,
    path: PathBuf,
}

impl DocumentTemplate {
    /// Read and compile the template at `path`, rendering the `entry` block.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the file is missing, unreadable or invalid.
    pub fn load(path: &Path, entry: &str) -> Result<Self, RenderError> {
        let source = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                RenderError::TemplateNotFound(path.to_path_buf())
            } else {
                RenderError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Self::from_source(source, entry, path.to_path_buf())
    }

    /// Compile a template from source. `path` is only used for diagnostics.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] on syntax errors.
    pub fn from_source(source: String, entry: &str, path: PathBuf) -> Result<Self, RenderError> {
        let name = path.file_name().map_or_else(
            || "index.html".to_owned(),
            |name| name.to_string_lossy().into_owned(),
        );
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        if let Err(source) = env.add_template_owned(name.clone(), source) {
            return Err(RenderError::Template { path, source });
        }
        tracing::debug!(path = %path.display(), entry, "Template loaded");
        Ok(Self {
            env,
            name,
            entry: entry.to_owned(),
            path,
        })
    }

    /// Template file this was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render the entry block with `document` as its context.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MissingEntry`] if the template has no such block,
    /// or [`RenderError::Execute`] if rendering fails.
    pub fn render(&self, document: &Document<'_>) -> Result<String, RenderError> {
        let execute_error = |source| RenderError::Execute {
            path: self.path.clone(),
            source,
        };
        let template = self.env.get_template(&self.name).map_err(execute_error)?;
        let mut state = template.eval_to_state(document).map_err(execute_error)?;
        state.render_block(&self.entry).map_err(|source| {
            if source.kind() == ErrorKind::UnknownBlock {
                RenderError::MissingEntry {
                    path: self.path.clone(),
                    entry: self.entry.clone(),
                }
            } else {
                execute_error(source)
            }
        })
    }
}

/// Write rendered output to `dest`, replacing it atomically.
///
/// The content goes to a temporary file next to `dest` which is then renamed
/// over it, so readers see either the old file or the complete new one.
///
/// # Errors
///
/// Returns [`RenderError::Write`] if the file can't be created or renamed.
pub fn write_document(dest: &Path, html: &str) -> Result<(), RenderError> {
    let write_error = |source| RenderError::Write {
        path: dest.to_path_buf(),
        source,
    };

    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(write_error)?;
    file.write_all(html.as_bytes()).map_err(write_error)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(write_error)?;
    }
    file.persist(dest).map_err(|e| write_error(e.error))?;

    tracing::debug!(path = %dest.display(), bytes = html.len(), "Document written");
    Ok(())
}
