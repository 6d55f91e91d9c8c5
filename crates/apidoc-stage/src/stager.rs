//! Stager trait and error types.

use std::path::{Path, PathBuf};

/// File name of the descriptor inside a source or staging directory.
pub const DESCRIPTOR_FILENAME: &str = "api.json";

/// Directory name holding response bodies inside a source or staging directory.
pub const RESPONSES_DIRNAME: &str = "responses";

/// What to stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageRequest {
    /// Source descriptor file.
    pub descriptor: PathBuf,
    /// Source directory of response bodies. May not exist.
    pub responses_dir: PathBuf,
}

impl StageRequest {
    /// Build a request for the conventional layout `<dir>/api.json` + `<dir>/responses/`.
    #[must_use]
    pub fn from_source_dir(source_dir: impl AsRef<Path>) -> Self {
        let source_dir = source_dir.as_ref();
        Self {
            descriptor: source_dir.join(DESCRIPTOR_FILENAME),
            responses_dir: source_dir.join(RESPONSES_DIRNAME),
        }
    }
}

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StageErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Copy destination already exists.
    AlreadyExists,
    /// Expected a directory, found something else.
    NotADirectory,
    /// Reference escapes the staging directory or is otherwise malformed.
    InvalidPath,
    /// Other/unknown error category.
    Other,
}

/// Staging error with semantic kind and the I/O error behind it.
#[derive(Debug)]
pub struct StageError {
    /// Semantic error category.
    pub kind: StageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StageError {
    /// Create a new staging error.
    #[must_use]
    pub fn new(kind: StageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StageErrorKind::NotFound).with_path(path)
    }

    /// Create a staging error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StageErrorKind::PermissionDenied,
            std::io::ErrorKind::AlreadyExists => StageErrorKind::AlreadyExists,
            std::io::ErrorKind::NotADirectory => StageErrorKind::NotADirectory,
            _ => StageErrorKind::Other,
        };
        Self::new(kind).with_source(err).with_path(path)
    }
}

impl std::fmt::Display for StageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StageErrorKind::NotFound => "Not found",
            StageErrorKind::PermissionDenied => "Permission denied",
            StageErrorKind::AlreadyExists => "Already exists",
            StageErrorKind::NotADirectory => "Not a directory",
            StageErrorKind::InvalidPath => "Invalid path",
            StageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Staging capability.
///
/// A stager owns one staging location. [`stage`](Stager::stage) resets it and
/// fills it from a [`StageRequest`]; the read methods then serve the staged
/// copies. Staging is not safe to run concurrently against the same location:
/// callers must run at most one generation per staging root at a time.
pub trait Stager: Send + Sync {
    /// Replace the staged contents with the files named by `request`.
    ///
    /// A missing responses directory is not an error; nothing is staged for it.
    ///
    /// # Errors
    ///
    /// Returns [`StageError`] if the descriptor is missing or the staging
    /// location cannot be reset or written.
    fn stage(&self, request: &StageRequest) -> Result<(), StageError>;

    /// Location of the staged descriptor, for diagnostics.
    fn descriptor_path(&self) -> PathBuf;

    /// Read the staged descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`StageError`] if the descriptor has not been staged or can't be read.
    fn read_descriptor(&self) -> Result<Vec<u8>, StageError>;

    /// Read a staged response body by its reference (file name under `responses/`).
    ///
    /// # Errors
    ///
    /// Returns [`StageError`] with kind [`StageErrorKind::InvalidPath`] for
    /// references that are empty, absolute or contain `..`, and an I/O derived
    /// kind if the file can't be read.
    fn read_response(&self, reference: &str) -> Result<Vec<u8>, StageError>;
}

/// Check that a response reference stays inside the responses directory.
pub(crate) fn validate_reference(reference: &str) -> Result<(), StageError> {
    use std::path::Component;

    let path = Path::new(reference);
    let is_contained = !reference.is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if is_contained {
        Ok(())
    } else {
        Err(StageError::new(StageErrorKind::InvalidPath).with_path(reference))
    }
}
