//! Mock stager for testing.
//!
//! Provides [`MockStager`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::stager::{
    DESCRIPTOR_FILENAME, StageError, StageErrorKind, StageRequest, Stager, validate_reference,
};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// In-memory stager.
///
/// Holds a descriptor and response bodies configured up front. `stage()` does
/// no copying; it only counts calls, or fails if configured to.
///
/// # Example
///
/// ```ignore
/// use apidoc_stage::{MockStager, Stager};
///
/// let stager = MockStager::new()
///     .with_descriptor(r#"{"title":"T"}"#)
///     .with_response("a.json", r#"{"ok":true}"#);
///
/// let bytes = stager.read_response("a.json").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStager {
    descriptor: Option<Vec<u8>>,
    responses: HashMap<String, Vec<u8>>,
    stage_failure: Option<PathBuf>,
    stage_calls: AtomicUsize,
}

impl MockStager {
    /// Create a new empty mock stager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the descriptor bytes.
    #[must_use]
    pub fn with_descriptor(mut self, content: impl Into<Vec<u8>>) -> Self {
        self.descriptor = Some(content.into());
        self
    }

    /// Add a response body under `reference`.
    #[must_use]
    pub fn with_response(
        mut self,
        reference: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        self.responses.insert(reference.into(), content.into());
        self
    }

    /// Make `stage()` fail with a permission error on `path`.
    #[must_use]
    pub fn with_stage_failure(mut self, path: impl Into<PathBuf>) -> Self {
        self.stage_failure = Some(path.into());
        self
    }

    /// Number of times `stage()` has been called.
    #[must_use]
    pub fn stage_calls(&self) -> usize {
        self.stage_calls.load(Ordering::SeqCst)
    }
}

impl Stager for MockStager {
    fn stage(&self, _request: &StageRequest) -> Result<(), StageError> {
        self.stage_calls.fetch_add(1, Ordering::SeqCst);
        match &self.stage_failure {
            Some(path) => Err(StageError::new(StageErrorKind::PermissionDenied)
                .with_path(path)
                .with_backend(BACKEND)),
            None => Ok(()),
        }
    }

    fn descriptor_path(&self) -> PathBuf {
        PathBuf::from(DESCRIPTOR_FILENAME)
    }

    fn read_descriptor(&self) -> Result<Vec<u8>, StageError> {
        self.descriptor
            .clone()
            .ok_or_else(|| StageError::not_found(DESCRIPTOR_FILENAME).with_backend(BACKEND))
    }

    fn read_response(&self, reference: &str) -> Result<Vec<u8>, StageError> {
        validate_reference(reference).map_err(|e| e.with_backend(BACKEND))?;
        self.responses
            .get(reference)
            .cloned()
            .ok_or_else(|| StageError::not_found(reference).with_backend(BACKEND))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_serves_configured_content() {
        let stager = MockStager::new()
            .with_descriptor("{}")
            .with_response("a.json", "[1]");

        assert_eq!(stager.read_descriptor().unwrap(), b"{}");
        assert_eq!(stager.read_response("a.json").unwrap(), b"[1]");
    }

    #[test]
    fn test_mock_missing_response() {
        let stager = MockStager::new();

        let err = stager.read_response("a.json").unwrap_err();

        assert_eq!(err.kind, StageErrorKind::NotFound);
        assert_eq!(err.to_string(), "[Mock] Not found (path: a.json)");
    }

    #[test]
    fn test_mock_counts_and_fails_stage() {
        let stager = MockStager::new().with_stage_failure("input");
        let request = StageRequest::from_source_dir("src");

        let err = stager.stage(&request).unwrap_err();

        assert_eq!(err.kind, StageErrorKind::PermissionDenied);
        assert_eq!(stager.stage_calls(), 1);
    }
}
