//! End-to-end document generation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use apidoc_model::Document;
use apidoc_stage::{StageError, StageRequest, Stager};
use chrono::{DateTime, Utc};

use crate::enricher::{Enricher, ResourceError};
use crate::example::{EmptyExample, ExampleGenerator};
use crate::loader::{ParseError, load_descriptor};
use crate::renderer::{DocumentTemplate, RenderError, format_timestamp, write_document};

/// Error returned by [`Generator::run`].
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Staging failed: {0}")]
    Staging(#[from] StageError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Template and output locations for a [`Generator`].
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// Template file, e.g. `theme/index.html`.
    pub template_path: PathBuf,
    /// Entry template name the renderer invokes.
    pub entry: String,
    /// Destination of the rendered document, e.g. `theme/doc.html`.
    pub output_path: PathBuf,
}

/// Summary of a successful run.
#[derive(Debug, PartialEq, Eq)]
pub struct GenerateReport {
    pub output_path: PathBuf,
    pub endpoint_count: usize,
    pub generated_at: String,
}

/// Runs stage → load → enrich → render for one descriptor directory.
///
/// Every failure is fatal and returned as a [`GenerateError`]. The output file
/// is only replaced once the document has been rendered completely.
pub struct Generator {
    stager: Arc<dyn Stager>,
    config: GeneratorConfig,
    examples: Box<dyn ExampleGenerator>,
}

impl Generator {
    /// Create a generator that produces empty usage examples.
    #[must_use]
    pub fn new(stager: Arc<dyn Stager>, config: GeneratorConfig) -> Self {
        Self {
            stager,
            config,
            examples: Box::new(EmptyExample),
        }
    }

    /// Replace the usage example generator.
    #[must_use]
    pub fn with_example_generator(mut self, examples: impl ExampleGenerator + 'static) -> Self {
        self.examples = Box::new(examples);
        self
    }

    /// Generate the document for `source_dir`, timestamped now.
    ///
    /// `source_dir` must contain `api.json` and may contain `responses/`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] from whichever stage failed first.
    pub fn run(&self, source_dir: &Path) -> Result<GenerateReport, GenerateError> {
        self.run_at(source_dir, Utc::now())
    }

    /// Generate the document for `source_dir` with a fixed timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] from whichever stage failed first.
    pub fn run_at(
        &self,
        source_dir: &Path,
        now: DateTime<Utc>,
    ) -> Result<GenerateReport, GenerateError> {
        tracing::info!(source = %source_dir.display(), "Generating API documentation");

        // Template first: a broken theme must not wipe the staging directory.
        let template = DocumentTemplate::load(&self.config.template_path, &self.config.entry)?;

        self.stager.stage(&StageRequest::from_source_dir(source_dir))?;

        let descriptor = load_descriptor(self.stager.as_ref())?;
        let enricher = Enricher::new(self.stager.as_ref(), self.examples.as_ref());
        let api = enricher.enrich(descriptor)?;

        let generated_at = format_timestamp(now);
        let document = Document::new(&api, generated_at.clone());
        let html = template.render(&document)?;
        write_document(&self.config.output_path, &html)?;

        tracing::info!(
            output = %self.config.output_path.display(),
            endpoints = api.endpoints.len(),
            "Documentation generated"
        );
        Ok(GenerateReport {
            output_path: self.config.output_path.clone(),
            endpoint_count: api.endpoints.len(),
            generated_at,
        })
    }
}
