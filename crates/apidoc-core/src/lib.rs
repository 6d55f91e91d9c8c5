//! Descriptor-to-document pipeline for apidoc.
//!
//! Stages run strictly in order, once per generation:
//!
//! 1. **Stage** the descriptor and response bodies ([`apidoc_stage::Stager`])
//! 2. **Load** the staged `api.json` ([`load_descriptor`])
//! 3. **Enrich** each endpoint with its response body and derived flags ([`Enricher`])
//! 4. **Render** the enriched model into the template ([`DocumentTemplate`])
//!
//! [`Generator`] wires these together and writes the output only after the
//! whole render succeeded.
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::{Path, PathBuf};
//! use std::sync::Arc;
//! use apidoc_core::{Generator, GeneratorConfig};
//! use apidoc_stage::FsStager;
//!
//! let stager = Arc::new(FsStager::new(PathBuf::from("input")));
//! let config = GeneratorConfig {
//!     template_path: PathBuf::from("theme/index.html"),
//!     entry: "doc".to_owned(),
//!     output_path: PathBuf::from("theme/doc.html"),
//! };
//! let report = Generator::new(stager, config).run(Path::new("docs/api"))?;
//! println!("{} endpoints", report.endpoint_count);
//! # Ok(())
//! # }
//! ```

mod enricher;
mod example;
mod generator;
mod loader;
mod renderer;

pub use enricher::{Enricher, ResourceError};
pub use example::{EmptyExample, ExampleGenerator};
pub use generator::{GenerateError, GenerateReport, Generator, GeneratorConfig};
pub use loader::{ParseError, load_descriptor, load_file, parse_descriptor};
pub use renderer::{
    DocumentTemplate, RenderError, TIMESTAMP_FORMAT, format_timestamp, write_document,
};
