//! Resource staging for apidoc.
//!
//! Before generation, the descriptor (`api.json`) and its response bodies
//! (`responses/`) are copied into a working location. The rest of the pipeline
//! only reads through the [`Stager`] trait, so it never depends on how the
//! files got there.
//!
//! The crate provides:
//! - [`Stager`] trait with `stage()`, `read_descriptor()` and `read_response()`
//! - [`FsStager`] which copies into a directory on disk
//! - [`MockStager`] holding everything in memory (behind the `mock` feature)
//!
//! # Example
//!
//! ```ignore
//! use apidoc_stage::{FsStager, StageRequest, Stager};
//!
//! let stager = FsStager::new("input".into());
//! stager.stage(&StageRequest::from_source_dir("docs/api"))?;
//! let bytes = stager.read_descriptor()?;
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod stager;

pub use fs::FsStager;
#[cfg(feature = "mock")]
pub use mock::MockStager;
pub use stager::{
    DESCRIPTOR_FILENAME, RESPONSES_DIRNAME, StageError, StageErrorKind, StageRequest, Stager,
};
