//! Descriptor loading.

use std::path::{Path, PathBuf};

use apidoc_model::Descriptor;
use apidoc_stage::{StageError, Stager};

/// Error returned when the descriptor cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Staged descriptor missing or unreadable.
    #[error("Failed to read descriptor: {0}")]
    Read(#[source] StageError),
    /// Descriptor file outside staging missing or unreadable.
    #[error("Failed to read descriptor {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Descriptor is not JSON or does not match the expected shape.
    #[error("Invalid descriptor {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Decode descriptor bytes. `path` is only used for diagnostics.
///
/// # Errors
///
/// Returns [`ParseError::Decode`] if the bytes are not a valid descriptor.
pub fn parse_descriptor(bytes: &[u8], path: &Path) -> Result<Descriptor, ParseError> {
    serde_json::from_slice(bytes).map_err(|source| ParseError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and decode a descriptor file directly, bypassing staging.
///
/// # Errors
///
/// Returns [`ParseError`] if the file can't be read or decoded.
pub fn load_file(path: &Path) -> Result<Descriptor, ParseError> {
    let bytes = std::fs::read(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_descriptor(&bytes, path)
}

/// Read and decode the staged descriptor.
///
/// # Errors
///
/// Returns [`ParseError`] if the descriptor can't be read or decoded.
pub fn load_descriptor(stager: &dyn Stager) -> Result<Descriptor, ParseError> {
    let path = stager.descriptor_path();
    let bytes = stager.read_descriptor().map_err(ParseError::Read)?;
    let descriptor = parse_descriptor(&bytes, &path)?;
    tracing::info!(
        path = %path.display(),
        endpoints = descriptor.endpoints.len(),
        "Descriptor loaded"
    );
    Ok(descriptor)
}
