//! Filesystem staging.
//!
//! Stages by copying: the staging directory is removed, recreated, and the
//! descriptor and response tree are copied into it. File and directory
//! permissions are carried over from the source.

use std::fs;
use std::path::{Path, PathBuf};

use crate::stager::{
    DESCRIPTOR_FILENAME, RESPONSES_DIRNAME, StageError, StageErrorKind, StageRequest, Stager,
    validate_reference,
};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Stager that copies resources into a directory on disk.
///
/// Layout produced under `root`:
///
/// ```text
/// <root>/api.json
/// <root>/responses/...
/// ```
#[derive(Debug)]
pub struct FsStager {
    root: PathBuf,
}

impl FsStager {
    /// Create a stager that owns `root`. The directory is wiped on every
    /// [`stage`](Stager::stage) call.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Staging root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn responses_dir(&self) -> PathBuf {
        self.root.join(RESPONSES_DIRNAME)
    }

    /// Refuse sources that live under the staging root, or a root that lives
    /// under the responses tree. Either way `reset` would destroy the input.
    fn check_disjoint(&self, request: &StageRequest) -> Result<(), StageError> {
        let Ok(root) = fs::canonicalize(&self.root) else {
            // A root that doesn't exist yet can't contain anything.
            return Ok(());
        };
        let descriptor =
            fs::canonicalize(&request.descriptor).map_err(|e| io_error(e, &request.descriptor))?;
        let overlap = |path: &Path| {
            StageError::new(StageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND)
        };
        if descriptor.starts_with(&root) {
            return Err(overlap(&request.descriptor));
        }
        if let Ok(responses) = fs::canonicalize(&request.responses_dir)
            && (responses.starts_with(&root) || root.starts_with(&responses))
        {
            return Err(overlap(&request.responses_dir));
        }
        Ok(())
    }

    /// Remove and recreate the staging root.
    fn reset(&self) -> Result<(), StageError> {
        match fs::remove_dir_all(&self.root) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(io_error(e, &self.root)),
        }
        fs::create_dir_all(&self.root).map_err(|e| io_error(e, &self.root))
    }
}

impl Stager for FsStager {
    fn stage(&self, request: &StageRequest) -> Result<(), StageError> {
        if !request.descriptor.is_file() {
            return Err(StageError::not_found(&request.descriptor).with_backend(BACKEND));
        }

        self.check_disjoint(request)?;
        self.reset()?;
        copy_file(&request.descriptor, &self.descriptor_path())?;

        if request.responses_dir.exists() {
            copy_dir(&request.responses_dir, &self.responses_dir())?;
        } else {
            tracing::debug!(
                path = %request.responses_dir.display(),
                "No responses directory, skipping"
            );
        }

        tracing::info!(root = %self.root.display(), "Resources staged");
        Ok(())
    }

    fn descriptor_path(&self) -> PathBuf {
        self.root.join(DESCRIPTOR_FILENAME)
    }

    fn read_descriptor(&self) -> Result<Vec<u8>, StageError> {
        let path = self.descriptor_path();
        fs::read(&path).map_err(|e| io_error(e, &path))
    }

    fn read_response(&self, reference: &str) -> Result<Vec<u8>, StageError> {
        validate_reference(reference).map_err(|e| e.with_backend(BACKEND))?;
        let path = self.responses_dir().join(reference);
        fs::read(&path).map_err(|e| io_error(e, &path))
    }
}

fn io_error(err: std::io::Error, path: &Path) -> StageError {
    StageError::io(err, path).with_backend(BACKEND)
}

/// Copy a single file and carry over its permissions.
fn copy_file(source: &Path, dest: &Path) -> Result<(), StageError> {
    fs::copy(source, dest).map_err(|e| io_error(e, source))?;
    let permissions = fs::metadata(source)
        .map_err(|e| io_error(e, source))?
        .permissions();
    fs::set_permissions(dest, permissions).map_err(|e| io_error(e, dest))
}

/// Recursively copy `source` into a new directory `dest`.
///
/// `dest` must not exist yet. Any failure aborts the copy.
fn copy_dir(source: &Path, dest: &Path) -> Result<(), StageError> {
    let metadata = fs::metadata(source).map_err(|e| io_error(e, source))?;
    if !metadata.is_dir() {
        return Err(StageError::new(StageErrorKind::NotADirectory)
            .with_path(source)
            .with_backend(BACKEND));
    }
    if dest.exists() {
        return Err(StageError::new(StageErrorKind::AlreadyExists)
            .with_path(dest)
            .with_backend(BACKEND));
    }

    fs::create_dir_all(dest).map_err(|e| io_error(e, dest))?;

    let entries = fs::read_dir(source).map_err(|e| io_error(e, source))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_error(e, source))?;
        let source_path = entry.path();
        let dest_path = dest.join(entry.file_name());
        let file_type = entry.file_type().map_err(|e| io_error(e, &source_path))?;
        if file_type.is_dir() {
            copy_dir(&source_path, &dest_path)?;
        } else if file_type.is_symlink() && source_path.is_dir() {
            // Linked directories are not followed; they may loop back.
            tracing::warn!(path = %source_path.display(), "Skipping symlinked directory");
        } else {
            copy_file(&source_path, &dest_path)?;
        }
    }

    // Permissions last, so a read-only source directory can still be filled.
    fs::set_permissions(dest, metadata.permissions()).map_err(|e| io_error(e, dest))
}
