use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::PackagePath,
    error::PlantgenResult,
};

/// Destination directory for a package under the workspace root.
///
/// Fails with `DestinationExists` if anything is already there. Read-only;
/// the check is best-effort and does not lock the path.
pub fn resolve_destination(
    fs: &dyn Filesystem,
    root: &Path,
    package: &PackagePath,
) -> PlantgenResult<PathBuf> {
    let destination = root.join(package.to_relative_path());
    debug!(destination = %destination.display(), "Resolved destination");

    if fs.exists(&destination) {
        return Err(ApplicationError::DestinationExists { path: destination }.into());
    }
    Ok(destination)
}

/// Whether `path` is `ancestor` or lies below it.
///
/// Both sides are made absolute against the working directory and `.`/`..`
/// are folded away first, so `tpl` and `./tpl/inner` compare as expected.
/// Symlinks are not resolved.
pub fn is_within(path: &Path, ancestor: &Path) -> PlantgenResult<bool> {
    Ok(normalize(path)?.starts_with(normalize(ancestor)?))
}

fn normalize(path: &Path) -> PlantgenResult<PathBuf> {
    let absolute = std::path::absolute(path).map_err(|e| ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to resolve path: {e}"),
    })?;

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}
