//! Local filesystem adapter using std::fs and walkdir.

use std::io;
use std::path::Path;

use plantgen_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::{FileMode, TreeEntry},
    error::{PlantgenError, PlantgenResult},
};
use tracing::trace;
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        // A dangling symlink still occupies the name.
        path.symlink_metadata().is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> PlantgenResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn walk(&self, root: &Path) -> PlantgenResult<Vec<TreeEntry>> {
        let mut entries = Vec::new();

        for entry in WalkDir::new(root)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                map_io_error(&path, e.into(), "walk directory")
            })?;

            let relative = entry
                .path()
                .strip_prefix(root)
                .map_err(|e| ApplicationError::FilesystemError {
                    path: entry.path().to_path_buf(),
                    reason: format!("Entry escaped walk root: {e}"),
                })?
                .to_path_buf();
            let metadata = entry
                .metadata()
                .map_err(|e| map_io_error(entry.path(), e.into(), "read metadata"))?;
            let mode = mode_of(&metadata);

            trace!(path = %relative.display(), "Walked entry");
            if metadata.is_dir() {
                entries.push(TreeEntry::directory(relative, mode));
            } else if metadata.is_file() {
                entries.push(TreeEntry::file(relative, mode));
            }
        }

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> PlantgenResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> PlantgenResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn set_mode(&self, path: &Path, mode: FileMode) -> PlantgenResult<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode.bits()))
                .map_err(|e| map_io_error(path, e, "set permissions"))?;
        }
        #[cfg(not(unix))]
        {
            // Only the read-only flag is expressible here
            let mut perms = std::fs::metadata(path)
                .map_err(|e| map_io_error(path, e, "get metadata"))?
                .permissions();
            perms.set_readonly(mode.bits() & 0o200 == 0);
            std::fs::set_permissions(path, perms)
                .map_err(|e| map_io_error(path, e, "set permissions"))?;
        }
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> PlantgenResult<()> {
        std::fs::rename(from, to).map_err(|e| map_io_error(from, e, "rename"))
    }
}

#[cfg(unix)]
fn mode_of(metadata: &std::fs::Metadata) -> Option<FileMode> {
    use std::os::unix::fs::PermissionsExt;
    Some(FileMode::from_bits(metadata.permissions().mode()))
}

#[cfg(not(unix))]
fn mode_of(_metadata: &std::fs::Metadata) -> Option<FileMode> {
    None
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> PlantgenError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
