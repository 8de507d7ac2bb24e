//! Driven (output) ports - implemented by infrastructure.

use std::path::Path;

use crate::domain::{FileMode, TreeEntry};
use crate::error::PlantgenResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `plantgen_adapters::filesystem::LocalFilesystem` (production)
/// - `plantgen_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Paths passed in are absolute or relative to the process; paths returned
/// by [`Filesystem::walk`] are relative to the walked root.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if anything exists at path.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> PlantgenResult<()>;

    /// Every entry below `root` (not `root` itself), sorted by path so
    /// parents come before their children.
    fn walk(&self, root: &Path) -> PlantgenResult<Vec<TreeEntry>>;

    /// Read a file's raw bytes.
    fn read_file(&self, path: &Path) -> PlantgenResult<Vec<u8>>;

    /// Write raw bytes, replacing any previous content.
    fn write_file(&self, path: &Path, content: &[u8]) -> PlantgenResult<()>;

    /// Set permission bits.
    fn set_mode(&self, path: &Path, mode: FileMode) -> PlantgenResult<()>;

    /// Rename an entry.
    fn rename(&self, from: &Path, to: &Path) -> PlantgenResult<()>;
}

/// Live validator handed to a [`Prompter`].
pub type InputValidator<'a> = &'a dyn Fn(&str) -> PlantgenResult<()>;

/// Port for interactive input.
///
/// Implemented by:
/// - `plantgen_cli::prompt::TerminalPrompter` (dialoguer)
/// - `plantgen_adapters::prompt::ScriptedPrompter` (flags and tests)
pub trait Prompter {
    /// Ask for one value.
    ///
    /// An empty answer selects `default`. Implementations re-ask while
    /// `validate` fails and they can still get another answer; otherwise they
    /// return the validation error. Cancellation returns
    /// `ApplicationError::Cancelled`.
    fn ask(&self, label: &str, default: &str, validate: InputValidator<'_>)
    -> PlantgenResult<String>;
}
