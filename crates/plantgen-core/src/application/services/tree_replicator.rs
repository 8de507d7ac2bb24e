//! Tree Replicator - byte-for-byte copy of the template tree.
//!
//! Never looks inside files. Copying and permissions are two steps:
//! [`TreeReplicator::copy_tree`] writes the tree with the adapter's default
//! (writable) permissions and records the source modes, and
//! [`TreeReplicator::apply_modes`] puts them in place once substitution is
//! done. A read-only template file can therefore still be rewritten.
//! Entries without a usable mode get `FileMode` defaults, so no copy ends up
//! with zero permission bits.
//!
//! Not transactional: on error, whatever was already written stays on disk.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError, ports::Filesystem, services::substitution_engine::renamed_path,
    },
    domain::{EntryKind, FileMode, SubstitutionPlan},
    error::PlantgenResult,
};

/// What a copy produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CopyReport {
    /// Regular files written.
    pub files: usize,
    /// Directories created below the destination root.
    pub directories: usize,
    /// Total bytes written.
    pub bytes: u64,
}

/// A copied tree whose source permissions are still pending.
#[derive(Debug, Clone, Default)]
pub struct CopiedTree {
    pub report: CopyReport,
    /// Relative path and mode per entry, parents before children.
    modes: Vec<(PathBuf, FileMode)>,
}

impl CopiedTree {
    pub fn pending_modes(&self) -> &[(PathBuf, FileMode)] {
        &self.modes
    }
}

pub struct TreeReplicator<'a> {
    fs: &'a dyn Filesystem,
}

impl<'a> TreeReplicator<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs }
    }

    /// Mirror `source` into `destination`, leaving permissions for
    /// [`TreeReplicator::apply_modes`].
    #[instrument(skip_all, fields(source = %source.display(), destination = %destination.display()))]
    pub fn copy_tree(&self, source: &Path, destination: &Path) -> PlantgenResult<CopiedTree> {
        if !self.fs.is_dir(source) {
            return Err(ApplicationError::TemplateMissing {
                path: source.to_path_buf(),
            }
            .into());
        }

        let entries = self.fs.walk(source)?;
        let mut copied = CopiedTree::default();

        self.fs.create_dir_all(destination)?;

        for entry in &entries {
            let target = destination.join(&entry.path);
            match entry.kind {
                EntryKind::Directory => {
                    self.fs.create_dir_all(&target)?;
                    copied.report.directories += 1;
                }
                EntryKind::File => {
                    if let Some(parent) = target.parent() {
                        self.fs.create_dir_all(parent)?;
                    }
                    let content = self.fs.read_file(&source.join(&entry.path))?;
                    self.fs.write_file(&target, &content)?;
                    debug!(path = %entry.path.display(), bytes = content.len(), "Copied file");

                    copied.report.files += 1;
                    copied.report.bytes += content.len() as u64;
                }
            }
            copied
                .modes
                .push((entry.path.clone(), FileMode::or_default(entry.mode, entry.kind)));
        }

        info!(
            files = copied.report.files,
            directories = copied.report.directories,
            bytes = copied.report.bytes,
            "Template tree copied"
        );
        Ok(copied)
    }

    /// Apply the recorded source modes under `destination`.
    ///
    /// Pass the plan when entries were renamed, so each mode follows its
    /// entry to the new name.
    #[instrument(skip_all, fields(destination = %destination.display()))]
    pub fn apply_modes(
        &self,
        destination: &Path,
        copied: &CopiedTree,
        renamed_with: Option<&SubstitutionPlan>,
    ) -> PlantgenResult<()> {
        // Children first, so a read-only directory is locked only after its
        // contents are in place.
        for (relative, mode) in copied.modes.iter().rev() {
            let path = match renamed_with {
                Some(plan) => destination.join(renamed_path(relative, plan)),
                None => destination.join(relative),
            };
            self.fs.set_mode(&path, *mode)?;
        }
        debug!(entries = copied.modes.len(), "Permissions applied");
        Ok(())
    }
}
