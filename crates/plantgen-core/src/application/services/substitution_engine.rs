//! Token Substitution Engine - applies a plan to every file of a tree.
//!
//! The set of files is snapshotted before the first rewrite, so rewriting a
//! file never changes what is still to be visited. Each file is read once,
//! folded through the plan in order, and written back in full.
//!
//! Renaming entries is a separate, opt-in step ([`SubstitutionEngine::rename_paths`]);
//! [`SubstitutionEngine::apply_plan`] only touches contents.
//!
//! Not transactional: a failure leaves earlier files rewritten.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::SubstitutionPlan,
    error::PlantgenResult,
};

/// What a substitution pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SubstitutionReport {
    pub files_scanned: usize,
    pub files_rewritten: usize,
    pub paths_renamed: usize,
}

pub struct SubstitutionEngine<'a> {
    fs: &'a dyn Filesystem,
}

impl<'a> SubstitutionEngine<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs }
    }

    /// Rewrite the contents of every regular file under `root`.
    ///
    /// Files whose content the plan leaves unchanged are not written.
    #[instrument(skip_all, fields(root = %root.display(), rules = plan.len()))]
    pub fn apply_plan(
        &self,
        root: &Path,
        plan: &SubstitutionPlan,
    ) -> PlantgenResult<SubstitutionReport> {
        let files: Vec<_> = self
            .fs
            .walk(root)?
            .into_iter()
            .filter(|entry| entry.is_file())
            .map(|entry| root.join(entry.path))
            .collect();

        let mut report = SubstitutionReport::default();
        for path in &files {
            let original = self.fs.read_file(path)?;
            let rewritten = plan.apply_bytes(&original);
            report.files_scanned += 1;

            if rewritten != original {
                self.fs.write_file(path, &rewritten)?;
                report.files_rewritten += 1;
                debug!(path = %path.display(), "Rewrote file");
            }
        }

        info!(
            scanned = report.files_scanned,
            rewritten = report.files_rewritten,
            "Substitution applied"
        );
        Ok(report)
    }

    /// Rename files and directories whose name contains a token.
    ///
    /// Works on one path component at a time, deepest entries first, so a
    /// directory is renamed only after everything below it. Tokens that span
    /// a `/` never match a single component. Returns the number of renamed
    /// entries.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn rename_paths(&self, root: &Path, plan: &SubstitutionPlan) -> PlantgenResult<usize> {
        let mut entries = self.fs.walk(root)?;
        entries.sort_by(|a, b| {
            b.path
                .components()
                .count()
                .cmp(&a.path.components().count())
                .then_with(|| b.path.cmp(&a.path))
        });

        let mut renamed = 0;
        for entry in &entries {
            let Some(name) = entry.path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let new_name = plan.apply(name);
            if new_name == name {
                continue;
            }

            let from = root.join(&entry.path);
            let to = from.with_file_name(&new_name);
            if self.fs.exists(&to) {
                return Err(ApplicationError::FilesystemError {
                    path: to,
                    reason: format!("cannot rename '{name}': target already exists"),
                }
                .into());
            }
            self.fs.rename(&from, &to)?;
            debug!(from = %from.display(), to = %to.display(), "Renamed entry");
            renamed += 1;
        }

        info!(renamed, "Paths renamed");
        Ok(renamed)
    }
}

/// Where a relative path ends up after [`SubstitutionEngine::rename_paths`].
pub fn renamed_path(relative: &Path, plan: &SubstitutionPlan) -> PathBuf {
    relative
        .components()
        .map(|component| match component.as_os_str().to_str() {
            Some(name) => PathBuf::from(plan.apply(name)),
            None => PathBuf::from(component.as_os_str()),
        })
        .collect()
}
