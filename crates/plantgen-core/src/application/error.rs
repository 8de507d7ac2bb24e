//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not input rules.
//! Input rule errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during a generation run.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The user cancelled a prompt.
    #[error("Input cancelled")]
    Cancelled,

    /// The prompt backend failed for a reason other than cancellation.
    #[error("Prompt failed: {reason}")]
    PromptFailed { reason: String },

    /// Something already exists at the destination.
    #[error("{} already exists, remove it first to generate", path.display())]
    DestinationExists { path: PathBuf },

    /// The template source directory is missing.
    #[error("Template directory not found: {}", path.display())]
    TemplateMissing { path: PathBuf },

    /// The destination would be created inside the template it copies.
    #[error("Destination {} is inside the template directory", path.display())]
    DestinationInsideTemplate { path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {}: {reason}", path.display())]
    FilesystemError { path: PathBuf, reason: String },

    /// An in-memory adapter's lock was poisoned.
    #[error("Filesystem lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Cancelled => vec!["Nothing was generated".into()],
            Self::DestinationExists { path } => vec![
                format!("Remove the existing directory: rm -rf {}", path.display()),
                "Or choose a different package path".into(),
            ],
            Self::TemplateMissing { path } => vec![
                format!("Expected the template at {}", path.display()),
                "Fetch the template package into your workspace".into(),
                "Or point --template at a template directory".into(),
            ],
            Self::DestinationInsideTemplate { .. } => vec![
                "Choose a package path outside the template package".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "A partially generated tree may remain at the destination; remove it before retrying"
                    .into(),
            ],
            Self::LockPoisoned | Self::PromptFailed { .. } => {
                vec!["Check the error details above".into()]
            }
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Cancelled => ErrorCategory::Cancelled,
            Self::DestinationExists { .. } => ErrorCategory::Conflict,
            Self::DestinationInsideTemplate { .. } => ErrorCategory::Validation,
            Self::TemplateMissing { .. } => ErrorCategory::NotFound,
            Self::FilesystemError { .. } | Self::LockPoisoned | Self::PromptFailed { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}
