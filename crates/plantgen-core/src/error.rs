//! Unified error handling for plantgen core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for plantgen core operations.
#[derive(Debug, Error, Clone)]
pub enum PlantgenError {
    /// Input or plan rule violations.
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Orchestration and I/O failures.
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl PlantgenError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in plantgen".into(),
                "Please report this issue at: https://github.com/theplant/plantgen/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether the user cancelled input collection.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Application(ApplicationError::Cancelled))
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
    Cancelled,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type PlantgenResult<T> = Result<T, PlantgenError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn domain_errors_display_verbatim() {
        let err: PlantgenError = DomainError::EmptyServiceName.into();
        assert_eq!(err.to_string(), "service name required");
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn existing_destination_is_a_conflict() {
        let err: PlantgenError = ApplicationError::DestinationExists {
            path: PathBuf::from("/ws/a"),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Conflict);
    }

    #[test]
    fn cancellation_is_detected() {
        let err: PlantgenError = ApplicationError::Cancelled.into();
        assert!(err.is_cancelled());
        assert_eq!(err.category(), ErrorCategory::Cancelled);
    }
}
