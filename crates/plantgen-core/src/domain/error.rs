// ============================================================================
// domain/error.rs - INPUT AND PLAN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (the prompt loop re-displays them on every attempt)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Naming Errors
    // ========================================================================
    #[error("service name required")]
    EmptyServiceName,

    #[error("service name '{name}' must start with an upper-case character")]
    ServiceNameCasing { name: String },

    #[error("invalid package path '{path}': {reason}")]
    InvalidPackagePath { path: String, reason: String },

    // ========================================================================
    // Substitution Plan Errors
    // ========================================================================
    #[error("substitution token cannot be empty")]
    EmptyToken,

    #[error("token '{earlier}' is replaced before the longer token '{later}' that contains it")]
    ShadowedToken { earlier: String, later: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyServiceName => vec![
                "Enter a name for the generated service type".into(),
                "Example: Widget".into(),
            ],
            Self::ServiceNameCasing { name } => {
                let mut suggestions =
                    vec!["Service names are exported types and start upper-case".into()];
                let fixed = crate::domain::naming::default_service_name(name);
                if fixed != *name {
                    suggestions.push(format!("Try: {fixed}"));
                }
                suggestions
            }
            Self::InvalidPackagePath { .. } => vec![
                "Use a slash-separated import path relative to the workspace".into(),
                "Example: github.com/acme/widget".into(),
            ],
            Self::ShadowedToken { earlier, later } => vec![
                format!("Order '{later}' before '{earlier}' in the template tokens"),
                "Longer, more qualified tokens must be replaced first".into(),
            ],
            Self::EmptyToken => vec!["Check the template token configuration".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyServiceName
            | Self::ServiceNameCasing { .. }
            | Self::InvalidPackagePath { .. } => ErrorCategory::Validation,
            Self::EmptyToken | Self::ShadowedToken { .. } => ErrorCategory::Configuration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
}
