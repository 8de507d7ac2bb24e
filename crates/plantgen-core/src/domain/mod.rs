//! Core domain layer for plantgen.
//!
//! Pure logic with no I/O: naming rules, package paths, the template tokens,
//! and the ordered substitution plan. Filesystem and prompting concerns are
//! reached through the ports in `crate::application::ports`.
//!
//! - **No I/O**: nothing here touches the filesystem or a terminal
//! - **Validated types**: `PackagePath` and `ServiceName` only exist once
//!   their rules have passed
//! - **Order is data**: a `SubstitutionPlan` is applied as a left fold
pub mod common;
pub mod error;
pub mod naming;
pub mod package_path;
pub mod state;
pub mod substitution;
pub mod tokens;

mod validation;

pub use common::{EntryKind, FileMode, TreeEntry};
pub use error::{DomainError, ErrorCategory};
pub use naming::{ServiceName, default_service_name, validate_service_name};
pub use package_path::PackagePath;
pub use state::GenerationState;
pub use substitution::{PlanHazard, SubstitutionPlan, SubstitutionRule};
pub use tokens::{DEFAULT_QUALIFIED_PATH, DEFAULT_SERVICE_TOKEN, TemplateTokens};
pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validator_rejects_empty_tokens() {
        let tokens = TemplateTokens::new("github.com/x/template", "", "Template");
        assert_eq!(
            DomainValidator::validate_tokens(&tokens),
            Err(DomainError::EmptyToken)
        );
        assert!(DomainValidator::validate_tokens(&TemplateTokens::default()).is_ok());
    }

    #[test]
    fn validator_accepts_parsed_values() {
        let package = PackagePath::parse("github.com/acme/widget").unwrap();
        let service = ServiceName::parse("Widget").unwrap();
        assert!(DomainValidator::validate_package_path(&package).is_ok());
        assert!(DomainValidator::validate_service_name(&service).is_ok());
    }
}
