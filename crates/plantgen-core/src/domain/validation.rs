use crate::domain::{
    DomainError, PackagePath, ServiceName, TemplateTokens,
    naming::validate_service_name,
};

/// Centralized domain validation.
///
/// The orchestrator runs these as one-shot checks before touching the
/// filesystem, independently of whatever the prompt loop accepted.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_service_name(name: &ServiceName) -> Result<(), DomainError> {
        validate_service_name(name.as_str())
    }

    pub fn validate_package_path(path: &PackagePath) -> Result<(), DomainError> {
        PackagePath::parse(path.as_str()).map(|_| ())
    }

    pub fn validate_tokens(tokens: &TemplateTokens) -> Result<(), DomainError> {
        for token in [
            tokens.qualified_path(),
            tokens.package_token(),
            tokens.service_token(),
        ] {
            if token.is_empty() {
                return Err(DomainError::EmptyToken);
            }
        }
        Ok(())
    }
}
