use serde::Serialize;

use super::{DomainError, PackagePath};

/// Import path of the canonical template package.
pub const DEFAULT_QUALIFIED_PATH: &str = "github.com/theplant/plantpkg/template";

/// Name-convention token for the generated service type.
pub const DEFAULT_SERVICE_TOKEN: &str = "Template";

/// The literal tokens the template tree is written with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateTokens {
    qualified_path: String,
    package_token: String,
    service_token: String,
}

impl TemplateTokens {
    pub fn new(
        qualified_path: impl Into<String>,
        package_token: impl Into<String>,
        service_token: impl Into<String>,
    ) -> Self {
        Self {
            qualified_path: qualified_path.into(),
            package_token: package_token.into(),
            service_token: service_token.into(),
        }
    }

    /// Tokens for a template published at `qualified_path`; the package-name
    /// token is its trailing segment.
    pub fn from_qualified_path(
        qualified_path: &str,
        service_token: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let path = PackagePath::parse(qualified_path)?;
        Ok(Self::new(
            path.as_str(),
            path.package_name(),
            service_token,
        ))
    }

    pub fn qualified_path(&self) -> &str {
        &self.qualified_path
    }

    pub fn package_token(&self) -> &str {
        &self.package_token
    }

    pub fn service_token(&self) -> &str {
        &self.service_token
    }
}

impl Default for TemplateTokens {
    fn default() -> Self {
        Self::new(DEFAULT_QUALIFIED_PATH, "template", DEFAULT_SERVICE_TOKEN)
    }
}
