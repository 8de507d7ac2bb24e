//! Service naming rules.
//!
//! The service name becomes an exported type in the generated package, so it
//! must be non-empty and start with an upper-case character. Both checks work
//! on decoded `char`s, never on bytes: `"Élan"` is one leading character, not
//! two storage units.

use std::fmt;

use serde::Serialize;

use super::DomainError;

/// Check a proposed service name.
///
/// Pure and cheap; the prompt loop calls it on every attempt.
pub fn validate_service_name(input: &str) -> Result<(), DomainError> {
    match input.chars().next() {
        None => Err(DomainError::EmptyServiceName),
        Some(first) if !first.is_uppercase() => Err(DomainError::ServiceNameCasing {
            name: input.to_owned(),
        }),
        Some(_) => Ok(()),
    }
}

/// Default service name offered for a package: the package name with its
/// first character upper-cased.
pub fn default_service_name(package_name: &str) -> String {
    let mut chars = package_name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A validated service name.
///
/// Only constructible through [`ServiceName::parse`], so holding one proves
/// the naming rules passed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ServiceName(String);

impl ServiceName {
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        validate_service_name(input)?;
        Ok(Self(input.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ServiceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_is_rejected() {
        assert_eq!(validate_service_name(""), Err(DomainError::EmptyServiceName));
    }

    #[test]
    fn lower_case_name_is_rejected() {
        assert_eq!(
            validate_service_name("hello"),
            Err(DomainError::ServiceNameCasing {
                name: "hello".into()
            })
        );
    }

    #[test]
    fn upper_case_name_is_accepted() {
        assert!(validate_service_name("Hello").is_ok());
        assert!(validate_service_name("H").is_ok());
    }

    #[test]
    fn multibyte_leading_char_is_classified_as_a_char() {
        assert!(validate_service_name("Élan").is_ok());
        assert!(validate_service_name("Ωmega").is_ok());
        assert!(validate_service_name("élan").is_err());
    }

    #[test]
    fn uncased_script_is_not_upper_case() {
        assert!(matches!(
            validate_service_name("世界"),
            Err(DomainError::ServiceNameCasing { .. })
        ));
    }

    #[test]
    fn leading_digit_or_space_is_rejected() {
        assert!(validate_service_name("1Widget").is_err());
        assert!(validate_service_name(" Widget").is_err());
    }

    #[test]
    fn default_name_capitalises_first_char() {
        assert_eq!(default_service_name("widget"), "Widget");
        assert_eq!(default_service_name("élan"), "Élan");
        assert_eq!(default_service_name("Widget"), "Widget");
        assert_eq!(default_service_name(""), "");
    }

    #[test]
    fn default_name_passes_validation_for_cased_names() {
        let name = default_service_name("mynewpkg");
        assert!(ServiceName::parse(&name).is_ok());
    }

    #[test]
    fn parse_keeps_input_verbatim() {
        let name = ServiceName::parse("WidgetService").unwrap();
        assert_eq!(name.as_str(), "WidgetService");
        assert_eq!(name.to_string(), "WidgetService");
    }
}
