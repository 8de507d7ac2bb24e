//! Ordered literal substitution.
//!
//! A [`SubstitutionPlan`] is applied as a left fold: every rule scans the
//! output of the rule before it, never the original content. The result is
//! therefore order-dependent, and the plan keeps rules exactly in the order
//! the caller gave them.
//!
//! ```text
//! plan    = [("abc/def", "X"), ("def", "Y")]
//! content = "abc/def and def"
//!   rule 0 -> "X and def"
//!   rule 1 -> "X and Y"
//! ```
//!
//! Reversing the plan yields `"abc/Y and Y"`: the short token destroys the
//! qualified one before it can match. [`SubstitutionPlan::validate`] rejects
//! that ordering.

use serde::Serialize;

use super::{DomainError, PackagePath, ServiceName, TemplateTokens};

/// One literal find/replace pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubstitutionRule {
    from: String,
    to: String,
}

impl SubstitutionRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Result<Self, DomainError> {
        let from = from.into();
        if from.is_empty() {
            return Err(DomainError::EmptyToken);
        }
        Ok(Self { from, to: to.into() })
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }
}

/// An ordering problem detected in a plan.
///
/// Indices refer to positions in [`SubstitutionPlan::rules`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanHazard {
    /// The earlier rule's token is contained in the later rule's token, so
    /// the later token can never match intact.
    Shadowed { earlier: usize, later: usize },
    /// The value inserted by `rule` contains the token of the later rule
    /// `by`, and will be rewritten by it.
    ValueRewritten { rule: usize, by: usize },
}

/// An ordered list of substitution rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SubstitutionPlan {
    rules: Vec<SubstitutionRule>,
}

impl SubstitutionPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the generation plan. The order is fixed: the qualified template
    /// path first, because it contains the package-name token.
    pub fn for_generation(
        tokens: &TemplateTokens,
        package: &PackagePath,
        service: &ServiceName,
    ) -> Result<Self, DomainError> {
        let plan = Self::new()
            .with_rule(SubstitutionRule::new(
                tokens.qualified_path(),
                package.as_str(),
            )?)
            .with_rule(SubstitutionRule::new(
                tokens.package_token(),
                package.package_name(),
            )?)
            .with_rule(SubstitutionRule::new(
                tokens.service_token(),
                service.as_str(),
            )?);
        plan.validate()?;
        Ok(plan)
    }

    pub fn with_rule(mut self, rule: SubstitutionRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[SubstitutionRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule in order to text.
    pub fn apply(&self, content: &str) -> String {
        self.rules
            .iter()
            .fold(content.to_owned(), |acc, rule| acc.replace(&rule.from, &rule.to))
    }

    /// Apply every rule in order to raw bytes. Same semantics as
    /// [`Self::apply`]; content does not need to be UTF-8.
    pub fn apply_bytes(&self, content: &[u8]) -> Vec<u8> {
        self.rules.iter().fold(content.to_vec(), |acc, rule| {
            replace_bytes(&acc, rule.from.as_bytes(), rule.to.as_bytes())
        })
    }

    pub fn hazards(&self) -> Vec<PlanHazard> {
        let mut hazards = Vec::new();
        for (i, earlier) in self.rules.iter().enumerate() {
            for (j, later) in self.rules.iter().enumerate().skip(i + 1) {
                if later.from.contains(&earlier.from) {
                    hazards.push(PlanHazard::Shadowed { earlier: i, later: j });
                }
                if earlier.to.contains(&later.from) {
                    hazards.push(PlanHazard::ValueRewritten { rule: i, by: j });
                }
            }
        }
        hazards
    }

    /// Reject plans where a short token runs before a longer token that
    /// contains it.
    pub fn validate(&self) -> Result<(), DomainError> {
        for hazard in self.hazards() {
            if let PlanHazard::Shadowed { earlier, later } = hazard {
                return Err(DomainError::ShadowedToken {
                    earlier: self.rules[earlier].from.clone(),
                    later: self.rules[later].from.clone(),
                });
            }
        }
        Ok(())
    }
}

impl FromIterator<SubstitutionRule> for SubstitutionPlan {
    fn from_iter<I: IntoIterator<Item = SubstitutionRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

/// Replace all non-overlapping occurrences, scanning left to right.
/// `from` must be non-empty.
fn replace_bytes(haystack: &[u8], from: &[u8], to: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(haystack.len());
    let mut last = 0;
    let mut i = 0;
    while i + from.len() <= haystack.len() {
        if haystack[i..].starts_with(from) {
            out.extend_from_slice(&haystack[last..i]);
            out.extend_from_slice(to);
            i += from.len();
            last = i;
        } else {
            i += 1;
        }
    }
    out.extend_from_slice(&haystack[last..]);
    out
}
