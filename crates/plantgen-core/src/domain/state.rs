use std::fmt;

use serde::Serialize;

/// Phase of one generation run.
///
/// ```text
/// CollectingInputs -> Validating -> Resolving -> Copying -> Substituting -> Done
///        \______________\_____________\____________\____________\-> Aborted
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationState {
    CollectingInputs,
    Validating,
    Resolving,
    Copying,
    Substituting,
    Done,
    Aborted,
}

impl GenerationState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CollectingInputs => "collecting-inputs",
            Self::Validating => "validating",
            Self::Resolving => "resolving",
            Self::Copying => "copying",
            Self::Substituting => "substituting",
            Self::Done => "done",
            Self::Aborted => "aborted",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Aborted)
    }

    /// Whether `next` is a legal transition from `self`.
    pub const fn can_advance_to(self, next: Self) -> bool {
        match (self, next) {
            (Self::Done | Self::Aborted, _) => false,
            (_, Self::Aborted) => true,
            (Self::CollectingInputs, Self::Validating)
            | (Self::Validating, Self::Resolving)
            | (Self::Resolving, Self::Copying)
            | (Self::Copying, Self::Substituting)
            | (Self::Substituting, Self::Done) => true,
            _ => false,
        }
    }
}

impl fmt::Display for GenerationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
