//! Prompter that answers from a fixed queue.
//!
//! Used when inputs come from command-line flags and in tests. Each call to
//! `ask` consumes answers until one passes the validator.

use std::{cell::RefCell, collections::VecDeque};

use plantgen_core::{
    application::{
        ApplicationError,
        ports::{InputValidator, Prompter},
    },
    error::PlantgenResult,
};
use tracing::debug;

/// Answers prompts from a queue of pre-recorded inputs.
///
/// An empty string answer selects the prompt's default. A rejected answer is
/// dropped and the next one tried; when the queue runs dry the last
/// validation error is returned, or `Cancelled` if nothing was tried.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<String>>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: RefCell::new(answers.into_iter().map(Into::into).collect()),
        }
    }

    /// A prompter that accepts every default.
    pub fn defaults(count: usize) -> Self {
        Self::new(std::iter::repeat_n("", count))
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(
        &self,
        label: &str,
        default: &str,
        validate: InputValidator<'_>,
    ) -> PlantgenResult<String> {
        let mut last_error = None;

        loop {
            let Some(answer) = self.answers.borrow_mut().pop_front() else {
                return Err(last_error.unwrap_or_else(|| ApplicationError::Cancelled.into()));
            };
            let value = if answer.is_empty() {
                default.to_owned()
            } else {
                answer
            };

            match validate(&value) {
                Ok(()) => {
                    debug!(label, value = %value, "Scripted answer accepted");
                    return Ok(value);
                }
                Err(e) => {
                    debug!(label, value = %value, error = %e, "Scripted answer rejected");
                    last_error = Some(e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plantgen_core::domain::validate_service_name;
    use plantgen_core::error::PlantgenError;

    fn service_rule(input: &str) -> PlantgenResult<()> {
        Ok(validate_service_name(input)?)
    }

    #[test]
    fn empty_answer_selects_default() {
        let prompter = ScriptedPrompter::defaults(1);
        let value = prompter.ask("Service Name", "Widget", &service_rule).unwrap();
        assert_eq!(value, "Widget");
        assert_eq!(prompter.remaining(), 0);
    }

    #[test]
    fn rejected_answer_falls_through_to_next() {
        let prompter = ScriptedPrompter::new(["widget", "Widget"]);
        let value = prompter.ask("Service Name", "", &service_rule).unwrap();
        assert_eq!(value, "Widget");
    }

    #[test]
    fn last_validation_error_is_returned_when_exhausted() {
        let prompter = ScriptedPrompter::new(["widget"]);
        let err = prompter.ask("Service Name", "", &service_rule).unwrap_err();
        assert!(matches!(err, PlantgenError::Domain(_)));
        assert!(err.to_string().contains("widget"));
    }

    #[test]
    fn empty_queue_is_cancellation() {
        let prompter = ScriptedPrompter::new(Vec::<String>::new());
        let err = prompter.ask("Service Name", "Widget", &service_rule).unwrap_err();
        assert!(err.is_cancelled());
    }
}
