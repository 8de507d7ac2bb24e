//! Prompters used by `plantgen new`.
//!
//! [`FlagPrompter`] answers from command-line flags and defers everything
//! else to a fallback: the dialoguer-backed [`TerminalPrompter`], or a
//! `ScriptedPrompter` of defaults under `--yes`.

use std::{cell::RefCell, collections::VecDeque};

use plantgen_core::{
    application::ports::{InputValidator, Prompter},
    error::PlantgenResult,
};
use tracing::debug;

/// Answers from flags first; a missing flag is asked of the fallback.
///
/// A value given as a flag is validated once and never re-asked, so a bad
/// flag fails the run instead of turning into a prompt.
pub struct FlagPrompter<'a> {
    presets: RefCell<VecDeque<Option<String>>>,
    fallback: &'a dyn Prompter,
}

impl<'a> FlagPrompter<'a> {
    pub fn new(presets: impl IntoIterator<Item = Option<String>>, fallback: &'a dyn Prompter) -> Self {
        Self {
            presets: RefCell::new(presets.into_iter().collect()),
            fallback,
        }
    }
}

impl Prompter for FlagPrompter<'_> {
    fn ask(
        &self,
        label: &str,
        default: &str,
        validate: InputValidator<'_>,
    ) -> PlantgenResult<String> {
        let preset = self.presets.borrow_mut().pop_front().flatten();
        match preset {
            Some(value) => {
                debug!(label, value = %value, "Answered from flag");
                validate(&value)?;
                Ok(value)
            }
            None => self.fallback.ask(label, default, validate),
        }
    }
}

#[cfg(feature = "interactive")]
pub use terminal::TerminalPrompter;

#[cfg(feature = "interactive")]
mod terminal {
    use std::io;

    use dialoguer::{
        Input,
        theme::{ColorfulTheme, SimpleTheme, Theme},
    };
    use plantgen_core::{
        application::{
            ApplicationError,
            ports::{InputValidator, Prompter},
        },
        error::PlantgenResult,
    };

    /// Line prompts on the controlling terminal.
    ///
    /// dialoguer re-asks until the validator accepts, shows the default, and
    /// reports Ctrl-C as an interrupted read.
    pub struct TerminalPrompter {
        theme: Box<dyn Theme>,
    }

    impl TerminalPrompter {
        pub fn new(color: bool) -> Self {
            let theme: Box<dyn Theme> = if color {
                Box::new(ColorfulTheme::default())
            } else {
                Box::new(SimpleTheme)
            };
            Self { theme }
        }
    }

    impl Prompter for TerminalPrompter {
        fn ask(
            &self,
            label: &str,
            default: &str,
            validate: InputValidator<'_>,
        ) -> PlantgenResult<String> {
            Input::<String>::with_theme(self.theme.as_ref())
                .with_prompt(label)
                .default(default.to_owned())
                .validate_with(|value: &String| -> Result<(), String> {
                    validate(value).map_err(|e| e.to_string())
                })
                .interact_text()
                .map_err(map_prompt_error)
        }
    }

    fn map_prompt_error(err: dialoguer::Error) -> plantgen_core::error::PlantgenError {
        match err {
            dialoguer::Error::IO(e) if e.kind() == io::ErrorKind::Interrupted => {
                ApplicationError::Cancelled.into()
            }
            other => ApplicationError::PromptFailed {
                reason: other.to_string(),
            }
            .into(),
        }
    }

}
