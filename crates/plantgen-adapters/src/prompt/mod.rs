//! Non-interactive prompters.
//!
//! The dialoguer-backed terminal prompter lives in the CLI crate, next to the
//! terminal it owns.

mod scripted;

pub use scripted::ScriptedPrompter;
