//! Application ports (traits) for external dependencies.
//!
//! Adapters in `plantgen-adapters` and the CLI implement these.
//!
//! - `Filesystem`: directory walks, byte reads/writes, permission bits
//! - `Prompter`: line input with a live validator

pub mod output;

pub use output::{Filesystem, InputValidator, Prompter};

#[cfg(test)]
pub use output::MockFilesystem;
