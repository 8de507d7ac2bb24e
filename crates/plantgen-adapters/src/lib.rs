//! Infrastructure adapters for plantgen.
//!
//! This crate implements the ports defined in `plantgen-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod prompt;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use prompt::ScriptedPrompter;
