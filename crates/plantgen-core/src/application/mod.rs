//! Application layer for plantgen.
//!
//! This layer contains:
//! - **Services**: the path resolver, tree replicator, substitution engine
//!   and the `GenerateService` orchestrator
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! Input rules live in `crate::domain`; this layer sequences them against the
//! filesystem.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    CopiedTree, CopyReport, DEFAULT_PACKAGE, GenerateService, GenerateSettings, GenerationOutcome, GenerationPlan,
    GenerationRequest, SubstitutionEngine, SubstitutionReport, TreeReplicator,
    resolve_destination,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, InputValidator, Prompter};

pub use error::ApplicationError;
