//! plantgen core - template instantiation engine.
//!
//! This crate provides the domain and application layers for the plantgen
//! package generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           plantgen-cli (CLI)            │
//! │   (clap, config, dialoguer prompter)    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  GenerateService -> resolver, replicator│
//! │          -> substitution engine         │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │        (Filesystem, Prompter)           │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     plantgen-adapters (Infrastructure)  │
//! │ (LocalFilesystem, MemoryFilesystem, ...) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use plantgen_core::domain::{PackagePath, ServiceName, SubstitutionPlan, TemplateTokens};
//!
//! let package = PackagePath::parse("github.com/acme/widget").unwrap();
//! let service = ServiceName::parse("Widget").unwrap();
//! let plan = SubstitutionPlan::for_generation(&TemplateTokens::default(), &package, &service)
//!     .unwrap();
//!
//! assert_eq!(
//!     plan.apply("package template // github.com/theplant/plantpkg/template"),
//!     "package widget // github.com/acme/widget"
//! );
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerateService, GenerateSettings, GenerationOutcome, GenerationPlan, GenerationRequest,
        ports::{Filesystem, InputValidator, Prompter},
    };
    pub use crate::domain::{
        FileMode, GenerationState, PackagePath, ServiceName, SubstitutionPlan, SubstitutionRule,
        TemplateTokens, TreeEntry,
    };
    pub use crate::error::{PlantgenError, PlantgenResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
