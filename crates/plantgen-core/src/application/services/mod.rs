//! Application services - the generation pipeline.
//!
//! Leaves first: the path resolver, the tree replicator and the substitution
//! engine each do one filesystem job; `GenerateService` sequences them.

pub mod generate_service;
pub mod path_resolver;
pub mod substitution_engine;
pub mod tree_replicator;

pub use generate_service::{
    DEFAULT_PACKAGE, GenerateService, GenerateSettings, GenerationOutcome, GenerationPlan, GenerationRequest,
};
pub use path_resolver::{is_within, resolve_destination};
pub use substitution_engine::{SubstitutionEngine, SubstitutionReport};
pub use tree_replicator::{CopiedTree, CopyReport, TreeReplicator};
