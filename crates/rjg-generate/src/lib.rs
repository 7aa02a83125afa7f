//! Template resolution engine for rjg.
//!
//! This crate turns a compiled template plus an iteration index into a
//! concrete JSON value, dispatching directives to their generators and
//! expanding user variables.

pub mod context;
pub mod engine;
pub mod errors;
pub mod generators;
pub mod model;
pub mod output;
pub mod params;
pub mod random;

pub use context::GenerationContext;
pub use engine::{TemplateEngine, resolve};
pub use errors::GenerationError;
pub use model::GenerationReport;
pub use random::{RandomSource, seeded_rng};
