//! Core contracts for rjg.
//!
//! This crate defines the compiled template AST, the fixed directive table,
//! the directive prefix and the read-only variable store shared by the
//! generator and the CLI.

pub mod directive;
pub mod error;
pub mod prefix;
pub mod template;
pub mod variables;

pub use directive::{DirectiveKind, ParamShape};
pub use error::{Result, TemplateError};
pub use prefix::{DEFAULT_PREFIX, Prefix};
pub use template::{DirectiveNode, ObjectEntry, Params, Template};
pub use variables::VariableStore;
