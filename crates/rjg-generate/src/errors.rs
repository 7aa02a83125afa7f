use thiserror::Error;

use rjg_core::{DirectiveKind, TemplateError};

/// Errors emitted while resolving a template.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
    #[error("malformed parameters for directive '{directive}': {reason}")]
    MalformedParams {
        directive: DirectiveKind,
        reason: String,
    },
    #[error("invalid bound for directive '{directive}': {reason}")]
    InvalidBound {
        directive: DirectiveKind,
        reason: String,
    },
    #[error("undefined variable: {token:?}")]
    UndefinedVariable { token: String },
    #[error("key {key:?} resolved to non-string value {value}")]
    NonStringKey {
        key: String,
        value: serde_json::Value,
    },
    #[error("variable cycle detected: {}", chain.join(" -> "))]
    VariableCycle { chain: Vec<String> },
    #[error("failed to resolve variable {token:?}: {source}")]
    InVariable {
        token: String,
        #[source]
        source: Box<GenerationError>,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GenerationError {
    pub(crate) fn malformed(directive: DirectiveKind, reason: impl Into<String>) -> Self {
        Self::MalformedParams {
            directive,
            reason: reason.into(),
        }
    }

    pub(crate) fn bound(directive: DirectiveKind, reason: impl Into<String>) -> Self {
        Self::InvalidBound {
            directive,
            reason: reason.into(),
        }
    }

    /// The innermost error, skipping variable expansion wrappers.
    pub fn root_cause(&self) -> &GenerationError {
        match self {
            GenerationError::InVariable { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
