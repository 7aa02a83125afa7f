use thiserror::Error;

/// Errors raised while compiling templates or building the variable store.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The text is not valid JSON.
    #[error("invalid JSON template: {0}")]
    Json(#[from] serde_json::Error),
    /// An object carries more than one directive key.
    #[error("object mixes several directive keys: {}", keys.join(", "))]
    AmbiguousDirective { keys: Vec<String> },
    /// The directive prefix is unusable.
    #[error("invalid prefix '{0}': {1}")]
    InvalidPrefix(String, &'static str),
    /// A variable name is empty or carries the prefix.
    #[error("invalid variable name '{0}'")]
    InvalidVariableName(String),
}

/// Convenience alias for results returned by rjg-core.
pub type Result<T> = std::result::Result<T, TemplateError>;
