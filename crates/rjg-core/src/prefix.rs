use std::fmt;

use crate::error::{Result, TemplateError};

/// Marker used when no prefix is configured.
pub const DEFAULT_PREFIX: &str = "$";

/// Marker that distinguishes directive and variable tokens from literal strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Prefix(String);

impl Prefix {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(TemplateError::InvalidPrefix(value, "prefix must not be empty"));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(TemplateError::InvalidPrefix(
                value,
                "prefix must not contain whitespace",
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the token name when `token` starts with the prefix.
    pub fn strip<'a>(&self, token: &'a str) -> Option<&'a str> {
        token.strip_prefix(self.0.as_str())
    }

    /// Formats `name` back into its prefixed token form.
    pub fn token(&self, name: &str) -> String {
        format!("{}{name}", self.0)
    }
}

impl Default for Prefix {
    fn default() -> Self {
        Self(DEFAULT_PREFIX.to_string())
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
