use std::collections::BTreeMap;

use serde_json::Value;
use tracing::warn;

use crate::error::{Result, TemplateError};
use crate::prefix::Prefix;
use crate::template::Template;

/// Read-only mapping of user variable names to compiled templates.
///
/// Built once before generation starts. Values are compiled with the same
/// prefix as the template so stored values may contain directives and
/// further variable references.
#[derive(Debug, Clone, Default)]
pub struct VariableStore {
    prefix: Prefix,
    vars: BTreeMap<String, Template>,
}

impl VariableStore {
    /// Empty store using `prefix`.
    pub fn new(prefix: Prefix) -> Self {
        Self {
            prefix,
            vars: BTreeMap::new(),
        }
    }

    /// Build a store from raw `name -> text` pairs.
    ///
    /// Each text is parsed as JSON. Text that is not valid JSON is kept as a
    /// plain string and a warning is emitted; this is never fatal.
    pub fn from_raw<I, K, V>(pairs: I, prefix: Prefix) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut store = Self::new(prefix);
        for (name, raw) in pairs {
            let name = name.into();
            let raw = raw.as_ref();
            let value = match serde_json::from_str::<Value>(raw) {
                Ok(value) => value,
                Err(err) => {
                    warn!(
                        variable = %name,
                        error = %err,
                        "failed to parse user variable, storing as string"
                    );
                    Value::String(raw.to_string())
                }
            };
            store.insert(name, &value)?;
        }
        Ok(store)
    }

    /// Compile and store `value` under `name`, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: &Value) -> Result<()> {
        let name = name.into();
        if name.is_empty() || self.prefix.strip(&name).is_some() {
            return Err(TemplateError::InvalidVariableName(name));
        }
        let template = Template::compile(value, &self.prefix)?;
        self.vars.insert(name, template);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.vars.get(name)
    }

    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
