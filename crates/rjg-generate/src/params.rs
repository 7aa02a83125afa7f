use serde_json::Value;

use rjg_core::{DirectiveKind, Params, Template};

use crate::errors::GenerationError;

/// Required field a directive reads from its object parameters.
#[derive(Clone, Copy, Debug)]
pub struct ParamSpec {
    pub key: &'static str,
}

impl ParamSpec {
    pub const fn new(key: &'static str) -> Self {
        Self { key }
    }
}

/// Validated view over an object parameter.
pub struct ParamMap<'a> {
    object: &'a Template,
}

/// Check that `params` is an object carrying every required field.
///
/// Unknown fields are ignored.
pub fn validate_params<'a>(
    params: &'a Params,
    specs: &[ParamSpec],
    directive: DirectiveKind,
) -> Result<ParamMap<'a>, GenerationError> {
    let object = match params {
        Params::Value(template) if matches!(template.as_ref(), Template::Object(_)) => {
            template.as_ref()
        }
        _ => {
            let fields: Vec<&str> = specs.iter().map(|spec| spec.key).collect();
            return Err(GenerationError::malformed(
                directive,
                format!("requires a {{{}}} object", fields.join(", ")),
            ));
        }
    };

    for spec in specs {
        if object.field(spec.key).is_none() {
            return Err(GenerationError::malformed(
                directive,
                format!("missing required param '{}'", spec.key),
            ));
        }
    }

    Ok(ParamMap { object })
}

impl<'a> ParamMap<'a> {
    pub fn get(&self, key: &str) -> Option<&'a Template> {
        self.object.field(key)
    }

    /// Fetch a field that [`validate_params`] already checked for.
    pub fn require(
        &self,
        key: &str,
        directive: DirectiveKind,
    ) -> Result<&'a Template, GenerationError> {
        self.get(key).ok_or_else(|| {
            GenerationError::malformed(directive, format!("missing required param '{key}'"))
        })
    }
}

/// Interpret a resolved value as an integer.
///
/// Floats are accepted only when they have no fractional part.
pub fn as_integer(value: &Value) -> Option<i64> {
    if let Some(int) = value.as_i64() {
        return Some(int);
    }
    if value.is_u64() {
        return None;
    }
    value
        .as_f64()
        .filter(|float| float.fract() == 0.0 && *float >= i64::MIN as f64 && *float < i64::MAX as f64)
        .map(|float| float as i64)
}

/// Text contributed by a value when concatenated by `$str`.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Short JSON type name used in error messages.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
