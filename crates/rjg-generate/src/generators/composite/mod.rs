//! Directives that resolve nested templates: string concatenation, array
//! repetition and random choice.

use serde_json::Value;

use rjg_core::{DirectiveKind, Params, Template};

use crate::context::GenerationContext;
use crate::engine::resolve;
use crate::errors::GenerationError;
use crate::generators::DirectiveGenerator;
use crate::params::{ParamSpec, as_integer, kind_name, stringify, validate_params};

const REPEAT_PARAMS: &[ParamSpec] = &[ParamSpec::new("len"), ParamSpec::new("val")];

pub(super) static STR: ConcatGenerator = ConcatGenerator;
pub(super) static ARR: RepeatGenerator = RepeatGenerator;
pub(super) static OBJ: ObjectChoiceGenerator = ObjectChoiceGenerator;
pub(super) static ONEOF: OneOfGenerator = OneOfGenerator;
pub(super) static OPTION: OptionGenerator = OptionGenerator;

pub(super) struct ConcatGenerator;

impl DirectiveGenerator for ConcatGenerator {
    fn generate(
        &self,
        params: &Params,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<Value, GenerationError> {
        let mut out = String::new();
        match params {
            Params::List(items) => {
                for item in items {
                    out.push_str(&stringify(&resolve(item, ctx)?));
                }
            }
            Params::Value(template) => match resolve(template, ctx)? {
                Value::Array(items) => {
                    for item in &items {
                        out.push_str(&stringify(item));
                    }
                }
                other => {
                    return Err(GenerationError::malformed(
                        DirectiveKind::Str,
                        format!("expected a sequence but got {}", kind_name(&other)),
                    ));
                }
            },
            Params::Absent => {
                return Err(GenerationError::malformed(
                    DirectiveKind::Str,
                    "requires a list of values",
                ));
            }
        }
        Ok(Value::String(out))
    }
}

pub(super) struct RepeatGenerator;

impl DirectiveGenerator for RepeatGenerator {
    fn generate(
        &self,
        params: &Params,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<Value, GenerationError> {
        let params = validate_params(params, REPEAT_PARAMS, DirectiveKind::Arr)?;
        let len = resolve(params.require("len", DirectiveKind::Arr)?, ctx)?;
        let len = as_integer(&len).ok_or_else(|| {
            GenerationError::bound(
                DirectiveKind::Arr,
                format!("len must be an integer, got {}", kind_name(&len)),
            )
        })?;
        let len = usize::try_from(len).map_err(|_| {
            GenerationError::bound(DirectiveKind::Arr, format!("len must be >= 0, got {len}"))
        })?;

        let val = params.require("val", DirectiveKind::Arr)?;
        let mut items = Vec::new();
        items.try_reserve(len).map_err(|_| {
            GenerationError::bound(DirectiveKind::Arr, format!("len {len} is too large"))
        })?;
        for _ in 0..len {
            items.push(resolve(val, ctx)?);
        }
        Ok(Value::Array(items))
    }
}

pub(super) struct ObjectChoiceGenerator;

impl DirectiveGenerator for ObjectChoiceGenerator {
    fn generate(
        &self,
        params: &Params,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<Value, GenerationError> {
        let chosen = choose(params, DirectiveKind::Obj, ctx)?;
        if !chosen.is_object_form() {
            return Err(GenerationError::malformed(
                DirectiveKind::Obj,
                "must contain a list of objects",
            ));
        }
        resolve(chosen, ctx)
    }
}

pub(super) struct OneOfGenerator;

impl DirectiveGenerator for OneOfGenerator {
    fn generate(
        &self,
        params: &Params,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<Value, GenerationError> {
        let chosen = choose(params, DirectiveKind::OneOf, ctx)?;
        resolve(chosen, ctx)
    }
}

/// Behaves as a one-element `$oneof`: the value is always produced.
pub(super) struct OptionGenerator;

impl DirectiveGenerator for OptionGenerator {
    fn generate(
        &self,
        params: &Params,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<Value, GenerationError> {
        match params {
            Params::Value(template) if **template != Template::Literal(Value::Null) => {
                resolve(template, ctx)
            }
            _ => Err(GenerationError::malformed(
                DirectiveKind::Optional,
                "requires a valid parameter",
            )),
        }
    }
}

fn choose<'p>(
    params: &'p Params,
    directive: DirectiveKind,
    ctx: &mut GenerationContext<'_>,
) -> Result<&'p Template, GenerationError> {
    let Params::List(items) = params else {
        return Err(GenerationError::malformed(directive, "requires a list of values"));
    };
    if items.is_empty() {
        return Err(GenerationError::malformed(directive, "requires a non-empty list"));
    }
    let index = ctx.rng().index_below(items.len());
    Ok(&items[index])
}
