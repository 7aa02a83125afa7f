//! Scalar directives: ranges, fixed-width integers, digits, booleans,
//! letters and the iteration index.

use serde_json::Value;

use rjg_core::{DirectiveKind, Params, Template};

use crate::context::GenerationContext;
use crate::engine::resolve;
use crate::errors::GenerationError;
use crate::generators::DirectiveGenerator;
use crate::params::{ParamSpec, as_integer, kind_name, validate_params};

const INT_RANGE_PARAMS: &[ParamSpec] = &[ParamSpec::new("min"), ParamSpec::new("max")];

pub(super) static INT: IntRangeGenerator = IntRangeGenerator;
pub(super) static ITERATION: IterationGenerator = IterationGenerator;
pub(super) static BOOL: BoolGenerator = BoolGenerator;
pub(super) static ALPHA: AlphaGenerator = AlphaGenerator;

pub(super) static U8: FixedWidthGenerator = FixedWidthGenerator {
    min: 0,
    max: u8::MAX as i64,
};
pub(super) static U16: FixedWidthGenerator = FixedWidthGenerator {
    min: 0,
    max: u16::MAX as i64,
};
pub(super) static U32: FixedWidthGenerator = FixedWidthGenerator {
    min: 0,
    max: u32::MAX as i64,
};
pub(super) static I8: FixedWidthGenerator = FixedWidthGenerator {
    min: i8::MIN as i64,
    max: i8::MAX as i64,
};
pub(super) static I16: FixedWidthGenerator = FixedWidthGenerator {
    min: i16::MIN as i64,
    max: i16::MAX as i64,
};
pub(super) static I32: FixedWidthGenerator = FixedWidthGenerator {
    min: i32::MIN as i64,
    max: i32::MAX as i64,
};
pub(super) static I64: FixedWidthGenerator = FixedWidthGenerator {
    min: i64::MIN,
    max: i64::MAX,
};
pub(super) static DIGIT: FixedWidthGenerator = FixedWidthGenerator {
    min: 0,
    max: 9,
};

pub(super) struct IntRangeGenerator;

impl DirectiveGenerator for IntRangeGenerator {
    fn generate(
        &self,
        params: &Params,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<Value, GenerationError> {
        let params = validate_params(params, INT_RANGE_PARAMS, DirectiveKind::Int)?;
        let min = resolve_bound(params.require("min", DirectiveKind::Int)?, "min", ctx)?;
        let max = resolve_bound(params.require("max", DirectiveKind::Int)?, "max", ctx)?;
        if min > max {
            return Err(GenerationError::bound(
                DirectiveKind::Int,
                format!("min ({min}) must be <= max ({max})"),
            ));
        }
        Ok(Value::from(ctx.rng().int_between(min, max)))
    }
}

fn resolve_bound(
    template: &Template,
    name: &str,
    ctx: &mut GenerationContext<'_>,
) -> Result<i64, GenerationError> {
    let value = resolve(template, ctx)?;
    as_integer(&value).ok_or_else(|| {
        GenerationError::bound(
            DirectiveKind::Int,
            format!("{name} must be an integer, got {}", kind_name(&value)),
        )
    })
}

pub(super) struct IterationGenerator;

impl DirectiveGenerator for IterationGenerator {
    fn generate(
        &self,
        _params: &Params,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<Value, GenerationError> {
        Ok(Value::from(ctx.iteration))
    }
}

/// Uniform integer over a fixed inclusive range; parameters are ignored.
pub(super) struct FixedWidthGenerator {
    min: i64,
    max: i64,
}

impl DirectiveGenerator for FixedWidthGenerator {
    fn generate(
        &self,
        _params: &Params,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<Value, GenerationError> {
        Ok(Value::from(ctx.rng().int_between(self.min, self.max)))
    }
}

pub(super) struct BoolGenerator;

impl DirectiveGenerator for BoolGenerator {
    fn generate(
        &self,
        _params: &Params,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<Value, GenerationError> {
        Ok(Value::Bool(ctx.rng().coin()))
    }
}

pub(super) struct AlphaGenerator;

impl DirectiveGenerator for AlphaGenerator {
    fn generate(
        &self,
        _params: &Params,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<Value, GenerationError> {
        let base = if ctx.rng().coin() { b'A' } else { b'a' };
        let offset = ctx.rng().index_below(26) as u8;
        Ok(Value::String(char::from(base + offset).to_string()))
    }
}
