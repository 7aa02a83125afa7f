pub mod composite;
pub mod primitives;

use serde_json::Value;

use rjg_core::{DirectiveKind, Params};

use crate::context::GenerationContext;
use crate::errors::GenerationError;

/// Generator behind a single directive.
pub trait DirectiveGenerator: Send + Sync {
    fn generate(
        &self,
        params: &Params,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<Value, GenerationError>;
}

/// Generator for `kind`. Every directive has exactly one.
pub fn generator_for(kind: DirectiveKind) -> &'static dyn DirectiveGenerator {
    match kind {
        DirectiveKind::Int => &primitives::INT,
        DirectiveKind::Iteration => &primitives::ITERATION,
        DirectiveKind::U8 => &primitives::U8,
        DirectiveKind::U16 => &primitives::U16,
        DirectiveKind::U32 => &primitives::U32,
        DirectiveKind::I8 => &primitives::I8,
        DirectiveKind::I16 => &primitives::I16,
        DirectiveKind::I32 => &primitives::I32,
        DirectiveKind::I64 => &primitives::I64,
        DirectiveKind::Digit => &primitives::DIGIT,
        DirectiveKind::Bool => &primitives::BOOL,
        DirectiveKind::Alpha => &primitives::ALPHA,
        DirectiveKind::Str => &composite::STR,
        DirectiveKind::Arr => &composite::ARR,
        DirectiveKind::Obj => &composite::OBJ,
        DirectiveKind::OneOf => &composite::ONEOF,
        DirectiveKind::Optional => &composite::OPTION,
    }
}
