use serde_json::{Map, Value};
use tracing::debug;

use rjg_core::{DirectiveNode, Template, VariableStore};

use crate::context::GenerationContext;
use crate::errors::GenerationError;
use crate::generators::generator_for;
use crate::model::GenerationReport;
use crate::random::RandomSource;

/// Entry point for producing values from a compiled template.
///
/// The template and variable store are immutable; each call to
/// [`TemplateEngine::generate`] builds a fresh context, so iterations are
/// independent of each other.
#[derive(Debug)]
pub struct TemplateEngine {
    template: Template,
    variables: VariableStore,
}

impl TemplateEngine {
    pub fn new(template: Template, variables: VariableStore) -> Self {
        Self {
            template,
            variables,
        }
    }

    /// Compile `raw` with the variable store's prefix.
    pub fn from_json(raw: &Value, variables: VariableStore) -> Result<Self, GenerationError> {
        let template = Template::compile(raw, variables.prefix())?;
        Ok(Self::new(template, variables))
    }

    /// Parse and compile JSON text with the variable store's prefix.
    pub fn parse(text: &str, variables: VariableStore) -> Result<Self, GenerationError> {
        let template = Template::parse(text, variables.prefix())?;
        Ok(Self::new(template, variables))
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn variables(&self) -> &VariableStore {
        &self.variables
    }

    /// Resolve the template for iteration `iteration`.
    pub fn generate(
        &self,
        iteration: u64,
        rng: &mut dyn RandomSource,
    ) -> Result<Value, GenerationError> {
        let mut ctx = GenerationContext::new(iteration, &self.variables, rng);
        resolve(&self.template, &mut ctx)
    }

    /// Like [`TemplateEngine::generate`], also tallying directive and
    /// variable usage into `report`.
    ///
    /// `report` is only updated when the iteration succeeds.
    pub fn generate_recorded(
        &self,
        iteration: u64,
        rng: &mut dyn RandomSource,
        report: &mut GenerationReport,
    ) -> Result<Value, GenerationError> {
        let mut usage = GenerationReport::default();
        let value = {
            let mut ctx = GenerationContext::new(iteration, &self.variables, rng)
                .with_report(&mut usage);
            resolve(&self.template, &mut ctx)?
        };
        report.merge_usage(usage);
        report.record_iteration();
        Ok(value)
    }
}

/// Resolve a single template node.
pub fn resolve(node: &Template, ctx: &mut GenerationContext<'_>) -> Result<Value, GenerationError> {
    match node {
        Template::Literal(value) => Ok(value.clone()),
        Template::Directive(directive) => resolve_directive(directive, ctx),
        Template::Variable(name) => resolve_variable(name, ctx),
        Template::Object(entries) => {
            let mut resolved = Map::new();
            for entry in entries {
                let key = match resolve(&entry.key, ctx)? {
                    Value::String(key) => key,
                    value => {
                        return Err(GenerationError::NonStringKey {
                            key: describe_key(&entry.key, ctx),
                            value,
                        });
                    }
                };
                let value = resolve(&entry.value, ctx)?;
                resolved.insert(key, value);
            }
            Ok(Value::Object(resolved))
        }
    }
}

fn resolve_directive(
    node: &DirectiveNode,
    ctx: &mut GenerationContext<'_>,
) -> Result<Value, GenerationError> {
    ctx.record_directive(node.kind);
    generator_for(node.kind).generate(&node.params, ctx)
}

fn resolve_variable(name: &str, ctx: &mut GenerationContext<'_>) -> Result<Value, GenerationError> {
    let Some(stored) = ctx.variable(name) else {
        return Err(GenerationError::UndefinedVariable {
            token: ctx.prefix().token(name),
        });
    };

    ctx.enter_variable(name)?;
    debug!(variable = %name, iteration = ctx.iteration, "expanding variable");
    let result = resolve(stored, ctx);
    ctx.leave_variable();

    result.map_err(|err| match err {
        GenerationError::VariableCycle { .. } => err,
        source => GenerationError::InVariable {
            token: ctx.prefix().token(name),
            source: Box::new(source),
        },
    })
}

fn describe_key(key: &Template, ctx: &GenerationContext<'_>) -> String {
    match key {
        Template::Literal(Value::String(text)) => text.clone(),
        Template::Variable(name) => ctx.prefix().token(name),
        Template::Directive(node) => ctx.prefix().token(node.kind.name()),
        other => format!("{other:?}"),
    }
}
