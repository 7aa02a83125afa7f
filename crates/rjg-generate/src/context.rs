use rjg_core::{DirectiveKind, Prefix, Template, VariableStore};

use crate::errors::GenerationError;
use crate::model::GenerationReport;
use crate::random::RandomSource;

/// Context passed to every recursive resolution call.
///
/// Carries the iteration index, the read-only variable store, the injected
/// randomness source and the stack of variables currently being expanded.
pub struct GenerationContext<'a> {
    pub iteration: u64,
    variables: &'a VariableStore,
    rng: &'a mut dyn RandomSource,
    expanding: Vec<String>,
    report: Option<&'a mut GenerationReport>,
}

impl<'a> GenerationContext<'a> {
    pub fn new(
        iteration: u64,
        variables: &'a VariableStore,
        rng: &'a mut dyn RandomSource,
    ) -> Self {
        Self {
            iteration,
            variables,
            rng,
            expanding: Vec::new(),
            report: None,
        }
    }

    /// Record directive and variable usage into `report`.
    pub fn with_report(mut self, report: &'a mut GenerationReport) -> Self {
        self.report = Some(report);
        self
    }

    pub fn rng(&mut self) -> &mut dyn RandomSource {
        &mut *self.rng
    }

    pub fn prefix(&self) -> &'a Prefix {
        self.variables.prefix()
    }

    /// Stored template for `name`, if defined.
    pub fn variable(&self, name: &str) -> Option<&'a Template> {
        self.variables.get(name)
    }

    /// Push `name` onto the expansion stack, failing if it is already there.
    pub(crate) fn enter_variable(&mut self, name: &str) -> Result<(), GenerationError> {
        if self.expanding.iter().any(|active| active == name) {
            let prefix = self.prefix();
            let mut chain: Vec<String> = self
                .expanding
                .iter()
                .skip_while(|active| active.as_str() != name)
                .map(|active| prefix.token(active))
                .collect();
            chain.push(prefix.token(name));
            return Err(GenerationError::VariableCycle { chain });
        }
        self.expanding.push(name.to_string());
        if let Some(report) = self.report.as_deref_mut() {
            report.record_variable_usage(name);
        }
        Ok(())
    }

    pub(crate) fn leave_variable(&mut self) {
        self.expanding.pop();
    }

    pub(crate) fn record_directive(&mut self, kind: DirectiveKind) {
        if let Some(report) = self.report.as_deref_mut() {
            report.record_directive_usage(kind);
        }
    }
}
