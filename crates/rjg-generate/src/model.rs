use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use rjg_core::DirectiveKind;

/// Report for a generation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub iterations: u64,
    pub bytes_written: u64,
    pub duration_ms: u64,
    pub directive_usage: BTreeMap<String, u64>,
    pub variable_usage: BTreeMap<String, u64>,
}

impl GenerationReport {
    pub fn new(run_id: String) -> Self {
        Self {
            run_id,
            ..Self::default()
        }
    }

    pub fn record_directive_usage(&mut self, kind: DirectiveKind) {
        *self
            .directive_usage
            .entry(kind.name().to_string())
            .or_insert(0) += 1;
    }

    pub fn record_variable_usage(&mut self, name: &str) {
        *self.variable_usage.entry(name.to_string()).or_insert(0) += 1;
    }

    /// Add the directive and variable tallies of `other`.
    pub fn merge_usage(&mut self, other: GenerationReport) {
        for (name, count) in other.directive_usage {
            *self.directive_usage.entry(name).or_insert(0) += count;
        }
        for (name, count) in other.variable_usage {
            *self.variable_usage.entry(name).or_insert(0) += count;
        }
    }

    pub fn record_iteration(&mut self) {
        self.iterations += 1;
    }
}
