//! Matched rules and their evaluated output entries.

use serde::{Deserialize, Serialize};

use crate::value::TypedValue;

/// The value one output column produced for a matched rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedOutput {
    /// Id of the output clause.
    #[serde(default)]
    pub id: Option<String>,
    /// Label of the output clause.
    #[serde(default)]
    pub name: Option<String>,
    /// Name under which the value is published in the decision result.
    #[serde(default)]
    pub output_name: Option<String>,
    pub value: TypedValue,
}

impl EvaluatedOutput {
    pub fn new(output_name: impl Into<String>, value: TypedValue) -> Self {
        EvaluatedOutput {
            id: None,
            name: None,
            output_name: Some(output_name.into()),
            value,
        }
    }

    /// Same output clause and same value, numbers compared by value.
    pub fn same_as(&self, other: &EvaluatedOutput) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.output_name == other.output_name
            && self.value.same_as(&other.value)
    }

    /// An output without a name, only valid for single-output tables.
    pub fn unnamed(value: TypedValue) -> Self {
        EvaluatedOutput {
            id: None,
            name: None,
            output_name: None,
            value,
        }
    }
}

/// A decision table rule whose input entries were satisfied.
///
/// Output entries keep the table's output declaration order. At most one
/// entry exists per output name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedDecisionRule {
    pub id: String,
    #[serde(default)]
    pub output_entries: Vec<EvaluatedOutput>,
}

impl EvaluatedDecisionRule {
    pub fn new(id: impl Into<String>) -> Self {
        EvaluatedDecisionRule {
            id: id.into(),
            output_entries: Vec::new(),
        }
    }

    /// Add an output entry, replacing an existing entry with the same name.
    pub fn with_output(mut self, output: EvaluatedOutput) -> Self {
        self.insert(output);
        self
    }

    pub fn insert(&mut self, output: EvaluatedOutput) {
        match self
            .output_entries
            .iter_mut()
            .find(|o| o.output_name == output.output_name)
        {
            Some(existing) => *existing = output,
            None => self.output_entries.push(output),
        }
    }

    /// Look up an output entry by its output name.
    pub fn output(&self, output_name: &str) -> Option<&EvaluatedOutput> {
        self.output_entries
            .iter()
            .find(|o| o.output_name.as_deref() == Some(output_name))
    }

    /// The first output entry in declaration order.
    pub fn first_output(&self) -> Option<&EvaluatedOutput> {
        self.output_entries.first()
    }

    pub fn output_names(&self) -> Vec<String> {
        self.output_entries
            .iter()
            .map(|o| o.output_name.clone().unwrap_or_default())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.output_entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.output_entries.is_empty()
    }
}
