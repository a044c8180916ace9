//! Hit policy failures.
//!
//! Every failure is a semantic validation error that aborts the current
//! evaluation. Messages start with a stable code so they can be matched
//! against the engine documentation.

use dmn_model::{display_values, Aggregator, HitPolicy, HitPolicyKey, TypedValue, ValueKind};

/// Errors raised while applying a hit policy.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HitPolicyError {
    /// UNIQUE matched more than one rule.
    #[error(
        "DMN-03001 Hit policy 'UNIQUE' only allows a single rule to match. Actually matched rules: {rule_ids:?}"
    )]
    MultipleMatchesNotAllowed { rule_ids: Vec<String> },

    /// ANY matched rules with different outputs.
    #[error(
        "DMN-03002 Hit policy 'ANY' only allows multiple matching rules with equal output. Matched rules: {rule_ids:?}"
    )]
    UnequalOutputsNotAllowed { rule_ids: Vec<String> },

    /// An aggregator was applied to a rule with more than one output.
    #[error(
        "DMN-03003 Unable to execute aggregation '{aggregator}' on compound decision output of rule '{rule_id}': {output_names:?}. Only one output entry allowed."
    )]
    AggregationNotApplicableToCompoundOutput {
        aggregator: Aggregator,
        rule_id: String,
        output_names: Vec<String>,
    },

    /// No common numeric representation exists for the collected values.
    #[error(
        "DMN-03004 Unable to convert value(s) {} to a supported aggregation type; tried {attempted:?}",
        display_values(.values)
    )]
    UnsupportedAggregationType {
        values: Vec<TypedValue>,
        attempted: Vec<ValueKind>,
    },

    /// The decision behind the event is not a decision table.
    ///
    /// `policy` is unset when no hit policy could be resolved at all.
    #[error(
        "DMN-03005 {} requires a decision table but the decision logic is '{kind}'",
        requirer(.policy)
    )]
    UnsupportedDecisionLogic {
        policy: Option<HitPolicy>,
        kind: String,
    },

    /// PRIORITY requires at least one matching rule.
    #[error("DMN-03006 Hit policy '{policy}' requires at least one matching rule")]
    NoMatchingRule { policy: HitPolicy },

    /// A table with several outputs has an unnamed output with declared values.
    #[error("DMN-03007 Output name is required when a decision table has multiple outputs")]
    OutputNameRequired,

    /// A rule produced a value outside its output's declared values.
    #[error(
        "DMN-03008 Output value '{value}' of output '{output_name}' is not in the list of allowed values {}",
        display_values(.allowed)
    )]
    OutputValueNotAllowed {
        output_name: String,
        value: TypedValue,
        allowed: Vec<TypedValue>,
    },

    /// PRIORITY requires an output with declared values.
    #[error("DMN-03009 Hit policy '{policy}' requires at least one output with declared output values")]
    NoOutputValuesDeclared { policy: HitPolicy },

    /// MIN or MAX over an empty value list.
    #[error("DMN-03010 Unable to execute aggregation '{aggregator}' on an empty list of values")]
    EmptyAggregationInput { aggregator: Aggregator },

    /// The aggregated value does not fit the selected numeric type.
    #[error("DMN-03011 Aggregation '{aggregator}' overflows numeric type '{kind}'")]
    AggregationOverflow {
        aggregator: Aggregator,
        kind: ValueKind,
    },

    /// No handler is registered for the table's hit policy.
    #[error("DMN-03012 No hit policy handler registered for '{key}'")]
    HandlerNotRegistered { key: HitPolicyKey },
}

fn requirer(policy: &Option<HitPolicy>) -> String {
    match policy {
        Some(policy) => format!("Hit policy '{}'", policy),
        None => "Hit policy resolution".to_string(),
    }
}

impl HitPolicyError {
    /// Stable error code, e.g. `DMN-03001`.
    pub fn code(&self) -> &'static str {
        match self {
            HitPolicyError::MultipleMatchesNotAllowed { .. } => "DMN-03001",
            HitPolicyError::UnequalOutputsNotAllowed { .. } => "DMN-03002",
            HitPolicyError::AggregationNotApplicableToCompoundOutput { .. } => "DMN-03003",
            HitPolicyError::UnsupportedAggregationType { .. } => "DMN-03004",
            HitPolicyError::UnsupportedDecisionLogic { .. } => "DMN-03005",
            HitPolicyError::NoMatchingRule { .. } => "DMN-03006",
            HitPolicyError::OutputNameRequired => "DMN-03007",
            HitPolicyError::OutputValueNotAllowed { .. } => "DMN-03008",
            HitPolicyError::NoOutputValuesDeclared { .. } => "DMN-03009",
            HitPolicyError::EmptyAggregationInput { .. } => "DMN-03010",
            HitPolicyError::AggregationOverflow { .. } => "DMN-03011",
            HitPolicyError::HandlerNotRegistered { .. } => "DMN-03012",
        }
    }
}
