//! The evaluation event handed to a hit policy handler.

use std::sync::Arc;

use crate::rule::EvaluatedDecisionRule;
use crate::table::{DecisionLogic, DecisionTable, DeclaredOutput, HitPolicyKey};
use crate::value::TypedValue;

/// One decision table evaluation, from rule matching to the hit policy result.
///
/// Created once per evaluation by the rule matching step and owned by that
/// evaluation. A hit policy handler may filter, reorder or replace
/// `matching_rules` and, for aggregating COLLECT policies, fills in the
/// collect result fields.
#[derive(Debug, Clone)]
pub struct EvaluationEvent {
    pub decision: Arc<dyn DecisionLogic>,
    pub matching_rules: Vec<EvaluatedDecisionRule>,
    pub collect_result_name: Option<String>,
    pub collect_result_value: Option<TypedValue>,
}

impl EvaluationEvent {
    pub fn new(decision: Arc<dyn DecisionLogic>, matching_rules: Vec<EvaluatedDecisionRule>) -> Self {
        EvaluationEvent {
            decision,
            matching_rules,
            collect_result_name: None,
            collect_result_value: None,
        }
    }

    /// Event for a decision table evaluation.
    pub fn for_table(table: DecisionTable, matching_rules: Vec<EvaluatedDecisionRule>) -> Self {
        EvaluationEvent::new(Arc::new(table), matching_rules)
    }

    pub fn decision_table(&self) -> Option<&DecisionTable> {
        self.decision.as_decision_table()
    }

    /// Declared outputs of the table, empty if the decision is not table-backed.
    pub fn declared_outputs(&self) -> &[DeclaredOutput] {
        self.decision_table()
            .map(|t| t.outputs.as_slice())
            .unwrap_or(&[])
    }

    pub fn hit_policy_key(&self) -> Option<HitPolicyKey> {
        self.decision_table().map(|t| t.hit_policy)
    }

    pub fn rule_ids(&self) -> Vec<String> {
        self.matching_rules.iter().map(|r| r.id.clone()).collect()
    }

    pub fn has_collect_result(&self) -> bool {
        self.collect_result_name.is_some() || self.collect_result_value.is_some()
    }
}
