//! Policies that return rules in an order: RULE ORDER, OUTPUT ORDER, PRIORITY.
//!
//! OUTPUT ORDER and PRIORITY rank rules by their output values' positions
//! in the declared value lists and therefore need a decision table. A
//! single match is not ranked but its values are still checked against
//! the declared lists.

use std::sync::Arc;

use dmn_model::{DecisionLogic, DecisionTable, EvaluationEvent, HitPolicy};

use crate::error::HitPolicyError;
use crate::ordering::OutputOrdering;

/// RULE ORDER: all matches in table order.
pub fn rule_order(_event: &mut EvaluationEvent) -> Result<(), HitPolicyError> {
    Ok(())
}

/// OUTPUT ORDER: all matches sorted by declared output value positions.
pub fn output_order(event: &mut EvaluationEvent) -> Result<(), HitPolicyError> {
    let decision = Arc::clone(&event.decision);
    let ordering = OutputOrdering::try_new(decision_table(HitPolicy::OutputOrder, decision.as_ref())?)?;
    if validated_single_match(event, &ordering)? {
        return Ok(());
    }

    let rules = std::mem::take(&mut event.matching_rules);
    event.matching_rules = ordering.sort(rules)?;
    Ok(())
}

/// PRIORITY: the single match with the highest priority output values.
pub fn priority(event: &mut EvaluationEvent) -> Result<(), HitPolicyError> {
    let decision = Arc::clone(&event.decision);
    let ordering = OutputOrdering::try_new(decision_table(HitPolicy::Priority, decision.as_ref())?)?;
    if ordering.is_noop() {
        return Err(HitPolicyError::NoOutputValuesDeclared {
            policy: HitPolicy::Priority,
        });
    }
    if event.matching_rules.is_empty() {
        return Err(HitPolicyError::NoMatchingRule {
            policy: HitPolicy::Priority,
        });
    }
    if validated_single_match(event, &ordering)? {
        return Ok(());
    }

    let rules = std::mem::take(&mut event.matching_rules);
    event.matching_rules = ordering.min(rules)?.into_iter().collect();
    Ok(())
}

fn decision_table(policy: HitPolicy, decision: &dyn DecisionLogic) -> Result<&DecisionTable, HitPolicyError> {
    decision
        .as_decision_table()
        .ok_or_else(|| HitPolicyError::UnsupportedDecisionLogic {
            policy: Some(policy),
            kind: decision.kind().to_string(),
        })
}

/// Validate a lone match; true if the event had exactly one rule.
fn validated_single_match(event: &EvaluationEvent, ordering: &OutputOrdering<'_>) -> Result<bool, HitPolicyError> {
    match event.matching_rules.as_slice() {
        [only] => {
            ordering.validate(only)?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmn_model::{
        DeclaredOutput, EvaluatedDecisionRule, EvaluatedOutput, LiteralExpression, TypedValue,
    };

    fn risk_table(policy: HitPolicy) -> DecisionTable {
        DecisionTable::new("risk", policy).with_output(
            DeclaredOutput::named("risk").with_allowed_values(["Low", "Medium", "High"]),
        )
    }

    fn rule(id: &str, risk: &str) -> EvaluatedDecisionRule {
        EvaluatedDecisionRule::new(id).with_output(EvaluatedOutput::new("risk", TypedValue::untyped(risk)))
    }

    fn values(event: &EvaluationEvent) -> Vec<String> {
        event
            .matching_rules
            .iter()
            .map(|r| r.output("risk").map(|o| o.value.to_string()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn rule_order_keeps_everything() {
        let rules = vec![rule("r1", "High"), rule("r2", "Low")];
        let mut event = EvaluationEvent::for_table(risk_table(HitPolicy::RuleOrder), rules.clone());
        rule_order(&mut event).unwrap();
        assert_eq!(event.matching_rules, rules);
    }

    #[test]
    fn output_order_sorts_by_allowed_values() {
        let mut event = EvaluationEvent::for_table(
            risk_table(HitPolicy::OutputOrder),
            vec![rule("r1", "High"), rule("r2", "Low"), rule("r3", "Medium")],
        );
        output_order(&mut event).unwrap();
        assert_eq!(values(&event), vec!["Low", "Medium", "High"]);
    }

    #[test]
    fn output_order_without_matches_is_empty() {
        let mut event = EvaluationEvent::for_table(risk_table(HitPolicy::OutputOrder), vec![]);
        output_order(&mut event).unwrap();
        assert!(event.matching_rules.is_empty());
    }

    #[test]
    fn output_order_rejects_unknown_value() {
        let mut event = EvaluationEvent::for_table(
            risk_table(HitPolicy::OutputOrder),
            vec![rule("r1", "High"), rule("r2", "Critical")],
        );
        assert_eq!(output_order(&mut event).unwrap_err().code(), "DMN-03008");
    }

    #[test]
    fn single_match_is_still_validated() {
        let mut event =
            EvaluationEvent::for_table(risk_table(HitPolicy::Priority), vec![rule("r1", "Critical")]);
        assert!(matches!(
            priority(&mut event),
            Err(HitPolicyError::OutputValueNotAllowed { .. })
        ));

        let mut event = EvaluationEvent::for_table(risk_table(HitPolicy::Priority), vec![rule("r1", "Low")]);
        priority(&mut event).unwrap();
        assert_eq!(event.rule_ids(), vec!["r1"]);
    }

    #[test]
    fn priority_selects_lowest_position() {
        let mut event = EvaluationEvent::for_table(
            risk_table(HitPolicy::Priority),
            vec![rule("r1", "High"), rule("r2", "Low")],
        );
        priority(&mut event).unwrap();
        assert_eq!(event.rule_ids(), vec!["r2"]);
    }

    #[test]
    fn priority_requires_a_match() {
        let mut event = EvaluationEvent::for_table(risk_table(HitPolicy::Priority), vec![]);
        assert_eq!(
            priority(&mut event),
            Err(HitPolicyError::NoMatchingRule {
                policy: HitPolicy::Priority
            })
        );
    }

    #[test]
    fn priority_requires_declared_values() {
        let table = DecisionTable::new("risk", HitPolicy::Priority).with_output(DeclaredOutput::named("risk"));
        let mut event = EvaluationEvent::for_table(table, vec![rule("r1", "High")]);
        assert_eq!(
            priority(&mut event),
            Err(HitPolicyError::NoOutputValuesDeclared {
                policy: HitPolicy::Priority
            })
        );
    }

    #[test]
    fn unnamed_keyed_output_fails_without_matches() {
        let table = DecisionTable::new("risk", HitPolicy::OutputOrder)
            .with_output(DeclaredOutput::unnamed().with_allowed_values(["Low", "High"]))
            .with_output(DeclaredOutput::named("note"));
        let mut event = EvaluationEvent::for_table(table, vec![]);
        assert_eq!(output_order(&mut event), Err(HitPolicyError::OutputNameRequired));
    }

    #[test]
    fn priority_over_declared_doubles() {
        let table: DecisionTable = serde_json::from_value(serde_json::json!({
            "id": "discount",
            "hit_policy": "PRIORITY",
            "outputs": [{ "name": "rate", "allowed_values": [
                { "kind": "Double", "raw": 1 }, { "kind": "Double", "raw": 2 }
            ] }]
        }))
        .unwrap();
        let rate = |id: &str, d: f64| {
            EvaluatedDecisionRule::new(id).with_output(EvaluatedOutput::new("rate", TypedValue::double(d)))
        };
        let mut event = EvaluationEvent::for_table(table, vec![rate("r1", 2.0), rate("r2", 1.0)]);
        priority(&mut event).unwrap();
        assert_eq!(event.rule_ids(), vec!["r2"]);
    }

    #[test]
    fn ordering_needs_a_decision_table() {
        let literal = LiteralExpression {
            id: "season".to_string(),
            expression: "\"Fall\"".to_string(),
        };
        let mut event = EvaluationEvent::new(Arc::new(literal), vec![rule("r1", "Low"), rule("r2", "High")]);
        assert_eq!(
            output_order(&mut event),
            Err(HitPolicyError::UnsupportedDecisionLogic {
                policy: Some(HitPolicy::OutputOrder),
                kind: "literalExpression".to_string(),
            })
        );
    }
}
