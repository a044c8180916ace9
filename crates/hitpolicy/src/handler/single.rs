//! Single-hit policies that keep at most one rule: UNIQUE, FIRST, ANY.

use dmn_model::{EvaluatedDecisionRule, EvaluationEvent};

use crate::error::HitPolicyError;

/// UNIQUE: at most one rule may match.
pub fn unique(event: &mut EvaluationEvent) -> Result<(), HitPolicyError> {
    if event.matching_rules.len() > 1 {
        return Err(HitPolicyError::MultipleMatchesNotAllowed {
            rule_ids: event.rule_ids(),
        });
    }
    Ok(())
}

/// FIRST: keep the first matching rule in table order.
pub fn first(event: &mut EvaluationEvent) -> Result<(), HitPolicyError> {
    event.matching_rules.truncate(1);
    Ok(())
}

/// ANY: several rules may match if they all produce the same outputs.
pub fn any(event: &mut EvaluationEvent) -> Result<(), HitPolicyError> {
    if let Some((head, rest)) = event.matching_rules.split_first() {
        if rest.iter().any(|rule| !same_outputs(rule, head)) {
            return Err(HitPolicyError::UnequalOutputsNotAllowed {
                rule_ids: event.rule_ids(),
            });
        }
    }
    event.matching_rules.truncate(1);
    Ok(())
}

fn same_outputs(a: &EvaluatedDecisionRule, b: &EvaluatedDecisionRule) -> bool {
    a.len() == b.len()
        && a
            .output_entries
            .iter()
            .zip(&b.output_entries)
            .all(|(x, y)| x.same_as(y))
}
