//! COLLECT, with or without an aggregator.
//!
//! Without an aggregator every match is returned in table order. With one,
//! the matches are reduced to a single collect result stored on the event.

use dmn_model::{Aggregator, EvaluatedDecisionRule, EvaluationEvent};

use crate::aggregate::{aggregate, count};
use crate::coerce::coerce;
use crate::error::HitPolicyError;

/// COLLECT: all matches in table order.
pub fn collect(_event: &mut EvaluationEvent) -> Result<(), HitPolicyError> {
    Ok(())
}

/// COLLECT COUNT: the number of matching rules, whatever their outputs.
pub fn collect_count(event: &mut EvaluationEvent) -> Result<(), HitPolicyError> {
    event.collect_result_name = result_name(&event.matching_rules);
    event.collect_result_value = Some(count(event.matching_rules.len())?);
    Ok(())
}

pub fn collect_sum(event: &mut EvaluationEvent) -> Result<(), HitPolicyError> {
    collect_aggregate(Aggregator::Sum, event)
}

pub fn collect_min(event: &mut EvaluationEvent) -> Result<(), HitPolicyError> {
    collect_aggregate(Aggregator::Min, event)
}

pub fn collect_max(event: &mut EvaluationEvent) -> Result<(), HitPolicyError> {
    collect_aggregate(Aggregator::Max, event)
}

/// Aggregate the single output value of every match.
///
/// Null values are skipped. Without any value the collect result has no
/// value.
fn collect_aggregate(aggregator: Aggregator, event: &mut EvaluationEvent) -> Result<(), HitPolicyError> {
    let mut values = Vec::with_capacity(event.matching_rules.len());
    for rule in &event.matching_rules {
        if rule.len() > 1 {
            return Err(HitPolicyError::AggregationNotApplicableToCompoundOutput {
                aggregator,
                rule_id: rule.id.clone(),
                output_names: rule.output_names(),
            });
        }
        if let Some(output) = rule.first_output().filter(|o| !o.value.is_null()) {
            values.push(output.value.clone());
        }
    }

    event.collect_result_name = result_name(&event.matching_rules);
    event.collect_result_value = if values.is_empty() {
        None
    } else {
        Some(aggregate(aggregator, &coerce(&values)?)?)
    };
    Ok(())
}

/// Output name of the first match that has any output entry.
fn result_name(rules: &[EvaluatedDecisionRule]) -> Option<String> {
    rules
        .iter()
        .find_map(|rule| rule.first_output())
        .and_then(|output| output.output_name.clone())
}
