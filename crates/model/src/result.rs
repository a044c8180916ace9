//! Decision results generated from a finalized evaluation event.

use crate::error::ModelError;
use crate::event::EvaluationEvent;
use crate::value::TypedValue;

/// Output values of one result row, keyed by output name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecisionResultEntries {
    entries: Vec<(Option<String>, TypedValue)>,
}

impl DecisionResultEntries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, name: Option<String>, value: TypedValue) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.entries
            .iter()
            .find(|(n, _)| n.as_deref() == Some(name))
            .map(|(_, v)| v)
    }

    pub fn first_entry(&self) -> Option<&TypedValue> {
        self.entries.first().map(|(_, v)| v)
    }

    /// The only entry of this row; `None` if the row is empty.
    pub fn single_entry(&self) -> Result<Option<&TypedValue>, ModelError> {
        if self.entries.len() > 1 {
            return Err(ModelError::MultipleEntries {
                count: self.entries.len(),
                names: self
                    .entries
                    .iter()
                    .map(|(n, _)| n.clone().unwrap_or_default())
                    .collect(),
            });
        }
        Ok(self.first_entry())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Option<&str>, &TypedValue)> {
        self.entries.iter().map(|(n, v)| (n.as_deref(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize to a JSON object; an unnamed entry is keyed by `""`.
    pub fn to_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .entries
            .iter()
            .map(|(n, v)| (n.clone().unwrap_or_default(), v.to_json()))
            .collect();
        serde_json::Value::Object(map)
    }
}

/// The result of a decision table evaluation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecisionTableResult {
    results: Vec<DecisionResultEntries>,
}

impl DecisionTableResult {
    /// Build the result rows of a finalized event.
    ///
    /// A collect result yields exactly one row holding the aggregated
    /// value. Otherwise each surviving rule yields one row of its outputs.
    pub fn from_event(event: &EvaluationEvent) -> Self {
        if event.has_collect_result() {
            let mut entries = DecisionResultEntries::new();
            entries.put(
                event.collect_result_name.clone(),
                event
                    .collect_result_value
                    .clone()
                    .unwrap_or_else(TypedValue::null),
            );
            return DecisionTableResult {
                results: vec![entries],
            };
        }

        let results = event
            .matching_rules
            .iter()
            .map(|rule| {
                let mut entries = DecisionResultEntries::new();
                for output in &rule.output_entries {
                    entries.put(output.output_name.clone(), output.value.clone());
                }
                entries
            })
            .collect();
        DecisionTableResult { results }
    }

    pub fn first_result(&self) -> Option<&DecisionResultEntries> {
        self.results.first()
    }

    /// The only result row; `None` if nothing matched.
    pub fn single_result(&self) -> Result<Option<&DecisionResultEntries>, ModelError> {
        if self.results.len() > 1 {
            return Err(ModelError::MultipleResults {
                count: self.results.len(),
            });
        }
        Ok(self.results.first())
    }

    /// Values of the named output across all rows.
    pub fn collect_entries(&self, name: &str) -> Vec<&TypedValue> {
        self.results.iter().filter_map(|r| r.get(name)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DecisionResultEntries> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.results.iter().map(|r| r.to_json()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{EvaluatedDecisionRule, EvaluatedOutput};
    use crate::table::{Aggregator, DecisionTable, HitPolicy, HitPolicyKey};

    fn rule(id: &str, dish: &str, drink: &str) -> EvaluatedDecisionRule {
        EvaluatedDecisionRule::new(id)
            .with_output(EvaluatedOutput::new("dish", TypedValue::untyped(dish)))
            .with_output(EvaluatedOutput::new("drink", TypedValue::untyped(drink)))
    }

    #[test]
    fn one_row_per_rule() {
        let event = EvaluationEvent::for_table(
            DecisionTable::new("menu", HitPolicy::RuleOrder),
            vec![rule("r1", "Stew", "Water"), rule("r2", "Salad", "Juice")],
        );
        let result = DecisionTableResult::from_event(&event);

        assert_eq!(result.len(), 2);
        assert_eq!(
            result.collect_entries("dish"),
            vec![&TypedValue::untyped("Stew"), &TypedValue::untyped("Salad")]
        );
        assert_eq!(
            result.single_result(),
            Err(ModelError::MultipleResults { count: 2 })
        );
        assert_eq!(
            result.to_json(),
            serde_json::json!([
                { "dish": "Stew", "drink": "Water" },
                { "dish": "Salad", "drink": "Juice" }
            ])
        );
    }

    #[test]
    fn collect_result_yields_single_row() {
        let mut event = EvaluationEvent::for_table(
            DecisionTable::new("score", HitPolicyKey::collect(Aggregator::Sum)),
            vec![rule("r1", "a", "b")],
        );
        event.collect_result_name = Some("score".to_string());
        event.collect_result_value = Some(TypedValue::integer(30));

        let result = DecisionTableResult::from_event(&event);
        let row = result.single_result().unwrap().unwrap();
        assert_eq!(row.single_entry().unwrap(), Some(&TypedValue::integer(30)));
        assert_eq!(row.get("score"), Some(&TypedValue::integer(30)));
    }

    #[test]
    fn empty_event_has_no_rows() {
        let event = EvaluationEvent::for_table(
            DecisionTable::new("menu", HitPolicy::Unique),
            Vec::new(),
        );
        let result = DecisionTableResult::from_event(&event);
        assert!(result.is_empty());
        assert_eq!(result.single_result(), Ok(None));
    }

    #[test]
    fn single_entry_rejects_compound_rows() {
        let event = EvaluationEvent::for_table(
            DecisionTable::new("menu", HitPolicy::First),
            vec![rule("r1", "Stew", "Water")],
        );
        let result = DecisionTableResult::from_event(&event);
        let row = result.first_result().unwrap();
        assert!(matches!(
            row.single_entry(),
            Err(ModelError::MultipleEntries { count: 2, .. })
        ));
    }
}
