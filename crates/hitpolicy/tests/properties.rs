//! Property tests for the hit policy handlers.
//!
//! Rule sets are generated with random sizes and single integer outputs;
//! the properties hold for any such set.

use dmn_hitpolicy::{HitPolicyError, HitPolicyRegistry};
use dmn_model::{
    Aggregator, DecisionTable, DeclaredOutput, EvaluatedDecisionRule, EvaluatedOutput,
    EvaluationEvent, HitPolicy, HitPolicyKey, TypedValue,
};
use proptest::prelude::*;

fn rules_from(values: &[i32]) -> Vec<EvaluatedDecisionRule> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            EvaluatedDecisionRule::new(format!("rule{}", i))
                .with_output(EvaluatedOutput::new("n", TypedValue::integer(*v)))
        })
        .collect()
}

fn apply(
    key: HitPolicyKey,
    rules: Vec<EvaluatedDecisionRule>,
) -> Result<EvaluationEvent, HitPolicyError> {
    let table = DecisionTable::new("props", key).with_output(DeclaredOutput::named("n"));
    HitPolicyRegistry::default().apply(EvaluationEvent::for_table(table, rules))
}

proptest! {
    #[test]
    fn unique_is_identity_for_at_most_one_match(values in prop::collection::vec(any::<i32>(), 0..=1)) {
        let rules = rules_from(&values);
        let event = apply(HitPolicyKey::of(HitPolicy::Unique), rules.clone()).unwrap();
        prop_assert_eq!(event.matching_rules, rules);
    }

    #[test]
    fn unique_rejects_several_matches(values in prop::collection::vec(any::<i32>(), 2..10)) {
        let err = apply(HitPolicyKey::of(HitPolicy::Unique), rules_from(&values)).unwrap_err();
        prop_assert_eq!(err.code(), "DMN-03001");
    }

    #[test]
    fn first_keeps_head(values in prop::collection::vec(any::<i32>(), 0..10)) {
        let rules = rules_from(&values);
        let event = apply(HitPolicyKey::of(HitPolicy::First), rules.clone()).unwrap();
        let expected: Vec<EvaluatedDecisionRule> = rules.into_iter().take(1).collect();
        prop_assert_eq!(event.matching_rules, expected);
    }

    #[test]
    fn rule_order_and_collect_change_nothing(values in prop::collection::vec(any::<i32>(), 0..10)) {
        let rules = rules_from(&values);
        for key in [HitPolicyKey::of(HitPolicy::RuleOrder), HitPolicyKey::of(HitPolicy::Collect)] {
            let event = apply(key, rules.clone()).unwrap();
            prop_assert_eq!(&event.matching_rules, &rules);
            prop_assert!(!event.has_collect_result());
        }
    }

    #[test]
    fn count_equals_number_of_matches(values in prop::collection::vec(any::<i32>(), 0..20)) {
        let event = apply(HitPolicyKey::collect(Aggregator::Count), rules_from(&values)).unwrap();
        prop_assert_eq!(event.collect_result_value, Some(TypedValue::integer(values.len() as i32)));
    }

    #[test]
    fn sum_of_small_integers_stays_integer(values in prop::collection::vec(-1000i32..1000, 1..20)) {
        let event = apply(HitPolicyKey::collect(Aggregator::Sum), rules_from(&values)).unwrap();
        prop_assert_eq!(event.collect_result_value, Some(TypedValue::integer(values.iter().sum())));
    }

    #[test]
    fn min_and_max_match_iterator(values in prop::collection::vec(any::<i32>(), 1..20)) {
        let min = apply(HitPolicyKey::collect(Aggregator::Min), rules_from(&values)).unwrap();
        let max = apply(HitPolicyKey::collect(Aggregator::Max), rules_from(&values)).unwrap();
        prop_assert_eq!(min.collect_result_value, values.iter().min().copied().map(TypedValue::integer));
        prop_assert_eq!(max.collect_result_value, values.iter().max().copied().map(TypedValue::integer));
    }

    #[test]
    fn output_order_is_a_stable_sort(positions in prop::collection::vec(0usize..3, 0..12)) {
        let labels = ["Low", "Medium", "High"];
        let table = DecisionTable::new("risk", HitPolicy::OutputOrder)
            .with_output(DeclaredOutput::named("risk").with_allowed_values(labels));
        let rules: Vec<EvaluatedDecisionRule> = positions
            .iter()
            .enumerate()
            .map(|(i, p)| {
                EvaluatedDecisionRule::new(format!("rule{}", i))
                    .with_output(EvaluatedOutput::new("risk", TypedValue::untyped(labels[*p])))
            })
            .collect();

        let event = HitPolicyRegistry::default()
            .apply(EvaluationEvent::for_table(table, rules.clone()))
            .unwrap();

        let mut expected = rules;
        expected.sort_by_key(|r| {
            let value = r.output("risk").map(|o| o.value.to_string()).unwrap_or_default();
            labels.iter().position(|l| *l == value)
        });
        prop_assert_eq!(event.matching_rules, expected);
    }
}
