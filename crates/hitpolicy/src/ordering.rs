//! Rule ordering by the position of output values in declared value lists.
//!
//! Used by PRIORITY and OUTPUT ORDER. Each output that declares allowed
//! values contributes one sort key: the index of the rule's value in that
//! list. Keys are compared left to right in output declaration order, so
//! the first such output is the primary key and later ones break ties.
//! Without any declared values every rule ranks equal.

use dmn_model::{DecisionTable, DeclaredOutput, EvaluatedDecisionRule, EvaluatedOutput, TypedValue};

use crate::error::HitPolicyError;

/// Ordering over matched rules, built per evaluation from the declared outputs.
#[derive(Debug, Clone)]
pub struct OutputOrdering<'a> {
    keys: Vec<&'a DeclaredOutput>,
    single_output: bool,
}

impl<'a> OutputOrdering<'a> {
    /// Build the ordering for a table.
    ///
    /// Fails with `OutputNameRequired` if the table has several outputs
    /// and one with declared values has no name.
    pub fn try_new(table: &'a DecisionTable) -> Result<Self, HitPolicyError> {
        let single_output = table.is_single_output();
        let keys: Vec<&DeclaredOutput> = table
            .outputs
            .iter()
            .filter(|o| o.has_allowed_values())
            .collect();
        if !single_output && keys.iter().any(|o| o.output_name().is_none()) {
            return Err(HitPolicyError::OutputNameRequired);
        }
        Ok(OutputOrdering {
            keys,
            single_output,
        })
    }

    /// True when no output declares values and all rules rank equal.
    pub fn is_noop(&self) -> bool {
        self.keys.is_empty()
    }

    /// Index of the rule's value in each keyed output's allowed values.
    ///
    /// A rule without an entry for a keyed output ranks like a null value.
    pub fn rank(&self, rule: &EvaluatedDecisionRule) -> Result<Vec<usize>, HitPolicyError> {
        self.keys
            .iter()
            .map(|output| {
                let value = self
                    .resolve(rule, output)
                    .map(|o| o.value.clone())
                    .unwrap_or_else(TypedValue::null);
                position(output, &value)
            })
            .collect()
    }

    /// Sort rules ascending by rank. Rules with equal rank keep their order.
    pub fn sort(&self, rules: Vec<EvaluatedDecisionRule>) -> Result<Vec<EvaluatedDecisionRule>, HitPolicyError> {
        if self.is_noop() {
            return Ok(rules);
        }
        let mut ranked = self.ranked(rules)?;
        ranked.sort_by(|(a, _), (b, _)| a.cmp(b));
        Ok(ranked.into_iter().map(|(_, rule)| rule).collect())
    }

    /// The minimal rule by rank; the earliest one wins ties.
    pub fn min(&self, rules: Vec<EvaluatedDecisionRule>) -> Result<Option<EvaluatedDecisionRule>, HitPolicyError> {
        let ranked = self.ranked(rules)?;
        Ok(ranked
            .into_iter()
            .min_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, rule)| rule))
    }

    /// Check a single rule's values against every keyed output.
    ///
    /// Outputs the rule has no entry for are skipped.
    pub fn validate(&self, rule: &EvaluatedDecisionRule) -> Result<(), HitPolicyError> {
        for output in &self.keys {
            if let Some(evaluated) = self.resolve(rule, output) {
                position(output, &evaluated.value)?;
            }
        }
        Ok(())
    }

    fn ranked(
        &self,
        rules: Vec<EvaluatedDecisionRule>,
    ) -> Result<Vec<(Vec<usize>, EvaluatedDecisionRule)>, HitPolicyError> {
        rules
            .into_iter()
            .map(|rule| Ok((self.rank(&rule)?, rule)))
            .collect()
    }

    /// The rule's entry for a keyed output; an unnamed output is the sole one.
    fn resolve<'r>(
        &self,
        rule: &'r EvaluatedDecisionRule,
        output: &DeclaredOutput,
    ) -> Option<&'r EvaluatedOutput> {
        match output.output_name() {
            Some(name) => rule.output(name),
            None if self.single_output => rule.first_output(),
            None => None,
        }
    }
}

fn position(output: &DeclaredOutput, value: &TypedValue) -> Result<usize, HitPolicyError> {
    output
        .position_of(value)
        .ok_or_else(|| HitPolicyError::OutputValueNotAllowed {
            output_name: output.display_name().to_string(),
            value: value.clone(),
            allowed: output.allowed_values.clone(),
        })
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
