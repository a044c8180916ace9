//! COUNT, SUM, MIN and MAX over coerced numeric values.
//!
//! The result keeps the numeric type selected during coercion, so an
//! Integer sum stays an Integer. Integer and Long sums are overflow
//! checked.

use dmn_model::{Aggregator, TypedValue, ValueKind};

use crate::coerce::NumericValues;
use crate::error::HitPolicyError;

/// Aggregate coerced values with SUM, MIN or MAX.
///
/// COUNT is defined on the number of matching rules rather than on the
/// values; for a value list it counts the values.
pub fn aggregate(aggregator: Aggregator, values: &NumericValues) -> Result<TypedValue, HitPolicyError> {
    match aggregator {
        Aggregator::Count => count(values.len()),
        Aggregator::Sum => sum(values),
        Aggregator::Min | Aggregator::Max => extremum(aggregator, values),
    }
}

/// COUNT result for `n` items, as an Integer.
pub fn count(n: usize) -> Result<TypedValue, HitPolicyError> {
    i32::try_from(n)
        .map(TypedValue::integer)
        .map_err(|_| HitPolicyError::AggregationOverflow {
            aggregator: Aggregator::Count,
            kind: ValueKind::Integer,
        })
}

fn sum(values: &NumericValues) -> Result<TypedValue, HitPolicyError> {
    let overflow = |kind| HitPolicyError::AggregationOverflow {
        aggregator: Aggregator::Sum,
        kind,
    };
    match values {
        NumericValues::Integer(v) => v
            .iter()
            .try_fold(0i32, |acc, x| acc.checked_add(*x))
            .map(TypedValue::integer)
            .ok_or_else(|| overflow(ValueKind::Integer)),
        NumericValues::Long(v) => v
            .iter()
            .try_fold(0i64, |acc, x| acc.checked_add(*x))
            .map(TypedValue::long)
            .ok_or_else(|| overflow(ValueKind::Long)),
        NumericValues::Double(v) => Ok(TypedValue::double(v.iter().sum())),
    }
}

fn extremum(aggregator: Aggregator, values: &NumericValues) -> Result<TypedValue, HitPolicyError> {
    let max = aggregator == Aggregator::Max;
    let result = match values {
        NumericValues::Integer(v) => {
            let it = v.iter().copied();
            (if max { it.max() } else { it.min() }).map(TypedValue::integer)
        }
        NumericValues::Long(v) => {
            let it = v.iter().copied();
            (if max { it.max() } else { it.min() }).map(TypedValue::long)
        }
        NumericValues::Double(v) => {
            let it = v.iter().copied();
            let picked = if max {
                it.max_by(f64::total_cmp)
            } else {
                it.min_by(f64::total_cmp)
            };
            picked.map(TypedValue::double)
        }
    };
    result.ok_or(HitPolicyError::EmptyAggregationInput { aggregator })
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
