//! Common numeric representation for aggregated output values.
//!
//! Collected output values are converted to the narrowest numeric type
//! every value qualifies for, trying Integer, then Long, then Double.
//! The chosen type is the type of the aggregation result.

use dmn_model::{TypedValue, Value, ValueKind};

use crate::error::HitPolicyError;

/// Target types in the order they are tried.
pub const COERCION_ORDER: [ValueKind; 3] = [ValueKind::Integer, ValueKind::Long, ValueKind::Double];

/// Values converted to a single numeric representation.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericValues {
    Integer(Vec<i32>),
    Long(Vec<i64>),
    Double(Vec<f64>),
}

impl NumericValues {
    pub fn kind(&self) -> ValueKind {
        match self {
            NumericValues::Integer(_) => ValueKind::Integer,
            NumericValues::Long(_) => ValueKind::Long,
            NumericValues::Double(_) => ValueKind::Double,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            NumericValues::Integer(v) => v.len(),
            NumericValues::Long(v) => v.len(),
            NumericValues::Double(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Convert all values to the first type of `COERCION_ORDER` they all qualify for.
///
/// Pure; fails with `UnsupportedAggregationType` if no type fits every value.
pub fn coerce(values: &[TypedValue]) -> Result<NumericValues, HitPolicyError> {
    let numeric = if let Some(ints) = convert_all(values, to_integer) {
        NumericValues::Integer(ints)
    } else if let Some(longs) = convert_all(values, to_long) {
        NumericValues::Long(longs)
    } else if let Some(doubles) = convert_all(values, to_double) {
        NumericValues::Double(doubles)
    } else {
        return Err(HitPolicyError::UnsupportedAggregationType {
            values: values.to_vec(),
            attempted: COERCION_ORDER.to_vec(),
        });
    };

    tracing::debug!(
        kind = %numeric.kind(),
        count = numeric.len(),
        "numeric type selected for aggregation"
    );
    Ok(numeric)
}

fn convert_all<T>(values: &[TypedValue], convert: fn(&TypedValue) -> Option<T>) -> Option<Vec<T>> {
    values.iter().map(convert).collect()
}

fn to_integer(value: &TypedValue) -> Option<i32> {
    match value.kind {
        ValueKind::Integer => match &value.raw {
            Value::Integer(i) => Some(*i),
            Value::Long(l) => i32::try_from(*l).ok(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        },
        ValueKind::Untyped => match value.raw {
            Value::Integer(i) => Some(i),
            _ => None,
        },
        _ => None,
    }
}

fn to_long(value: &TypedValue) -> Option<i64> {
    match value.kind {
        ValueKind::Integer | ValueKind::Long | ValueKind::Untyped => match &value.raw {
            Value::Integer(i) => Some(i64::from(*i)),
            Value::Long(l) => Some(*l),
            Value::String(s) => s.parse().ok(),
            // A double's string form never parses as a 64-bit integer.
            _ => None,
        },
        _ => None,
    }
}

fn to_double(value: &TypedValue) -> Option<f64> {
    match value.kind {
        ValueKind::Integer | ValueKind::Long | ValueKind::Double | ValueKind::Untyped => {
            match &value.raw {
                Value::Integer(i) => Some(f64::from(*i)),
                Value::Long(l) => Some(*l as f64),
                Value::Double(d) => Some(*d),
                Value::String(s) => s.parse().ok(),
                _ => None,
            }
        }
        _ => None,
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
