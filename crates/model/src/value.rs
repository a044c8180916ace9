//! Typed runtime values produced by rule evaluation.
//!
//! A `TypedValue` pairs a raw runtime value with the kind the decision
//! table declared for it. `ValueKind::Untyped` means no declared type is
//! known; consumers then have to look at the raw value's runtime shape.

use serde::{Deserialize, Serialize};
use std::fmt;

// ──────────────────────────────────────────────
// Declared kinds
// ──────────────────────────────────────────────

/// Declared type of a value, as carried by the table's type reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ValueKind {
    Integer,
    Long,
    Double,
    String,
    #[default]
    Untyped,
}

impl ValueKind {
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Integer => "Integer",
            ValueKind::Long => "Long",
            ValueKind::Double => "Double",
            ValueKind::String => "String",
            ValueKind::Untyped => "Untyped",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ──────────────────────────────────────────────
// Raw values
// ──────────────────────────────────────────────

/// Runtime shape of a raw value.
///
/// Deserializes from plain JSON: integers that fit 32 bits become
/// `Integer`, wider integers `Long`, other numbers `Double`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i32),
    Long(i64),
    Double(f64),
    String(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Long(_) | Value::Double(_))
    }

    /// Equality that compares numbers by value across their shapes.
    ///
    /// `Integer(1)`, `Long(1)` and `Double(1.0)` are the same value.
    pub fn same_value(&self, other: &Value) -> bool {
        if !(self.is_number() && other.is_number()) {
            return self == other;
        }
        match (self.as_i64(), other.as_i64()) {
            (Some(a), Some(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }

    fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(i64::from(*i)),
            Value::Long(l) => Some(*l),
            _ => None,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(f64::from(*i)),
            Value::Long(l) => Some(*l as f64),
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Reshape a number to the representation of a declared numeric kind.
    ///
    /// Values that cannot take the kind's shape are returned unchanged.
    fn conform(self, kind: ValueKind) -> Value {
        match (kind, self) {
            (ValueKind::Integer, Value::Long(l)) => match i32::try_from(l) {
                Ok(i) => Value::Integer(i),
                Err(_) => Value::Long(l),
            },
            (ValueKind::Long, Value::Integer(i)) => Value::Long(i64::from(i)),
            (ValueKind::Double, Value::Integer(i)) => Value::Double(f64::from(i)),
            (ValueKind::Double, Value::Long(l)) => Value::Double(l as f64),
            (_, raw) => raw,
        }
    }

    /// Serialize to the plain JSON form.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::json!(b),
            Value::Integer(i) => serde_json::json!(i),
            Value::Long(l) => serde_json::json!(l),
            // Non-finite doubles have no JSON number form.
            Value::Double(d) => serde_json::Number::from_f64(*d)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::json!(s),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Long(l) => write!(f, "{}", l),
            Value::Double(d) => write!(f, "{:?}", d),
            Value::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i)
    }
}

impl From<i64> for Value {
    fn from(l: i64) -> Self {
        Value::Long(l)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

// ──────────────────────────────────────────────
// Typed values
// ──────────────────────────────────────────────

/// A raw value tagged with its declared kind.
///
/// Numbers declared Integer, Long or Double are stored in that kind's
/// shape, whether built in code or loaded from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TypedValueRepr")]
pub struct TypedValue {
    pub kind: ValueKind,
    pub raw: Value,
}

#[derive(Deserialize)]
struct TypedValueRepr {
    #[serde(default)]
    kind: ValueKind,
    raw: Value,
}

impl From<TypedValueRepr> for TypedValue {
    fn from(repr: TypedValueRepr) -> Self {
        TypedValue::new(repr.kind, repr.raw)
    }
}

impl TypedValue {
    pub fn new(kind: ValueKind, raw: impl Into<Value>) -> Self {
        let raw: Value = raw.into();
        TypedValue {
            kind,
            raw: raw.conform(kind),
        }
    }

    pub fn untyped(raw: impl Into<Value>) -> Self {
        TypedValue::new(ValueKind::Untyped, raw)
    }

    pub fn null() -> Self {
        TypedValue {
            kind: ValueKind::Untyped,
            raw: Value::Null,
        }
    }

    pub fn integer(i: i32) -> Self {
        TypedValue::new(ValueKind::Integer, i)
    }

    pub fn long(l: i64) -> Self {
        TypedValue::new(ValueKind::Long, l)
    }

    pub fn double(d: f64) -> Self {
        TypedValue::new(ValueKind::Double, d)
    }

    pub fn string(s: impl Into<String>) -> Self {
        TypedValue::new(ValueKind::String, s.into())
    }

    pub fn is_null(&self) -> bool {
        self.raw.is_null()
    }

    /// Same kind and same value, with numbers compared by value.
    pub fn same_as(&self, other: &TypedValue) -> bool {
        self.kind == other.kind && self.raw.same_value(&other.raw)
    }

    /// Value equality used for declared value lists.
    ///
    /// An untyped side matches on the raw value alone; two typed values
    /// must also agree on their kind. Numbers compare by value.
    pub fn matches(&self, other: &TypedValue) -> bool {
        let same_kind = self.kind == other.kind
            || self.kind == ValueKind::Untyped
            || other.kind == ValueKind::Untyped;
        same_kind && self.raw.same_value(&other.raw)
    }

    pub fn to_json(&self) -> serde_json::Value {
        self.raw.to_json()
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ValueKind::Untyped => write!(f, "{}", self.raw),
            kind => write!(f, "{}({})", kind, self.raw),
        }
    }
}

impl From<&str> for TypedValue {
    fn from(s: &str) -> Self {
        TypedValue::untyped(s)
    }
}

/// Render a list of values for diagnostics: `[Low, Medium, High]`.
pub fn display_values(values: &[TypedValue]) -> String {
    let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", items.join(", "))
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
