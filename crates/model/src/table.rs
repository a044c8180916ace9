//! Static decision table model: hit policies, declared outputs and the
//! decision logic capability consulted by the hit policy handlers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
use crate::value::TypedValue;

// ──────────────────────────────────────────────
// Hit policies and aggregators
// ──────────────────────────────────────────────

/// DMN hit policy of a decision table (DMN 1.3 §8.2.8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitPolicy {
    Unique,
    First,
    Any,
    RuleOrder,
    OutputOrder,
    Priority,
    Collect,
}

impl HitPolicy {
    pub const ALL: [HitPolicy; 7] = [
        HitPolicy::Unique,
        HitPolicy::First,
        HitPolicy::Any,
        HitPolicy::RuleOrder,
        HitPolicy::OutputOrder,
        HitPolicy::Priority,
        HitPolicy::Collect,
    ];

    /// Name as written in the DMN `hitPolicy` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            HitPolicy::Unique => "UNIQUE",
            HitPolicy::First => "FIRST",
            HitPolicy::Any => "ANY",
            HitPolicy::RuleOrder => "RULE ORDER",
            HitPolicy::OutputOrder => "OUTPUT ORDER",
            HitPolicy::Priority => "PRIORITY",
            HitPolicy::Collect => "COLLECT",
        }
    }

    /// Single-letter form used in decision table headers.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            HitPolicy::Unique => "U",
            HitPolicy::First => "F",
            HitPolicy::Any => "A",
            HitPolicy::RuleOrder => "R",
            HitPolicy::OutputOrder => "O",
            HitPolicy::Priority => "P",
            HitPolicy::Collect => "C",
        }
    }
}

impl fmt::Display for HitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HitPolicy {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('_', " ");
        HitPolicy::ALL
            .into_iter()
            .find(|p| p.name() == normalized || p.abbreviation() == normalized)
            .ok_or_else(|| ModelError::UnknownHitPolicy {
                value: s.to_string(),
            })
    }
}

/// Built-in aggregator applicable under the COLLECT hit policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Aggregator {
    Count,
    Sum,
    Min,
    Max,
}

impl Aggregator {
    pub const ALL: [Aggregator; 4] = [
        Aggregator::Count,
        Aggregator::Sum,
        Aggregator::Min,
        Aggregator::Max,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Aggregator::Count => "COUNT",
            Aggregator::Sum => "SUM",
            Aggregator::Min => "MIN",
            Aggregator::Max => "MAX",
        }
    }

    /// Symbol of the collect shorthand (`C#`, `C+`, `C<`, `C>`).
    pub fn symbol(&self) -> char {
        match self {
            Aggregator::Count => '#',
            Aggregator::Sum => '+',
            Aggregator::Min => '<',
            Aggregator::Max => '>',
        }
    }
}

impl fmt::Display for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Aggregator {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        Aggregator::ALL
            .into_iter()
            .find(|a| a.name() == normalized)
            .ok_or_else(|| ModelError::UnknownAggregator {
                value: s.to_string(),
            })
    }
}

// ──────────────────────────────────────────────
// Hit policy key
// ──────────────────────────────────────────────

/// A (hit policy, aggregator) pair identifying one handler.
///
/// Only `COLLECT` pairs with an aggregator. Serialized in its display
/// form, e.g. `"PRIORITY"` or `"COLLECT SUM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct HitPolicyKey {
    policy: HitPolicy,
    aggregator: Option<Aggregator>,
}

impl HitPolicyKey {
    /// The eleven combinations the engine ships handlers for.
    pub const BUILTIN: [HitPolicyKey; 11] = [
        HitPolicyKey::of(HitPolicy::Unique),
        HitPolicyKey::of(HitPolicy::First),
        HitPolicyKey::of(HitPolicy::Any),
        HitPolicyKey::of(HitPolicy::RuleOrder),
        HitPolicyKey::of(HitPolicy::OutputOrder),
        HitPolicyKey::of(HitPolicy::Priority),
        HitPolicyKey::of(HitPolicy::Collect),
        HitPolicyKey::collect(Aggregator::Count),
        HitPolicyKey::collect(Aggregator::Sum),
        HitPolicyKey::collect(Aggregator::Min),
        HitPolicyKey::collect(Aggregator::Max),
    ];

    pub fn new(policy: HitPolicy, aggregator: Option<Aggregator>) -> Result<Self, ModelError> {
        match aggregator {
            Some(aggregator) if policy != HitPolicy::Collect => {
                Err(ModelError::AggregatorNotAllowed {
                    policy: policy.to_string(),
                    aggregator: aggregator.to_string(),
                })
            }
            _ => Ok(HitPolicyKey { policy, aggregator }),
        }
    }

    /// Key for a hit policy without aggregator.
    pub const fn of(policy: HitPolicy) -> Self {
        HitPolicyKey {
            policy,
            aggregator: None,
        }
    }

    pub const fn collect(aggregator: Aggregator) -> Self {
        HitPolicyKey {
            policy: HitPolicy::Collect,
            aggregator: Some(aggregator),
        }
    }

    pub fn policy(&self) -> HitPolicy {
        self.policy
    }

    pub fn aggregator(&self) -> Option<Aggregator> {
        self.aggregator
    }
}

impl fmt::Display for HitPolicyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.aggregator {
            Some(aggregator) => write!(f, "{} {}", self.policy, aggregator),
            None => write!(f, "{}", self.policy),
        }
    }
}

impl FromStr for HitPolicyKey {
    type Err = ModelError;

    /// Accepts `PRIORITY`, `RULE ORDER`, `COLLECT SUM`, `P`, `C+` and the like.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let mut chars = trimmed.chars();
        if let (Some('C' | 'c'), Some(symbol), None) = (chars.next(), chars.next(), chars.next()) {
            if let Some(aggregator) = Aggregator::ALL.into_iter().find(|a| a.symbol() == symbol)
            {
                return Ok(HitPolicyKey::collect(aggregator));
            }
        }

        if let Ok(policy) = trimmed.parse::<HitPolicy>() {
            return Ok(HitPolicyKey::of(policy));
        }

        match trimmed.rsplit_once(char::is_whitespace) {
            Some((head, tail)) => {
                let policy = head.parse::<HitPolicy>()?;
                let aggregator = tail.parse::<Aggregator>()?;
                HitPolicyKey::new(policy, Some(aggregator))
            }
            None => Err(ModelError::UnknownHitPolicy {
                value: s.to_string(),
            }),
        }
    }
}

impl From<HitPolicyKey> for String {
    fn from(key: HitPolicyKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for HitPolicyKey {
    type Error = ModelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<HitPolicy> for HitPolicyKey {
    fn from(policy: HitPolicy) -> Self {
        HitPolicyKey::of(policy)
    }
}

// ──────────────────────────────────────────────
// Declared outputs
// ──────────────────────────────────────────────

/// An output column of a decision table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeclaredOutput {
    #[serde(default)]
    pub id: Option<String>,
    /// Output name; required for lookups when the table has several outputs.
    #[serde(default)]
    pub name: Option<String>,
    /// Ordered list of allowed values. Empty means none declared.
    #[serde(default)]
    pub allowed_values: Vec<TypedValue>,
}

impl DeclaredOutput {
    pub fn named(name: impl Into<String>) -> Self {
        DeclaredOutput {
            id: None,
            name: Some(name.into()),
            allowed_values: Vec::new(),
        }
    }

    pub fn unnamed() -> Self {
        DeclaredOutput::default()
    }

    pub fn with_allowed_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<TypedValue>,
    {
        self.allowed_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_allowed_values(&self) -> bool {
        !self.allowed_values.is_empty()
    }

    /// The output name if present and non-empty.
    pub fn output_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// Name for diagnostics.
    pub fn display_name(&self) -> &str {
        self.output_name().unwrap_or("unnamed output")
    }

    /// Position of a value within the allowed values.
    pub fn position_of(&self, value: &TypedValue) -> Option<usize> {
        self.allowed_values.iter().position(|v| v.matches(value))
    }
}

// ──────────────────────────────────────────────
// Decision logic
// ──────────────────────────────────────────────

/// The logic behind a decision, as seen by the hit policy handlers.
///
/// Handlers that order rules by declared output values only work on
/// decision tables and ask for that capability through
/// `as_decision_table`.
pub trait DecisionLogic: fmt::Debug + Send + Sync {
    /// Kind name used in diagnostics, e.g. `decisionTable`.
    fn kind(&self) -> &str;

    fn as_decision_table(&self) -> Option<&DecisionTable> {
        None
    }
}

/// A decision table: its hit policy and declared outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTable {
    pub id: String,
    pub hit_policy: HitPolicyKey,
    #[serde(default)]
    pub outputs: Vec<DeclaredOutput>,
}

impl DecisionTable {
    pub fn new(id: impl Into<String>, hit_policy: impl Into<HitPolicyKey>) -> Self {
        DecisionTable {
            id: id.into(),
            hit_policy: hit_policy.into(),
            outputs: Vec::new(),
        }
    }

    pub fn with_output(mut self, output: DeclaredOutput) -> Self {
        self.outputs.push(output);
        self
    }

    pub fn is_single_output(&self) -> bool {
        self.outputs.len() == 1
    }
}

impl DecisionLogic for DecisionTable {
    fn kind(&self) -> &str {
        "decisionTable"
    }

    fn as_decision_table(&self) -> Option<&DecisionTable> {
        Some(self)
    }
}

/// A decision whose logic is a single literal expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralExpression {
    pub id: String,
    pub expression: String,
}

impl DecisionLogic for LiteralExpression {
    fn kind(&self) -> &str {
        "literalExpression"
    }
}
