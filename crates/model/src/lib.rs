//! Decision table evaluation model.
//!
//! The types a hit policy handler consumes and produces: typed values,
//! matched rules with their evaluated outputs, the table's declared
//! outputs and hit policy, and the evaluation event tying them together.
//! Decision results are generated from a finalized event.

pub mod error;
pub mod event;
pub mod result;
pub mod rule;
pub mod table;
pub mod value;

pub use error::ModelError;
pub use event::EvaluationEvent;
pub use result::{DecisionResultEntries, DecisionTableResult};
pub use rule::{EvaluatedDecisionRule, EvaluatedOutput};
pub use table::{
    Aggregator, DecisionLogic, DecisionTable, DeclaredOutput, HitPolicy, HitPolicyKey,
    LiteralExpression,
};
pub use value::{display_values, TypedValue, Value, ValueKind};
