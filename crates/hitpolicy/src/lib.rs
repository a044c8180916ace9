//! DMN 1.3 hit policy engine.
//!
//! After the rules of a decision table have been matched against the
//! inputs, the table's hit policy decides what the matches mean: a single
//! rule, an ordered list, or an aggregated value. This crate implements the
//! eleven standard policy and aggregator combinations behind a registry
//! that embedding applications can extend.
//!
//! ```ignore
//! let registry = HitPolicyRegistry::default();
//! let event = registry.apply(EvaluationEvent::for_table(table, matches))?;
//! let result = DecisionTableResult::from_event(&event);
//! ```

pub mod aggregate;
pub mod coerce;
pub mod error;
pub mod handler;
pub mod ordering;
pub mod registry;

pub use error::HitPolicyError;
pub use handler::{builtin_handlers, HitPolicyHandler};
pub use registry::{HitPolicyRegistry, RegistryBuilder};

pub use dmn_model;
