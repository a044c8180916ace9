//! Hit policy handlers.
//!
//! A handler receives the evaluation event after rule matching and reduces,
//! reorders or aggregates the matched rules according to one hit policy.
//! The built-in handlers are plain functions; any closure with the same
//! signature is a handler too.

use std::sync::Arc;

use dmn_model::{Aggregator, EvaluationEvent, HitPolicy, HitPolicyKey};

use crate::error::HitPolicyError;

pub mod collect;
pub mod ordered;
pub mod single;

// ──────────────────────────────────────────────
// Trait
// ──────────────────────────────────────────────

/// Applies one hit policy to an evaluation event.
///
/// Handlers are shared between threads through the registry and must not
/// keep per-evaluation state. On error the event is left in an
/// unspecified state and the evaluation is aborted.
pub trait HitPolicyHandler: Send + Sync {
    fn apply(&self, event: &mut EvaluationEvent) -> Result<(), HitPolicyError>;
}

impl<F> HitPolicyHandler for F
where
    F: Fn(&mut EvaluationEvent) -> Result<(), HitPolicyError> + Send + Sync,
{
    fn apply(&self, event: &mut EvaluationEvent) -> Result<(), HitPolicyError> {
        self(event)
    }
}

// ──────────────────────────────────────────────
// Built-ins
// ──────────────────────────────────────────────

/// The eleven DMN 1.3 hit policy handlers with their keys.
pub fn builtin_handlers() -> Vec<(HitPolicyKey, Arc<dyn HitPolicyHandler>)> {
    vec![
        entry(HitPolicyKey::of(HitPolicy::Unique), single::unique),
        entry(HitPolicyKey::of(HitPolicy::First), single::first),
        entry(HitPolicyKey::of(HitPolicy::Any), single::any),
        entry(HitPolicyKey::of(HitPolicy::RuleOrder), ordered::rule_order),
        entry(HitPolicyKey::of(HitPolicy::OutputOrder), ordered::output_order),
        entry(HitPolicyKey::of(HitPolicy::Priority), ordered::priority),
        entry(HitPolicyKey::of(HitPolicy::Collect), collect::collect),
        entry(HitPolicyKey::collect(Aggregator::Count), collect::collect_count),
        entry(HitPolicyKey::collect(Aggregator::Sum), collect::collect_sum),
        entry(HitPolicyKey::collect(Aggregator::Min), collect::collect_min),
        entry(HitPolicyKey::collect(Aggregator::Max), collect::collect_max),
    ]
}

fn entry<H>(key: HitPolicyKey, handler: H) -> (HitPolicyKey, Arc<dyn HitPolicyHandler>)
where
    H: HitPolicyHandler + 'static,
{
    (key, Arc::new(handler))
}
