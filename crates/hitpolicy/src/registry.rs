//! Handler registry: hit policy keys to handlers.
//!
//! The registry is built once, usually from the built-in handlers, and
//! passed to whatever evaluates decision tables. Lookups take a read lock
//! and clone an `Arc`, so evaluations never hold the lock while a handler
//! runs. Handlers can be replaced at runtime but never removed.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use dmn_model::{EvaluationEvent, HitPolicyKey};

use crate::error::HitPolicyError;
use crate::handler::{builtin_handlers, HitPolicyHandler};

// ──────────────────────────────────────────────
// Registry
// ──────────────────────────────────────────────

/// Thread-safe map from hit policy key to handler.
pub struct HitPolicyRegistry {
    handlers: RwLock<HashMap<HitPolicyKey, Arc<dyn HitPolicyHandler>>>,
}

impl HitPolicyRegistry {
    /// Registry holding the eleven built-in handlers.
    pub fn new() -> Self {
        RegistryBuilder::with_builtins().build()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::with_builtins()
    }

    /// The handler for a key, if any.
    pub fn lookup(&self, key: HitPolicyKey) -> Option<Arc<dyn HitPolicyHandler>> {
        let handlers = self.handlers.read().unwrap_or_else(PoisonError::into_inner);
        let handler = handlers.get(&key).cloned();
        tracing::debug!(%key, found = handler.is_some(), "hit policy handler lookup");
        handler
    }

    /// Register a handler, returning the handler it replaced.
    pub fn register(
        &self,
        key: HitPolicyKey,
        handler: Arc<dyn HitPolicyHandler>,
    ) -> Option<Arc<dyn HitPolicyHandler>> {
        let previous = self
            .handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, handler);
        if previous.is_some() {
            tracing::info!(%key, "hit policy handler replaced");
        } else {
            tracing::debug!(%key, "hit policy handler registered");
        }
        previous
    }

    pub fn contains(&self, key: HitPolicyKey) -> bool {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&key)
    }

    /// Registered keys in display order.
    pub fn keys(&self) -> Vec<HitPolicyKey> {
        let mut keys: Vec<HitPolicyKey> = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect();
        keys.sort_by_key(|k| k.to_string());
        keys
    }

    /// Apply the handler for the event's decision table hit policy.
    ///
    /// Decisions that are not decision tables carry no hit policy; use
    /// [`apply_with`](Self::apply_with) for those.
    pub fn apply(&self, event: EvaluationEvent) -> Result<EvaluationEvent, HitPolicyError> {
        match event.hit_policy_key() {
            Some(key) => self.apply_with(key, event),
            None => Err(HitPolicyError::UnsupportedDecisionLogic {
                policy: None,
                kind: event.decision.kind().to_string(),
            }),
        }
    }

    /// Apply the handler registered for `key`.
    pub fn apply_with(
        &self,
        key: HitPolicyKey,
        mut event: EvaluationEvent,
    ) -> Result<EvaluationEvent, HitPolicyError> {
        let handler = self
            .lookup(key)
            .ok_or(HitPolicyError::HandlerNotRegistered { key })?;
        handler.apply(&mut event)?;
        Ok(event)
    }
}

impl Default for HitPolicyRegistry {
    fn default() -> Self {
        HitPolicyRegistry::new()
    }
}

impl fmt::Debug for HitPolicyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HitPolicyRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}

// ──────────────────────────────────────────────
// Builder
// ──────────────────────────────────────────────

/// Builds a registry from the built-ins or from scratch.
pub struct RegistryBuilder {
    handlers: HashMap<HitPolicyKey, Arc<dyn HitPolicyHandler>>,
}

impl RegistryBuilder {
    pub fn with_builtins() -> Self {
        RegistryBuilder {
            handlers: builtin_handlers().into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        RegistryBuilder {
            handlers: HashMap::new(),
        }
    }

    /// Add a handler, replacing any handler already set for the key.
    pub fn handler<H>(mut self, key: HitPolicyKey, handler: H) -> Self
    where
        H: HitPolicyHandler + 'static,
    {
        self.handlers.insert(key, Arc::new(handler));
        self
    }

    pub fn build(self) -> HitPolicyRegistry {
        tracing::debug!(handlers = self.handlers.len(), "hit policy registry built");
        HitPolicyRegistry {
            handlers: RwLock::new(self.handlers),
        }
    }
}
