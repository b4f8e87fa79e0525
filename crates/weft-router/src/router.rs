// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event dispatch.
//!
//! The router is the single entry point plugins and host code use to publish
//! runtime events. Every dispatch computes a fresh handler chain, invokes
//! handlers strictly in chain order, isolates per-handler failures, and
//! supports synchronous re-entrant dispatch from inside a handler.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::{debug, warn};
use weft_core::WeftError;
use weft_manifest::InteractionContext;

use crate::resolver::{InteractionResolver, ResolvedHandlerChain};

/// The event passed to each handler in a resolved chain.
#[derive(Debug, Clone, Copy)]
pub struct DispatchEvent<'a> {
    pub interaction_id: &'a str,
    pub context: &'a InteractionContext,
    pub payload: &'a serde_json::Value,
}

/// A concrete handler registered under a manifest `handler_ref`.
///
/// Handlers receive the router so they can publish further events; nested
/// dispatches compute their own chains and unwind stack-like.
pub trait EventHandler: Send + Sync {
    fn handle(&self, event: &DispatchEvent<'_>, router: &EventRouter) -> Result<(), WeftError>;
}

impl<F> EventHandler for F
where
    F: Fn(&DispatchEvent<'_>, &EventRouter) -> Result<(), WeftError> + Send + Sync,
{
    fn handle(&self, event: &DispatchEvent<'_>, router: &EventRouter) -> Result<(), WeftError> {
        self(event, router)
    }
}

/// What one `dispatch` call did: the chain it resolved, the handlers it
/// reached, and every failure it isolated along the way.
#[derive(Debug, Default)]
pub struct DispatchOutcome {
    /// The chain resolved for this call, in invocation order.
    pub chain: ResolvedHandlerChain,
    /// Handler refs actually invoked (registered and called), in order.
    pub invoked: Vec<String>,
    /// Per-handler failures; never abort delivery to later handlers.
    pub failures: Vec<WeftError>,
}

impl DispatchOutcome {
    /// True when every resolved handler ran without failure.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Top-level dispatch façade over the interaction resolver.
pub struct EventRouter {
    resolver: InteractionResolver,
    handlers: RwLock<HashMap<String, Arc<dyn EventHandler>>>,
}

impl EventRouter {
    /// Create a router over the given resolver.
    pub fn new(resolver: InteractionResolver) -> Self {
        Self {
            resolver,
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Register (or replace) the concrete handler behind a `handler_ref`.
    pub fn register_handler(&self, handler_ref: impl Into<String>, handler: Arc<dyn EventHandler>) {
        let handler_ref = handler_ref.into();
        let mut handlers = self.handlers.write().expect("handler registry poisoned");
        handlers.insert(handler_ref, handler);
    }

    /// Convenience registration for closure handlers.
    pub fn register_fn<F>(&self, handler_ref: impl Into<String>, handler: F)
    where
        F: Fn(&DispatchEvent<'_>, &EventRouter) -> Result<(), WeftError> + Send + Sync + 'static,
    {
        self.register_handler(handler_ref, Arc::new(handler));
    }

    /// Remove a handler registration. Returns true if one was present.
    pub fn unregister_handler(&self, handler_ref: &str) -> bool {
        let mut handlers = self.handlers.write().expect("handler registry poisoned");
        handlers.remove(handler_ref).is_some()
    }

    /// Dispatch a runtime event.
    ///
    /// Resolves a fresh chain, then invokes each handler in order with
    /// `payload`. Delivery is at-least-once per resolved handler per call; a
    /// failing or unregistered handler is recorded in the outcome and logged,
    /// and delivery continues to the rest of the chain. An empty chain is a
    /// valid no-op.
    pub fn dispatch(
        &self,
        interaction_id: &str,
        context: &InteractionContext,
        payload: &serde_json::Value,
    ) -> DispatchOutcome {
        let chain = self.resolver.resolve(interaction_id, context);
        if self.resolver.debug_logging {
            debug!(interaction_id, chain_len = chain.len(), "dispatching");
        }

        let event = DispatchEvent {
            interaction_id,
            context,
            payload,
        };

        let mut outcome = DispatchOutcome {
            chain: chain.clone(),
            ..DispatchOutcome::default()
        };

        for resolved in &chain {
            // Look up under a short-lived read guard and drop it before the
            // call so handlers can re-enter the router (including handler
            // registration) without deadlocking.
            let handler = {
                let handlers = self.handlers.read().expect("handler registry poisoned");
                handlers.get(&resolved.handler_ref).cloned()
            };

            let Some(handler) = handler else {
                warn!(
                    handler_ref = resolved.handler_ref.as_str(),
                    plugin_id = resolved.plugin_id.as_str(),
                    "resolved handler is not registered"
                );
                outcome.failures.push(WeftError::HandlerNotRegistered {
                    handler_ref: resolved.handler_ref.clone(),
                });
                continue;
            };

            outcome.invoked.push(resolved.handler_ref.clone());
            if let Err(err) = handler.handle(&event, self) {
                warn!(
                    handler_ref = resolved.handler_ref.as_str(),
                    error = %err,
                    "handler failed; continuing with remaining chain"
                );
                outcome.failures.push(WeftError::Handler {
                    handler_ref: resolved.handler_ref.clone(),
                    message: err.to_string(),
                });
            }
        }

        outcome
    }

    /// The resolver backing this router.
    pub fn resolver(&self) -> &InteractionResolver {
        &self.resolver
    }
}
