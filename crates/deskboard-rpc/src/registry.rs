//! Action registry: maps action names to handlers and dispatches requests.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::context::{RequestContext, RpcContext};
use crate::errors::ActionError;

/// Successful handler result: the response payload plus whether the action
/// created a resource (drives 201 vs 200 at the HTTP layer).
#[derive(Clone, Debug)]
pub struct ActionOutcome {
    /// Response payload placed under `data`.
    pub data: Value,
    /// True when the action created a new entity.
    pub created: bool,
}

impl ActionOutcome {
    /// A plain success outcome.
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            created: false,
        }
    }

    /// A resource-created outcome.
    pub fn created(data: Value) -> Self {
        Self {
            data,
            created: true,
        }
    }
}

/// Handler for a single board action.
///
/// Handlers are synchronous: one action is one transaction, executed to
/// completion on the calling (blocking) worker.
pub trait ActionHandler: Send + Sync {
    /// Execute the action for the requester in `req`.
    fn handle(
        &self,
        data: Option<&Value>,
        req: &RequestContext,
        ctx: &RpcContext,
    ) -> Result<ActionOutcome, ActionError>;
}

/// Registry of all board actions.
#[derive(Default)]
pub struct ActionRegistry {
    handlers: HashMap<String, Box<dyn ActionHandler>>,
}

impl ActionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under an action name.
    pub fn register(&mut self, action: &str, handler: impl ActionHandler + 'static) {
        let _ = self.handlers.insert(action.to_string(), Box::new(handler));
    }

    /// Whether an action is registered.
    pub fn has_action(&self, action: &str) -> bool {
        self.handlers.contains_key(action)
    }

    /// Registered action names.
    pub fn actions(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }

    /// Dispatch a request to its handler.
    ///
    /// Unknown actions are a validation error (HTTP 400), not a routing
    /// concern — the endpoint is a single URL.
    pub fn dispatch(
        &self,
        action: &str,
        data: Option<&Value>,
        req: &RequestContext,
        ctx: &RpcContext,
    ) -> Result<ActionOutcome, ActionError> {
        let handler = self
            .handlers
            .get(action)
            .ok_or_else(|| ActionError::validation(format!("Unknown action: {action}")))?;
        debug!(action, owner = %req.owner_id, "dispatching board action");
        handler.handle(data, req, ctx)
    }
}
