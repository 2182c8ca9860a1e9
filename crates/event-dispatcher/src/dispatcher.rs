//! Event dispatcher: the registry of handlers and ordered delivery.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use crate::error::{DispatchError, HandlerFailure, InvalidDeliveryPolicy, Result};
use crate::event::{DomainEvent, Event};
use crate::handler::{HandlerError, HandlerRef, same_handler};

/// What `notify` does when a handler fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryPolicy {
    /// Stop at the first failing handler and return its error.
    /// Handlers later in the list are not invoked.
    #[default]
    FailFast,

    /// Invoke every handler, collect the failures and report them together.
    Isolate,
}

impl DeliveryPolicy {
    /// Returns the policy name as accepted by `FromStr`.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryPolicy::FailFast => "fail-fast",
            DeliveryPolicy::Isolate => "isolate",
        }
    }
}

impl std::fmt::Display for DeliveryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeliveryPolicy {
    type Err = InvalidDeliveryPolicy;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail-fast" | "failfast" | "fail_fast" => Ok(DeliveryPolicy::FailFast),
            "isolate" | "isolated" => Ok(DeliveryPolicy::Isolate),
            other => Err(InvalidDeliveryPolicy(other.to_string())),
        }
    }
}

type Registry<E> = HashMap<String, Vec<HandlerRef<E>>>;

/// Routes events to the handlers registered for their kind.
///
/// The dispatcher owns its registry: a map from event kind to the handlers
/// registered under it, in registration order. Share it with producers as
/// `Arc<EventDispatcher<E>>`; all operations take `&self`.
///
/// Delivery is synchronous. `notify` snapshots the handler list and releases
/// the lock before invoking anything, so a handler may register or unregister
/// handlers on the same dispatcher; those changes apply to later calls only.
pub struct EventDispatcher<E: DomainEvent> {
    handlers: RwLock<Registry<E>>,
    policy: DeliveryPolicy,
}

impl<E: DomainEvent> EventDispatcher<E> {
    /// Creates a dispatcher with an empty registry and fail-fast delivery.
    pub fn new() -> Self {
        Self::with_policy(DeliveryPolicy::default())
    }

    /// Creates a dispatcher with an empty registry and the given delivery policy.
    pub fn with_policy(policy: DeliveryPolicy) -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            policy,
        }
    }

    /// Returns the delivery policy.
    pub fn policy(&self) -> DeliveryPolicy {
        self.policy
    }

    /// Appends a handler to the list for `kind`, creating the list if needed.
    ///
    /// Registering the same handler twice yields two entries, both invoked.
    pub fn register(&self, kind: impl Into<String>, handler: HandlerRef<E>) {
        let kind = kind.into();
        tracing::debug!(kind = %kind, handler = handler.name(), "registering handler");
        self.write().entry(kind).or_default().push(handler);
    }

    /// Removes the first occurrence of `handler` from the list for `kind`.
    ///
    /// Does nothing if the kind is unknown or the handler is not registered.
    pub fn unregister(&self, kind: &str, handler: &HandlerRef<E>) {
        let mut registry = self.write();
        let Some(handlers) = registry.get_mut(kind) else {
            return;
        };

        if let Some(index) = handlers.iter().position(|h| same_handler(h, handler)) {
            handlers.remove(index);
            tracing::debug!(kind, handler = handler.name(), "unregistered handler");
        }

        if handlers.is_empty() {
            registry.remove(kind);
        }
    }

    /// Removes every handler for every kind.
    pub fn unregister_all(&self) {
        self.write().clear();
        tracing::debug!("unregistered all handlers");
    }

    /// Delivers an event to every handler registered for its kind.
    ///
    /// Handlers run in registration order, once each, before this returns.
    /// An event with no registered handlers is a no-op.
    #[tracing::instrument(skip(self, event), fields(kind = event.kind(), event_id = %event.event_id()))]
    pub fn notify(&self, event: &Event<E>) -> Result<()> {
        let kind = event.kind();
        let handlers = self.handlers(kind);

        if handlers.is_empty() {
            tracing::trace!("no handlers registered");
            return Ok(());
        }

        metrics::counter!("dispatcher_events_notified", "kind" => kind).increment(1);

        match self.policy {
            DeliveryPolicy::FailFast => {
                for handler in &handlers {
                    Self::invoke(handler, event).map_err(|source| DispatchError::Handler {
                        kind,
                        handler: handler.name(),
                        source,
                    })?;
                }
                Ok(())
            }
            DeliveryPolicy::Isolate => {
                let failures: Vec<HandlerFailure> = handlers
                    .iter()
                    .filter_map(|handler| {
                        Self::invoke(handler, event)
                            .err()
                            .map(|source| HandlerFailure {
                                handler: handler.name(),
                                source,
                            })
                    })
                    .collect();

                if failures.is_empty() {
                    Ok(())
                } else {
                    Err(DispatchError::Isolated { kind, failures })
                }
            }
        }
    }

    /// Returns a snapshot of the handlers registered for `kind`, in order.
    ///
    /// An unknown kind yields an empty list.
    pub fn handlers(&self, kind: &str) -> Vec<HandlerRef<E>> {
        self.read().get(kind).cloned().unwrap_or_default()
    }

    /// Returns the number of handlers registered for `kind`.
    pub fn handler_count(&self, kind: &str) -> usize {
        self.read().get(kind).map_or(0, Vec::len)
    }

    /// Returns true if at least one handler is registered for `kind`.
    pub fn has_handlers(&self, kind: &str) -> bool {
        self.handler_count(kind) > 0
    }

    /// Returns the kinds that currently have handlers, sorted.
    pub fn kinds(&self) -> Vec<String> {
        let mut kinds: Vec<String> = self.read().keys().cloned().collect();
        kinds.sort();
        kinds
    }

    /// Returns true if no handlers are registered at all.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn invoke(
        handler: &HandlerRef<E>,
        event: &Event<E>,
    ) -> std::result::Result<(), HandlerError> {
        let result = handler.handle(event);
        metrics::counter!("dispatcher_handler_invocations", "kind" => event.kind()).increment(1);
        if let Err(ref e) = result {
            metrics::counter!("dispatcher_handler_failures", "kind" => event.kind()).increment(1);
            tracing::warn!(handler = handler.name(), error = %e, "handler failed");
        }
        result
    }

    // No operation leaves the map half-updated, so a poisoned lock is safe to reuse.
    fn read(&self) -> RwLockReadGuard<'_, Registry<E>> {
        self.handlers.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Registry<E>> {
        self.handlers.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<E: DomainEvent> Default for EventDispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: DomainEvent> std::fmt::Debug for EventDispatcher<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<String, usize> = self
            .read()
            .iter()
            .map(|(kind, handlers)| (kind.clone(), handlers.len()))
            .collect();
        f.debug_struct("EventDispatcher")
            .field("handlers", &counts)
            .field("policy", &self.policy)
            .finish()
    }
}
