use thiserror::Error;

use crate::handler::HandlerError;

/// Errors that can occur when delivering an event.
///
/// Registry mutations never fail; only handler failures surface here.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A handler failed and delivery stopped at it.
    #[error("Handler {handler} failed on {kind}: {source}")]
    Handler {
        kind: &'static str,
        handler: &'static str,
        source: HandlerError,
    },

    /// One or more handlers failed; every handler was still invoked.
    #[error("{} handler(s) failed on {kind}", .failures.len())]
    Isolated {
        kind: &'static str,
        failures: Vec<HandlerFailure>,
    },
}

impl DispatchError {
    /// Returns the kind of the event whose delivery failed.
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchError::Handler { kind, .. } | DispatchError::Isolated { kind, .. } => *kind,
        }
    }

    /// Returns the names of the handlers that failed, in invocation order.
    pub fn failed_handlers(&self) -> Vec<&'static str> {
        match self {
            DispatchError::Handler { handler, .. } => vec![*handler],
            DispatchError::Isolated { failures, .. } => {
                failures.iter().map(|f| f.handler).collect()
            }
        }
    }
}

/// A single handler failure recorded while delivering in isolation.
#[derive(Debug)]
pub struct HandlerFailure {
    /// Name of the failing handler.
    pub handler: &'static str,

    /// The error it returned.
    pub source: HandlerError,
}

/// Error returned when parsing an unknown delivery policy name.
#[derive(Debug, Clone, Error)]
#[error("Unknown delivery policy: {0} (expected \"fail-fast\" or \"isolate\")")]
pub struct InvalidDeliveryPolicy(pub String);

/// Result type for dispatch operations.
pub type Result<T> = std::result::Result<T, DispatchError>;
