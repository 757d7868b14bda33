//! Error and warning types.
//!
//! Registry and selection operations never fail for ordinary "not found"
//! cases; they return `None`/`false` instead. What remains here is the
//! context lookup error and the structured payload of usage warnings.

use thiserror::Error;

use crate::types::TicketId;

/// Errors returned by [`ContextKey::inject`](crate::ContextKey::inject).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// Nothing was provided under this namespace.
    #[error("no context provided for namespace '{namespace}'")]
    Missing { namespace: String },

    /// A value was provided under this namespace, but of another type.
    #[error("context '{namespace}' holds a different type than {expected}")]
    TypeMismatch {
        namespace: String,
        expected: &'static str,
    },
}

/// Non-fatal misuse, logged through `tracing` and otherwise ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageWarning {
    /// `register` was called with an id that is already live.
    #[error("ticket '{0}' is already registered; returning the existing ticket")]
    DuplicateId(TicketId),

    /// The event API was used on a registry created without events.
    #[error("'{op}' called on a registry without events enabled")]
    EventsDisabled { op: &'static str },
}

impl UsageWarning {
    /// Log this warning.
    pub(crate) fn emit(self) {
        tracing::warn!(warning = %self, "usage warning");
    }
}
