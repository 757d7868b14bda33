//! Registry event bus.
//!
//! Opt-in per registry. Listeners subscribe to one [`EventKind`] and are
//! identified by the [`ListenerId`] returned from `on`, which `off` takes back.
//!
//! Dispatch clones the listener list before calling out, so listeners may
//! freely call back into the registry (including `on`/`off`).

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::types::Ticket;

// =============================================================================
// TYPES
// =============================================================================

/// Name of an event a listener can subscribe to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `register:ticket`
    RegisterTicket,
    /// `unregister:ticket`
    UnregisterTicket,
    /// `update:ticket`
    UpdateTicket,
    /// `clear:registry`
    ClearRegistry,
    /// `reindex:registry`
    ReindexRegistry,
    /// Anything passed to [`Registry::emit`](crate::Registry::emit).
    Custom(String),
}

impl EventKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::RegisterTicket => "register:ticket",
            Self::UnregisterTicket => "unregister:ticket",
            Self::UpdateTicket => "update:ticket",
            Self::ClearRegistry => "clear:registry",
            Self::ReindexRegistry => "reindex:registry",
            Self::Custom(name) => name,
        }
    }
}

impl From<&str> for EventKind {
    fn from(name: &str) -> Self {
        match name {
            "register:ticket" => Self::RegisterTicket,
            "unregister:ticket" => Self::UnregisterTicket,
            "update:ticket" => Self::UpdateTicket,
            "clear:registry" => Self::ClearRegistry,
            "reindex:registry" => Self::ReindexRegistry,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event delivered to listeners.
///
/// Ticket-carrying events hold a snapshot of the ticket at the time of the
/// mutation (for unregister, the position it occupied when removed).
#[derive(Clone)]
pub enum RegistryEvent<V> {
    RegisterTicket(Ticket<V>),
    UnregisterTicket(Ticket<V>),
    UpdateTicket(Ticket<V>),
    ClearRegistry,
    ReindexRegistry,
    Custom {
        name: String,
        payload: Option<Rc<dyn Any>>,
    },
}

impl<V> RegistryEvent<V> {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::RegisterTicket(_) => EventKind::RegisterTicket,
            Self::UnregisterTicket(_) => EventKind::UnregisterTicket,
            Self::UpdateTicket(_) => EventKind::UpdateTicket,
            Self::ClearRegistry => EventKind::ClearRegistry,
            Self::ReindexRegistry => EventKind::ReindexRegistry,
            Self::Custom { name, .. } => EventKind::Custom(name.clone()),
        }
    }

    /// The ticket snapshot, for ticket events.
    pub fn ticket(&self) -> Option<&Ticket<V>> {
        match self {
            Self::RegisterTicket(t) | Self::UnregisterTicket(t) | Self::UpdateTicket(t) => Some(t),
            _ => None,
        }
    }

    /// Downcast a custom payload.
    pub fn payload<T: 'static>(&self) -> Option<&T> {
        match self {
            Self::Custom { payload: Some(p), .. } => p.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for RegistryEvent<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RegisterTicket(t) => f.debug_tuple("RegisterTicket").field(t).finish(),
            Self::UnregisterTicket(t) => f.debug_tuple("UnregisterTicket").field(t).finish(),
            Self::UpdateTicket(t) => f.debug_tuple("UpdateTicket").field(t).finish(),
            Self::ClearRegistry => f.write_str("ClearRegistry"),
            Self::ReindexRegistry => f.write_str("ReindexRegistry"),
            Self::Custom { name, payload } => f
                .debug_struct("Custom")
                .field("name", name)
                .field("has_payload", &payload.is_some())
                .finish(),
        }
    }
}

/// Handle returned by `on`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

/// Event listener.
pub type Listener<V> = Rc<dyn Fn(&RegistryEvent<V>)>;

// =============================================================================
// BUS
// =============================================================================

pub(crate) struct EventBus<V> {
    listeners: RefCell<HashMap<EventKind, Vec<(ListenerId, Listener<V>)>>>,
    next_id: Cell<usize>,
}

impl<V> EventBus<V> {
    pub(crate) fn new() -> Self {
        Self {
            listeners: RefCell::new(HashMap::new()),
            next_id: Cell::new(0),
        }
    }

    pub(crate) fn on(&self, kind: EventKind, listener: Listener<V>) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners
            .borrow_mut()
            .entry(kind)
            .or_default()
            .push((id, listener));
        id
    }

    pub(crate) fn off(&self, kind: &EventKind, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let Some(list) = listeners.get_mut(kind) else {
            return false;
        };
        let before = list.len();
        list.retain(|(listener_id, _)| *listener_id != id);
        let removed = list.len() != before;
        if list.is_empty() {
            listeners.remove(kind);
        }
        removed
    }

    pub(crate) fn dispatch(&self, event: &RegistryEvent<V>) {
        let targets: Vec<Listener<V>> = {
            let listeners = self.listeners.borrow();
            match listeners.get(&event.kind()) {
                Some(list) => list.iter().map(|(_, l)| l.clone()).collect(),
                None => return,
            }
        };
        for listener in targets {
            listener(event);
        }
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.borrow().values().map(Vec::len).sum()
    }

    pub(crate) fn clear(&self) {
        self.listeners.borrow_mut().clear();
    }
}
