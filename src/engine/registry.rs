//! Ticket Registry - ordered, indexed collection of tickets.
//!
//! Manages the lifecycle of tickets:
//! - ID → ticket map, kept in iteration order (the map's positions are the
//!   index → ID directory)
//! - Value → IDs catalog for reverse lookup, duplicates allowed
//! - Lazy reindexing after removals
//! - Batching with deferred event delivery
//! - Cached `keys`/`values`/`entries` views
//! - Optional `generation` signal so effects re-run on mutation
//!
//! # Reindex policy
//!
//! Removal records the lowest dirty position and returns. Any read that exposes
//! `index` or `value` (`get`, `lookup`, `browse`, `seek`, the cached views)
//! settles the dirty range first. Removal is a memmove in the map plus O(1)
//! bookkeeping; the first dirty read is O(size - dirty position).
//!
//! # Example
//!
//! ```ignore
//! use spark_headless::{Registry, RegistryOptions, TicketProps};
//!
//! let registry: Registry<&str> = Registry::new(RegistryOptions::default());
//! registry.register(TicketProps::with_id("a").value("Apple"));
//! registry.register(TicketProps::with_id("b"));
//!
//! assert_eq!(registry.lookup(1), Some("b".into()));
//! ```

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use spark_signals::{signal, Signal};
use tracing::{debug, trace};

use super::events::{EventBus, EventKind, ListenerId, RegistryEvent};
use crate::error::UsageWarning;
use crate::types::{Direction, Payload, Ticket, TicketId, TicketPatch, TicketProps, TicketValue, ValuePatch};

// =============================================================================
// Options
// =============================================================================

/// Registry configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryOptions {
    /// Enable the `on`/`off`/`emit` event bus.
    pub events: bool,
    /// Back `generation()` with a signal so effects track mutations.
    pub reactive: bool,
}

// =============================================================================
// Change hooks
// =============================================================================

/// Mutation notice delivered to in-crate layers (selection state cleanup).
///
/// Unlike events, hooks always run, synchronously, even inside a batch.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Change<'a> {
    Registered(&'a TicketId),
    Unregistered(&'a TicketId),
    Updated(&'a TicketId),
    Cleared,
}

/// In-crate layer notified of every change.
///
/// The registry holds observers weakly: a layer that is dropped stops
/// receiving changes and its slot is pruned.
pub(crate) trait Observer<V> {
    fn on_change(&self, registry: &Registry<V>, change: Change<'_>);
}

type Hook<V> = Weak<dyn Observer<V>>;

// =============================================================================
// Store
// =============================================================================

struct Store<V> {
    tickets: IndexMap<TicketId, Ticket<V>>,
    catalog: HashMap<TicketValue<V>, Vec<TicketId>>,
    /// Lowest position whose tickets may carry a stale index.
    dirty_from: Option<usize>,
}

fn catalog_add<V: Payload>(
    catalog: &mut HashMap<TicketValue<V>, Vec<TicketId>>,
    value: TicketValue<V>,
    id: TicketId,
) {
    catalog.entry(value).or_default().push(id);
}

fn catalog_remove<V: Payload>(
    catalog: &mut HashMap<TicketValue<V>, Vec<TicketId>>,
    value: &TicketValue<V>,
    id: &TicketId,
) {
    if let Some(ids) = catalog.get_mut(value) {
        ids.retain(|i| i != id);
        if ids.is_empty() {
            catalog.remove(value);
        }
    }
}

impl<V: Payload> Store<V> {
    fn new() -> Self {
        Self {
            tickets: IndexMap::new(),
            catalog: HashMap::new(),
            dirty_from: None,
        }
    }

    fn mark_dirty(&mut self, position: usize) {
        if position < self.tickets.len() {
            self.dirty_from = Some(self.dirty_from.map_or(position, |d| d.min(position)));
        }
    }

    /// Bring `index` (and index-mirroring values) in line with map positions.
    ///
    /// Returns true if any ticket moved.
    fn reindex_from(&mut self, from: usize) -> bool {
        let Self {
            tickets,
            catalog,
            dirty_from,
        } = self;
        *dirty_from = None;

        let mut moved = false;
        for (position, ticket) in tickets.values_mut().enumerate().skip(from) {
            if ticket.index != position {
                ticket.index = position;
                moved = true;
            }
            if let TicketValue::Index(old) = ticket.value {
                if old != position {
                    catalog_remove(catalog, &TicketValue::Index(old), &ticket.id);
                    ticket.value = TicketValue::Index(position);
                    catalog_add(catalog, TicketValue::Index(position), ticket.id.clone());
                    moved = true;
                }
            }
        }
        moved
    }

    /// Remove one ticket. The returned ticket reports the position it occupied.
    fn remove(&mut self, id: &TicketId) -> Option<Ticket<V>> {
        let (position, _, mut ticket) = self.tickets.shift_remove_full(id)?;
        catalog_remove(&mut self.catalog, &ticket.value, &ticket.id);
        ticket.index = position;
        if ticket.value.is_index() {
            ticket.value = TicketValue::Index(position);
        }
        self.mark_dirty(position);
        Some(ticket)
    }

    /// Remove many tickets in a single pass over the map.
    ///
    /// Returned tickets are in argument order and report their positions
    /// before any of them was removed.
    fn remove_many(&mut self, ids: &[TicketId]) -> Vec<Ticket<V>> {
        let mut doomed: HashSet<TicketId> = HashSet::new();
        let mut removed = Vec::new();
        let mut lowest = usize::MAX;

        for id in ids {
            if doomed.contains(id) {
                continue;
            }
            if let Some((position, _, ticket)) = self.tickets.get_full(id) {
                lowest = lowest.min(position);
                removed.push((position, ticket.clone()));
                doomed.insert(id.clone());
            }
        }
        if removed.is_empty() {
            return Vec::new();
        }

        self.tickets.retain(|id, _| !doomed.contains(id));

        let removed = removed
            .into_iter()
            .map(|(position, mut ticket)| {
                catalog_remove(&mut self.catalog, &ticket.value, &ticket.id);
                ticket.index = position;
                if ticket.value.is_index() {
                    ticket.value = TicketValue::Index(position);
                }
                ticket
            })
            .collect();
        self.mark_dirty(lowest);
        removed
    }

    /// Merge a patch into a live ticket. Hands the patch back if absent.
    fn patch(&mut self, id: &TicketId, patch: TicketPatch<V>) -> Result<Ticket<V>, TicketPatch<V>> {
        let Self { tickets, catalog, .. } = self;
        let Some(ticket) = tickets.get_mut(id) else {
            return Err(patch);
        };

        if let Some(disabled) = patch.disabled {
            ticket.disabled = disabled;
        }

        let next = match patch.value {
            ValuePatch::Keep => None,
            ValuePatch::Set(value) => Some(TicketValue::Item(value)),
            ValuePatch::Reset => Some(TicketValue::Index(ticket.index)),
        };
        if let Some(next) = next {
            if next != ticket.value {
                catalog_remove(catalog, &ticket.value, id);
                catalog_add(catalog, next.clone(), id.clone());
                ticket.value = next;
            }
        }

        Ok(ticket.clone())
    }

    fn clear(&mut self) -> usize {
        let count = self.tickets.len();
        self.tickets.clear();
        self.catalog.clear();
        self.dirty_from = None;
        count
    }
}

// =============================================================================
// Cached views
// =============================================================================

struct Views<V> {
    keys: Option<Rc<[TicketId]>>,
    values: Option<Rc<[Ticket<V>]>>,
    entries: Option<Rc<[(TicketId, Ticket<V>)]>>,
}

impl<V> Views<V> {
    fn empty() -> Self {
        Self {
            keys: None,
            values: None,
            entries: None,
        }
    }
}

// =============================================================================
// Registry
// =============================================================================

struct Inner<V> {
    store: RefCell<Store<V>>,
    views: RefCell<Views<V>>,
    bus: Option<EventBus<V>>,
    hooks: RefCell<Vec<Hook<V>>>,

    /// Nesting depth of `batch` calls.
    depth: Cell<usize>,
    /// Events waiting for the outermost batch to finish.
    pending: RefCell<Vec<RegistryEvent<V>>>,
    /// A generation bump is waiting for the outermost batch to finish.
    pending_touch: Cell<bool>,

    revision: Cell<u64>,
    generation: Option<Signal<u64>>,

    /// Counter for generated ids.
    next_id: Cell<u64>,
}

/// Ordered, indexed collection of tickets.
///
/// A cheap-to-clone handle: clones share the same collection, which is how a
/// registry is handed to many consumers (see [`ContextKey`](crate::ContextKey)).
pub struct Registry<V> {
    inner: Rc<Inner<V>>,
}

impl<V> Clone for Registry<V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<V: Payload> Default for Registry<V> {
    fn default() -> Self {
        Self::new(RegistryOptions::default())
    }
}

impl<V: Payload + fmt::Debug> fmt::Debug for Registry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("size", &self.size())
            .field("events", &self.events_enabled())
            .field("reactive", &self.is_reactive())
            .finish()
    }
}

struct BatchGuard<'a, V> {
    inner: &'a Inner<V>,
}

impl<'a, V> BatchGuard<'a, V> {
    fn enter(inner: &'a Inner<V>) -> Self {
        inner.depth.set(inner.depth.get() + 1);
        Self { inner }
    }
}

impl<V> Drop for BatchGuard<'_, V> {
    fn drop(&mut self) {
        self.inner.depth.set(self.inner.depth.get().saturating_sub(1));
    }
}

impl<V: Payload> Registry<V> {
    pub fn new(options: RegistryOptions) -> Self {
        Self {
            inner: Rc::new(Inner {
                store: RefCell::new(Store::new()),
                views: RefCell::new(Views::empty()),
                bus: options.events.then(EventBus::new),
                hooks: RefCell::new(Vec::new()),
                depth: Cell::new(0),
                pending: RefCell::new(Vec::new()),
                pending_touch: Cell::new(false),
                revision: Cell::new(0),
                generation: options.reactive.then(|| signal(0u64)),
                next_id: Cell::new(0),
            }),
        }
    }

    /// True if both handles point at the same collection.
    pub fn same(&self, other: &Registry<V>) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn events_enabled(&self) -> bool {
        self.inner.bus.is_some()
    }

    pub fn is_reactive(&self) -> bool {
        self.inner.generation.is_some()
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register a ticket, appending it at `index = size`.
    ///
    /// A duplicate id returns the live ticket untouched and logs a warning.
    pub fn register(&self, props: TicketProps<V>) -> Ticket<V> {
        self.settle();

        let TicketProps { id, value, disabled } = props;
        let id = id.unwrap_or_else(|| self.generate_id());

        let existing = self.inner.store.borrow().tickets.get(&id).cloned();
        if let Some(existing) = existing {
            UsageWarning::DuplicateId(id).emit();
            return existing;
        }

        let ticket = {
            let mut store = self.inner.store.borrow_mut();
            let index = store.tickets.len();
            let ticket = Ticket {
                id: id.clone(),
                index,
                value: value.map_or(TicketValue::Index(index), TicketValue::Item),
                disabled,
            };
            catalog_add(&mut store.catalog, ticket.value.clone(), id.clone());
            store.tickets.insert(id.clone(), ticket.clone());
            ticket
        };
        trace!(id = %ticket.id, index = ticket.index, "register");

        self.commit(Change::Registered(&id), Some(RegistryEvent::RegisterTicket(ticket.clone())));
        ticket
    }

    /// Register many tickets. One `register:ticket` event per ticket.
    pub fn onboard<I>(&self, items: I) -> Vec<Ticket<V>>
    where
        I: IntoIterator<Item = TicketProps<V>>,
    {
        items.into_iter().map(|props| self.register(props)).collect()
    }

    /// Create the ticket if absent, otherwise merge `patch` into it.
    pub fn upsert(&self, id: impl Into<TicketId>, patch: TicketPatch<V>) -> Ticket<V> {
        let id = id.into();
        self.settle();

        let outcome = self.inner.store.borrow_mut().patch(&id, patch);
        match outcome {
            Ok(ticket) => {
                trace!(id = %ticket.id, "update");
                self.commit(Change::Updated(&id), Some(RegistryEvent::UpdateTicket(ticket.clone())));
                ticket
            }
            Err(patch) => {
                let mut props = TicketProps::with_id(id).disabled(patch.disabled.unwrap_or(false));
                if let ValuePatch::Set(value) = patch.value {
                    props.value = Some(value);
                }
                self.register(props)
            }
        }
    }

    /// Remove a ticket. Unknown ids are a no-op returning `None`.
    pub fn unregister(&self, id: &TicketId) -> Option<Ticket<V>> {
        let removed = self.inner.store.borrow_mut().remove(id)?;
        trace!(id = %removed.id, index = removed.index, "unregister");

        self.commit(
            Change::Unregistered(&removed.id),
            Some(RegistryEvent::UnregisterTicket(removed.clone())),
        );
        Some(removed)
    }

    /// Remove the lowest-index ticket.
    pub fn unregister_first(&self) -> Option<Ticket<V>> {
        let first = self.inner.store.borrow().tickets.first().map(|(id, _)| id.clone())?;
        self.unregister(&first)
    }

    /// Remove many tickets in one pass. One `unregister:ticket` event per
    /// removed ticket; unknown ids are skipped.
    pub fn offboard<I>(&self, ids: I) -> Vec<Ticket<V>>
    where
        I: IntoIterator,
        I::Item: Into<TicketId>,
    {
        let ids: Vec<TicketId> = ids.into_iter().map(Into::into).collect();
        let removed = self.inner.store.borrow_mut().remove_many(&ids);
        if removed.is_empty() {
            return removed;
        }
        trace!(count = removed.len(), "offboard");

        self.invalidate();
        self.batch(|| {
            for ticket in &removed {
                self.send(RegistryEvent::UnregisterTicket(ticket.clone()));
            }
            for ticket in &removed {
                self.run_hooks(Change::Unregistered(&ticket.id));
            }
            self.touch();
        });
        removed
    }

    /// Remove every ticket. Emits a single `clear:registry`.
    pub fn clear(&self) {
        let count = self.inner.store.borrow_mut().clear();
        debug!(count, "clear registry");
        self.commit(Change::Cleared, Some(RegistryEvent::ClearRegistry));
    }

    /// Drop all listeners, then empty the collection without events.
    ///
    /// Selection layers still observe the registry and drop their selected ids.
    pub fn dispose(&self) {
        if let Some(bus) = &self.inner.bus {
            bus.clear();
        }
        self.inner.pending.borrow_mut().clear();
        let count = self.inner.store.borrow_mut().clear();
        self.invalidate();
        self.batch(|| {
            self.run_hooks(Change::Cleared);
            self.touch();
        });
        debug!(count, "dispose registry");
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn get(&self, id: &TicketId) -> Option<Ticket<V>> {
        self.settle();
        self.inner.store.borrow().tickets.get(id).cloned()
    }

    pub fn has(&self, id: &TicketId) -> bool {
        self.inner.store.borrow().tickets.contains_key(id)
    }

    /// Index → id.
    pub fn lookup(&self, index: usize) -> Option<TicketId> {
        self.settle();
        self.inner
            .store
            .borrow()
            .tickets
            .get_index(index)
            .map(|(id, _)| id.clone())
    }

    /// Value → ids, in registration order.
    pub fn browse(&self, value: &TicketValue<V>) -> Option<Vec<TicketId>> {
        self.settle();
        self.inner.store.borrow().catalog.get(value).cloned()
    }

    /// Shorthand for browsing an explicit value.
    pub fn browse_item(&self, value: V) -> Option<Vec<TicketId>> {
        self.browse(&TicketValue::Item(value))
    }

    pub fn size(&self) -> usize {
        self.inner.store.borrow().tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// First ticket scanning forward (`First`) or backward (`Last`).
    ///
    /// `from` is clamped into `[0, size - 1]`.
    pub fn seek(&self, direction: Direction, from: Option<usize>) -> Option<Ticket<V>> {
        self.seek_by(direction, from, |_| true)
    }

    /// Like [`seek`](Self::seek), returning the first ticket matching `predicate`.
    ///
    /// The predicate runs while the collection is borrowed and must not
    /// mutate this registry.
    pub fn seek_by<F>(&self, direction: Direction, from: Option<usize>, predicate: F) -> Option<Ticket<V>>
    where
        F: Fn(&Ticket<V>) -> bool,
    {
        self.settle();
        let store = self.inner.store.borrow();
        let last = store.tickets.len().checked_sub(1)?;

        match direction {
            Direction::First => {
                let start = from.map_or(0, |f| f.min(last));
                store
                    .tickets
                    .values()
                    .skip(start)
                    .find(|t| predicate(t))
                    .cloned()
            }
            Direction::Last => {
                let start = from.map_or(last, |f| f.min(last));
                store
                    .tickets
                    .values()
                    .take(start + 1)
                    .rev()
                    .find(|t| predicate(t))
                    .cloned()
            }
        }
    }

    // =========================================================================
    // Cached views
    // =========================================================================

    /// Ids in order. Same `Rc` until the collection changes.
    pub fn keys(&self) -> Rc<[TicketId]> {
        self.settle();
        if let Some(keys) = self.inner.views.borrow().keys.clone() {
            return keys;
        }
        let keys: Rc<[TicketId]> = self.inner.store.borrow().tickets.keys().cloned().collect();
        self.inner.views.borrow_mut().keys = Some(keys.clone());
        keys
    }

    /// Tickets in order. Same `Rc` until the collection changes.
    pub fn values(&self) -> Rc<[Ticket<V>]> {
        self.settle();
        if let Some(values) = self.inner.views.borrow().values.clone() {
            return values;
        }
        let values: Rc<[Ticket<V>]> = self.inner.store.borrow().tickets.values().cloned().collect();
        self.inner.views.borrow_mut().values = Some(values.clone());
        values
    }

    /// `(id, ticket)` pairs in order. Same `Rc` until the collection changes.
    pub fn entries(&self) -> Rc<[(TicketId, Ticket<V>)]> {
        self.settle();
        if let Some(entries) = self.inner.views.borrow().entries.clone() {
            return entries;
        }
        let entries: Rc<[(TicketId, Ticket<V>)]> = self
            .inner
            .store
            .borrow()
            .tickets
            .iter()
            .map(|(id, t)| (id.clone(), t.clone()))
            .collect();
        self.inner.views.borrow_mut().entries = Some(entries.clone());
        entries
    }

    // =========================================================================
    // Reindex
    // =========================================================================

    /// Recompute every index (and index-mirroring value) from iteration order.
    pub fn reindex(&self) {
        let moved = self.inner.store.borrow_mut().reindex_from(0);
        trace!(moved, "reindex");
        self.invalidate();
        self.send(RegistryEvent::ReindexRegistry);
        if moved {
            self.touch();
        }
    }

    /// Settle a pending lazy reindex, if any.
    fn settle(&self) {
        let dirty_from = self.inner.store.borrow().dirty_from;
        let Some(from) = dirty_from else {
            return;
        };
        self.inner.store.borrow_mut().reindex_from(from);
        trace!(from, "lazy reindex");
        self.invalidate();
        self.send(RegistryEvent::ReindexRegistry);
    }

    // =========================================================================
    // Batching
    // =========================================================================

    /// Run `f` with event delivery and the generation bump deferred until the
    /// outermost batch returns.
    ///
    /// Whatever `f` returns is passed through, so an `Err` propagates after the
    /// flush. If `f` panics, the batch depth is restored and the mutations made
    /// before the panic are flushed like any other, then the panic resumes.
    pub fn batch<R>(&self, f: impl FnOnce() -> R) -> R {
        let outcome = {
            let _guard = BatchGuard::enter(&self.inner);
            panic::catch_unwind(AssertUnwindSafe(f))
        };

        if self.inner.depth.get() == 0 {
            self.flush();
        }
        match outcome {
            Ok(result) => result,
            Err(payload) => panic::resume_unwind(payload),
        }
    }

    /// True while inside `batch`.
    pub fn is_batching(&self) -> bool {
        self.inner.depth.get() > 0
    }

    fn flush(&self) {
        let events = std::mem::take(&mut *self.inner.pending.borrow_mut());
        if self.inner.pending_touch.replace(false) {
            self.bump();
        }
        if events.is_empty() {
            return;
        }
        trace!(count = events.len(), "flush batch");
        if let Some(bus) = &self.inner.bus {
            for event in &events {
                bus.dispatch(event);
            }
        }
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Subscribe to an event. `None` (and a warning) when events are disabled.
    pub fn on<F>(&self, kind: impl Into<EventKind>, listener: F) -> Option<ListenerId>
    where
        F: Fn(&RegistryEvent<V>) + 'static,
    {
        let Some(bus) = &self.inner.bus else {
            UsageWarning::EventsDisabled { op: "on" }.emit();
            return None;
        };
        Some(bus.on(kind.into(), Rc::new(listener)))
    }

    /// Unsubscribe. Returns true if the listener was found.
    pub fn off(&self, kind: impl Into<EventKind>, id: ListenerId) -> bool {
        match &self.inner.bus {
            Some(bus) => bus.off(&kind.into(), id),
            None => false,
        }
    }

    /// Emit a custom event. Deferred like any other event inside a batch.
    pub fn emit(&self, name: impl Into<String>, payload: Option<Rc<dyn Any>>) {
        if self.inner.bus.is_none() {
            return;
        }
        self.send(RegistryEvent::Custom {
            name: name.into(),
            payload,
        });
    }

    pub fn listener_count(&self) -> usize {
        self.inner.bus.as_ref().map_or(0, EventBus::listener_count)
    }

    // =========================================================================
    // Generation
    // =========================================================================

    /// Mutation counter. Reading it inside an effect on a reactive registry
    /// subscribes the effect to every committed mutation.
    pub fn generation(&self) -> u64 {
        match &self.inner.generation {
            Some(generation) => generation.get(),
            None => self.inner.revision.get(),
        }
    }

    /// Record an observable change (deferred inside a batch).
    pub(crate) fn touch(&self) {
        if self.is_batching() {
            self.inner.pending_touch.set(true);
        } else {
            self.bump();
        }
    }

    fn bump(&self) {
        let next = self.inner.revision.get() + 1;
        self.inner.revision.set(next);
        if let Some(generation) = &self.inner.generation {
            generation.set(next);
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    pub(crate) fn observe(&self, observer: Weak<dyn Observer<V>>) {
        let mut hooks = self.inner.hooks.borrow_mut();
        hooks.retain(|hook| hook.strong_count() > 0);
        hooks.push(observer);
    }

    /// Number of observer slots, live or not yet pruned.
    pub(crate) fn observer_count(&self) -> usize {
        self.inner.hooks.borrow().len()
    }

    /// Invalidate views, queue the event, run hooks, then the generation bump.
    ///
    /// Runs as a batch so selection changes made by hooks coalesce with the
    /// mutation into a single generation bump. The event is queued first so
    /// anything a hook triggers (a lazy reindex) is delivered after it.
    fn commit(&self, change: Change<'_>, event: Option<RegistryEvent<V>>) {
        self.invalidate();
        self.batch(|| {
            if let Some(event) = event {
                self.send(event);
            }
            self.run_hooks(change);
            self.touch();
        });
    }

    fn run_hooks(&self, change: Change<'_>) {
        let hooks: Vec<Hook<V>> = self.inner.hooks.borrow().clone();
        let mut dead = false;
        for hook in &hooks {
            match hook.upgrade() {
                Some(observer) => observer.on_change(self, change),
                None => dead = true,
            }
        }
        if dead {
            self.inner.hooks.borrow_mut().retain(|hook| hook.strong_count() > 0);
        }
    }

    fn send(&self, event: RegistryEvent<V>) {
        let Some(bus) = &self.inner.bus else {
            return;
        };
        if self.is_batching() {
            self.inner.pending.borrow_mut().push(event);
        } else {
            bus.dispatch(&event);
        }
    }

    fn invalidate(&self) {
        *self.inner.views.borrow_mut() = Views::empty();
    }

    fn generate_id(&self) -> TicketId {
        let store = self.inner.store.borrow();
        loop {
            let n = self.inner.next_id.get();
            self.inner.next_id.set(n + 1);
            let id = TicketId::Str(format!("ticket-{n}"));
            if !store.tickets.contains_key(&id) {
                return id;
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
