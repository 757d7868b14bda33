//! Selection - set of selected ticket ids layered on a registry.
//!
//! Manages selection state:
//! - Single or multiple selection policy
//! - Mandatory policy (`No`, `Yes`, `Force`)
//! - Enrollment (auto-select on register)
//! - Cascade cleanup: unregistered or cleared tickets leave the selection
//!
//! The selected set always stays a subset of the registry's live ids. That is
//! enforced through the registry's change hooks, so it holds even when the
//! registry is mutated through another handle.
//!
//! # Example
//!
//! ```ignore
//! use spark_headless::{Selection, SelectionOptions, TicketProps};
//!
//! let selection: Selection<&str> = Selection::new(SelectionOptions {
//!     multiple: true,
//!     ..Default::default()
//! });
//! selection.onboard(["a", "b", "c"].map(TicketProps::with_id));
//!
//! selection.select("a");
//! selection.toggle("b");
//! assert_eq!(selection.selected_count(), 2);
//! ```

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use indexmap::IndexSet;
use tracing::debug;

use crate::engine::{Change, Observer, Registry, RegistryOptions};
use crate::types::{Direction, Mandatory, Payload, Ticket, TicketId, TicketPatch, TicketProps, TicketValue};

// =============================================================================
// Options
// =============================================================================

/// Selection configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionOptions {
    /// Accumulate selections instead of replacing.
    pub multiple: bool,
    pub mandatory: Mandatory,
    /// Select tickets as they are registered (single mode: only while empty).
    pub enroll: bool,
    /// Ignore select/unselect/toggle entirely.
    pub disabled: bool,
    /// Options for the registry created by `new`.
    pub registry: RegistryOptions,
}

// =============================================================================
// State
// =============================================================================

struct SelectionState {
    selected: RefCell<IndexSet<TicketId>>,
    multiple: bool,
    mandatory: Mandatory,
    enroll: bool,
    disabled: Cell<bool>,
}

impl SelectionState {
    fn new(options: &SelectionOptions) -> Self {
        Self {
            selected: RefCell::new(IndexSet::new()),
            multiple: options.multiple,
            mandatory: options.mandatory,
            enroll: options.enroll,
            disabled: Cell::new(options.disabled),
        }
    }

    fn select<V: Payload>(&self, registry: &Registry<V>, id: &TicketId) -> bool {
        if self.disabled.get() || !registry.has(id) {
            return false;
        }
        {
            let mut selected = self.selected.borrow_mut();
            if selected.contains(id) && (self.multiple || selected.len() == 1) {
                return false;
            }
            if !self.multiple {
                selected.clear();
            }
            selected.insert(id.clone());
        }
        registry.touch();
        true
    }

    fn unselect<V: Payload>(&self, registry: &Registry<V>, id: &TicketId) -> bool {
        if self.disabled.get() {
            return false;
        }
        {
            let mut selected = self.selected.borrow_mut();
            if !selected.contains(id) {
                return false;
            }
            if self.mandatory.is_required() && selected.len() == 1 {
                debug!(id = %id, "unselect refused: selection is mandatory");
                return false;
            }
            selected.shift_remove(id);
        }
        registry.touch();
        true
    }

    fn toggle<V: Payload>(&self, registry: &Registry<V>, id: &TicketId) -> bool {
        if self.selected.borrow().contains(id) {
            self.unselect(registry, id)
        } else {
            self.select(registry, id)
        }
    }

    /// Select the first enabled ticket if nothing is selected.
    fn mandate<V: Payload>(&self, registry: &Registry<V>) -> bool {
        if !self.selected.borrow().is_empty() {
            return false;
        }
        let Some(candidate) = registry.seek_by(Direction::First, None, Ticket::is_enabled) else {
            return false;
        };
        self.selected.borrow_mut().insert(candidate.id);
        registry.touch();
        true
    }

    fn enforce<V: Payload>(&self, registry: &Registry<V>) {
        if self.mandatory == Mandatory::Force {
            self.mandate(registry);
        }
    }
}

impl<V: Payload> Observer<V> for SelectionState {
    fn on_change(&self, registry: &Registry<V>, change: Change<'_>) {
        match change {
            Change::Registered(id) => {
                if self.enroll && !self.disabled.get() {
                    let enabled = registry.get(id).is_some_and(|t| t.is_enabled());
                    let vacant = self.selected.borrow().is_empty();
                    if enabled && (self.multiple || vacant) {
                        self.select(registry, id);
                    }
                }
                self.enforce(registry);
            }
            Change::Unregistered(id) => {
                if self.selected.borrow_mut().shift_remove(id) {
                    registry.touch();
                }
                self.enforce(registry);
            }
            Change::Updated(_) => self.enforce(registry),
            Change::Cleared => {
                self.selected.borrow_mut().clear();
            }
        }
    }
}

// =============================================================================
// Selection
// =============================================================================

/// Selection over a registry, single or multiple.
pub struct Selection<V> {
    registry: Registry<V>,
    state: Rc<SelectionState>,
}

impl<V> Clone for Selection<V> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            state: self.state.clone(),
        }
    }
}

impl<V: Payload> Default for Selection<V> {
    fn default() -> Self {
        Self::new(SelectionOptions::default())
    }
}

impl<V: Payload> Selection<V> {
    /// Create a selection over a fresh registry.
    pub fn new(options: SelectionOptions) -> Self {
        Self::with_registry(Registry::new(options.registry), options)
    }

    /// Layer a selection over an existing registry.
    ///
    /// Several selections may share one registry; each keeps its own set.
    pub fn with_registry(registry: Registry<V>, options: SelectionOptions) -> Self {
        let state = Rc::new(SelectionState::new(&options));

        let observer: Weak<dyn Observer<V>> = Rc::<SelectionState>::downgrade(&state);
        registry.observe(observer);

        let selection = Self { registry, state };
        selection.state.enforce(&selection.registry);
        selection
    }

    pub fn registry(&self) -> &Registry<V> {
        &self.registry
    }

    pub fn is_multiple(&self) -> bool {
        self.state.multiple
    }

    pub fn mandatory(&self) -> Mandatory {
        self.state.mandatory
    }

    pub fn is_disabled(&self) -> bool {
        self.state.disabled.get()
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.state.disabled.set(disabled);
    }

    // =========================================================================
    // Selecting
    // =========================================================================

    /// Select a ticket. Single mode replaces the current selection.
    ///
    /// Returns true if the selection changed. Disabled tickets can still be
    /// selected explicitly.
    pub fn select(&self, id: impl Into<TicketId>) -> bool {
        self.state.select(&self.registry, &id.into())
    }

    /// Unselect a ticket, unless the mandatory policy forbids emptying.
    pub fn unselect(&self, id: impl Into<TicketId>) -> bool {
        self.state.unselect(&self.registry, &id.into())
    }

    pub fn toggle(&self, id: impl Into<TicketId>) -> bool {
        self.state.toggle(&self.registry, &id.into())
    }

    /// Select several ids in one batch. Returns how many changed.
    pub fn select_many<I>(&self, ids: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<TicketId>,
    {
        self.registry.batch(|| {
            ids.into_iter()
                .map(Into::into)
                .filter(|id| self.state.select(&self.registry, id))
                .count()
        })
    }

    pub fn unselect_many<I>(&self, ids: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<TicketId>,
    {
        self.registry.batch(|| {
            ids.into_iter()
                .map(Into::into)
                .filter(|id| self.state.unselect(&self.registry, id))
                .count()
        })
    }

    pub fn toggle_many<I>(&self, ids: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<TicketId>,
    {
        self.registry.batch(|| {
            ids.into_iter()
                .map(Into::into)
                .filter(|id| self.state.toggle(&self.registry, id))
                .count()
        })
    }

    /// Select the first enabled ticket if nothing is selected.
    pub fn mandate(&self) -> bool {
        self.state.mandate(&self.registry)
    }

    /// Empty the selection, then re-apply a `Force` policy.
    pub fn reset(&self) {
        let had = !self.state.selected.borrow().is_empty();
        self.state.selected.borrow_mut().clear();
        if had {
            self.registry.touch();
        }
        self.state.enforce(&self.registry);
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn is_selected(&self, id: &TicketId) -> bool {
        self.state.selected.borrow().contains(id)
    }

    pub fn selected_count(&self) -> usize {
        self.state.selected.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected_count() == 0
    }

    /// Selected ids in selection order.
    pub fn selected_ids(&self) -> Vec<TicketId> {
        self.state.selected.borrow().iter().cloned().collect()
    }

    pub fn selected_items(&self) -> Vec<Ticket<V>> {
        self.selected_ids()
            .iter()
            .filter_map(|id| self.registry.get(id))
            .collect()
    }

    pub fn selected_values(&self) -> Vec<TicketValue<V>> {
        self.selected_items().into_iter().map(|t| t.value).collect()
    }

    pub(crate) fn first_selected(&self) -> Option<TicketId> {
        self.state.selected.borrow().first().cloned()
    }

    // =========================================================================
    // Registry passthrough
    // =========================================================================

    pub fn register(&self, props: TicketProps<V>) -> Ticket<V> {
        self.registry.register(props)
    }

    pub fn onboard<I>(&self, items: I) -> Vec<Ticket<V>>
    where
        I: IntoIterator<Item = TicketProps<V>>,
    {
        self.registry.onboard(items)
    }

    pub fn upsert(&self, id: impl Into<TicketId>, patch: TicketPatch<V>) -> Ticket<V> {
        self.registry.upsert(id, patch)
    }

    pub fn unregister(&self, id: &TicketId) -> Option<Ticket<V>> {
        self.registry.unregister(id)
    }

    pub fn offboard<I>(&self, ids: I) -> Vec<Ticket<V>>
    where
        I: IntoIterator,
        I::Item: Into<TicketId>,
    {
        self.registry.offboard(ids)
    }

    pub fn clear(&self) {
        self.registry.clear();
    }

    pub fn get(&self, id: &TicketId) -> Option<Ticket<V>> {
        self.registry.get(id)
    }

    pub fn size(&self) -> usize {
        self.registry.size()
    }
}
