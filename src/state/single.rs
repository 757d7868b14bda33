//! Single - at most one selected ticket.
//!
//! A [`Selection`] pinned to single mode, with read views of the one active
//! selection. Every view returns `None` when nothing is selected.

use crate::engine::Registry;
use crate::types::{Mandatory, Payload, Ticket, TicketId, TicketPatch, TicketProps, TicketValue};

use super::selection::{Selection, SelectionOptions};

/// Single selection over a registry.
pub struct Single<V> {
    selection: Selection<V>,
}

impl<V> Clone for Single<V> {
    fn clone(&self) -> Self {
        Self {
            selection: self.selection.clone(),
        }
    }
}

impl<V: Payload> Default for Single<V> {
    fn default() -> Self {
        Self::new(SelectionOptions::default())
    }
}

impl<V: Payload> Single<V> {
    /// `options.multiple` is ignored.
    pub fn new(options: SelectionOptions) -> Self {
        Self::with_registry(Registry::new(options.registry), options)
    }

    pub fn with_registry(registry: Registry<V>, options: SelectionOptions) -> Self {
        let options = SelectionOptions {
            multiple: false,
            ..options
        };
        Self {
            selection: Selection::with_registry(registry, options),
        }
    }

    pub fn selection(&self) -> &Selection<V> {
        &self.selection
    }

    pub fn registry(&self) -> &Registry<V> {
        self.selection.registry()
    }

    pub fn mandatory(&self) -> Mandatory {
        self.selection.mandatory()
    }

    // =========================================================================
    // Views
    // =========================================================================

    pub fn selected_id(&self) -> Option<TicketId> {
        self.selection.first_selected()
    }

    /// Index of the selected ticket, `None` when nothing is selected.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected_item().map(|t| t.index)
    }

    pub fn selected_value(&self) -> Option<TicketValue<V>> {
        self.selected_item().map(|t| t.value)
    }

    pub fn selected_item(&self) -> Option<Ticket<V>> {
        self.selected_id().and_then(|id| self.registry().get(&id))
    }

    pub fn is_selected(&self, id: &TicketId) -> bool {
        self.selection.is_selected(id)
    }

    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    // =========================================================================
    // Selecting
    // =========================================================================

    /// Make `id` the selected ticket.
    pub fn select(&self, id: impl Into<TicketId>) -> bool {
        self.selection.select(id)
    }

    pub fn unselect(&self, id: impl Into<TicketId>) -> bool {
        self.selection.unselect(id)
    }

    pub fn toggle(&self, id: impl Into<TicketId>) -> bool {
        self.selection.toggle(id)
    }

    pub fn mandate(&self) -> bool {
        self.selection.mandate()
    }

    pub fn reset(&self) {
        self.selection.reset();
    }

    // =========================================================================
    // Registry passthrough
    // =========================================================================

    pub fn register(&self, props: TicketProps<V>) -> Ticket<V> {
        self.selection.register(props)
    }

    pub fn onboard<I>(&self, items: I) -> Vec<Ticket<V>>
    where
        I: IntoIterator<Item = TicketProps<V>>,
    {
        self.selection.onboard(items)
    }

    pub fn upsert(&self, id: impl Into<TicketId>, patch: TicketPatch<V>) -> Ticket<V> {
        self.selection.upsert(id, patch)
    }

    pub fn unregister(&self, id: &TicketId) -> Option<Ticket<V>> {
        self.selection.unregister(id)
    }

    pub fn offboard<I>(&self, ids: I) -> Vec<Ticket<V>>
    where
        I: IntoIterator,
        I::Item: Into<TicketId>,
    {
        self.selection.offboard(ids)
    }

    pub fn clear(&self) {
        self.selection.clear();
    }

    pub fn size(&self) -> usize {
        self.selection.size()
    }
}
