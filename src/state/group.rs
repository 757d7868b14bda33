//! Group - multi-selection with bulk helpers and tri-state.
//!
//! Bulk operations and the tri-state only consider enabled tickets. Disabled
//! tickets that were selected explicitly stay selected through
//! `unselect_all`.

use tracing::debug;

use crate::engine::Registry;
use crate::types::{Mandatory, Payload, Ticket, TicketId, TicketPatch, TicketProps, TicketValue};

use super::selection::{Selection, SelectionOptions};

/// Aggregate selection state over the enabled tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriState {
    None,
    Mixed,
    All,
}

/// Always-multiple selection over a registry.
pub struct Group<V> {
    selection: Selection<V>,
}

impl<V> Clone for Group<V> {
    fn clone(&self) -> Self {
        Self {
            selection: self.selection.clone(),
        }
    }
}

impl<V: Payload> Default for Group<V> {
    fn default() -> Self {
        Self::new(SelectionOptions::default())
    }
}

impl<V: Payload> Group<V> {
    /// `options.multiple` is ignored.
    pub fn new(options: SelectionOptions) -> Self {
        Self::with_registry(Registry::new(options.registry), options)
    }

    pub fn with_registry(registry: Registry<V>, options: SelectionOptions) -> Self {
        let options = SelectionOptions {
            multiple: true,
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

    fn enabled_ids(&self) -> Vec<TicketId> {
        self.registry()
            .values()
            .iter()
            .filter(|t| t.is_enabled())
            .map(|t| t.id.clone())
            .collect()
    }

    // =========================================================================
    // Bulk
    // =========================================================================

    /// Select every enabled ticket.
    pub fn select_all(&self) -> usize {
        self.selection.select_many(self.enabled_ids())
    }

    /// Unselect every enabled ticket.
    ///
    /// Under a mandatory policy the earliest selected enabled ticket is kept
    /// when clearing would otherwise empty the selection.
    pub fn unselect_all(&self) -> usize {
        let targets: Vec<TicketId> = self
            .enabled_ids()
            .into_iter()
            .filter(|id| self.selection.is_selected(id))
            .collect();

        let mut targets = targets.as_slice();
        if self.selection.mandatory().is_required() && targets.len() == self.selection.selected_count() {
            if let Some((kept, rest)) = targets.split_first() {
                debug!(id = %kept, "unselect_all keeps one: selection is mandatory");
                targets = rest;
            }
        }

        self.selection.unselect_many(targets.iter().cloned())
    }

    /// Unselect all when everything enabled is selected, otherwise select all.
    pub fn toggle_all(&self) -> usize {
        if self.is_all_selected() {
            self.unselect_all()
        } else {
            self.select_all()
        }
    }

    // =========================================================================
    // Tri-state
    // =========================================================================

    pub fn state(&self) -> TriState {
        let enabled = self.enabled_ids();
        let selected = enabled
            .iter()
            .filter(|id| self.selection.is_selected(id))
            .count();

        if selected == 0 {
            TriState::None
        } else if selected == enabled.len() {
            TriState::All
        } else {
            TriState::Mixed
        }
    }

    pub fn is_none_selected(&self) -> bool {
        self.state() == TriState::None
    }

    pub fn is_all_selected(&self) -> bool {
        self.state() == TriState::All
    }

    pub fn is_mixed(&self) -> bool {
        self.state() == TriState::Mixed
    }

    // =========================================================================
    // Selecting
    // =========================================================================

    pub fn select(&self, id: impl Into<TicketId>) -> bool {
        self.selection.select(id)
    }

    pub fn unselect(&self, id: impl Into<TicketId>) -> bool {
        self.selection.unselect(id)
    }

    pub fn toggle(&self, id: impl Into<TicketId>) -> bool {
        self.selection.toggle(id)
    }

    pub fn select_many<I>(&self, ids: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<TicketId>,
    {
        self.selection.select_many(ids)
    }

    pub fn unselect_many<I>(&self, ids: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<TicketId>,
    {
        self.selection.unselect_many(ids)
    }

    pub fn is_selected(&self, id: &TicketId) -> bool {
        self.selection.is_selected(id)
    }

    pub fn selected_ids(&self) -> Vec<TicketId> {
        self.selection.selected_ids()
    }

    pub fn selected_items(&self) -> Vec<Ticket<V>> {
        self.selection.selected_items()
    }

    pub fn selected_values(&self) -> Vec<TicketValue<V>> {
        self.selection.selected_values()
    }

    pub fn mandatory(&self) -> Mandatory {
        self.selection.mandatory()
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
