//! Step - directional navigation over a single selection.
//!
//! The pointer is the [`Single`] selection. Navigation follows registry order
//! and always skips disabled tickets. A currently selected disabled ticket
//! (selected explicitly) is still a valid starting point.

use crate::engine::{Registry, RegistryOptions};
use crate::types::{Direction, Mandatory, Payload, Ticket, TicketId, TicketPatch, TicketProps, TicketValue};

use super::selection::SelectionOptions;
use super::single::Single;

/// Step configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOptions {
    /// Wrap around at either end instead of stopping.
    pub circular: bool,
    pub mandatory: Mandatory,
    /// Options for the registry created by `new`.
    pub registry: RegistryOptions,
}

/// Navigable single selection.
pub struct Step<V> {
    single: Single<V>,
    circular: bool,
}

impl<V> Clone for Step<V> {
    fn clone(&self) -> Self {
        Self {
            single: self.single.clone(),
            circular: self.circular,
        }
    }
}

impl<V: Payload> Default for Step<V> {
    fn default() -> Self {
        Self::new(StepOptions::default())
    }
}

impl<V: Payload> Step<V> {
    pub fn new(options: StepOptions) -> Self {
        Self::with_registry(Registry::new(options.registry), options)
    }

    pub fn with_registry(registry: Registry<V>, options: StepOptions) -> Self {
        let selection = SelectionOptions {
            mandatory: options.mandatory,
            registry: options.registry,
            ..Default::default()
        };
        Self {
            single: Single::with_registry(registry, selection),
            circular: options.circular,
        }
    }

    pub fn single(&self) -> &Single<V> {
        &self.single
    }

    pub fn registry(&self) -> &Registry<V> {
        self.single.registry()
    }

    pub fn is_circular(&self) -> bool {
        self.circular
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Select the first enabled ticket.
    pub fn first(&self) -> bool {
        self.land(self.registry().seek_by(Direction::First, None, Ticket::is_enabled))
    }

    /// Select the last enabled ticket.
    pub fn last(&self) -> bool {
        self.land(self.registry().seek_by(Direction::Last, None, Ticket::is_enabled))
    }

    /// Move to the next enabled ticket. Same as [`first`](Self::first) when
    /// nothing is selected.
    pub fn next(&self) -> bool {
        match self.single.selected_index() {
            Some(index) => self.land(self.forward(index)),
            None => self.first(),
        }
    }

    /// Move to the previous enabled ticket. Same as [`last`](Self::last) when
    /// nothing is selected.
    pub fn prev(&self) -> bool {
        match self.single.selected_index() {
            Some(index) => self.land(self.backward(index)),
            None => self.last(),
        }
    }

    /// Apply `next` (positive) or `prev` (negative) `|n|` times.
    ///
    /// Returns true if the selected ticket differs afterwards.
    pub fn step(&self, n: isize) -> bool {
        let before = self.single.selected_id();
        self.registry().batch(|| {
            for _ in 0..n.unsigned_abs() {
                let moved = if n > 0 { self.next() } else { self.prev() };
                if !moved {
                    break;
                }
            }
        });
        self.single.selected_id() != before
    }

    fn forward(&self, index: usize) -> Option<Ticket<V>> {
        let registry = self.registry();
        let ahead = if index + 1 < registry.size() {
            registry.seek_by(Direction::First, Some(index + 1), Ticket::is_enabled)
        } else {
            None
        };
        match ahead {
            Some(ticket) => Some(ticket),
            None if self.circular => registry.seek_by(Direction::First, None, Ticket::is_enabled),
            None => None,
        }
    }

    fn backward(&self, index: usize) -> Option<Ticket<V>> {
        let registry = self.registry();
        let behind = match index.checked_sub(1) {
            Some(from) => registry.seek_by(Direction::Last, Some(from), Ticket::is_enabled),
            None => None,
        };
        match behind {
            Some(ticket) => Some(ticket),
            None if self.circular => registry.seek_by(Direction::Last, None, Ticket::is_enabled),
            None => None,
        }
    }

    fn land(&self, target: Option<Ticket<V>>) -> bool {
        target.is_some_and(|ticket| self.single.select(ticket.id))
    }

    // =========================================================================
    // Views
    // =========================================================================

    pub fn selected_id(&self) -> Option<TicketId> {
        self.single.selected_id()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.single.selected_index()
    }

    pub fn selected_value(&self) -> Option<TicketValue<V>> {
        self.single.selected_value()
    }

    pub fn selected_item(&self) -> Option<Ticket<V>> {
        self.single.selected_item()
    }

    pub fn select(&self, id: impl Into<TicketId>) -> bool {
        self.single.select(id)
    }

    pub fn unselect(&self, id: impl Into<TicketId>) -> bool {
        self.single.unselect(id)
    }

    pub fn reset(&self) {
        self.single.reset();
    }

    // =========================================================================
    // Registry passthrough
    // =========================================================================

    pub fn register(&self, props: TicketProps<V>) -> Ticket<V> {
        self.single.register(props)
    }

    pub fn onboard<I>(&self, items: I) -> Vec<Ticket<V>>
    where
        I: IntoIterator<Item = TicketProps<V>>,
    {
        self.single.onboard(items)
    }

    pub fn upsert(&self, id: impl Into<TicketId>, patch: TicketPatch<V>) -> Ticket<V> {
        self.single.upsert(id, patch)
    }

    pub fn unregister(&self, id: &TicketId) -> Option<Ticket<V>> {
        self.single.unregister(id)
    }

    pub fn offboard<I>(&self, ids: I) -> Vec<Ticket<V>>
    where
        I: IntoIterator,
        I::Item: Into<TicketId>,
    {
        self.single.offboard(ids)
    }

    pub fn clear(&self) {
        self.single.clear();
    }

    pub fn size(&self) -> usize {
        self.single.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> TicketId {
        TicketId::from(s)
    }

    fn step(circular: bool) -> Step<&'static str> {
        let step = Step::new(StepOptions {
            circular,
            ..Default::default()
        });
        step.onboard(["a", "b", "c"].map(TicketProps::with_id));
        step
    }

    #[test]
    fn test_first_and_last() {
        let step = step(false);

        assert!(step.last());
        assert_eq!(step.selected_id(), Some(id("c")));
        assert!(step.first());
        assert_eq!(step.selected_id(), Some(id("a")));
        assert!(!step.first());
    }

    #[test]
    fn test_next_stops_at_boundary() {
        let step = step(false);
        step.last();

        assert!(!step.next());
        assert_eq!(step.selected_id(), Some(id("c")));

        step.first();
        assert!(!step.prev());
        assert_eq!(step.selected_id(), Some(id("a")));
    }

    #[test]
    fn test_circular_wraps() {
        let step = step(true);

        step.last();
        assert!(step.next());
        assert_eq!(step.selected_id(), Some(id("a")));

        assert!(step.prev());
        assert_eq!(step.selected_id(), Some(id("c")));
    }

    #[test]
    fn test_empty_selection_starts_at_ends() {
        let step = step(false);
        assert!(step.next());
        assert_eq!(step.selected_id(), Some(id("a")));

        step.reset();
        assert!(step.prev());
        assert_eq!(step.selected_id(), Some(id("c")));
    }

    #[test]
    fn test_skips_disabled() {
        let step: Step<&str> = Step::default();
        step.register(TicketProps::with_id("a").disabled(true));
        step.register(TicketProps::with_id("b"));
        step.register(TicketProps::with_id("c").disabled(true));
        step.register(TicketProps::with_id("d"));
        step.register(TicketProps::with_id("e").disabled(true));

        assert!(step.first());
        assert_eq!(step.selected_id(), Some(id("b")));
        assert!(step.next());
        assert_eq!(step.selected_id(), Some(id("d")));
        assert!(!step.next());
        assert!(!step.last());

        assert!(step.first());
        assert!(step.last());
        assert_eq!(step.selected_id(), Some(id("d")));
    }

    #[test]
    fn test_all_disabled_is_noop() {
        let step: Step<&str> = Step::new(StepOptions {
            circular: true,
            ..Default::default()
        });
        step.register(TicketProps::with_id("a").disabled(true));
        step.register(TicketProps::with_id("b").disabled(true));

        assert!(!step.first());
        assert!(!step.last());
        assert!(!step.next());
        assert!(!step.prev());
        assert_eq!(step.selected_id(), None);
    }

    #[test]
    fn test_step_by_count() {
        let step = step(false);
        step.first();

        assert!(step.step(2));
        assert_eq!(step.selected_id(), Some(id("c")));
        assert!(step.step(-1));
        assert_eq!(step.selected_id(), Some(id("b")));
        assert!(!step.step(0));
    }

    #[test]
    fn test_step_circular_overshoot() {
        let step = step(true);
        step.first();

        assert!(step.step(4));
        assert_eq!(step.selected_id(), Some(id("b")));
        assert!(!step.step(3));
    }

    #[test]
    fn test_step_bumps_generation_once() {
        let step = step(false);
        step.first();
        let before = step.registry().generation();

        step.step(2);
        assert_eq!(step.registry().generation(), before + 1);
    }

    #[test]
    fn test_navigation_from_explicit_disabled() {
        let step = step(false);
        step.upsert("b", TicketPatch::new().disabled(true));
        step.select("b");

        assert!(step.next());
        assert_eq!(step.selected_id(), Some(id("c")));
    }

    #[test]
    fn test_circular_single_enabled_stays() {
        let step: Step<&str> = Step::new(StepOptions {
            circular: true,
            ..Default::default()
        });
        step.register(TicketProps::with_id("only"));
        step.first();

        assert!(!step.next());
        assert!(!step.prev());
        assert_eq!(step.selected_index(), Some(0));
    }
}
