//! End-to-end behavior of the registry, selection and pagination layers.

use std::cell::RefCell;
use std::rc::Rc;

use spark_headless::{
    EventKind, PageCounter, PageCounterOptions, PageItem, Pagination, PaginationOptions, Registry,
    RegistryOptions, Step, StepOptions, TicketId, TicketProps,
};
use spark_signals::effect;

fn id(s: &str) -> TicketId {
    TicketId::from(s)
}

fn with_events() -> Registry<&'static str> {
    Registry::new(RegistryOptions {
        events: true,
        ..Default::default()
    })
}

#[test]
fn duplicate_id_is_idempotent() {
    let registry: Registry<&str> = Registry::default();

    let first = registry.register(TicketProps::with_id("x").value("one"));
    let second = registry.register(TicketProps::with_id("x").value("two"));

    assert_eq!(registry.size(), 1);
    assert_eq!(first, second);
    assert_eq!(registry.browse_item("two"), None);
}

#[test]
fn cached_views_are_stable_until_mutation() {
    let registry: Registry<&str> = Registry::default();
    registry.onboard(["a", "b"].map(TicketProps::with_id));

    let keys = registry.keys();
    assert!(Rc::ptr_eq(&keys, &registry.keys()));

    registry.register(TicketProps::with_id("c"));
    let after = registry.keys();
    assert!(!Rc::ptr_eq(&keys, &after));
    assert_eq!(after.len(), 3);
}

#[test]
fn batch_defers_events_in_order() {
    let registry = with_events();
    let log = Rc::new(RefCell::new(Vec::<String>::new()));

    for kind in ["register:ticket", "unregister:ticket"] {
        let log = log.clone();
        registry.on(kind, move |event| {
            let ticket = event.ticket().map(|t| t.id.to_string()).unwrap_or_default();
            log.borrow_mut().push(format!("{}:{ticket}", event.kind()));
        });
    }

    registry.batch(|| {
        registry.register(TicketProps::with_id("a"));
        registry.register(TicketProps::with_id("b"));
        registry.unregister(&id("a"));
        log.borrow_mut().push("body done".to_string());
    });

    assert_eq!(
        *log.borrow(),
        vec![
            "body done",
            "register:ticket:a",
            "register:ticket:b",
            "unregister:ticket:a",
        ]
    );
}

#[test]
fn batch_error_propagates_after_flush() {
    let registry = with_events();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let seen_clone = seen.clone();
    registry.on(EventKind::RegisterTicket, move |event| {
        seen_clone.borrow_mut().push(event.kind());
    });

    let result: Result<(), &str> = registry.batch(|| {
        registry.register(TicketProps::with_id("a"));
        Err("validation failed")
    });

    assert_eq!(result, Err("validation failed"));
    assert!(!registry.is_batching());
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn step_circularity() {
    let circular: Step<&str> = Step::new(StepOptions {
        circular: true,
        ..Default::default()
    });
    circular.onboard(["one", "two", "three"].map(TicketProps::with_id));
    circular.last();
    circular.next();
    assert_eq!(circular.selected_id(), Some(id("one")));

    let bounded: Step<&str> = Step::default();
    bounded.onboard(["one", "two", "three"].map(TicketProps::with_id));
    bounded.last();
    bounded.next();
    assert_eq!(bounded.selected_id(), Some(id("three")));
}

#[test]
fn pagination_boundary() {
    let pagination = Pagination::new(PaginationOptions {
        size: Some(25),
        ..Default::default()
    });

    pagination.last();
    assert_eq!(pagination.from(), 21);
    assert_eq!(pagination.to(), 25);
}

#[test]
fn windowed_pagination() {
    let counter = PageCounter::new(PageCounterOptions {
        page: 10,
        size: 200,
        items_per_page: 10,
        visible: 7,
    });
    assert_eq!(counter.pages(), 20);

    let items = counter.items();
    assert!(items.len() <= 7);
    assert_eq!(items.first(), Some(&PageItem::Page(1)));
    assert_eq!(items[1], PageItem::Ellipsis);
    assert_eq!(&items[2..5], &[PageItem::Page(9), PageItem::Page(10), PageItem::Page(11)]);
    assert_eq!(items[5], PageItem::Ellipsis);
    assert_eq!(items.last(), Some(&PageItem::Page(20)));
}

#[test]
fn offboard_reindexes() {
    let registry: Registry<&str> = Registry::default();
    registry.onboard(["item-1", "item-2", "item-3"].map(TicketProps::with_id));

    registry.offboard(["item-1"]);

    assert_eq!(registry.lookup(0), Some(id("item-2")));
    assert_eq!(registry.lookup(1), Some(id("item-3")));
    assert_eq!(registry.lookup(2), None);
}

#[test]
fn reactive_registry_drives_effects() {
    let step: Step<&str> = Step::new(StepOptions {
        registry: RegistryOptions {
            reactive: true,
            ..Default::default()
        },
        ..Default::default()
    });
    step.onboard(["a", "b", "c"].map(TicketProps::with_id));

    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_clone = seen.clone();
    let observed = step.clone();
    let _e = effect(move || {
        let _ = observed.registry().generation();
        seen_clone.borrow_mut().push(observed.selected_index());
    });
    assert_eq!(*seen.borrow(), vec![None]);

    step.first();
    step.step(2);
    assert_eq!(*seen.borrow(), vec![None, Some(0), Some(2)]);
}
