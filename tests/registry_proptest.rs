//! Randomized operation sequences against the registry and selection layers.

use std::collections::HashSet;

use proptest::prelude::*;
use spark_headless::{
    Group, Mandatory, Registry, SelectionOptions, TicketId, TicketPatch, TicketProps, TicketValue,
};

#[derive(Debug, Clone)]
enum Op {
    Register { key: u8, value: Option<u8> },
    Unregister { key: u8 },
    UnregisterFirst,
    Offboard { keys: Vec<u8> },
    Upsert { key: u8, value: Option<u8>, reset: bool },
    Reindex,
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (0u8..16, prop::option::of(0u8..4)).prop_map(|(key, value)| Op::Register { key, value }),
        3 => (0u8..16).prop_map(|key| Op::Unregister { key }),
        1 => Just(Op::UnregisterFirst),
        2 => prop::collection::vec(0u8..16, 0..4).prop_map(|keys| Op::Offboard { keys }),
        2 => (0u8..16, prop::option::of(0u8..4), any::<bool>())
            .prop_map(|(key, value, reset)| Op::Upsert { key, value, reset }),
        1 => Just(Op::Reindex),
        1 => Just(Op::Clear),
    ]
}

fn key(k: u8) -> TicketId {
    TicketId::from(format!("k{k}"))
}

fn apply(registry: &Registry<u8>, op: &Op) {
    match op {
        Op::Register { key: k, value } => {
            let mut props = TicketProps::with_id(key(*k));
            props.value = *value;
            registry.register(props);
        }
        Op::Unregister { key: k } => {
            registry.unregister(&key(*k));
        }
        Op::UnregisterFirst => {
            registry.unregister_first();
        }
        Op::Offboard { keys } => {
            registry.offboard(keys.iter().map(|k| key(*k)));
        }
        Op::Upsert { key: k, value, reset } => {
            let patch = match (value, reset) {
                (_, true) => TicketPatch::new().reset_value(),
                (Some(v), false) => TicketPatch::new().value(*v),
                (None, false) => TicketPatch::new(),
            };
            registry.upsert(key(*k), patch);
        }
        Op::Reindex => registry.reindex(),
        Op::Clear => registry.clear(),
    }
}

fn assert_consistent(registry: &Registry<u8>) -> Result<(), TestCaseError> {
    let tickets = registry.values();
    prop_assert_eq!(tickets.len(), registry.size());

    let indices: Vec<usize> = tickets.iter().map(|t| t.index).collect();
    prop_assert_eq!(indices, (0..registry.size()).collect::<Vec<_>>());

    for ticket in tickets.iter() {
        prop_assert_eq!(registry.lookup(ticket.index), Some(ticket.id.clone()));
        let ids = registry.browse(&ticket.value).unwrap_or_default();
        prop_assert!(ids.contains(&ticket.id), "{} missing from catalog", ticket.id);
        if let TicketValue::Index(i) = ticket.value {
            prop_assert_eq!(i, ticket.index);
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn index_density_and_catalog(ops in prop::collection::vec(op(), 1..60)) {
        let registry: Registry<u8> = Registry::default();
        for op in &ops {
            apply(&registry, op);
        }
        assert_consistent(&registry)?;
    }

    #[test]
    fn consistent_after_every_step(ops in prop::collection::vec(op(), 1..40)) {
        let registry: Registry<u8> = Registry::default();
        for op in &ops {
            apply(&registry, op);
            assert_consistent(&registry)?;
        }
    }

    #[test]
    fn batched_ops_match_unbatched(ops in prop::collection::vec(op(), 1..40)) {
        let plain: Registry<u8> = Registry::default();
        let batched: Registry<u8> = Registry::default();

        for op in &ops {
            apply(&plain, op);
        }
        batched.batch(|| {
            for op in &ops {
                apply(&batched, op);
            }
        });

        prop_assert_eq!(plain.values().to_vec(), batched.values().to_vec());
    }

    #[test]
    fn selection_stays_within_registry(
        ops in prop::collection::vec(op(), 1..40),
        picks in prop::collection::vec(0u8..16, 0..8),
        force in any::<bool>(),
    ) {
        let group: Group<u8> = Group::new(SelectionOptions {
            mandatory: if force { Mandatory::Force } else { Mandatory::No },
            ..Default::default()
        });
        let registry = group.registry().clone();

        for (step, op) in ops.iter().enumerate() {
            apply(&registry, op);
            if let Some(k) = picks.get(step) {
                group.toggle(key(*k));
            }

            let live: HashSet<TicketId> = registry.keys().iter().cloned().collect();
            for id in group.selected_ids() {
                prop_assert!(live.contains(&id), "{} selected but not registered", id);
            }
            if force && registry.values().iter().any(|t| t.is_enabled()) {
                prop_assert!(!group.selected_ids().is_empty());
            }
        }
    }
}
