//! Property-based tests for table construction and lookup.

mod common;

use std::collections::BTreeSet;

use common::{entry, fn_a, fn_b, fn_c};
use icall_core::{
    CallEntry, LookupStrategy, Registry, RegistryConfig, RegistryError, register_table,
};
use proptest::prelude::*;
use strum::IntoEnumIterator;

fn table_from(ids: &BTreeSet<u32>) -> Vec<CallEntry> {
    ids.iter()
        .map(|&id| {
            let f = match id % 3 {
                0 => fn_a,
                1 => fn_b,
                _ => fn_c,
            };
            entry(id, f, ((id % 2) * 4) as u8)
        })
        .collect()
}

/// Strictly increasing id sets, including empty and single-entry ones.
fn sorted_ids() -> impl Strategy<Value = BTreeSet<u32>> {
    prop::collection::btree_set(any::<u32>(), 0..64)
}

/// Ids drawn from a narrow range so every strategy, direct included, can be built.
fn dense_ids() -> impl Strategy<Value = BTreeSet<u32>> {
    prop::collection::btree_set(0u32..2_000, 0..128)
}

proptest! {
    #[test]
    fn test_every_registered_id_resolves_to_its_entry(ids in sorted_ids()) {
        let table = table_from(&ids);
        let registry = register_table(table.clone()).unwrap();
        prop_assert_eq!(registry.len(), table.len());
        for expected in &table {
            let resolution = registry.lookup(expected.id).unwrap();
            prop_assert_eq!(resolution, expected.resolution());
        }
    }

    #[test]
    fn test_unregistered_ids_fail_with_unknown_call_id(ids in sorted_ids(), probe in any::<u32>()) {
        prop_assume!(!ids.contains(&probe));
        let registry = register_table(table_from(&ids)).unwrap();
        let err = registry.lookup(probe).unwrap_err();
        prop_assert!(err.is_unknown_call_id());
    }

    #[test]
    fn test_duplicate_ids_are_rejected(ids in sorted_ids(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!ids.is_empty());
        let mut table = table_from(&ids);
        let position = pick.index(table.len());
        let duplicate = table[position];
        table.insert(position, duplicate);
        let err = register_table(table).unwrap_err();
        prop_assert!(err.is_invalid_table());
    }

    #[test]
    fn test_out_of_order_ids_are_rejected(
        ids in prop::collection::btree_set(any::<u32>(), 2..64),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut table = table_from(&ids);
        let position = pick.index(table.len() - 1);
        table.swap(position, position + 1);
        let err = register_table(table).unwrap_err();
        let is_out_of_order = matches!(err, RegistryError::InvalidTable { position: p, .. } if p == position + 1);
        prop_assert!(is_out_of_order);
    }

    #[test]
    fn test_all_strategies_agree(ids in dense_ids(), probes in prop::collection::vec(0u32..2_100, 1..64)) {
        let table = table_from(&ids);
        let reference = register_table(table.clone()).unwrap();
        for strategy in LookupStrategy::iter() {
            let registry = Registry::builder("corlib")
                .config(RegistryConfig::default().with_strategy(strategy))
                .entries(table.iter().copied())
                .build()
                .unwrap();
            for &probe in &probes {
                prop_assert_eq!(registry.lookup(probe).ok(), reference.lookup(probe).ok());
            }
        }
    }
}
