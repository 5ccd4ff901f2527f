//! Shared helpers for the Tabula Core integration tests

#![allow(dead_code)]

use proptest::prelude::*;
use tabula_core::Selection;

/// Install a test subscriber honoring `RUST_LOG`; safe to call from every test
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Selections over `0..universe`, drawn in both representations
pub fn selection(universe: u32) -> impl Strategy<Value = Selection> {
    prop_oneof![
        (0..=universe, 0..=universe).prop_map(|(a, b)| Selection::with_range(a.min(b), a.max(b))),
        prop::collection::vec(0..universe, 0..64).prop_map(|v| Selection::from_slice(&v)),
    ]
}

/// Row values drawn from a small domain so that ties are common
pub fn string_values() -> impl Strategy<Value = Vec<Option<String>>> {
    prop::collection::vec(
        prop_oneof![
            1 => Just(None),
            6 => "[a-e]{1,2}".prop_map(Some),
        ],
        0..80,
    )
}
