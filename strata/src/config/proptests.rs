//! Property-based tests for layer document merging.

use super::loader::{LayerSource, LOCAL_PRECEDENCE, PROJECT_PRECEDENCE, USER_PRECEDENCE};
use super::merger::ConfigMerger;
use super::schema::{LayerDocument, ResolverOptions};
use crate::layer::Layer;
use proptest::prelude::*;
use std::path::PathBuf;

fn source_strategy() -> impl Strategy<Value = LayerSource> {
    (
        prop_oneof![
            Just(USER_PRECEDENCE),
            Just(PROJECT_PRECEDENCE),
            Just(LOCAL_PRECEDENCE)
        ],
        prop::option::of(any::<bool>()),
        0usize..4,
        "[a-z]{1,8}",
    )
        .prop_map(|(precedence, memoize, count, dir)| LayerSource {
            path: PathBuf::from(format!("/{dir}/{precedence}.yaml")),
            precedence,
            document: LayerDocument {
                resolver: ResolverOptions { memoize },
                layers: (0..count)
                    .map(|i| Layer::new().with_name(format!("{precedence}-{i}")))
                    .collect(),
            },
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Merging keeps every layer and records an origin for each
    #[test]
    fn merge_preserves_layers(sources in prop::collection::vec(source_strategy(), 0..6)) {
        let total: usize = sources.iter().map(|s| s.document.layers.len()).sum();
        let stack = ConfigMerger::merge(sources);
        prop_assert_eq!(stack.layers.len(), total);
        prop_assert_eq!(stack.origins.len(), total);
        prop_assert!(stack.origins.iter().all(Option::is_some));
    }

    // Layers from higher-precedence documents always come later
    #[test]
    fn merge_orders_by_precedence(sources in prop::collection::vec(source_strategy(), 0..6)) {
        let stack = ConfigMerger::merge(sources);
        let precedences: Vec<u8> = stack
            .layers
            .iter()
            .filter_map(|layer| layer.name.as_deref())
            .filter_map(|name| name.split('-').next())
            .filter_map(|p| p.parse().ok())
            .collect();
        prop_assert!(precedences.windows(2).all(|w| w[0] <= w[1]));
    }

    // The memoize option comes from the highest-precedence document that sets it
    #[test]
    fn merge_options_highest_set_wins(sources in prop::collection::vec(source_strategy(), 0..6)) {
        let mut ordered = sources.clone();
        ordered.sort_by_key(|s| s.precedence);
        let expected = ordered.iter().rev().find_map(|s| s.document.resolver.memoize);

        let stack = ConfigMerger::merge(sources);
        prop_assert_eq!(stack.options.memoize, expected);
    }
}
