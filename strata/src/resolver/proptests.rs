//! Property-based tests for layer resolution.

use super::{resolve, Resolver};
use crate::layer::Layer;
use crate::rule::{RuleDirective, Severity};
use proptest::prelude::*;

const RULES: [&str; 4] = ["no-undef", "no-console", "import/order", "eqeqeq"];
const DIRS: [&str; 4] = ["src", "test", "scripts", "db"];

fn severity_strategy() -> impl Strategy<Value = Severity> {
    prop_oneof![Just(Severity::Off), Just(Severity::Warn), Just(Severity::Error)]
}

fn rules_strategy() -> impl Strategy<Value = Vec<(usize, Severity)>> {
    prop::collection::vec((0..RULES.len(), severity_strategy()), 0..4)
}

fn layer_strategy() -> impl Strategy<Value = Layer> {
    (prop::option::of(0..DIRS.len()), rules_strategy()).prop_map(|(dir, rules)| {
        let mut layer = Layer::new();
        if let Some(dir) = dir {
            layer = layer.with_patterns([format!("{}/**", DIRS[dir])]);
        }
        for (rule, severity) in rules {
            layer = layer.with_rule(RULES[rule], severity);
        }
        layer
    })
}

fn target_strategy() -> impl Strategy<Value = String> {
    (0..DIRS.len(), "[a-z]{1,8}").prop_map(|(dir, file)| format!("{}/{file}.js", DIRS[dir]))
}

// One layer per directory, each scoped to its own directory
fn disjoint_layers_strategy() -> impl Strategy<Value = Vec<Layer>> {
    prop::collection::vec(rules_strategy(), DIRS.len()).prop_map(|rule_sets| {
        rule_sets
            .into_iter()
            .zip(DIRS)
            .map(|(rules, dir)| {
                rules.into_iter().fold(
                    Layer::new().with_patterns([format!("{dir}/**")]),
                    |layer, (rule, severity)| layer.with_rule(RULES[rule], severity),
                )
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Same layers and path always give the same result
    #[test]
    fn resolution_is_deterministic(
        layers in prop::collection::vec(layer_strategy(), 0..6),
        target in target_strategy()
    ) {
        let first = resolve(&layers, &target).unwrap();
        let second = resolve(&layers, &target).unwrap();
        prop_assert_eq!(first, second);
    }

    // With no layers nothing is in effect
    #[test]
    fn empty_stack_yields_empty_config(target in target_strategy()) {
        let config = resolve(&[], &target).unwrap();
        prop_assert!(config.is_empty());
        prop_assert!(!config.ignored);
    }

    // Every final directive equals the one from the last matching layer
    #[test]
    fn last_matching_layer_wins(
        layers in prop::collection::vec(layer_strategy(), 1..6),
        target in target_strategy()
    ) {
        let resolver = Resolver::new(layers.clone()).unwrap();
        let config = resolver.resolve(&target).unwrap();
        let matching = resolver.matching_layers(&target).unwrap();

        for rule in RULES {
            let expected: Option<&RuleDirective> = matching
                .iter()
                .rev()
                .find_map(|&index| layers[index].rules.get(rule));
            prop_assert_eq!(config.rule(rule), expected);
        }
    }

    // Reordering layers with disjoint scopes does not change any result
    #[test]
    fn disjoint_layers_reorder_invariant(
        (layers, shuffled) in disjoint_layers_strategy()
            .prop_flat_map(|layers| (Just(layers.clone()), Just(layers).prop_shuffle())),
        target in target_strategy()
    ) {
        let original = resolve(&layers, &target).unwrap();
        let reordered = resolve(&shuffled, &target).unwrap();
        prop_assert_eq!(original, reordered);
    }

    // Memoized resolvers agree with uncached ones
    #[test]
    fn memoization_is_transparent(
        layers in prop::collection::vec(layer_strategy(), 0..6),
        targets in prop::collection::vec(target_strategy(), 1..10)
    ) {
        let plain = Resolver::new(layers.clone()).unwrap();
        let memo = Resolver::new(layers).unwrap().with_memoization();
        for target in targets.iter().chain(targets.iter()) {
            prop_assert_eq!(plain.resolve(target).unwrap(), memo.resolve(target).unwrap());
        }
    }
}
