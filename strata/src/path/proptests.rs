//! Property-based tests for target path normalization.

use super::normalize_target;
use proptest::prelude::*;

fn segment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-z0-9_-]{1,12}(\\.[a-z]{1,3})?",
        1 => Just(".".to_string()),
        1 => Just("..".to_string()),
        1 => Just(String::new()),
    ]
}

fn target_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(segment_strategy(), 1..8).prop_map(|parts| parts.join("/"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 5000,
        .. ProptestConfig::default()
    })]

    // normalize_target(normalize_target(p)) == normalize_target(p)
    #[test]
    fn target_normalization_idempotent(path in target_strategy()) {
        if let Ok(once) = normalize_target(&path) {
            let twice = normalize_target(&once).unwrap();
            prop_assert_eq!(once, twice);
        }
    }

    // Normalized targets never contain dot segments or empty segments
    #[test]
    fn normalized_targets_are_clean(path in target_strategy()) {
        if let Ok(normalized) = normalize_target(&path) {
            for segment in normalized.split('/') {
                prop_assert!(!segment.is_empty());
                prop_assert_ne!(segment, ".");
                prop_assert_ne!(segment, "..");
            }
            prop_assert!(!normalized.starts_with('/'));
        }
    }

    // Backslash and slash spellings normalize identically
    #[test]
    fn separators_are_interchangeable(parts in prop::collection::vec("[a-z]{1,8}", 1..5)) {
        let forward = parts.join("/");
        let backward = parts.join("\\");
        prop_assert_eq!(normalize_target(&forward).unwrap(), normalize_target(&backward).unwrap());
    }
}
