//! Property tests for change classification.

use proptest::prelude::*;

use restack::{classify, UpdateAction};

fn path_segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9._-]{1,12}").unwrap()
}

/// Paths biased toward the recognized prefixes, with arbitrary tails
fn changed_path() -> impl Strategy<Value = String> {
    let prefix = prop_oneof![
        Just("client".to_string()),
        Just("functions".to_string()),
        Just("services".to_string()),
        Just("resources".to_string()),
        Just("resources/custom-resources".to_string()),
        path_segment(),
    ];
    (prefix, proptest::collection::vec(path_segment(), 0..=3)).prop_map(|(prefix, tail)| {
        if tail.is_empty() {
            prefix
        } else {
            format!("{}/{}", prefix, tail.join("/"))
        }
    })
}

fn changed_paths() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(changed_path(), 0..24)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Classification never panics on arbitrary input.
    #[test]
    fn property_classify_never_panics(
        paths in proptest::collection::vec("(?s).{0,64}", 0..16)
    ) {
        let _ = classify(&paths);
    }

    /// PROPERTY: A single path lands in at most one category.
    #[test]
    fn property_one_category_per_path(
        path in changed_path()
    ) {
        let changes = classify([path.as_str()]);
        prop_assert!(changes.len() <= 1);
    }

    /// PROPERTY: Paths outside every recognized prefix contribute nothing.
    #[test]
    fn property_unrecognized_paths_are_dropped(
        tail in proptest::collection::vec(path_segment(), 1..=3)
    ) {
        let path = format!("unrecognized-root/{}", tail.join("/"));
        let changes = classify([path.as_str()]);
        prop_assert!(changes.is_empty());
    }

    /// PROPERTY: Permuting the input paths never changes the result.
    #[test]
    fn property_input_order_is_irrelevant(
        paths in changed_paths(),
        shuffled in changed_paths().prop_shuffle().no_shrink()
    ) {
        let mut reversed = paths.clone();
        reversed.reverse();
        prop_assert_eq!(classify(&paths), classify(&reversed));

        let mut sorted = shuffled.clone();
        sorted.sort();
        prop_assert_eq!(classify(&shuffled), classify(&sorted));
    }

    /// PROPERTY: Supplying every path twice adds nothing (idempotent
    /// accumulation).
    #[test]
    fn property_duplicate_paths_collapse(
        paths in changed_paths()
    ) {
        let mut doubled = paths.clone();
        doubled.extend(paths.clone());
        prop_assert_eq!(classify(&paths), classify(&doubled));
    }

    /// PROPERTY: Every recorded target is a non-empty string.
    #[test]
    fn property_no_empty_targets(
        paths in changed_paths()
    ) {
        let changes = classify(&paths);
        for action in UpdateAction::ALL {
            if let Some(targets) = changes.targets(action) {
                prop_assert!(targets.iter().all(|t| !t.is_empty()));
            }
        }
    }
}
