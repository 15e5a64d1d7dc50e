//! Property-based tests for path handling.
//!
//! The normalize and relative modules carry light inline property tests.
//! This module runs heavier suites with many more cases, including paths
//! that mix hidden names and dot segments.

use super::normalize::{dirname, is_absolute, normalize, normalize_to, resolve_segments};
use super::relative::relative_path;
use proptest::prelude::*;

fn segment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[a-z0-9_-]{1,8}",
        1 => "\\.[a-z]{1,5}",
        1 => Just(".".to_string()),
        1 => Just("..".to_string()),
        1 => Just(String::new()),
    ]
}

fn absolute_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(segment_strategy(), 0..10)
        .prop_map(|parts| format!("/{}", parts.join("/")))
}

fn clean_dir_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-d]{1,3}", 0..6).prop_map(|parts| format!("/{}", parts.join("/")))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 10000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // normalize(normalize(p)) == normalize(p)
    #[test]
    fn path_normalization_idempotent(path in absolute_path_strategy()) {
        let once = normalize(&path).unwrap();
        prop_assert_eq!(normalize(&once).unwrap(), once);
    }

    // Normalized absolute paths never contain "." or ".." segments
    #[test]
    fn normalized_paths_no_dot_segments(path in absolute_path_strategy()) {
        let normalized = normalize(&path).unwrap();
        prop_assert!(is_absolute(&normalized));
        prop_assert!(normalized.split('/').all(|s| s != "." && s != ".."));
    }

    // Absolute normalization never consults the working directory
    #[test]
    fn absolute_normalization_is_lexical(path in absolute_path_strategy()) {
        prop_assert_eq!(normalize(&path).unwrap(), resolve_segments(&path));
    }

    // Normalized paths never end with a separator except for the root
    #[test]
    fn normalized_paths_no_trailing_separator(path in absolute_path_strategy()) {
        let normalized = normalize(&path).unwrap();
        prop_assert!(normalized == "/" || !normalized.ends_with('/'));
    }

    // The parent of a normalized path is a prefix of it
    #[test]
    fn dirname_is_prefix(path in absolute_path_strategy()) {
        let normalized = normalize(&path).unwrap();
        prop_assert!(normalized.starts_with(&dirname(&normalized)));
    }

    // relative_path(A, A) is always empty
    #[test]
    fn relative_path_reflexive(path in clean_dir_strategy()) {
        prop_assert_eq!(relative_path(&path, &path), "");
    }

    // Resolving relative_path(A/, B) against A/ lands on B
    #[test]
    fn relative_path_round_trip(a in clean_dir_strategy(), b in clean_dir_strategy()) {
        let from = if a == "/" { a } else { format!("{a}/") };
        let rel = relative_path(&from, &b);
        prop_assert!(!is_absolute(&rel));
        prop_assert_eq!(normalize_to(&rel, &from).unwrap(), normalize(&b).unwrap());
    }

    // Relative results only ever ascend at the front
    #[test]
    fn relative_path_ascends_first(a in clean_dir_strategy(), b in clean_dir_strategy()) {
        let rel = relative_path(&a, &b);
        let mut seen_name = false;
        for segment in rel.split('/') {
            if segment == ".." {
                prop_assert!(!seen_name);
            } else if !segment.is_empty() {
                seen_name = true;
            }
        }
    }
}
