//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::schema::{Config, ReaderConfig};
use super::validator::ConfigValidator;
use crate::hasher::DigestAlgorithm;
use proptest::prelude::*;

fn algorithm_strategy() -> impl Strategy<Value = DigestAlgorithm> {
    prop_oneof![Just(DigestAlgorithm::Sha256), Just(DigestAlgorithm::Sha512)]
}

fn reader_strategy() -> impl Strategy<Value = ReaderConfig> {
    (
        prop::option::of(1usize..=65536),
        prop::option::of(prop_oneof![
            Just("\n".to_string()),
            Just("\r\n".to_string()),
            "[a-z]{1,4}",
        ]),
    )
        .prop_map(|(chunk_size, newline)| ReaderConfig {
            chunk_size,
            newline,
        })
}

// Only generates valid configs
fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of("/[a-z]{1,12}"),
        prop::option::of(1u32..=100),
        prop::option::of(reader_strategy()),
        prop::option::of(algorithm_strategy()),
    )
        .prop_map(|(temp_dir, temp_max_attempts, reader, hash_algorithm)| Config {
            temp_dir,
            temp_max_attempts,
            reader,
            hash_algorithm,
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 10000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // Every field set in the higher source wins, others fall through
    #[test]
    fn config_merge_higher_precedence_wins(
        low in config_strategy(),
        high in config_strategy()
    ) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        prop_assert_eq!(result.temp_dir.as_ref(), high.temp_dir.as_ref().or(low.temp_dir.as_ref()));
        prop_assert_eq!(
            result.temp_max_attempts,
            high.temp_max_attempts.or(low.temp_max_attempts)
        );
        prop_assert_eq!(result.hash_algorithm, high.hash_algorithm.or(low.hash_algorithm));

        let field = |c: &Config| c.reader.as_ref().and_then(|r| r.chunk_size);
        prop_assert_eq!(field(&result), field(&high).or(field(&low)));
    }

    #[test]
    fn config_merge_with_empty_is_identity(config in config_strategy()) {
        let mut result = config.clone();
        ConfigMerger::merge_into(&mut result, &Config::default());
        prop_assert_eq!(&result, &config);
    }

    #[test]
    fn config_merge_is_idempotent(config in config_strategy()) {
        let mut once = Config::default();
        ConfigMerger::merge_into(&mut once, &config);
        let mut twice = once.clone();
        ConfigMerger::merge_into(&mut twice, &config);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn merged_valid_configs_stay_valid(a in config_strategy(), b in config_strategy()) {
        let mut result = a;
        ConfigMerger::merge_into(&mut result, &b);
        prop_assert!(ConfigValidator::validate(&result).is_ok());
    }

    #[test]
    fn config_yaml_round_trip(config in config_strategy()) {
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: Config = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(back, config);
    }
}
