//! Configuration Tests.

use pretty_assertions::assert_eq;
use rstest::rstest;

use r16sim_core::common::ConfigError;
use r16sim_core::config::{Config, ReadTiming};

#[test]
fn empty_document_is_default() {
    let config = Config::from_json("{}").expect("parses");
    assert_eq!(config, Config::default());
    assert_eq!(config.general.start_pc, 0);
    assert_eq!(config.general.max_ticks, 1_000_000);
    assert!(!config.general.trace_instructions);
    assert_eq!(config.memory.data_words, 1024);
    assert_eq!(config.memory.read_default, 0);
    assert_eq!(config.memory.read_timing, ReadTiming::SameTick);
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config = Config::from_json(r#"{ "memory": { "read_timing": "NextTick" } }"#)
        .expect("parses");
    assert_eq!(config.memory.read_timing, ReadTiming::NextTick);
    assert_eq!(config.memory.data_words, 1024);
    assert_eq!(config.general, Config::default().general);
}

#[rstest]
#[case::unknown_top(r#"{ "cache": {} }"#)]
#[case::unknown_field(r#"{ "general": { "verbose": true } }"#)]
#[case::bad_timing(r#"{ "memory": { "read_timing": "Later" } }"#)]
#[case::wrong_type(r#"{ "memory": { "data_words": "many" } }"#)]
#[case::not_json("data_words = 4")]
fn malformed_documents(#[case] text: &str) {
    let err = Config::from_json(text).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)), "{err:?}");
}

#[rstest]
#[case::no_memory(r#"{ "memory": { "data_words": 0 } }"#, "memory.data_words")]
#[case::too_much_memory(r#"{ "memory": { "data_words": 65537 } }"#, "memory.data_words")]
#[case::no_ticks(r#"{ "general": { "max_ticks": 0 } }"#, "general.max_ticks")]
fn invalid_values(#[case] text: &str, #[case] field: &str) {
    let err = Config::from_json(text).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)), "{err:?}");
    assert!(err.to_string().contains(field), "{err}");
}

#[test]
fn full_address_space_is_allowed() {
    let config = Config::from_json(r#"{ "memory": { "data_words": 65536 } }"#).expect("parses");
    assert_eq!(config.memory.data_words, 65536);
    assert!(config.validate().is_ok());
}
