//! Tests for loading and validating AlgebraPolicy.

#![cfg(feature = "config")]

use std::io::Write;

use rstest::rstest;
use skewset::algebra::{
    AlgebraPolicy, DEFAULT_BIG_SMALL_RATIO, DEFAULT_SMALL_SET_THRESHOLD, MAX_SMALL_SET_THRESHOLD,
    PolicyError,
};

#[rstest]
fn test_empty_toml_yields_defaults() {
    let policy = AlgebraPolicy::from_toml("").expect("empty document parses");
    assert_eq!(policy, AlgebraPolicy::default());
    assert_eq!(policy.small_set_threshold(), DEFAULT_SMALL_SET_THRESHOLD);
    assert_eq!(policy.big_small_ratio(), DEFAULT_BIG_SMALL_RATIO);
}

#[rstest]
#[case::threshold_only("small_set_threshold = 64", 64, DEFAULT_BIG_SMALL_RATIO)]
#[case::ratio_only("big_small_ratio = 5", DEFAULT_SMALL_SET_THRESHOLD, 5)]
#[case::both("small_set_threshold = 0\nbig_small_ratio = 1", 0, 1)]
fn test_toml_overrides_defaults(
    #[case] source: &str,
    #[case] threshold: usize,
    #[case] ratio: usize,
) {
    let policy = AlgebraPolicy::from_toml(source).expect("valid policy");
    assert_eq!(policy.small_set_threshold(), threshold);
    assert_eq!(policy.big_small_ratio(), ratio);
}

#[rstest]
#[case::negative("small_set_threshold = -1")]
#[case::wrong_type("big_small_ratio = \"twenty\"")]
#[case::malformed("small_set_threshold = ")]
fn test_unparseable_toml_is_a_parse_error(#[case] source: &str) {
    let result = AlgebraPolicy::from_toml(source);
    assert!(matches!(result, Err(PolicyError::Parse(_))));
}

#[rstest]
fn test_out_of_range_toml_is_rejected() {
    let result = AlgebraPolicy::from_toml("big_small_ratio = 0");
    assert!(matches!(
        result,
        Err(PolicyError::InvalidValue { ref key, .. }) if key == "big_small_ratio"
    ));

    let source = format!("small_set_threshold = {}", MAX_SMALL_SET_THRESHOLD + 1);
    let result = AlgebraPolicy::from_toml(&source);
    assert!(matches!(
        result,
        Err(PolicyError::InvalidValue { ref key, .. }) if key == "small_set_threshold"
    ));
}

#[rstest]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "small_set_threshold = 128").expect("write");
    writeln!(file, "big_small_ratio = 12").expect("write");

    let policy = AlgebraPolicy::load_from_path(file.path()).expect("valid file");

    assert_eq!(policy.small_set_threshold(), 128);
    assert_eq!(policy.big_small_ratio(), 12);
}

#[rstest]
fn test_missing_file_falls_back_to_defaults() {
    let directory = tempfile::tempdir().expect("temp dir");
    let path = directory.path().join("absent.toml");

    let policy = AlgebraPolicy::load_from_path(path).expect("defaults apply");

    assert_eq!(policy.small_set_threshold(), DEFAULT_SMALL_SET_THRESHOLD);
}

#[rstest]
fn test_serde_round_trip() {
    let policy = AlgebraPolicy::new(77, 9).expect("valid policy");

    let json = serde_json::to_string(&policy).expect("serialize");
    let restored: AlgebraPolicy = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(restored, policy);
    assert_eq!(json, r#"{"small_set_threshold":77,"big_small_ratio":9}"#);
}

#[rstest]
fn test_error_messages() {
    assert_eq!(
        PolicyError::Parse("bad".to_string()).to_string(),
        "Failed to parse policy: bad"
    );
    assert_eq!(
        PolicyError::InvalidValue {
            key: "big_small_ratio".to_string(),
            message: "value must be at least 1".to_string(),
        }
        .to_string(),
        "Invalid policy value for 'big_small_ratio': value must be at least 1"
    );
}
