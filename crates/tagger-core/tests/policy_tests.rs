//! Tests for policy files and presets

use pretty_assertions::assert_eq;
use rstest::rstest;
use std::fs;
use tagger_content::RequiredTag;
use tagger_core::{Error, Policy, Preset};
use tagger_fs::NormalizedPath;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> NormalizedPath {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    NormalizedPath::new(path)
}

#[test]
fn test_policy_file_overrides_tags_and_keeps_default_rules() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "policy.toml",
        r#"
[[tags]]
key = "cost_center"
value = "CHANGE_ME"
"#,
    );

    let policy = Policy::load(&path).unwrap();
    assert_eq!(policy.tags, vec![RequiredTag::new("cost_center", "CHANGE_ME")]);
    assert_eq!(policy.cloudformation, Policy::default().cloudformation);
    assert!(policy.exclude_paths.is_empty());
}

#[rstest]
#[case("policy.json", r#"{"tags": [{"key": "a", "value": "1"}], "exclude_paths": ["fixtures"]}"#)]
#[case("policy.yaml", "tags:\n  - key: a\n    value: '1'\nexclude_paths:\n  - fixtures\n")]
#[case("policy.toml", "exclude_paths = [\"fixtures\"]\n[[tags]]\nkey = \"a\"\nvalue = \"1\"\n")]
fn test_policy_formats(#[case] name: &str, #[case] content: &str) {
    let dir = TempDir::new().unwrap();
    let policy = Policy::load(&write(&dir, name, content)).unwrap();
    assert_eq!(policy.tags, vec![RequiredTag::new("a", "1")]);
    assert_eq!(policy.exclude_paths, vec!["fixtures".to_string()]);
}

#[test]
fn test_invalid_policy_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "policy.toml", "tags = []\n");
    assert!(matches!(Policy::load(&path), Err(Error::InvalidPolicy { .. })));
}

#[test]
fn test_unknown_fields_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "policy.toml", "colour = \"red\"\n");
    assert!(matches!(Policy::load(&path), Err(Error::Fs(_))));
}

#[test]
fn test_unsupported_policy_extension() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "policy.ini", "tags = x\n");
    assert!(matches!(
        Policy::load(&path),
        Err(Error::Fs(tagger_fs::Error::UnsupportedFormat { .. }))
    ));
}

#[test]
fn test_resolve_prefers_the_file() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "p.toml", "[[tags]]\nkey = \"k\"\nvalue = \"v\"\n");

    let from_file = Policy::resolve(Preset::Governance, Some(&path)).unwrap();
    assert_eq!(from_file.tags.len(), 1);

    let from_preset = Policy::resolve(Preset::Governance, None).unwrap();
    assert_eq!(from_preset, Policy::preset(Preset::Governance));
}

#[test]
fn test_presets_round_trip_through_toml() {
    for preset in Preset::ALL {
        let policy = Policy::preset(preset);
        let rendered = policy.to_toml().unwrap();
        let parsed: Policy = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, policy);
    }
}

#[test]
fn test_governance_preset_values() {
    let policy = Policy::preset(Preset::Governance);
    assert!(policy.tags.iter().all(|tag| tag.value == "CHANGE_ME"));
    assert!(
        policy
            .cloudformation
            .replicated_types
            .contains("AWS::DynamoDB::GlobalTable")
    );
    assert_eq!(policy.exclude_paths, vec!["test".to_string()]);
}
