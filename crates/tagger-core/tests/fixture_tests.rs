//! Golden-file tests using test-fixtures/templates
//!
//! Each input template is copied to a temporary directory, patched with the
//! governance preset and compared to its counterpart under `expected/`.

use pretty_assertions::assert_eq;
use rstest::rstest;
use std::fs;
use std::path::PathBuf;
use tagger_core::{DocumentKind, Outcome, Policy, Preset, Runner};
use tempfile::tempdir;

/// Path to the template fixtures (relative to the workspace root).
fn fixtures_dir() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // crates/tagger-core -> ../../test-fixtures
    manifest_dir.join("../../test-fixtures/templates")
}

fn read_fixture(dir: &str, name: &str) -> String {
    let path = fixtures_dir().join(dir).join(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture at {}: {}", path.display(), e))
}

#[rstest]
#[case("stack.yaml", DocumentKind::CloudFormationYaml)]
#[case("stack.json", DocumentKind::CloudFormationJson)]
#[case("main.tf", DocumentKind::Terraform)]
#[case("main.tf.json", DocumentKind::TerraformJson)]
fn test_fixture_matches_expected(#[case] name: &str, #[case] kind: DocumentKind) {
    let dir = tempdir().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, read_fixture("input", name)).unwrap();

    let runner = Runner::new(Policy::preset(Preset::Governance));
    let report = runner.process(&path);
    assert_eq!(report.kind, Some(kind));
    assert_eq!(report.outcome, Outcome::Patched);
    assert_eq!(report.stats.eligible, 1);
    assert_eq!(report.stats.entries_added, 2);

    assert_eq!(fs::read_to_string(&path).unwrap(), read_fixture("expected", name));
    assert_eq!(runner.process(&path).outcome, Outcome::Unchanged);
}

#[rstest]
#[case("stack.yaml")]
#[case("stack.json")]
#[case("main.tf")]
#[case("main.tf.json")]
fn test_expected_fixtures_are_already_compliant(#[case] name: &str) {
    let dir = tempdir().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, read_fixture("expected", name)).unwrap();

    let report = Runner::new(Policy::preset(Preset::Governance)).process(&path);
    assert_eq!(report.outcome, Outcome::Unchanged);
}
